//! Aletwende - terminal food delivery ordering
//!
//! Loads configuration, the store catalog and the address directory, then
//! runs the delivery flow in the terminal until the user quits.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use tracing::{error, info};

use aletwende::application::App;
use aletwende::infrastructure::{logging, AppConfig, CatalogRepository, ConfiguredLocation};
use aletwende::presentation::{render_ui, InputHandler};

#[derive(Parser, Debug)]
#[command(name = "aletwende", version, about = "Order food for delivery from the terminal")]
struct Args {
    /// Config file (defaults to ~/.config/aletwende/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store catalog as JSON
    #[arg(long)]
    stores: Option<PathBuf>,

    /// Address directory as CSV
    #[arg(long)]
    addresses: Option<PathBuf>,

    /// Maximum number of extra stops
    #[arg(long)]
    max_stops: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(max_stops) = args.max_stops {
        config.max_stops = max_stops;
    }
    if args.stores.is_some() {
        config.stores_path = args.stores;
    }
    if args.addresses.is_some() {
        config.addresses_path = args.addresses;
    }

    if let Some(path) = config.log_path() {
        if let Err(err) = logging::init(&path) {
            eprintln!("warning: logging disabled: {err:#}");
        }
    }

    let catalog = CatalogRepository::load_stores_or_default(config.stores_path.as_deref())?;
    let addresses = CatalogRepository::load_addresses_or_default(config.addresses_path.as_deref())?;
    info!(
        stores = catalog.len(),
        addresses = addresses.entries().len(),
        max_stops = config.max_stops,
        "starting"
    );

    let location = ConfiguredLocation::new(
        config.current_address.clone(),
        Instant::now(),
        Duration::from_millis(config.location_delay_ms),
    );
    let mut app = App::new(catalog, addresses, config.flow_settings(), Box::new(location));

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, config.tick_rate());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(%err, "event loop failed");
    }
    res.context("terminal event loop")
}

/// Draws, waits up to `tick_rate` for input, then advances timers.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick_rate: Duration) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
                Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    InputHandler::handle_click(app, mouse.column, mouse.row, area);
                }
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            info!("quit");
            return Ok(());
        }
    }
}
