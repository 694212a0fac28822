use crate::application::{
    App, ConfirmPhase, ConfirmScreen, DeliverySelector, FoodPicker, PaymentMethodPanel, PickerTarget, RouteBuilder, Screen,
    SendServicePicker, ShopScreen, StoreMenuScreen,
};
use crate::domain::{
    DeliveryCategory, Destination, DriverWaitPayload, FoodOrderSession, PaymentMethod, ProfileTab,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match &app.screen {
        Screen::SendServices(picker) => render_send_services(f, picker, chunks[1]),
        Screen::Shop(shop) => render_shop(f, app, shop, chunks[1]),
        Screen::StoreMenu(menu) => render_store_menu(f, app, menu, chunks[1]),
        Screen::FoodiesRoute(builder) => render_route_builder(f, app, builder, chunks[1]),
        Screen::DeliverySelection(selector) => render_delivery_selection(f, app, selector, chunks[1]),
        Screen::ConfirmDelivery(screen) => render_confirmation(f, screen, chunks[1]),
        Screen::WaitingForDriver(payload) => render_waiting(f, payload, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);

    match &app.screen {
        Screen::FoodiesRoute(RouteBuilder { food_picker: Some(picker), .. }) => {
            render_food_picker(f, &app.session, picker);
        }
        Screen::DeliverySelection(selector) if selector.payment_panel.is_open => {
            render_payment_panel(f, &selector.payment_panel);
        }
        _ => {}
    }
}

/// Where the payment panel is drawn for a terminal of size `area`. Clicks
/// outside this rectangle count as backdrop clicks.
pub fn payment_panel_area(area: Rect) -> Rect {
    bottom_sheet(area, 14)
}

fn bottom_sheet(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let width = area.width * 9 / 10;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height - height,
        width,
        height,
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = match &app.screen {
        Screen::SendServices(_) => "Aletwende Send".to_string(),
        Screen::Shop(_) => "Shop".to_string(),
        Screen::StoreMenu(menu) => menu
            .store(&app.catalog)
            .map(|store| store.name.clone())
            .unwrap_or_default(),
        Screen::FoodiesRoute(_) => "Foodies Route".to_string(),
        Screen::DeliverySelection(_) => app.session.route_summary(),
        Screen::ConfirmDelivery(_) => "Confirm delivery".to_string(),
        Screen::WaitingForDriver(_) => "Waiting for driver".to_string(),
    };
    let cart = app.session.cart_items().len();
    let header = Paragraph::new(format!(
        "aletwende | {} | Cart: {} item{} (K {})",
        title,
        cart,
        if cart == 1 { "" } else { "s" },
        app.session.subtotal()
    ))
    .style(Style::default().fg(Color::Green));
    f.render_widget(header, area);
}

fn cursor_style(selected: bool) -> Style {
    if selected {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    }
}

fn disabled_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_send_services(f: &mut Frame, picker: &SendServicePicker, area: Rect) {
    let mut lines = vec![
        Line::from("What would you like to send?").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
    ];
    for (index, service) in picker.services().iter().enumerate() {
        let highlighted = picker.selected_service == Some(service.id);
        let marker = if highlighted { "●" } else { " " };
        lines.push(
            Line::from(vec![
                Span::raw(format!("{marker} {} ", service.icon)),
                Span::styled(service.label, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", service.description), Style::default().fg(Color::Gray)),
            ])
            .style(cursor_style(index == picker.cursor)),
        );
    }
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Services"));
    f.render_widget(widget, area);
}

fn render_shop(f: &mut Frame, app: &App, shop: &ShopScreen, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search_style = if shop.searching { Style::default().fg(Color::Yellow) } else { Style::default() };
    let search_text = if shop.search_query.is_empty() && !shop.searching {
        "Search stores...".to_string()
    } else {
        shop.search_query.clone()
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(search, chunks[0]);

    let stores = shop.visible_stores(&app.catalog);
    let lines: Vec<Line> = if stores.is_empty() {
        vec![Line::from("No stores match your search").style(Style::default().fg(Color::DarkGray))]
    } else {
        stores
            .iter()
            .enumerate()
            .map(|(index, store)| {
                Line::from(vec![
                    Span::styled(store.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {} items", store.foods.len()), Style::default().fg(Color::Gray)),
                ])
                .style(cursor_style(index == shop.cursor))
            })
            .collect()
    };
    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Stores"));
    f.render_widget(list, chunks[1]);
}

fn render_store_menu(f: &mut Frame, app: &App, menu: &StoreMenuScreen, area: Rect) {
    let Some(store) = menu.store(&app.catalog) else {
        return;
    };
    let mut lines: Vec<Line> = store
        .foods
        .iter()
        .enumerate()
        .map(|(index, food)| {
            let check = if app.session.is_in_cart(&food.id) { "[x]" } else { "[ ]" };
            Line::from(format!("{check} {:<32} K {}", food.name, food.price)).style(cursor_style(index == menu.cursor))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from("Checkout").style(disabled_style(menu.can_checkout(&app.session))));

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Menu"));
    f.render_widget(widget, area);
}

fn render_route_builder(f: &mut Frame, app: &App, builder: &RouteBuilder, area: Rect) {
    let session = &app.session;
    let stop_rows = session.stops().len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(stop_rows + 3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let current_foods = session.current_location_foods().len();
    let location = if builder.delivery_location.is_empty() {
        Span::styled(builder.location_placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(builder.delivery_location.clone())
    };
    let location_style = if builder.highlight_current_location {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut rows = vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Blue)),
            location,
            Span::styled(format!("  [View your food: {current_foods}]"), location_style),
        ])
        .style(cursor_style(builder.cursor == 0)),
    ];

    for (index, stop) in session.stops().iter().enumerate() {
        let text = builder.stop_input_text(session, &stop.id);
        let input = if text.is_empty() {
            Span::styled("Add stop", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(text.to_string())
        };
        let food = if stop.food_ids.is_empty() {
            "Add Food".to_string()
        } else {
            format!("Food added ({})", stop.food_ids.len())
        };
        let editing = builder.active_stop_input.as_deref() == Some(stop.id.as_str());
        rows.push(
            Line::from(vec![
                Span::styled(if editing { "✎ " } else { "● " }, Style::default().fg(Color::Green)),
                input,
                Span::styled(format!("  [{food}]"), Style::default().fg(Color::Gray)),
            ])
            .style(cursor_style(builder.cursor == index + 1)),
        );
    }

    let add_stop = if builder.can_add_stop(session) {
        format!("+ add stop ({}/{})", session.stops().len(), session.max_stops())
    } else {
        format!("stop limit reached ({})", session.max_stops())
    };
    let stops = Paragraph::new(rows).block(Block::default().borders(Borders::ALL).title(add_stop));
    f.render_widget(stops, chunks[0]);

    let title = if builder.active_stop_input.is_some() { "Suggestions" } else { "Recent places" };
    let suggestions: Vec<Line> = builder
        .suggestions(&app.addresses)
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut spans = vec![
                Span::styled(entry.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", entry.description), Style::default().fg(Color::Gray)),
            ];
            if let Some(distance) = &entry.distance {
                spans.push(Span::styled(format!("  {distance}"), Style::default().fg(Color::DarkGray)));
            }
            let highlighted = builder.active_stop_input.is_some() && index == builder.suggestion_cursor;
            Line::from(spans).style(cursor_style(highlighted))
        })
        .collect();
    let list = Paragraph::new(suggestions).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[1]);

    let go = Paragraph::new("Go to delivery").style(disabled_style(builder.can_go_to_delivery(session)));
    f.render_widget(go, chunks[2]);
}

fn render_food_picker(f: &mut Frame, session: &FoodOrderSession, picker: &FoodPicker) {
    let area = bottom_sheet(f.area(), session.cart_items().len() as u16 + 4);
    f.render_widget(Clear, area);

    let (title, destination) = match &picker.target {
        PickerTarget::CurrentLocation => ("Your Food", Destination::CurrentLocation),
        PickerTarget::Stop(stop_id) => ("Select Food for Stop", Destination::Stop(stop_id.as_str())),
    };
    let lines: Vec<Line> = session
        .cart_items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let check = if session.destination_of(&item.id) == Some(destination) { "[x]" } else { "[ ]" };
            Line::from(format!("{check} {:<32} K {}", item.name, item.price)).style(cursor_style(index == picker.cursor))
        })
        .collect();
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(widget, area);
}

fn render_delivery_selection(f: &mut Frame, app: &App, selector: &DeliverySelector, area: Rect) {
    let session = &app.session;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let promo = Paragraph::new("✓ 30% promo applied").style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_widget(promo, chunks[0]);

    let tabs: Vec<Span> = DeliveryCategory::ALL
        .iter()
        .flat_map(|category| {
            let style = if *category == selector.active_tab {
                Style::default().bg(Color::White).fg(Color::Black)
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", category.label()), style), Span::raw(" ")]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(tabs)), chunks[1]);

    let pricing = DeliverySelector::pricing(session);
    let modes: Vec<Line> = selector
        .visible_modes(session)
        .iter()
        .enumerate()
        .map(|(index, mode)| {
            let chosen = selector.selected_mode == Some(mode.id);
            let border = if chosen { Color::Green } else { Color::Gray };
            Line::from(vec![
                Span::raw(format!("{} ", mode.icon)),
                Span::styled(format!("{:<10}", mode.name), Style::default().fg(border).add_modifier(Modifier::BOLD)),
                Span::raw(format!(" {:<10} 🍔 {}", mode.time, session.cart_items().len())),
                Span::styled(
                    match pricing.total_with(mode) {
                        Ok(total) => format!("   K {total}"),
                        Err(_) => "   K n/a".to_string(),
                    },
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
            .style(cursor_style(index == selector.cursor))
        })
        .collect();
    let list = Paragraph::new(modes).block(Block::default().borders(Borders::ALL).title("Delivery mode"));
    f.render_widget(list, chunks[2]);

    let payment = Paragraph::new(format!("👥 {} ▼", selector.payment_panel.selected_method.label()));
    f.render_widget(payment, chunks[3]);

    let confirm = Paragraph::new(selector.confirm_label(session)).style(disabled_style(selector.can_confirm()));
    f.render_widget(confirm, chunks[4]);
}

fn render_payment_panel(f: &mut Frame, panel: &PaymentMethodPanel) {
    let area = payment_panel_area(f.area());
    f.render_widget(Clear, area);

    let tab = |label: &str, tab: ProfileTab| {
        let style = if panel.profile_tab == tab {
            Style::default().bg(Color::Green).fg(Color::Black)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!(" {label} "), style)
    };

    let mut lines = vec![
        Line::from("Balance is not available with this payment method").style(Style::default().fg(Color::Gray)),
        Line::from(""),
        Line::from(vec![tab("Personal", ProfileTab::Personal), Span::raw(" "), tab("Work", ProfileTab::Work)]),
        Line::from(""),
    ];
    for (index, method) in PaymentMethod::ALL.iter().enumerate() {
        let mark = if panel.selected_method == *method { "(•)" } else { "( )" };
        let style = if method.is_selectable() { Style::default() } else { Style::default().fg(Color::DarkGray) };
        lines.push(Line::from(Span::styled(format!("{mark} {}", method.label()), style)).style(cursor_style(index == panel.cursor)));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Payment methods (Esc to close)"),
    );
    f.render_widget(widget, area);
}

fn render_confirmation(f: &mut Frame, screen: &ConfirmScreen, area: Rect) {
    let payload = &screen.payload;
    let mode = &payload.delivery_mode;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::from(format!("{} {} Delivery", mode.icon, mode.name)).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!("Estimated: {}", mode.time)),
    ]);
    f.render_widget(heading, chunks[0]);

    let items: Vec<Line> = payload
        .cart_items
        .iter()
        .map(|item| Line::from(format!("{:<36} K {}", item.name, item.price)))
        .collect();
    let summary = Paragraph::new(items).block(Block::default().borders(Borders::ALL).title("Order Summary"));
    f.render_widget(summary, chunks[1]);

    let totals = Paragraph::new(vec![
        Line::from(format!("{:<36} K {}", "Food Total", payload.total_food_price)),
        Line::from(format!("{:<36} K {}", "Delivery Fee", payload.delivery_fee())),
        Line::from(format!("{:<36} K {}", "Total", payload.total_price)).style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(totals, chunks[2]);

    match screen.phase {
        ConfirmPhase::Processing(task) => {
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL))
                .gauge_style(Style::default().fg(Color::Gray))
                .label(screen.button_label())
                .ratio(task.progress(Instant::now()));
            f.render_widget(gauge, chunks[3]);
        }
        ConfirmPhase::Idle => {
            let button = Paragraph::new(screen.button_label())
                .style(disabled_style(screen.can_confirm()))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(button, chunks[3]);
        }
    }
}

fn render_waiting(f: &mut Frame, payload: &DriverWaitPayload, area: Rect) {
    let mut lines = vec![
        Line::from(format!("{} Looking for a {} driver...", payload.delivery_mode.icon, payload.delivery_mode.name))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!("Total: K {}", payload.total_price)),
        Line::from(format!("{} item(s)", payload.cart_items.len())),
        Line::from(""),
    ];
    for stop in &payload.stops {
        lines.push(Line::from(format!("Stop: {} ({} food)", stop.address, stop.food_ids.len())));
    }
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Order placed"));
    f.render_widget(widget, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let hint = match &app.screen {
        Screen::SendServices(_) => "↑↓: move | Enter: select | q: quit",
        Screen::Shop(shop) if shop.searching => "Type to search | Enter/Esc: done",
        Screen::Shop(_) => "↑↓: move | Enter: open store | /: search | Esc: back | q: quit",
        Screen::StoreMenu(_) => "↑↓: move | Space: add/remove | c: checkout | Esc: back",
        Screen::FoodiesRoute(RouteBuilder { food_picker: Some(_), .. }) => "↑↓: move | Space: toggle | Esc: done",
        Screen::FoodiesRoute(builder) if builder.active_stop_input.is_some() => {
            "Type address | ↑↓: suggestion | Enter: select | Esc: close"
        }
        Screen::FoodiesRoute(_) => "↑↓: move | a: add stop | e: edit address | f: food | x: remove | g: go to delivery | Esc: back",
        Screen::DeliverySelection(selector) if selector.payment_panel.is_open => {
            "Tab: personal/work | ↑↓: move | Enter: select | Esc: close"
        }
        Screen::DeliverySelection(_) => "←→: tab | ↑↓: move | Enter: choose | c: confirm | p: payment | Esc: route",
        Screen::ConfirmDelivery(screen) if screen.is_processing() => "Processing...",
        Screen::ConfirmDelivery(_) => "Enter: confirm order | Esc: back",
        Screen::WaitingForDriver(_) => "Enter: new order | q: quit",
    };

    let status = Paragraph::new(hint)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.screen {
            Screen::ConfirmDelivery(_) => Style::default().fg(Color::Yellow),
            Screen::WaitingForDriver(_) => Style::default().fg(Color::Green),
            _ => Style::default(),
        });
    f.render_widget(status, area);
}
