use crate::application::{App, PickerTarget, Screen};
use crate::domain::Route;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Position, Rect};
use std::time::Instant;

use super::ui::payment_panel_area;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        Self::handle_key_event_at(app, key, modifiers, Instant::now());
    }

    /// Same as [`InputHandler::handle_key_event`] with an explicit clock, so
    /// the confirmation delay can be driven deterministically.
    pub fn handle_key_event_at(app: &mut App, key: KeyCode, modifiers: KeyModifiers, now: Instant) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            app.should_quit = true;
            return;
        }
        if key == KeyCode::Char('q') && !app.is_typing() {
            app.should_quit = true;
            return;
        }

        if let Screen::WaitingForDriver(_) = app.screen {
            if key == KeyCode::Enter {
                app.start_new_order();
            }
            return;
        }

        let route = match &mut app.screen {
            Screen::SendServices(picker) => match key {
                KeyCode::Up | KeyCode::Char('k') => {
                    picker.move_cursor(-1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    picker.move_cursor(1);
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => picker.activate(),
                _ => None,
            },
            Screen::Shop(shop) if shop.searching => {
                match key {
                    KeyCode::Char(c) => shop.push_search_char(c),
                    KeyCode::Backspace => shop.pop_search_char(),
                    KeyCode::Enter | KeyCode::Esc => shop.finish_search(),
                    _ => {}
                }
                None
            }
            Screen::Shop(shop) => match key {
                KeyCode::Up | KeyCode::Char('k') => {
                    shop.move_cursor(-1, &app.catalog);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    shop.move_cursor(1, &app.catalog);
                    None
                }
                KeyCode::Char('/') => {
                    shop.start_search();
                    None
                }
                KeyCode::Enter => shop.open_store(&app.catalog),
                KeyCode::Esc => Some(shop.back()),
                _ => None,
            },
            Screen::StoreMenu(menu) => match key {
                KeyCode::Up | KeyCode::Char('k') => {
                    menu.move_cursor(-1, &app.catalog);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    menu.move_cursor(1, &app.catalog);
                    None
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    menu.toggle_food(&app.catalog, &mut app.session);
                    None
                }
                KeyCode::Char('c') => menu.checkout(&app.session),
                KeyCode::Esc => Some(menu.back()),
                _ => None,
            },
            Screen::FoodiesRoute(builder) => {
                let session = &mut app.session;
                if builder.food_picker.is_some() {
                    match key {
                        KeyCode::Up | KeyCode::Char('k') => builder.move_picker_cursor(-1, session),
                        KeyCode::Down | KeyCode::Char('j') => builder.move_picker_cursor(1, session),
                        KeyCode::Char(' ') | KeyCode::Enter => builder.toggle_picker_item(session),
                        KeyCode::Esc => builder.close_food_picker(),
                        _ => {}
                    }
                    None
                } else if builder.active_stop_input.is_some() {
                    match key {
                        KeyCode::Char(c) => builder.push_query_char(session, c),
                        KeyCode::Backspace => builder.pop_query_char(session),
                        KeyCode::Up => builder.move_suggestion_cursor(-1, &app.addresses),
                        KeyCode::Down => builder.move_suggestion_cursor(1, &app.addresses),
                        KeyCode::Enter => builder.select_suggestion_at_cursor(session, &app.addresses),
                        KeyCode::Esc => builder.blur_stop_input(),
                        _ => {}
                    }
                    None
                } else {
                    match key {
                        KeyCode::Up | KeyCode::Char('k') => {
                            builder.move_cursor(-1, session);
                            None
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            builder.move_cursor(1, session);
                            None
                        }
                        KeyCode::Char('a') => {
                            builder.add_stop(session);
                            None
                        }
                        KeyCode::Char('x') | KeyCode::Delete => {
                            if let Some(stop_id) = builder.stop_at_cursor(session) {
                                builder.remove_stop(session, &stop_id);
                            }
                            None
                        }
                        KeyCode::Char('e') | KeyCode::Enter => {
                            if let Some(stop_id) = builder.stop_at_cursor(session) {
                                builder.focus_stop_input(stop_id);
                            }
                            None
                        }
                        KeyCode::Char('f') => {
                            let target = match builder.stop_at_cursor(session) {
                                Some(stop_id) => PickerTarget::Stop(stop_id),
                                None => PickerTarget::CurrentLocation,
                            };
                            builder.open_food_picker(session, target);
                            None
                        }
                        KeyCode::Char('g') => builder.go_to_delivery(session),
                        KeyCode::Esc => Some(builder.back()),
                        _ => None,
                    }
                }
            }
            Screen::DeliverySelection(selector) if selector.payment_panel.is_open => {
                let panel = &mut selector.payment_panel;
                match key {
                    KeyCode::Tab | KeyCode::Left | KeyCode::Right => panel.toggle_profile_tab(),
                    KeyCode::Up | KeyCode::Char('k') => panel.move_cursor(-1),
                    KeyCode::Down | KeyCode::Char('j') => panel.move_cursor(1),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if panel.select_at_cursor() {
                            panel.close();
                        }
                    }
                    KeyCode::Esc => panel.close(),
                    _ => {}
                }
                None
            }
            Screen::DeliverySelection(selector) => {
                let session = &app.session;
                match key {
                    KeyCode::Right | KeyCode::Tab => {
                        selector.next_tab();
                        None
                    }
                    KeyCode::Left | KeyCode::BackTab => {
                        selector.previous_tab();
                        None
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        selector.move_cursor(-1, session);
                        None
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        selector.move_cursor(1, session);
                        None
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        selector.select_at_cursor(session);
                        None
                    }
                    KeyCode::Char('c') => selector.confirm(session),
                    KeyCode::Char('p') => {
                        selector.payment_panel.open();
                        None
                    }
                    KeyCode::Esc => Some(selector.back_to_route()),
                    _ => None,
                }
            }
            Screen::ConfirmDelivery(screen) => match key {
                KeyCode::Enter | KeyCode::Char('c') => {
                    screen.confirm(now);
                    None
                }
                KeyCode::Esc => screen.back(),
                _ => None,
            },
            Screen::WaitingForDriver(_) => None,
        };

        app.follow(route);
    }

    /// Mouse clicks only matter for the payment panel: a click outside it
    /// closes it.
    pub fn handle_click(app: &mut App, column: u16, row: u16, area: Rect) {
        if let Screen::DeliverySelection(selector) = &mut app.screen {
            if selector.payment_panel.is_open && !payment_panel_area(area).contains(Position::new(column, row)) {
                selector.payment_panel.close_via_backdrop();
            }
        }
    }

    /// Route the header back control leads to, if the screen has one.
    pub fn back_route(app: &App) -> Option<Route> {
        match &app.screen {
            Screen::Shop(shop) => Some(shop.back()),
            Screen::StoreMenu(menu) => Some(menu.back()),
            Screen::FoodiesRoute(builder) => Some(builder.back()),
            Screen::DeliverySelection(selector) => Some(selector.back_to_route()),
            Screen::ConfirmDelivery(screen) => screen.back(),
            Screen::SendServices(_) | Screen::WaitingForDriver(_) => None,
        }
    }
}
