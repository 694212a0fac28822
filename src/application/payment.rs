use super::cursor::step;
use crate::domain::{PaymentMethod, ProfileTab};
use tracing::debug;

/// Overlay for choosing how to pay. Purely cosmetic: nothing here changes
/// the totals handed to confirmation.
#[derive(Debug, Clone, Default)]
pub struct PaymentMethodPanel {
    pub is_open: bool,
    pub profile_tab: ProfileTab,
    pub selected_method: PaymentMethod,
    /// Row highlighted in the method list.
    pub cursor: usize,
}

impl PaymentMethodPanel {
    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Clicking outside the panel dismisses it like the close control.
    pub fn close_via_backdrop(&mut self) {
        self.close();
    }

    pub fn set_profile_tab(&mut self, tab: ProfileTab) {
        self.profile_tab = tab;
    }

    pub fn toggle_profile_tab(&mut self) {
        self.profile_tab = match self.profile_tab {
            ProfileTab::Personal => ProfileTab::Work,
            ProfileTab::Work => ProfileTab::Personal,
        };
    }

    /// Selects `method` if it has a handler; returns whether it was taken.
    pub fn select_method(&mut self, method: PaymentMethod) -> bool {
        if !method.is_selectable() {
            debug!(?method, "payment method not available");
            return false;
        }
        self.selected_method = method;
        true
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step(self.cursor, delta, PaymentMethod::ALL.len());
    }

    pub fn select_at_cursor(&mut self) -> bool {
        self.select_method(PaymentMethod::ALL[self.cursor])
    }
}
