//! What the status screen should show. Pure data; drawing happens in
//! whatever implements [`ViewObserver`](super::ports::ViewObserver).

use super::settings::{ScrollSettings, ScrollSpeed};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeView {
    Navigation,
    /// Scroll lock engaged and the host is reachable.
    Scrolling,
    /// Scroll lock engaged but the host link is down.
    Connecting,
}

impl ModeView {
    pub const fn title(self) -> &'static str {
        match self {
            ModeView::Navigation => "NAV MODE",
            ModeView::Scrolling => "SCROLL",
            ModeView::Connecting => "Connecting...",
        }
    }

    pub const fn hint(self) -> &'static str {
        match self {
            ModeView::Navigation => "Tap Knob to Lock",
            ModeView::Scrolling => "Locked: Scroll Active",
            ModeView::Connecting => "Please Wait...",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ViewState {
    pub mode: ModeView,
    pub connected: bool,
    pub settings: ScrollSettings,
}

impl ViewState {
    pub const fn link_label(&self) -> &'static str {
        if self.connected {
            "Connected"
        } else {
            "Waiting for Host..."
        }
    }

    pub const fn speed(&self) -> ScrollSpeed {
        self.settings.speed
    }
}
