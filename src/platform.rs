//! Hardware-backed implementations of the session's collaborator traits.

use defmt::warn;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use scrollknob::hid::{split_motion, HidSink};
use scrollknob::scroll::{Clock, ViewObserver, ViewState};

use crate::usb::hid_device::{self, ReportSender};

/// Latest screen contents, consumed by the display task.
pub static VIEW_UPDATES: Signal<CriticalSectionRawMutex, ViewState> = Signal::new();

/// Mouse output over the USB HID endpoint.
pub struct UsbMouse {
    tx: ReportSender,
}

impl UsbMouse {
    pub fn new(tx: ReportSender) -> Self {
        Self { tx }
    }
}

impl HidSink for UsbMouse {
    fn is_connected(&self) -> bool {
        hid_device::link_up()
    }

    fn move_relative(&mut self, dx: i32, dy: i32, wheel: i32) {
        for report in split_motion(dx, dy, wheel) {
            if let Err(e) = hid_device::try_queue(&self.tx, report) {
                warn!("HID: {}", e);
                return;
            }
        }
    }

    fn start(&mut self) {
        hid_device::request_start();
    }
}

/// Milliseconds since boot, truncated to 32 bits.
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

/// Forwards view changes to the display task. Only the newest state is
/// kept; intermediate ones are skipped if the display is slow.
pub struct OledView;

impl ViewObserver for OledView {
    fn refresh(&mut self, view: &ViewState) {
        VIEW_UPDATES.signal(*view);
    }
}
