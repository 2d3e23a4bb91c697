//! USB HID mouse - the host-facing output of the scroll session.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes a single boot-protocol mouse endpoint.
//! Enumeration is held back until the session first asks for the
//! transport.

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use scrollknob::config;
use scrollknob::hid::mouse::MOUSE_REPORT_DESCRIPTOR;
use scrollknob::hid::MouseReport;
use scrollknob::Error;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Mouse reports waiting for the USB writer.
pub type ReportChannel =
    Channel<CriticalSectionRawMutex, MouseReport, { config::HID_REPORT_QUEUE_DEPTH }>;
pub type ReportSender =
    Sender<'static, CriticalSectionRawMutex, MouseReport, { config::HID_REPORT_QUEUE_DEPTH }>;
pub type ReportReceiver =
    Receiver<'static, CriticalSectionRawMutex, MouseReport, { config::HID_REPORT_QUEUE_DEPTH }>;

static MOUSE_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_LINK_HANDLER: StaticCell<UsbLinkHandler> = StaticCell::new();

static MOUSE_REPORTS: ReportChannel = Channel::new();
static USB_START: Signal<CriticalSectionRawMutex, ()> = Signal::new();
static HOST_CONFIGURED: AtomicBool = AtomicBool::new(false);
static BUS_SUSPENDED: AtomicBool = AtomicBool::new(false);

/// Tracks whether the host can currently receive reports.
struct UsbLinkHandler;

impl embassy_usb::Handler for UsbLinkHandler {
    fn configured(&mut self, configured: bool) {
        info!("USB: configured={}", configured);
        HOST_CONFIGURED.store(configured, Ordering::Release);
    }

    fn suspended(&mut self, suspended: bool) {
        info!("USB: suspended={}", suspended);
        BUS_SUSPENDED.store(suspended, Ordering::Release);
    }

    fn reset(&mut self) {
        HOST_CONFIGURED.store(false, Ordering::Release);
    }
}

/// Host has configured the device and the bus is awake.
pub fn link_up() -> bool {
    HOST_CONFIGURED.load(Ordering::Acquire) && !BUS_SUSPENDED.load(Ordering::Acquire)
}

/// Let the device task begin enumeration. Safe to call repeatedly.
pub fn request_start() {
    USB_START.signal(());
}

pub fn report_sender() -> ReportSender {
    MOUSE_REPORTS.sender()
}

pub fn report_receiver() -> ReportReceiver {
    MOUSE_REPORTS.receiver()
}

/// Queue a report without waiting.
pub fn try_queue(tx: &ReportSender, report: MouseReport) -> Result<(), Error> {
    tx.try_send(report).map_err(|_| Error::ReportQueueFull)
}

/// Build result containing the USB device runner and the mouse writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub mouse_writer: HidWriter<'static, UsbDriver, 8>,
}

/// Initialise the USB stack and create the HID mouse device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;
    usb_config.supports_remote_wakeup = true;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let link_handler = USB_LINK_HANDLER.init(UsbLinkHandler);
    builder.handler(link_handler);

    let mouse_state = MOUSE_STATE.init(State::new());
    let mouse_config = HidConfig {
        report_descriptor: MOUSE_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let mouse_writer = HidWriter::new(&mut builder, mouse_state, mouse_config);

    let device = builder.build();

    info!("USB HID mouse initialised");

    UsbHidDevice {
        device,
        mouse_writer,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// Waits for [`request_start`] before enumerating, then services the bus
/// forever.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    USB_START.wait().await;
    info!("USB device task started");
    device.run().await
}

/// Report forwarding task - drains the report channel into the mouse
/// endpoint.
pub async fn mouse_writer_task(
    mut mouse: HidWriter<'static, UsbDriver, 8>,
    report_rx: ReportReceiver,
) -> ! {
    info!("HID writer task started - waiting for reports");

    let mut buf = [0u8; 8];

    loop {
        let report = report_rx.receive().await;
        let n = report.serialize(&mut buf);
        if mouse.write(&buf[..n]).await.is_err() {
            warn!("{}", Error::Usb);
        }
    }
}
