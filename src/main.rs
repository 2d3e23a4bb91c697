//! scrollknob firmware entry point (nRF52840).
//!
//! Task layout:
//!   - 4 × button task  → INPUT_EVENTS
//!   - encoder task     → INPUT_EVENTS
//!   - control loop (main) drains INPUT_EVENTS and ticks the session
//!   - buzzer task      ← TONES
//!   - display task     ← VIEW_UPDATES
//!   - USB device + HID mouse writer ← mouse report channel

#![no_std]
#![no_main]

mod encoder;
mod feedback;
mod platform;
mod ui;
mod usb;

use defmt::{debug, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{AnyPin, Pin};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_time::{Duration, Ticker};
use scrollknob::config::{CONTROL_TICK_MS, INPUT_QUEUE_DEPTH};
use scrollknob::input::{ButtonEvent, InputEvent};
use scrollknob::scroll::{FocusArbiter, SharedFocus};
use scrollknob::Session;
use {defmt_rtt as _, panic_probe as _};

use crate::feedback::{Buzzer, ToneReceiver, TONES};
use crate::platform::{EmbassyClock, OledView, UsbMouse, VIEW_UPDATES};
use crate::ui::display;
use crate::usb::hid_device::{self, ReportReceiver, UsbDriver};

bind_interrupts!(struct TwimIrqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

pub type InputSender = Sender<'static, CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>;

static INPUT_EVENTS: Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH> =
    Channel::new();

/// Held by the session while in scroll lock.
static ENCODER_FOCUS: SharedFocus = SharedFocus::new();

// ═══════════════════════════════════════════════════════════════════════
// Tasks
// ═══════════════════════════════════════════════════════════════════════

#[embassy_executor::task(pool_size = 4)]
async fn button_task(pin: AnyPin, event: ButtonEvent, tx: InputSender) -> ! {
    ui::buttons::button_task(pin, event, tx).await
}

#[embassy_executor::task]
async fn encoder_task(pin_a: AnyPin, pin_b: AnyPin, tx: InputSender) -> ! {
    encoder::encoder_task(pin_a, pin_b, tx).await
}

#[embassy_executor::task]
async fn buzzer_task(pwm: SimplePwm<'static, peripherals::PWM0>, rx: ToneReceiver) -> ! {
    feedback::buzzer_task(pwm, rx).await
}

#[embassy_executor::task]
async fn display_task(i2c: Twim<'static, peripherals::TWISPI0>) -> ! {
    let mut oled = display::init(i2c);
    loop {
        let view = VIEW_UPDATES.wait().await;
        if let Err(e) = display::draw_status(&mut oled, &view) {
            warn!("{}", e);
        }
    }
}

#[embassy_executor::task]
async fn usb_device_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn mouse_writer_task(
    writer: embassy_usb::class::hid::HidWriter<'static, UsbDriver, 8>,
    rx: ReportReceiver,
) -> ! {
    hid_device::mouse_writer_task(writer, rx).await
}

// ═══════════════════════════════════════════════════════════════════════
// Entry point
// ═══════════════════════════════════════════════════════════════════════

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("scrollknob starting");

    // USB HID mouse. Enumeration waits for the first knob press.
    let usb = hid_device::init(p.USBD);
    unwrap!(spawner.spawn(usb_device_task(usb.device)));
    unwrap!(spawner.spawn(mouse_writer_task(
        usb.mouse_writer,
        hid_device::report_receiver()
    )));

    // Inputs.
    let tx = INPUT_EVENTS.sender();
    let buttons = [
        (p.P0_11.degrade(), ButtonEvent::Toggle),
        (p.P0_12.degrade(), ButtonEvent::Speed),
        (p.P0_24.degrade(), ButtonEvent::Invert),
        (p.P0_25.degrade(), ButtonEvent::Screen),
    ];
    for (pin, event) in buttons {
        unwrap!(spawner.spawn(button_task(pin, event, tx)));
    }
    unwrap!(spawner.spawn(encoder_task(p.P0_03.degrade(), p.P0_04.degrade(), tx)));

    // Outputs.
    let pwm = SimplePwm::new_1ch(p.PWM0, p.P0_28);
    unwrap!(spawner.spawn(buzzer_task(pwm, TONES.receiver())));

    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, TwimIrqs, p.P0_26, p.P0_27, twim_config);
    unwrap!(spawner.spawn(display_task(i2c)));

    // Session.
    let mut session = Session::new(
        UsbMouse::new(hid_device::report_sender()),
        Buzzer::new(),
        &ENCODER_FOCUS,
        EmbassyClock,
        OledView,
    );
    session.enter();

    let rx = INPUT_EVENTS.receiver();
    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_TICK_MS));

    info!("Control loop running");

    loop {
        match select(ticker.next(), rx.receive()).await {
            Either::First(()) => session.tick(),
            Either::Second(InputEvent::Button(event)) => session.handle_button(event),
            Either::Second(InputEvent::Encoder(delta)) => {
                if !ENCODER_FOCUS.is_held() {
                    debug!("Nav: encoder {}", delta);
                }
                session.on_encoder_tick(delta);
            }
        }
    }
}
