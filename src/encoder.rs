//! Rotary encoder sampling.
//!
//! The A/B pins are polled at a fixed period and decoded in software;
//! each completed detent becomes an `InputEvent::Encoder`.

use defmt::warn;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::{Duration, Timer};
use scrollknob::config::ENCODER_POLL_MS;
use scrollknob::input::{InputEvent, QuadratureDecoder};

use crate::InputSender;

pub async fn encoder_task(pin_a: AnyPin, pin_b: AnyPin, tx: InputSender) -> ! {
    let a = Input::new(pin_a, Pull::Up);
    let b = Input::new(pin_b, Pull::Up);
    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());

    loop {
        Timer::after(Duration::from_millis(ENCODER_POLL_MS)).await;

        let step = decoder.update(a.is_high(), b.is_high());
        if step == 0 {
            continue;
        }
        if tx.try_send(InputEvent::Encoder(step as i32)).is_err() {
            warn!("Encoder: input queue full, detent dropped");
        }
    }
}
