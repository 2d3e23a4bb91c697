//! GPIO button input with async debouncing.
//!
//! Four physical buttons (active-low with internal pull-up):
//!   - KNOB   - push switch of the encoder, toggles scroll lock
//!   - SPEED  - cycles the scroll multiplier
//!   - INVERT - flips scroll direction
//!   - SCREEN - foregrounds / backgrounds the scroll screen
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, and sends a `ButtonEvent` to the control loop.

use defmt::info;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::{Duration, Timer};
use scrollknob::config::BUTTON_DEBOUNCE_MS;
use scrollknob::input::{ButtonEvent, InputEvent};

use crate::InputSender;

/// Run a single button polling loop.
///
/// Waits for the pin to go low (pressed), debounces, sends the event,
/// then waits for release before repeating.
pub async fn button_task(pin: AnyPin, event: ButtonEvent, tx: InputSender) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            info!("Button: {}", event);
            tx.send(InputEvent::Button(event)).await;

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}
