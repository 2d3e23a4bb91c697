//! Piezo buzzer on PWM0.
//!
//! Tones are queued by the session and played one after another by a
//! dedicated task, so requesting a tone never blocks the control loop.

use defmt::{debug, warn};
use embassy_nrf::peripherals;
use embassy_nrf::pwm::{Prescaler, SimplePwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{Duration, Timer};
use scrollknob::scroll::FeedbackSink;

const TONE_QUEUE_DEPTH: usize = 8;

/// PWM counter clock after the Div16 prescaler.
const PWM_CLOCK_HZ: u32 = 1_000_000;

/// The PWM counter is 15 bits wide.
const MAX_COUNTER_TOP: u32 = 0x7FFF;

#[derive(Clone, Copy, defmt::Format)]
pub struct Tone {
    pub freq_hz: u16,
    pub duration_ms: u16,
}

pub type ToneChannel = Channel<CriticalSectionRawMutex, Tone, TONE_QUEUE_DEPTH>;
pub type ToneReceiver = Receiver<'static, CriticalSectionRawMutex, Tone, TONE_QUEUE_DEPTH>;

pub static TONES: ToneChannel = Channel::new();

/// [`FeedbackSink`] that hands tones to [`buzzer_task`].
pub struct Buzzer {
    tx: Sender<'static, CriticalSectionRawMutex, Tone, TONE_QUEUE_DEPTH>,
}

impl Buzzer {
    pub fn new() -> Self {
        Self { tx: TONES.sender() }
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackSink for Buzzer {
    fn tone(&mut self, freq_hz: u16, duration_ms: u16) {
        let tone = Tone {
            freq_hz,
            duration_ms,
        };
        if self.tx.try_send(tone).is_err() {
            warn!("Buzzer: queue full, dropped {}", tone);
        }
    }
}

/// Counter top value producing `freq_hz`, or `None` if out of range.
fn counter_top(freq_hz: u16) -> Option<u16> {
    if freq_hz == 0 {
        return None;
    }
    let top = PWM_CLOCK_HZ / freq_hz as u32;
    if top == 0 || top > MAX_COUNTER_TOP {
        return None;
    }
    Some(top as u16)
}

/// Play queued tones forever.
pub async fn buzzer_task(mut pwm: SimplePwm<'static, peripherals::PWM0>, rx: ToneReceiver) -> ! {
    pwm.set_prescaler(Prescaler::Div16);
    pwm.set_duty(0, 0);

    loop {
        let tone = rx.receive().await;
        let Some(top) = counter_top(tone.freq_hz) else {
            warn!("Buzzer: unsupported frequency {}", tone.freq_hz);
            continue;
        };
        debug!("Buzzer: {}", tone);

        pwm.set_max_duty(top);
        pwm.set_duty(0, top / 2);
        Timer::after(Duration::from_millis(tone.duration_ms as u64)).await;
        pwm.set_duty(0, 0);
    }
}
