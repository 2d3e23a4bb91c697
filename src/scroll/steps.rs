//! Timed step queue.
//!
//! Multi-write HID sequences need pacing between writes. Instead of
//! sleeping, each write is queued with a deadline and the periodic tick
//! pops whatever is due.

use heapless::Deque;

use crate::error::Error;

use super::link::is_after;

/// One deferred side effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Pointer { dx: i32, dy: i32, wheel: i32 },
    /// Move back towards where the kick started. The amount is taken from
    /// the offset actually delivered when the step runs; the final step
    /// returns whatever is left.
    Recenter { final_step: bool },
    Tone { freq_hz: u16, duration_ms: u16 },
}

impl Step {
    pub const fn pointer(dx: i32, dy: i32) -> Self {
        Step::Pointer { dx, dy, wheel: 0 }
    }

    pub const fn wheel(wheel: i32) -> Self {
        Step::Pointer { dx: 0, dy: 0, wheel }
    }

    pub const fn recenter(final_step: bool) -> Self {
        Step::Recenter { final_step }
    }

    pub const fn tone((freq_hz, duration_ms): (u16, u16)) -> Self {
        Step::Tone {
            freq_hz,
            duration_ms,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct TimedStep {
    due: u32,
    step: Step,
}

/// FIFO of steps with non-decreasing deadlines.
pub struct StepQueue<const N: usize> {
    steps: Deque<TimedStep, N>,
    tail_due: u32,
}

impl<const N: usize> Default for StepQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StepQueue<N> {
    pub const fn new() -> Self {
        Self {
            steps: Deque::new(),
            tail_due: 0,
        }
    }

    /// Queue `step` to run `delay_ms` after the previously queued step,
    /// or after `now` if that is later.
    pub fn push(&mut self, now: u32, delay_ms: u32, step: Step) -> Result<(), Error> {
        let base = if !self.steps.is_empty() && is_after(self.tail_due, now) {
            self.tail_due
        } else {
            now
        };
        let due = base.wrapping_add(delay_ms);
        self.steps
            .push_back(TimedStep { due, step })
            .map_err(|_| Error::StepQueueFull)?;
        self.tail_due = due;
        Ok(())
    }

    /// Pop the head if its deadline has been reached.
    pub fn pop_due(&mut self, now: u32) -> Option<Step> {
        let head = self.steps.front()?;
        if is_after(head.due, now) {
            return None;
        }
        self.steps.pop_front().map(|t| t.step)
    }

    /// Pop the head regardless of its deadline.
    pub fn pop_front(&mut self) -> Option<Step> {
        self.steps.pop_front().map(|t| t.step)
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_chain_from_previous_step() {
        let mut q: StepQueue<4> = StepQueue::new();
        q.push(100, 0, Step::pointer(1, 1)).unwrap();
        q.push(100, 50, Step::pointer(2, 2)).unwrap();
        q.push(120, 50, Step::wheel(-2)).unwrap();

        assert_eq!(q.pop_due(100), Some(Step::pointer(1, 1)));
        assert_eq!(q.pop_due(149), None);
        assert_eq!(q.pop_due(150), Some(Step::pointer(2, 2)));
        // Third step chains from 150, not from the push time of 120.
        assert_eq!(q.pop_due(170), None);
        assert_eq!(q.pop_due(200), Some(Step::wheel(-2)));
        assert!(q.is_empty());
    }

    #[test]
    fn empty_queue_bases_on_now() {
        let mut q: StepQueue<4> = StepQueue::new();
        q.push(0, 50, Step::wheel(1)).unwrap();
        assert_eq!(q.pop_due(50), Some(Step::wheel(1)));

        // Tail deadline is stale; a fresh push starts from the new `now`.
        q.push(1_000, 0, Step::wheel(2)).unwrap();
        assert_eq!(q.pop_due(1_000), Some(Step::wheel(2)));
    }

    #[test]
    fn full_queue_reports_error() {
        let mut q: StepQueue<2> = StepQueue::new();
        q.push(0, 0, Step::wheel(1)).unwrap();
        q.push(0, 0, Step::wheel(2)).unwrap();
        assert_eq!(q.push(0, 0, Step::wheel(3)), Err(Error::StepQueueFull));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn pop_front_ignores_deadline() {
        let mut q: StepQueue<2> = StepQueue::new();
        q.push(0, 500, Step::tone((200, 500))).unwrap();
        assert_eq!(q.pop_due(10), None);
        assert_eq!(
            q.pop_front(),
            Some(Step::Tone {
                freq_hz: 200,
                duration_ms: 500
            })
        );
    }
}
