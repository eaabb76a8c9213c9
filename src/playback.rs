//! Playback state machine
//!
//! [`PlaybackController`] is the single authority over playback state: the
//! current step, whether auto-play is running, and the delay between
//! automatic steps. Every mutation goes through a named operation, so the
//! whole machine is testable without a terminal.
//!
//! Auto-advance is deadline-driven: `Playing` holds the [`Instant`] at which
//! the next step is due, and the event loop calls [`PlaybackController::tick`]
//! with the current time. The controller never reads the clock itself.
//! Deadlines re-arm at `deadline + speed` rather than `now + speed`, so a
//! late tick catches up on every elapsed step without drifting.
//!
//! `set_speed` does not reschedule an in-flight wait; the new speed applies
//! from the next armed deadline.

use std::time::{Duration, Instant};

/// Supported speed presets, in milliseconds between automatic steps
pub const SPEED_PRESETS: [u64; 4] = [50, 100, 250, 500];

/// Default delay between automatic steps
pub const DEFAULT_SPEED: Duration = Duration::from_millis(250);

/// Playback mode. `Playing` carries the next auto-advance deadline, so a
/// pending wait cannot outlive the mode that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// At step 0, not playing; the initial state
    Idle,
    /// Stopped partway through
    Paused,
    /// Auto-advancing; next step is due at `deadline`
    Playing { deadline: Instant },
    /// At the last step; terminal until reset
    Finished,
}

/// The playback state machine over a trace of known length
#[derive(Debug)]
pub struct PlaybackController {
    current_step: usize,
    /// Index of the final step (trace length - 1)
    last_step: usize,
    speed: Duration,
    mode: Mode,
}

impl PlaybackController {
    /// Create a controller for a trace of `steps` snapshots (`steps >= 1`)
    pub fn new(steps: usize) -> Self {
        debug_assert!(steps >= 1, "traces are validated non-empty before playback");
        let last_step = steps.saturating_sub(1);
        PlaybackController {
            current_step: 0,
            last_step,
            speed: DEFAULT_SPEED,
            mode: if last_step == 0 {
                Mode::Finished
            } else {
                Mode::Idle
            },
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.last_step + 1
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, Mode::Playing { .. })
    }

    pub fn is_finished(&self) -> bool {
        self.current_step == self.last_step
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Fraction of the trace played, in `(0, 1]`
    pub fn progress(&self) -> f64 {
        (self.current_step + 1) as f64 / self.total_steps() as f64
    }

    /// Advance one step manually. A manual step while playing pauses first,
    /// then advances once. No-op at the last step.
    pub fn step(&mut self) {
        if self.is_playing() {
            self.mode = Mode::Paused;
        }
        self.advance_once();
    }

    /// Start auto-advancing: the first automatic step is due at
    /// `now + speed`. No-op at the last step, and no-op while already
    /// playing (a second outstanding deadline is never armed).
    pub fn play(&mut self, now: Instant) {
        if self.is_finished() || self.is_playing() {
            return;
        }
        self.mode = Mode::Playing {
            deadline: now + self.speed,
        };
    }

    /// Stop auto-advancing, cancelling the pending deadline. No-op unless
    /// playing; idempotent.
    pub fn pause(&mut self) {
        if self.is_playing() {
            self.mode = Mode::Paused;
        }
    }

    /// Back to step 0, not playing, from any state
    pub fn reset(&mut self) {
        self.current_step = 0;
        self.mode = if self.last_step == 0 {
            Mode::Finished
        } else {
            Mode::Idle
        };
    }

    /// Change the delay between automatic steps. Takes effect when the next
    /// deadline is armed; an in-flight wait is not rescheduled. Zero is
    /// rejected as a no-op.
    pub fn set_speed(&mut self, speed: Duration) {
        if speed.is_zero() {
            return;
        }
        self.speed = speed;
    }

    /// Drive auto-advance: perform every step whose deadline has passed by
    /// `now`, re-arming at `deadline + speed` each time. Stops playing on
    /// reaching the last step. Returns how many steps were taken.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut advanced = 0;
        while let Mode::Playing { deadline } = self.mode {
            if now < deadline {
                break;
            }
            self.advance_once();
            advanced += 1;
            if let Mode::Playing { .. } = self.mode {
                self.mode = Mode::Playing {
                    deadline: deadline + self.speed,
                };
            }
        }
        advanced
    }

    fn advance_once(&mut self) {
        if self.current_step >= self.last_step {
            return;
        }
        self.current_step += 1;
        if self.current_step == self.last_step {
            self.mode = Mode::Finished;
        } else if self.mode == Mode::Idle {
            self.mode = Mode::Paused;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn starts_at_step_zero_not_playing() {
        for steps in [1, 2, 10] {
            let controller = PlaybackController::new(steps);
            assert_eq!(controller.current_step(), 0);
            assert!(!controller.is_playing());
        }
    }

    #[test]
    fn step_clamps_at_the_last_step() {
        let mut controller = PlaybackController::new(4);
        for k in 1..=6 {
            controller.step();
            assert_eq!(controller.current_step(), k.min(3));
        }
        assert!(controller.is_finished());
        assert!(!controller.is_playing());
    }

    #[test]
    fn step_at_the_end_changes_nothing() {
        let mut controller = PlaybackController::new(2);
        controller.step();
        assert!(controller.is_finished());

        controller.step();
        assert_eq!(controller.current_step(), 1);
        assert!(controller.is_finished());
        assert!(!controller.is_playing());
    }

    #[test]
    fn play_runs_to_the_end_and_stops() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(4);
        controller.set_speed(Duration::from_millis(100));
        controller.play(base);

        assert_eq!(controller.tick(at(base, 50)), 0);
        assert_eq!(controller.tick(at(base, 100)), 1);
        assert_eq!(controller.tick(at(base, 200)), 1);
        assert_eq!(controller.tick(at(base, 300)), 1);
        assert_eq!(controller.current_step(), 3);
        assert!(!controller.is_playing());

        // no further advancement once finished
        assert_eq!(controller.tick(at(base, 1000)), 0);
    }

    #[test]
    fn a_late_tick_catches_up_without_overshooting() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(10);
        controller.set_speed(Duration::from_millis(100));
        controller.play(base);

        // 350ms late: exactly the 100/200/300ms deadlines have passed
        assert_eq!(controller.tick(at(base, 350)), 3);
        assert_eq!(controller.current_step(), 3);
        assert!(controller.is_playing());
    }

    #[test]
    fn play_cannot_arm_a_second_deadline() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(10);
        controller.set_speed(Duration::from_millis(100));
        controller.play(base);
        // a second play() mid-wait must not move the deadline
        controller.play(at(base, 90));

        assert_eq!(controller.tick(at(base, 100)), 1);
        assert_eq!(controller.tick(at(base, 189)), 0);
    }

    #[test]
    fn pause_cancels_the_pending_advance() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(10);
        controller.set_speed(Duration::from_millis(100));
        controller.play(base);
        controller.tick(at(base, 100));

        controller.pause();
        assert!(!controller.is_playing());
        assert_eq!(controller.tick(at(base, 10_000)), 0);
        assert_eq!(controller.current_step(), 1);

        // idempotent
        controller.pause();
        assert!(!controller.is_playing());
        assert_eq!(controller.current_step(), 1);
    }

    #[test]
    fn manual_step_while_playing_pauses_then_advances_once() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(10);
        controller.play(base);

        controller.step();
        assert!(!controller.is_playing());
        assert_eq!(controller.current_step(), 1);
        assert_eq!(controller.tick(at(base, 10_000)), 0);
    }

    #[test]
    fn reset_returns_to_idle_from_any_state() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(3);
        controller.step();
        controller.play(base);
        controller.reset();
        assert_eq!(controller.current_step(), 0);
        assert!(!controller.is_playing());
        assert_eq!(controller.tick(at(base, 10_000)), 0);

        controller.step();
        controller.step();
        assert!(controller.is_finished());
        controller.reset();
        assert_eq!(controller.current_step(), 0);
        assert!(!controller.is_finished());
    }

    #[test]
    fn play_from_finished_is_a_no_op() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(2);
        controller.step();
        assert!(controller.is_finished());

        controller.play(base);
        assert!(!controller.is_playing());
        assert_eq!(controller.tick(at(base, 10_000)), 0);
    }

    #[test]
    fn single_step_traces_start_finished() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(1);
        assert!(controller.is_finished());
        controller.play(base);
        assert!(!controller.is_playing());
        controller.step();
        assert_eq!(controller.current_step(), 0);
    }

    #[test]
    fn speed_change_mid_wait_applies_from_the_next_deadline() {
        let base = Instant::now();
        let mut controller = PlaybackController::new(10);
        controller.set_speed(Duration::from_millis(500));
        controller.play(base);

        // deadline is already armed at base+500; changing speed now must
        // not move it
        controller.set_speed(Duration::from_millis(50));
        assert_eq!(controller.tick(at(base, 499)), 0);
        assert_eq!(controller.tick(at(base, 500)), 1);

        // next deadline re-arms with the new speed
        assert_eq!(controller.tick(at(base, 550)), 1);
        assert_eq!(controller.current_step(), 2);
    }

    #[test]
    fn zero_speed_is_rejected() {
        let mut controller = PlaybackController::new(5);
        controller.set_speed(Duration::from_millis(100));
        controller.set_speed(Duration::ZERO);
        assert_eq!(controller.speed(), Duration::from_millis(100));
    }

    #[test]
    fn progress_counts_the_current_step_inclusively() {
        let mut controller = PlaybackController::new(4);
        assert_eq!(controller.progress(), 0.25);
        controller.step();
        assert_eq!(controller.progress(), 0.5);
        controller.step();
        controller.step();
        assert_eq!(controller.progress(), 1.0);
    }
}
