//! Player facade
//!
//! [`Player`] couples the [`TraceStore`] with the [`PlaybackController`]
//! and exposes the read surface the UI projects. It is the only owner of
//! playback state; the panes read snapshots through it and never mutate
//! anything.
//!
//! Loading a new trace resets playback to step 0, not playing. A failed
//! load leaves both the previous trace and the previous playback state
//! untouched: the store validates before committing, and the controller is
//! only rebuilt after the store accepted the new trace.

use crate::playback::PlaybackController;
use crate::trace::{ExecutionSnapshot, TraceError, TraceStore};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Player {
    store: TraceStore,
    controller: PlaybackController,
    source: Option<String>,
}

impl Player {
    /// Create a player over a validated trace
    pub fn new(
        snapshots: Vec<ExecutionSnapshot>,
        source: Option<String>,
    ) -> Result<Self, TraceError> {
        let mut store = TraceStore::new();
        store.load(snapshots)?;
        let controller = PlaybackController::new(store.len());
        Ok(Player {
            store,
            controller,
            source,
        })
    }

    /// Replace the loaded trace, resetting playback to step 0, not playing.
    /// The playback speed carries over. On failure the previous trace,
    /// source, and playback state are all preserved.
    pub fn load(
        &mut self,
        snapshots: Vec<ExecutionSnapshot>,
        source: Option<String>,
    ) -> Result<(), TraceError> {
        let speed = self.controller.speed();
        self.store.load(snapshots)?;
        self.controller = PlaybackController::new(self.store.len());
        self.controller.set_speed(speed);
        self.source = source;
        Ok(())
    }

    /// The snapshot at the current step.
    ///
    /// The controller keeps its step inside `[0, len)`, so the error branch
    /// is unreachable in normal operation; it is surfaced rather than
    /// panicking so a contract violation shows up as a message, not a
    /// corrupted terminal.
    pub fn current_snapshot(&self) -> Result<&ExecutionSnapshot, TraceError> {
        self.store.snapshot_at(self.controller.current_step())
    }

    /// Source text of the traced program, when the trace carries one
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn current_step(&self) -> usize {
        self.controller.current_step()
    }

    pub fn total_steps(&self) -> usize {
        self.controller.total_steps()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn is_finished(&self) -> bool {
        self.controller.is_finished()
    }

    pub fn progress(&self) -> f64 {
        self.controller.progress()
    }

    pub fn speed(&self) -> Duration {
        self.controller.speed()
    }

    pub fn step(&mut self) {
        self.controller.step();
    }

    pub fn play(&mut self, now: Instant) {
        self.controller.play(now);
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn set_speed(&mut self, speed: Duration) {
        self.controller.set_speed(speed);
    }

    /// Drive auto-advance from the event loop; returns steps taken
    pub fn tick(&mut self, now: Instant) -> usize {
        self.controller.tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::ExecutionSnapshot;

    fn snap(output: &[&str]) -> ExecutionSnapshot {
        ExecutionSnapshot {
            output: output.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn new_rejects_an_empty_trace() {
        let err = Player::new(vec![], None).expect_err("empty trace accepted");
        assert!(matches!(err, TraceError::InvalidTrace { .. }));
    }

    #[test]
    fn failed_load_preserves_trace_and_playback_state() {
        let mut player =
            Player::new(vec![snap(&[]), snap(&["a"]), snap(&["a", "b"])], None)
                .expect("player creation failed");
        player.step();
        player.set_speed(Duration::from_millis(50));

        let err = player.load(vec![], None).expect_err("empty trace accepted");
        assert!(matches!(err, TraceError::InvalidTrace { .. }));

        assert_eq!(player.current_step(), 1);
        assert_eq!(player.total_steps(), 3);
        assert_eq!(player.speed(), Duration::from_millis(50));
        assert_eq!(
            player.current_snapshot().expect("lookup").output,
            vec!["a"]
        );
    }

    #[test]
    fn successful_load_resets_playback_but_keeps_speed() {
        let mut player = Player::new(vec![snap(&[]), snap(&[])], None)
            .expect("player creation failed");
        player.set_speed(Duration::from_millis(100));
        player.step();

        player
            .load(vec![snap(&[]), snap(&[]), snap(&[])], Some("x;".to_string()))
            .expect("load failed");

        assert_eq!(player.current_step(), 0);
        assert!(!player.is_playing());
        assert_eq!(player.total_steps(), 3);
        assert_eq!(player.speed(), Duration::from_millis(100));
        assert_eq!(player.source(), Some("x;"));
    }
}
