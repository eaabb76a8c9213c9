// Scenario tests for trace playback through the public API

use std::time::{Duration, Instant};

use tracetty::player::Player;
use tracetty::trace::ExecutionSnapshot;

fn snap(output: &[&str]) -> ExecutionSnapshot {
    ExecutionSnapshot {
        output: output.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn player_of(len: usize) -> Player {
    Player::new(vec![ExecutionSnapshot::default(); len], None).expect("player creation failed")
}

#[test]
fn a_loaded_trace_starts_at_step_zero_not_playing() {
    for len in [1, 2, 7] {
        let player = player_of(len);
        assert_eq!(player.current_step(), 0);
        assert!(!player.is_playing());
        assert_eq!(player.total_steps(), len);
    }
}

#[test]
fn stepping_k_times_lands_on_min_k_last() {
    let mut player = player_of(5);
    for k in 1..=8 {
        player.step();
        assert_eq!(player.current_step(), k.min(4));
    }
}

#[test]
fn stepping_at_the_last_step_changes_nothing() {
    let mut player = player_of(3);
    player.step();
    player.step();
    assert!(player.is_finished());

    player.step();
    assert_eq!(player.current_step(), 2);
    assert!(!player.is_playing());
    assert!(player.is_finished());
}

#[test]
fn playing_for_speed_times_n_minus_one_finishes_the_trace() {
    let base = Instant::now();
    let mut player = player_of(5);
    player.set_speed(Duration::from_millis(100));

    player.play(base);
    let advanced = player.tick(base + Duration::from_millis(400));
    assert_eq!(advanced, 4);
    assert_eq!(player.current_step(), 4);
    assert!(!player.is_playing());
}

#[test]
fn pausing_halts_automatic_advancement_until_play() {
    let base = Instant::now();
    let mut player = player_of(10);
    player.set_speed(Duration::from_millis(100));

    player.play(base);
    player.tick(base + Duration::from_millis(100));
    assert_eq!(player.current_step(), 1);

    player.pause();
    assert_eq!(player.tick(base + Duration::from_secs(60)), 0);
    assert_eq!(player.current_step(), 1);

    // resumes from where it stopped
    let later = base + Duration::from_secs(60);
    player.play(later);
    player.tick(later + Duration::from_millis(100));
    assert_eq!(player.current_step(), 2);
}

#[test]
fn pause_is_idempotent() {
    let base = Instant::now();
    let mut player = player_of(4);
    player.play(base);

    player.pause();
    let step_after_one = player.current_step();
    let playing_after_one = player.is_playing();

    player.pause();
    assert_eq!(player.current_step(), step_after_one);
    assert_eq!(player.is_playing(), playing_after_one);
}

#[test]
fn reset_returns_to_the_start_from_any_state() {
    let base = Instant::now();

    // from mid-trace while playing
    let mut player = player_of(6);
    player.play(base);
    player.tick(base + player.speed());
    player.reset();
    assert_eq!(player.current_step(), 0);
    assert!(!player.is_playing());
    assert_eq!(player.tick(base + Duration::from_secs(60)), 0);

    // from the end
    let mut player = player_of(3);
    player.step();
    player.step();
    player.reset();
    assert_eq!(player.current_step(), 0);
    assert!(!player.is_playing());
}

#[test]
fn played_trace_accumulates_console_output() {
    // 4 snapshots with outputs [], [a], [a], [a, b]; play at speed 100 and
    // wait 350ms: all three advances are due, output shows both lines
    let base = Instant::now();
    let mut player = Player::new(
        vec![snap(&[]), snap(&["a"]), snap(&["a"]), snap(&["a", "b"])],
        None,
    )
    .expect("player creation failed");
    player.set_speed(Duration::from_millis(100));

    player.play(base);
    player.tick(base + Duration::from_millis(350));

    assert_eq!(player.current_step(), 3);
    assert!(!player.is_playing());
    assert_eq!(
        player.current_snapshot().expect("lookup").output,
        vec!["a", "b"]
    );
}

#[test]
fn manual_step_during_playback_pauses_first() {
    let base = Instant::now();
    let mut player = player_of(10);
    player.play(base);

    player.step();
    assert!(!player.is_playing());
    assert_eq!(player.current_step(), 1);
    assert_eq!(player.tick(base + Duration::from_secs(60)), 0);
}

#[test]
fn playing_twice_does_not_double_the_advance_rate() {
    let base = Instant::now();
    let mut player = player_of(10);
    player.set_speed(Duration::from_millis(100));

    player.play(base);
    player.play(base + Duration::from_millis(50));

    // only the first deadline chain exists
    assert_eq!(player.tick(base + Duration::from_millis(100)), 1);
    assert_eq!(player.tick(base + Duration::from_millis(149)), 0);
}
