use super::*;
use crate::animation::ease::Ease;
use crate::animation::timeline::{Channel, Position};
use crate::animation::visual::{Prop, Target};

fn entrance() -> Timeline {
    let mut tl = Timeline::new();
    tl.from_to(
        Target::Image,
        &[Channel::new(Prop::Opacity, 0.0, 1.0)],
        1.0,
        Ease::Linear,
        Position::At(0.0),
    );
    tl
}

#[test]
fn starts_paused_at_from_state() {
    let pb = Playback::new(entrance());
    assert!(!pb.is_active());
    assert_eq!(pb.sample().get(Target::Image).opacity, 0.0);
}

#[test]
fn play_runs_to_completion() {
    let mut pb = Playback::new(entrance());
    pb.play();
    assert!(pb.advance(0.4));
    assert!((pb.sample().get(Target::Image).opacity - 0.4).abs() < 1e-12);
    assert!(!pb.advance(5.0));
    assert_eq!(pb.progress(), 1.0);
    assert_eq!(pb.sample().get(Target::Image).opacity, 1.0);
}

#[test]
fn reverse_mid_flight_turns_the_same_playhead_around() {
    let mut pb = Playback::new(entrance());
    pb.play();
    pb.advance(0.3);
    pb.reverse();
    assert_eq!(pb.direction(), Direction::Reverse);
    assert!((pb.time() - 0.3).abs() < 1e-12);
    pb.advance(0.1);
    assert!((pb.time() - 0.2).abs() < 1e-12);
    pb.advance(1.0);
    assert!(!pb.is_active());
    assert_eq!(pb.time(), 0.0);
    assert_eq!(pb.sample().get(Target::Image).opacity, 0.0);
}

#[test]
fn reverse_at_start_is_a_no_op() {
    let mut pb = Playback::new(entrance());
    pb.reverse();
    assert!(!pb.is_active());
    assert_eq!(pb.time(), 0.0);
}

#[test]
fn killed_playback_ignores_everything() {
    let mut pb = Playback::new(entrance());
    pb.play();
    pb.advance(0.5);
    pb.kill();
    assert!(!pb.advance(0.2));
    pb.play();
    assert!(!pb.is_active());
    assert!(pb.is_killed());
    assert_eq!(pb.time(), 0.5);
}

#[test]
fn zero_length_timeline_flips_between_endpoints() {
    let mut tl = Timeline::new();
    tl.from_to(
        Target::Content,
        &[Channel::new(Prop::Opacity, 0.0, 1.0)],
        0.0,
        Ease::Linear,
        Position::At(0.0),
    );
    let mut pb = Playback::new(tl);
    assert_eq!(pb.sample().get(Target::Content).opacity, 0.0);
    pb.play();
    assert_eq!(pb.progress(), 1.0);
    assert_eq!(pb.sample().get(Target::Content).opacity, 1.0);
    pb.reverse();
    assert_eq!(pb.sample().get(Target::Content).opacity, 0.0);
}

#[test]
fn complete_and_reset_snap() {
    let mut pb = Playback::new(entrance());
    pb.complete();
    assert_eq!(pb.progress(), 1.0);
    pb.reset();
    assert_eq!(pb.progress(), 0.0);
    pb.restart();
    assert!(pb.is_active());
}
