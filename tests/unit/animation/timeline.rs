use super::*;
use crate::animation::visual::VisualState;

fn fade_in() -> Timeline {
    let mut tl = Timeline::new();
    tl.from_to(
        Target::Image,
        &[
            Channel::new(Prop::Opacity, 0.0, 1.0),
            Channel::new(Prop::Scale, 0.9, 1.0),
        ],
        1.0,
        Ease::Linear,
        Position::At(0.0),
    );
    tl
}

#[test]
fn holds_from_before_start_and_to_after_end() {
    let tl = fade_in();
    assert_eq!(tl.duration(), 1.0);
    assert_eq!(tl.sample(-5.0).get(Target::Image).opacity, 0.0);
    assert_eq!(tl.sample(0.5).get(Target::Image).opacity, 0.5);
    let end = tl.sample(3.0).get(Target::Image);
    assert_eq!(end.opacity, 1.0);
    assert_eq!(end.scale, 1.0);
}

#[test]
fn untouched_channels_stay_at_rest() {
    let tl = fade_in();
    let s = tl.sample(0.25).get(Target::Image);
    assert_eq!(s.y, VisualState::REST.y);
    assert_eq!(tl.sample(0.25).get(Target::Content), VisualState::REST);
}

#[test]
fn relative_position_overlaps_previous_end() {
    let mut tl = Timeline::with_delay(0.5);
    tl.from_to(
        Target::Subtitle,
        &[Channel::new(Prop::Y, 50.0, 0.0)],
        1.5,
        Ease::OutCubic,
        Position::At(0.0),
    )
    .from_to(
        Target::ScrollHint,
        &[Channel::new(Prop::Opacity, 0.0, 1.0)],
        1.0,
        Ease::OutCubic,
        Position::End(-1.0),
    );
    let hint = tl
        .tweens()
        .iter()
        .find(|t| t.target == Target::ScrollHint)
        .unwrap();
    assert_eq!(hint.start, 1.0);
    assert_eq!(tl.duration(), 2.0);
}

#[test]
fn stagger_offsets_each_target() {
    let mut tl = Timeline::new();
    tl.stagger_from_to(
        &[Target::Title(0), Target::Title(1)],
        &[Channel::new(Prop::Opacity, 0.0, 1.0)],
        1.0,
        Ease::Linear,
        0.2,
        Position::At(0.0),
    );
    let s = tl.sample(0.2);
    assert!((s.get(Target::Title(0)).opacity - 0.2).abs() < 1e-12);
    assert_eq!(s.get(Target::Title(1)).opacity, 0.0);
    assert_eq!(tl.duration(), 1.2);
}

#[test]
fn later_tween_wins_once_started() {
    let mut tl = Timeline::new();
    tl.from_to(
        Target::Image,
        &[Channel::new(Prop::X, 0.0, 10.0)],
        1.0,
        Ease::Linear,
        Position::At(0.0),
    )
    .from_to(
        Target::Image,
        &[Channel::new(Prop::X, 10.0, 30.0)],
        1.0,
        Ease::Linear,
        Position::At(1.0),
    );
    assert_eq!(tl.sample(0.5).get(Target::Image).x, 5.0);
    assert_eq!(tl.sample(1.0).get(Target::Image).x, 10.0);
    assert_eq!(tl.sample(1.5).get(Target::Image).x, 20.0);
    assert_eq!(tl.sample_initial().get(Target::Image).x, 0.0);
}

#[test]
fn scrub_sampling_is_continuous_in_progress() {
    let mut tl = Timeline::new();
    tl.from_to(
        Target::Image,
        &[Channel::new(Prop::Y, -50.0, 100.0)],
        1.0,
        Ease::Linear,
        Position::At(0.0),
    )
    .from_to(
        Target::Image,
        &[Channel::new(Prop::Scale, 1.0, 1.1)],
        1.0,
        Ease::InOutQuad,
        Position::At(0.0),
    );
    let steps = 1000;
    let mut prev = tl.sample_progress(0.0).get(Target::Image);
    for i in 1..=steps {
        let cur = tl.sample_progress(i as f64 / steps as f64).get(Target::Image);
        assert!((cur.y - prev.y).abs() <= 150.0 / steps as f64 + 1e-9);
        assert!((cur.scale - prev.scale).abs() < 0.001);
        prev = cur;
    }
    assert_eq!(prev.y, 100.0);
}

#[test]
fn zero_duration_is_a_step() {
    let mut tl = Timeline::new();
    tl.from_to(
        Target::Content,
        &[Channel::new(Prop::Opacity, 0.0, 1.0)],
        0.0,
        Ease::Linear,
        Position::At(0.5),
    );
    assert_eq!(tl.sample(0.49).get(Target::Content).opacity, 0.0);
    assert_eq!(tl.sample(0.5).get(Target::Content).opacity, 1.0);
}

#[test]
fn validate_rejects_non_finite_values() {
    let mut tl = Timeline::new();
    tl.from_to(
        Target::Image,
        &[Channel::new(Prop::X, f64::NAN, 1.0)],
        1.0,
        Ease::Linear,
        Position::At(0.0),
    );
    assert!(tl.validate().is_err());
    assert!(fade_in().validate().is_ok());
}
