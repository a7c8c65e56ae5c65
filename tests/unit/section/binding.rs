use super::*;
use crate::animation::ease::Ease;
use crate::animation::playback::Direction;
use crate::animation::timeline::{Channel, Position};
use crate::animation::visual::{Prop, Target};
use crate::foundation::core::Viewport;
use crate::layout::document::{DocumentLayout, LayoutMetrics};
use crate::schedule::frame::{DEFAULT_MAX_FRAME_DT, FrameScheduler};
use crate::scroll::trigger::{Edge, RegionId, Threshold};

fn ctx() -> Context {
    let layout = DocumentLayout::compute(
        Viewport::new(1000.0, 1000.0).unwrap(),
        3,
        &LayoutMetrics::default(),
    )
    .unwrap();
    Context::new(layout, FrameScheduler::new(true, DEFAULT_MAX_FRAME_DT))
}

fn fade_in() -> Timeline {
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

// Panel 0 spans 1000..2000, so "top 80%" starts at 200.
fn entrance_spec() -> TriggerSpec {
    TriggerSpec::new(RegionId::Panel(0), Threshold::new(Edge::TOP, Edge::at(0.8)))
}

fn scroll_to(ctx: &mut Context, y: f64, f: impl FnMut(&mut Context, TriggerEvent)) {
    let events = ctx.triggers_mut().update(y);
    events.dispatch(ctx, f);
}

#[test]
fn toggle_actions_parse_and_print() {
    let a: ToggleActions = "play none none reverse".parse().unwrap();
    assert_eq!(a, ToggleActions::PLAY_REVERSE);
    assert_eq!(a.to_string(), "play none none reverse");
    let b: ToggleActions = "restart complete reset none".parse().unwrap();
    assert_eq!(b.on_enter, Action::Restart);
    assert_eq!(b.on_leave, Action::Complete);
    assert_eq!(b.on_enter_back, Action::Reset);
    assert_eq!(b.on_leave_back, Action::None);

    assert!("play none none".parse::<ToggleActions>().is_err());
    assert!("play none none rewind".parse::<ToggleActions>().is_err());
    assert_eq!(
        ToggleActions::PLAY_REVERSE.action_for(TriggerEventKind::Progress(0.3)),
        Action::None
    );
}

#[test]
fn entrance_plays_then_reverses_from_where_it_is() {
    let mut ctx = ctx();
    let mut b = EntranceBinding::bind(
        &mut ctx,
        entrance_spec(),
        fade_in(),
        ToggleActions::PLAY_REVERSE,
    )
    .unwrap();

    scroll_to(&mut ctx, 300.0, |_, ev| {
        b.handle(&ev);
    });
    assert!(b.playback().is_active());
    b.advance(0.5);
    assert!((b.sample().get(Target::Image).opacity - 0.5).abs() < 1e-12);

    scroll_to(&mut ctx, 100.0, |_, ev| {
        b.handle(&ev);
    });
    assert_eq!(b.playback().direction(), Direction::Reverse);
    b.advance(0.2);
    assert!((b.playback().time() - 0.3).abs() < 1e-12);
    b.advance(1.0);
    assert!(!b.playback().is_active());
    assert_eq!(b.sample().get(Target::Image).opacity, 0.0);
}

#[test]
fn entrance_ignores_foreign_events() {
    let mut ctx = ctx();
    let mut b =
        EntranceBinding::bind(&mut ctx, entrance_spec(), fade_in(), ToggleActions::PLAY_ONCE)
            .unwrap();
    let other = ctx
        .register(TriggerSpec::new(
            RegionId::Panel(1),
            Threshold::new(Edge::TOP, Edge::BOTTOM),
        ))
        .unwrap();
    let foreign = TriggerEvent {
        handle: other,
        kind: TriggerEventKind::Enter,
    };
    assert!(!b.handle(&foreign));
    assert!(!b.playback().is_active());
}

#[test]
fn scrub_follows_progress() {
    let mut ctx = ctx();
    let mut tl = Timeline::new();
    tl.from_to(
        Target::Image,
        &[Channel::new(Prop::Y, -50.0, 100.0)],
        1.0,
        Ease::Linear,
        Position::At(0.0),
    );
    // "top bottom" → "bottom top" on panel 0: 0..2000.
    let spec = TriggerSpec::new(RegionId::Panel(0), Threshold::new(Edge::TOP, Edge::BOTTOM));
    let mut b = ScrubBinding::bind(&mut ctx, spec, tl).unwrap();

    scroll_to(&mut ctx, 1000.0, |_, ev| {
        b.handle(&ev);
    });
    assert!((b.progress() - 0.5).abs() < 1e-12);
    assert!((b.sample().get(Target::Image).y - 25.0).abs() < 1e-9);

    scroll_to(&mut ctx, 3000.0, |_, ev| {
        b.handle(&ev);
    });
    assert_eq!(b.progress(), 1.0);
}

#[test]
fn release_unregisters() {
    let mut ctx = ctx();
    let e = EntranceBinding::bind(
        &mut ctx,
        entrance_spec(),
        fade_in(),
        ToggleActions::PLAY_REVERSE,
    )
    .unwrap();
    let s = ScrubBinding::bind(&mut ctx, entrance_spec(), fade_in()).unwrap();
    assert_eq!(ctx.triggers().len(), 2);
    e.release(&mut ctx);
    s.release(&mut ctx);
    assert!(ctx.triggers().is_empty());
}

#[test]
fn bind_rejects_missing_region() {
    let mut ctx = ctx();
    let spec = TriggerSpec::new(RegionId::Panel(9), Threshold::new(Edge::TOP, Edge::BOTTOM));
    assert!(ScrubBinding::bind(&mut ctx, spec, fade_in()).is_err());
    assert!(ctx.triggers().is_empty());
}
