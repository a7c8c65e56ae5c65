use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Who {
    Scroll,
    Panel(u8),
    Pointer,
}

#[test]
fn due_list_is_ordered_by_phase_then_subscription() {
    let mut s = FrameScheduler::new(true, 0.1);
    s.subscribe(FramePhase::Pointer, Who::Pointer);
    s.subscribe(FramePhase::Timelines, Who::Panel(1));
    s.subscribe(FramePhase::Scroll, Who::Scroll);
    s.subscribe(FramePhase::Timelines, Who::Panel(0));

    let tick = s.begin_frame(0.0).unwrap();
    let owners: Vec<Who> = tick.due.iter().map(|d| d.owner).collect();
    assert_eq!(
        owners,
        vec![Who::Scroll, Who::Panel(1), Who::Panel(0), Who::Pointer]
    );
}

#[test]
fn dt_starts_at_zero_and_is_clamped() {
    let mut s: FrameScheduler<Who> = FrameScheduler::new(true, 0.1);
    assert_eq!(s.begin_frame(10.0).unwrap().time.dt, 0.0);
    let dt = s.begin_frame(10.016).unwrap().time.dt;
    assert!((dt - 0.016).abs() < 1e-9);
    assert_eq!(s.begin_frame(99.0).unwrap().time.dt, 0.1);
    assert_eq!(s.begin_frame(50.0).unwrap().time.dt, 0.0);
}

#[test]
fn unsubscribe_releases_handles() {
    let mut s = FrameScheduler::new(true, 0.1);
    let a = s.subscribe(FramePhase::Pointer, Who::Pointer);
    let b = s.subscribe(FramePhase::Scroll, Who::Scroll);
    assert_eq!(s.len(), 2);
    assert!(s.unsubscribe(a));
    assert!(!s.unsubscribe(a));
    assert!(!s.contains(a));
    assert!(s.contains(b));
    s.clear();
    assert!(s.is_empty());
    assert!(s.begin_frame(0.0).unwrap().due.is_empty());
}

#[test]
fn disabled_scheduler_never_ticks() {
    let mut s = FrameScheduler::new(false, 0.1);
    s.subscribe(FramePhase::Scroll, Who::Scroll);
    assert!(!s.is_enabled());
    assert!(s.begin_frame(0.0).is_none());
    assert!(s.begin_frame(1.0).is_none());
}
