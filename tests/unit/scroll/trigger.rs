use super::*;

struct FixedLayout {
    viewport: Viewport,
    panel: Rect,
}

impl RegionLayout for FixedLayout {
    fn region_rect(&self, region: RegionId) -> Option<Rect> {
        match region {
            RegionId::Panel(0) => Some(self.panel),
            _ => None,
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

fn layout() -> FixedLayout {
    FixedLayout {
        viewport: Viewport::new(1000.0, 1000.0).unwrap(),
        panel: Rect::new(0.0, 2000.0, 1000.0, 3000.0),
    }
}

fn scrub_spec() -> TriggerSpec {
    TriggerSpec::new(RegionId::Panel(0), "top bottom".parse().unwrap())
}

fn toggles(events: &TriggerEvents) -> Vec<TriggerEventKind> {
    events
        .iter()
        .map(|e| e.kind)
        .filter(|k| !matches!(k, TriggerEventKind::Progress(_)))
        .collect()
}

#[test]
fn threshold_parsing_and_positions() {
    let t: Threshold = "top 80%".parse().unwrap();
    assert_eq!(t.region, Edge::TOP);
    assert_eq!(t.viewport, Edge::at(0.8));
    let rect = Rect::new(0.0, 2000.0, 100.0, 3000.0);
    assert_eq!(t.position(rect, 1000.0), 1200.0);

    let t: Threshold = "bottom top".parse().unwrap();
    assert_eq!(t.position(rect, 1000.0), 3000.0);

    let t: Threshold = "top+=100 center".parse().unwrap();
    assert_eq!(t.position(rect, 1000.0), 1600.0);

    let t: Threshold = "50px 25%".parse().unwrap();
    assert_eq!(t.position(rect, 1000.0), 1800.0);

    assert!("top".parse::<Threshold>().is_err());
    assert!("top sideways".parse::<Threshold>().is_err());
    assert!("top 80% extra".parse::<Threshold>().is_err());
}

#[test]
fn threshold_display_round_trips() {
    for s in ["top 80%", "bottom top", "center center", "top-=40 bottom"] {
        let t: Threshold = s.parse().unwrap();
        let again: Threshold = t.to_string().parse().unwrap();
        assert_eq!(t, again, "{s}");
    }
    let json = serde_json::to_string(&"top 60%".parse::<Threshold>().unwrap()).unwrap();
    assert_eq!(json, "\"top 60%\"");
    let back: Threshold = serde_json::from_str(&json).unwrap();
    assert_eq!(back.viewport, Edge::at(0.6));
}

#[test]
fn progress_is_clamped_ratio() {
    let l = layout();
    let mut reg = TriggerRegistry::new();
    let h = reg.register(scrub_spec(), &l).unwrap();
    assert_eq!(reg.bounds(h), Some((1000.0, 3000.0)));

    reg.update(0.0);
    assert_eq!(reg.progress(h), Some(0.0));
    reg.update(2000.0);
    assert_eq!(reg.progress(h), Some(0.5));
    reg.update(9000.0);
    assert_eq!(reg.progress(h), Some(1.0));
}

#[test]
fn crossings_fire_once_regardless_of_tick_count() {
    let l = layout();
    for ticks in [1usize, 7, 1000] {
        let mut reg = TriggerRegistry::new();
        reg.register(scrub_spec(), &l).unwrap();
        reg.update(0.0);

        let mut seen = Vec::new();
        for i in 1..=ticks {
            let y = 4000.0 * i as f64 / ticks as f64;
            seen.extend(toggles(&reg.update(y)));
        }
        for i in (0..ticks).rev() {
            let y = 4000.0 * i as f64 / ticks as f64;
            seen.extend(toggles(&reg.update(y)));
        }
        assert_eq!(
            seen,
            vec![
                TriggerEventKind::Enter,
                TriggerEventKind::Leave,
                TriggerEventKind::EnterBack,
                TriggerEventKind::LeaveBack,
            ],
            "ticks = {ticks}"
        );
    }
}

#[test]
fn progress_fires_every_tick_while_active_only() {
    let l = layout();
    let mut reg = TriggerRegistry::new();
    reg.register(scrub_spec(), &l).unwrap();
    assert!(reg.update(0.0).is_empty());
    assert!(reg.update(500.0).is_empty());
    assert_eq!(reg.update(1500.0).len(), 2);
    assert_eq!(reg.update(1600.0).len(), 1);
    assert_eq!(reg.update(1600.0).len(), 1);

    let ev = reg.update(5000.0);
    let kinds: Vec<_> = ev.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![TriggerEventKind::Leave, TriggerEventKind::Progress(1.0)]
    );
    assert!(reg.update(6000.0).is_empty());
}

#[test]
fn progress_never_jumps_more_than_scroll_delta() {
    let l = layout();
    let mut reg = TriggerRegistry::new();
    let h = reg.register(scrub_spec(), &l).unwrap();
    let step = 13.0;
    let mut y = 0.0;
    let mut prev = 0.0;
    while y < 4000.0 {
        y += step;
        reg.update(y);
        let p = reg.progress(h).unwrap();
        assert!((0.0..=1.0).contains(&p));
        assert!((p - prev).abs() <= step / 2000.0 + 1e-12);
        prev = p;
    }
}

#[test]
fn jump_over_whole_range_reports_both_crossings() {
    let l = layout();
    let mut reg = TriggerRegistry::new();
    reg.register(scrub_spec(), &l).unwrap();
    reg.update(0.0);
    let fwd = reg.update(10_000.0);
    assert_eq!(
        toggles(&fwd),
        vec![TriggerEventKind::Enter, TriggerEventKind::Leave]
    );
    let back = reg.update(0.0);
    assert_eq!(
        toggles(&back),
        vec![TriggerEventKind::EnterBack, TriggerEventKind::LeaveBack]
    );
}

#[test]
fn unknown_region_and_inverted_range_are_rejected() {
    let l = layout();
    let mut reg = TriggerRegistry::new();
    let missing = TriggerSpec::new(RegionId::Footer, "top 80%".parse().unwrap());
    assert!(matches!(
        reg.register(missing, &l),
        Err(FolioError::Layout(_))
    ));
    let inverted = TriggerSpec::new(RegionId::Panel(0), "bottom top".parse().unwrap())
        .until("top bottom".parse().unwrap());
    assert!(matches!(
        reg.register(inverted, &l),
        Err(FolioError::Validation(_))
    ));
    assert!(reg.is_empty());
}

#[test]
fn unregister_inside_dispatch_suppresses_later_events() {
    let l = layout();
    let mut reg = TriggerRegistry::new();
    let a = reg.register(scrub_spec(), &l).unwrap();
    let b = reg.register(scrub_spec(), &l).unwrap();
    reg.update(0.0);
    let events = reg.update(2000.0);
    assert_eq!(events.len(), 4);

    let mut delivered = Vec::new();
    let n = events.dispatch(&mut reg, |reg, ev| {
        delivered.push(ev.handle);
        reg.unregister(a);
        reg.unregister(b);
    });
    assert_eq!(n, 1);
    assert_eq!(delivered, vec![a]);
    assert!(reg.is_empty());
    assert!(!reg.unregister(a));
}

#[test]
fn refresh_recomputes_bounds_and_keeps_phase() {
    let mut l = layout();
    let mut reg = TriggerRegistry::new();
    let h = reg.register(scrub_spec(), &l).unwrap();
    reg.update(2000.0);
    assert_eq!(reg.phase(h), Some(Phase::Active));

    l.panel = Rect::new(0.0, 1500.0, 500.0, 2500.0);
    l.viewport = Viewport::new(500.0, 800.0).unwrap();
    reg.refresh(&l);
    assert_eq!(reg.bounds(h), Some((700.0, 2500.0)));
    assert_eq!(reg.phase(h), Some(Phase::Active));

    let ev = reg.update(2000.0);
    assert!(toggles(&ev).is_empty());
}
