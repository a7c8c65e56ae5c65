use super::*;
use crate::animation::visual::Target;

#[test]
fn selector_switches_below_breakpoint() {
    let sel = ProfileSelector::default();
    assert_eq!(
        sel.select(Viewport::new(767.0, 900.0).unwrap()),
        ProfileKind::Constrained
    );
    assert_eq!(
        sel.select(Viewport::new(768.0, 900.0).unwrap()),
        ProfileKind::Desktop
    );
}

#[test]
fn entrance_starts_from_offset_state() {
    let p = MotionProfile::desktop();
    let tl = p.entrance_timeline();
    assert_eq!(tl.duration(), 1.0);

    let first = tl.sample_initial();
    let image = first.get(Target::Image);
    assert_eq!(image.opacity, 0.0);
    assert_eq!(image.scale, 0.9);
    assert_eq!(image.z, -80.0);
    assert_eq!(image.rotation_x, 6.0);
    let content = first.get(Target::Content);
    assert_eq!(content.opacity, 0.0);
    assert_eq!(content.y, 30.0);

    let done = tl.sample(tl.duration());
    assert_eq!(done.get(Target::Image), crate::animation::visual::VisualState::REST);
    assert_eq!(done.get(Target::Content), crate::animation::visual::VisualState::REST);
}

#[test]
fn scrub_timeline_spans_unit_progress() {
    let p = MotionProfile::desktop();
    let tl = p.scrub_timeline();
    assert_eq!(tl.duration(), 1.0);
    let mid = tl.sample_progress(0.5).get(Target::Image);
    assert!((mid.y - 25.0).abs() < 1e-9);
    assert!((mid.scale - 1.05).abs() < 1e-9);
    let end = tl.sample_progress(1.0).get(Target::Image);
    assert_eq!(end.y, 100.0);
    assert!((end.scale - 1.1).abs() < 1e-12);
}

#[test]
fn constrained_is_flatter() {
    let d = MotionProfile::desktop();
    let c = MotionProfile::constrained();
    assert!(c.entrance_duration < d.entrance_duration);
    assert_eq!(c.depth_offset, 0.0);
    assert_eq!(c.parallax_strength, 0.0);
    assert!(c.min_panel_height > 0.0);
    c.validate().unwrap();
    d.validate().unwrap();
}

#[test]
fn validate_rejects_bad_values() {
    let mut p = MotionProfile::desktop();
    p.entrance_duration = -1.0;
    assert!(p.validate().is_err());

    let mut p = MotionProfile::desktop();
    p.scrub_scale = [0.0, 1.0];
    assert!(p.validate().is_err());

    let mut p = MotionProfile::desktop();
    p.depth_offset = f64::NAN;
    assert!(p.validate().is_err());
}

#[test]
fn triggers_target_the_panel() {
    let p = MotionProfile::desktop();
    let e = p.entrance_trigger(2);
    assert_eq!(e.region, RegionId::Panel(2));
    assert_eq!(e.start.to_string(), "top 80%");
    assert_eq!(e.end.to_string(), "bottom top");
    let s = p.scrub_trigger(2);
    assert_eq!(s.start.to_string(), "top bottom");
    assert_eq!(s.end.to_string(), "bottom top");
}

#[test]
fn profiles_deserialize_as_overlays() {
    let profiles: MotionProfiles = serde_json::from_str("{}").unwrap();
    assert_eq!(profiles, MotionProfiles::default());

    let profiles: MotionProfiles = serde_json::from_str(
        r#"{ "constrained": { "entrance_duration": 0.5, "entrance_start": "top 75%" } }"#,
    )
    .unwrap();
    let c = profiles.get(ProfileKind::Constrained);
    assert_eq!(c.entrance_duration, 0.5);
    assert_eq!(c.entrance_start.to_string(), "top 75%");
    assert_eq!(c.min_panel_height, MotionProfile::constrained().min_panel_height);
    assert_eq!(profiles.get(ProfileKind::Desktop), &MotionProfile::desktop());

    assert!(serde_json::from_str::<MotionProfiles>(r#"{ "tablet": {} }"#).is_err());
    assert!(
        serde_json::from_str::<MotionProfiles>(r#"{ "desktop": { "entrance_start": "middle" } }"#)
            .is_err()
    );
}
