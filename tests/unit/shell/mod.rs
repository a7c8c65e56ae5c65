use super::*;
use crate::host::HeadlessHost;

fn desktop() -> Viewport {
    Viewport::new(1280.0, 800.0).unwrap()
}

fn shell() -> Shell<HeadlessHost> {
    Shell::mount(
        HeadlessHost::new(desktop()),
        Catalog::builtin(),
        ShellConfig::default(),
    )
    .unwrap()
}

#[test]
fn mount_registers_every_component() {
    let shell = shell();
    // progress + hero + 2 per panel + footer
    assert_eq!(shell.stats().triggers, 1 + 1 + 6 * 2 + 1);
    // scroll + triggers + indicator + hero + panels + parallax + footer
    assert_eq!(shell.stats().frame_subscriptions, 2 + 1 + 1 + 6 + 6 + 1);
    assert_eq!(shell.stats().panels, 6);
    assert_eq!(shell.profile(), ProfileKind::Desktop);
    assert!(!shell.host().native_smooth_scroll());
    assert_eq!(shell.layout().max_scroll(), 800.0 * 7.0 + 640.0 - 800.0);
}

#[test]
fn shutdown_releases_everything_and_restores_native_scroll() {
    let mut shell = shell();
    shell.frame(0.0);
    shell.shutdown();
    shell.shutdown();
    let stats = shell.stats();
    assert_eq!(stats.triggers, 0);
    assert_eq!(stats.frame_subscriptions, 0);
    assert_eq!(stats.panels, 0);
    assert!(shell.host().native_smooth_scroll());
    assert_eq!(shell.host().native_smooth_scroll_toggles(), 2);

    assert!(shell.frame(1.0).is_none());
    shell.handle(InputEvent::Wheel { delta: 500.0 }).unwrap();
    assert_eq!(shell.scroll_state().raw, 0.0);
}

#[test]
fn host_without_frame_callbacks_stays_static() {
    let mut shell = Shell::mount(
        HeadlessHost::new(desktop()).without_frame_callbacks(),
        Catalog::builtin(),
        ShellConfig::default(),
    )
    .unwrap();
    shell.handle(InputEvent::Wheel { delta: 500.0 }).unwrap();
    assert!(shell.frame(0.0).is_none());
    assert!(shell.frame(1.0).is_none());
    assert_eq!(shell.scroll_state().virtual_offset, 0.0);
    assert_eq!(shell.stats().frames, 0);
}

#[test]
fn host_without_frame_callbacks_rests_fully_visible() {
    let mut shell = Shell::mount(
        HeadlessHost::new(desktop()).without_frame_callbacks(),
        Catalog::builtin(),
        ShellConfig::default(),
    )
    .unwrap();
    let check = |snap: &FrameSnapshot| {
        assert_eq!(snap.panels.len(), 6);
        for p in &snap.panels {
            assert!(p.degraded);
            assert_eq!(p.image.opacity, 1.0);
            assert_eq!(p.content.opacity, 1.0);
            assert_eq!(p.image.y, 0.0);
        }
        for v in snap.hero.title.iter().chain(&snap.hero.bio) {
            assert_eq!(v.opacity, 1.0);
        }
        assert_eq!(snap.hero.subtitle.opacity, 1.0);
        assert!(snap.footer.blocks.iter().all(|b| b.opacity == 1.0));
    };
    check(shell.snapshot().expect("resting snapshot on mount"));
    // only the progress trigger survives
    assert_eq!(shell.stats().triggers, 1);

    // crossing the breakpoint rebuilds panels; they settle again
    shell
        .handle(InputEvent::Resize {
            width: 600.0,
            height: 900.0,
        })
        .unwrap();
    assert_eq!(shell.profile(), ProfileKind::Constrained);
    assert_eq!(shell.stats().triggers, 1);
    check(shell.snapshot().unwrap());
    assert!(shell.frame(0.0).is_none());
}

#[test]
fn frames_publish_snapshots() {
    let mut shell = shell();
    shell
        .handle(InputEvent::ScrollTo {
            offset: 1600.0,
            immediate: true,
        })
        .unwrap();
    let snap = shell.frame(0.0).unwrap().clone();
    assert_eq!(snap.frame, 1);
    assert_eq!(snap.scroll.virtual_offset, 1600.0);
    assert_eq!(snap.progress.section_index, 2);
    assert_eq!(snap.panels.len(), 6);
    assert_eq!(snap.panels[0].title, Catalog::builtin().records()[0].title);
    assert_eq!(snap.profile, ProfileKind::Desktop);
    assert!(shell.snapshot().is_some());
}

#[test]
fn pointer_follows_the_hovered_panel() {
    let mut shell = shell();
    shell
        .handle(InputEvent::ScrollTo {
            offset: 800.0,
            immediate: true,
        })
        .unwrap();
    shell.frame(0.0);

    shell
        .handle(InputEvent::PointerMove { x: 1280.0, y: 0.0 })
        .unwrap();
    assert_eq!(shell.parallax(0).unwrap().target(), Vec2::new(1.0, -1.0));

    shell
        .handle(InputEvent::PointerMove { x: 640.0, y: 1000.0 })
        .unwrap();
    assert_eq!(shell.parallax(0).unwrap().target(), Vec2::ZERO);
    assert_eq!(shell.parallax(1).unwrap().target(), Vec2::new(0.0, -0.5));

    shell.handle(InputEvent::PointerLeave).unwrap();
    assert_eq!(shell.parallax(1).unwrap().target(), Vec2::ZERO);
}

#[test]
fn image_events_reach_their_panel() {
    let mut shell = shell();
    shell.handle(InputEvent::ImageLoaded { panel: 1 }).unwrap();
    shell.handle(InputEvent::ImageFailed { panel: 2 }).unwrap();
    shell.handle(InputEvent::ImageLoaded { panel: 99 }).unwrap();
    let snap = shell.frame(0.0).unwrap();
    assert_eq!(snap.panels[1].image_status, ImageStatus::Loaded);
    assert_eq!(snap.panels[2].image_status, ImageStatus::Failed);
    assert_eq!(snap.panels[0].image_status, ImageStatus::Pending);
}

#[test]
fn unmounting_a_panel_drops_its_registrations() {
    let mut shell = shell();
    let before = shell.stats();
    assert!(shell.unmount_panel(3));
    assert!(!shell.unmount_panel(3));
    assert!(!shell.unmount_panel(42));
    let after = shell.stats();
    assert_eq!(after.triggers, before.triggers - 2);
    assert_eq!(after.frame_subscriptions, before.frame_subscriptions - 2);
    assert_eq!(after.panels, 5);

    let snap = shell.frame(0.0).unwrap();
    assert!(snap.panels.iter().all(|p| p.index != 3));
}

#[test]
fn resize_within_profile_keeps_registrations() {
    let mut shell = shell();
    shell
        .handle(InputEvent::Resize {
            width: 1440.0,
            height: 900.0,
        })
        .unwrap();
    assert_eq!(shell.profile(), ProfileKind::Desktop);
    assert_eq!(shell.stats().triggers, 15);
    assert_eq!(shell.layout().viewport().height, 900.0);
}

#[test]
fn invalid_resize_is_an_error() {
    let mut shell = shell();
    assert!(
        shell
            .handle(InputEvent::Resize {
                width: 0.0,
                height: 800.0
            })
            .is_err()
    );
    assert_eq!(shell.layout().viewport(), desktop());
}

#[test]
fn input_events_round_trip_as_tagged_json() {
    let ev: InputEvent = serde_json::from_str(r#"{ "type": "wheel", "delta": 120 }"#).unwrap();
    assert_eq!(ev, InputEvent::Wheel { delta: 120.0 });
    let ev: InputEvent =
        serde_json::from_str(r#"{ "type": "scroll_to", "offset": 10 }"#).unwrap();
    assert_eq!(
        ev,
        InputEvent::ScrollTo {
            offset: 10.0,
            immediate: false
        }
    );
    let ev: InputEvent = serde_json::from_str(r#"{ "type": "pointer_leave" }"#).unwrap();
    assert_eq!(ev, InputEvent::PointerLeave);
}
