mod common;

use clear_bg::host::OverlayCamera;
use clear_bg::overlay::{NO_MONITOR, OverlayFacade, OverlayPhase, STATS_UNINITIALIZED};
use clear_bg::{OverlayError, OverlaySettings};

use common::*;

type Facade = OverlayFacade<MockBackend, MockHost>;

fn manual() -> OverlaySettings {
    OverlaySettings {
        auto_initialize: false,
        ..OverlaySettings::default()
    }
}

#[test]
fn sentinels_before_any_activation() {
    let mut facade = Facade::new(MockBackend::new(), MockHost::new(), manual());
    facade.bootstrap().unwrap();

    assert!(facade.controller().is_none());
    assert!(!facade.is_initialized());
    assert_eq!(facade.current_monitor_index(), NO_MONITOR);
    assert_eq!(facade.performance_stats(), STATS_UNINITIALIZED);

    facade.set_monitor_index(1);
    facade.deactivate();
    facade.tick().unwrap();
    assert_eq!(facade.current_monitor_index(), NO_MONITOR);
}

#[test]
fn regions_fall_back_before_activation() {
    let facade = Facade::new(MockBackend::new(), MockHost::new(), manual());

    let screen = facade.screen_region();
    assert!(screen.ui.center().length() < 1e-3);
    assert_eq!(screen.ui.size.x, SURFACE.0 as f32);
    assert_eq!(screen.ui.size.y, SURFACE.1 as f32);

    let taskbar = facade.taskbar_region();
    assert_eq!(taskbar.ui.size.y, 40.0);
    assert_eq!(taskbar.ui.bottom, -(SURFACE.1 as f32) / 2.0);
}

#[test]
fn bootstrap_activates_when_configured() {
    let backend = MockBackend::new();
    let log = backend.log.clone();
    let mut facade = Facade::new(backend, MockHost::new(), OverlaySettings::default());

    facade.bootstrap().unwrap();

    assert!(facade.is_initialized());
    assert_eq!(facade.current_monitor_index(), 0);
    assert_eq!(log.borrow().init_calls, vec![0]);
    assert!((facade.performance_stats() - 16.6).abs() < 1e-3);
}

#[test]
fn monitor_changes_go_through_the_controller() {
    let mut facade = Facade::new(MockBackend::new(), MockHost::new(), manual());
    facade.activate().unwrap();

    facade.set_monitor_index(1);
    assert_eq!(facade.current_monitor_index(), 1);

    facade.set_monitor_index(42);
    assert_eq!(facade.current_monitor_index(), 1);
}

#[test]
fn failed_activation_keeps_the_controller_for_a_retry() {
    let mut facade = Facade::new(MockBackend::failing(), MockHost::new(), manual());

    assert_eq!(
        facade.activate(),
        Err(OverlayError::BackendUnavailable { monitor: 0 })
    );
    assert!(!facade.is_initialized());
    assert_eq!(
        facade.controller().map(|c| c.phase()),
        Some(OverlayPhase::Inactive)
    );
    assert_eq!(facade.performance_stats(), 0.0);
}

#[test]
fn deactivate_cancels_a_pending_activation() {
    let host = MockHost::without_camera();
    let backend = MockBackend::new();
    let log = backend.log.clone();
    let mut facade = Facade::new(backend, host.clone(), manual());

    facade.activate().unwrap();
    assert_eq!(
        facade.controller().map(|c| c.phase()),
        Some(OverlayPhase::Activating)
    );

    facade.deactivate();
    assert_eq!(
        facade.controller().map(|c| c.phase()),
        Some(OverlayPhase::Inactive)
    );
    assert_eq!(log.borrow().set_active_calls, vec![false]);
    assert_eq!(host.live_readbacks.get(), 0);

    host.state.borrow_mut().camera = Some(scene_camera());
    facade.activate().unwrap();
    assert!(facade.is_initialized());
    assert_eq!(log.borrow().init_calls.len(), 1);
}

#[test]
fn settings_changed_before_activation_are_applied() {
    let backend = MockBackend::new();
    let log = backend.log.clone();
    let mut facade = Facade::new(backend, MockHost::new(), manual());

    facade.set_click_through_threshold(0.4);
    facade.activate().unwrap();

    let sampler = facade.controller().and_then(|c| c.sampler()).unwrap();
    assert!((sampler.threshold() - 0.4).abs() < 1e-6);

    facade.always_on_top(false);
    assert_eq!(log.borrow().always_on_top_calls, vec![true, false]);
    assert!(!facade.settings().always_on_top);
}

#[test]
fn teardown_returns_to_the_pre_activation_state() {
    let host = MockHost::new();
    let backend = MockBackend::new();
    let log = backend.log.clone();
    let mut facade = Facade::new(backend, host.clone(), manual());
    facade.activate().unwrap();

    facade.teardown();
    facade.teardown();

    assert!(facade.controller().is_none());
    assert_eq!(facade.current_monitor_index(), NO_MONITOR);
    assert_eq!(host.live_readbacks.get(), 0);
    assert_eq!(
        host.camera().unwrap().borrow().clear_state(),
        scene_clear_state()
    );

    facade.activate().unwrap();
    assert!(facade.is_initialized());
    assert_eq!(log.borrow().init_calls.len(), 2);
}

#[test]
fn dropping_the_facade_restores_the_camera() {
    let host = MockHost::new();
    let mut facade = Facade::new(MockBackend::new(), host.clone(), manual());
    facade.activate().unwrap();
    assert_eq!(host.live_readbacks.get(), 1);

    drop(facade);

    assert_eq!(host.live_readbacks.get(), 0);
    assert_eq!(
        host.camera().unwrap().borrow().clear_state(),
        scene_clear_state()
    );
}

#[test]
fn preview_hosts_report_no_frame_time() {
    let mut facade = Facade::new(MockBackend::new(), MockHost::preview(), manual());
    facade.activate().unwrap();

    assert!(facade.is_initialized());
    assert_eq!(facade.performance_stats(), -1.0);
}

#[test]
fn scene_change_notifications_reach_the_controller() {
    let host = MockHost::new();
    let settings = OverlaySettings {
        auto_initialize: false,
        auto_convert_ui_roots: true,
        ..OverlaySettings::default()
    };
    let mut facade = Facade::new(MockBackend::new(), host.clone(), settings);

    facade.notify_scene_changed();
    assert_eq!(host.state.borrow().ui_conversions, 0);

    facade.activate().unwrap();
    facade.notify_scene_changed();
    assert_eq!(host.state.borrow().ui_conversions, 1);
}
