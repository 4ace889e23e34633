//! Integration tests for WindowManager
//!
//! These tests verify the full window workflow including:
//! - Window lifecycle (open, minimize, restore, maximize, close)
//! - Derived focus and z-order
//! - Pointer-driven drags and resizes
//! - Mobile layout and viewport changes
//! - Restoring from snapshots
//! - Applications calling back into the window manager

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use retro_desktop::{
    AppDescriptor, AppRegistry, AppState, Application, DesktopSnapshot, InputResult,
    LifecycleEvent, OpenOptions, OsApi, Point, Rect, ResizeEdge, Surface, SurfaceFactory,
    SystemServices, Viewport, Window, WindowContent, WindowContext, WindowManager,
};
use serde_json::json;

// =============================================================================
// Fixtures
// =============================================================================

struct Stub(AppDescriptor);

impl Application for Stub {
    fn descriptor(&self) -> &AppDescriptor {
        &self.0
    }

    fn create_content(&self, _ctx: WindowContext) -> Option<Box<dyn WindowContent>> {
        None
    }
}

fn registry() -> Rc<AppRegistry> {
    let registry = Rc::new(AppRegistry::new());
    registry.register(Stub(AppDescriptor::new("notes", "Notes"))).unwrap();
    registry
        .register(Stub(AppDescriptor::new("settings", "Settings").single_instance()))
        .unwrap();
    registry.register(Stub(AppDescriptor::new("tetris", "Tetris").pro_only())).unwrap();
    registry
        .register(Stub(AppDescriptor::new("paint", "Paint").with_default_size(640, 480)))
        .unwrap();
    registry
}

/// 1000x700 desktop in the desktop (non-mobile) layout
fn desktop() -> WindowManager {
    WindowManager::new(registry(), Viewport::new(1000, 700))
}

/// Count notifications and keep the last snapshot
fn watch(wm: &mut WindowManager) -> (Rc<Cell<usize>>, Rc<RefCell<Option<DesktopSnapshot>>>) {
    let count = Rc::new(Cell::new(0));
    let last = Rc::new(RefCell::new(None));
    let (c, l) = (count.clone(), last.clone());
    wm.on_change(move |snapshot: &DesktopSnapshot| {
        c.set(c.get() + 1);
        *l.borrow_mut() = Some(snapshot.clone());
    });
    (count, last)
}

fn window(wm: &WindowManager, id: &str) -> Window {
    wm.window(id).cloned().unwrap()
}

// =============================================================================
// Window Lifecycle Tests
// =============================================================================

#[test]
fn test_open_cascades_and_focuses_newest() {
    let mut wm = desktop();

    let first = wm.open_app("notes", OpenOptions::default()).unwrap();
    let second = wm.open_app("notes", OpenOptions::default()).unwrap();

    assert_eq!(first, "w1");
    assert_eq!(second, "w2");
    assert_eq!(wm.focused_window_id(), Some(second.clone()));

    assert_eq!(window(&wm, &first).rect(), Rect::new(80, 60, 480, 360));
    assert_eq!(window(&wm, &second).rect(), Rect::new(102, 78, 480, 360));
    assert_eq!(window(&wm, &second).title, "Notes");
    assert!(window(&wm, &second).z_index > window(&wm, &first).z_index);
}

#[test]
fn test_open_uses_declared_default_size() {
    let mut wm = desktop();
    let id = wm.open_app("paint", OpenOptions::default()).unwrap();
    assert_eq!(window(&wm, &id).size(), retro_desktop::Size::new(640, 480));
}

#[test]
fn test_open_clamps_requested_geometry() {
    let mut wm = desktop();
    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(-50, 5000, 10, 10)))
        .unwrap();

    // Minimum size, title bar kept on the desktop
    assert_eq!(window(&wm, &id).rect(), Rect::new(0, 680, 260, 180));
}

#[test]
fn test_open_unknown_app_is_noop() {
    let mut wm = desktop();
    let (count, _) = watch(&mut wm);

    assert_eq!(wm.open_app("ghost", OpenOptions::default()), None);
    assert_eq!(wm.count(), 0);
    assert_eq!(count.get(), 0);
}

#[test]
fn test_single_instance_restores_existing_window() {
    let mut wm = desktop();
    let id = wm.open_app("settings", OpenOptions::default()).unwrap();
    wm.open_app("notes", OpenOptions::default()).unwrap();
    wm.minimize_window(&id);

    let again = wm.open_app("settings", OpenOptions::default()).unwrap();

    assert_eq!(again, id);
    assert_eq!(wm.count(), 2);
    assert!(!window(&wm, &id).minimized);
    assert_eq!(wm.focused_window_id(), Some(id));
}

#[test]
fn test_focus_does_not_unminimize() {
    let mut wm = desktop();
    let id = wm.open_app("notes", OpenOptions::default()).unwrap();

    wm.minimize_window(&id);
    assert_eq!(wm.focused_window_id(), None);

    wm.focus_window(&id);
    assert!(window(&wm, &id).minimized);
    assert_eq!(wm.focused_window_id(), None);

    wm.restore_window(&id);
    assert!(!window(&wm, &id).minimized);
    assert_eq!(wm.focused_window_id(), Some(id));
}

#[test]
fn test_minimize_passes_focus_to_next_highest() {
    let mut wm = desktop();
    let a = wm.open_app("notes", OpenOptions::default()).unwrap();
    let b = wm.open_app("notes", OpenOptions::default()).unwrap();

    wm.minimize_window(&b);
    assert_eq!(wm.focused_window_id(), Some(a));
}

#[test]
fn test_toggle_maximize_round_trip() {
    let mut wm = desktop();
    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();

    wm.toggle_maximize_window(&id);
    let w = window(&wm, &id);
    assert!(w.maximized);
    assert_eq!(w.rect(), Rect::new(0, 0, 1000, 700));
    assert_eq!(w.restore_bounds, Some(Rect::new(50, 50, 400, 300)));

    wm.toggle_maximize_window(&id);
    let w = window(&wm, &id);
    assert!(!w.maximized);
    assert_eq!(w.rect(), Rect::new(50, 50, 400, 300));
    assert_eq!(w.restore_bounds, None);
}

#[test]
fn test_ids_are_never_reused() {
    let mut wm = desktop();
    wm.open_app("notes", OpenOptions::default()).unwrap();
    let second = wm.open_app("notes", OpenOptions::default()).unwrap();
    wm.close_window(&second);

    let third = wm.open_app("notes", OpenOptions::default()).unwrap();
    assert_eq!(third, "w3");
    assert_eq!(wm.next_window_id(), 4);
}

#[test]
fn test_requested_id_in_use_gets_fresh_id() {
    let mut wm = desktop();
    let first = wm.open_app("notes", OpenOptions::default()).unwrap();

    let options = OpenOptions {
        id: Some(first.clone()),
        ..Default::default()
    };
    let second = wm.open_app("notes", options).unwrap();

    assert_ne!(first, second);
    assert_eq!(wm.count(), 2);
}

#[test]
fn test_z_order_stays_unique() {
    let mut wm = desktop();
    let a = wm.open_app("notes", OpenOptions::default()).unwrap();
    let b = wm.open_app("notes", OpenOptions::default()).unwrap();
    let c = wm.open_app("paint", OpenOptions::default()).unwrap();

    wm.focus_window(&a);
    wm.focus_window(&c);
    wm.toggle_maximize_window(&b);
    wm.focus_window(&a);

    let z: HashSet<u64> = wm.windows().iter().map(|w| w.z_index).collect();
    assert_eq!(z.len(), 3);
    assert_eq!(wm.focused_window_id(), Some(a));
}

#[test]
fn test_set_window_app_state_merges() {
    let mut wm = desktop();
    let initial: AppState = json!({"text": "hi", "cursor": 0}).as_object().cloned().unwrap();
    let id = wm
        .open_app("notes", OpenOptions { app_state: Some(initial), ..Default::default() })
        .unwrap();

    let patch: AppState = json!({"cursor": 2}).as_object().cloned().unwrap();
    wm.set_window_app_state(&id, patch);

    let state = &window(&wm, &id).app_state;
    assert_eq!(state["text"], json!("hi"));
    assert_eq!(state["cursor"], json!(2));
}

#[test]
fn test_unknown_ids_do_not_notify() {
    let mut wm = desktop();
    wm.open_app("notes", OpenOptions::default()).unwrap();
    let (count, _) = watch(&mut wm);

    wm.close_window("nope");
    wm.minimize_window("nope");
    wm.restore_window("nope");
    wm.focus_window("nope");
    wm.toggle_maximize_window("nope");
    wm.set_window_app_state("nope", AppState::new());

    assert_eq!(count.get(), 0);
    assert_eq!(wm.count(), 1);
}

#[test]
fn test_change_listener_receives_snapshot() {
    let mut wm = desktop();
    let (count, last) = watch(&mut wm);

    let id = wm.open_app("notes", OpenOptions::default()).unwrap();

    assert_eq!(count.get(), 1);
    let snapshot = last.borrow().clone().unwrap();
    assert_eq!(snapshot.windows.len(), 1);
    assert_eq!(snapshot.focused_window_id, Some(id));
    assert_eq!(snapshot.next_window_id, 2);
}

// =============================================================================
// Pointer Interaction Tests
// =============================================================================

#[test]
fn test_title_drag_notifies_once_on_release() {
    let mut wm = desktop();
    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();
    let (count, _) = watch(&mut wm);

    assert_eq!(wm.pointer_down_title(&id, Point::new(100, 60), false), InputResult::Handled);
    assert!(wm.is_interacting());
    count.set(0);

    wm.pointer_move(Point::new(120, 80));
    wm.pointer_move(Point::new(150, 110));
    assert_eq!(window(&wm, &id).rect(), Rect::new(100, 100, 400, 300));
    assert_eq!(count.get(), 0);

    assert_eq!(wm.pointer_up(), InputResult::Handled);
    assert!(!wm.is_interacting());
    assert_eq!(count.get(), 1);
}

#[test]
fn test_drag_is_clamped_to_desktop() {
    let mut wm = desktop();
    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();

    wm.pointer_down_title(&id, Point::new(100, 60), false);
    wm.pointer_move(Point::new(3000, 3000));
    wm.pointer_up();
    assert_eq!(window(&wm, &id).rect(), Rect::new(600, 680, 400, 300));

    wm.pointer_down_title(&id, Point::new(700, 690), false);
    wm.pointer_move(Point::new(-3000, -3000));
    wm.pointer_up();
    assert_eq!(window(&wm, &id).rect(), Rect::new(0, 0, 400, 300));
}

#[test]
fn test_title_controls_do_not_start_drag() {
    let mut wm = desktop();
    let id = wm.open_app("notes", OpenOptions::default()).unwrap();

    assert_eq!(wm.pointer_down_title(&id, Point::new(10, 10), true), InputResult::Unhandled);
    assert!(!wm.is_interacting());
}

#[test]
fn test_maximized_window_is_not_dragged() {
    let mut wm = desktop();
    let id = wm.open_app("notes", OpenOptions::default()).unwrap();
    wm.toggle_maximize_window(&id);

    assert_eq!(wm.pointer_down_title(&id, Point::new(10, 10), false), InputResult::Handled);
    assert!(!wm.is_interacting());
    assert_eq!(wm.pointer_move(Point::new(200, 200)), InputResult::Unhandled);
    assert_eq!(window(&wm, &id).rect(), Rect::new(0, 0, 1000, 700));
}

#[test]
fn test_edge_resize() {
    let mut wm = desktop();
    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();

    wm.pointer_down_edge(&id, ResizeEdge::SE, Point::new(450, 350));
    wm.pointer_move(Point::new(550, 400));
    wm.pointer_up();
    assert_eq!(window(&wm, &id).rect(), Rect::new(50, 50, 500, 350));

    // Shrinking from the west stops at the minimum width, right edge fixed
    wm.pointer_down_edge(&id, ResizeEdge::W, Point::new(50, 200));
    wm.pointer_move(Point::new(500, 200));
    wm.pointer_up();
    assert_eq!(window(&wm, &id).rect(), Rect::new(290, 50, 260, 350));
}

#[test]
fn test_cancel_keeps_geometry() {
    let mut wm = desktop();
    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();

    wm.pointer_down_edge(&id, ResizeEdge::E, Point::new(450, 200));
    wm.pointer_move(Point::new(500, 200));
    assert_eq!(wm.pointer_cancel(), InputResult::Handled);

    assert!(!wm.is_interacting());
    assert_eq!(window(&wm, &id).rect(), Rect::new(50, 50, 450, 300));
}

#[test]
fn test_closing_window_ends_drag() {
    let mut wm = desktop();
    let id = wm.open_app("notes", OpenOptions::default()).unwrap();

    wm.pointer_down_title(&id, Point::new(100, 70), false);
    wm.close_window(&id);

    assert!(!wm.is_interacting());
    assert_eq!(wm.pointer_move(Point::new(150, 120)), InputResult::Unhandled);
    assert_eq!(wm.pointer_up(), InputResult::Unhandled);
}

#[test]
fn test_second_press_commits_first_interaction() {
    let mut wm = desktop();
    let a = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();
    let b = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(500, 300, 300, 200)))
        .unwrap();
    let (count, last) = watch(&mut wm);

    wm.pointer_down_title(&a, Point::new(100, 60), false);
    wm.pointer_move(Point::new(150, 110));
    count.set(0);

    // No release before pressing the other window's corner
    assert_eq!(wm.pointer_down_edge(&b, ResizeEdge::SE, Point::new(800, 500)), InputResult::Handled);
    assert_eq!(count.get(), 2);
    assert!(wm.is_interacting());
    assert_eq!(wm.focused_window_id(), Some(b.clone()));
    let committed = last.borrow().clone().unwrap();
    let record = committed.windows.iter().find(|w| w.id == a).unwrap();
    assert_eq!((record.x, record.y, record.w, record.h), (100, 100, 400, 300));

    wm.pointer_move(Point::new(850, 550));
    assert_eq!(window(&wm, &b).rect(), Rect::new(500, 300, 350, 250));
    assert_eq!(window(&wm, &a).rect(), Rect::new(100, 100, 400, 300));

    wm.pointer_up();
    assert!(!wm.is_interacting());
    assert_eq!(window(&wm, &a).rect(), Rect::new(100, 100, 400, 300));
}

#[test]
fn test_minimizing_window_ends_drag() {
    let mut wm = desktop();
    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();

    wm.pointer_down_title(&id, Point::new(100, 60), false);
    wm.pointer_move(Point::new(150, 110));
    wm.minimize_window(&id);

    assert!(!wm.is_interacting());
    assert_eq!(wm.pointer_move(Point::new(300, 300)), InputResult::Unhandled);
    assert_eq!(wm.pointer_up(), InputResult::Unhandled);

    wm.restore_window(&id);
    assert_eq!(window(&wm, &id).rect(), Rect::new(100, 100, 400, 300));
}

#[test]
fn test_body_press_focuses() {
    let mut wm = desktop();
    let a = wm.open_app("notes", OpenOptions::default()).unwrap();
    wm.open_app("notes", OpenOptions::default()).unwrap();

    assert_eq!(wm.pointer_down_body(&a), InputResult::Handled);
    assert_eq!(wm.focused_window_id(), Some(a));
    assert_eq!(wm.pointer_down_body("nope"), InputResult::Unhandled);
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_mobile_layout_opens_fullscreen() {
    let mut wm = desktop();
    wm.set_layout_policy(|_: &Viewport| true);

    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();
    let w = window(&wm, &id);
    assert!(w.maximized);
    assert_eq!(w.rect(), Rect::new(0, 0, 1000, 700));
}

#[test]
fn test_narrow_viewport_is_mobile_by_default() {
    let wm = WindowManager::new(registry(), Viewport::new(800, 600));
    assert!(wm.is_mobile_layout());

    let wm = WindowManager::new(registry(), Viewport::new(1280, 800).with_coarse_pointer(true));
    assert!(wm.is_mobile_layout());

    assert!(!desktop().is_mobile_layout());
}

#[test]
fn test_viewport_change_refits_maximized() {
    let mut wm = desktop();
    let max = wm.open_app("notes", OpenOptions::default()).unwrap();
    let normal = wm.open_app("notes", OpenOptions::default()).unwrap();
    wm.toggle_maximize_window(&max);
    let before = window(&wm, &normal).rect();
    let (count, _) = watch(&mut wm);

    wm.set_viewport(Viewport::new(1200, 840).with_reserved_bottom(40));

    assert_eq!(window(&wm, &max).rect(), Rect::new(0, 0, 1200, 800));
    assert_eq!(window(&wm, &normal).rect(), before);
    assert_eq!(count.get(), 1);
}

// =============================================================================
// Restore Tests
// =============================================================================

#[test]
fn test_restore_round_trip() {
    let mut original = desktop();
    let a = original
        .open_app("notes", OpenOptions::with_rect(Rect::new(40, 30, 420, 320)))
        .unwrap();
    let b = original.open_app("paint", OpenOptions::default()).unwrap();
    original.toggle_maximize_window(&a);
    original.focus_window(&b);
    let snapshot = original.snapshot();

    let mut restored = desktop();
    let (count, _) = watch(&mut restored);
    restored.restore_snapshot(&snapshot);

    assert_eq!(count.get(), 1);
    assert_eq!(restored.count(), 2);
    assert_eq!(restored.focused_window_id(), Some(b.clone()));
    assert_eq!(restored.next_window_id(), 3);

    let wa = window(&restored, &a);
    assert!(wa.maximized);
    assert_eq!(wa.rect(), Rect::new(0, 0, 1000, 700));
    assert_eq!(wa.restore_bounds, Some(Rect::new(40, 30, 420, 320)));
    assert_eq!(window(&restored, &b).rect(), window(&original, &b).rect());
    assert!(window(&restored, &b).z_index > wa.z_index);

    let next = restored.open_app("notes", OpenOptions::default()).unwrap();
    assert_eq!(next, "w3");
}

#[test]
fn test_restore_skips_unknown_apps_and_keeps_minimized() {
    let snapshot = DesktopSnapshot::from_json(
        r#"{
            "windows": [
                {"id": "w4", "appId": "notes", "x": 10, "y": 20, "w": 300, "h": 200, "zIndex": 150, "minimized": true},
                {"id": "w5", "appId": "ghost", "x": 0, "y": 0, "w": 300, "h": 200, "zIndex": 151}
            ],
            "focusedWindowId": "w4",
            "nextWindowId": 6
        }"#,
    )
    .unwrap();

    let mut wm = desktop();
    wm.restore_snapshot(&snapshot);

    assert_eq!(wm.count(), 1);
    assert!(window(&wm, "w4").minimized);
    assert_eq!(window(&wm, "w4").rect(), Rect::new(10, 20, 300, 200));
    assert_eq!(wm.focused_window_id(), None);

    // Counter continues past the highest persisted z-order
    let id = wm.open_app("notes", OpenOptions::default()).unwrap();
    assert_eq!(id, "w6");
    assert!(window(&wm, &id).z_index > 151);
}

#[test]
fn test_restore_advances_id_counter_past_records() {
    let record = Window {
        id: "w7".to_string(),
        app_id: "notes".to_string(),
        x: 10,
        y: 10,
        w: 300,
        h: 200,
        ..Default::default()
    };

    let mut wm = desktop();
    wm.restore_windows(&[record], None);

    assert_eq!(wm.next_window_id(), 8);
    assert_eq!(wm.open_app("notes", OpenOptions::default()).unwrap(), "w8");
}

#[test]
fn test_restore_keeps_one_single_instance_window() {
    let settings = |id: &str| Window {
        id: id.to_string(),
        app_id: "settings".to_string(),
        w: 400,
        h: 300,
        ..Default::default()
    };

    let mut wm = desktop();
    wm.restore_windows(&[settings("w1"), settings("w2")], Some("w2"));

    assert_eq!(wm.count(), 1);
    assert!(wm.window("w1").is_some());
    assert_eq!(wm.focused_window_id(), Some("w1".to_string()));
}

#[test]
fn test_restore_ignores_out_of_range_counters() {
    let snapshot = DesktopSnapshot::from_json(
        r#"{
            "windows": [
                {"id": "w1", "appId": "notes", "x": 10, "y": 10, "w": 300, "h": 200, "zIndex": 18446744073709551615},
                {"id": "w18446744073709551615", "appId": "notes", "x": 20, "y": 20, "w": 300, "h": 200, "zIndex": 120}
            ],
            "nextWindowId": 2
        }"#,
    )
    .unwrap();

    let mut wm = desktop();
    wm.restore_snapshot(&snapshot);

    assert_eq!(wm.count(), 2);
    assert!(wm.window("w18446744073709551615").is_none());
    assert_eq!(window(&wm, "w2").rect(), Rect::new(20, 20, 300, 200));
    assert!(window(&wm, "w1").z_index < u64::MAX);

    let id = wm.open_app("notes", OpenOptions::default()).unwrap();
    assert_eq!(id, "w3");
    let top = window(&wm, &id).z_index;
    assert!(wm.windows().iter().all(|w| w.id == id || w.z_index < top));

    let z: HashSet<u64> = wm.windows().iter().map(|w| w.z_index).collect();
    assert_eq!(z.len(), 3);
}

#[test]
fn test_restore_resets_out_of_range_id_counter() {
    let snapshot = DesktopSnapshot::from_json(
        r#"{
            "windows": [
                {"id": "w1", "appId": "notes", "x": 10, "y": 10, "w": 300, "h": 200, "zIndex": 101}
            ],
            "nextWindowId": 18446744073709551615
        }"#,
    )
    .unwrap();

    let mut wm = desktop();
    wm.restore_snapshot(&snapshot);

    assert_eq!(wm.next_window_id(), 2);
    assert_eq!(wm.open_app("notes", OpenOptions::default()).unwrap(), "w2");
}

#[test]
fn test_restore_on_mobile_goes_fullscreen() {
    let mut original = desktop();
    original
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();
    let snapshot = original.snapshot();

    let mut wm = desktop();
    wm.set_layout_policy(|_: &Viewport| true);
    wm.restore_snapshot(&snapshot);

    let w = window(&wm, "w1");
    assert!(w.maximized);
    assert_eq!(w.rect(), Rect::new(0, 0, 1000, 700));
}

// =============================================================================
// Taskbar Tests
// =============================================================================

#[test]
fn test_taskbar_activation_cycle() {
    let mut wm = desktop();
    let a = wm.open_app("notes", OpenOptions::default()).unwrap();
    let b = wm.open_app("paint", OpenOptions::default()).unwrap();

    let items = wm.taskbar_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].window_id, a);
    assert_eq!(items[1].label, "Paint");
    assert!(items[1].active);
    assert!(!items[0].active);

    // Focused -> minimized
    wm.activate_taskbar_item(&b);
    assert!(window(&wm, &b).minimized);

    // Minimized -> restored and focused
    wm.activate_taskbar_item(&b);
    assert!(!window(&wm, &b).minimized);
    assert_eq!(wm.focused_window_id(), Some(b));

    // Background -> focused
    wm.activate_taskbar_item(&a);
    assert_eq!(wm.focused_window_id(), Some(a));
}

// =============================================================================
// Application Tests
// =============================================================================

/// Records lifecycle hooks and can close its own windows once open
struct Recorder {
    descriptor: AppDescriptor,
    events: Rc<RefCell<Vec<String>>>,
    close_on_open: bool,
    os: RefCell<Option<OsApi>>,
}

impl Recorder {
    fn new(id: &str, close_on_open: bool) -> (Self, Rc<RefCell<Vec<String>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let app = Self {
            descriptor: AppDescriptor::new(id, "Recorder"),
            events: events.clone(),
            close_on_open,
            os: RefCell::new(None),
        };
        (app, events)
    }

    fn record(&self, kind: &str, event: &LifecycleEvent<'_>) {
        self.events.borrow_mut().push(format!("{}:{}", kind, event.window_id));
    }
}

impl Application for Recorder {
    fn descriptor(&self) -> &AppDescriptor {
        &self.descriptor
    }

    fn create_content(&self, ctx: WindowContext) -> Option<Box<dyn WindowContent>> {
        ctx.os.set_status("Loaded");
        ctx.set_state(json!({"opened": true}).as_object().cloned().unwrap_or_default());
        *self.os.borrow_mut() = Some(ctx.os);
        None
    }

    fn on_open(&self, event: &LifecycleEvent<'_>) {
        self.record("open", event);
        if self.close_on_open {
            if let Some(os) = self.os.borrow().as_ref() {
                os.close_window(event.window_id);
            }
        }
    }

    fn on_close(&self, event: &LifecycleEvent<'_>) {
        self.record("close", event);
    }

    fn on_focus(&self, event: &LifecycleEvent<'_>) {
        self.record("focus", event);
    }

    fn on_minimize(&self, event: &LifecycleEvent<'_>) {
        self.record("minimize", event);
    }
}

#[test]
fn test_hooks_and_deferred_requests() {
    let registry = registry();
    let (app, events) = Recorder::new("recorder", false);
    registry.register(app).unwrap();
    let mut wm = WindowManager::new(registry, Viewport::new(1000, 700));
    let (_, last) = watch(&mut wm);

    let id = wm.open_app("recorder", OpenOptions::default()).unwrap();

    assert_eq!(wm.status(&id).as_deref(), Some("Loaded"));
    assert_eq!(window(&wm, &id).app_state["opened"], json!(true));
    let snapshot = last.borrow().clone().unwrap();
    assert_eq!(snapshot.window(&id).unwrap().app_state["opened"], json!(true));

    wm.minimize_window(&id);
    wm.close_window(&id);

    let events = events.borrow();
    assert!(events.contains(&format!("open:{}", id)));
    assert!(events.contains(&format!("focus:{}", id)));
    assert!(events.contains(&format!("minimize:{}", id)));
    assert_eq!(events.last(), Some(&format!("close:{}", id)));
}

#[test]
fn test_app_can_close_its_own_window_from_a_hook() {
    let registry = registry();
    let (app, events) = Recorder::new("popup", true);
    registry.register(app).unwrap();
    let mut wm = WindowManager::new(registry, Viewport::new(1000, 700));

    let id = wm.open_app("popup", OpenOptions::default()).unwrap();

    assert!(wm.window(&id).is_none());
    assert_eq!(wm.count(), 0);
    assert_eq!(events.borrow().last(), Some(&format!("close:{}", id)));
}

#[derive(Default)]
struct Host {
    pro: Cell<bool>,
    prompts: RefCell<Vec<String>>,
}

impl SystemServices for Host {
    fn is_pro(&self) -> bool {
        self.pro.get()
    }

    fn show_upgrade_prompt(&self, message: &str) {
        self.prompts.borrow_mut().push(message.to_string());
    }
}

#[test]
fn test_launch_gates_paid_apps() {
    let mut wm = desktop();
    let host = Rc::new(Host::default());
    wm.set_services(host.clone());

    assert_eq!(wm.launch("tetris", OpenOptions::default()), None);
    assert_eq!(wm.count(), 0);
    assert_eq!(host.prompts.borrow().as_slice(), ["Tetris is a Pro feature.".to_string()]);

    assert!(wm.launch("notes", OpenOptions::default()).is_some());

    host.pro.set(true);
    assert!(wm.launch("tetris", OpenOptions::default()).is_some());
    assert_eq!(wm.count(), 2);
}

// =============================================================================
// Surface Tests
// =============================================================================

type SurfaceLog = Rc<RefCell<Vec<String>>>;

struct RecordingSurface {
    id: String,
    log: SurfaceLog,
}

impl Surface for RecordingSurface {
    fn mount(&mut self, _content: Box<dyn WindowContent>) {
        self.log.borrow_mut().push(format!("mount:{}", self.id));
    }

    fn apply_bounds(&mut self, bounds: Rect, z_index: u64) {
        self.log.borrow_mut().push(format!(
            "bounds:{}:{},{},{},{}:{}",
            self.id, bounds.x, bounds.y, bounds.w, bounds.h, z_index
        ));
    }

    fn set_visible(&mut self, visible: bool) {
        self.log.borrow_mut().push(format!("visible:{}:{}", self.id, visible));
    }

    fn set_focused(&mut self, focused: bool) {
        self.log.borrow_mut().push(format!("focused:{}:{}", self.id, focused));
    }

    fn set_status(&mut self, text: &str) {
        self.log.borrow_mut().push(format!("status:{}:{}", self.id, text));
    }

    fn detach(&mut self) {
        self.log.borrow_mut().push(format!("detach:{}", self.id));
    }
}

struct RecordingSurfaces(SurfaceLog);

impl SurfaceFactory for RecordingSurfaces {
    fn create_surface(&mut self, window: &Window) -> Box<dyn Surface> {
        Box::new(RecordingSurface {
            id: window.id.clone(),
            log: self.0.clone(),
        })
    }
}

#[test]
fn test_surfaces_follow_window_state() {
    let mut wm = desktop();
    let log: SurfaceLog = Rc::new(RefCell::new(Vec::new()));
    wm.set_surface_factory(RecordingSurfaces(log.clone()));

    let id = wm
        .open_app("notes", OpenOptions::with_rect(Rect::new(50, 50, 400, 300)))
        .unwrap();
    {
        let log = log.borrow();
        assert!(log.contains(&format!("status:{}:Ready", id)));
        assert!(log.contains(&format!("visible:{}:true", id)));
        assert_eq!(
            log.iter().filter(|e| e.starts_with("focused:")).last(),
            Some(&format!("focused:{}:true", id))
        );
    }

    log.borrow_mut().clear();
    wm.minimize_window(&id);
    assert!(log.borrow().contains(&format!("visible:{}:false", id)));
    assert!(log.borrow().contains(&format!("focused:{}:false", id)));

    log.borrow_mut().clear();
    wm.close_window(&id);
    assert!(log.borrow().contains(&format!("detach:{}", id)));
}
