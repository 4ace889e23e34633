//! WASM exports for the window manager
//!
//! This module provides wasm-bindgen exports for the WindowManager,
//! allowing the browser shell to drive the desktop. Applications, the DOM
//! layer and host services are supplied from JavaScript as plain objects.
//!
//! Content factories, lifecycle hooks, surface bridges and the change
//! callback run while `DesktopController` is mutably borrowed. They must act
//! through the `WindowOs` argument or the snapshot JSON they receive; calling
//! back into the controller from inside them fails the borrow check.

use std::any::Any;
use std::rc::Rc;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::{
    AppDescriptor, AppRegistry, Application, LifecycleEvent, OsApi, SystemServices, WindowCommand,
    WindowContent, WindowContext,
};
use crate::manager::WindowManager;
use crate::math::{Point, Rect};
use crate::persistence::DesktopSnapshot;
use crate::surface::{Surface, SurfaceFactory};
use crate::viewport::Viewport;
use crate::window::{AppState, OpenOptions, ResizeEdge, Window};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

const UNHANDLED: &str = r#"{"type":"unhandled"}"#;

/// Call `object[name](...args)` if the method exists
fn call_method(object: &js_sys::Object, name: &str, args: &js_sys::Array) -> Option<JsValue> {
    let method = js_sys::Reflect::get(object, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    match method.apply(object, args) {
        Ok(value) => Some(value),
        Err(err) => {
            log(&format!("[retro-desktop] {} threw: {:?}", name, err));
            None
        }
    }
}

/// Convert application state into a JS object
fn state_to_js(state: &AppState) -> JsValue {
    serde_json::to_string(state)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// =============================================================================
// Applications
// =============================================================================

/// Content element returned by a JS factory
struct JsContent(JsValue);

impl WindowContent for JsContent {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Application implemented in JavaScript
///
/// `factory(windowId, state, os)` returns the content element; `hooks`
/// may carry `onOpen`, `onClose`, `onFocus` and `onMinimize`, each called
/// with `(windowId, state)`.
struct JsApplication {
    descriptor: AppDescriptor,
    factory: Option<js_sys::Function>,
    hooks: Option<js_sys::Object>,
}

impl JsApplication {
    fn hook(&self, name: &str, event: &LifecycleEvent<'_>) {
        if let Some(hooks) = &self.hooks {
            let args = js_sys::Array::of2(&JsValue::from_str(event.window_id), &state_to_js(event.state));
            call_method(hooks, name, &args);
        }
    }
}

impl Application for JsApplication {
    fn descriptor(&self) -> &AppDescriptor {
        &self.descriptor
    }

    fn create_content(&self, ctx: WindowContext) -> Option<Box<dyn WindowContent>> {
        let factory = self.factory.as_ref()?;
        let window_id = JsValue::from_str(&ctx.window_id);
        let state = state_to_js(&ctx.state);
        let os = JsValue::from(WindowOs { os: ctx.os });
        match factory.call3(&JsValue::NULL, &window_id, &state, &os) {
            Ok(content) if !content.is_undefined() && !content.is_null() => Some(Box::new(JsContent(content))),
            Ok(_) => None,
            Err(err) => {
                log(&format!("[retro-desktop] factory for {} threw: {:?}", self.descriptor.id, err));
                None
            }
        }
    }

    fn on_open(&self, event: &LifecycleEvent<'_>) {
        self.hook("onOpen", event);
    }

    fn on_close(&self, event: &LifecycleEvent<'_>) {
        self.hook("onClose", event);
    }

    fn on_focus(&self, event: &LifecycleEvent<'_>) {
        self.hook("onFocus", event);
    }

    fn on_minimize(&self, event: &LifecycleEvent<'_>) {
        self.hook("onMinimize", event);
    }
}

/// Capability surface handed to JS content factories
#[wasm_bindgen]
pub struct WindowOs {
    os: OsApi,
}

#[wasm_bindgen]
impl WindowOs {
    /// Window this surface belongs to
    #[wasm_bindgen(getter)]
    pub fn window_id(&self) -> String {
        self.os.window_id().to_string()
    }

    /// Current status line
    #[wasm_bindgen]
    pub fn status(&self) -> String {
        self.os.status()
    }

    /// Replace the status line (empty restores the default)
    #[wasm_bindgen]
    pub fn set_status(&self, message: &str) {
        self.os.set_status(message);
    }

    /// Merge a JSON object into this window's payload
    #[wasm_bindgen]
    pub fn set_state(&self, patch_json: &str) -> Result<(), JsValue> {
        let patch: AppState = serde_json::from_str(patch_json).map_err(js_error)?;
        self.os.commands().push(WindowCommand::SetAppState {
            window_id: self.os.window_id().to_string(),
            patch,
        });
        Ok(())
    }

    #[wasm_bindgen]
    pub fn is_pro(&self) -> bool {
        self.os.is_pro()
    }

    /// Gate a paid feature; prompts for an upgrade when locked
    #[wasm_bindgen]
    pub fn require_pro(&self, feature: &str) -> bool {
        self.os.require_pro(feature)
    }

    #[wasm_bindgen]
    pub fn show_toast(&self, message: &str) {
        self.os.show_toast(message);
    }

    #[wasm_bindgen]
    pub fn unlock_achievement(&self, id: &str) {
        self.os.unlock_achievement(id);
    }

    #[wasm_bindgen]
    pub fn has_app(&self, app_id: &str) -> bool {
        self.os.has_app(app_id)
    }

    #[wasm_bindgen]
    pub fn launch_app(&self, app_id: &str) {
        self.os.launch_app(app_id, OpenOptions::default());
    }

    #[wasm_bindgen]
    pub fn focus_window(&self, id: &str) {
        self.os.focus_window(id);
    }

    #[wasm_bindgen]
    pub fn close_window(&self, id: &str) {
        self.os.close_window(id);
    }

    #[wasm_bindgen]
    pub fn minimize_window(&self, id: &str) {
        self.os.minimize_window(id);
    }

    #[wasm_bindgen]
    pub fn restore_window(&self, id: &str) {
        self.os.restore_window(id);
    }

    #[wasm_bindgen]
    pub fn toggle_maximize_window(&self, id: &str) {
        self.os.toggle_maximize_window(id);
    }
}

// =============================================================================
// Surfaces and services
// =============================================================================

/// Surface forwarding to a JS bridge object
///
/// The bridge implements `mount(id, content)`, `applyBounds(id, x, y, w,
/// h, z)`, `setVisible(id, visible)`, `setFocused(id, focused)`,
/// `setStatus(id, text)` and `detach(id)`; missing methods are skipped.
struct JsSurface {
    bridge: js_sys::Object,
    id: JsValue,
}

impl JsSurface {
    fn call(&self, name: &str, rest: &[JsValue]) {
        let args = js_sys::Array::new();
        args.push(&self.id);
        for arg in rest {
            args.push(arg);
        }
        call_method(&self.bridge, name, &args);
    }
}

impl Surface for JsSurface {
    fn mount(&mut self, content: Box<dyn WindowContent>) {
        if let Some(content) = content.as_any().downcast_ref::<JsContent>() {
            self.call("mount", &[content.0.clone()]);
        }
    }

    fn apply_bounds(&mut self, bounds: Rect, z_index: u64) {
        self.call(
            "applyBounds",
            &[
                JsValue::from(bounds.x),
                JsValue::from(bounds.y),
                JsValue::from(bounds.w),
                JsValue::from(bounds.h),
                JsValue::from(z_index as f64),
            ],
        );
    }

    fn set_visible(&mut self, visible: bool) {
        self.call("setVisible", &[JsValue::from(visible)]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.call("setFocused", &[JsValue::from(focused)]);
    }

    fn set_status(&mut self, text: &str) {
        self.call("setStatus", &[JsValue::from_str(text)]);
    }

    fn detach(&mut self) {
        self.call("detach", &[]);
    }
}

struct JsSurfaces {
    bridge: js_sys::Object,
}

impl SurfaceFactory for JsSurfaces {
    fn create_surface(&mut self, window: &Window) -> Box<dyn Surface> {
        Box::new(JsSurface {
            bridge: self.bridge.clone(),
            id: JsValue::from_str(&window.id),
        })
    }
}

/// Host services backed by a JS object with optional `getSetting`,
/// `setSetting`, `isPro`, `showUpgradePrompt`, `showToast` and
/// `unlockAchievement` methods
struct JsServices {
    host: js_sys::Object,
}

impl SystemServices for JsServices {
    fn setting(&self, key: &str) -> Option<serde_json::Value> {
        let value = call_method(&self.host, "getSetting", &js_sys::Array::of1(&JsValue::from_str(key)))?;
        if value.is_undefined() {
            return None;
        }
        let json = js_sys::JSON::stringify(&value).ok()?.as_string()?;
        serde_json::from_str(&json).ok()
    }

    fn set_setting(&self, key: &str, value: serde_json::Value) {
        let value = js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL);
        call_method(&self.host, "setSetting", &js_sys::Array::of2(&JsValue::from_str(key), &value));
    }

    fn is_pro(&self) -> bool {
        call_method(&self.host, "isPro", &js_sys::Array::new())
            .map(|v| v.is_truthy())
            .unwrap_or(false)
    }

    fn show_upgrade_prompt(&self, message: &str) {
        call_method(&self.host, "showUpgradePrompt", &js_sys::Array::of1(&JsValue::from_str(message)));
    }

    fn show_toast(&self, message: &str) {
        call_method(&self.host, "showToast", &js_sys::Array::of1(&JsValue::from_str(message)));
    }

    fn unlock_achievement(&self, id: &str) {
        call_method(&self.host, "unlockAchievement", &js_sys::Array::of1(&JsValue::from_str(id)));
    }
}

/// Read the browser viewport (size and pointer coarseness)
fn detect_viewport(reserved_bottom: i32) -> Viewport {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return Viewport::default().with_reserved_bottom(reserved_bottom),
    };
    let dimension = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).map(|v| v as i32);
    let defaults = Viewport::default();
    let coarse = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false);
    Viewport::new(
        dimension(window.inner_width()).unwrap_or(defaults.width),
        dimension(window.inner_height()).unwrap_or(defaults.height),
    )
    .with_reserved_bottom(reserved_bottom)
    .with_coarse_pointer(coarse)
}

/// Open options as accepted from JS
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct JsOpenOptions {
    id: Option<String>,
    x: Option<i32>,
    y: Option<i32>,
    w: Option<i32>,
    h: Option<i32>,
    z_index: Option<u64>,
    minimized: bool,
    maximized: bool,
    restore_bounds: Option<Rect>,
    app_state: Option<AppState>,
    skip_auto_focus: bool,
    preserve_layout: bool,
}

impl From<JsOpenOptions> for OpenOptions {
    fn from(o: JsOpenOptions) -> Self {
        Self {
            id: o.id,
            x: o.x,
            y: o.y,
            w: o.w,
            h: o.h,
            z_index: o.z_index,
            minimized: o.minimized,
            maximized: o.maximized,
            restore_bounds: o.restore_bounds,
            app_state: o.app_state,
            skip_auto_focus: o.skip_auto_focus,
            preserve_layout: o.preserve_layout,
        }
    }
}

fn parse_options(options_json: Option<String>) -> Result<OpenOptions, JsValue> {
    match options_json {
        Some(json) if !json.is_empty() => {
            let options: JsOpenOptions = serde_json::from_str(&json).map_err(js_error)?;
            Ok(options.into())
        }
        _ => Ok(OpenOptions::default()),
    }
}

fn result_json(result: crate::input::InputResult) -> String {
    serde_json::to_string(&result).unwrap_or_else(|_| UNHANDLED.to_string())
}

// =============================================================================
// Controller
// =============================================================================

/// Desktop controller for WASM - wraps WindowManager with a JS-friendly API
#[wasm_bindgen]
pub struct DesktopController {
    wm: WindowManager,
    reserved_bottom: i32,
}

#[wasm_bindgen]
impl DesktopController {
    /// Create a controller sized to the browser window
    ///
    /// `reserved_bottom` is the taskbar height.
    #[wasm_bindgen(constructor)]
    pub fn new(reserved_bottom: i32) -> Self {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let registry = Rc::new(AppRegistry::new());
        Self {
            wm: WindowManager::new(registry, detect_viewport(reserved_bottom)),
            reserved_bottom,
        }
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Register an application from its descriptor JSON
    #[wasm_bindgen]
    pub fn register_app(
        &mut self,
        descriptor_json: &str,
        factory: Option<js_sys::Function>,
        hooks: Option<js_sys::Object>,
    ) -> Result<(), JsValue> {
        let descriptor: AppDescriptor = serde_json::from_str(descriptor_json).map_err(js_error)?;
        self.wm
            .registry()
            .register(JsApplication { descriptor, factory, hooks })
            .map_err(js_error)
    }

    /// Descriptors of every registered application, in registration order
    /// (the start menu and desktop icons)
    #[wasm_bindgen]
    pub fn get_apps_json(&self) -> String {
        let descriptors: Vec<AppDescriptor> = self
            .wm
            .registry()
            .list()
            .iter()
            .map(|app| app.descriptor().clone())
            .collect();
        serde_json::to_string(&descriptors).unwrap_or_else(|_| "[]".to_string())
    }

    /// Route surface updates to a JS bridge object
    #[wasm_bindgen]
    pub fn set_surface_bridge(&mut self, bridge: js_sys::Object) {
        self.wm.set_surface_factory(JsSurfaces { bridge });
    }

    /// Use a JS object for settings, paid tier and notifications
    #[wasm_bindgen]
    pub fn set_services(&mut self, host: js_sys::Object) {
        self.wm.set_services(Rc::new(JsServices { host }));
    }

    /// Receive snapshot JSON after every change
    ///
    /// The callback runs mid-operation and must not call back into the
    /// controller; persist or render the JSON it is given.
    #[wasm_bindgen]
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.wm.on_change(move |snapshot: &DesktopSnapshot| {
            if let Ok(json) = snapshot.to_json() {
                if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log(&format!("[retro-desktop] change listener threw: {:?}", err));
                }
            }
        });
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Re-read the browser viewport and refit maximized windows
    #[wasm_bindgen]
    pub fn sync_viewport(&mut self) {
        self.wm.set_viewport(detect_viewport(self.reserved_bottom));
    }

    /// Set the viewport explicitly and refit maximized windows
    #[wasm_bindgen]
    pub fn set_viewport(&mut self, width: i32, height: i32, coarse_pointer: bool) {
        let viewport = Viewport::new(width, height)
            .with_reserved_bottom(self.reserved_bottom)
            .with_coarse_pointer(coarse_pointer);
        self.wm.set_viewport(viewport);
    }

    #[wasm_bindgen]
    pub fn is_mobile_layout(&self) -> bool {
        self.wm.is_mobile_layout()
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Open a window; `options_json` is an optional object of overrides
    #[wasm_bindgen]
    pub fn open_app(&mut self, app_id: &str, options_json: Option<String>) -> Result<Option<String>, JsValue> {
        let options = parse_options(options_json)?;
        Ok(self.wm.open_app(app_id, options))
    }

    /// Open a window the way the start menu does (paid-tier gate)
    #[wasm_bindgen]
    pub fn launch(&mut self, app_id: &str) -> Option<String> {
        self.wm.launch(app_id, OpenOptions::default())
    }

    #[wasm_bindgen]
    pub fn close_window(&mut self, id: &str) {
        self.wm.close_window(id);
    }

    #[wasm_bindgen]
    pub fn minimize_window(&mut self, id: &str) {
        self.wm.minimize_window(id);
    }

    #[wasm_bindgen]
    pub fn restore_window(&mut self, id: &str) {
        self.wm.restore_window(id);
    }

    #[wasm_bindgen]
    pub fn focus_window(&mut self, id: &str) {
        self.wm.focus_window(id);
    }

    #[wasm_bindgen]
    pub fn toggle_maximize_window(&mut self, id: &str) {
        self.wm.toggle_maximize_window(id);
    }

    /// Merge a JSON object into a window's payload
    #[wasm_bindgen]
    pub fn set_window_app_state(&mut self, id: &str, patch_json: &str) -> Result<(), JsValue> {
        let patch: AppState = serde_json::from_str(patch_json).map_err(js_error)?;
        self.wm.set_window_app_state(id, patch);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn resize_maximized_windows(&mut self) {
        self.wm.resize_maximized_windows();
    }

    #[wasm_bindgen]
    pub fn focused_window_id(&self) -> Option<String> {
        self.wm.focused_window_id()
    }

    /// Current status line of a window
    #[wasm_bindgen]
    pub fn status(&self, id: &str) -> Option<String> {
        self.wm.status(id)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Rebuild windows from a snapshot produced by `on_change`
    #[wasm_bindgen]
    pub fn restore_snapshot(&mut self, json: &str) -> Result<(), JsValue> {
        let snapshot = DesktopSnapshot::from_json(json).map_err(js_error)?;
        self.wm.restore_snapshot(&snapshot);
        Ok(())
    }

    /// Current snapshot as JSON
    #[wasm_bindgen]
    pub fn get_snapshot_json(&self) -> String {
        self.wm.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Window records as a JSON array
    #[wasm_bindgen]
    pub fn get_windows_json(&self) -> String {
        serde_json::to_string(&self.wm.windows()).unwrap_or_else(|_| "[]".to_string())
    }

    // =========================================================================
    // Taskbar
    // =========================================================================

    #[wasm_bindgen]
    pub fn get_taskbar_json(&self) -> String {
        serde_json::to_string(&self.wm.taskbar_items()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen]
    pub fn activate_taskbar_item(&mut self, id: &str) {
        self.wm.activate_taskbar_item(id);
    }

    // =========================================================================
    // Input Handling
    // =========================================================================

    /// Pointer pressed on a title bar
    #[wasm_bindgen]
    pub fn pointer_down_title(&mut self, id: &str, x: i32, y: i32, on_control: bool) -> String {
        result_json(self.wm.pointer_down_title(id, Point::new(x, y), on_control))
    }

    /// Pointer pressed on a resize handle (`direction` is "n", "se", ...)
    #[wasm_bindgen]
    pub fn pointer_down_edge(&mut self, id: &str, direction: &str, x: i32, y: i32) -> String {
        match ResizeEdge::parse(direction) {
            Some(edge) => result_json(self.wm.pointer_down_edge(id, edge, Point::new(x, y))),
            None => UNHANDLED.to_string(),
        }
    }

    /// Pointer pressed on a window body
    #[wasm_bindgen]
    pub fn pointer_down_body(&mut self, id: &str) -> String {
        result_json(self.wm.pointer_down_body(id))
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: i32, y: i32) -> String {
        result_json(self.wm.pointer_move(Point::new(x, y)))
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self) -> String {
        result_json(self.wm.pointer_up())
    }

    #[wasm_bindgen]
    pub fn pointer_cancel(&mut self) -> String {
        result_json(self.wm.pointer_cancel())
    }
}

impl Default for DesktopController {
    fn default() -> Self {
        Self::new(0)
    }
}
