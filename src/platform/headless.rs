//=========================================================================
// Headless Backend
//=========================================================================
//
// Scripted backend with no window or devices.
//
// Native notifications are replayed from a script, one frame at a time,
// and every request the platform sends to the native side is recorded in
// a shared `HeadlessProbe` for inspection.
//
// Script semantics (per `pump_events` call):
//   Event(e)       → appended to this frame's notifications
//   EndFrame       → ends this call with `Continue`
//   Terminate(c)   → ends this call with `Terminated(c)`
//   (exhausted)    → `Terminated(0)`
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::gamepad::{GamepadDescriptor, GamepadPoll, GamepadPoller, GamepadState};
use crate::core::gesture::{GestureKind, GestureSet};
use crate::core::platform_bridge::{
    Backend, BackendStatus, Capabilities, FileDialogRequest, GamepadNotifier, NativeEvent,
    Orientation, SensorValues,
};

//=== ScriptStep ==========================================================

#[derive(Debug, Clone, PartialEq)]
enum ScriptStep {
    Event(NativeEvent),
    EndFrame,
    Terminate(i32),
}

//=== HeadlessProbe =======================================================

/// Everything the platform asked the headless backend to do.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessProbe {
    pub vsync: Option<bool>,
    pub cursor_visible: bool,
    pub cursor_captured: bool,
    pub warps: Vec<(i32, i32)>,
    pub swaps: u32,
    pub keyboard_visible: bool,
    pub recognized_gestures: GestureSet,
    pub launched_urls: Vec<String>,
    pub dialog_requests: Vec<FileDialogRequest>,
    pub exit_requested: bool,
    pub pumps: u32,
    pub notifier_bound: bool,
}

impl Default for HeadlessProbe {
    fn default() -> Self {
        Self {
            vsync: None,
            cursor_visible: true,
            cursor_captured: false,
            warps: Vec::new(),
            swaps: 0,
            keyboard_visible: false,
            recognized_gestures: GestureSet::EMPTY,
            launched_urls: Vec::new(),
            dialog_requests: Vec::new(),
            exit_requested: false,
            pumps: 0,
            notifier_bound: false,
        }
    }
}

//=== ScriptedPoller ======================================================

type PollFn = Box<dyn FnMut(&GamepadDescriptor, &mut GamepadState, Duration) -> GamepadPoll>;

struct ScriptedPoller(PollFn);

impl GamepadPoller for ScriptedPoller {
    fn poll_gamepad(
        &mut self,
        descriptor: &GamepadDescriptor,
        state: &mut GamepadState,
        budget: Duration,
    ) -> GamepadPoll {
        (self.0)(descriptor, state, budget)
    }
}

//=== HeadlessBackend =====================================================

/// Backend driven by a script instead of an OS.
///
/// # Examples
///
/// ```
/// use aetheric_platform::prelude::*;
/// use aetheric_platform::platform::headless::HeadlessBackend;
///
/// let backend = HeadlessBackend::new(Capabilities::mobile())
///     .event(NativeEvent::Resize { width: 640, height: 480 })
///     .end_frame()
///     .terminate(0);
/// let probe = backend.probe();
/// # drop(backend);
/// assert_eq!(probe.borrow().pumps, 0);
/// ```
pub struct HeadlessBackend {
    capabilities: Capabilities,
    script: VecDeque<ScriptStep>,
    probe: Rc<RefCell<HeadlessProbe>>,
    notifier: Option<GamepadNotifier>,
    poller: Option<ScriptedPoller>,
    accelerometer: Option<Orientation>,
    sensors: Option<SensorValues>,
    dialog_responses: VecDeque<PathBuf>,
    launch_result: bool,
}

impl HeadlessBackend {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            script: VecDeque::new(),
            probe: Rc::new(RefCell::new(HeadlessProbe::default())),
            notifier: None,
            poller: None,
            accelerometer: None,
            sensors: None,
            dialog_responses: VecDeque::new(),
            launch_result: true,
        }
    }

    /// Shared view of the recorded requests.
    pub fn probe(&self) -> Rc<RefCell<HeadlessProbe>> {
        Rc::clone(&self.probe)
    }

    //--- Script -----------------------------------------------------------

    /// Queues a native notification for the current scripted frame.
    pub fn event(mut self, event: NativeEvent) -> Self {
        self.script.push_back(ScriptStep::Event(event));
        self
    }

    /// Ends the current scripted frame.
    pub fn end_frame(mut self) -> Self {
        self.script.push_back(ScriptStep::EndFrame);
        self
    }

    /// Ends the native loop with `code`.
    pub fn terminate(mut self, code: i32) -> Self {
        self.script.push_back(ScriptStep::Terminate(code));
        self
    }

    //--- Simulated Devices ------------------------------------------------

    /// Makes gamepads pollable through `poll`.
    pub fn with_poller<F>(mut self, poll: F) -> Self
    where
        F: FnMut(&GamepadDescriptor, &mut GamepadState, Duration) -> GamepadPoll + 'static,
    {
        self.poller = Some(ScriptedPoller(Box::new(poll)));
        self
    }

    pub fn with_accelerometer(mut self, orientation: Orientation) -> Self {
        self.accelerometer = Some(orientation);
        self
    }

    pub fn with_sensors(mut self, values: SensorValues) -> Self {
        self.sensors = Some(values);
        self
    }

    /// Queues the path the next file dialog returns; dialogs without a
    /// queued response are cancelled.
    pub fn with_dialog_response(mut self, path: impl Into<PathBuf>) -> Self {
        self.dialog_responses.push_back(path.into());
        self
    }

    /// Sets what `launch_url` reports. Default: `true`.
    pub fn with_launch_result(mut self, succeeds: bool) -> Self {
        self.launch_result = succeeds;
        self
    }

    /// Notifier handed over by the platform at bind time.
    pub fn notifier(&self) -> Option<&GamepadNotifier> {
        self.notifier.as_ref()
    }
}

impl Backend for HeadlessBackend {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn pump_events(&mut self, events: &mut Vec<NativeEvent>, _timeout: Duration) -> BackendStatus {
        self.probe.borrow_mut().pumps += 1;

        while let Some(step) = self.script.pop_front() {
            match step {
                ScriptStep::Event(event) => {
                    trace!(target: "platform::headless", "Replaying {:?}", event);
                    events.push(event);
                }
                ScriptStep::EndFrame => return BackendStatus::Continue,
                ScriptStep::Terminate(code) => return BackendStatus::Terminated(code),
            }
        }

        debug!(target: "platform::headless", "Script exhausted");
        BackendStatus::Terminated(0)
    }

    fn bind_gamepad_notifier(&mut self, notifier: GamepadNotifier) {
        self.notifier = Some(notifier);
        self.probe.borrow_mut().notifier_bound = true;
    }

    fn swap_buffers(&mut self) {
        self.probe.borrow_mut().swaps += 1;
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.probe.borrow_mut().vsync = Some(enabled);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.probe.borrow_mut().cursor_visible = visible;
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        self.probe.borrow_mut().cursor_captured = captured;
    }

    fn warp_cursor(&mut self, x: i32, y: i32) {
        self.probe.borrow_mut().warps.push((x, y));
    }

    fn set_gesture_recognition(&mut self, kind: GestureKind, enabled: bool) {
        let mut probe = self.probe.borrow_mut();
        if enabled {
            probe.recognized_gestures.insert(kind);
        } else {
            probe.recognized_gestures.remove(kind);
        }
    }

    fn display_keyboard(&mut self, display: bool) {
        self.probe.borrow_mut().keyboard_visible = display;
    }

    fn accelerometer(&mut self) -> Option<Orientation> {
        self.accelerometer
    }

    fn sensors(&mut self) -> Option<SensorValues> {
        self.sensors
    }

    fn display_file_dialog(&mut self, request: &FileDialogRequest) -> Option<PathBuf> {
        self.probe.borrow_mut().dialog_requests.push(request.clone());
        self.dialog_responses.pop_front()
    }

    fn launch_url(&mut self, url: &str) -> bool {
        self.probe.borrow_mut().launched_urls.push(url.to_owned());
        self.launch_result
    }

    fn gamepad_poller(&mut self) -> Option<&mut dyn GamepadPoller> {
        self.poller.as_mut().map(|poller| poller as &mut dyn GamepadPoller)
    }

    fn request_exit(&mut self) {
        self.probe.borrow_mut().exit_requested = true;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
