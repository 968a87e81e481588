//! Test-Doubles für Anruf, Fenster und Inhibitor
//!
//! Alle Doubles teilen ihren Zustand über `Arc<Mutex<_>>`, damit ein Test
//! nach der Übergabe an das Panel weiter hineinschauen kann.

use crate::call::{CallEvent, CallId, CallSession, CallState, CallType, FrameSize};
use crate::layout::{Insets, Size};
use crate::panel::PanelFrame;
use crate::power::{DisplaySleepInhibitor, InhibitorHandle, PowerSaveError};
use crate::window::{PanelWindow, SurfaceHandle, WindowError, WindowRect};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

// ============================================================================
// CALL
// ============================================================================

#[derive(Debug)]
pub struct FakeCallState {
    pub state: CallState,
    pub established_at: Option<Instant>,
    pub muted: bool,
    pub camera_active: bool,
    pub remote_frame: Option<FrameSize>,
    pub sharing_device: Option<String>,
    pub sharing_with_audio: bool,
    pub remote_audio_muted: bool,
    pub fingerprint: Option<String>,
    pub audio_level: f32,

    pub answers: u32,
    pub hangups: u32,
    pub redials: u32,
    pub camera_toggles: u32,
    pub mute_requests: Vec<bool>,
    pub sharing_requests: Vec<(Option<String>, bool)>,
}

pub struct FakeCall {
    id: CallId,
    call_type: CallType,
    events: broadcast::Sender<CallEvent>,
    inner: Mutex<FakeCallState>,
}

impl FakeCall {
    pub fn new(state: CallState) -> Arc<Self> {
        Self::with_type(CallType::Voice, state)
    }

    pub fn video(state: CallState) -> Arc<Self> {
        let call = Self::with_type(CallType::Video, state);
        call.inner().camera_active = true;
        call
    }

    fn with_type(call_type: CallType, state: CallState) -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            id: CallId::new(),
            call_type,
            events,
            inner: Mutex::new(FakeCallState {
                state,
                established_at: None,
                muted: false,
                camera_active: false,
                remote_frame: None,
                sharing_device: None,
                sharing_with_audio: false,
                remote_audio_muted: false,
                fingerprint: None,
                audio_level: 0.0,
                answers: 0,
                hangups: 0,
                redials: 0,
                camera_toggles: 0,
                mute_requests: Vec::new(),
                sharing_requests: Vec::new(),
            }),
        })
    }

    pub fn inner(&self) -> MutexGuard<'_, FakeCallState> {
        self.inner.lock()
    }

    /// Sendet ein Event an alle Abonnenten
    pub fn emit(&self, event: CallEvent) {
        {
            let mut inner = self.inner();
            match &event {
                CallEvent::StateChanged { state, at } => {
                    inner.state = *state;
                    if state.is_established() && inner.established_at.is_none() {
                        inner.established_at = Some(*at);
                    }
                }
                CallEvent::RemoteAudioMuted(muted) => inner.remote_audio_muted = *muted,
                CallEvent::Fingerprint(fingerprint) => inner.fingerprint = fingerprint.clone(),
                _ => {}
            }
        }
        let _ = self.events.send(event);
    }

    /// Setzt den Zustand ohne Event (z.B. für verlorene Events)
    pub fn set_state(&self, state: CallState, established_at: Option<Instant>) {
        let mut inner = self.inner();
        inner.state = state;
        inner.established_at = established_at;
    }
}

impl CallSession for FakeCall {
    fn id(&self) -> CallId {
        self.id
    }

    fn call_type(&self) -> CallType {
        self.call_type
    }

    fn peer_name(&self) -> String {
        "Alice".to_string()
    }

    fn state(&self) -> CallState {
        self.inner().state
    }

    fn established_at(&self) -> Option<Instant> {
        self.inner().established_at
    }

    fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.events.subscribe()
    }

    fn is_muted(&self) -> bool {
        self.inner().muted
    }

    fn is_camera_active(&self) -> bool {
        self.inner().camera_active
    }

    fn remote_frame(&self) -> Option<FrameSize> {
        self.inner().remote_frame
    }

    fn screen_sharing_device(&self) -> Option<String> {
        self.inner().sharing_device.clone()
    }

    fn screen_sharing_with_audio(&self) -> bool {
        self.inner().sharing_with_audio
    }

    fn is_remote_audio_muted(&self) -> bool {
        self.inner().remote_audio_muted
    }

    fn fingerprint(&self) -> Option<String> {
        self.inner().fingerprint.clone()
    }

    fn audio_level(&self) -> f32 {
        self.inner().audio_level
    }

    fn answer(&self) {
        self.inner().answers += 1;
    }

    fn hangup(&self) {
        self.inner().hangups += 1;
    }

    fn redial(&self) {
        self.inner().redials += 1;
    }

    fn set_muted(&self, muted: bool) {
        let mut inner = self.inner();
        inner.muted = muted;
        inner.mute_requests.push(muted);
    }

    fn toggle_camera(&self) {
        self.inner().camera_toggles += 1;
    }

    fn toggle_screen_sharing(&self, device_id: Option<String>, with_audio: bool) {
        self.inner().sharing_requests.push((device_id, with_audio));
    }
}

// ============================================================================
// WINDOW
// ============================================================================

/// Bildschirm, auf den das Fenster im Vollbild springt
pub const SCREEN: WindowRect = WindowRect::new(0, 0, 1920, 1080);

/// Geometrie, die der Window-Manager nach dem Vollbild wählt
pub const WM_DEFAULT: WindowRect = WindowRect::new(100, 100, 640, 480);

#[derive(Debug, Default)]
pub struct WindowLog {
    pub geometry: WindowRect,
    pub fullscreen: bool,
    pub visible: bool,
    pub minimized: bool,
    pub active: bool,
    pub custom_title_controls: bool,
    pub title_controls_visible: bool,
    pub always_on_top_calls: u32,
    pub always_on_top: bool,
    pub shows: u32,
    pub restores: u32,
    pub minimizes: u32,
    pub created: u32,
    pub destroyed: u32,
    pub frames: Vec<PanelFrame>,
}

#[derive(Debug, Clone)]
pub struct RecordingWindow {
    log: Arc<Mutex<WindowLog>>,
}

impl RecordingWindow {
    pub fn new(geometry: WindowRect) -> Self {
        Self {
            log: Arc::new(Mutex::new(WindowLog {
                geometry,
                ..Default::default()
            })),
        }
    }

    pub fn with_title_controls(geometry: WindowRect) -> Self {
        let window = Self::new(geometry);
        window.log().custom_title_controls = true;
        window
    }

    pub fn log(&self) -> MutexGuard<'_, WindowLog> {
        self.log.lock()
    }

    pub fn last_frame(&self) -> Option<PanelFrame> {
        self.log().frames.last().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.log().frames.len()
    }

    /// Simuliert eine Größenänderung durch den Benutzer
    pub fn resize(&self, width: u32, height: u32) {
        let mut log = self.log();
        log.geometry.width = width;
        log.geometry.height = height;
    }
}

impl PanelWindow for RecordingWindow {
    fn create(&mut self) -> Result<(), WindowError> {
        self.log().created += 1;
        Ok(())
    }

    fn destroy(&mut self) {
        self.log().destroyed += 1;
    }

    fn size(&self) -> Size {
        let log = self.log();
        Size::new(log.geometry.width as f32, log.geometry.height as f32)
    }

    fn geometry(&self) -> WindowRect {
        self.log().geometry
    }

    fn set_geometry(&mut self, rect: WindowRect) {
        self.log().geometry = rect;
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        let mut log = self.log();
        log.fullscreen = fullscreen;
        log.geometry = if fullscreen { SCREEN } else { WM_DEFAULT };
    }

    fn show(&mut self) {
        let mut log = self.log();
        log.visible = true;
        log.shows += 1;
    }

    fn hide(&mut self) {
        self.log().visible = false;
    }

    fn activate(&mut self) {
        self.log().active = true;
    }

    fn minimize(&mut self) {
        let mut log = self.log();
        log.minimized = true;
        log.active = false;
        log.minimizes += 1;
    }

    fn restore(&mut self) {
        let mut log = self.log();
        log.minimized = false;
        log.restores += 1;
    }

    fn is_visible(&self) -> bool {
        self.log().visible
    }

    fn is_minimized(&self) -> bool {
        self.log().minimized
    }

    fn is_active(&self) -> bool {
        self.log().active
    }

    fn set_always_on_top(&mut self, pinned: bool) {
        let mut log = self.log();
        log.always_on_top = pinned;
        log.always_on_top_calls += 1;
    }

    fn has_custom_title_controls(&self) -> bool {
        self.log().custom_title_controls
    }

    fn set_title_controls_visible(&mut self, visible: bool) {
        self.log().title_controls_visible = visible;
    }

    fn safe_area(&self) -> Insets {
        Insets::default()
    }

    fn surface_handle(&self) -> SurfaceHandle {
        SurfaceHandle("call-panel".to_string())
    }

    fn present(&mut self, frame: &PanelFrame) {
        self.log().frames.push(frame.clone());
    }
}

// ============================================================================
// INHIBITOR
// ============================================================================

#[derive(Debug, Default)]
struct InhibitorLog {
    acquired: u32,
    released: u32,
    failing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingInhibitor {
    log: Arc<Mutex<InhibitorLog>>,
}

impl RecordingInhibitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inhibitor, dessen Erwerb immer fehlschlägt
    pub fn failing() -> Self {
        let inhibitor = Self::default();
        inhibitor.log.lock().failing = true;
        inhibitor
    }

    pub fn acquired(&self) -> u32 {
        self.log.lock().acquired
    }

    pub fn released(&self) -> u32 {
        self.log.lock().released
    }
}

impl DisplaySleepInhibitor for RecordingInhibitor {
    fn acquire(&mut self, _reason: &str) -> Result<InhibitorHandle, PowerSaveError> {
        let mut log = self.log.lock();
        if log.failing {
            return Err(PowerSaveError::Backend("inhibit refused".to_string()));
        }
        log.acquired += 1;
        Ok(InhibitorHandle::new(log.acquired))
    }

    fn release(&mut self, _handle: InhibitorHandle) -> Result<(), PowerSaveError> {
        self.log.lock().released += 1;
        Ok(())
    }
}
