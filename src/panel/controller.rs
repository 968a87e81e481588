//! Call-Panel Controller
//!
//! Orchestriert Layout, Übergänge, Dauer-Anzeige und Power-Save Scope für
//! ein Anruf-Fenster. Läuft ausschließlich auf dem UI-Kontext; Events des
//! Anrufs kommen als [`PanelMessage`] über den UI-Kanal.

use super::chooser::{
    platform_supports_screencast_audio, ChooserLifetime, ScreenSourceChooserDelegate,
};
use super::frame::{status_text, PanelFrame};
use super::message::{PanelAction, PanelMessage, PanelSender};
use super::preview::OutgoingPreview;
use crate::animation::TransitionAnimator;
use crate::call::{CallEvent, CallSession, CallState, CallSubscription, CallType, FrameSize, UiMode};
use crate::config::PanelConfig;
use crate::layout::{ActionPose, LayoutEngine, LayoutInput, ModeBlend, OverlaySet, PanelSnapshot};
use crate::power::{DisplaySleepInhibitor, PowerSaveScope};
use crate::timing::{Clock, CooperativeTimer, DurationClock};
use crate::window::{PanelWindow, SurfaceHandle, WindowRect};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::WeakUnboundedSender;

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Zähler für Tests und Fehlersuche
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PanelDiagnostics {
    pub epoch: u64,
    pub duration_ticks: u64,
    pub duration_cancels: u64,
    pub ripple_ticks: u64,
    pub ripple_cancels: u64,
    pub inhibitor_held: bool,
    pub preview_sinks_created: u64,
    pub preview_transfers: u64,
    pub frames_presented: u64,
    pub destroyed: bool,
}

// ============================================================================
// CALL VIEW
// ============================================================================

/// Was das Panel über den gebundenen Anruf weiß; wird beim Wechsel verworfen
#[derive(Debug, Default)]
struct CallView {
    name: String,
    call_type: Option<CallType>,
    state: Option<CallState>,
    established_at: Option<Instant>,
    incoming_frame: Option<FrameSize>,
    camera_active: bool,
    muted: bool,
    remote_audio_muted: bool,
    fingerprint: Option<String>,
    sharing_device: Option<String>,
    sharing_with_audio: bool,
    outer_ripple: f32,
}

impl CallView {
    fn of(call: &dyn CallSession) -> Self {
        Self {
            name: call.peer_name(),
            call_type: Some(call.call_type()),
            incoming_frame: call.remote_frame(),
            camera_active: call.is_camera_active(),
            muted: call.is_muted(),
            remote_audio_muted: call.is_remote_audio_muted(),
            fingerprint: call.fingerprint(),
            sharing_device: call.screen_sharing_device(),
            sharing_with_audio: call.screen_sharing_with_audio(),
            ..Default::default()
        }
    }

    fn is_established(&self) -> bool {
        self.state.is_some_and(|s| s.is_established())
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct CallPanelController {
    window: Box<dyn PanelWindow>,
    engine: LayoutEngine,
    config: PanelConfig,
    clock: Arc<dyn Clock>,
    sender: WeakUnboundedSender<PanelMessage>,

    call: Option<Arc<dyn CallSession>>,
    subscription: Option<CallSubscription>,
    epoch: u64,
    view: CallView,
    ui_mode: UiMode,
    status: String,

    animator: Option<TransitionAnimator>,
    rendered: Option<PanelSnapshot>,
    preview: OutgoingPreview,

    fullscreen: bool,
    restore_rect: Option<WindowRect>,
    pinned: bool,

    duration_timer: CooperativeTimer,
    ripple_timer: CooperativeTimer,
    power: PowerSaveScope,
    chooser: Option<ChooserLifetime>,
    frames_presented: u64,
    destroyed: bool,
}

impl CallPanelController {
    /// Erstellt das Panel, bindet den Anruf und führt das erste Layout aus
    ///
    /// Muss innerhalb einer Tokio-Runtime aufgerufen werden. Das Panel
    /// hält den Sender nur schwach; der Aufrufer besitzt den Kanal.
    pub fn new(
        call: Option<Arc<dyn CallSession>>,
        window: Box<dyn PanelWindow>,
        inhibitor: Box<dyn DisplaySleepInhibitor>,
        config: PanelConfig,
        clock: Arc<dyn Clock>,
        sender: &PanelSender,
    ) -> Self {
        let engine = LayoutEngine::new(config.style.clone(), config.easing);
        let power = PowerSaveScope::new(inhibitor, config.inhibit_reason.clone());

        let mut panel = Self {
            window,
            engine,
            config,
            clock,
            sender: sender.downgrade(),
            call: None,
            subscription: None,
            epoch: 0,
            view: CallView::default(),
            ui_mode: UiMode::None,
            status: String::new(),
            animator: None,
            rendered: None,
            preview: OutgoingPreview::new(),
            fullscreen: false,
            restore_rect: None,
            pinned: false,
            duration_timer: CooperativeTimer::new(),
            ripple_timer: CooperativeTimer::new(),
            power,
            chooser: None,
            frames_presented: 0,
            destroyed: false,
        };

        if let Err(e) = panel.window.create() {
            tracing::warn!("Failed to create call panel window: {}", e);
        }
        panel.apply_title_controls();

        match call {
            Some(call) => {
                tracing::info!("Call panel created for call {}", call.id());
                panel.bind(call);
            }
            None => {
                tracing::info!("Call panel created without call");
                panel.relayout();
            }
        }
        panel
    }

    // ========================================================================
    // CALL BINDING
    // ========================================================================

    /// Tauscht den Anruf aus, ohne das Fenster neu zu erstellen
    pub fn replace_call(&mut self, call: Option<Arc<dyn CallSession>>) {
        if self.destroyed {
            return;
        }
        tracing::info!(
            "Replacing call {:?} with {:?}",
            self.call.as_ref().map(|c| c.id()),
            call.as_ref().map(|c| c.id())
        );

        self.unbind();
        self.animator = None;
        self.ui_mode = UiMode::None;

        match call {
            Some(call) => self.bind(call),
            None => {
                self.update_status_text();
                self.relayout();
            }
        }
    }

    fn bind(&mut self, call: Arc<dyn CallSession>) {
        self.epoch += 1;
        self.subscription = match self.sender.upgrade() {
            Some(sender) => Some(CallSubscription::forward(&call, self.epoch, sender)),
            None => {
                tracing::warn!("Panel channel closed, call {} is not observed", call.id());
                None
            }
        };

        self.view = CallView::of(&*call);
        let state = call.state();
        let established_at = call.established_at();
        self.call = Some(call);
        self.apply_state(state, established_at, false);
    }

    /// Löst alles, was am bisherigen Anruf hängt; auch ohne Anruf sicher
    fn unbind(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
        self.leave_established();
        self.end_chooser();
        self.preview.reset();
        self.call = None;
        self.view = CallView::default();
    }

    fn is_current_epoch(&self, epoch: u64) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|subscription| subscription.epoch() == epoch)
    }

    // ========================================================================
    // MESSAGES
    // ========================================================================

    /// Verarbeitet eine Nachricht aus dem UI-Kanal
    pub fn handle(&mut self, message: PanelMessage) {
        if self.destroyed {
            return;
        }

        match message {
            PanelMessage::Call { epoch, event } => {
                if self.is_current_epoch(epoch) {
                    self.apply_event(event);
                } else {
                    tracing::trace!("Dropping event of superseded binding {}", epoch);
                }
            }
            PanelMessage::Lagged { epoch } => {
                if self.is_current_epoch(epoch) {
                    self.resync();
                }
            }
            PanelMessage::Resized => self.on_resize(),
            PanelMessage::FullScreen(fullscreen) => self.toggle_full_screen(fullscreen),
            PanelMessage::Action(action) => self.trigger(action),
            PanelMessage::SourceChosen {
                device_id,
                with_audio,
            } => {
                if self.chooser_open() {
                    self.accept_source(device_id, with_audio);
                    self.stop_choosing();
                }
            }
            PanelMessage::ChooserClosed => self.stop_choosing(),
            PanelMessage::CloseRequested => self.handle_close(),
            PanelMessage::Close => self.close_before_destroy(),
        }
    }

    fn apply_event(&mut self, event: CallEvent) {
        match event {
            CallEvent::StateChanged { state, at } => self.apply_state(state, Some(at), true),
            CallEvent::RemoteVideo { frame } => self.set_incoming_size(frame),
            CallEvent::LocalVideo { active } => {
                self.view.camera_active = active;
                self.place_outgoing_preview();
                self.relayout();
            }
            CallEvent::RemoteAudioMuted(muted) => {
                self.view.remote_audio_muted = muted;
                self.relayout();
            }
            CallEvent::Fingerprint(fingerprint) => {
                self.view.fingerprint = fingerprint;
                self.relayout();
            }
            CallEvent::ScreenSharing {
                device_id,
                with_audio,
            } => {
                self.view.sharing_device = device_id;
                self.view.sharing_with_audio = with_audio;
                self.present();
            }
        }
    }

    /// Liest den Anruf neu ein, nachdem Events verloren gingen
    fn resync(&mut self) {
        let Some(call) = self.call.clone() else {
            return;
        };
        tracing::debug!("Resyncing call panel from call {}", call.id());

        self.view.incoming_frame = call.remote_frame();
        self.view.camera_active = call.is_camera_active();
        self.view.muted = call.is_muted();
        self.view.remote_audio_muted = call.is_remote_audio_muted();
        self.view.fingerprint = call.fingerprint();
        self.view.sharing_device = call.screen_sharing_device();
        self.view.sharing_with_audio = call.screen_sharing_with_audio();
        self.apply_state(call.state(), call.established_at(), false);
    }

    // ========================================================================
    // STATE
    // ========================================================================

    /// Übernimmt einen neuen Zustand des gebundenen Anrufs
    pub fn state_changed(&mut self, state: CallState) {
        if self.destroyed {
            return;
        }
        let Some(call) = self.call.as_ref() else {
            tracing::trace!("State {:?} without bound call ignored", state);
            return;
        };
        let established_at = call.established_at();
        self.apply_state(state, established_at, true);
    }

    fn apply_state(&mut self, state: CallState, at: Option<Instant>, animate: bool) {
        let previous = self.view.state.replace(state);
        if previous != Some(state) {
            tracing::debug!("Call state {:?} -> {:?}", previous, state);
        }

        if state.is_established() {
            let established_at = match self.view.established_at {
                Some(established_at) => established_at,
                None => at.unwrap_or_else(|| self.clock.now()),
            };
            if !self.duration_timer.is_armed() {
                self.start_duration_update_timer(established_at);
            }
            if !self.ripple_timer.is_armed() {
                let now = self.clock.now();
                self.ripple_timer.arm_at(now + self.config.ripple_sample());
            }
            self.power.acquire();
        } else {
            self.leave_established();
        }

        self.place_outgoing_preview();
        self.update_status_text();

        let mode = UiMode::from_state(Some(&state));
        if mode != self.ui_mode {
            self.transition_to(mode, animate);
        } else {
            self.relayout();
        }
    }

    fn leave_established(&mut self) {
        if self.duration_timer.cancel() {
            tracing::debug!("Duration timer cancelled");
        }
        self.ripple_timer.cancel();
        self.view.outer_ripple = 0.0;
        self.view.established_at = None;
        self.power.release();
    }

    /// Setzt den Dauer-Timer; jedes Label wird aus `established_at` berechnet
    pub fn start_duration_update_timer(&mut self, established_at: Instant) {
        if self.destroyed || self.call.is_none() {
            return;
        }
        self.view.established_at = Some(established_at);

        let now = self.clock.now();
        self.duration_timer.arm_at(self.next_duration_tick(now, established_at));
        tracing::debug!(
            "Duration timer armed at {}",
            DurationClock::label(now, established_at)
        );
    }

    fn next_duration_tick(&self, now: Instant, established_at: Instant) -> Instant {
        DurationClock::next_tick(now, established_at).min(now + self.config.duration_tick())
    }

    fn update_status_text(&mut self) {
        let duration = self
            .view
            .established_at
            .map(|at| DurationClock::label(self.clock.now(), at));
        self.status = status_text(self.view.state.as_ref(), duration.as_deref());
    }

    // ========================================================================
    // OUTGOING PREVIEW / INCOMING VIDEO
    // ========================================================================

    /// Wählt Body oder Bubble für die eigene Vorschau
    pub fn refresh_outgoing_preview_in_body(&mut self, state: CallState) {
        if self.destroyed || self.call.is_none() {
            return;
        }
        let placement = OutgoingPreview::placement_for(Some(&state), self.view.camera_active);
        if self.preview.place(placement) {
            self.relayout();
        }
    }

    fn place_outgoing_preview(&mut self) {
        let state = self.call.as_ref().and(self.view.state);
        let placement = OutgoingPreview::placement_for(state.as_ref(), self.view.camera_active);
        self.preview.place(placement);
    }

    pub fn set_incoming_size(&mut self, frame: Option<FrameSize>) {
        if self.destroyed {
            return;
        }
        if self.view.incoming_frame != frame {
            tracing::debug!("Incoming frame size {:?}", frame);
        }
        self.view.incoming_frame = frame;
        self.relayout();
    }

    // ========================================================================
    // LAYOUT & TRANSITIONS
    // ========================================================================

    fn overlays(&self) -> OverlaySet {
        let established = self.view.is_established();
        OverlaySet {
            fingerprint: established && self.view.fingerprint.is_some(),
            remote_audio_mute: established && self.view.remote_audio_muted,
        }
    }

    fn title_controls_visible(&self) -> bool {
        !self.fullscreen && self.window.has_custom_title_controls()
    }

    fn apply_title_controls(&mut self) {
        let visible = self.title_controls_visible();
        self.window.set_title_controls_visible(visible);
    }

    fn compute(&self, mode: ModeBlend) -> Option<PanelSnapshot> {
        self.engine.compute(&LayoutInput {
            window: self.window.size(),
            call_type: self.view.call_type.unwrap_or(CallType::Voice),
            mode,
            incoming_frame: self.view.incoming_frame,
            outgoing: self.preview.placement(),
            fullscreen: self.fullscreen,
            title_controls: self.title_controls_visible(),
            safe_area: self.window.safe_area(),
            overlays: self.overlays(),
        })
    }

    /// Startet den Übergang zum neuen Modus beim aktuell sichtbaren Snapshot
    fn transition_to(&mut self, mode: UiMode, animate: bool) {
        let now = self.clock.now();
        let (from, from_pose) = match self.animator.take() {
            Some(mut animator) => {
                let snapshot = animator.cancel(now);
                (Some(snapshot), animator.current_pose())
            }
            None => (self.rendered.clone(), ActionPose::of(self.ui_mode)),
        };

        tracing::debug!("UI mode {:?} -> {:?}", self.ui_mode, mode);
        self.ui_mode = mode;

        let duration = self.config.transition_duration();
        if !animate || duration.is_zero() {
            self.relayout();
            return;
        }

        match (from, self.compute(ModeBlend::settled(mode))) {
            (Some(from), Some(to)) => {
                let animator = TransitionAnimator::start(
                    from,
                    to,
                    from_pose,
                    mode,
                    now,
                    duration,
                    self.config.easing,
                );
                self.rendered = Some(animator.snapshot());
                self.animator = Some(animator);
                self.present();
            }
            _ => self.relayout(),
        }
    }

    /// Berechnet das Layout neu; ein laufender Übergang läuft vom sichtbaren
    /// Snapshot zum neuen Ziel weiter
    fn relayout(&mut self) {
        let Some(animator) = self.animator.as_ref() else {
            match self.compute(ModeBlend::settled(self.ui_mode)) {
                Some(snapshot) => {
                    self.rendered = Some(snapshot);
                    self.present();
                }
                None => tracing::trace!("Skipping layout of empty call panel window"),
            }
            return;
        };

        let Some(to) = self.compute(ModeBlend::settled(animator.to_mode())) else {
            tracing::trace!("Skipping layout of empty call panel window");
            return;
        };
        let now = self.clock.now();
        let window = self.window.size();
        let engine = &self.engine;
        if let Some(animator) = self.animator.as_mut() {
            animator.rebase(now, to, |snapshot| engine.clamp_to_window(snapshot, window));
            self.rendered = Some(animator.snapshot());
        }
        self.present();
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_some()
    }

    /// Frame-Callback: tastet den laufenden Übergang ab
    pub fn on_frame(&mut self) {
        if self.destroyed {
            return;
        }
        let Some(animator) = self.animator.as_mut() else {
            return;
        };

        let snapshot = animator.sample(self.clock.now());
        if animator.is_finished() {
            tracing::trace!("Transition to {:?} finished", animator.to_mode());
            self.animator = None;
        }
        self.rendered = Some(snapshot);
        self.present();
    }

    pub fn on_resize(&mut self) {
        if self.destroyed {
            return;
        }
        self.relayout();
    }

    fn present(&mut self) {
        let Some(snapshot) = self.rendered.clone() else {
            return;
        };
        let overlays = self.overlays();

        let frame = PanelFrame {
            snapshot,
            name: self.view.name.clone(),
            status: self.status.clone(),
            mode: self.ui_mode,
            primary_label: self.primary_label().to_string(),
            outer_ripple: self.view.outer_ripple,
            muted: self.view.muted,
            camera_active: self.view.camera_active,
            screen_sharing: self.view.sharing_device.is_some(),
            remote_audio_muted: overlays.remote_audio_mute,
            fingerprint: self
                .view
                .fingerprint
                .clone()
                .filter(|_| overlays.fingerprint),
            outgoing_sink: self.preview.visible_sink(),
            fullscreen: self.fullscreen,
            chooser_open: self.chooser_open(),
        };

        self.window.present(&frame);
        self.frames_presented += 1;
    }

    // ========================================================================
    // TIMERS
    // ========================================================================

    /// Arbeitet fällige Timer ab (Dauer-Label, Ripple)
    pub fn poll_timers(&mut self) {
        if self.destroyed {
            return;
        }
        let now = self.clock.now();
        let mut dirty = false;

        if self.duration_timer.poll(now) {
            match (self.call.is_some(), self.view.established_at) {
                (true, Some(established_at)) => {
                    self.update_status_text();
                    let next = self.next_duration_tick(now, established_at);
                    self.duration_timer.arm_at(next);
                    dirty = true;
                }
                _ => tracing::trace!("Duration tick without established call"),
            }
        }

        if self.ripple_timer.poll(now) {
            if let Some(call) = self.call.as_ref().filter(|_| self.view.is_established()) {
                let level = call.audio_level();
                self.view.outer_ripple = if level.is_finite() {
                    level.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                self.ripple_timer.arm_at(now + self.config.ripple_sample());
                dirty = true;
            }
        }

        if dirty {
            self.present();
        }
    }

    /// Nächster Termin eines gesetzten Timers
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.duration_timer.deadline(), self.ripple_timer.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    // ========================================================================
    // WINDOW
    // ========================================================================

    pub fn show_and_activate(&mut self) {
        if self.destroyed {
            return;
        }
        if self.window.is_minimized() {
            self.window.restore();
        }
        if !self.window.is_visible() {
            self.window.show();
        }
        self.window.activate();
    }

    pub fn minimize(&mut self) {
        if self.destroyed || self.window.is_minimized() {
            return;
        }
        self.window.minimize();
    }

    pub fn pin_to_top(&mut self, pinned: bool) {
        if self.destroyed || self.pinned == pinned {
            return;
        }
        self.pinned = pinned;
        self.window.set_always_on_top(pinned);
    }

    /// Fenster sichtbar, nicht minimiert und fokussiert
    pub fn is_active(&self) -> bool {
        !self.destroyed
            && self.window.is_visible()
            && !self.window.is_minimized()
            && self.window.is_active()
    }

    /// Merkt sich beim Betreten die Fenstergeometrie und stellt sie beim
    /// Verlassen exakt wieder her
    pub fn toggle_full_screen(&mut self, fullscreen: bool) {
        if self.destroyed || self.fullscreen == fullscreen {
            return;
        }

        if fullscreen {
            self.restore_rect = Some(self.window.geometry());
            self.fullscreen = true;
            self.apply_title_controls();
            self.window.set_fullscreen(true);
        } else {
            self.window.set_fullscreen(false);
            if let Some(rect) = self.restore_rect.take() {
                self.window.set_geometry(rect);
            }
            self.fullscreen = false;
            self.apply_title_controls();
        }

        tracing::info!("Call panel fullscreen: {}", fullscreen);
        self.relayout();
    }

    /// Schließen des Fensters legt einen laufenden Anruf auf
    pub fn handle_close(&mut self) {
        if self.destroyed {
            return;
        }
        let terminal = self.view.state.is_some_and(|s| s.is_terminal());
        match self.call.clone().filter(|_| !terminal) {
            Some(call) => {
                tracing::info!("Hanging up call {} on window close", call.id());
                call.hangup();
            }
            None => self.request_close(),
        }
    }

    fn request_close(&mut self) {
        let sent = self
            .sender
            .upgrade()
            .is_some_and(|sender| sender.send(PanelMessage::Close).is_ok());
        if !sent {
            self.close_before_destroy();
        }
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    /// Button-Klick im Panel
    pub fn trigger(&mut self, action: PanelAction) {
        if self.destroyed {
            return;
        }
        let Some(call) = self.call.clone() else {
            tracing::trace!("Action {:?} without bound call ignored", action);
            return;
        };

        tracing::debug!("Panel action {:?} in mode {:?}", action, self.ui_mode);
        match action {
            PanelAction::Primary => match self.ui_mode {
                UiMode::Answer => call.answer(),
                UiMode::Hangup => call.hangup(),
                UiMode::Redial => call.redial(),
                UiMode::None => {}
            },
            PanelAction::Decline => {
                if self.ui_mode == UiMode::Answer {
                    call.hangup();
                }
            }
            PanelAction::Cancel => {
                if self.ui_mode == UiMode::Redial {
                    self.request_close();
                }
            }
            PanelAction::ToggleMute => {
                self.view.muted = !self.view.muted;
                call.set_muted(self.view.muted);
                self.present();
            }
            PanelAction::ToggleCamera => call.toggle_camera(),
            PanelAction::ToggleScreencast => {
                if self.view.sharing_device.is_some() {
                    call.toggle_screen_sharing(None, false);
                } else {
                    self.open_chooser();
                }
            }
        }
    }

    pub fn primary_label(&self) -> &'static str {
        self.ui_mode.label()
    }

    // ========================================================================
    // CHOOSER
    // ========================================================================

    fn chooser_open(&self) -> bool {
        self.chooser.as_ref().is_some_and(|l| l.is_alive())
    }

    fn open_chooser(&mut self) -> ChooserLifetime {
        if let Some(lifetime) = self.chooser.as_ref().filter(|l| l.is_alive()) {
            return lifetime.clone();
        }
        tracing::debug!("Opening screen source chooser");
        let lifetime = ChooserLifetime::new();
        self.chooser = Some(lifetime.clone());
        self.present();
        lifetime
    }

    fn end_chooser(&mut self) -> bool {
        match self.chooser.take() {
            Some(lifetime) => {
                lifetime.end();
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Gibt alle Ressourcen frei; danach ist jede Operation ein No-op
    pub fn close_before_destroy(&mut self) {
        if self.destroyed {
            return;
        }
        tracing::info!("Closing call panel");

        self.unbind();
        self.animator = None;
        self.destroyed = true;
        self.window.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn ui_mode(&self) -> UiMode {
        self.ui_mode
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn rendered(&self) -> Option<&PanelSnapshot> {
        self.rendered.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> PanelDiagnostics {
        PanelDiagnostics {
            epoch: self.epoch,
            duration_ticks: self.duration_timer.fired_count(),
            duration_cancels: self.duration_timer.cancel_count(),
            ripple_ticks: self.ripple_timer.fired_count(),
            ripple_cancels: self.ripple_timer.cancel_count(),
            inhibitor_held: self.power.is_held(),
            preview_sinks_created: self.preview.created_count(),
            preview_transfers: self.preview.transfer_count(),
            frames_presented: self.frames_presented,
            destroyed: self.destroyed,
        }
    }
}

impl ScreenSourceChooserDelegate for CallPanelController {
    fn chooser_parent(&self) -> Option<SurfaceHandle> {
        (!self.destroyed).then(|| self.window.surface_handle())
    }

    fn chooser_active_device_id(&self) -> Option<String> {
        self.view.sharing_device.clone()
    }

    fn chooser_active_with_audio(&self) -> bool {
        self.view.sharing_with_audio
    }

    fn chooser_with_audio_supported(&self) -> bool {
        self.config
            .screencast_audio
            .unwrap_or_else(platform_supports_screencast_audio)
    }

    fn chooser_lifetime(&mut self) -> ChooserLifetime {
        if self.destroyed {
            let lifetime = ChooserLifetime::new();
            lifetime.end();
            return lifetime;
        }
        self.open_chooser()
    }

    fn accept_source(&mut self, device_id: String, with_audio: bool) {
        if self.destroyed {
            return;
        }
        let Some(call) = self.call.as_ref() else {
            return;
        };
        let with_audio = with_audio && self.chooser_with_audio_supported();
        tracing::info!("Sharing screen source {} (audio: {})", device_id, with_audio);
        call.toggle_screen_sharing(Some(device_id), with_audio);
    }

    fn stop_choosing(&mut self) {
        if self.destroyed {
            return;
        }
        if self.end_chooser() {
            tracing::debug!("Screen source chooser closed");
            self.present();
        }
    }
}

impl Drop for CallPanelController {
    fn drop(&mut self) {
        self.close_before_destroy();
    }
}

// ============================================================================
// TESTS
// ============================================================================
