//! Übergang zwischen zwei Panel-Snapshots
//!
//! Der Animator ist ein reiner Wert `{from, to, start, duration}`, der
//! bei Bedarf abgetastet wird. Es gibt keinen Hintergrund-Timer, der
//! UI-Zustand besitzt.

use super::easing::Easing;
use crate::call::UiMode;
use crate::layout::{ActionPose, ModeBlend, PanelSnapshot};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    from: PanelSnapshot,
    to: PanelSnapshot,
    /// Pose der Aktions-Buttons im `from`-Snapshot
    from_pose: ActionPose,
    to_mode: UiMode,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
    progress: f32,
    frozen: bool,
}

impl TransitionAnimator {
    /// Startet einen Übergang bei Fortschritt 0
    pub fn start(
        from: PanelSnapshot,
        to: PanelSnapshot,
        from_pose: ActionPose,
        to_mode: UiMode,
        now: Instant,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        let mut animator = Self {
            from,
            to,
            from_pose,
            to_mode,
            started_at: now,
            duration,
            easing,
            progress: 0.0,
            frozen: false,
        };
        animator.advance(now);
        animator
    }

    /// Übergang, der fest bei `progress` steht
    pub fn fixed(
        from: PanelSnapshot,
        to: PanelSnapshot,
        from_pose: ActionPose,
        to_mode: UiMode,
        progress: f32,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            from_pose,
            to_mode,
            started_at: Instant::now(),
            duration: Duration::ZERO,
            easing,
            progress: progress.clamp(0.0, 1.0),
            frozen: true,
        }
    }

    /// Linearer Fortschritt 0-1
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn to_mode(&self) -> UiMode {
        self.to_mode
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Tastet den Übergang zum Zeitpunkt `now` ab
    pub fn sample(&mut self, now: Instant) -> PanelSnapshot {
        self.advance(now);
        self.snapshot()
    }

    /// Snapshot beim aktuellen Fortschritt
    pub fn snapshot(&self) -> PanelSnapshot {
        if self.progress >= 1.0 {
            return self.to.clone();
        }
        if self.progress <= 0.0 {
            return self.from.clone();
        }
        PanelSnapshot::lerp(&self.from, &self.to, self.easing.apply(self.progress))
    }

    /// Friert beim aktuellen Fortschritt ein und liefert genau diesen Snapshot
    pub fn cancel(&mut self, now: Instant) -> PanelSnapshot {
        self.advance(now);
        self.frozen = true;
        self.snapshot()
    }

    /// Setzt den Übergang beim aktuellen Snapshot neu auf ein geändertes Ziel
    ///
    /// `origin` bekommt den sichtbaren Snapshot und darf ihn anpassen
    /// (z.B. an ein kleineres Fenster). Das Ende bleibt zeitlich gleich.
    pub fn rebase(
        &mut self,
        now: Instant,
        to: PanelSnapshot,
        origin: impl FnOnce(PanelSnapshot) -> PanelSnapshot,
    ) {
        self.advance(now);
        let remaining = if self.frozen {
            Duration::ZERO
        } else {
            (self.started_at + self.duration).saturating_duration_since(now)
        };
        self.from_pose = self.current_pose();
        self.from = origin(self.snapshot());
        self.to = to;
        self.started_at = now;
        self.duration = remaining;
        self.progress = 0.0;
        self.advance(now);
    }

    /// Modus-Übergang, der dem aktuellen Fortschritt entspricht
    pub fn blend(&self) -> ModeBlend {
        ModeBlend {
            from: self.from_pose,
            to: self.to_mode,
            progress: self.progress,
        }
    }

    /// Pose der Aktions-Buttons beim aktuellen Fortschritt
    pub fn current_pose(&self) -> ActionPose {
        self.blend().pose(self.easing)
    }

    fn advance(&mut self, now: Instant) {
        if self.frozen {
            return;
        }
        self.progress = if self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(self.started_at);
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
    }
}

// ============================================================================
// TESTS
// ============================================================================
