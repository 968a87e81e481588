//! Async-Treiber des Panels
//!
//! Eine Schleife auf dem UI-Kontext: Nachrichten aus dem Kanal,
//! Frame-Ticks solange ein Übergang läuft und der nächste Timer-Termin.

use super::controller::CallPanelController;
use super::message::{PanelMessage, PanelReceiver};
use futures::future::OptionFuture;
use tokio::time::{self, MissedTickBehavior};

/// Betreibt das Panel bis `Close` kommt oder der Kanal geschlossen wird
///
/// Das Panel wird in jedem Fall geschlossen.
pub async fn run_panel(mut panel: CallPanelController, mut receiver: PanelReceiver) {
    let mut frames = time::interval(panel.config().frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!("Call panel loop started");

    while !panel.is_destroyed() {
        let timer: OptionFuture<_> = panel
            .next_deadline()
            .map(|deadline| time::sleep_until(time::Instant::from_std(deadline)))
            .into();

        tokio::select! {
            message = receiver.recv() => match message {
                Some(PanelMessage::Close) | None => break,
                Some(message) => panel.handle(message),
            },
            _ = frames.tick(), if panel.is_animating() => panel.on_frame(),
            Some(()) = timer => panel.poll_timers(),
        }
    }

    panel.close_before_destroy();
    tracing::info!("Call panel loop finished");
}

// ============================================================================
// TESTS
// ============================================================================
