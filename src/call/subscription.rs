//! Abonnement auf den Event-Stream eines Anrufs
//!
//! Der Call-Kollaborator sendet auf eigenen Tasks/Threads. Ein
//! Forwarding-Task reicht jedes Event, markiert mit der Epoche der
//! Bindung, in den UI-Kanal des Panels weiter.

use super::state::CallSession;
use crate::panel::PanelMessage;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Besitzendes Abo-Token; `cancel()` oder Drop beendet die Weiterleitung
#[derive(Debug)]
pub struct CallSubscription {
    epoch: u64,
    task: Option<JoinHandle<()>>,
}

impl CallSubscription {
    /// Startet die Weiterleitung der Events von `call` nach `sender`
    ///
    /// Muss innerhalb einer Tokio-Runtime aufgerufen werden.
    pub fn forward(
        call: &Arc<dyn CallSession>,
        epoch: u64,
        sender: mpsc::UnboundedSender<PanelMessage>,
    ) -> Self {
        let mut event_rx = call.subscribe();
        let call_id = call.id();

        let task = tokio::spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        if sender.send(PanelMessage::Call { epoch, event }).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Call {} event stream lagged by {}", call_id, skipped);
                        if sender.send(PanelMessage::Lagged { epoch }).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            tracing::trace!("Forwarding for call {} finished", call_id);
        });

        Self {
            epoch,
            task: Some(task),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Beendet die Weiterleitung sofort
    pub fn cancel(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for CallSubscription {
    fn drop(&mut self) {
        self.abort();
    }
}

// ============================================================================
// TESTS
// ============================================================================
