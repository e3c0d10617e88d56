use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Type d'événement de progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    Start,
    Progress,
    Complete,
    Error,
}

impl ProgressKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressKind::Start => "simulation_start",
            ProgressKind::Progress => "simulation_progress",
            ProgressKind::Complete => "simulation_complete",
            ProgressKind::Error => "simulation_error",
        }
    }
}

/// Événement de progression d'une exécution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub kind: ProgressKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub message: String,
    /// Avancement 0–100, croissant sur la durée d'une exécution.
    pub progress: u8,
    #[serde(default)]
    pub metadata: Value,
}

/// Publication d'événements de progression.
///
/// Canal d'information uniquement : l'orchestrateur publie sans attendre,
/// un échec de livraison ne bloque ni ne fait échouer une exécution. Le
/// moteur ne dépend d'aucun transport particulier.
pub trait ProgressPublisher: Send + Sync {
    fn publish(&self, event: ProgressEvent);
}

/// Publieur silencieux (tests, exécutions sans suivi).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressPublisher for NoOpProgress {
    fn publish(&self, event: ProgressEvent) {
        tracing::debug!(
            kind = event.kind.as_str(),
            progress = event.progress,
            "événement de progression sans destinataire"
        );
    }
}

/// Publieur sur canal : les consommateurs (interface, journalisation)
/// s'abonnent indépendamment du moteur.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressPublisher for ChannelProgress {
    fn publish(&self, event: ProgressEvent) {
        // destinataire parti : l'événement est simplement perdu
        let _ = self.tx.send(event);
    }
}

/// Rapporteur d'une exécution : borne l'avancement à la hausse, ce qui rend
/// la suite d'événements monotone quelles que soient les phases traversées.
pub(super) struct ProgressReporter {
    publisher: Arc<dyn ProgressPublisher>,
    user_id: Option<String>,
    enabled: bool,
    last: AtomicU8,
}

impl ProgressReporter {
    pub(super) fn new(
        publisher: Arc<dyn ProgressPublisher>,
        user_id: Option<String>,
        enabled: bool,
    ) -> Self {
        Self {
            publisher,
            user_id,
            enabled,
            last: AtomicU8::new(0),
        }
    }

    pub(super) fn emit(&self, kind: ProgressKind, message: &str, progress: u8, metadata: Value) {
        if !self.enabled {
            return;
        }
        let previous = self.last.fetch_max(progress.min(100), Ordering::Relaxed);
        let clamped = previous.max(progress.min(100));
        self.publisher.publish(ProgressEvent {
            kind,
            user_id: self.user_id.clone(),
            message: message.to_string(),
            progress: clamped,
            metadata,
        });
    }
}
