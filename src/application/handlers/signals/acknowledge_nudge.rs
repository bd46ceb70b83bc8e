//! AcknowledgeNudgeHandler - Marks a nudge as seen.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, NudgeId};
use crate::domain::signals::Nudge;
use crate::ports::SignalRepository;

#[derive(Debug, Clone, Copy)]
pub struct AcknowledgeNudgeCommand {
    pub nudge_id: NudgeId,
}

pub struct AcknowledgeNudgeHandler {
    signals: Arc<dyn SignalRepository>,
}

impl AcknowledgeNudgeHandler {
    pub fn new(signals: Arc<dyn SignalRepository>) -> Self {
        Self { signals }
    }

    /// Idempotent: a repeated acknowledgement keeps the first timestamp.
    pub async fn handle(
        &self,
        cmd: AcknowledgeNudgeCommand,
        metadata: CommandMetadata,
    ) -> Result<Nudge, DomainError> {
        let mut nudge = self
            .signals
            .find_nudge(&metadata.user_id, &cmd.nudge_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::NudgeNotFound, "Nudge not found")
                    .with_detail("nudge_id", cmd.nudge_id.to_string())
            })?;

        if nudge.acknowledge(metadata.now()) {
            self.signals.update_nudge(&nudge).await?;
            tracing::debug!(user_id = %metadata.user_id, nudge_id = %nudge.id, "nudge acknowledged");
        }

        Ok(nudge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySignalRepository;
    use crate::application::test_support::{at, metadata_at, monday, other_user, user};
    use crate::domain::foundation::DriftReportId;
    use crate::domain::signals::{NudgeLevel, NudgeSource};

    async fn seeded() -> (InMemorySignalRepository, NudgeId) {
        let signals = InMemorySignalRepository::new();
        let nudge = Nudge::new(
            user(),
            DriftReportId::new(),
            NudgeLevel::Gentle,
            "Back to it",
            NudgeSource::Template,
            at(monday(), 10, 0),
        )
        .unwrap();
        signals.save_nudge(&nudge).await.unwrap();
        (signals, nudge.id)
    }

    #[tokio::test]
    async fn acknowledges_once() {
        let (signals, nudge_id) = seeded().await;
        let handler = AcknowledgeNudgeHandler::new(Arc::new(signals.clone()));
        let cmd = AcknowledgeNudgeCommand { nudge_id };

        let first = handler.handle(cmd, metadata_at(at(monday(), 10, 2))).await.unwrap();
        let again = handler.handle(cmd, metadata_at(at(monday(), 10, 9))).await.unwrap();

        assert_eq!(first.acknowledged_at, Some(at(monday(), 10, 2)));
        assert_eq!(again.acknowledged_at, Some(at(monday(), 10, 2)));
        let stored = signals.find_nudge(&user(), &nudge_id).await.unwrap().unwrap();
        assert!(stored.is_acknowledged());
    }

    #[tokio::test]
    async fn unknown_or_foreign_nudge_is_not_found() {
        let (signals, nudge_id) = seeded().await;
        let handler = AcknowledgeNudgeHandler::new(Arc::new(signals));

        let err = handler
            .handle(
                AcknowledgeNudgeCommand {
                    nudge_id: NudgeId::new(),
                },
                metadata_at(at(monday(), 10, 2)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NudgeNotFound);

        let foreign = CommandMetadata::new(other_user()).issued_at(at(monday(), 10, 2));
        let err = handler
            .handle(AcknowledgeNudgeCommand { nudge_id }, foreign)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NudgeNotFound);
    }
}
