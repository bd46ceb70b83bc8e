//! RecordCheckInHandler - Stores a mood/energy/focus self-report.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, Rating};
use crate::domain::signals::CheckIn;
use crate::ports::SignalRepository;

/// Raw 1..=5 ratings as submitted.
#[derive(Debug, Clone)]
pub struct RecordCheckInCommand {
    pub mood: u8,
    pub energy: u8,
    pub focus: u8,
    pub note: Option<String>,
}

pub struct RecordCheckInHandler {
    signals: Arc<dyn SignalRepository>,
}

impl RecordCheckInHandler {
    pub fn new(signals: Arc<dyn SignalRepository>) -> Self {
        Self { signals }
    }

    pub async fn handle(
        &self,
        cmd: RecordCheckInCommand,
        metadata: CommandMetadata,
    ) -> Result<CheckIn, DomainError> {
        let check_in = CheckIn::new(
            metadata.user_id.clone(),
            metadata.now(),
            Rating::for_field("mood", cmd.mood)?,
            Rating::for_field("energy", cmd.energy)?,
            Rating::for_field("focus", cmd.focus)?,
            cmd.note,
        )?;

        self.signals.save_check_in(&check_in).await?;

        tracing::debug!(user_id = %metadata.user_id, check_in_id = %check_in.id, "check-in recorded");

        Ok(check_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySignalRepository;
    use crate::application::test_support::{at, metadata_at, monday, user};
    use crate::domain::foundation::{ErrorCode, TimeSpan};

    fn command(mood: u8, energy: u8, focus: u8) -> RecordCheckInCommand {
        RecordCheckInCommand {
            mood,
            energy,
            focus,
            note: Some("  slept badly ".to_string()),
        }
    }

    #[tokio::test]
    async fn records_check_in_at_command_time() {
        let signals = InMemorySignalRepository::new();
        let handler = RecordCheckInHandler::new(Arc::new(signals.clone()));
        let now = at(monday(), 9, 15);

        let check_in = handler.handle(command(3, 2, 4), metadata_at(now)).await.unwrap();

        assert_eq!(check_in.recorded_at, now);
        assert_eq!(check_in.energy.value(), 2);
        assert_eq!(check_in.note.as_deref(), Some("slept badly"));
        let day = TimeSpan::starting_at(*at(monday(), 0, 0).as_datetime(), 24 * 60).unwrap();
        assert_eq!(signals.check_ins_in(&user(), day).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn names_the_out_of_range_rating() {
        let handler = RecordCheckInHandler::new(Arc::new(InMemorySignalRepository::new()));

        let err = handler
            .handle(command(3, 6, 4), metadata_at(at(monday(), 9, 15)))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("energy"));
    }
}
