use uuid::Uuid;

use crate::{Action, NoteService, Result};

impl NoteService {
	pub async fn delete(&self, scope: &str, id: Uuid) -> Result<()> {
		self.bounded(Action::Delete, self.store.delete(scope, id)).await?;

		tracing::debug!(note_id = %id, "Note deleted.");

		Ok(())
	}
}
