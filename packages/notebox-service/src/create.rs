use notebox_domain::{Note, NoteDraft};

use crate::{Action, NoteService, Result};

impl NoteService {
	pub async fn create(&self, scope: &str, draft: NoteDraft) -> Result<Note> {
		let note = self.bounded(Action::Create, self.store.create(scope, draft)).await?;

		tracing::debug!(note_id = %note.id, "Note created.");

		Ok(note)
	}
}
