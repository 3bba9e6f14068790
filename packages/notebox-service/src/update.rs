use uuid::Uuid;

use notebox_domain::{Note, NotePatch};

use crate::{Action, NoteService, Result};

impl NoteService {
	/// Last write wins. A note owned by another scope is reported as not found.
	pub async fn update(&self, scope: &str, id: Uuid, patch: NotePatch) -> Result<Note> {
		let note = self.bounded(Action::Update, self.store.update(scope, id, patch)).await?;

		tracing::debug!(note_id = %note.id, "Note updated.");

		Ok(note)
	}
}
