use notebox_domain::Note;

use crate::{Action, NoteService, Result};

impl NoteService {
	pub async fn list(&self, scope: &str) -> Result<Vec<Note>> {
		self.bounded(Action::List, self.store.list(scope)).await
	}
}
