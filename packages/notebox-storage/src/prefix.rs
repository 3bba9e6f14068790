//! Notes as JSON blobs in a [`KvNamespace`], isolated by key prefix.
//!
//! Every operation is a sequence of independent key/value calls, none of them transactional:
//!
//! - `list` scans the scope prefix, then fetches each note separately. A note created or deleted
//!   during the scan may or may not appear.
//! - `update` reads the stored blob, merges the patch and writes the whole blob back. There is no
//!   compare-and-set, so of two concurrent updates to one note the later write wins and the
//!   earlier one is lost.
//!
//! This backend has no title field. A supplied title is dropped, and `updated_at` is stamped on
//! create and on every update.

use std::sync::Arc;

use uuid::Uuid;

use notebox_domain::{Note, NoteDraft, NotePatch, codec, note, note_id};

use crate::{BoxFuture, Error, NoteStore, Result, key::KeyScheme, kv::KvNamespace};

pub struct PrefixStore {
	kv: Arc<dyn KvNamespace>,
	keys: KeyScheme,
}
impl PrefixStore {
	pub fn new(kv: Arc<dyn KvNamespace>, namespace: &str) -> Self {
		Self { kv, keys: KeyScheme::new(namespace) }
	}

	async fn list_notes(&self, scope: &str) -> Result<Vec<Note>> {
		let prefix = self.keys.scope_prefix(scope);
		let keys = self.kv.list_keys(&prefix).await?;
		let mut notes = Vec::with_capacity(keys.len());

		for key in keys {
			let Some(id) = self.keys.note_id_under(&prefix, &key) else {
				continue;
			};
			// Removed between the scan and this fetch.
			let Some(raw) = self.kv.get(&key).await? else {
				continue;
			};
			let note = codec::decode_stored(&raw)?;

			if note.id != id || note.scope != scope {
				tracing::warn!(%key, "Skipping stored note whose body does not match its key.");

				continue;
			}

			notes.push(note);
		}

		note::sort_newest_first(&mut notes);

		Ok(notes)
	}

	async fn create_note(&self, scope: &str, draft: NoteDraft) -> Result<Note> {
		let now = note::now_millis();
		let note = Note {
			id: note_id::generate(),
			scope: scope.to_string(),
			title: None,
			content: draft.content,
			created_at: now,
			updated_at: Some(now),
		};
		let key = self.keys.note_key(scope, note.id);

		self.kv.put(&key, codec::encode_stored(&note)?).await?;

		Ok(note)
	}

	async fn update_note(&self, scope: &str, id: Uuid, patch: NotePatch) -> Result<Note> {
		let key = self.keys.note_key(scope, id);
		let mut note = self.load_owned(&key, scope, id).await?;

		if let Some(content) = patch.content {
			note.content = content;
		}

		note.updated_at = Some(note::now_millis());

		self.kv.put(&key, codec::encode_stored(&note)?).await?;

		Ok(note)
	}

	async fn delete_note(&self, scope: &str, id: Uuid) -> Result<()> {
		let key = self.keys.note_key(scope, id);

		self.load_owned(&key, scope, id).await?;

		if !self.kv.delete(&key).await? {
			return Err(not_found(id));
		}

		Ok(())
	}

	async fn load_owned(&self, key: &str, scope: &str, id: Uuid) -> Result<Note> {
		let raw = self.kv.get(key).await?.ok_or_else(|| not_found(id))?;
		let note = codec::decode_stored(&raw)?;

		if note.id != id || note.scope != scope {
			return Err(not_found(id));
		}

		Ok(note)
	}
}
impl NoteStore for PrefixStore {
	fn list<'a>(&'a self, scope: &'a str) -> BoxFuture<'a, Result<Vec<Note>>> {
		Box::pin(self.list_notes(scope))
	}

	fn create<'a>(&'a self, scope: &'a str, draft: NoteDraft) -> BoxFuture<'a, Result<Note>> {
		Box::pin(self.create_note(scope, draft))
	}

	fn update<'a>(
		&'a self,
		scope: &'a str,
		id: Uuid,
		patch: NotePatch,
	) -> BoxFuture<'a, Result<Note>> {
		Box::pin(self.update_note(scope, id, patch))
	}

	fn delete<'a>(&'a self, scope: &'a str, id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.delete_note(scope, id))
	}
}

fn not_found(id: Uuid) -> Error {
	Error::NotFound(format!("Note {id} not found."))
}
