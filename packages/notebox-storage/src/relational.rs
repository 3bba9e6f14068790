//! Notes as rows of one Postgres table, isolated by a `scope` column.
//!
//! `update` and `delete` are single statements conditioned on both `id` and `scope`. No matching
//! row is the only not-found signal, so a note held by another scope looks exactly like a note
//! that never existed.

use sqlx::PgPool;
use uuid::Uuid;

use notebox_domain::{Note, NoteDraft, NotePatch, note, note_id};

use crate::{BoxFuture, Error, NoteStore, Result};

#[derive(Debug, sqlx::FromRow)]
struct NoteRow {
	id: Uuid,
	scope: String,
	title: String,
	content: String,
	created_at: i64,
}
impl From<NoteRow> for Note {
	fn from(row: NoteRow) -> Self {
		Self {
			id: row.id,
			scope: row.scope,
			title: Some(row.title),
			content: row.content,
			created_at: row.created_at,
			updated_at: None,
		}
	}
}

pub struct RelationalStore {
	pool: PgPool,
	default_title: String,
}
impl RelationalStore {
	pub fn new(pool: PgPool, default_title: &str) -> Self {
		Self { pool, default_title: default_title.to_string() }
	}

	async fn list_notes(&self, scope: &str) -> Result<Vec<Note>> {
		let rows: Vec<NoteRow> = sqlx::query_as(
			"\
SELECT id, scope, title, content, created_at
FROM notes
WHERE scope = $1
ORDER BY created_at DESC, id DESC",
		)
		.bind(scope)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.into_iter().map(Note::from).collect())
	}

	async fn create_note(&self, scope: &str, draft: NoteDraft) -> Result<Note> {
		let note = Note {
			id: note_id::generate(),
			scope: scope.to_string(),
			title: Some(draft.title.unwrap_or_else(|| self.default_title.clone())),
			content: draft.content,
			created_at: note::now_millis(),
			updated_at: None,
		};

		sqlx::query(
			"\
INSERT INTO notes (id, scope, title, content, created_at)
VALUES ($1, $2, $3, $4, $5)",
		)
		.bind(note.id)
		.bind(note.scope.as_str())
		.bind(note.title.as_deref())
		.bind(note.content.as_str())
		.bind(note.created_at)
		.execute(&self.pool)
		.await?;

		Ok(note)
	}

	async fn update_note(&self, scope: &str, id: Uuid, patch: NotePatch) -> Result<Note> {
		let row: Option<NoteRow> = sqlx::query_as(
			"\
UPDATE notes
SET
	content = COALESCE($1, content),
	title = COALESCE($2, title)
WHERE id = $3 AND scope = $4
RETURNING id, scope, title, content, created_at",
		)
		.bind(patch.content.as_deref())
		.bind(patch.title.as_deref())
		.bind(id)
		.bind(scope)
		.fetch_optional(&self.pool)
		.await?;

		row.map(Note::from).ok_or_else(|| not_found(id))
	}

	async fn delete_note(&self, scope: &str, id: Uuid) -> Result<()> {
		let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND scope = $2")
			.bind(id)
			.bind(scope)
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			return Err(not_found(id));
		}

		Ok(())
	}
}
impl NoteStore for RelationalStore {
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
