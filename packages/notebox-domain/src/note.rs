use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A note as held by a storage backend.
///
/// `title` exists only in the relational backend and `updated_at` only in the key/value backend.
/// Each backend leaves the field it does not model as `None`, and both are omitted from JSON when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
	pub id: Uuid,
	pub scope: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	pub content: String,
	pub created_at: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<i64>,
}
impl Note {
	pub fn view(&self) -> NoteView<'_> {
		NoteView {
			id: self.id,
			title: self.title.as_deref(),
			content: &self.content,
			created_at: self.created_at,
			updated_at: self.updated_at,
		}
	}
}

/// Wire form of a note. The scope is never echoed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView<'a> {
	pub id: Uuid,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<&'a str>,
	pub content: &'a str,
	pub created_at: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<i64>,
}

/// Validated fields for a new note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
	pub content: String,
	pub title: Option<String>,
}

/// Fields to merge into an existing note. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
	pub content: Option<String>,
	pub title: Option<String>,
}
impl From<NoteDraft> for NotePatch {
	fn from(draft: NoteDraft) -> Self {
		Self { content: Some(draft.content), title: draft.title }
	}
}

pub fn now_millis() -> i64 {
	(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Orders notes newest first, breaking `created_at` ties by id so listings are deterministic.
pub fn sort_newest_first(notes: &mut [Note]) {
	notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

#[cfg(test)]
mod tests {
	use super::*;

	fn note(created_at: i64, id: u128) -> Note {
		Note {
			id: Uuid::from_u128(id),
			scope: "alice".to_string(),
			title: None,
			content: "x".to_string(),
			created_at,
			updated_at: Some(created_at),
		}
	}

	#[test]
	fn view_omits_scope_and_absent_fields() {
		let mut stored = note(1_700_000_000_000, 1);

		stored.updated_at = None;

		let json = serde_json::to_value(stored.view()).expect("Failed to encode view.");

		assert_eq!(
			json,
			serde_json::json!({
				"id": "00000000-0000-0000-0000-000000000001",
				"content": "x",
				"createdAt": 1_700_000_000_000_i64,
			})
		);
	}

	#[test]
	fn sorts_newest_first_with_id_tie_break() {
		let mut notes = vec![note(1, 1), note(3, 2), note(3, 5), note(2, 9)];

		sort_newest_first(&mut notes);

		let order: Vec<u128> = notes.iter().map(|note| note.id.as_u128()).collect();

		assert_eq!(order, vec![5, 2, 9, 1]);
	}

	#[test]
	fn now_millis_is_epoch_milliseconds() {
		let now = now_millis();

		// 2020-01-01 and 2100-01-01 in milliseconds.
		assert!(now > 1_577_836_800_000 && now < 4_102_444_800_000);
	}
}
