use serde_json::{Map, Value};

use crate::note::{Note, NoteDraft};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
	#[error("{field} {reason}")]
	InvalidBody { field: &'static str, reason: String },
	#[error("Stored note is malformed: {0}")]
	MalformedStored(#[from] serde_json::Error),
}
impl CodecError {
	pub fn field(&self) -> Option<&'static str> {
		match self {
			Self::InvalidBody { field, .. } => Some(*field),
			Self::MalformedStored(_) => None,
		}
	}

	fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
		Self::InvalidBody { field, reason: reason.into() }
	}
}

/// Decodes a create or update request body.
///
/// The body must be a JSON object with a non-empty `content` string. `title` may be a string or
/// null; an empty title counts as absent. Unknown fields are ignored. A `max_content_chars` of
/// zero disables the length check.
pub fn decode_body(body: &[u8], max_content_chars: u32) -> Result<NoteDraft, CodecError> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Err(CodecError::invalid("$", "must be a JSON object."));
	}

	let value: Value = serde_json::from_slice(body)
		.map_err(|err| CodecError::invalid("$", format!("is not valid JSON: {err}.")))?;
	let Value::Object(mut object) = value else {
		return Err(CodecError::invalid("$", "must be a JSON object."));
	};
	let content = take_content(&mut object, max_content_chars)?;
	let title = take_title(&mut object)?;

	Ok(NoteDraft { content, title })
}

pub fn encode_stored(note: &Note) -> Result<String, CodecError> {
	Ok(serde_json::to_string(note)?)
}

pub fn decode_stored(raw: &str) -> Result<Note, CodecError> {
	Ok(serde_json::from_str(raw)?)
}

fn take_content(
	object: &mut Map<String, Value>,
	max_content_chars: u32,
) -> Result<String, CodecError> {
	let content = match object.remove("content") {
		Some(Value::String(content)) => content,
		Some(_) => return Err(CodecError::invalid("$.content", "must be a string.")),
		None => return Err(CodecError::invalid("$.content", "is required.")),
	};

	if content.trim().is_empty() {
		return Err(CodecError::invalid("$.content", "must be non-empty."));
	}
	if max_content_chars > 0 && content.chars().count() > max_content_chars as usize {
		return Err(CodecError::invalid(
			"$.content",
			format!("must be at most {max_content_chars} characters."),
		));
	}

	Ok(content)
}

fn take_title(object: &mut Map<String, Value>) -> Result<Option<String>, CodecError> {
	match object.remove("title") {
		Some(Value::String(title)) if title.trim().is_empty() => Ok(None),
		Some(Value::String(title)) => Ok(Some(title)),
		Some(Value::Null) | None => Ok(None),
		Some(_) => Err(CodecError::invalid("$.title", "must be a string.")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn decode(body: &str) -> Result<NoteDraft, CodecError> {
		decode_body(body.as_bytes(), 16)
	}

	fn rejected_field(body: &str) -> &'static str {
		decode(body).expect_err("Expected body to be rejected.").field().unwrap_or("<none>")
	}

	#[test]
	fn decodes_content_and_optional_title() {
		let draft = decode(r#"{"content":"buy milk","title":"Errands","extra":1}"#)
			.expect("Expected body to decode.");

		assert_eq!(draft.content, "buy milk");
		assert_eq!(draft.title.as_deref(), Some("Errands"));
	}

	#[test]
	fn empty_or_null_title_counts_as_absent() {
		for body in [
			r#"{"content":"a"}"#,
			r#"{"content":"a","title":""}"#,
			r#"{"content":"a","title":"   "}"#,
			r#"{"content":"a","title":null}"#,
		] {
			let draft = decode(body).expect("Expected body to decode.");

			assert_eq!(draft.title, None, "Unexpected title for {body}.");
		}
	}

	#[test]
	fn rejects_bodies_without_usable_content() {
		assert_eq!(rejected_field(""), "$");
		assert_eq!(rejected_field("not json"), "$");
		assert_eq!(rejected_field("[1,2]"), "$");
		assert_eq!(rejected_field("{}"), "$.content");
		assert_eq!(rejected_field(r#"{"content":42}"#), "$.content");
		assert_eq!(rejected_field(r#"{"content":"  "}"#), "$.content");
		assert_eq!(rejected_field(r#"{"content":"a","title":7}"#), "$.title");
	}

	#[test]
	fn enforces_content_length_in_characters() {
		assert!(decode(r#"{"content":"ééééééééééééééééé"}"#).is_err());
		assert!(decode(r#"{"content":"éééééééééééééééé"}"#).is_ok());
		assert!(decode_body(r#"{"content":"no limit applies here at all"}"#.as_bytes(), 0).is_ok());
	}

	#[test]
	fn stored_form_keeps_scope() {
		let note = Note {
			id: uuid::Uuid::from_u128(7),
			scope: "alice".to_string(),
			title: None,
			content: "hello".to_string(),
			created_at: 10,
			updated_at: Some(11),
		};
		let raw = encode_stored(&note).expect("Failed to encode note.");

		assert!(raw.contains(r#""scope":"alice""#));
		assert_eq!(decode_stored(&raw).expect("Failed to decode note."), note);
	}

	#[test]
	fn malformed_stored_value_is_reported() {
		let err = decode_stored(r#"{"id":"nope"}"#).expect_err("Expected decode failure.");

		assert!(matches!(err, CodecError::MalformedStored(_)));
	}
}
