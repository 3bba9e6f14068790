use uuid::Uuid;

use notebox_domain::note_id;

const SEPARATOR: char = ':';

/// Key layout of the prefix backend: `<namespace>:<scope>:<id>`.
///
/// Scopes are opaque and may themselves contain the separator, so a key only belongs to a scope
/// when the text after that scope's prefix is exactly one canonical note id.
#[derive(Debug, Clone)]
pub struct KeyScheme {
	namespace: String,
}
impl KeyScheme {
	pub fn new(namespace: impl Into<String>) -> Self {
		Self { namespace: namespace.into() }
	}

	pub fn scope_prefix(&self, scope: &str) -> String {
		format!("{}{SEPARATOR}{scope}{SEPARATOR}", self.namespace)
	}

	pub fn note_key(&self, scope: &str, id: Uuid) -> String {
		format!("{}{id}", self.scope_prefix(scope))
	}

	/// The note id encoded in `key`, if `key` sits directly under `scope_prefix`.
	pub fn note_id_under(&self, scope_prefix: &str, key: &str) -> Option<Uuid> {
		key.strip_prefix(scope_prefix).and_then(note_id::parse)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keys_compose_namespace_scope_and_id() {
		let keys = KeyScheme::new("notes");
		let id = Uuid::from_u128(0xabc);

		assert_eq!(keys.scope_prefix("alice"), "notes:alice:");
		assert_eq!(keys.note_key("alice", id), format!("notes:alice:{id}"));
	}

	#[test]
	fn nested_scope_keys_do_not_belong_to_the_outer_scope() {
		let keys = KeyScheme::new("notes");
		let id = Uuid::from_u128(1);
		let outer = keys.scope_prefix("a");
		let nested = keys.note_key("a:b", id);

		assert!(nested.starts_with(&outer));
		assert_eq!(keys.note_id_under(&outer, &nested), None);
		assert_eq!(keys.note_id_under(&keys.scope_prefix("a:b"), &nested), Some(id));
	}

	#[test]
	fn foreign_keys_are_ignored() {
		let keys = KeyScheme::new("notes");
		let prefix = keys.scope_prefix("alice");

		assert_eq!(keys.note_id_under(&prefix, "notes:alice:not-a-uuid"), None);
		assert_eq!(
			keys.note_id_under(&prefix, "other:alice:00000000-0000-0000-0000-000000000001"),
			None
		);
	}
}
