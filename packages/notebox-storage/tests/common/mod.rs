//! Behavior every [`NoteStore`] must share, run against each backend.

#![allow(dead_code)]

use uuid::Uuid;

use notebox_domain::{NoteDraft, NotePatch};
use notebox_storage::{Error, NoteStore};

pub fn draft(content: &str) -> NoteDraft {
	NoteDraft { content: content.to_string(), title: None }
}

pub fn patch(content: &str) -> NotePatch {
	NotePatch { content: Some(content.to_string()), title: None }
}

/// A scope no other test touches, so one store can serve every case.
pub fn fresh_scope(label: &str) -> String {
	format!("{label}-{}", Uuid::new_v4().simple())
}

pub async fn create_then_list_round_trips(store: &dyn NoteStore) {
	let alice = fresh_scope("alice");
	let created = store.create(&alice, draft("buy milk")).await.expect("Failed to create note.");

	assert_eq!(created.scope, alice);
	assert_eq!(created.content, "buy milk");
	assert!(created.created_at > 0);

	let listed = store.list(&alice).await.expect("Failed to list notes.");

	assert_eq!(listed, vec![created]);
}

pub async fn scopes_are_isolated(store: &dyn NoteStore) {
	let alice = fresh_scope("alice");
	let bob = fresh_scope("bob");
	let note = store.create(&alice, draft("secret")).await.expect("Failed to create note.");

	assert!(store.list(&bob).await.expect("Failed to list notes.").is_empty());

	let update = store.update(&bob, note.id, patch("hijacked")).await;

	assert!(matches!(update, Err(Error::NotFound(_))), "Unexpected update result: {update:?}");

	let delete = store.delete(&bob, note.id).await;

	assert!(matches!(delete, Err(Error::NotFound(_))), "Unexpected delete result: {delete:?}");

	let listed = store.list(&alice).await.expect("Failed to list notes.");

	assert_eq!(listed.len(), 1);
	assert_eq!(listed[0].content, "secret");
}

pub async fn update_changes_only_content(store: &dyn NoteStore) {
	let alice = fresh_scope("alice");
	let note = store.create(&alice, draft("buy milk")).await.expect("Failed to create note.");
	let updated =
		store.update(&alice, note.id, patch("buy oat milk")).await.expect("Failed to update.");

	assert_eq!(updated.id, note.id);
	assert_eq!(updated.scope, note.scope);
	assert_eq!(updated.created_at, note.created_at);
	assert_eq!(updated.title, note.title);
	assert_eq!(updated.content, "buy oat milk");

	if let (Some(before), Some(after)) = (note.updated_at, updated.updated_at) {
		assert!(after >= before);
	}

	let listed = store.list(&alice).await.expect("Failed to list notes.");

	assert_eq!(listed, vec![updated]);
}

pub async fn delete_twice_reports_not_found(store: &dyn NoteStore) {
	let alice = fresh_scope("alice");
	let note = store.create(&alice, draft("temp")).await.expect("Failed to create note.");

	store.delete(&alice, note.id).await.expect("Failed to delete note.");

	let second = store.delete(&alice, note.id).await;

	assert!(matches!(second, Err(Error::NotFound(_))), "Unexpected result: {second:?}");
	assert!(store.list(&alice).await.expect("Failed to list notes.").is_empty());
}

pub async fn unknown_ids_are_not_found(store: &dyn NoteStore) {
	let alice = fresh_scope("alice");
	let id = Uuid::new_v4();
	let update = store.update(&alice, id, patch("x")).await;
	let delete = store.delete(&alice, id).await;

	assert!(matches!(update, Err(Error::NotFound(_))));
	assert!(matches!(delete, Err(Error::NotFound(_))));
}

pub async fn list_is_newest_first(store: &dyn NoteStore) {
	let alice = fresh_scope("alice");
	for content in ["first", "second", "third"] {
		store.create(&alice, draft(content)).await.expect("Failed to create note.");
		tokio::time::sleep(std::time::Duration::from_millis(3)).await;
	}

	let listed = store.list(&alice).await.expect("Failed to list notes.");
	let contents: Vec<&str> = listed.iter().map(|note| note.content.as_str()).collect();

	assert_eq!(contents, vec!["third", "second", "first"]);
}

pub async fn run_contract(store: &dyn NoteStore) {
	create_then_list_round_trips(store).await;
	scopes_are_isolated(store).await;
	update_changes_only_content(store).await;
	delete_twice_reports_not_found(store).await;
	unknown_ids_are_not_found(store).await;
	list_is_newest_first(store).await;
}
