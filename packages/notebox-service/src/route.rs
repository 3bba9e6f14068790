//! Maps a method and path onto a note action.
//!
//! Only two shapes exist under the API prefix: the collection `<prefix>/notes` and an item
//! `<prefix>/notes/<id>`. One trailing slash is tolerated on either.

use uuid::Uuid;

use notebox_domain::note_id;

const COLLECTION: &str = "/notes";
const COLLECTION_METHODS: &[&str] = &["GET", "POST"];
const ITEM_METHODS: &[&str] = &["PUT", "DELETE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	List,
	Create,
	Update,
	Delete,
}
impl Action {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::List => "list",
			Self::Create => "create",
			Self::Update => "update",
			Self::Delete => "delete",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteVerdict {
	/// Outside the API prefix. Not an error: the host serves it some other way.
	PassThrough,
	/// CORS preflight for any path under the prefix.
	Preflight,
	/// `id` is `None` when an id-bearing action was sent to the collection.
	Matched { action: Action, id: Option<Uuid> },
	MethodNotAllowed { allowed: &'static [&'static str] },
	NotFound,
}

pub fn resolve(api_prefix: &str, method: &str, path: &str) -> RouteVerdict {
	let Some(rest) = strip_api_prefix(api_prefix, path) else {
		return RouteVerdict::PassThrough;
	};

	if method == "OPTIONS" {
		return RouteVerdict::Preflight;
	}

	let rest = rest.strip_suffix('/').unwrap_or(rest);
	let Some(tail) = rest.strip_prefix(COLLECTION) else {
		return RouteVerdict::NotFound;
	};

	if tail.is_empty() {
		return match method {
			"GET" => RouteVerdict::Matched { action: Action::List, id: None },
			"POST" => RouteVerdict::Matched { action: Action::Create, id: None },
			"PUT" => RouteVerdict::Matched { action: Action::Update, id: None },
			"DELETE" => RouteVerdict::Matched { action: Action::Delete, id: None },
			_ => RouteVerdict::MethodNotAllowed { allowed: COLLECTION_METHODS },
		};
	}

	let Some(id) = tail.strip_prefix('/').and_then(note_id::parse) else {
		return RouteVerdict::NotFound;
	};

	match method {
		"PUT" => RouteVerdict::Matched { action: Action::Update, id: Some(id) },
		"DELETE" => RouteVerdict::Matched { action: Action::Delete, id: Some(id) },
		_ => RouteVerdict::MethodNotAllowed { allowed: ITEM_METHODS },
	}
}

fn strip_api_prefix<'a>(api_prefix: &str, path: &'a str) -> Option<&'a str> {
	let rest = path.strip_prefix(api_prefix)?;

	if rest.is_empty() || rest.starts_with('/') { Some(rest) } else { None }
}

#[cfg(test)]
mod tests {
	use super::*;

	const ID: &str = "3f2b8c1e-4d5a-4e6f-8a7b-9c0d1e2f3a4b";

	fn id() -> Uuid {
		Uuid::parse_str(ID).expect("Test id must parse.")
	}

	#[test]
	fn collection_verbs() {
		assert_eq!(
			resolve("/api", "GET", "/api/notes"),
			RouteVerdict::Matched { action: Action::List, id: None }
		);
		assert_eq!(
			resolve("/api", "POST", "/api/notes/"),
			RouteVerdict::Matched { action: Action::Create, id: None }
		);
		assert_eq!(
			resolve("/api", "PUT", "/api/notes"),
			RouteVerdict::Matched { action: Action::Update, id: None }
		);
		assert_eq!(
			resolve("/api", "PATCH", "/api/notes"),
			RouteVerdict::MethodNotAllowed { allowed: COLLECTION_METHODS }
		);
	}

	#[test]
	fn item_verbs() {
		let path = format!("/api/notes/{ID}");

		assert_eq!(
			resolve("/api", "PUT", &path),
			RouteVerdict::Matched { action: Action::Update, id: Some(id()) }
		);
		assert_eq!(
			resolve("/api", "DELETE", &format!("{path}/")),
			RouteVerdict::Matched { action: Action::Delete, id: Some(id()) }
		);
		assert_eq!(
			resolve("/api", "GET", &path),
			RouteVerdict::MethodNotAllowed { allowed: ITEM_METHODS }
		);
		assert_eq!(
			resolve("/api", "POST", &path),
			RouteVerdict::MethodNotAllowed { allowed: ITEM_METHODS }
		);
	}

	#[test]
	fn unknown_shapes_inside_prefix_are_not_found() {
		for path in [
			"/api",
			"/api/",
			"/api/note",
			"/api/notesx",
			"/api/notes//",
			"/api/notes/abc",
			"/api/notes/3f2b8c1e4d5a4e6f8a7b9c0d1e2f3a4b",
			&format!("/api/notes/{ID}/extra"),
		] {
			assert_eq!(resolve("/api", "DELETE", path), RouteVerdict::NotFound, "{path}");
		}
	}

	#[test]
	fn paths_outside_prefix_pass_through() {
		for path in ["/", "/index.html", "/apis/notes", "/assets/api/notes", "/notes"] {
			assert_eq!(resolve("/api", "GET", path), RouteVerdict::PassThrough, "{path}");
		}
	}

	#[test]
	fn options_under_prefix_is_preflight() {
		assert_eq!(resolve("/api", "OPTIONS", "/api/notes"), RouteVerdict::Preflight);
		assert_eq!(resolve("/api", "OPTIONS", "/elsewhere"), RouteVerdict::PassThrough);
	}

	#[test]
	fn nested_prefixes_work() {
		assert_eq!(
			resolve("/api/v1", "GET", "/api/v1/notes"),
			RouteVerdict::Matched { action: Action::List, id: None }
		);
		assert_eq!(resolve("/api/v1", "GET", "/api/notes"), RouteVerdict::PassThrough);
	}
}
