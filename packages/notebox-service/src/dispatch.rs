//! One request in, one outcome out.
//!
//! Checks run in a fixed order so that nothing reaches the backend unless the caller is
//! identified and the request is well formed: route, identity, route verdict, missing id, body.
//! A body the host could not read is reported at the body step, never before identity.

use uuid::Uuid;

use notebox_domain::{Note, codec};

use crate::{Action, Error, NoteService, Result, RouteVerdict, identity, route};

#[derive(Debug, Clone, Copy)]
pub struct ApiRequest<'a> {
	pub method: &'a str,
	pub path: &'a str,
	/// Raw value of the identity header, if present.
	pub identity: Option<&'a [u8]>,
	pub body: RequestBody<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum RequestBody<'a> {
	Bytes(&'a [u8]),
	/// The host failed to buffer the body, e.g. because it exceeded the size cap.
	Unreadable { reason: &'a str },
}
impl<'a> RequestBody<'a> {
	fn bytes(self) -> Result<&'a [u8]> {
		match self {
			Self::Bytes(bytes) => Ok(bytes),
			Self::Unreadable { reason } => Err(Error::Validation {
				field: Some("$"),
				message: format!("Request body could not be read: {reason}."),
			}),
		}
	}
}

#[derive(Debug)]
pub enum Dispatch {
	/// The path is outside the API prefix and belongs to the host's static layer.
	PassThrough,
	Handled(Result<Outcome>),
}

#[derive(Debug)]
pub enum Outcome {
	Listed(Vec<Note>),
	Created(Note),
	Updated(Note),
	Deleted(Uuid),
	Preflight,
}

impl NoteService {
	pub async fn dispatch(&self, req: ApiRequest<'_>) -> Dispatch {
		match route::resolve(&self.api_prefix, req.method, req.path) {
			RouteVerdict::PassThrough => Dispatch::PassThrough,
			RouteVerdict::Preflight => Dispatch::Handled(Ok(Outcome::Preflight)),
			verdict => Dispatch::Handled(self.handle(verdict, req).await),
		}
	}

	async fn handle(&self, verdict: RouteVerdict, req: ApiRequest<'_>) -> Result<Outcome> {
		let scope = identity::resolve_scope(req.identity)?;

		match verdict {
			RouteVerdict::Matched { action, id } =>
				self.execute(&scope, action, id, req.body).await,
			RouteVerdict::MethodNotAllowed { allowed } =>
				Err(Error::MethodNotAllowed { method: req.method.to_string(), allowed }),
			RouteVerdict::NotFound | RouteVerdict::PassThrough | RouteVerdict::Preflight =>
				Err(Error::NotFound { message: format!("No route for {}.", req.path) }),
		}
	}

	async fn execute(
		&self,
		scope: &str,
		action: Action,
		id: Option<Uuid>,
		body: RequestBody<'_>,
	) -> Result<Outcome> {
		match action {
			Action::List => Ok(Outcome::Listed(self.list(scope).await?)),
			Action::Create => {
				let draft = codec::decode_body(body.bytes()?, self.max_content_chars)?;

				Ok(Outcome::Created(self.create(scope, draft).await?))
			},
			Action::Update => {
				let id = require_id(id)?;
				let draft = codec::decode_body(body.bytes()?, self.max_content_chars)?;

				Ok(Outcome::Updated(self.update(scope, id, draft.into()).await?))
			},
			Action::Delete => {
				let id = require_id(id)?;

				self.delete(scope, id).await?;

				Ok(Outcome::Deleted(id))
			},
		}
	}
}

fn require_id(id: Option<Uuid>) -> Result<Uuid> {
	id.ok_or_else(|| Error::Validation {
		field: Some("id"),
		message: "Note id is required.".to_string(),
	})
}
