//! Renders dispatch outcomes as JSON responses.
//!
//! Every response produced here carries `Access-Control-Allow-Origin: *`.

use axum::{
	Json,
	http::{HeaderName, HeaderValue, StatusCode, header},
	response::{IntoResponse, Response},
};
use serde::Serialize;

use notebox_domain::NoteView;
use notebox_service::{Error, Outcome};

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const PREFLIGHT_MAX_AGE_SECS: &str = "86400";

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: &'static str,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	fields: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct DeletedBody {
	success: bool,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
	fields: Option<Vec<String>>,
	allow: Option<String>,
}
impl ApiError {
	fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
		Self { status, error_code, message: message.into(), fields: None, allow: None }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::Unauthenticated =>
				Self::new(StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", err.to_string()),
			Error::Validation { field, message } => Self {
				fields: field.map(|field| vec![field.to_string()]),
				..Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message)
			},
			Error::NotFound { message } => Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message),
			Error::MethodNotAllowed { method, allowed } => Self {
				allow: Some(allowed.join(", ")),
				..Self::new(
					StatusCode::METHOD_NOT_ALLOWED,
					"METHOD_NOT_ALLOWED",
					format!("Method {method} is not allowed here."),
				)
			},
			// The cause was logged where the backend call failed.
			Error::Backend { .. } => Self::new(
				StatusCode::INTERNAL_SERVER_ERROR,
				"INTERNAL_ERROR",
				"Internal server error.",
			),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };
		let mut response = (self.status, Json(body)).into_response();

		if let Some(allow) = self.allow
			&& let Ok(value) = HeaderValue::from_str(&allow)
		{
			response.headers_mut().insert(header::ALLOW, value);
		}

		with_cors(response)
	}
}

/// Builds the response for one handled API request.
pub fn render(result: notebox_service::Result<Outcome>, identity_header: &HeaderName) -> Response {
	match result {
		Ok(outcome) => render_outcome(outcome, identity_header),
		Err(err) => ApiError::from(err).into_response(),
	}
}

fn render_outcome(outcome: Outcome, identity_header: &HeaderName) -> Response {
	let response = match outcome {
		Outcome::Listed(notes) => {
			let views = notes.iter().map(|note| note.view()).collect::<Vec<NoteView<'_>>>();

			(StatusCode::OK, Json(views)).into_response()
		},
		Outcome::Created(note) => (StatusCode::CREATED, Json(note.view())).into_response(),
		Outcome::Updated(note) => (StatusCode::OK, Json(note.view())).into_response(),
		Outcome::Deleted(_) =>
			(StatusCode::OK, Json(DeletedBody { success: true })).into_response(),
		Outcome::Preflight => preflight(identity_header),
	};

	with_cors(response)
}

fn preflight(identity_header: &HeaderName) -> Response {
	let allow_headers = format!("content-type, {identity_header}");
	let mut response = StatusCode::NO_CONTENT.into_response();
	let headers = response.headers_mut();

	headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
	headers
		.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(PREFLIGHT_MAX_AGE_SECS));
	headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

	if let Ok(value) = HeaderValue::from_str(&allow_headers) {
		headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
	}

	response
}

fn with_cors(mut response: Response) -> Response {
	response
		.headers_mut()
		.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

	response
}
