use axum::{
	Router,
	body,
	extract::{Request, State},
	http::StatusCode,
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use notebox_service::{ApiRequest, Dispatch, RequestBody, RouteVerdict, route};

use crate::{response, state::AppState};

/// Upper bound on buffered request bodies. Content length proper is checked by the codec.
const MAX_BODY_BYTES: usize = 1 << 20;

pub fn router(state: AppState) -> Router {
	let host = Router::new().route("/health", get(health));
	let host = match state.static_dir.as_ref() {
		Some(dir) => host.fallback_service(ServeDir::new(dir)),
		None => host.fallback(not_found),
	};

	host.layer(middleware::from_fn_with_state(state.clone(), notes_api))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn not_found() -> StatusCode {
	StatusCode::NOT_FOUND
}

/// Answers everything under the API prefix and hands the rest to the host router.
async fn notes_api(State(state): State<AppState>, req: Request, next: Next) -> Response {
	let service = &state.service;
	let method = req.method().clone();
	let path = req.uri().path().to_string();

	if route::resolve(service.api_prefix(), method.as_str(), &path) == RouteVerdict::PassThrough {
		return next.run(req).await;
	}

	let (parts, body) = req.into_parts();
	let read = body::to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| err.to_string());
	let body = match &read {
		Ok(bytes) => RequestBody::Bytes(bytes),
		Err(reason) => RequestBody::Unreadable { reason },
	};
	let identity = parts.headers.get(&state.identity_header).map(|value| value.as_bytes());
	let api_request = ApiRequest { method: method.as_str(), path: &path, identity, body };

	match service.dispatch(api_request).await {
		Dispatch::Handled(result) => response::render(result, &state.identity_header),
		Dispatch::PassThrough => not_found().await.into_response(),
	}
}
