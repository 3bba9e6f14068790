//! Request dispatch for the notes API: routing, identity, body validation, and bounded calls into
//! the configured [`NoteStore`].

pub mod dispatch;
pub mod identity;
pub mod route;

mod create;
mod delete;
mod error;
mod list;
mod update;

pub use dispatch::{ApiRequest, Dispatch, Outcome, RequestBody};
pub use error::{Error, Result};
pub use route::{Action, RouteVerdict};

use std::{future::Future, sync::Arc, time::Duration};

use notebox_config::Config;
use notebox_storage::NoteStore;

pub struct NoteService {
	pub store: Arc<dyn NoteStore>,
	api_prefix: String,
	timeout: Duration,
	max_content_chars: u32,
}
impl NoteService {
	pub fn new(cfg: &Config, store: Arc<dyn NoteStore>) -> Self {
		Self {
			store,
			api_prefix: cfg.service.api_prefix.clone(),
			timeout: Duration::from_millis(cfg.storage.timeout_ms),
			max_content_chars: cfg.notes.max_content_chars,
		}
	}

	pub fn api_prefix(&self) -> &str {
		&self.api_prefix
	}

	/// Runs one backend call under the configured timeout. Nothing is retried.
	async fn bounded<T, F>(&self, action: Action, call: F) -> Result<T>
	where
		F: Future<Output = notebox_storage::Result<T>>,
	{
		match tokio::time::timeout(self.timeout, call).await {
			Ok(Ok(value)) => Ok(value),
			Ok(Err(notebox_storage::Error::NotFound(message))) => Err(Error::NotFound { message }),
			Ok(Err(err)) => {
				tracing::error!(
					action = action.as_str(),
					error = %err,
					"Storage backend call failed."
				);

				Err(Error::Backend { message: err.to_string() })
			},
			Err(_) => {
				tracing::error!(
					action = action.as_str(),
					timeout_ms = self.timeout.as_millis() as u64,
					"Storage backend call timed out."
				);

				Err(Error::Backend {
					message: format!("{} timed out after {:?}.", action.as_str(), self.timeout),
				})
			},
		}
	}
}
