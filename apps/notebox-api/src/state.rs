use std::{path::PathBuf, sync::Arc};

use axum::http::HeaderName;

use notebox_config::Config;
use notebox_service::NoteService;
use notebox_storage::NoteStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NoteService>,
	pub identity_header: HeaderName,
	/// Served for requests outside the API prefix. `None` answers them with 404.
	pub static_dir: Option<PathBuf>,
}
impl AppState {
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let store = notebox_storage::open(&config).await?;

		tracing::info!(backend = ?config.storage.backend, "Storage backend ready.");

		Self::from_store(&config, store)
	}

	pub fn from_store(config: &Config, store: Arc<dyn NoteStore>) -> color_eyre::Result<Self> {
		let identity_header = HeaderName::from_bytes(config.service.identity_header.as_bytes())?;

		Ok(Self {
			service: Arc::new(NoteService::new(config, store)),
			identity_header,
			static_dir: config.service.static_dir.as_ref().map(PathBuf::from),
		})
	}
}
