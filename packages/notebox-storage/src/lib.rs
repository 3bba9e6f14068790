//! Note persistence behind one capability, [`NoteStore`], with two interchangeable backends.
//!
//! [`prefix::PrefixStore`] keeps each note as a JSON blob in a key/value namespace and isolates
//! scopes by key prefix. [`relational::RelationalStore`] keeps notes in one Postgres table and
//! isolates scopes by conditioning every statement on `(id, scope)`.

pub mod db;
pub mod key;
pub mod kv;
pub mod prefix;
pub mod redis_kv;
pub mod relational;
pub mod schema;

mod error;

pub use error::Error;

use std::{future::Future, pin::Pin, sync::Arc};

use uuid::Uuid;

use notebox_config::{Backend, Config};
use notebox_domain::{Note, NoteDraft, NotePatch};

use crate::{
	db::Db,
	kv::{KvNamespace, MemoryKv},
	prefix::PrefixStore,
	redis_kv::RedisKv,
	relational::RelationalStore,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// CRUD over the notes owned by one scope.
///
/// `update` and `delete` report [`Error::NotFound`] both when the id never existed and when it
/// belongs to another scope. Callers cannot tell the two apart.
pub trait NoteStore
where
	Self: Send + Sync,
{
	/// All notes owned by `scope`, newest first.
	fn list<'a>(&'a self, scope: &'a str) -> BoxFuture<'a, Result<Vec<Note>>>;

	fn create<'a>(&'a self, scope: &'a str, draft: NoteDraft) -> BoxFuture<'a, Result<Note>>;

	fn update<'a>(
		&'a self,
		scope: &'a str,
		id: Uuid,
		patch: NotePatch,
	) -> BoxFuture<'a, Result<Note>>;

	fn delete<'a>(&'a self, scope: &'a str, id: Uuid) -> BoxFuture<'a, Result<()>>;
}

/// Builds the backend named by `storage.backend`.
pub async fn open(cfg: &Config) -> Result<Arc<dyn NoteStore>> {
	match cfg.storage.backend {
		Backend::Prefix => {
			let kv: Arc<dyn KvNamespace> = match cfg.storage.kv.redis_url.as_deref() {
				Some(url) => Arc::new(RedisKv::connect(url).await?),
				None => {
					tracing::warn!("storage.kv.redis_url is not set; notes live in process memory.");

					Arc::new(MemoryKv::default())
				},
			};

			Ok(Arc::new(PrefixStore::new(kv, &cfg.storage.kv.namespace)))
		},
		Backend::Relational => {
			let Some(postgres) = cfg.storage.postgres.as_ref() else {
				return Err(Error::InvalidArgument(
					"storage.postgres is required for the relational backend.".to_string(),
				));
			};
			let db = Db::connect(postgres).await?;

			db.ensure_schema().await?;

			Ok(Arc::new(RelationalStore::new(db.pool, &cfg.notes.default_title)))
		},
	}
}
