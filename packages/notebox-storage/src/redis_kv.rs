use redis::{AsyncCommands, aio::ConnectionManager};

use crate::{BoxFuture, Result, kv::KvNamespace};

const SCAN_BATCH: u32 = 200;

/// [`KvNamespace`] over a Redis keyspace.
///
/// Prefix listing walks `SCAN` with a `MATCH` pattern, so it is not a snapshot: keys written or
/// removed during the walk may or may not be reported.
#[derive(Clone)]
pub struct RedisKv {
	conn: ConnectionManager,
}
impl RedisKv {
	pub async fn connect(url: &str) -> Result<Self> {
		let client = redis::Client::open(url)?;
		let conn = ConnectionManager::new(client).await?;

		Ok(Self { conn })
	}

	async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>> {
		let pattern = format!("{}*", escape_glob(prefix));
		let mut conn = self.conn.clone();
		let mut cursor: u64 = 0;
		let mut keys = Vec::new();

		loop {
			let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
				.arg(cursor)
				.arg("MATCH")
				.arg(&pattern)
				.arg("COUNT")
				.arg(SCAN_BATCH)
				.query_async(&mut conn)
				.await?;

			keys.extend(batch.into_iter().filter(|key| key.starts_with(prefix)));

			if next == 0 {
				break;
			}

			cursor = next;
		}

		// SCAN may report a key more than once.
		keys.sort();
		keys.dedup();

		Ok(keys)
	}
}
impl KvNamespace for RedisKv {
	fn list_keys<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(self.scan_prefix(prefix))
	}

	fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async move {
			let mut conn = self.conn.clone();
			let value: Option<String> = conn.get(key).await?;

			Ok(value)
		})
	}

	fn put<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut conn = self.conn.clone();

			conn.set::<_, _, ()>(key, value).await?;

			Ok(())
		})
	}

	fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			let mut conn = self.conn.clone();
			let removed: u64 = conn.del(key).await?;

			Ok(removed > 0)
		})
	}
}

/// Escapes Redis glob metacharacters so a scope is matched literally.
pub fn escape_glob(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}
