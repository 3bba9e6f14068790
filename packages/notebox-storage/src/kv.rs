use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::{BoxFuture, Result};

/// A flat string key/value namespace with prefix listing.
///
/// Implementations make no promise that `list_keys` is consistent with concurrent writes.
pub trait KvNamespace
where
	Self: Send + Sync,
{
	/// Keys starting with `prefix`, in ascending order, without duplicates.
	fn list_keys<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>>>;

	fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>>>;

	fn put<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<()>>;

	/// Returns whether a value was removed.
	fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<bool>>;
}

/// Process-local namespace, used by tests and single-node setups without Redis.
#[derive(Debug, Default)]
pub struct MemoryKv {
	entries: RwLock<BTreeMap<String, String>>,
}
impl MemoryKv {
	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}
}
impl KvNamespace for MemoryKv {
	fn list_keys<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			let entries = self.entries.read().await;

			Ok(entries
				.range(prefix.to_string()..)
				.map(|(key, _)| key)
				.take_while(|key| key.starts_with(prefix))
				.cloned()
				.collect())
		})
	}

	fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async move { Ok(self.entries.read().await.get(key).cloned()) })
	}

	fn put<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.entries.write().await.insert(key.to_string(), value);

			Ok(())
		})
	}

	fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(self.entries.write().await.remove(key).is_some()) })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn lists_only_keys_under_prefix_in_order() {
		let kv = MemoryKv::default();

		for key in ["notes:b:2", "notes:a:1", "notes:b:1", "notes:bb:1", "other:b:1"] {
			kv.put(key, "{}".to_string()).await.expect("Failed to put key.");
		}

		let keys = kv.list_keys("notes:b:").await.expect("Failed to list keys.");

		assert_eq!(keys, vec!["notes:b:1".to_string(), "notes:b:2".to_string()]);
	}

	#[tokio::test]
	async fn delete_reports_whether_a_value_existed() {
		let kv = MemoryKv::default();

		kv.put("k", "v".to_string()).await.expect("Failed to put key.");

		assert!(kv.delete("k").await.expect("Failed to delete key."));
		assert!(!kv.delete("k").await.expect("Failed to delete key."));
		assert!(kv.is_empty().await);
	}
}
