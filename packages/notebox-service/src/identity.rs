//! The caller's scope comes from a single request header and is trusted as-is.
//!
//! Nothing here authenticates the value. Any non-blank string is accepted and becomes the scope
//! verbatim.

use crate::{Error, Result};

pub fn resolve_scope(raw: Option<&[u8]>) -> Result<String> {
	let Some(raw) = raw else {
		return Err(Error::Unauthenticated);
	};
	let Ok(value) = std::str::from_utf8(raw) else {
		return Err(Error::Unauthenticated);
	};

	if value.trim().is_empty() {
		return Err(Error::Unauthenticated);
	}

	Ok(value.to_string())
}
