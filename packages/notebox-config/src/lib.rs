mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Backend, Config, Kv, Notes, Postgres, Security, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let http_addr: SocketAddr = cfg
		.service
		.http_bind
		.parse()
		.map_err(|_| Error::validation("service.http_bind", "must be a socket address."))?;

	if cfg.security.bind_localhost_only && !http_addr.ip().is_loopback() {
		return Err(Error::validation(
			"service.http_bind",
			"must be a loopback address when security.bind_localhost_only is true.",
		));
	}

	validate_api_prefix(&cfg.service.api_prefix)?;

	if !is_header_name(&cfg.service.identity_header) {
		return Err(Error::validation(
			"service.identity_header",
			"must be a non-empty lowercase HTTP header name.",
		));
	}
	if cfg.storage.timeout_ms == 0 {
		return Err(Error::validation("storage.timeout_ms", "must be greater than zero."));
	}
	if cfg.storage.kv.namespace.is_empty() || cfg.storage.kv.namespace.contains(':') {
		return Err(Error::validation(
			"storage.kv.namespace",
			"must be non-empty and contain no ':'.",
		));
	}

	match cfg.storage.backend {
		Backend::Relational => {
			let Some(postgres) = cfg.storage.postgres.as_ref() else {
				return Err(Error::validation(
					"storage.postgres",
					"is required when storage.backend is relational.",
				));
			};

			if postgres.dsn.trim().is_empty() {
				return Err(Error::validation("storage.postgres.dsn", "must be non-empty."));
			}
			if postgres.pool_max_conns == 0 {
				return Err(Error::validation(
					"storage.postgres.pool_max_conns",
					"must be greater than zero.",
				));
			}
		},
		Backend::Prefix =>
			if let Some(url) = cfg.storage.kv.redis_url.as_deref()
				&& !url.starts_with("redis://")
				&& !url.starts_with("rediss://")
			{
				return Err(Error::validation(
					"storage.kv.redis_url",
					"must use the redis:// or rediss:// scheme.",
				));
			},
	}

	if cfg.notes.default_title.trim().is_empty() {
		return Err(Error::validation("notes.default_title", "must be non-empty."));
	}

	Ok(())
}

fn validate_api_prefix(prefix: &str) -> Result<()> {
	if !prefix.starts_with('/') || prefix.len() < 2 {
		return Err(Error::validation(
			"service.api_prefix",
			"must start with '/' and name at least one segment.",
		));
	}
	if prefix.ends_with('/') {
		return Err(Error::validation("service.api_prefix", "must not end with '/'."));
	}
	if prefix.split('/').skip(1).any(str::is_empty) {
		return Err(Error::validation("service.api_prefix", "must not contain empty segments."));
	}

	Ok(())
}

fn is_header_name(name: &str) -> bool {
	!name.is_empty()
		&& name
			.bytes()
			.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

fn normalize(cfg: &mut Config) {
	cfg.service.identity_header = cfg.service.identity_header.trim().to_ascii_lowercase();

	if cfg.service.static_dir.as_deref().map(|dir| dir.trim().is_empty()).unwrap_or(false) {
		cfg.service.static_dir = None;
	}
	if cfg.storage.kv.redis_url.as_deref().map(|url| url.trim().is_empty()).unwrap_or(false) {
		cfg.storage.kv.redis_url = None;
	}
}
