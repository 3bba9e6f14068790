use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub notes: Notes,
	#[serde(default)]
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
	/// Requests outside this prefix are handed to the static layer untouched.
	#[serde(default = "default_api_prefix")]
	pub api_prefix: String,
	/// Header carrying the caller's scope token. The value is trusted as-is.
	#[serde(default = "default_identity_header")]
	pub identity_header: String,
	pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
	Prefix,
	Relational,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub backend: Backend,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub kv: Kv,
	pub postgres: Option<Postgres>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Kv {
	/// Without a URL the prefix backend keeps notes in process memory.
	pub redis_url: Option<String>,
	pub namespace: String,
}
impl Default for Kv {
	fn default() -> Self {
		Self { redis_url: None, namespace: "notes".to_string() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Notes {
	pub default_title: String,
	/// Zero disables the limit.
	pub max_content_chars: u32,
}
impl Default for Notes {
	fn default() -> Self {
		Self { default_title: "Untitled".to_string(), max_content_chars: 10_000 }
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Security {
	pub bind_localhost_only: bool,
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_api_prefix() -> String {
	"/api".to_string()
}

fn default_identity_header() -> String {
	"x-user-id".to_string()
}

fn default_timeout_ms() -> u64 {
	5_000
}
