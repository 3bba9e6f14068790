use notebox_domain::CodecError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Missing or empty identity header.")]
	Unauthenticated,
	#[error("Invalid request: {message}")]
	Validation { field: Option<&'static str>, message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Method {method} is not allowed.")]
	MethodNotAllowed { method: String, allowed: &'static [&'static str] },
	#[error("Backend error: {message}")]
	Backend { message: String },
}
impl From<CodecError> for Error {
	fn from(err: CodecError) -> Self {
		match err.field() {
			Some(field) => Self::Validation { field: Some(field), message: err.to_string() },
			None => Self::Backend { message: err.to_string() },
		}
	}
}
