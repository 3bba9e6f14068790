//! The one identifier rule for note ids on the wire.
//!
//! Only the canonical hyphenated form is accepted: 36 characters, five hex groups of 8-4-4-4-12.
//! Hex digits may be in either case; ids are always emitted in lowercase.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

const CANONICAL_PATTERN: &str =
	r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(CANONICAL_PATTERN).expect("Canonical note id pattern must compile.")
});

pub fn is_canonical(raw: &str) -> bool {
	CANONICAL.is_match(raw)
}

pub fn parse(raw: &str) -> Option<Uuid> {
	if !is_canonical(raw) {
		return None;
	}

	Uuid::parse_str(raw).ok()
}

pub fn generate() -> Uuid {
	Uuid::new_v4()
}
