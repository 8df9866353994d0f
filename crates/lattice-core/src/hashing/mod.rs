//! Canonicalización JSON y hash de payloads (checksum del envelope).

pub mod canonical_json;
pub mod hash;

pub use canonical_json::to_canonical_json;
pub use hash::checksum_value;
