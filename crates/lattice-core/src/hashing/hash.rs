//! Checksum blake3 (hex) sobre la forma canónica de un valor JSON.

use serde_json::Value;

use super::canonical_json::to_canonical_json;

pub fn checksum_value(value: &Value) -> Result<String, serde_json::Error> {
    let canonical = to_canonical_json(value)?;
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_change_checksum() {
        let a = checksum_value(&json!({"b": 1, "a": [true, null]})).unwrap();
        let b = checksum_value(&json!({"a": [true, null], "b": 1})).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, checksum_value(&json!({"a": [true, null], "b": 2})).unwrap());
    }
}
