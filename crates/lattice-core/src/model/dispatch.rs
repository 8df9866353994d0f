use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Identificador único de un run (dispatch) de un lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchId(Uuid);

impl DispatchId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Acepta únicamente la forma textual canónica (con guiones).
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let uuid = Uuid::try_parse(input).map_err(|_| CoreError::InvalidDispatchId(input.to_string()))?;
        if uuid.hyphenated().to_string() != input.to_ascii_lowercase() {
            return Err(CoreError::InvalidDispatchId(input.to_string()));
        }
        Ok(Self(uuid))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for DispatchId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<DispatchId> for Uuid {
    fn from(value: DispatchId) -> Self {
        value.0
    }
}

impl FromStr for DispatchId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form_only() {
        let id = DispatchId::parse("6f1e3c2a-8d4b-4a4e-9c55-0b3f7a9e2d11").unwrap();
        assert_eq!(id.to_string(), "6f1e3c2a-8d4b-4a4e-9c55-0b3f7a9e2d11");
        assert!(DispatchId::parse("6f1e3c2a8d4b4a4e9c550b3f7a9e2d11").is_err());
        assert!(DispatchId::parse("not-a-dispatch").is_err());
        assert!(DispatchId::parse("").is_err());
        assert!(DispatchId::parse(" 6f1e3c2a-8d4b-4a4e-9c55-0b3f7a9e2d11").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = DispatchId::parse("6f1e3c2a-8d4b-4a4e-9c55-0b3f7a9e2d11").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"6f1e3c2a-8d4b-4a4e-9c55-0b3f7a9e2d11\"");
    }
}
