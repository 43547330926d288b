use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Everything a repository needs from an identifier type.
pub trait Identifier: Debug + Display + Clone + PartialEq + Eq + Send + Sync + 'static {}

impl<T> Identifier for T where T: Debug + Display + Clone + PartialEq + Eq + Send + Sync + 'static {}

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
#[error("ID must be a valid UUID")]
pub struct InvalidUuidError;

/// Validated UUID value object. Equality is by value.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Copy, Clone)]
#[repr(transparent)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Result<Self, InvalidUuidError> {
        Uuid::try_parse(value)
            .map(Self)
            .map_err(|_| InvalidUuidError)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for EntityId {
    type Err = InvalidUuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
