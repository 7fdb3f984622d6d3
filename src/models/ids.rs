//! Content-addressed identifiers.
//!
//! Players and tournaments get ids hashed from their natural keys, so
//! registering the same name twice resolves to the same record.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters kept from the digest.
const ID_LEN: usize = 16;

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Hash `fields` joined by `|` and keep the first 16 hex characters.
    pub fn generate(fields: &[&str]) -> Self {
        let digest = Sha256::digest(fields.join("|").as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(ID_LEN);
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<String> for EntityId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

pub type PlayerId = EntityId;
pub type TournamentId = EntityId;
pub type PlacementId = EntityId;
pub type PenaltyId = EntityId;
