//! Player roster model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId, RecordError};

/// A registered player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier (derived from the normalized name)
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Avatar image URL
    pub image_url: Option<String>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new Player with an ID derived from the name.
    pub fn new(name: &str) -> Result<Self, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }

        Ok(Self {
            id: Self::id_for(name),
            name: name.to_string(),
            image_url: None,
            created_at: Utc::now(),
        })
    }

    /// The ID a player with this name would get.
    pub fn id_for(name: &str) -> PlayerId {
        EntityId::generate(&["player", &name.trim().to_lowercase()])
    }

    /// Builder method to set the avatar URL.
    pub fn with_image_url(mut self, url: String) -> Self {
        self.image_url = Some(url);
        self
    }

    /// Key used for alphabetical roster ordering.
    pub fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}
