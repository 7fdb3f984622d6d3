//! Filter scope for rankings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{PenaltyType, RecordError, TournamentKind};

/// Which partition of tournaments and penalties a ranking covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    Veteran,
    Beginner,
}

impl Scope {
    pub fn includes_tournament(&self, kind: TournamentKind) -> bool {
        match self {
            Scope::All => true,
            Scope::Veteran => kind == TournamentKind::Veteran,
            Scope::Beginner => kind == TournamentKind::Beginner,
        }
    }

    pub fn includes_penalty(&self, penalty_type: PenaltyType) -> bool {
        match self {
            Scope::All => true,
            Scope::Veteran => penalty_type == PenaltyType::Regular,
            Scope::Beginner => penalty_type == PenaltyType::Beginner,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Veteran => write!(f, "veteran"),
            Scope::Beginner => write!(f, "beginner"),
        }
    }
}

impl FromStr for Scope {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(Scope::All),
            "veteran" => Ok(Scope::Veteran),
            "beginner" => Ok(Scope::Beginner),
            _ => Err(RecordError::UnknownScope(s.to_string())),
        }
    }
}
