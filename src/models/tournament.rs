//! Tournament model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, RecordError, TournamentId};

/// Which player pool a tournament belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentKind {
    Veteran,
    Beginner,
}

impl fmt::Display for TournamentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentKind::Veteran => write!(f, "veteran"),
            TournamentKind::Beginner => write!(f, "beginner"),
        }
    }
}

impl FromStr for TournamentKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "veteran" => Ok(TournamentKind::Veteran),
            "beginner" => Ok(TournamentKind::Beginner),
            _ => Err(RecordError::UnknownTournamentKind(s.to_string())),
        }
    }
}

/// A tournament event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique identifier (derived from name + date)
    pub id: TournamentId,

    /// Tournament name
    pub name: String,

    /// Date the tournament was held
    pub date: NaiveDate,

    /// Player pool
    pub kind: TournamentKind,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new Tournament with auto-generated ID.
    pub fn new(name: String, date: NaiveDate, kind: TournamentKind) -> Self {
        let name = name.trim().to_string();
        let id = EntityId::generate(&["tournament", &name, &date.to_string()]);

        Self {
            id,
            name,
            date,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| RecordError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_kind_parse() {
        assert_eq!("veteran".parse::<TournamentKind>(), Ok(TournamentKind::Veteran));
        assert_eq!(" Beginner ".parse::<TournamentKind>(), Ok(TournamentKind::Beginner));
        assert!("casual".parse::<TournamentKind>().is_err());
    }

    #[test]
    fn test_tournament_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TournamentKind::Beginner).unwrap();
        assert_eq!(json, "\"beginner\"");
    }

    #[test]
    fn test_tournament_id_deterministic() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        let t1 = Tournament::new("Locals #12".to_string(), date, TournamentKind::Veteran);
        let t2 = Tournament::new("Locals #12".to_string(), date, TournamentKind::Beginner);
        assert_eq!(t1.id, t2.id);

        let other_day = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        let t3 = Tournament::new("Locals #12".to_string(), other_day, TournamentKind::Veteran);
        assert_ne!(t1.id, t3.id);
    }

    #[test]
    fn test_tournament_name_trimmed() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        let padded = Tournament::new("  Locals #12 ".to_string(), date, TournamentKind::Veteran);
        let plain = Tournament::new("Locals #12".to_string(), date, TournamentKind::Veteran);
        assert_eq!(padded.name, "Locals #12");
        assert_eq!(padded.id, plain.id);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(matches!(parse_date("29/02/2024"), Err(RecordError::InvalidDate(_))));
    }
}
