//! Announcement categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Category badge shown on the notice board.
///
/// Serialized with the Portuguese labels the notice board displays; the
/// English names are accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnouncementFlag {
    #[default]
    #[serde(rename = "Informativo", alias = "Informational")]
    Informational,
    #[serde(rename = "Urgente", alias = "Urgent")]
    Urgent,
    #[serde(rename = "Importante", alias = "Important")]
    Important,
    #[serde(rename = "Manutenção", alias = "Manutencao", alias = "Maintenance")]
    Maintenance,
}

impl AnnouncementFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "Informativo",
            Self::Urgent => "Urgente",
            Self::Important => "Importante",
            Self::Maintenance => "Manutenção",
        }
    }
}

impl fmt::Display for AnnouncementFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementFlag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Informativo" | "Informational" => Ok(Self::Informational),
            "Urgente" | "Urgent" => Ok(Self::Urgent),
            "Importante" | "Important" => Ok(Self::Important),
            "Manutenção" | "Manutencao" | "Maintenance" => Ok(Self::Maintenance),
            other => Err(CoreError::Validation(format!(
                "Invalid announcement flag '{other}'. Must be one of: Informativo, Urgente, \
                 Importante, Manutenção"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_round_trips_through_storage_name() {
        for flag in [
            AnnouncementFlag::Informational,
            AnnouncementFlag::Urgent,
            AnnouncementFlag::Important,
            AnnouncementFlag::Maintenance,
        ] {
            assert_eq!(flag.as_str().parse::<AnnouncementFlag>().unwrap(), flag);
        }
    }

    #[test]
    fn english_alias_is_accepted_on_input() {
        let flag: AnnouncementFlag = serde_json::from_str("\"Maintenance\"").unwrap();
        assert_eq!(flag, AnnouncementFlag::Maintenance);
        assert_eq!(serde_json::to_string(&flag).unwrap(), "\"Manutenção\"");
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!("Festa".parse::<AnnouncementFlag>().is_err());
    }
}
