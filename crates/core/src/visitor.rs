//! Visitor log status.
//!
//! A visitor is `active` from entry until departure is registered; the
//! transition is one-way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitorStatus {
    #[serde(alias = "ativo")]
    Active,
    #[serde(alias = "saiu")]
    Departed,
}

impl VisitorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Departed => "departed",
        }
    }
}

impl fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitorStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" | "ativo" => Ok(Self::Active),
            "departed" | "saiu" => Ok(Self::Departed),
            other => Err(CoreError::Validation(format!(
                "Invalid visitor status '{other}'"
            ))),
        }
    }
}

/// Only an active visitor can be checked out.
pub fn validate_departure(current: VisitorStatus) -> Result<(), CoreError> {
    match current {
        VisitorStatus::Active => Ok(()),
        VisitorStatus::Departed => Err(CoreError::InvalidTransition {
            entity: "Visitor",
            from: current.to_string(),
            to: VisitorStatus::Departed.to_string(),
        }),
    }
}
