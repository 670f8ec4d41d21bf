//! Work-order status lifecycle and priority levels.
//!
//! ```text
//! open ──► in_progress ──► completed
//!   │           │
//!   └───────────┴────────► cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. Statuses are stored as their
//! snake_case wire names in `work_orders.status`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a work order.
///
/// The Portuguese labels used by the original frontend are accepted as input
/// aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    #[serde(alias = "aberto")]
    Open,
    #[serde(alias = "em andamento", alias = "em_andamento")]
    InProgress,
    #[serde(alias = "concluido")]
    Completed,
    #[serde(alias = "cancelado")]
    Cancelled,
}

impl WorkOrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [WorkOrderStatus; 4] = [
        Self::Open,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire / storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Statuses reachable from `self` in one step.
    pub fn valid_transitions(self) -> &'static [WorkOrderStatus] {
        match self {
            Self::Open => &[Self::InProgress, Self::Cancelled],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: WorkOrderStatus) -> bool {
        self.valid_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkOrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" | "aberto" => Ok(Self::Open),
            "in_progress" | "em andamento" | "em_andamento" => Ok(Self::InProgress),
            "completed" | "concluido" => Ok(Self::Completed),
            "cancelled" | "cancelado" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Invalid work order status '{other}'. Must be one of: open, in_progress, \
                 completed, cancelled"
            ))),
        }
    }
}

/// Validate a single status change against the transition table.
pub fn validate_transition(current: WorkOrderStatus, next: WorkOrderStatus) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            entity: "WorkOrder",
            from: current.to_string(),
            to: next.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Urgency of a work order. Defaults to [`Priority::Low`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    #[serde(alias = "baixa")]
    Low,
    #[serde(alias = "media", alias = "média")]
    Medium,
    #[serde(alias = "alta")]
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" | "baixa" => Ok(Self::Low),
            "medium" | "media" | "média" => Ok(Self::Medium),
            "high" | "alta" => Ok(Self::High),
            other => Err(CoreError::Validation(format!(
                "Invalid priority '{other}'. Must be one of: low, medium, high"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::WorkOrderStatus::*;
    use super::*;

    #[test]
    fn open_moves_to_in_progress_or_cancelled() {
        assert!(validate_transition(Open, InProgress).is_ok());
        assert!(validate_transition(Open, Cancelled).is_ok());
    }

    #[test]
    fn open_cannot_skip_to_completed() {
        assert_matches!(
            validate_transition(Open, Completed),
            Err(CoreError::InvalidTransition { from, to, .. }) if from == "open" && to == "completed"
        );
    }

    #[test]
    fn in_progress_moves_to_completed_or_cancelled() {
        assert!(validate_transition(InProgress, Completed).is_ok());
        assert!(validate_transition(InProgress, Cancelled).is_ok());
        assert!(validate_transition(InProgress, Open).is_err());
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in WorkOrderStatus::ALL {
                assert!(validate_transition(terminal, next).is_err());
            }
        }
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in WorkOrderStatus::ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }
    }

    #[test]
    fn status_parses_wire_names_and_legacy_labels() {
        assert_eq!("in_progress".parse::<WorkOrderStatus>().unwrap(), InProgress);
        assert_eq!("em andamento".parse::<WorkOrderStatus>().unwrap(), InProgress);
        assert_eq!("concluido".parse::<WorkOrderStatus>().unwrap(), Completed);
        assert_matches!("reopened".parse::<WorkOrderStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn status_serde_uses_snake_case_and_accepts_aliases() {
        assert_eq!(serde_json::to_string(&InProgress).unwrap(), "\"in_progress\"");
        let parsed: WorkOrderStatus = serde_json::from_str("\"cancelado\"").unwrap();
        assert_eq!(parsed, Cancelled);
    }

    #[test]
    fn priority_defaults_to_low() {
        assert_eq!(Priority::default(), Priority::Low);
        assert_eq!("alta".parse::<Priority>().unwrap(), Priority::High);
        let parsed: Priority = serde_json::from_str("\"media\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
    }
}
