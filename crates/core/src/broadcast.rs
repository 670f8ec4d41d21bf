//! Recipient-set computation for bulk email.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::validation::require_non_empty;

/// Maximum subject length accepted for a broadcast.
pub const MAX_SUBJECT_LENGTH: usize = 200;

/// Deduplicate addresses case-insensitively, dropping blanks.
///
/// The result is sorted so dispatch order is deterministic.
pub fn recipient_set<I, S>(emails: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    emails
        .into_iter()
        .map(|e| e.as_ref().trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Validate subject and body of a broadcast.
pub fn validate_message(subject: &str, body: &str) -> Result<(), CoreError> {
    let subject = require_non_empty("assunto", subject)?;
    require_non_empty("mensagem", body)?;
    if subject.chars().count() > MAX_SUBJECT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Subject exceeds maximum length of {MAX_SUBJECT_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipients_are_deduplicated_case_insensitively() {
        let set = recipient_set([
            "Ana@Condo.com",
            "ana@condo.com ",
            "",
            "bruno@condo.com",
        ]);
        assert_eq!(set, vec!["ana@condo.com", "bruno@condo.com"]);
    }

    #[test]
    fn empty_subject_or_body_is_rejected() {
        assert!(validate_message("", "hello").is_err());
        assert!(validate_message("Hi", "  ").is_err());
        assert!(validate_message("Hi", "Water shut-off tomorrow").is_ok());
    }
}
