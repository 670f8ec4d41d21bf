//! Field normalization and validation shared by the registries.
//!
//! Documents and phone numbers arrive formatted (`123.456.789-09`,
//! `(11) 98765-4321`) and are stored as digits only.

use crate::error::CoreError;

/// CPF (individual taxpayer id) length in digits.
pub const CPF_DIGITS: usize = 11;
/// CNPJ (company taxpayer id) length in digits.
pub const CNPJ_DIGITS: usize = 14;
/// Landline numbers have 10 digits, mobiles 11.
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=11;

/// Trim `value` and reject it when empty.
pub fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Normalize a resident CPF to its 11 digits.
pub fn normalize_cpf(value: &str) -> Result<String, CoreError> {
    let digits = digits_only(value);
    if digits.len() != CPF_DIGITS {
        return Err(CoreError::Validation(format!(
            "CPF must have {CPF_DIGITS} digits (got {})",
            digits.len()
        )));
    }
    Ok(digits)
}

/// Normalize a provider document: CPF (11 digits) or CNPJ (14 digits).
pub fn normalize_provider_document(value: &str) -> Result<String, CoreError> {
    let digits = digits_only(value);
    if digits.len() != CPF_DIGITS && digits.len() != CNPJ_DIGITS {
        return Err(CoreError::Validation(format!(
            "Document must be a CPF ({CPF_DIGITS} digits) or CNPJ ({CNPJ_DIGITS} digits)"
        )));
    }
    Ok(digits)
}

/// Normalize a phone number to 10 or 11 digits.
pub fn normalize_phone(value: &str) -> Result<String, CoreError> {
    let digits = digits_only(value);
    if !PHONE_DIGITS.contains(&digits.len()) {
        return Err(CoreError::Validation(
            "Phone must have 10 (landline) or 11 (mobile) digits".into(),
        ));
    }
    Ok(digits)
}
