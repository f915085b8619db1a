//! Brazilian document helpers (CPF, CEP, telephone) used by request validation
//! and input normalization.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// `XXX.XXX.XXX-XX`
pub static CPF_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("valid CPF regex"));

/// `XXXXX-XXX` or `XXXXXXXX`
pub static CEP_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("valid CEP regex"));

/// `(XX) XXXX-XXXX` or `(XX) XXXXX-XXXX`
pub static FORMATTED_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d{2}\)\s\d{4,5}-\d{4}$").expect("valid phone regex"));

/// Brazilian phone numbers with optional +55 country code and area code.
pub static BR_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?55\s?)?(\(?[1-9]{2}\)?\s?)?(9\d{4}|\d{4})-?\d{4}$")
        .expect("valid pt-BR phone regex")
});

/// Two-letter state code (UF)
pub static UF_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2}$").expect("valid UF regex"));

fn only_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Check-digit validation of a CPF, formatted or bare digits.
pub fn is_valid_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = only_digits(cpf).chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check_digit = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let rest = sum % 11;
        if rest < 2 {
            0
        } else {
            11 - rest
        }
    };

    digits[9] == check_digit(9) && digits[10] == check_digit(10)
}

fn bare_digits(value: &str, len: usize) -> Option<&str> {
    Some(value).filter(|v| v.len() == len && v.chars().all(|c| c.is_ascii_digit()))
}

/// `52998224725` → `529.982.247-25`. Anything but 11 bare digits is only
/// trimmed, so malformed input still fails validation.
pub fn format_cpf(cpf: &str) -> String {
    let cpf = cpf.trim();
    match bare_digits(cpf, 11) {
        Some(d) => format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]),
        None => cpf.to_string(),
    }
}

/// `01310100` → `01310-100`
pub fn format_cep(cep: &str) -> String {
    let cep = cep.trim();
    match bare_digits(cep, 8) {
        Some(d) => format!("{}-{}", &d[0..5], &d[5..8]),
        None => cep.to_string(),
    }
}

// =============================================================================
// validator custom functions
// =============================================================================

/// Accepts `XXX.XXX.XXX-XX` or 11 bare digits with valid check digits.
pub fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    let shape_ok = CPF_FORMAT.is_match(value)
        || (value.len() == 11 && value.chars().all(|c| c.is_ascii_digit()));
    if shape_ok && is_valid_cpf(value) {
        Ok(())
    } else {
        Err(ValidationError::new("cpf"))
    }
}

pub fn validate_cep(value: &str) -> Result<(), ValidationError> {
    if CEP_FORMAT.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("cep"))
    }
}

pub fn validate_br_phone(value: &str) -> Result<(), ValidationError> {
    if BR_PHONE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("telefone"))
    }
}

pub fn validate_formatted_phone(value: &str) -> Result<(), ValidationError> {
    if FORMATTED_PHONE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("telefone"))
    }
}

pub fn validate_uf(value: &str) -> Result<(), ValidationError> {
    if UF_FORMAT.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("estado"))
    }
}
