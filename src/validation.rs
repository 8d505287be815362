/// Boundary input validation.
///
/// The scoring engine is total over well-formed input and performs no
/// validation of its own; anything malformed is rejected here, before a
/// profile ever reaches the scorer:
/// - email format and fake/placeholder detection
/// - Australian phone validation and E.164 normalization
/// - profile shape (age range, postcode shape)
use phonenumber::country::Id as CountryId;
use phonenumber::Mode;
use regex::Regex;

use crate::errors::AppError;
use crate::models::LeadProfile;

/// Validate an email address.
///
/// Checks for:
/// - Basic email format (contains @ and .)
/// - Fake/placeholder patterns (repeated digits like 9999, 1111)
/// - Minimum length requirements
/// - Valid domain structure
pub fn is_valid_email(email: &str) -> bool {
    // Basic checks
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // Detect fake patterns (repeated digits)
    let fake_patterns = ["999999", "111111", "000000", "123456789"];

    for pattern in &fake_patterns {
        if email.contains(pattern) {
            tracing::warn!("Invalid email detected (fake pattern '{}'): {}", pattern, email);
            return false;
        }
    }

    // RFC 5322 simplified email regex
    // Matches: local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    if !email_regex.is_match(email) {
        tracing::warn!("Invalid email format: {}", email);
        return false;
    }

    true
}

/// Validate and normalize an Australian phone number.
///
/// Uses the phonenumber library (port of Google's libphonenumber) to:
/// - Parse the number with the Australian region (AU)
/// - Validate it is a real Australian number
/// - Return the normalized E.164 form (+61412345678)
///
/// Returns: (is_valid, normalized_phone_or_error_msg)
pub fn validate_au_phone(raw: &str) -> (bool, String) {
    // Skip empty or very short strings
    if raw.trim().is_empty() || raw.len() < 8 {
        return (false, "Phone too short".to_string());
    }

    match phonenumber::parse(Some(CountryId::AU), raw) {
        Ok(number) => {
            if phonenumber::is_valid(&number) {
                let formatted = number.format().mode(Mode::E164).to_string();
                tracing::debug!("Valid AU phone: {} -> {}", raw, formatted);
                (true, formatted)
            } else {
                tracing::warn!("Invalid AU phone number: {}", raw);
                (false, "Invalid Australian phone number".to_string())
            }
        }
        Err(e) => {
            tracing::warn!("Failed to parse AU phone '{}': {:?}", raw, e);
            (false, format!("Parse error: {:?}", e))
        }
    }
}

/// Reject profiles with out-of-domain values before they reach the scorer.
///
/// Absent fields are always fine; only present-but-nonsensical values fail.
pub fn validate_profile(profile: &LeadProfile) -> Result<(), AppError> {
    if let Some(age) = profile.age {
        if age > 150 {
            return Err(AppError::BadRequest(format!(
                "age must be between 0 and 150, got {}",
                age
            )));
        }
    }

    if let Some(postcode) = profile.postcode.as_deref() {
        let postcode_regex = Regex::new(r"^\d{4}$").unwrap();
        if !postcode_regex.is_match(postcode.trim()) {
            return Err(AppError::BadRequest(format!(
                "postcode must be 4 digits, got '{}'",
                postcode
            )));
        }
    }

    Ok(())
}
