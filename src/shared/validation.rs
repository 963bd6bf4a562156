use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Phone numbers for staff records: optional leading `+`, then 7-15 digits,
    /// spaces or hyphens allowed between digit groups
    /// - Valid: "+91 98765 43210", "080-2222-3333", "9876543210"
    /// - Invalid: "phone", "12", "+91--9876"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9]+(?:[ -][0-9]+)*$").unwrap();
}

/// Count digits so `PHONE_REGEX` matches can be length-checked
pub fn is_valid_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    PHONE_REGEX.is_match(value) && (7..=15).contains(&digits)
}

/// `validator` custom hook for phone fields
pub fn validate_phone(value: &str) -> Result<(), validator::ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("phone"))
    }
}

/// Reject strings that are empty after trimming
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(is_valid_phone("080-2222-3333"));
        assert!(is_valid_phone("9876543210"));
    }

    #[test]
    fn test_phone_invalid() {
        assert!(!is_valid_phone("phone"));
        assert!(!is_valid_phone("12")); // too short
        assert!(!is_valid_phone("+91--9876543")); // double separator
        assert!(!is_valid_phone("1234567890123456")); // too long
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("pothole").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
