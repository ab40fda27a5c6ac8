//! Contact normalization and masking for logs

/// Lowercase and trim an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Keep only ASCII digits, e.g. before handing a number to an SMS gateway
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Mask a phone number for display (e.g., 987****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() >= 7 {
        format!("{}****{}", &digits[0..3], &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}

/// Mask an email address for logs (e.g., `st***@college.edu`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Student@College.EDU "), "student@college.edu");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("+91 98765-43210"), "919876543210");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("9876543210"), "987****3210");
        assert_eq!(mask_phone_number("12345"), "****");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("student@college.edu"), "st***@college.edu");
        assert_eq!(mask_email("a@b.in"), "a***@b.in");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
