//! Per-field validation rules for the wizard forms.
//!
//! Every validator is a pure function over the raw string the user typed,
//! returning a [`ValidationResult`]. There are no cross-field checks; the
//! only coupling between fields is the one-way date-of-birth -> age
//! derivation, which lives on the record model itself.

use chrono::NaiveDate;
use shared::{today_local, ValidationResult};

/// Fails on empty or whitespace-only input
pub fn validate_required(value: &str, field_name: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail(format!("{} is required", field_name));
    }
    ValidationResult::ok()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '\'' | '.' | ',' | '-')
}

/// Names: 2-100 characters, letters/spaces and common name punctuation
pub fn validate_name(value: &str, field_name: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail(format!("{} is required", field_name));
    }
    if value.trim().len() < 2 {
        return ValidationResult::fail(format!("{} must be at least 2 characters", field_name));
    }
    if value.len() > 100 {
        return ValidationResult::fail(format!("{} must be less than 100 characters", field_name));
    }
    if !value.chars().all(is_name_char) {
        return ValidationResult::fail(format!("{} contains invalid characters", field_name));
    }
    ValidationResult::ok()
}

/// Date of birth against the current date
pub fn validate_date_of_birth(value: &str) -> ValidationResult {
    validate_date_of_birth_at(value, today_local())
}

/// Date of birth against an explicit "today", so the age bounds are
/// computed from the clock at validation time rather than frozen.
pub fn validate_date_of_birth_at(value: &str, today: NaiveDate) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail("Date of birth is required");
    }

    let date = match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return ValidationResult::fail("Please enter a valid date"),
    };

    if date > today {
        return ValidationResult::fail("Date of birth cannot be in the future");
    }

    let age = shared::calculate_age(date, today);
    if age < 18 {
        return ValidationResult::fail("Age must be at least 18 years");
    }
    if age > 100 {
        return ValidationResult::fail("Please enter a valid date of birth");
    }

    ValidationResult::ok()
}

/// Age as typed directly: integer in [18, 100]
pub fn validate_age(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail("Age is required");
    }

    let age: i64 = match value.trim().parse() {
        Ok(n) => n,
        Err(_) => return ValidationResult::fail("Please enter a valid age"),
    };

    if age < 18 {
        return ValidationResult::fail("Age must be at least 18 years");
    }
    if age > 100 {
        return ValidationResult::fail("Please enter a valid age");
    }

    ValidationResult::ok()
}

/// Feet-inches shapes: `5'6"`, `5'6`, `5.6`
fn parse_feet_inches(value: &str) -> Option<(u32, u32)> {
    let mut chars = value.chars();
    let feet = chars.next()?.to_digit(10)?;
    let sep = chars.next()?;
    if sep != '\'' && sep != '.' {
        return None;
    }
    let rest: String = chars.collect();
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || digits.len() > 2 {
        return None;
    }
    let trailer = &rest[digits.len()..];
    if !matches!(trailer, "" | "\"" | "''") {
        return None;
    }
    let inches = digits.parse().ok()?;
    Some((feet, inches))
}

/// Centimeter shapes: `168cm`, `168 cm`, `168`
fn parse_centimeters(value: &str) -> Option<u32> {
    let lower = value.to_ascii_lowercase();
    let digits = lower.strip_suffix("cm").map(|d| d.trim_end()).unwrap_or(&lower);
    if digits.len() < 2 || digits.len() > 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Height in one of two mutually exclusive formats: feet-inches with feet
/// in [3,7] and inches in [0,11], or centimeters in [90,250]
pub fn validate_height(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail("Height is required");
    }

    let trimmed = value.trim();

    if let Some((feet, inches)) = parse_feet_inches(trimmed) {
        if !(3..=7).contains(&feet) {
            return ValidationResult::fail("Height must be between 3 and 7 feet");
        }
        if inches >= 12 {
            return ValidationResult::fail("Inches must be less than 12");
        }
        return ValidationResult::ok();
    }

    if let Some(cm) = parse_centimeters(trimmed) {
        if !(90..=250).contains(&cm) {
            return ValidationResult::fail("Height must be between 90cm and 250cm");
        }
        return ValidationResult::ok();
    }

    ValidationResult::fail("Please enter height in format: 5'6\" or 168cm")
}

/// Email is optional; when present it must look like local@domain.tld
pub fn validate_email(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::ok();
    }

    let trimmed = value.trim();
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            let part_ok = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains('@');
            part_ok(local)
                && part_ok(domain)
                && match domain.rsplit_once('.') {
                    Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
                    None => false,
                }
        }
        None => false,
    };

    if !valid {
        return ValidationResult::fail("Please enter a valid email address");
    }
    ValidationResult::ok()
}

/// Phone numbers, Indian or international. Spaces, hyphens, and parens are
/// stripped before checking.
pub fn validate_phone(value: &str, required: bool) -> ValidationResult {
    if value.trim().is_empty() {
        if required {
            return ValidationResult::fail("Phone number is required");
        }
        return ValidationResult::ok();
    }

    let cleaned: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if !cleaned.chars().all(|c| c.is_ascii_digit() || c == '+') {
        return ValidationResult::fail(
            "Phone number can only contain digits, spaces, hyphens, and +",
        );
    }

    let indian = cleaned.len() == 10
        && cleaned.chars().all(|c| c.is_ascii_digit())
        && matches!(cleaned.chars().next(), Some('6'..='9'));

    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let international =
        digits.chars().all(|c| c.is_ascii_digit()) && (10..=15).contains(&digits.len());

    if !indian && !international {
        return ValidationResult::fail(
            "Please enter a valid phone number (10 digits for Indian numbers)",
        );
    }

    ValidationResult::ok()
}

/// Select/enum fields fail while unselected
pub fn validate_select(value: &str, field_name: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail(format!("Please select {}", field_name));
    }
    ValidationResult::ok()
}

/// Optional free-text fields with a length window
pub fn validate_text_length(
    value: &str,
    min_length: usize,
    max_length: usize,
    field_name: &str,
) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::ok();
    }
    if value.trim().len() < min_length {
        return ValidationResult::fail(format!(
            "{} must be at least {} characters",
            field_name, min_length
        ));
    }
    if value.len() > max_length {
        return ValidationResult::fail(format!(
            "{} must be less than {} characters",
            field_name, max_length
        ));
    }
    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_required() {
        assert!(!validate_required("", "Full name").is_valid);
        assert!(!validate_required("   ", "Full name").is_valid);
        assert!(validate_required("Asha", "Full name").is_valid);
        assert_eq!(
            validate_required("", "Full name").error.unwrap(),
            "Full name is required"
        );
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(!validate_name("A", "Name").is_valid);
        assert!(validate_name("Jo", "Name").is_valid);
        assert!(validate_name(&"a".repeat(100), "Name").is_valid);
        assert!(!validate_name(&"a".repeat(101), "Name").is_valid);
    }

    #[test]
    fn test_name_charset() {
        assert!(validate_name("Mary-Jane O'Neil Jr.", "Name").is_valid);
        assert!(validate_name("de la Cruz, Maria", "Name").is_valid);
        assert!(!validate_name("R2D2", "Name").is_valid);
        assert!(!validate_name("name@home", "Name").is_valid);
    }

    #[test]
    fn test_date_of_birth_fixed_clock() {
        let today = date(2024, 6, 20);
        assert!(validate_date_of_birth_at("2000-06-15", today).is_valid);
        assert!(!validate_date_of_birth_at("", today).is_valid);
        assert!(!validate_date_of_birth_at("not-a-date", today).is_valid);
        assert!(!validate_date_of_birth_at("2025-01-01", today).is_valid); // future
    }

    #[test]
    fn test_date_of_birth_age_bounds() {
        let today = date(2024, 6, 20);
        // turns 18 exactly on the 20th: acceptable
        assert!(validate_date_of_birth_at("2006-06-20", today).is_valid);
        // 18th birthday is tomorrow: still 17
        let under = validate_date_of_birth_at("2006-06-21", today);
        assert!(!under.is_valid);
        assert_eq!(under.error.unwrap(), "Age must be at least 18 years");
        // 100 is allowed, 101 is not
        assert!(validate_date_of_birth_at("1924-06-20", today).is_valid);
        assert!(!validate_date_of_birth_at("1923-06-19", today).is_valid);
    }

    #[test]
    fn test_age() {
        assert!(validate_age("24").is_valid);
        assert!(validate_age("18").is_valid);
        assert!(validate_age("100").is_valid);
        let under = validate_age("17");
        assert!(!under.is_valid);
        assert_eq!(under.error.unwrap(), "Age must be at least 18 years");
        assert!(!validate_age("101").is_valid);
        assert!(!validate_age("").is_valid);
        assert!(!validate_age("24.5").is_valid);
        assert!(!validate_age("abc").is_valid);
    }

    #[test]
    fn test_height_feet_inches() {
        assert!(validate_height("5'6\"").is_valid);
        assert!(validate_height("5'6").is_valid);
        assert!(validate_height("5.6").is_valid);
        assert!(validate_height("3'0").is_valid);
        assert!(validate_height("7'11").is_valid);
        assert!(!validate_height("2'6").is_valid);
        assert!(!validate_height("8'0").is_valid);
        assert!(!validate_height("5'12").is_valid);
        assert_eq!(
            validate_height("5'12").error.unwrap(),
            "Inches must be less than 12"
        );
    }

    #[test]
    fn test_height_centimeters() {
        assert!(validate_height("168cm").is_valid);
        assert!(validate_height("168 cm").is_valid);
        assert!(validate_height("168").is_valid);
        assert!(validate_height("90").is_valid);
        assert!(validate_height("250cm").is_valid);
        assert!(!validate_height("89cm").is_valid);
        assert!(!validate_height("251").is_valid);
    }

    #[test]
    fn test_height_format_hint() {
        for bad in ["tall", "5feet", "", "1680cm"] {
            let result = validate_height(bad);
            assert!(!result.is_valid, "{:?} should fail", bad);
        }
        assert_eq!(
            validate_height("tall").error.unwrap(),
            "Please enter height in format: 5'6\" or 168cm"
        );
    }

    #[test]
    fn test_email_optional() {
        assert!(validate_email("").is_valid);
        assert!(validate_email("   ").is_valid);
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("asha@example.com").is_valid);
        assert!(validate_email("a.b+c@mail.example.co.in").is_valid);
        assert!(!validate_email("asha@example").is_valid);
        assert!(!validate_email("asha.example.com").is_valid);
        assert!(!validate_email("@example.com").is_valid);
        assert!(!validate_email("asha@.com").is_valid);
        assert!(!validate_email("as ha@example.com").is_valid);
    }

    #[test]
    fn test_phone_indian() {
        assert!(validate_phone("9876543210", true).is_valid);
        assert!(validate_phone("98765 43210", true).is_valid);
        assert!(validate_phone("(987) 654-3210", true).is_valid);
        // Indian numbers start with 6-9; a leading 5 still passes as a
        // generic 10-digit international number
        assert!(validate_phone("5876543210", true).is_valid);
    }

    #[test]
    fn test_phone_international() {
        assert!(validate_phone("+919876543210", true).is_valid);
        assert!(validate_phone("+12025550123", true).is_valid);
        assert!(!validate_phone("12345", true).is_valid);
        assert!(!validate_phone("1234567890123456", true).is_valid);
        assert!(!validate_phone("98765abc10", true).is_valid);
    }

    #[test]
    fn test_phone_required_flag() {
        assert!(!validate_phone("", true).is_valid);
        assert!(validate_phone("", false).is_valid);
    }

    #[test]
    fn test_select() {
        assert!(!validate_select("", "marital status").is_valid);
        assert!(validate_select("Never Married", "marital status").is_valid);
    }

    #[test]
    fn test_text_length() {
        assert!(validate_text_length("", 10, 500, "About me").is_valid);
        assert!(!validate_text_length("short", 10, 500, "About me").is_valid);
        assert!(validate_text_length(&"a".repeat(10), 10, 500, "About me").is_valid);
        assert!(!validate_text_length(&"a".repeat(501), 10, 500, "About me").is_valid);
    }
}
