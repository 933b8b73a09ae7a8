use crate::{domain::Money, errors::TrackerError};

/// Parses a user-supplied expense amount, which must be a positive integer.
pub fn parse_amount(raw: &str) -> Result<Money, TrackerError> {
    let trimmed = raw.trim();
    let amount: Money = trimmed
        .parse()
        .map_err(|_| TrackerError::validation(format!("amount `{trimmed}` is not a whole number")))?;
    validate_amount(amount)?;
    Ok(amount)
}

pub fn validate_amount(amount: Money) -> Result<Money, TrackerError> {
    if amount <= 0 {
        return Err(TrackerError::validation(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(amount)
}

/// Salary fields never fail: anything that is not a non-negative integer becomes 0.
pub fn coerce_salary(raw: &str) -> Money {
    raw.trim()
        .parse::<Money>()
        .ok()
        .filter(|value| *value >= 0)
        .unwrap_or(0)
}

/// Trims an expense name and rejects it when nothing is left.
pub fn normalize_name(raw: &str) -> Result<String, TrackerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::validation("expense name must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_positive_integers() {
        assert_eq!(parse_amount(" 15000 ").unwrap(), 15000);
    }

    #[test]
    fn parse_amount_rejects_zero_negative_and_text() {
        for raw in ["0", "-5", "abc", "", "12.5"] {
            assert!(parse_amount(raw).unwrap_err().is_validation(), "{raw}");
        }
    }

    #[test]
    fn coerce_salary_falls_back_to_zero() {
        assert_eq!(coerce_salary("5000000"), 5_000_000);
        assert_eq!(coerce_salary("lots"), 0);
        assert_eq!(coerce_salary("-10"), 0);
        assert_eq!(coerce_salary(""), 0);
    }

    #[test]
    fn normalize_name_trims() {
        assert_eq!(normalize_name("  coffee ").unwrap(), "coffee");
        assert!(normalize_name("   ").is_err());
    }
}
