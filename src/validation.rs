// Validation utilities module
// Provides custom validation functions for domain-specific rules

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates that a product status is one of the accepted values
/// Valid values: "Available", "Unavailable" (case-insensitive)
pub fn validate_product_status(status: &str) -> Result<(), ValidationError> {
    let valid = ["available", "unavailable"];
    if valid.contains(&status.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_product_status"))
    }
}

/// Validates that a price is positive
pub fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        Err(ValidationError::new("price_must_be_positive"))
    } else {
        Ok(())
    }
}

/// Validates that a string field is not blank after trimming
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("must_not_be_blank"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn positive_price_accepted() {
        assert!(validate_positive_price(&dec!(12.50)).is_ok());
    }

    #[test]
    fn zero_and_negative_prices_rejected() {
        assert!(validate_positive_price(&dec!(0)).is_err());
        assert!(validate_positive_price(&dec!(-3.10)).is_err());
    }

    #[test]
    fn blank_strings_rejected() {
        assert!(validate_not_blank("  ").is_err());
        assert!(validate_not_blank("Hoodie").is_ok());
    }

    #[test]
    fn status_values_case_insensitive() {
        assert!(validate_product_status("Available").is_ok());
        assert!(validate_product_status("unavailable").is_ok());
        assert!(validate_product_status("Sold Out").is_err());
    }
}
