use crate::utils::error::{JobError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(JobError::ValidationError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

pub fn validate_year(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(JobError::ValidationError {
            message: format!("{} must be numeric, got '{}'", field_name, value),
        });
    }
    Ok(())
}

pub fn validate_finite_number(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(JobError::ValidationError {
            message: format!("{} must be a finite number, got '{}'", field_name, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("director", "Satyajit Ray").is_ok());
        assert!(validate_non_empty_string("director", "").is_err());
        assert!(validate_non_empty_string("director", "   ").is_err());
    }

    #[test]
    fn test_validate_year() {
        assert!(validate_year("year", "1999").is_ok());
        assert!(validate_year("year", "199x").is_err());
        assert!(validate_year("year", "").is_err());
    }

    #[test]
    fn test_validate_finite_number() {
        assert!(validate_finite_number("min_rating", 8.5).is_ok());
        assert!(validate_finite_number("min_rating", f64::NAN).is_err());
        assert!(validate_finite_number("min_rating", f64::INFINITY).is_err());
    }
}
