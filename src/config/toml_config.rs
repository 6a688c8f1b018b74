use crate::domain::ports::FilterProvider;
use crate::utils::error::{JobError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog mapper filter: exact director and year match, inclusive minimum
/// rating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieFilter {
    pub director: String,
    pub year: String,
    pub min_rating: f64,
}

/// TOML file form of the filter:
///
/// ```toml
/// [filter]
/// director = "Mani Ratnam"
/// year = "1987"
/// min_rating = 8.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieFilterConfig {
    pub filter: MovieFilter,
}

impl MovieFilterConfig {
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| JobError::ConfigError {
            message: format!("invalid filter config: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }
}

impl FilterProvider for MovieFilter {
    fn director(&self) -> &str {
        &self.director
    }

    fn year(&self) -> &str {
        &self.year
    }

    fn min_rating(&self) -> f64 {
        self.min_rating
    }
}

impl Validate for MovieFilter {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("director", &self.director)?;
        validation::validate_year("year", &self.year)?;
        validation::validate_finite_number("min_rating", self.min_rating)?;
        Ok(())
    }
}
