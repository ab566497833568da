use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, parse_flag, require_text};
use crate::constants::limits;
use crate::entities::movies;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: String,
    pub is_read: bool,
}

impl Movie {
    /// True when the title contains a CJK unified ideograph.
    #[must_use]
    pub fn has_cjk_title(&self) -> bool {
        self.title.chars().any(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
    }
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year: model.year,
            is_read: model.is_read,
        }
    }
}

/// Raw form submission. Every field is optional so that a missing field is
/// reported as invalid input instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieForm {
    pub title: Option<String>,
    pub year: Option<String>,
    pub is_read: Option<String>,
}

/// Checked movie fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieInput {
    pub title: String,
    pub year: String,
    pub is_read: bool,
}

impl MovieForm {
    pub fn new(title: &str, year: &str, is_read: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            year: Some(year.to_string()),
            is_read: Some(is_read.to_string()),
        }
    }

    pub fn validate(&self) -> Result<MovieInput, ValidationError> {
        let is_read = match self.is_read.as_deref() {
            Some(token) => parse_flag(token)?,
            None => return Err(ValidationError::MissingField { field: "is_read" }),
        };

        let title = require_text("title", self.title.as_deref(), limits::TITLE_MAX_CHARS)?;
        let year = require_text("year", self.year.as_deref(), limits::YEAR_MAX_CHARS)?;

        Ok(MovieInput {
            title: title.to_string(),
            year: year.to_string(),
            is_read,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_valid_form() {
        let input = MovieForm::new("Inception", "2010", "true").validate().unwrap();
        assert_eq!(
            input,
            MovieInput {
                title: "Inception".to_string(),
                year: "2010".to_string(),
                is_read: true,
            }
        );
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        let title = "流".repeat(60);
        assert!(MovieForm::new(&title, "2023", "no").validate().is_ok());

        let title = "流".repeat(61);
        assert!(MovieForm::new(&title, "2023", "no").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        assert_eq!(
            MovieForm::new("", "2010", "true").validate(),
            Err(ValidationError::MissingField { field: "title" })
        );
        assert_eq!(
            MovieForm::new("Inception", "20100", "true").validate(),
            Err(ValidationError::TooLong {
                field: "year",
                max: 4
            })
        );
        assert_eq!(
            MovieForm::new("Inception", "2010", "maybe").validate(),
            Err(ValidationError::InvalidFlag("maybe".to_string()))
        );
        assert_eq!(
            MovieForm {
                is_read: None,
                ..MovieForm::new("Inception", "2010", "true")
            }
            .validate(),
            Err(ValidationError::MissingField { field: "is_read" })
        );
    }

    #[test]
    fn test_has_cjk_title() {
        let mut movie = Movie {
            id: 1,
            title: "WALL-E".to_string(),
            year: "2008".to_string(),
            is_read: false,
        };
        assert!(!movie.has_cjk_title());

        movie.title = "流浪地球2".to_string();
        assert!(movie.has_cjk_title());
    }
}
