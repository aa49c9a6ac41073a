//! Configuration validation utilities and rules

use crate::FrontierError;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Value is required but missing
    #[error("Field '{field}' is required but missing")]
    Required { field: String },
    /// Value is below its lower bound
    #[error("Field '{field}' must be at least {min} (got {actual})")]
    TooSmall { field: String, min: u64, actual: u64 },
    /// Value format is invalid
    #[error("Field '{field}' has invalid format. Expected: {expected}, got: {actual}")]
    InvalidFormat {
        field: String,
        expected: String,
        actual: String,
    },
}

impl From<ValidationError> for FrontierError {
    fn from(err: ValidationError) -> Self {
        FrontierError::invalid(err.to_string())
    }
}

/// Trait for configuration validation
pub trait ConfigValidation {
    /// Validate this configuration
    fn validate(&self) -> Result<(), FrontierError>;
}

/// Accumulates rule violations so a config reports every problem at once.
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
    field_prefix: String,
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator whose field names are prefixed with `section.`
    pub fn for_section(section: &str) -> Self {
        Self {
            errors: Vec::new(),
            field_prefix: section.to_string(),
        }
    }

    fn field(&self, name: &str) -> String {
        if self.field_prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", self.field_prefix)
        }
    }

    /// Require a non-empty string
    pub fn require(&mut self, name: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::Required {
                field: self.field(name),
            });
        }
        self
    }

    /// Require `value >= min`
    pub fn at_least(&mut self, name: &str, value: u64, min: u64) -> &mut Self {
        if value < min {
            self.errors.push(ValidationError::TooSmall {
                field: self.field(name),
                min,
                actual: value,
            });
        }
        self
    }

    /// Require an absolute http(s) URL
    pub fn http_url(&mut self, name: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            return self.require(name, value);
        }
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            self.errors.push(ValidationError::InvalidFormat {
                field: self.field(name),
                expected: "http:// or https:// URL".to_string(),
                actual: value.to_string(),
            });
        }
        self
    }

    /// Merge errors collected by a nested validator
    pub fn absorb(&mut self, other: ConfigValidator) -> &mut Self {
        self.errors.extend(other.errors);
        self
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Finish validation, joining every violation into one error
    pub fn finish(self) -> Result<(), FrontierError> {
        match self.errors.as_slice() {
            [] => Ok(()),
            [single] => Err(single.clone().into()),
            many => Err(FrontierError::invalid(
                many.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )),
        }
    }
}
