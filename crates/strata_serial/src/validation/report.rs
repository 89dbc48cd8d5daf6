use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// ValidationError

/// One flattened validation failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Location inside the document, empty for the root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

// -----------------------------------------------------------------------------
// ValidationReport

/// Every failure found in one validation pass, detached from the data tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    #[inline]
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    #[inline]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("no validation errors"),
            [single] => fmt::Display::fmt(single, f),
            errors => {
                write!(f, "{} validation errors", errors.len())?;
                for error in errors {
                    write!(f, "\n  - {error}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::{ValidationError, ValidationReport};

    #[test]
    fn report_display() {
        let one = ValidationReport::new(vec![ValidationError {
            path: String::new(),
            message: "Type 'X' not found.".to_string(),
        }]);
        assert_eq!(one.to_string(), "Type 'X' not found.");

        let two = ValidationReport::new(vec![
            ValidationError {
                path: "[0]".to_string(),
                message: "a".to_string(),
            },
            ValidationError {
                path: "k".to_string(),
                message: "b".to_string(),
            },
        ]);
        assert_eq!(two.to_string(), "2 validation errors\n  - [0]: a\n  - k: b");
    }
}
