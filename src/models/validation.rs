use thiserror::Error;

/// Error de validación de un campo de formulario (antes de llamar al API)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } => field,
        }
    }
}

/// Un campo obligatorio no puede quedar vacío tras `trim()`
pub fn require_filled(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(
            require_filled("title", " \t\n"),
            Err(ValidationError::EmptyField { field: "title" })
        );
        assert!(require_filled("title", " Theft ").is_ok());
    }

    #[test]
    fn error_names_the_field() {
        let err = require_filled("location", "").unwrap_err();
        assert_eq!(err.field(), "location");
        assert_eq!(err.to_string(), "location is required");
    }
}
