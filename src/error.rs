use thiserror::Error;

/// Errores recuperables del calculador. Ninguno es fatal: el formulario sigue
/// usable y el usuario corrige la entrada y vuelve a intentar.
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("failed to fetch catalog for regulation '{regulation}': {reason}")]
    CatalogFetch { regulation: String, reason: String },

    #[error("malformed catalog for regulation '{regulation}': {reason}")]
    CatalogParse { regulation: String, reason: String },

    #[error("subject code '{code}' not found in department '{department}'")]
    SubjectNotFound {
        code: String,
        department: String,
        suggestion: Option<String>,
    },

    #[error("semester {index} has an invalid GPA value '{value}' (expected a number between 0 and 10)")]
    InvalidGpaValue { index: usize, value: String },

    #[error("export refused: {0}")]
    ExportPrecondition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    /// Texto corto para la notificación bloqueante que ve el usuario.
    pub fn notice(&self) -> String {
        match self {
            CalcError::CatalogFetch { .. } => "Syllabus JSON not found!".to_string(),
            CalcError::CatalogParse { .. } => "Syllabus JSON is malformed!".to_string(),
            CalcError::SubjectNotFound { code, suggestion, .. } => match suggestion {
                Some(s) => format!("Invalid subject code: {} (did you mean {}?)", code, s),
                None => format!("Invalid subject code: {}", code),
            },
            CalcError::InvalidGpaValue { index, value } => {
                format!("Invalid GPA for semester {}: '{}'", index, value)
            }
            CalcError::ExportPrecondition(msg) => msg.clone(),
            CalcError::Io(e) => format!("File error: {}", e),
            CalcError::Json(e) => format!("JSON error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_names_the_offending_code() {
        let e = CalcError::SubjectNotFound {
            code: "CS999".to_string(),
            department: "CSE".to_string(),
            suggestion: None,
        };
        assert_eq!(e.notice(), "Invalid subject code: CS999");

        let e = CalcError::SubjectNotFound {
            code: "CS10".to_string(),
            department: "CSE".to_string(),
            suggestion: Some("CS101".to_string()),
        };
        assert_eq!(e.notice(), "Invalid subject code: CS10 (did you mean CS101?)");
    }

    #[test]
    fn fetch_failure_uses_syllabus_notice() {
        let e = CalcError::CatalogFetch { regulation: "R2021".into(), reason: "missing".into() };
        assert_eq!(e.notice(), "Syllabus JSON not found!");
        assert!(e.to_string().contains("R2021"));
    }
}
