use rust_xlsxwriter::XlsxError;

/// Terminal failure of a generation run; no workbook is written
#[derive(Debug)]
pub enum GenerateError {
    /// A generated name already exists in a loaded source workbook
    Duplicate { name: String },
    /// Nothing matched the filters
    NoMatches,
    /// Run configuration failed validation
    Config(String),
    /// Source directory could not be scanned
    Load(anyhow::Error),
    Io(std::io::Error),
    Workbook(XlsxError),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::Duplicate { name } => write!(
                f,
                "Sorry, it would be a duplicate - we already have this offering in the system: {}",
                name
            ),
            GenerateError::NoMatches => write!(f, "No matching rows found"),
            GenerateError::Config(msg) => write!(f, "{}", msg),
            GenerateError::Load(e) => write!(f, "Failed to load source workbooks: {:#}", e),
            GenerateError::Io(e) => write!(f, "I/O error: {}", e),
            GenerateError::Workbook(e) => write!(f, "Failed to write workbook: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Load(e) => Some(&**e),
            GenerateError::Io(e) => Some(e),
            GenerateError::Workbook(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(e: std::io::Error) -> Self {
        GenerateError::Io(e)
    }
}

impl From<XlsxError> for GenerateError {
    fn from(e: XlsxError) -> Self {
        GenerateError::Workbook(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message() {
        let err = GenerateError::Duplicate {
            name: "[SR HS PL IT] Software assistance Outlook Prod Mon-Fri 9-17".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Sorry, it would be a duplicate - we already have this offering in the system: \
             [SR HS PL IT] Software assistance Outlook Prod Mon-Fri 9-17"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: GenerateError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, GenerateError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_keeps_context_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = GenerateError::Load(anyhow::Error::new(io).context("Failed to read source directory: /missing"));

        assert_eq!(
            err.to_string(),
            "Failed to load source workbooks: Failed to read source directory: /missing: gone"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Failed to read source directory: /missing");
        assert_eq!(source.source().unwrap().to_string(), "gone");
    }
}
