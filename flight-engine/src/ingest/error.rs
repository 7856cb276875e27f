//! Ingestion error types.

/// Errors that stop a flights file from loading at all.
///
/// Individual bad rows are not errors; they are skipped and counted in
/// [`LoadReport`](super::LoadReport).
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input has no header row
    #[error("flights file is empty")]
    Empty,

    /// A required column is absent from the header
    #[error("flights file is missing required column '{0}'")]
    MissingColumn(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(IngestError::Empty.to_string(), "flights file is empty");
        assert_eq!(
            IngestError::MissingColumn("dest").to_string(),
            "flights file is missing required column 'dest'"
        );

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert_eq!(IngestError::from(io).to_string(), "I/O error: no such file");
    }
}
