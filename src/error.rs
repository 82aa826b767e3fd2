/// Failure category, mirrored by the exit code of the `eia` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied an unusable request (e.g. no identifiers).
    InvalidInput,
    /// The credential source could not be read.
    ResourceUnavailable,
    /// Network failure, non-success status, or a body that is not JSON.
    RemoteRequestError,
    /// JSON parsed but lacks the `series` / `data` structure.
    UnexpectedResponseShape,
    /// A raw date is not `YYYYMMDD`.
    MalformedDate,
    /// Writing an export failed.
    Output,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidInput | ErrorKind::ResourceUnavailable | ErrorKind::Output => 2,
            ErrorKind::RemoteRequestError | ErrorKind::UnexpectedResponseShape | ErrorKind::MalformedDate => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code: kind.exit_code(),
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn resource_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceUnavailable, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RemoteRequestError, message)
    }

    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedResponseShape, message)
    }

    pub fn malformed_date(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedDate, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_split_caller_and_remote_failures() {
        assert_eq!(AppError::invalid_input("x").exit_code(), 2);
        assert_eq!(AppError::resource_unavailable("x").exit_code(), 2);
        assert_eq!(AppError::remote("x").exit_code(), 4);
        assert_eq!(AppError::unexpected_shape("x").exit_code(), 4);
        assert_eq!(AppError::malformed_date("x").exit_code(), 4);
    }
}
