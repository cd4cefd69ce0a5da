use thiserror::Error;

pub type PkgsheetResult<T> = Result<T, PkgsheetError>;

#[derive(Error, Debug)]
pub enum PkgsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Spreadsheet read error: {0}")]
    Read(String),

    #[error("Invalid package name: {0}")]
    InvalidName(String),

    #[error("Package registry error: {0}")]
    Registry(String),
}

impl PkgsheetError {
    /// True for errors caused by the caller's input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PkgsheetError::Parse(_)
                | PkgsheetError::Serialization(_)
                | PkgsheetError::InvalidName(_)
        )
    }

    /// Process exit status for this error.
    ///
    /// 0 and 1 are reserved for "installed" / "not installed", so errors
    /// never share a status with a negative lookup.
    pub fn exit_code(&self) -> u8 {
        if self.is_input_error() {
            2
        } else {
            3
        }
    }
}
