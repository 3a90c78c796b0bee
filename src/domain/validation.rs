use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidEndpoint { input: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} is required"),
            Self::InvalidEndpoint { input, reason } => {
                write!(f, "invalid endpoint {input:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
