use std::error;
use std::fmt;

/// The single error taxonomy shared by every crate in this workspace.
///
/// `MetricError` is a refinement of `InvalidParameter` used specifically by
/// the metric engine so callers can distinguish dimension/shape failures
/// there from the same class of failure elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum J2kError {
    InvalidParameter { message: String },
    EncodingError { message: String },
    DecodingError { message: String },
    MetricError { message: String },
}

impl J2kError {
    pub fn invalid_parameter<S: Into<String>>(message: S) -> J2kError {
        J2kError::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn encoding_error<S: Into<String>>(message: S) -> J2kError {
        J2kError::EncodingError {
            message: message.into(),
        }
    }

    pub fn decoding_error<S: Into<String>>(message: S) -> J2kError {
        J2kError::DecodingError {
            message: message.into(),
        }
    }

    pub fn metric_error<S: Into<String>>(message: S) -> J2kError {
        J2kError::MetricError {
            message: message.into(),
        }
    }
}

impl error::Error for J2kError {}

impl fmt::Display for J2kError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidParameter { message } => {
                write!(f, "invalid parameter: {}", message)
            }
            Self::EncodingError { message } => {
                write!(f, "encoding error: {}", message)
            }
            Self::DecodingError { message } => {
                write!(f, "decoding error: {}", message)
            }
            Self::MetricError { message } => {
                write!(f, "metric error: {}", message)
            }
        }
    }
}

pub type J2kResult<T> = Result<T, J2kError>;
