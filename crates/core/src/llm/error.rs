use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The endpoint could not be reached at all.
    Unavailable { detail: String },
    /// Non-2xx status or a body that does not decode as a chat completion.
    Protocol { detail: String },
    /// The body decoded but carried no choices.
    EmptyChoices,
    Other { detail: String },
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceError::Unavailable { detail } => {
                write!(f, "inference endpoint unreachable: {detail}")
            }
            InferenceError::Protocol { detail } => {
                write!(f, "inference endpoint protocol error: {detail}")
            }
            InferenceError::EmptyChoices => write!(f, "inference endpoint returned no choices"),
            InferenceError::Other { detail } => write!(f, "inference call failed: {detail}"),
        }
    }
}

impl std::error::Error for InferenceError {}
