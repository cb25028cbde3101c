pub type EelResult<T> = Result<T, EelError>;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum EelError {
    #[error("{0} is not a valid Eel representation")]
    NotAnEelRepr(String),

    #[error("{0} is not a valid Eel type or user defined type")]
    UnrecognizedType(String),

    #[error("{0}")]
    Type(String),

    #[error("Cannot convert type {from} to {to}")]
    Conversion {
        from: &'static str,
        to: &'static str,
    },

    #[error("Malformed {kind} payload: {payload:?}. {reason}")]
    Decode {
        kind: &'static str,
        payload: String,
        reason: String,
    },

    #[error("{0}")]
    InvalidOperation(String),

    #[error("{0} is not defined in Eel")]
    CommandNotFound(String),

    #[error("{0}")]
    File(String),

    #[error("{0}")]
    Argument(String),

    #[error("Registry misconfigured: {0}")]
    Registry(String),

    #[error("{0}")]
    Internal(String),
}

impl EelError {
    /// Name printed in front of the diagnostic line on stderr.
    pub const fn name(&self) -> &'static str {
        match self {
            EelError::NotAnEelRepr(_) => "NotAnEelRepr",
            EelError::UnrecognizedType(_) => "UnrecognizedType",
            EelError::Type(_) | EelError::Conversion { .. } | EelError::Decode { .. } => {
                "TypeError"
            }
            EelError::InvalidOperation(_) => "InvalidOperationError",
            EelError::CommandNotFound(_) => "CommandNotFound",
            EelError::File(_) => "FileError",
            EelError::Argument(_) => "ArgumentError",
            EelError::Registry(_) => "InternalError<Registry>",
            EelError::Internal(_) => "InternalError",
        }
    }

    /// Process exit status, also echoed as the `err@<code>` token.
    pub const fn exit_code(&self) -> i32 {
        match self {
            EelError::Internal(_) | EelError::Registry(_) => 1,
            EelError::Argument(_) => 2,
            EelError::CommandNotFound(_) => 3,
            EelError::File(_) => 4,
            EelError::NotAnEelRepr(_) => 5,
            EelError::UnrecognizedType(_) => 6,
            EelError::Type(_) | EelError::Conversion { .. } | EelError::Decode { .. } => 7,
            EelError::InvalidOperation(_) => 8,
        }
    }

    /// Internal errors get the full debug chain on stderr instead of a one-liner.
    pub const fn is_internal(&self) -> bool {
        matches!(self, EelError::Internal(_) | EelError::Registry(_))
    }

    pub const fn is_not_repr(&self) -> bool {
        matches!(self, EelError::NotAnEelRepr(_))
    }

    pub fn decode(kind: &'static str, payload: &str, reason: impl ToString) -> Self {
        EelError::Decode {
            kind,
            payload: payload.to_owned(),
            reason: reason.to_string(),
        }
    }
}
