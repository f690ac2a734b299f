use serde::Serialize;

pub const COMPLETE_MESSAGE: &str = "Transaction Complete!";
pub const FAILED_PREFIX: &str = "Transaction Failed: ";

/// Progress of the most recent add-funds submission.
///
/// `Result` and `Error` are terminal until the next submit moves the status
/// back to `Running`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Idle,
    Running,
    Result {
        message: String,
        transaction_id: String,
    },
    Error {
        message: String,
    },
}

impl TransactionStatus {
    pub fn running() -> Self {
        Self::Running
    }

    pub fn result(message: impl Into<String>, transaction_id: impl Into<String>) -> Self {
        Self::Result {
            message: message.into(),
            transaction_id: transaction_id.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Successful settlement of a submission.
    pub fn complete(transaction_id: impl Into<String>) -> Self {
        Self::result(COMPLETE_MESSAGE, transaction_id)
    }

    /// Failed settlement; `description` is whatever the backend reported.
    pub fn failed(description: impl std::fmt::Display) -> Self {
        Self::error(format!("{FAILED_PREFIX}{description}"))
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Result { .. } | Self::Error { .. })
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            Self::Result { transaction_id, .. } => Some(transaction_id),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Result { message, .. } | Self::Error { message } => Some(message),
            Self::Idle | Self::Running => None,
        }
    }
}
