use crate::client::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A transient, dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    /// Error toast for a failed call, e.g. `Failed to update item: name: required`.
    ///
    /// Transport failures stay generic; server messages are kept verbatim.
    pub fn failure(action: &str, err: &ClientError) -> Self {
        let message = match err {
            ClientError::Transport(_) => format!("{action}. Server unreachable."),
            ClientError::NotFound => format!("{action}: it no longer exists."),
            ClientError::Unauthorized | ClientError::Forbidden => {
                format!("{action}: {err}.")
            }
            ClientError::Validation(detail)
            | ClientError::Conflict(detail)
            | ClientError::Server(detail) => format!("{action}: {detail}"),
        };
        Self::error(message)
    }
}
