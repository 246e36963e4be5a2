//! Error types for the conversational pipeline.

use triage_core::error::TriageError;
use triage_model::ModelError;

/// Errors from the predict-and-enrich pipeline.
///
/// These are per-request failures: the caller reports them on the same
/// channel and keeps the conversation alive.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("prediction failed: {0}")]
    Prediction(String),
}

impl From<ModelError> for ChatError {
    fn from(err: ModelError) -> Self {
        ChatError::Prediction(err.to_string())
    }
}

impl From<ChatError> for TriageError {
    fn from(err: ChatError) -> Self {
        TriageError::Chat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::MessageTooLong(2000);
        assert_eq!(
            err.to_string(),
            "message exceeds maximum length of 2000 characters"
        );

        let err = ChatError::Prediction("model refused".to_string());
        assert_eq!(err.to_string(), "prediction failed: model refused");
    }

    #[test]
    fn test_chat_error_from_model_error() {
        let model_err = ModelError::Malformed("bad tree".to_string());
        let err: ChatError = model_err.into();
        assert!(matches!(err, ChatError::Prediction(_)));
        assert!(err.to_string().contains("bad tree"));
    }

    #[test]
    fn test_chat_error_into_triage_error() {
        let err: TriageError = ChatError::MessageTooLong(10).into();
        assert!(matches!(err, TriageError::Chat(_)));
    }
}
