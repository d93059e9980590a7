use crate::ScanOutcome;

/// Message stored for responses that match none of the known shapes.
pub const INVALID_RESPONSE: &str = "invalid response";

/// How a submission that reached the network ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Server matched an article.
    Found { article: String },
    /// Server answered with its own not-found reason.
    NotFound { reason: String },
    /// Empty, unparsable or unrecognized body.
    InvalidResponse,
    /// The request never produced a response.
    Network { description: String },
}

/// Outcome and history record derived from one [`SubmissionResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settlement {
    pub outcome: ScanOutcome,
    pub history_message: String,
    pub succeeded: bool,
}

pub(crate) fn settle(code: String, result: SubmissionResult) -> Settlement {
    match result {
        SubmissionResult::Found { article } => Settlement {
            history_message: article.clone(),
            outcome: ScanOutcome::Success { code, article },
            succeeded: true,
        },
        SubmissionResult::NotFound { reason } => Settlement {
            outcome: ScanOutcome::Failure {
                code,
                message: format!("item not found: {reason}"),
            },
            history_message: reason,
            succeeded: false,
        },
        SubmissionResult::InvalidResponse => Settlement {
            outcome: ScanOutcome::Failure {
                code,
                message: INVALID_RESPONSE.to_string(),
            },
            history_message: INVALID_RESPONSE.to_string(),
            succeeded: false,
        },
        SubmissionResult::Network { description } => {
            let message = format!("network error: {description}");
            Settlement {
                outcome: ScanOutcome::Failure {
                    code,
                    message: message.clone(),
                },
                history_message: message,
                succeeded: false,
            }
        }
    }
}
