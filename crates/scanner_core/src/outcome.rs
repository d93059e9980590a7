/// Result of the most recent submission, as shown to the user.
///
/// Overwritten in place on every transition; never queued.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanOutcome {
    #[default]
    Idle,
    Loading {
        code: String,
    },
    Success {
        code: String,
        article: String,
    },
    Failure {
        code: String,
        message: String,
    },
}

impl ScanOutcome {
    pub fn code(&self) -> Option<&str> {
        match self {
            ScanOutcome::Idle => None,
            ScanOutcome::Loading { code }
            | ScanOutcome::Success { code, .. }
            | ScanOutcome::Failure { code, .. } => Some(code),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScanOutcome::Loading { .. })
    }

    /// Header text for the current outcome.
    pub fn status_text(&self) -> String {
        match self {
            ScanOutcome::Idle => "Scanning barcode".to_string(),
            ScanOutcome::Loading { .. } => "Submitting...".to_string(),
            ScanOutcome::Success { article, .. } => format!("Found: {article}"),
            ScanOutcome::Failure { message, .. } => message.clone(),
        }
    }
}
