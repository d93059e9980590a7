use crate::{Endpoint, ServerConfig, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    QueryScannerAccess,
    SubmitScan {
        submission_id: SubmissionId,
        endpoint: Endpoint,
        code: String,
    },
    PersistSettings(ServerConfig),
}
