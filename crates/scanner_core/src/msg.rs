use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host finished starting up; scanner access has not been queried yet.
    SessionStarted,
    /// Platform answered a scanner access query.
    AccessStatusReported(crate::PlatformCameraStatus),
    /// User asked to check camera access again.
    AccessRefreshRequested,
    /// Restore previously persisted server settings.
    RestoreSettings(crate::ServerConfig),
    /// User edited the server host.
    ServerHostEdited(String),
    /// User edited the server port.
    ServerPortEdited(String),
    /// Scanner decoded a barcode payload.
    CodeRecognized(String),
    /// Engine completion for a submission.
    SubmissionFinished {
        submission_id: crate::SubmissionId,
        result: crate::SubmissionResult,
        completed_at: DateTime<Utc>,
    },
    /// User wants the code currently in view submitted again.
    RescanRequested,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
