//! Scanner core: pure scan-submission state machine and view-model helpers.
mod access;
mod config;
mod effect;
mod history;
mod msg;
mod outcome;
mod state;
mod submission;
mod update;
mod view_model;

pub use access::{CameraAuthorization, PlatformCameraStatus, ScannerAccess};
pub use config::{ConfigError, Endpoint, ServerConfig, DEFAULT_PORT, SUBMISSION_PATH};
pub use effect::Effect;
pub use history::{EntryId, HistoryEntry, HistoryStore};
pub use msg::Msg;
pub use outcome::ScanOutcome;
pub use state::{AppState, SubmissionId};
pub use submission::{SubmissionResult, INVALID_RESPONSE};
pub use update::update;
pub use view_model::{AppViewModel, HistoryRowView};
