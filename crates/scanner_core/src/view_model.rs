use chrono::{DateTime, Utc};

use crate::{EntryId, ScannerAccess};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub access: ScannerAccess,
    pub status_text: String,
    pub is_loading: bool,
    pub current_code: Option<String>,
    pub server_host: String,
    pub server_port: String,
    /// Newest first.
    pub history: Vec<HistoryRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: EntryId,
    pub code: String,
    pub message: String,
    pub succeeded: bool,
    pub timestamp: DateTime<Utc>,
}
