use chrono::{DateTime, Utc};

use crate::submission::{settle, SubmissionResult};
use crate::view_model::{AppViewModel, HistoryRowView};
use crate::{
    ConfigError, EntryId, HistoryEntry, HistoryStore, ScanOutcome, ScannerAccess, ServerConfig,
};

pub type SubmissionId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    id: SubmissionId,
    code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    config: ServerConfig,
    access: ScannerAccess,
    outcome: ScanOutcome,
    history: HistoryStore,
    in_flight: Option<InFlight>,
    /// Last code that entered Loading; repeats are ignored until any other code
    /// is recognized or the user asks for a rescan.
    last_submitted: Option<String>,
    next_submission_id: SubmissionId,
    next_entry_id: EntryId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            access: self.access,
            status_text: self.outcome.status_text(),
            is_loading: self.outcome.is_loading(),
            current_code: self.outcome.code().map(ToOwned::to_owned),
            server_host: self.config.host.clone(),
            server_port: self.config.port.clone(),
            history: self
                .history
                .iter()
                .map(|entry| HistoryRowView {
                    id: entry.id(),
                    code: entry.code().to_string(),
                    message: entry.message().to_string(),
                    succeeded: entry.succeeded(),
                    timestamp: entry.timestamp(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn access(&self) -> ScannerAccess {
        self.access
    }

    pub fn outcome(&self) -> &ScanOutcome {
        &self.outcome
    }

    /// Read-only view of the session history.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn is_submission_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_access(&mut self, access: ScannerAccess) {
        if self.access != access {
            self.access = access;
            self.mark_dirty();
        }
    }

    pub(crate) fn restore_config(&mut self, mut config: ServerConfig) {
        config.normalize();
        if self.config != config {
            self.config = config;
            self.mark_dirty();
        }
    }

    /// Returns `true` when the host actually changed.
    pub(crate) fn set_host(&mut self, host: String) -> bool {
        if self.config.host == host {
            return false;
        }
        self.config.host = host;
        self.mark_dirty();
        true
    }

    /// Returns `true` when the port actually changed.
    pub(crate) fn set_port(&mut self, port: String) -> bool {
        let before = self.config.port.clone();
        self.config.port = port;
        self.config.normalize();
        if self.config.port == before {
            return false;
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn was_last_submitted(&self, code: &str) -> bool {
        self.last_submitted.as_deref() == Some(code)
    }

    pub(crate) fn forget_last_submitted(&mut self) {
        self.last_submitted = None;
    }

    /// Config errors abort before Loading and leave the history untouched.
    pub(crate) fn fail_preflight(&mut self, code: String, err: &ConfigError) {
        let outcome = ScanOutcome::Failure {
            code,
            message: err.to_string(),
        };
        if self.outcome != outcome {
            self.outcome = outcome;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_submission(&mut self, code: String) -> SubmissionId {
        self.next_submission_id += 1;
        let id = self.next_submission_id;
        self.outcome = ScanOutcome::Loading { code: code.clone() };
        self.last_submitted = Some(code.clone());
        self.in_flight = Some(InFlight { id, code });
        self.mark_dirty();
        id
    }

    /// Applies the terminal outcome and its history entry together.
    ///
    /// Returns `false` if `id` is not the submission in flight.
    pub(crate) fn complete_submission(
        &mut self,
        id: SubmissionId,
        result: SubmissionResult,
        completed_at: DateTime<Utc>,
    ) -> bool {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.id == id => in_flight,
            other => {
                self.in_flight = other;
                return false;
            }
        };

        let settlement = settle(in_flight.code.clone(), result);
        self.next_entry_id += 1;
        self.history.append(HistoryEntry::new(
            self.next_entry_id,
            in_flight.code,
            settlement.history_message,
            settlement.succeeded,
            completed_at,
        ));
        self.outcome = settlement.outcome;
        self.mark_dirty();
        true
    }
}
