use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use scanner_logging::{scan_debug, scan_info, scan_warn};
use thiserror::Error;

use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{EngineEvent, SubmissionId, SubmitError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(SubmitError),
}

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        endpoint: String,
        code: String,
    },
}

/// Runs submissions on a background tokio runtime.
///
/// Completions are delivered as [`EngineEvent`]s in the order they finish.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings) -> Result<Self, EngineError> {
        let submitter = ReqwestSubmitter::new(settings).map_err(EngineError::Client)?;
        Self::with_submitter(Arc::new(submitter))
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("scanner-engine-io")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("scanner-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let submitter = submitter.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(submitter.as_ref(), command, event_tx).await;
                    });
                }
                scan_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn submit(
        &self,
        submission_id: SubmissionId,
        endpoint: impl Into<String>,
        code: impl Into<String>,
    ) {
        let command = EngineCommand::Submit {
            submission_id,
            endpoint: endpoint.into(),
            code: code.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            scan_warn!("Engine stopped; submission {} dropped", submission_id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            endpoint,
            code,
        } => {
            scan_info!("Submitting {} to {}", code, endpoint);
            let result = submitter.submit(&endpoint, &code).await;
            if let Err(err) = &result {
                scan_warn!("Submission {} failed: {}", submission_id, err);
            }
            let _ = event_tx.send(EngineEvent::SubmissionCompleted {
                submission_id,
                code,
                result,
            });
        }
    }
}
