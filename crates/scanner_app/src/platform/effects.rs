use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use scanner_core::{CameraAuthorization, Effect, Msg, PlatformCameraStatus, SubmissionResult};
use scanner_engine::{
    EngineError, EngineEvent, EngineHandle, ProductReply, SubmitError, SubmitSettings,
};
use scanner_logging::{scan_debug, scan_info};

use super::persistence;
use super::HostEvent;

/// Codes typed or piped into stdin need no camera permission.
const STDIN_SCANNER: PlatformCameraStatus = PlatformCameraStatus {
    camera_present: true,
    authorization: CameraAuthorization::Authorized,
    scanner_supported: true,
};

pub(crate) type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Executes effects for one session.
///
/// Dropping the runner stops its completion loop, which releases the last
/// engine handle and lets the engine runtime shut down.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    settings_path: PathBuf,
    events: mpsc::Sender<HostEvent>,
    stop: Arc<AtomicBool>,
    event_loop: Option<JoinHandle<()>>,
}

impl EffectRunner {
    pub(crate) fn new(
        submit_settings: SubmitSettings,
        settings_path: PathBuf,
        events: mpsc::Sender<HostEvent>,
        clock: Clock,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(submit_settings)?;
        let mut runner = Self {
            engine,
            settings_path,
            events,
            stop: Arc::new(AtomicBool::new(false)),
            event_loop: None,
        };
        runner.event_loop = Some(runner.spawn_event_loop(clock));
        Ok(runner)
    }

    /// Executes `effects`; answers the platform can give right away are
    /// returned for the session to apply before its next queued event.
    pub(crate) fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::QueryScannerAccess => {
                    replies.push(Msg::AccessStatusReported(STDIN_SCANNER));
                }
                Effect::SubmitScan {
                    submission_id,
                    endpoint,
                    code,
                } => {
                    scan_info!(
                        "SubmitScan submission_id={} code={} endpoint={}",
                        submission_id,
                        code,
                        endpoint
                    );
                    self.engine.submit(submission_id, endpoint.as_str(), code);
                }
                Effect::PersistSettings(config) => {
                    scan_debug!("Persisting settings to {:?}", self.settings_path);
                    persistence::save_settings(&self.settings_path, &config);
                }
            }
        }
        replies
    }

    /// Carries engine completions back into the session queue.
    fn spawn_event_loop(&self, clock: Clock) -> JoinHandle<()> {
        let engine = self.engine.clone();
        let events = self.events.clone();
        let stop = Arc::clone(&self.stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                    continue;
                };
                let msg = match event {
                    EngineEvent::SubmissionCompleted {
                        submission_id,
                        code,
                        result,
                    } => {
                        scan_debug!("Submission {} for {} completed", submission_id, code);
                        Msg::SubmissionFinished {
                            submission_id,
                            result: to_submission_result(result),
                            completed_at: clock(),
                        }
                    }
                };
                if events.send(HostEvent::Msg(msg)).is_err() {
                    break;
                }
            }
            scan_debug!("Effect event loop stopped");
        })
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(event_loop) = self.event_loop.take() {
            let _ = event_loop.join();
        }
    }
}

pub(crate) fn to_submission_result(result: Result<ProductReply, SubmitError>) -> SubmissionResult {
    match result {
        Ok(ProductReply::Found { article }) => SubmissionResult::Found { article },
        Ok(ProductReply::NotFound { reason }) => SubmissionResult::NotFound { reason },
        Ok(ProductReply::Unrecognized) => SubmissionResult::InvalidResponse,
        Err(err) if err.is_transport() => SubmissionResult::Network {
            description: err.message,
        },
        Err(_) => SubmissionResult::InvalidResponse,
    }
}
