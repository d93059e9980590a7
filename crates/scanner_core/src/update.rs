use crate::{AppState, Effect, Msg, ScannerAccess};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted | Msg::AccessRefreshRequested => vec![Effect::QueryScannerAccess],
        Msg::AccessStatusReported(status) => {
            state.set_access(ScannerAccess::from_platform(status));
            Vec::new()
        }
        Msg::RestoreSettings(config) => {
            state.restore_config(config);
            Vec::new()
        }
        Msg::ServerHostEdited(host) => {
            if state.set_host(host) {
                vec![Effect::PersistSettings(state.config().clone())]
            } else {
                Vec::new()
            }
        }
        Msg::ServerPortEdited(port) => {
            if state.set_port(port) {
                vec![Effect::PersistSettings(state.config().clone())]
            } else {
                Vec::new()
            }
        }
        Msg::CodeRecognized(code) => on_code_recognized(&mut state, code),
        Msg::SubmissionFinished {
            submission_id,
            result,
            completed_at,
        } => {
            // Unknown ids are stale completions and leave the state untouched.
            state.complete_submission(submission_id, result, completed_at);
            Vec::new()
        }
        Msg::RescanRequested => {
            state.forget_last_submitted();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// One submission per recognized code.
///
/// A code repeating the last submission is ignored until some other code is
/// recognized or a rescan is requested. Any other code counts, even one that is
/// then dropped because a submission is in flight or rejected by the server
/// configuration.
fn on_code_recognized(state: &mut AppState, code: String) -> Vec<Effect> {
    if code.is_empty() || state.access() != ScannerAccess::Available {
        return Vec::new();
    }
    if state.was_last_submitted(&code) {
        return Vec::new();
    }
    state.forget_last_submitted();
    if state.is_submission_in_flight() {
        return Vec::new();
    }

    match state.config().validate() {
        Ok(endpoint) => {
            let submission_id = state.begin_submission(code.clone());
            vec![Effect::SubmitScan {
                submission_id,
                endpoint,
                code,
            }]
        }
        Err(err) => {
            state.fail_preflight(code, &err);
            Vec::new()
        }
    }
}
