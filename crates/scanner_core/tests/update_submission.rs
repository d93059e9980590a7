use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use scanner_core::{
    update, AppState, CameraAuthorization, Effect, Msg, PlatformCameraStatus, ScanOutcome,
    ServerConfig, SubmissionId, SubmissionResult,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scanner_logging::initialize_for_tests);
}

fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, second).unwrap()
}

fn ready_state(host: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::SessionStarted);
    let (state, _) = update(
        state,
        Msg::AccessStatusReported(PlatformCameraStatus {
            camera_present: true,
            authorization: CameraAuthorization::Authorized,
            scanner_supported: true,
        }),
    );
    let (mut state, _) = update(
        state,
        Msg::RestoreSettings(ServerConfig::new(host, "3000")),
    );
    state.consume_dirty();
    state
}

fn scan(state: AppState, code: &str) -> (AppState, Option<SubmissionId>) {
    let (state, effects) = update(state, Msg::CodeRecognized(code.to_string()));
    let id = effects.iter().find_map(|effect| match effect {
        Effect::SubmitScan { submission_id, .. } => Some(*submission_id),
        _ => None,
    });
    (state, id)
}

fn finish(state: AppState, id: SubmissionId, result: SubmissionResult, second: u32) -> AppState {
    let (state, effects) = update(
        state,
        Msg::SubmissionFinished {
            submission_id: id,
            result,
            completed_at: at(second),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn recognized_code_enters_loading_and_emits_submit() {
    init_logging();
    let state = ready_state("192.168.1.5");

    let (mut state, effects) = update(state, Msg::CodeRecognized("0123456789".into()));

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::SubmitScan {
            submission_id,
            endpoint,
            code,
        } => {
            assert_eq!(*submission_id, 1);
            assert_eq!(
                endpoint.as_str(),
                "http://192.168.1.5:3000/addProductByBarcode"
            );
            assert_eq!(code, "0123456789");
        }
        other => panic!("unexpected effect {other:?}"),
    }
    assert_eq!(
        state.outcome(),
        &ScanOutcome::Loading {
            code: "0123456789".into()
        }
    );
    let view = state.view();
    assert!(view.is_loading);
    assert_eq!(view.status_text, "Submitting...");
    assert!(state.history().is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn found_article_is_success_and_recorded() {
    init_logging();
    let (state, id) = scan(ready_state("192.168.1.5"), "0123456789");
    let state = finish(
        state,
        id.expect("submit effect"),
        SubmissionResult::Found {
            article: "Milk 1L".into(),
        },
        1,
    );

    assert_eq!(
        state.outcome(),
        &ScanOutcome::Success {
            code: "0123456789".into(),
            article: "Milk 1L".into()
        }
    );
    let head = state.history().latest().expect("history entry");
    assert_eq!(head.code(), "0123456789");
    assert_eq!(head.message(), "Milk 1L");
    assert!(head.succeeded());
    assert_eq!(head.timestamp(), at(1));
    assert_eq!(state.view().status_text, "Found: Milk 1L");
    assert!(!state.is_submission_in_flight());
}

#[test]
fn server_not_found_keeps_bare_reason_in_history() {
    init_logging();
    let (state, id) = scan(ready_state("192.168.1.5"), "0123456789");
    let state = finish(
        state,
        id.unwrap(),
        SubmissionResult::NotFound {
            reason: "not found".into(),
        },
        2,
    );

    assert_eq!(
        state.outcome(),
        &ScanOutcome::Failure {
            code: "0123456789".into(),
            message: "item not found: not found".into()
        }
    );
    let head = state.history().latest().unwrap();
    assert_eq!(head.message(), "not found");
    assert!(!head.succeeded());
}

#[test]
fn invalid_response_is_generic_failure() {
    init_logging();
    let (state, id) = scan(ready_state("192.168.1.5"), "42");
    let state = finish(state, id.unwrap(), SubmissionResult::InvalidResponse, 3);

    assert_eq!(state.view().status_text, "invalid response");
    let head = state.history().latest().unwrap();
    assert_eq!(head.message(), "invalid response");
    assert!(!head.succeeded());
}

#[test]
fn network_error_is_recorded_with_description() {
    init_logging();
    let (state, id) = scan(ready_state("192.168.1.5"), "42");
    let state = finish(
        state,
        id.unwrap(),
        SubmissionResult::Network {
            description: "connection refused".into(),
        },
        4,
    );

    assert_eq!(state.view().status_text, "network error: connection refused");
    let head = state.history().latest().unwrap();
    assert_eq!(head.message(), "network error: connection refused");
    assert!(!head.succeeded());
}

#[test]
fn missing_host_fails_fast_without_history() {
    init_logging();
    let state = ready_state("");
    let before = state.history().len();

    let (mut state, effects) = update(state, Msg::CodeRecognized("0123456789".into()));

    assert!(effects.is_empty());
    assert_eq!(
        state.outcome(),
        &ScanOutcome::Failure {
            code: "0123456789".into(),
            message: "configure server address".into()
        }
    );
    assert_eq!(state.history().len(), before);
    assert!(!state.is_submission_in_flight());
    assert!(state.consume_dirty());

    // The same frame seen again changes nothing.
    let (mut state, effects) = update(state, Msg::CodeRecognized("0123456789".into()));
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn config_failure_does_not_block_the_code_once_configured() {
    init_logging();
    let (state, _) = scan(ready_state(""), "777");
    let (state, effects) = update(state, Msg::ServerHostEdited("10.0.0.2".into()));
    assert!(matches!(effects.as_slice(), [Effect::PersistSettings(_)]));

    let (_state, id) = scan(state, "777");
    assert!(id.is_some());
}

#[test]
fn malformed_port_reports_invalid_configuration() {
    init_logging();
    let state = ready_state("192.168.1.5");
    let (state, _) = update(state, Msg::ServerPortEdited("not-a-port".into()));

    let (state, id) = scan(state, "42");

    assert!(id.is_none());
    assert_eq!(state.view().status_text, "invalid server configuration");
    assert!(state.history().is_empty());
}

#[test]
fn history_is_newest_first_across_submissions() {
    init_logging();
    let mut state = ready_state("192.168.1.5");
    for (n, code) in ["111", "222", "333"].into_iter().enumerate() {
        let (next, id) = scan(state, code);
        state = finish(
            next,
            id.unwrap(),
            SubmissionResult::Found {
                article: format!("article {code}"),
            },
            n as u32,
        );
    }

    let codes: Vec<_> = state
        .history()
        .all()
        .iter()
        .map(|entry| entry.code().to_string())
        .collect();
    assert_eq!(codes, vec!["333", "222", "111"]);
    assert_eq!(state.history().all(), state.history().all());

    let ids: Vec<_> = state.view().history.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (mut state, id) = scan(ready_state("192.168.1.5"), "42");
    let id = id.unwrap();
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::SubmissionFinished {
            submission_id: id + 10,
            result: SubmissionResult::InvalidResponse,
            completed_at: at(5),
        },
    );
    assert!(state.outcome().is_loading());
    assert!(state.history().is_empty());
    assert!(state.is_submission_in_flight());
    assert!(!state.consume_dirty());

    let state = finish(state, id, SubmissionResult::InvalidResponse, 6);
    assert_eq!(state.history().len(), 1);

    // A second completion for an already settled id is a no-op too.
    let (state, _) = update(
        state,
        Msg::SubmissionFinished {
            submission_id: id,
            result: SubmissionResult::InvalidResponse,
            completed_at: at(7),
        },
    );
    assert_eq!(state.history().len(), 1);
}
