use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use scanner_core::{update, AppState, Msg};
use scanner_engine::SubmitSettings;
use scanner_logging::{scan_debug, scan_info};

use super::effects::EffectRunner;
use super::{input, persistence, render, HostEvent};
use crate::cli::Cli;

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<HostEvent>();

    let submit_settings = SubmitSettings {
        request_timeout: Duration::from_secs(cli.request_timeout_secs),
        ..SubmitSettings::default()
    };
    let runner = EffectRunner::new(
        submit_settings,
        cli.settings.clone(),
        event_tx.clone(),
        Arc::new(Utc::now),
    )
    .context("failed to start submission engine")?;

    let mut startup = vec![
        Msg::RestoreSettings(persistence::load_settings(&cli.settings)),
        Msg::SessionStarted,
    ];
    if let Some(host) = cli.host {
        startup.push(Msg::ServerHostEdited(host));
    }
    if let Some(port) = cli.port {
        startup.push(Msg::ServerPortEdited(port));
    }
    for msg in startup {
        event_tx
            .send(HostEvent::Msg(msg))
            .context("session queue closed during startup")?;
    }

    input::spawn_stdin_reader(event_tx);

    let stdout = io::stdout();
    let state = run_session(AppState::new(), &event_rx, &runner, &mut stdout.lock())
        .context("failed to write session output")?;
    scan_info!(
        "Session ended with {} history entries",
        state.history().len()
    );
    Ok(())
}

/// Single session context: every message goes through `update` here, in
/// arrival order. Returns once input is closed and nothing is in flight.
pub(crate) fn run_session<W: Write>(
    mut state: AppState,
    events: &mpsc::Receiver<HostEvent>,
    runner: &EffectRunner,
    out: &mut W,
) -> io::Result<AppState> {
    let mut input_closed = false;
    while let Ok(event) = events.recv() {
        match event {
            HostEvent::Msg(msg) => state = dispatch_msg(state, msg, runner, out)?,
            HostEvent::ShowHistory => write_lines(out, render::render_history(&state.view()))?,
            HostEvent::InputClosed => {
                scan_debug!("Input closed; waiting for in-flight submission");
                input_closed = true;
            }
        }
        if input_closed && !state.is_submission_in_flight() {
            break;
        }
    }
    Ok(state)
}

fn dispatch_msg<W: Write>(
    mut state: AppState,
    msg: Msg,
    runner: &EffectRunner,
    out: &mut W,
) -> io::Result<AppState> {
    let mut pending = VecDeque::from([msg]);
    while let Some(msg) = pending.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;
        pending.extend(runner.run(effects));
    }
    if state.consume_dirty() {
        write_lines(out, render::render(&state.view()))?;
    }
    Ok(state)
}

fn write_lines<W: Write>(out: &mut W, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
