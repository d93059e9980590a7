use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use scanner_core::Msg;
use scanner_logging::{scan_debug, scan_warn};

use super::HostEvent;

/// One stdin line, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Recognized-item event with a decodable payload.
    Code(String),
    /// Recognized-item event without a payload.
    Blank,
    Host(String),
    Port(String),
    Again,
    Access,
    History,
    Quit,
    Unknown(String),
}

pub(crate) fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }
    let Some(command) = line.strip_prefix(':') else {
        return Command::Code(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim().to_string()),
        None => (command, String::new()),
    };
    match name {
        "host" => Command::Host(arg),
        "port" => Command::Port(arg),
        "again" => Command::Again,
        "access" => Command::Access,
        "history" => Command::History,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

fn to_event(command: Command) -> Option<HostEvent> {
    let event = match command {
        Command::Code(code) => HostEvent::Msg(Msg::CodeRecognized(code)),
        Command::Host(host) => HostEvent::Msg(Msg::ServerHostEdited(host)),
        Command::Port(port) => HostEvent::Msg(Msg::ServerPortEdited(port)),
        Command::Again => HostEvent::Msg(Msg::RescanRequested),
        Command::Access => HostEvent::Msg(Msg::AccessRefreshRequested),
        Command::History => HostEvent::ShowHistory,
        Command::Quit => HostEvent::InputClosed,
        Command::Blank => return None,
        Command::Unknown(line) => {
            scan_warn!("Ignoring unknown command {:?}", line);
            return None;
        }
    };
    Some(event)
}

/// Forwards every line of `reader` as host events until EOF or `:quit`.
pub(crate) fn forward_lines<R: BufRead>(reader: R, tx: &mpsc::Sender<HostEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                scan_warn!("Stopped reading input: {}", err);
                break;
            }
        };
        let Some(event) = to_event(parse_line(&line)) else {
            continue;
        };
        let quit = matches!(event, HostEvent::InputClosed);
        if tx.send(event).is_err() || quit {
            return;
        }
    }
    scan_debug!("Input closed");
    let _ = tx.send(HostEvent::InputClosed);
}

pub(crate) fn spawn_stdin_reader(tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        forward_lines(stdin.lock(), &tx);
    });
}
