use chrono::SecondsFormat;
use scanner_core::{AppViewModel, HistoryRowView, ScannerAccess};

/// Text rendition of the session header.
pub(crate) fn render(view: &AppViewModel) -> Vec<String> {
    if view.access != ScannerAccess::Available {
        return vec![format!("[scanner] {}", view.access.describe())];
    }

    let mut lines = vec![format!("[scanner] {}", view.status_text)];
    if view.is_loading {
        lines.push("  waiting for server...".to_string());
    }
    if let Some(code) = &view.current_code {
        lines.push(format!("  Code: {code}"));
    }
    let host = if view.server_host.is_empty() {
        "<not set>"
    } else {
        view.server_host.as_str()
    };
    lines.push(format!("  Server: {}:{}", host, view.server_port));
    if let Some(latest) = view.history.first() {
        lines.push(format!(
            "  History ({}), latest: {}",
            view.history.len(),
            history_row(latest)
        ));
    }
    lines
}

/// Full history, newest first.
pub(crate) fn render_history(view: &AppViewModel) -> Vec<String> {
    if view.history.is_empty() {
        return vec!["History: empty".to_string()];
    }
    let mut lines = Vec::with_capacity(view.history.len() + 1);
    lines.push(format!("History ({} entries)", view.history.len()));
    lines.extend(view.history.iter().map(|row| format!("  {}", history_row(row))));
    lines
}

fn history_row(row: &HistoryRowView) -> String {
    let marker = if row.succeeded { "ok" } else { "fail" };
    format!(
        "[{}] {} {} ({})",
        marker,
        row.code,
        row.message,
        row.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
