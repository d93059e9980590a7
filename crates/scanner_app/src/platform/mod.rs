//! Headless host: stdin stands in for the camera, stdout for the screen.
mod app;
mod effects;
mod input;
pub mod logging;
mod persistence;
mod render;

use scanner_core::Msg;

pub use app::run_app;

/// Everything the session loop reacts to, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostEvent {
    Msg(Msg),
    ShowHistory,
    InputClosed,
}
