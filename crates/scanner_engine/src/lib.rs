//! Scanner engine: HTTP submission, reply decoding and effect execution.
mod engine;
mod persist;
mod reply;
mod submit;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use persist::{write_atomically, PersistError};
pub use reply::{decode_reply, ProductReply, ReplyError};
pub use submit::{ReqwestSubmitter, SubmitSettings, Submitter};
pub use types::{EngineEvent, FailureKind, SubmissionId, SubmitError};
