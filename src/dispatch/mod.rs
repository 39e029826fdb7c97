//! Dispatch Module
//!
//! Turns inbound message events into command invocations: self/bot guard,
//! prefix check, tokenizing, registry lookup, handler call and failure
//! containment.

mod dispatcher;
mod event;
mod parser;
mod session;

pub use dispatcher::{DispatchOutcome, Dispatcher, IgnoreReason};
pub use event::{Author, IncomingMessage, ReplyError};
pub use parser::{Invocation, parse_invocation};
pub use session::Session;
