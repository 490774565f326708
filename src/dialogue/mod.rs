// Turn-based voice agent flow, driven by text so it runs without audio devices.

pub mod events;
pub mod extract;
pub mod listener;
pub mod session;

pub use events::{AgentEvent, ConsoleHandler, EventHandler, EventLog, LogKind};
pub use listener::{Listener, ScriptedListener, StdinListener};
pub use session::{CallAgent, CallOutcome, MAX_ATTEMPTS};
