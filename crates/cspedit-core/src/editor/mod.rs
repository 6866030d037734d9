//! Interactive directive editor.
//!
//! The editor is split into a pure state machine ([`Editor`]) and a driver
//! ([`Session`]) that owns the terminal and the persistence sink.
//!
//! ## State Transitions
//!
//! ```text
//! Menu --A--> AddName --tokens--> Menu
//! Menu --n--> EditValue --line--> Menu
//! Menu --P|Q--> Terminated
//! ```

mod console;
mod machine;
mod session;
mod sink;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use machine::{Editor, EditorState, Reply, Termination};
pub use session::{Session, SessionOutcome};
pub use sink::{FileSink, MemorySink, NullSink, PolicySink};
