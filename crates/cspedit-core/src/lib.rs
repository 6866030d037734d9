//! # cspedit Core Library
//!
//! This library provides the core logic for `cspedit`, an interactive editor
//! for Content-Security-Policy headers. The `cspedit` binary is a thin layer
//! that wires these pieces to the terminal and the network.
//!
//! ## Architecture
//!
//! - **Policy**: ordered directive model with a reversible parser/serializer
//! - **Editor**: a pure state machine plus a session driver that owns the
//!   console and the persistence sink
//! - **Fetch**: retrieves the policy header of a URL
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`DirectiveSet`]: insertion-ordered directive name to values mapping
//! - [`Editor`]: menu / edit / add state machine
//! - [`Session`]: drives an [`Editor`] through a [`Console`]
//! - [`Config`]: application configuration management

pub mod editor;
pub mod error;
pub mod fetch;
pub mod policy;
pub mod storage;

pub use editor::{
    Console, Editor, EditorState, FileSink, MemorySink, NullSink, PolicySink, Reply,
    ScriptedConsole, Session, SessionOutcome, StdConsole, Termination,
};
pub use error::{ConfigError, CoreError, FetchError};
pub use fetch::{fetch_policy, FetchOptions};
pub use policy::DirectiveSet;
pub use storage::Config;
