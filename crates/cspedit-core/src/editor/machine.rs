//! Editor state machine.
//!
//! The machine does no I/O. The caller renders [`Editor::render_menu`] on
//! every entry to [`EditorState::Menu`], prompts with [`Editor::prompt`], and
//! feeds each line of input to [`Editor::handle`].
//!
//! ## Usage
//!
//! ```
//! use cspedit_core::{DirectiveSet, Editor, Termination};
//!
//! let mut editor = Editor::new(DirectiveSet::parse("default-src 'self'"));
//! editor.handle("1");
//! editor.handle("'none'");
//! editor.handle("p");
//! assert_eq!(
//!     editor.termination(),
//!     Some(&Termination::Printed("default-src 'none'".to_string()))
//! );
//! ```

use std::fmt::Write as _;

use tracing::debug;

use crate::policy::{split_tokens, DirectiveSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    /// Showing the directive list, waiting for a command.
    Menu,
    /// Waiting for replacement values of the directive at `index` (0-based).
    EditValue { index: usize },
    /// Waiting for a new directive's name and values.
    AddName,
    Terminated(Termination),
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// `P`: the serialized policy.
    Printed(String),
    /// `Q`, or input closed.
    Quit,
}

/// Outcome of feeding one line to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Accepted,
    /// Menu input was neither a command nor an in-range position.
    InvalidSelection(String),
    /// Add input contained no tokens.
    InvalidDirective,
}

impl Reply {
    /// Notice to show the user, if any.
    pub fn notice(&self) -> Option<String> {
        match self {
            Reply::Accepted => None,
            Reply::InvalidSelection(input) => Some(format!("Invalid selection: '{input}'")),
            Reply::InvalidDirective => {
                Some("Invalid directive: enter a name followed by its values".to_string())
            }
        }
    }
}

enum MenuCommand {
    Add,
    Print,
    Quit,
    Select(usize),
}

impl MenuCommand {
    fn parse(input: &str, len: usize) -> Option<Self> {
        if input.eq_ignore_ascii_case("a") {
            return Some(Self::Add);
        }
        if input.eq_ignore_ascii_case("p") {
            return Some(Self::Print);
        }
        if input.eq_ignore_ascii_case("q") {
            return Some(Self::Quit);
        }
        match input.parse::<usize>() {
            Ok(position) if (1..=len).contains(&position) => Some(Self::Select(position - 1)),
            _ => None,
        }
    }
}

/// Menu / edit / add state machine over a [`DirectiveSet`].
#[derive(Debug, Clone)]
pub struct Editor {
    directives: DirectiveSet,
    state: EditorState,
}

impl Editor {
    /// Start at the menu with the given directives.
    pub fn new(directives: DirectiveSet) -> Self {
        Self {
            directives,
            state: EditorState::Menu,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, EditorState::Terminated(_))
    }

    pub fn termination(&self) -> Option<&Termination> {
        match &self.state {
            EditorState::Terminated(termination) => Some(termination),
            _ => None,
        }
    }

    /// Prompt text for the current state.
    pub fn prompt(&self) -> String {
        match &self.state {
            EditorState::Menu => "Select a directive to edit, or A/P/Q: ".to_string(),
            EditorState::EditValue { index } => {
                let name = self
                    .directives
                    .get_index(*index)
                    .map(|(name, _)| name)
                    .unwrap_or_default();
                format!("New values for {name}: ")
            }
            EditorState::AddName => "New directive (name followed by values): ".to_string(),
            EditorState::Terminated(_) => String::new(),
        }
    }

    /// Directive listing plus command hints.
    pub fn render_menu(&self) -> String {
        let count = self.directives.len();
        let mut out = format!(
            "{count} {} in policy:\n",
            if count == 1 { "directive" } else { "directives" }
        );
        for (position, (name, values)) in self.directives.iter().enumerate() {
            if values.is_empty() {
                let _ = writeln!(out, "  {}. {name}", position + 1);
            } else {
                let _ = writeln!(out, "  {}. {name} {}", position + 1, values.join(" "));
            }
        }
        out.push('\n');
        out.push_str("  A) Add a directive\n");
        out.push_str("  P) Print the policy and exit\n");
        out.push_str("  Q) Quit without printing");
        out
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Feed one line of input.
    ///
    /// Input after termination is ignored.
    pub fn handle(&mut self, line: &str) -> Reply {
        match self.state {
            EditorState::Menu => self.handle_menu(line),
            EditorState::EditValue { index } => self.handle_edit(index, line),
            EditorState::AddName => self.handle_add(line),
            EditorState::Terminated(_) => Reply::Accepted,
        }
    }

    /// Input closed: end the session as if `Q` had been entered.
    pub fn close(&mut self) {
        if !self.is_terminated() {
            debug!(state = ?self.state, "input closed, quitting");
            self.state = EditorState::Terminated(Termination::Quit);
        }
    }

    /// Consume the editor, returning the directives and how it ended.
    ///
    /// An editor that never terminated reports [`Termination::Quit`].
    pub fn into_parts(self) -> (DirectiveSet, Termination) {
        let termination = match self.state {
            EditorState::Terminated(termination) => termination,
            _ => Termination::Quit,
        };
        (self.directives, termination)
    }

    fn handle_menu(&mut self, line: &str) -> Reply {
        let input = line.trim();
        match MenuCommand::parse(input, self.directives.len()) {
            Some(MenuCommand::Add) => self.state = EditorState::AddName,
            Some(MenuCommand::Print) => {
                let policy = self.directives.serialize();
                self.state = EditorState::Terminated(Termination::Printed(policy));
            }
            Some(MenuCommand::Quit) => self.state = EditorState::Terminated(Termination::Quit),
            Some(MenuCommand::Select(index)) => self.state = EditorState::EditValue { index },
            None => {
                debug!(input, "invalid menu selection");
                return Reply::InvalidSelection(input.to_string());
            }
        }
        debug!(state = ?self.state, "menu transition");
        Reply::Accepted
    }

    fn handle_edit(&mut self, index: usize, line: &str) -> Reply {
        let values = split_tokens(line);
        debug!(index, count = values.len(), "replacing directive values");
        self.directives.set_values(index, values);
        self.state = EditorState::Menu;
        Reply::Accepted
    }

    fn handle_add(&mut self, line: &str) -> Reply {
        let mut tokens = split_tokens(line).into_iter();
        let Some(name) = tokens.next() else {
            return Reply::InvalidDirective;
        };
        debug!(name = %name, "adding directive");
        self.directives.insert(name, tokens.collect());
        self.state = EditorState::Menu;
        Reply::Accepted
    }
}
