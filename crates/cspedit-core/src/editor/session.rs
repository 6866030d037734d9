//! Session driver: runs an [`Editor`] against a [`Console`].

use tracing::{debug, info};

use super::console::Console;
use super::machine::{Editor, EditorState, Termination};
use super::sink::PolicySink;
use crate::error::Result;
use crate::policy::DirectiveSet;

/// Final state of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub directives: DirectiveSet,
    pub termination: Termination,
}

impl SessionOutcome {
    /// The serialized policy, when the session ended with `P`.
    pub fn printed(&self) -> Option<&str> {
        match &self.termination {
            Termination::Printed(policy) => Some(policy),
            Termination::Quit => None,
        }
    }
}

/// One interactive editing session.
///
/// Holds the editor together with its console and sink for the duration of
/// the run. Pass `&mut` collaborators to inspect them afterwards.
pub struct Session<C, S> {
    editor: Editor,
    console: C,
    sink: S,
}

impl<C: Console, S: PolicySink> Session<C, S> {
    pub fn new(directives: DirectiveSet, console: C, sink: S) -> Self {
        Self {
            editor: Editor::new(directives),
            console,
            sink,
        }
    }

    /// Run until the user prints, quits, or input closes.
    ///
    /// On `P` the serialized policy is displayed and handed to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the console cannot be read or written, or if the
    /// sink fails to persist the policy.
    pub fn run(mut self) -> Result<SessionOutcome> {
        loop {
            match self.editor.state() {
                EditorState::Terminated(_) => break,
                EditorState::Menu => self.console.display(&self.editor.render_menu())?,
                EditorState::EditValue { .. } | EditorState::AddName => {}
            }

            let Some(line) = self.console.prompt(&self.editor.prompt())? else {
                self.editor.close();
                break;
            };

            if let Some(notice) = self.editor.handle(&line).notice() {
                self.console.display(&notice)?;
            }
        }

        let (directives, termination) = self.editor.into_parts();
        match &termination {
            Termination::Printed(policy) => {
                info!(directives = directives.len(), "session printed policy");
                self.console.display(policy)?;
                self.sink.persist(policy)?;
            }
            Termination::Quit => debug!("session quit without printing"),
        }

        Ok(SessionOutcome {
            directives,
            termination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{MemorySink, ScriptedConsole};

    #[test]
    fn menu_shown_on_every_entry() {
        let mut console = ScriptedConsole::new(["9", "1", "x", "q"]);
        let outcome = Session::new(DirectiveSet::parse("a 1"), &mut console, MemorySink::default())
            .run()
            .unwrap();

        assert_eq!(outcome.termination, Termination::Quit);
        let menus = console
            .displayed()
            .iter()
            .filter(|text| text.starts_with("1 directive in policy:"))
            .count();
        // initial, after the invalid selection, after the edit
        assert_eq!(menus, 3);
        assert!(console.displayed().contains(&"Invalid selection: '9'".to_string()));
    }

    #[test]
    fn quit_persists_nothing() {
        let mut sink = MemorySink::default();
        let outcome = Session::new(
            DirectiveSet::parse("a 1"),
            ScriptedConsole::new(["Q", "P"]),
            &mut sink,
        )
        .run()
        .unwrap();

        assert_eq!(outcome.printed(), None);
        assert!(sink.persisted.is_empty());
    }

    #[test]
    fn closed_input_quits() {
        let mut sink = MemorySink::default();
        let outcome = Session::new(
            DirectiveSet::parse("a 1"),
            ScriptedConsole::new(["a"]),
            &mut sink,
        )
        .run()
        .unwrap();

        assert_eq!(outcome.termination, Termination::Quit);
        assert_eq!(outcome.directives, DirectiveSet::parse("a 1"));
        assert!(sink.persisted.is_empty());
    }
}
