//! Completion candidates and the command registry.
//!
//! A [`Candidate`] is what the list shows. Commands are shared with the registry through
//! `Arc`; every other variant is built for one ranking pass and dropped with it.

use std::collections::HashMap;
use std::sync::Arc;

use input::{dirname, expand_template, join_path, tokenize};

/// Who owns the value behind a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Shared with the [`CommandRegistry`]; outlives the candidate list.
    Registry,
    /// Built for a single ranking pass.
    Transient,
}

/// One item offered to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Text(TextCandidate),
    PathPart(PathPart),
    Command(Arc<Command>),
    History(HistoryCandidate),
}

impl Candidate {
    pub fn text(value: impl Into<String>) -> Self {
        Candidate::Text(TextCandidate::new(value))
    }

    /// Text inserted into the input line when the candidate is picked.
    pub fn complete_value(&self) -> &str {
        match self {
            Candidate::Text(text) => &text.completion,
            Candidate::PathPart(part) => &part.basename,
            Candidate::Command(command) => &command.name,
            Candidate::History(history) => &history.normalized_path,
        }
    }

    /// Label shown in the candidate list.
    pub fn display_value(&self) -> &str {
        match self {
            Candidate::Text(text) => &text.value,
            Candidate::PathPart(part) => &part.basename,
            Candidate::Command(command) => &command.name,
            Candidate::History(history) => &history.normalized_path,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Candidate::Text(text) => text.description.as_deref(),
            Candidate::PathPart(_) => None,
            Candidate::Command(command) => {
                Some(command.description.as_deref().unwrap_or(&command.path))
            }
            Candidate::History(history) => Some(&history.display_name),
        }
    }

    /// Whether picking the candidate may fill the input while typing.
    pub fn supports_autocomplete(&self) -> bool {
        matches!(self, Candidate::Command(_) | Candidate::History(_))
    }

    /// Filesystem path a context menu would act on.
    pub fn context_path(&self) -> Option<String> {
        match self {
            Candidate::Text(_) => None,
            Candidate::PathPart(part) => Some(part.path()),
            Candidate::Command(command) => Some(command.command_path()),
            Candidate::History(history) => {
                Some(tokenize(&history.normalized_path).first_value().to_string())
            }
        }
    }

    pub fn icon_ref(&self) -> Option<&str> {
        match self {
            Candidate::Text(text) => text.icon.as_deref(),
            Candidate::Command(command) => command.icon.as_deref(),
            Candidate::PathPart(_) | Candidate::History(_) => None,
        }
    }

    pub fn ownership(&self) -> Ownership {
        match self {
            Candidate::Command(_) => Ownership::Registry,
            Candidate::Text(_) | Candidate::PathPart(_) | Candidate::History(_) => {
                Ownership::Transient
            }
        }
    }

    pub fn as_command(&self) -> Option<&Arc<Command>> {
        match self {
            Candidate::Command(command) => Some(command),
            _ => None,
        }
    }
}

/// Plain string candidate, as returned by option providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCandidate {
    pub value: String,
    /// Inserted text; equals `value` unless the provider asked for something else.
    pub completion: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl TextCandidate {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            completion: value.clone(),
            value,
            description: None,
            icon: None,
        }
    }

    pub fn with_completion(mut self, completion: impl Into<String>) -> Self {
        self.completion = completion.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A directory entry: `dirname` is where it was listed, `basename` the entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPart {
    pub dirname: String,
    pub basename: String,
}

impl PathPart {
    pub fn new(dirname: impl Into<String>, basename: impl Into<String>) -> Self {
        Self {
            dirname: dirname.into(),
            basename: basename.into(),
        }
    }

    pub fn path(&self) -> String {
        join_path(&self.dirname, &self.basename)
    }
}

/// A past invocation offered in history-search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCandidate {
    pub display_name: String,
    pub normalized_path: String,
}

/// A registered command.
///
/// `path` is the invocation template (program plus fixed arguments). `workdir` is kept raw:
/// empty means "directory of the program", `.` means the launcher's current directory, and
/// anything else may reference `${cwd}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub path: String,
    pub workdir: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub terminal: bool,
    pub sudo: bool,
    pub history: bool,
}

impl Command {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            workdir: String::new(),
            description: None,
            icon: None,
            category: None,
            terminal: false,
            sudo: false,
            history: true,
        }
    }

    pub fn with_workdir(mut self, workdir: impl Into<String>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn in_terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    pub fn as_sudo(mut self) -> Self {
        self.sudo = true;
        self
    }

    pub fn without_history(mut self) -> Self {
        self.history = false;
        self
    }

    /// The program part of `path`: its first token's value.
    pub fn command_path(&self) -> String {
        tokenize(&self.path).first_value().to_string()
    }

    /// Working directory for a launch from `cwd`.
    pub fn resolve_workdir(&self, cwd: &str) -> String {
        match self.workdir.as_str() {
            "" => match dirname(&self.command_path()) {
                "." => cwd.to_string(),
                dir => dir.to_string(),
            },
            "." => cwd.to_string(),
            raw => {
                let values = HashMap::from([("cwd".to_string(), cwd.to_string())]);
                expand_template(raw, &values)
            }
        }
    }
}

/// Commands by name, iterated in registration order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Arc<Command>>,
    by_name: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command`, replacing a previous command of the same name in place.
    pub fn insert(&mut self, command: Command) -> Arc<Command> {
        let command = Arc::new(command);
        match self.by_name.get(&command.name) {
            Some(&idx) => self.commands[idx] = Arc::clone(&command),
            None => {
                self.by_name
                    .insert(command.name.clone(), self.commands.len());
                self.commands.push(Arc::clone(&command));
            }
        }
        command
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Command>> {
        self.by_name.get(name).map(|&idx| &self.commands[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<Command> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut registry = CommandRegistry::new();
        for command in iter {
            registry.insert(command);
        }
        registry
    }
}
