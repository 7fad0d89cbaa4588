//! Decides what the cursor is completing and where relative paths start from.

use input::{TokenizedLine, dirname, is_path, join_path};

use crate::ranking::Completer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    History,
    Option,
    Path,
    Command,
}

/// Value of the token under the cursor, or `""` when the cursor sits on a delimiter.
pub fn cursor_value(line: &TokenizedLine, cursor: usize) -> &str {
    let token = line.cursor_token(cursor);
    if token.is_value() { &token.value } else { "" }
}

/// Picks the completion kind for the cursor, or `None` when nothing applies.
///
/// Priority: history search, then options (cursor past the command and the command has a
/// provider), then paths, then commands (cursor on the first token).
pub fn select_kind(
    completer: &Completer<'_>,
    line: &TokenizedLine,
    cursor: usize,
    history_search: bool,
) -> Option<CompletionKind> {
    if history_search {
        return Some(CompletionKind::History);
    }
    let index = line.cursor_token_index(cursor);
    if index > 0 && completer.has_options(line.first_value()) {
        return Some(CompletionKind::Option);
    }
    if is_path(cursor_value(line, cursor)) {
        return Some(CompletionKind::Path);
    }
    if index == 0 {
        return Some(CompletionKind::Command);
    }
    None
}

/// Directory a relative path under the cursor is resolved against.
///
/// The current directory for the first token or a `!` line; otherwise the working directory
/// of the registered command on the line, or the directory of the first value when that is
/// itself a path.
pub fn path_base_dir(completer: &Completer<'_>, line: &TokenizedLine, cursor: usize) -> String {
    let cwd = completer.cwd();
    if line.cursor_token_index(cursor) == 0 || line.uses_current_directory() {
        return cwd.to_string();
    }
    let first = line.first_value();
    if let Some(command) = completer.commands().get(first) {
        return command.resolve_workdir(cwd);
    }
    if is_path(first) {
        return join_path(cwd, dirname(first));
    }
    cwd.to_string()
}

/// Makes `value` absolute against `base`, keeping a trailing `/` so the basename stays empty.
pub fn resolve_path(base: &str, value: &str) -> String {
    let mut resolved = join_path(base, value);
    if value.ends_with('/') && !resolved.ends_with('/') {
        resolved.push('/');
    }
    resolved
}
