use std::sync::Arc;

use chrono::Utc;
use history::History;

use crate::{
    Candidate, Command, CommandRegistry, HistoryCandidate, Ownership, PathPart, TextCandidate,
    record_launch,
};

#[test]
fn test_workdir_resolution() {
    let cwd = "/home/u";
    let run = Command::new("run", "/opt/tool/bin/run --flag");
    assert_eq!(run.resolve_workdir(cwd), "/opt/tool/bin");

    let bare = Command::new("ls", "ls -la");
    assert_eq!(bare.resolve_workdir(cwd), cwd);

    let here = Command::new("make", "/usr/bin/make").with_workdir(".");
    assert_eq!(here.resolve_workdir(cwd), cwd);

    let templated = Command::new("make", "/usr/bin/make").with_workdir("${cwd}/build");
    assert_eq!(templated.resolve_workdir(cwd), "/home/u/build");

    let fixed = Command::new("make", "/usr/bin/make").with_workdir("/srv/app");
    assert_eq!(fixed.resolve_workdir(cwd), "/srv/app");
}

#[test]
fn test_command_path_strips_quotes_and_arguments() {
    let code = Command::new("code", "\"/opt/My Apps/code\" --new-window");
    assert_eq!(code.command_path(), "/opt/My Apps/code");
    assert_eq!(code.resolve_workdir("/"), "/opt/My Apps");

    let candidate = Candidate::Command(Arc::new(code));
    assert_eq!(candidate.context_path().as_deref(), Some("/opt/My Apps/code"));
}

#[test]
fn test_candidate_capabilities() {
    let command = Candidate::Command(Arc::new(
        Command::new("firefox", "/usr/bin/firefox").with_icon("firefox.png"),
    ));
    let history = Candidate::History(HistoryCandidate {
        display_name: "make".to_string(),
        normalized_path: "make -j8".to_string(),
    });
    let part = Candidate::PathPart(PathPart::new("/usr", "bin"));
    let text = Candidate::Text(
        TextCandidate::new("--verbose")
            .with_completion("-v")
            .with_description("Chatty"),
    );

    assert!(command.supports_autocomplete());
    assert!(history.supports_autocomplete());
    assert!(!part.supports_autocomplete());
    assert!(!text.supports_autocomplete());

    assert_eq!(command.ownership(), Ownership::Registry);
    for transient in [&history, &part, &text] {
        assert_eq!(transient.ownership(), Ownership::Transient);
    }

    assert_eq!(command.description(), Some("/usr/bin/firefox"));
    assert_eq!(command.icon_ref(), Some("firefox.png"));
    assert_eq!(history.description(), Some("make"));
    assert_eq!(history.context_path().as_deref(), Some("make"));
    assert_eq!(part.context_path().as_deref(), Some("/usr/bin"));
    assert_eq!(part.description(), None);
    assert_eq!(text.display_value(), "--verbose");
    assert_eq!(text.complete_value(), "-v");
    assert_eq!(text.description(), Some("Chatty"));
    assert_eq!(text.context_path(), None);
}

#[test]
fn test_registry_replaces_in_place() {
    let mut registry = CommandRegistry::new();
    registry.insert(Command::new("vim", "/usr/bin/vim"));
    registry.insert(Command::new("git", "/usr/bin/git"));
    let replaced = registry.insert(Command::new("vim", "/opt/bin/vim"));

    assert_eq!(registry.len(), 2);
    let names: Vec<&str> = registry.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["vim", "git"]);
    assert!(Arc::ptr_eq(registry.get("vim").unwrap(), &replaced));
    assert_eq!(replaced.path, "/opt/bin/vim");
    assert!(registry.get("emacs").is_none());
}

#[test]
fn test_record_launch_keys() {
    let mut history = History::new();
    let firefox = Command::new("firefox", "/usr/bin/firefox");
    let secret = Command::new("vault", "/usr/bin/vault").without_history();

    record_launch(&mut history, "firefox --private", Some(&firefox), Utc::now());
    record_launch(&mut history, "vault unseal key", Some(&secret), Utc::now());
    record_launch(&mut history, "/tmp/a.out", None, Utc::now());

    let record = history.get("firefox --private").unwrap();
    assert_eq!(record.display_name(), "firefox");
    assert!(history.get("vault unseal key").is_none());
    assert_eq!(history.get("vault").unwrap().display_name(), "vault");
    assert_eq!(history.get("/tmp/a.out").unwrap().display_name(), "/tmp/a.out");
    assert_eq!(history.len(), 3);
}
