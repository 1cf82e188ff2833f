//! CLI integration tests for the demo and script modes.

use std::io::Write;
use std::process::{Command, Stdio};

fn summary_value<'a>(stdout: &'a str, key: &str) -> &'a str {
    let prefix = format!("{key}=");
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix(prefix.as_str()))
        .unwrap_or_else(|| panic!("{key} line missing"))
}

#[test]
fn demo_cli_reports_every_undo_check() {
    let bin = env!("CARGO_BIN_EXE_campus_desk");
    // Run the demo binary with default settings.
    let output = Command::new(bin)
        .output()
        .expect("failed to run demo binary");

    assert!(
        output.status.success(),
        "demo exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DEMO SUMMARY"), "demo summary missing from output");

    for key in [
        "sort_undo_restored",
        "remove_undo_restored",
        "serve_undo_requeued",
        "edit_undo_restored",
        "undo_exhausted",
    ] {
        assert_eq!(summary_value(&stdout, key), "true", "{key}");
    }
    assert_eq!(
        summary_value(&stdout, "served_order"),
        r#"["TASK-1", "TASK-3", "TASK-2"]"#
    );
}

#[test]
fn script_mode_runs_commands_and_reports_bad_lines() {
    let bin = env!("CARGO_BIN_EXE_campus_desk");
    let mut script = tempfile::NamedTempFile::new().expect("temp script");
    writeln!(
        script,
        "# seed\n\
         add-personnel Carol|Registrar|Admin|carol@campus.edu\n\
         add-personnel Alice|Dean|Science|alice@campus.edu|0\n\
         teleport Bob\n\
         sort-personnel\n\
         undo\n\
         list-personnel\n\
         summary"
    )
    .expect("write script");

    let output = Command::new(bin)
        .arg("script")
        .arg(script.path())
        .output()
        .expect("failed to run script mode");
    assert!(output.status.success(), "script exited with {:?}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error: line 4: unknown command: teleport"), "{stdout}");
    assert!(stdout.contains("last action undone"), "{stdout}");
    let listing: Vec<&str> = stdout
        .lines()
        .filter(|line| line.trim_start().starts_with(|c: char| c.is_ascii_digit()))
        .collect();
    assert!(listing[0].contains("Alice"), "{stdout}");
    assert!(listing[1].contains("Carol"), "{stdout}");
    assert!(stdout.contains("Personnel: 2"), "{stdout}");
    assert!(stdout.contains("Undo stack: 2"), "{stdout}");
}

#[test]
fn repl_reads_stdin() {
    let bin = env!("CARGO_BIN_EXE_campus_desk");
    let mut child = Command::new(bin)
        .arg("repl")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn repl");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(b"add-task Ann|Door stuck|medium\nserve-task\nundo\npeek-task\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("repl output");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("next [TASK-1] Ann | Door stuck | MEDIUM"), "{stdout}");
}

#[test]
fn unknown_command_exits_with_usage() {
    let bin = env!("CARGO_BIN_EXE_campus_desk");
    let output = Command::new(bin)
        .arg("launch")
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown command: launch"));
}
