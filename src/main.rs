use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use campus_desk::console::{self, Command, CommandError};
use campus_desk::{Desk, DeskConfig, demo, logging};

fn print_usage(program: &str) {
    println!("Campus Desk CLI");
    println!("Usage:");
    println!("  {program} (run demo)");
    println!("  {program} demo");
    println!("  {program} script <path> [history_limit]");
    println!("  {program} repl [history_limit]");
    println!("  {program} --help");
    println!();
    println!("Scripts hold one console command per line; blank lines and # comments are skipped.");
    println!("Commands:");
    println!("  add-personnel <name>|<role>|<department>|<email>[|<position>[|<id>]]");
    println!("  remove-personnel <name>    find-personnel <name>");
    println!("  sort-personnel             list-personnel");
    println!("  add-task <requestor>|<description>|<high|medium|low>");
    println!("  serve-task    peek-task    list-tasks");
    println!("  add-service <name>|<description>|<category>|<active>");
    println!("  edit-service <current>|<name>|<description>|<category>|<active>");
    println!("  remove-service <name>      search-services <keyword>");
    println!("  sort-services              list-services");
    println!("  undo    history    clear-history    summary");
    println!("Defaults:");
    println!("  history_limit=unbounded");
    println!("Environment:");
    println!(
        "  {}  log filter (default: debug in debug builds, warn in release)",
        logging::LOG_ENV
    );
}

fn exit_with_usage(program: &str, message: &str) -> ! {
    eprintln!("{message}");
    print_usage(program);
    std::process::exit(2);
}

fn parse_history_limit(program: &str, arg: Option<String>) -> DeskConfig {
    let history_limit = arg.map(|value| match value.parse::<usize>() {
        Ok(limit) if limit > 0 => limit,
        _ => exit_with_usage(program, &format!("invalid history_limit value: {value}")),
    });
    DeskConfig { history_limit }
}

/// Feed every line through the console; bad lines are reported and skipped.
fn run_lines<R: BufRead>(desk: &mut Desk, input: R, echo: bool) -> Result<()> {
    let stdout = io::stdout();
    for (number, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", number + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut out = stdout.lock();
        if echo {
            writeln!(out, "> {trimmed}")?;
        }
        match Command::parse(trimmed) {
            Ok(command) => writeln!(out, "{}", console::execute(desk, command))?,
            Err(CommandError::Empty) => {}
            Err(err) => writeln!(out, "error: line {}: {err}", number + 1)?,
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "campus_desk".to_string());
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None | Some("demo") => demo::run_demo(),
        Some("script") => {
            let Some(path) = args.next() else {
                exit_with_usage(&program, "script: missing path");
            };
            let config = parse_history_limit(&program, args.next());
            let contents =
                fs::read_to_string(&path).with_context(|| format!("failed to read script {path}"))?;
            let mut desk = Desk::new(config);
            run_lines(&mut desk, contents.as_bytes(), true)?;
        }
        Some("repl") => {
            let config = parse_history_limit(&program, args.next());
            let mut desk = Desk::new(config);
            run_lines(&mut desk, io::stdin().lock(), false)?;
        }
        Some("--help") | Some("-h") | Some("help") => print_usage(&program),
        Some(other) => {
            exit_with_usage(&program, &format!("unknown command: {other}"));
        }
    }
    Ok(())
}
