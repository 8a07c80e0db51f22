// Culture Selector - Build Task Runner
// Unified build system using cargo xtask pattern

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use xshell::{cmd, Shell};

/// Tasks understood by `cargo xtask`
enum Task {
    Build { release: bool },
    Test,
    Format { check: bool },
    Clippy,
    Run(Vec<String>),
    Clean,
    Ci,
    Help,
}

impl Task {
    fn parse(args: &[String]) -> Result<Self> {
        let has_flag = |flag: &str| args.iter().skip(1).any(|a| a == flag);
        let task = match args.first().map(String::as_str) {
            Some("build") => Self::Build { release: has_flag("--release") },
            Some("test") => Self::Test,
            Some("format") => Self::Format { check: has_flag("--check") },
            Some("clippy") => Self::Clippy,
            Some("run") => Self::Run(args[1..].to_vec()),
            Some("clean") => Self::Clean,
            Some("ci") => Self::Ci,
            None | Some("help") | Some("--help") => Self::Help,
            Some(other) => bail!("unknown task `{}` (try `cargo xtask help`)", other),
        };
        Ok(task)
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let task = Task::parse(&args)?;

    let sh = Shell::new()?;
    sh.change_dir(workspace_root());

    match task {
        Task::Build { release } => build(&sh, release),
        Task::Test => test(&sh),
        Task::Format { check } => format(&sh, check),
        Task::Clippy => clippy(&sh),
        Task::Run(args) => run(&sh, &args),
        Task::Clean => clean(&sh),
        Task::Ci => ci(&sh),
        Task::Help => {
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("cargo xtask <TASK>");
    println!();
    println!("  build [--release]   Build culture-selector");
    println!("  test                Run unit and router tests for the workspace");
    println!("  format [--check]    Run rustfmt over the workspace");
    println!("  clippy              Lint every target, warnings denied");
    println!("  run [ARGS...]       Start the service, e.g. `run --port 9000 --config conf/config.toml`");
    println!("  clean               Remove target/ and rolled log files");
    println!("  ci                  format --check, clippy, release build, test");
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    let profile: &[&str] = if release { &["--release"] } else { &[] };
    cmd!(sh, "cargo build -p culture-selector {profile...}")
        .run()
        .context("culture-selector build failed")
}

fn test(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace").run().context("Tests failed")
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    let check_args: &[&str] = if check { &["--", "--check"] } else { &[] };
    cmd!(sh, "cargo fmt --all {check_args...}")
        .run()
        .context(if check { "Rust code is not formatted" } else { "cargo fmt failed" })
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings")
        .run()
        .context("Clippy checks failed")
}

/// Run from backend/ so conf/config.toml and locales resolve as in production
fn run(sh: &Shell, args: &[String]) -> Result<()> {
    let _dir = sh.push_dir("backend");
    cmd!(sh, "cargo run -p culture-selector -- {args...}")
        .run()
        .context("culture-selector exited with an error")
}

fn clean(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clean").run()?;

    // logging.file defaults to logs/culture-selector.log, relative to backend/
    let logs = workspace_root().join("backend/logs");
    if logs.exists() {
        sh.remove_path(&logs).context("Failed to remove backend/logs")?;
    }
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    let steps: [(&str, fn(&Shell) -> Result<()>); 4] = [
        ("format", |sh| format(sh, true)),
        ("clippy", clippy),
        ("build", |sh| build(sh, true)),
        ("test", test),
    ];

    for (i, (name, step)) in steps.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, steps.len(), name);
        step(sh).with_context(|| format!("ci step `{}` failed", name))?;
    }

    println!("ci passed");
    Ok(())
}

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default()
}
