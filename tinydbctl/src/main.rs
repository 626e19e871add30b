use anyhow::bail;
use clap::{Args, Parser};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, path::PathBuf};
use tinydb_log::LogConfig;
use tracing::info;

mod config;
mod shell;

use config::Config;
use shell::{Reply, Shell};

/// TinyDB command-line client.
#[derive(Parser)]
#[command(name = "tinydbctl", author, version, about = "TinyDB CLI Tool", long_about = None)]
struct Cli {
    /// Parse a statement directly and exit.
    #[arg(short = 'e', long = "exec")]
    sql: Option<String>,

    /// Parse a file with one statement per line and exit.
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    #[command(flatten)]
    opts: Options,
}

#[derive(Args, Default)]
struct Options {
    /// Path to configuration file (default: $HOME/.tinydbrc).
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Print statements as JSON.
    #[arg(long)]
    json: bool,

    /// Log filter, e.g. `debug` or `tinydb_parser=trace`.
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.opts.config.as_deref())?;

    let log = tinydb_log::init(&LogConfig {
        level: cli.opts.log_level.unwrap_or_else(|| config.log_level.clone()),
        dir: config.log_dir.clone(),
        json: config.log_json,
    })?;
    let mut shell = Shell::new(cli.opts.json || config.json_output, Some(log));

    if let Some(sql) = cli.sql {
        if !print_reply(shell.eval(&sql)) {
            bail!("statement failed");
        }
        return Ok(());
    }

    if let Some(file) = cli.file {
        let content = fs::read_to_string(&file)?;
        let failed = run_script(&mut shell, &content);
        info!(file = %file.display(), failed, "script finished");
        if failed > 0 {
            bail!("{failed} statement(s) failed");
        }
        return Ok(());
    }

    interactive_shell(&mut shell, &config.prompt)
}

/// Evaluate each non-blank, non-comment line; returns the number of failures.
fn run_script(shell: &mut Shell, content: &str) -> usize {
    let mut failed = 0;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        match shell.eval(line) {
            Reply::Quit => break,
            reply => {
                if !print_reply(reply) {
                    failed += 1;
                }
            }
        }
    }
    failed
}

/// Print a reply; `false` if it was an error.
fn print_reply(reply: Reply) -> bool {
    match reply {
        Reply::Output(text) => {
            if !text.is_empty() {
                println!("{text}");
            }
            true
        }
        Reply::Error(text) => {
            eprintln!("{text}");
            false
        }
        Reply::Quit => true,
    }
}

/// Interactive readline shell.
fn interactive_shell(shell: &mut Shell, prompt: &str) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;
                match shell.eval(trimmed) {
                    Reply::Quit => break,
                    reply => {
                        print_reply(reply);
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Readline error: {err}");
                break;
            }
        }
    }
    Ok(())
}
