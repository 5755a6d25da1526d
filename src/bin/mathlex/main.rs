mod repl;

use std::fs;
use std::process::exit;

use anyhow::Context;
use clap::Parser;
use mathlex::cli::Cli;
use mathlex::{run, Backend};
use repl::Repl;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let backend = if cli.float {
        Backend::Float
    } else {
        Backend::Decimal
    };

    if let Some(script) = &cli.script {
        let code =
            fs::read_to_string(script).with_context(|| format!("script `{}`", script.display()))?;
        run(script, &code, backend);
    } else {
        repl(backend)?;
    }

    Ok(())
}

fn repl(backend: Backend) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let state = Repl::new(backend);
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                rl.add_history_entry(&line)?;
                state.rep(&line);
            }
            Err(ReadlineError::Eof) => return Ok(()),
            Err(ReadlineError::Interrupted) => {
                eprintln!("user exit");
                exit(1);
            }
            Err(e) => return Err(e),
        }
    }
}
