use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct Cli {
    /// Tokenize an expression file instead of starting the REPL
    pub script: Option<PathBuf>,

    /// Use native floating point for number literals (default is
    /// arbitrary-precision decimal)
    #[arg(long)]
    pub float: bool,
}
