pub mod cli;
mod scan;

pub use scan::{Backend, Number, ScanError, ScanErrorKind, Scanner, Token, TokenKind};

use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};

/// Tokenizes a whole expression file and prints the token stream, or an
/// error report pointing at the offending character.
pub fn run(path: &Path, source: &str, backend: Backend) {
    let scanner = Scanner::new(source, backend);
    match scanner.scan() {
        Ok(tokens) => {
            let line = tokens
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            println!("{line}");
        }
        Err(e) => {
            let path = path.to_string_lossy();
            let path: &str = path.as_ref();

            Report::build(ReportKind::Error, (path, e.span()))
                .with_label(
                    Label::new((path, e.span()))
                        .with_message(e.kind.to_string())
                        .with_color(Color::Red),
                )
                .finish()
                .eprint((path, Source::from(source)))
                .unwrap();
        }
    }
}
