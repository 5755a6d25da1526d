use ariadne::{Color, Label, Report, ReportKind, Source};
use mathlex::{Backend, Scanner};

#[derive(Debug, Default)]
pub struct Repl {
    backend: Backend,
}

impl Repl {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub fn rep(&self, input: &str) {
        match Scanner::new(input, self.backend).scan() {
            Ok(tokens) => {
                let line = tokens
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{line}");
            }
            Err(e) => {
                Report::build(ReportKind::Error, e.span())
                    .with_label(
                        Label::new(e.span())
                            .with_message(e.kind.to_string())
                            .with_color(Color::Red),
                    )
                    .finish()
                    .eprint(Source::from(input))
                    .unwrap();
            }
        }
    }
}
