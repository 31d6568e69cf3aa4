//! `lamb tokens` — print the token stream.

use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;

use lamb_syntax::{Diagnostic, Lexer, Token, Tokenized};

use super::manifest::load_config;
use super::{Format, Source};

#[derive(Serialize)]
struct TokenReport<'a> {
    tokens: &'a [Token],
    diagnostics: &'a [Diagnostic],
}

pub fn execute(
    file: Option<PathBuf>,
    source: Option<String>,
    format: Format,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(config.as_deref())?;

    let source = match (source, file) {
        (Some(text), _) => Source::inline(text),
        (None, Some(path)) => Source {
            text: std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?,
            name: path.display().to_string(),
        },
        (None, None) => anyhow::bail!("nothing to tokenize: pass a file or -e SOURCE"),
    };

    let Tokenized {
        tokens,
        diagnostics,
    } = Lexer::new(&source.text)
        .with_options(config.lexer_options())
        .tokenize();

    match format {
        Format::Json => {
            let report = TokenReport {
                tokens: &tokens,
                diagnostics: &diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Plain | Format::Pretty => {
            for token in &tokens {
                println!("{}", token);
            }
            for diagnostic in &diagnostics {
                eprintln!("{}: {}", source.name, diagnostic);
            }
        }
    }

    Ok(())
}
