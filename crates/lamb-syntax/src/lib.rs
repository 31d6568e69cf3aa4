//! Lexer and error-correcting parser for lambda-binding statements.
//!
//! A statement binds a name to a lambda: `name = lambda arg, arg : expr ;`.
//! Analysis never stops at the first problem. The lexer reports and repairs
//! runs of disallowed characters; the parser repairs grammar mismatches by
//! trying to insert, replace or delete a single token and keeping the
//! cheapest continuation.
//!
//! # Example
//!
//! ```
//! let analysis = lamb_syntax::analyze("x lambda : 5 ;");
//! assert_eq!(analysis.diagnostics.len(), 1);
//! assert_eq!(analysis.diagnostics[0].message, "Insert: '='");
//! ```

pub mod config;
pub mod diagnostic;
pub mod lexer;
pub mod parser;
pub mod token;

pub use config::{AnalyzerConfig, ConfigError};
pub use diagnostic::{Diagnostic, DiagnosticKind, RepairKind};
pub use lexer::{tokenize, ColumnMode, Lexer, LexerOptions, Tokenized};
pub use parser::{parse, Derivation, Nonterminal, ParseOptions, ParseOutcome, Parser};
pub use token::{Span, Token, TokenKind};

/// Output of running both stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    /// Lexical and syntax diagnostics, sorted by `(line, column)`
    pub diagnostics: Vec<Diagnostic>,
    pub derivations: Vec<Derivation>,
}

/// Tokenize and parse `input` with default options.
pub fn analyze(input: &str) -> Analysis {
    analyze_with(input, &AnalyzerConfig::default())
}

/// Tokenize and parse `input` with the given configuration.
pub fn analyze_with(input: &str, config: &AnalyzerConfig) -> Analysis {
    let Tokenized {
        tokens,
        diagnostics: lexical,
    } = Lexer::new(input)
        .with_options(config.lexer_options())
        .tokenize();

    let outcome = Parser::new(&tokens)
        .with_options(config.parse_options())
        .parse(&lexical);

    Analysis {
        tokens,
        diagnostics: outcome.diagnostics,
        derivations: outcome.derivations,
    }
}
