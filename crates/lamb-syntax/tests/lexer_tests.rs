//! Token stream tests for the lamb lexer.

use lamb_syntax::{tokenize, ColumnMode, Lexer, LexerOptions, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .tokens
        .iter()
        .filter(|t| !t.is_whitespace())
        .map(|t| t.kind)
        .collect()
}

fn concatenated(source: &str) -> String {
    tokenize(source).tokens.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn test_full_statement() {
    assert_eq!(
        kinds("f = lambda a, b : (a + 1) * b ;"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Lambda,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::AddOp,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::MulOp,
            TokenKind::Identifier,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_operators_share_kinds() {
    assert_eq!(
        kinds("+ - * /"),
        vec![TokenKind::AddOp, TokenKind::AddOp, TokenKind::MulOp, TokenKind::MulOp]
    );
}

#[test]
fn test_empty_input() {
    let result = tokenize("");
    assert!(result.tokens.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_tokenization_is_lossless() {
    for source in [
        "f = lambda a, b : (a + 1) * b ;",
        "f = lambda : 1 ;\n\n  g = lambda x : x ;\n",
        "  \t\n",
        "na#me = lambda : 1 ;",
        "12#34",
    ] {
        assert_eq!(concatenated(source), source);
    }
}

#[test]
fn test_invalid_run_is_reported_at_its_start() {
    let result = tokenize("x = @@ ;");
    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.message, "invalid character sequence: `@@`");
    assert_eq!((diagnostic.line, diagnostic.column), (1, 4));
    assert!(result.tokens.iter().all(|t| !t.is(TokenKind::Invalid)));
}

#[test]
fn test_split_number_is_merged() {
    let result = tokenize("12#34");
    assert_eq!(result.tokens.len(), 1);
    assert_eq!(result.tokens[0].kind, TokenKind::Number);
    assert_eq!(result.tokens[0].text, "12#34");
}

#[test]
fn test_merged_identifier_keeps_outer_positions() {
    let result = tokenize("f = na#me ;");
    let merged = result
        .tokens
        .iter()
        .find(|t| t.is(TokenKind::Identifier) && t.text != "f")
        .unwrap();
    assert_eq!(merged.text, "na#me");
    assert_eq!((merged.start_column, merged.end_column), (4, 9));
}

#[test]
fn test_operator_neighbours_are_not_merged() {
    let result = tokenize("a+#b");
    assert_eq!(kinds("a+#b"), vec![TokenKind::Identifier, TokenKind::AddOp, TokenKind::Identifier]);
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn test_invalid_at_edges() {
    let result = tokenize("#a#");
    assert_eq!(result.diagnostics.len(), 2);
    assert_eq!(kinds("#a#"), vec![TokenKind::Identifier]);
}

#[test]
fn test_lines_advance_inside_whitespace() {
    let result = tokenize("a\n\nb\nc");
    let lines: Vec<u32> = result
        .tokens
        .iter()
        .filter(|t| !t.is_whitespace())
        .map(|t| t.line)
        .collect();
    assert_eq!(lines, vec![1, 3, 4]);
}

#[test]
fn test_line_relative_mode() {
    let options = LexerOptions {
        columns: ColumnMode::LineRelative,
    };
    let result = Lexer::new("f = lambda : 1 ;\ng = lambda : 2 ;")
        .with_options(options)
        .tokenize();
    let g = result.tokens.iter().find(|t| t.text == "g").unwrap();
    assert_eq!((g.line, g.start_column, g.end_column), (2, 0, 1));
}

#[test]
fn test_token_display() {
    let result = tokenize("f =\n");
    assert_eq!(result.tokens[0].to_string(), "Identifier: 'f' at line 1, column 0");
    assert_eq!(result.tokens[3].to_string(), "Whitespace: '\\n' at line 1, column 3");
}
