//! `lamb check` — analyze sources and report diagnostics.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use serde::Serialize;
use std::path::PathBuf;
use termcolor::StandardStream;

use lamb_syntax::{analyze_with, Analysis, Derivation, Diagnostic, DiagnosticKind};

use super::files::collect_lam_files;
use super::manifest::load_config;
use super::{ColorMode, Format, Source};
use crate::output::{resolve_color_choice, StyledOutput};

pub struct CheckArgs {
    pub files: Vec<String>,
    pub source: Option<String>,
    pub format: Format,
    pub color: ColorMode,
    pub trace: bool,
    pub config: Option<PathBuf>,
}

/// Analysis of one source, as printed by `--format json`.
#[derive(Serialize)]
struct FileReport {
    file: String,
    diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    derivations: Vec<Derivation>,
}

/// Run the check; returns the number of diagnostics reported.
pub fn execute(args: CheckArgs) -> anyhow::Result<usize> {
    // 1. Resolve config; flags override the manifest
    let mut config = load_config(args.config.as_deref())?;
    if args.trace {
        config.trace = true;
    }

    // 2. Gather sources
    let sources = match args.source {
        Some(text) => vec![Source::inline(text)],
        None => read_sources(&args.files)?,
    };
    if sources.is_empty() {
        anyhow::bail!("no .lam files found");
    }

    // 3. Analyze
    let mut reports = Vec::with_capacity(sources.len());
    let mut total = 0usize;
    for source in &sources {
        let Analysis {
            diagnostics,
            derivations,
            ..
        } = analyze_with(&source.text, &config);
        tracing::debug!(file = %source.name, diagnostics = diagnostics.len(), "checked");
        total += diagnostics.len();
        reports.push(FileReport {
            file: source.name.clone(),
            diagnostics,
            derivations,
        });
    }

    // 4. Output
    let choice = resolve_color_choice(args.color);
    match args.format {
        Format::Json => emit_json(&reports)?,
        Format::Plain => emit_plain(&reports),
        Format::Pretty => emit_pretty(&sources, &reports, StandardStream::stderr(choice))?,
    }

    if args.format != Format::Json {
        let mut out = StyledOutput::new(choice);
        print_summary(&mut out, sources.len(), total);
        out.flush();
    }

    Ok(total)
}

fn read_sources(paths: &[String]) -> anyhow::Result<Vec<Source>> {
    collect_lam_files(paths)?
        .into_iter()
        .map(|path| {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
            Ok(Source {
                name: path.display().to_string(),
                text,
            })
        })
        .collect()
}

// ── Plain output ───────────────────────────────────────────────────────────

fn emit_plain(reports: &[FileReport]) {
    for report in reports {
        for diagnostic in &report.diagnostics {
            println!("{}: {}", report.file, diagnostic);
        }
        print_derivations(report);
    }
}

fn print_derivations(report: &FileReport) {
    for derivation in &report.derivations {
        let rules: Vec<String> = derivation.rules.iter().map(ToString::to_string).collect();
        println!(
            "{}: line {}: {}",
            report.file,
            derivation.line,
            rules.join(" ")
        );
    }
}

// ── Pretty output (codespan bridge) ────────────────────────────────────────

fn code(kind: DiagnosticKind) -> &'static str {
    match kind {
        DiagnosticKind::Lexical => "lexical",
        DiagnosticKind::Syntax(_) => "syntax",
        DiagnosticKind::LimitExceeded => "limit",
    }
}

fn emit_pretty(
    sources: &[Source],
    reports: &[FileReport],
    mut writer: StandardStream,
) -> anyhow::Result<()> {
    let config = term::Config::default();

    for (source, report) in sources.iter().zip(reports) {
        let mut files = SimpleFiles::new();
        let file_id = files.add(source.name.clone(), source.text.clone());

        for diagnostic in &report.diagnostics {
            let label = Label::primary(file_id, diagnostic.span.start..diagnostic.span.end)
                .with_message(format!("line {}, column {}", diagnostic.line, diagnostic.column));
            let rendered = CsDiagnostic::error()
                .with_message(&diagnostic.message)
                .with_code(code(diagnostic.kind))
                .with_labels(vec![label]);
            term::emit(&mut writer, &config, &files, &rendered)?;
        }
        print_derivations(report);
    }
    Ok(())
}

// ── JSON output ────────────────────────────────────────────────────────────

fn emit_json(reports: &[FileReport]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(reports)?);
    Ok(())
}

// ── Colored summary ────────────────────────────────────────────────────────

fn print_summary(out: &mut StyledOutput, file_count: usize, total: usize) {
    out.newline();
    out.plain(&format!(
        "Checked {} source{}: ",
        file_count,
        if file_count == 1 { "" } else { "s" }
    ));
    if total == 0 {
        out.success("no issues found.");
    } else {
        out.error(&format!(
            "{} diagnostic{}",
            total,
            if total == 1 { "" } else { "s" }
        ));
        out.plain(".");
    }
    out.newline();
}
