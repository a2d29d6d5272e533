//! LuoYan (骆言) - CLI

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use walkdir::WalkDir;

use luoyan::frontend::{compile_all, lexer, parser, CompileOutput};
use luoyan::util::config::CompilerConfig;
use luoyan::util::diagnostic::emitter::JsonReport;
use luoyan::util::diagnostic::{
    emitter_for, sort_by_position, Diagnostic, DiagnosticEmitter, ErrorCodeDefinition,
    OutputFormat,
};
use luoyan::util::logger::{self, LogLevel};
use luoyan::util::span::{SourceFile, Span};
use luoyan::{FILE_EXTENSION, NAME, VERSION};

/// Lexer, parser and semantic checker for 骆言 source files
#[derive(Parser, Debug)]
#[command(name = "luoyan")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Diagnostic output format
    #[arg(long, value_enum, global = true)]
    format: Option<Format>,

    /// Configuration file (defaults to ./luoyan.ron when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a source file
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the syntax tree of a source file
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Check files or directories (*.ly) for errors
    Check {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Describe an error code
    Explain {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_with_level(LogLevel::from_verbosity(args.verbose));

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {:#}", error);
            ExitCode::from(2)
        }
    }
}

/// Returns `false` when error diagnostics were reported
fn run(args: Args) -> Result<bool> {
    let config = load_config(&args)?;
    tracing::debug!(?config, "effective configuration");

    match args.command {
        Commands::Lex { file } => lex(&file, &config),
        Commands::Parse { file } => parse(&file, &config),
        Commands::Check { paths } => check(&paths, &config),
        Commands::Explain { code } => Ok(explain(&code)),
        Commands::Config => {
            println!("{}", config.to_ron_string()?);
            Ok(true)
        }
    }
}

fn load_config(args: &Args) -> Result<CompilerConfig> {
    let mut config = match &args.config {
        Some(path) => CompilerConfig::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            CompilerConfig::discover(&cwd)?
        }
    };

    if let Some(format) = args.format {
        config.format = format.into();
    }
    if args.no_color || !std::io::stderr().is_terminal() {
        config.emitter.use_colors = false;
    }
    Ok(config)
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))
}

/// Render diagnostics of one file: text to stderr, JSON to stdout
fn report(
    name: &str,
    source: &[u8],
    diagnostics: &[Diagnostic],
    config: &CompilerConfig,
) {
    let file = SourceFile::new(name, String::from_utf8_lossy(source));
    let rendered = emitter_for(config.format, &config.emitter).emit(diagnostics, Some(&file));
    match config.format {
        OutputFormat::Text => eprint!("{}", rendered),
        OutputFormat::Json => println!("{}", rendered),
    }
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: String,
    text: &'a str,
    span: Span,
}

#[derive(Serialize)]
struct LexReport<'a> {
    file: &'a str,
    tokens: Vec<TokenRecord<'a>>,
    diagnostics: Vec<Diagnostic>,
}

fn lex(
    path: &Path,
    config: &CompilerConfig,
) -> Result<bool> {
    let source = read_source(path)?;
    let name = path.display().to_string();
    let output = lexer::tokenize_bytes(&source);
    let diagnostics = output.diagnostics();

    match config.format {
        OutputFormat::Text => {
            for token in &output.tokens {
                println!(
                    "{}:{}\t{}",
                    token.span.start.line, token.span.start.column, token.kind
                );
            }
            report(&name, &source, &diagnostics, config);
        }
        OutputFormat::Json => {
            let tokens = output
                .tokens
                .iter()
                .map(|token| TokenRecord {
                    kind: token.kind.describe(),
                    text: &token.text,
                    span: token.span,
                })
                .collect();
            let report = LexReport {
                file: &name,
                tokens,
                diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(!output.has_errors())
}

#[derive(Serialize)]
struct ParseReport<'a> {
    file: &'a str,
    module: Option<&'a parser::ast::Module>,
    diagnostics: Vec<Diagnostic>,
}

fn parse(
    path: &Path,
    config: &CompilerConfig,
) -> Result<bool> {
    let source = read_source(path)?;
    let name = path.display().to_string();
    let lexed = lexer::tokenize_bytes(&source);
    let parsed = parser::parse_with_options(&lexed.tokens, &config.parser);

    let mut diagnostics = lexed.diagnostics();
    diagnostics.extend(parsed.diagnostics());
    sort_by_position(&mut diagnostics);
    let failed = diagnostics.iter().any(Diagnostic::is_error);

    match config.format {
        OutputFormat::Text => {
            if let Some(module) = &parsed.module {
                println!("{:#?}", module);
            }
            report(&name, &source, &diagnostics, config);
        }
        OutputFormat::Json => {
            let report = ParseReport {
                file: &name,
                module: parsed.module.as_ref(),
                diagnostics,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(!failed)
}

/// Expand directories into their `*.ly` files, in file-name order
fn collect_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk: {}", path.display()))?;
            let is_source = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == FILE_EXTENSION);
            if is_source {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn check(
    paths: &[PathBuf],
    config: &CompilerConfig,
) -> Result<bool> {
    let files = collect_sources(paths)?;
    let units = files
        .iter()
        .map(|path| Ok((path.display().to_string(), read_source(path)?)))
        .collect::<Result<Vec<(String, Vec<u8>)>>>()?;
    tracing::info!(files = units.len(), "checking");

    let outputs = compile_all(&units, config);
    let errors: usize = outputs.iter().map(CompileOutput::error_count).sum();
    let warnings: usize = outputs.iter().map(CompileOutput::warning_count).sum();

    match config.format {
        OutputFormat::Text => {
            for (output, (_, source)) in outputs.iter().zip(&units) {
                report(&output.name, source, &output.diagnostics, config);
            }
            eprintln!(
                "checked {} file(s): {} error(s), {} warning(s)",
                outputs.len(),
                errors,
                warnings
            );
        }
        OutputFormat::Json => {
            let reports: Vec<JsonReport<'_>> = outputs
                .iter()
                .map(|output| JsonReport::new(&output.name, &output.diagnostics))
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(errors == 0)
}

fn explain(code: &str) -> bool {
    match ErrorCodeDefinition::find(&code.to_uppercase()) {
        Some(definition) => {
            println!(
                "{} [{}]: {}",
                definition.code, definition.category, definition.title
            );
            true
        }
        None => {
            eprintln!("unknown error code `{}`", code);
            false
        }
    }
}
