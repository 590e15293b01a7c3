use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use wisp_dsl::lexer::tokenize_with;
use wisp_dsl::source::read_lines;
use wisp_dsl::{LexerOptions, format_tokens, parse};
use wisp_render::logging::{LoggingConfig, init_logging};
use wisp_render::{OutlineRenderer, render};

#[derive(Parser)]
#[command(name = "wisp-studio", version)]
#[command(about = "Parse a .wisp window description and render it")]
struct Args {
    /// Path to the .wisp file
    file: PathBuf,

    /// How to print the parsed window
    #[arg(long, short, value_enum, default_value_t = Format::Outline)]
    format: Format,

    /// Print the token stream before parsing (a JSON array with --format json)
    #[arg(long)]
    tokens: bool,

    /// Lex unknown words outside parentheses as NotFound instead of Number
    #[arg(long)]
    strict_numbers: bool,

    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented widget outline
    Outline,
    /// The parsed tree as JSON
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logging(LoggingConfig { env_filter: args.log.clone(), ..Default::default() });

    let lines = read_lines(&args.file)?;
    let options = LexerOptions { strict_numbers: args.strict_numbers };
    let tokens = tokenize_with(&lines, options);
    if args.tokens {
        match args.format {
            Format::Outline => println!("{}\n", format_tokens(&tokens)),
            Format::Json => {
                println!("{}", serde_json::to_string_pretty(&tokens).context("serializing tokens")?)
            }
        }
    }

    // A document that does not parse is reported and never rendered.
    let window = match parse(&tokens) {
        Ok(window) => window,
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    log::info!("{} parsed: {} widgets", args.file.display(), window.widget_count());

    let output = match args.format {
        Format::Outline => render(&window, OutlineRenderer::new()),
        Format::Json => serde_json::to_string_pretty(&window).context("serializing window tree")?,
    };
    println!("{}", output.trim_end());
    Ok(ExitCode::SUCCESS)
}
