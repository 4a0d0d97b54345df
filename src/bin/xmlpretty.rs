//! Pretty-print an XML document piped into standard input.
//!
//! ```text
//! $ echo '<a x="1"><b/>text</a>' | xmlpretty --color never
//! <a x="1">
//!   <b />
//!   "text"
//! </a>
//! ```

use std::io::{self, IsTerminal, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xmlpretty::{Document, ErrorKind, FormatOptions, ParseOptions, StyleResolver};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// xmlpretty -- indent and colorize XML read from standard input.
#[derive(Parser, Debug)]
#[command(name = "xmlpretty", version, about, long_about = None)]
struct Cli {
    /// When to color the output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Spaces of indentation per nesting level.
    #[arg(long, value_name = "N", default_value_t = 2)]
    indent: usize,

    /// Keep text nodes made only of whitespace.
    #[arg(long)]
    keep_whitespace: bool,

    /// Color overrides per role, like `elementNodeName=1;31:textData=32`.
    #[arg(long, value_name = "OVERRIDES", env = "XMLPRETTY_COLORS")]
    colors: Option<String>,

    /// Print diagnostics to standard error; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ColorChoice {
    /// Color when standard output is a terminal and `NO_COLOR` is not set
    Auto,
    Always,
    Never,
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().trim_end());
            match e.kind {
                ErrorKind::InvalidStyle(_) => ExitCode::from(EXIT_CONFIG_ERROR),
                _ => ExitCode::from(EXIT_FAILURE),
            }
        }
    }
}

/// Reads all of stdin, formats it, and writes the result to stdout in one block.
fn run(cli: &Cli) -> xmlpretty::Result<()> {
    let options = format_options(cli)?;

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(ErrorKind::InputNotPiped.into());
    }

    let mut input = String::new();
    stdin.lock().read_to_string(&mut input)?;
    tracing::debug!(bytes = input.len(), "read input");

    let parse_options = ParseOptions {
        keep_whitespace: cli.keep_whitespace,
    };
    let document = Document::parse_with_options(&input, &parse_options)?;

    let mut output = document.to_lines(&options)?.join("\n");
    output.push('\n');

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Settles indentation and style for the whole run.
fn format_options(cli: &Cli) -> xmlpretty::Result<FormatOptions> {
    // Overrides are checked even when they end up unused
    let mut palette = StyleResolver::decorated();
    if let Some(overrides) = &cli.colors {
        palette = palette.with_overrides(overrides)?;
    }

    let decorate = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            io::stdout().is_terminal()
                && std::env::var_os("NO_COLOR").is_none_or(|value| value.is_empty())
        }
    };
    tracing::info!(decorate, indent = cli.indent, "output mode");

    let style = if decorate {
        palette
    } else {
        StyleResolver::plain()
    };
    Ok(FormatOptions::new(style).with_indent_width(cli.indent))
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
