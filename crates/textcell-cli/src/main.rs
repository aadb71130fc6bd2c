use anyhow::{Context, Result};
use clap::Parser;
use textcell_common::LiteralValue;
use textcell_eval::{builtins, coercion, function_registry};
use tracing_subscriber::EnvFilter;

mod literal;

use literal::parse_literal;

#[derive(Parser, Debug)]
#[command(
    name = "textcell",
    version,
    about = "Evaluate a spreadsheet text function over literal arguments",
    after_help = "Example: textcell TEXTAFTER \"Red riding hood's red hood\" hood -2"
)]
struct Cli {
    /// Print the result as JSON instead of its display form.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Function name, case-insensitive (LEFT, RIGHT, MID, TEXTBEFORE, TEXTAFTER).
    function: String,

    /// Argument literals: 42, TRUE, #N/A, "text", {1,2;3,4}; an empty string omits the argument.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn display_cell(value: &LiteralValue) -> String {
    coercion::to_text(value)
        .map(|s| s.into_owned())
        .unwrap_or_else(|e| e.kind.to_string())
}

fn render(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Array(rows) => rows
            .iter()
            .map(|row| row.iter().map(display_cell).collect::<Vec<_>>().join("\t"))
            .collect::<Vec<_>>()
            .join("\n"),
        other => display_cell(other),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    builtins::load_builtins();

    let args = cli
        .args
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            parse_literal(raw).with_context(|| format!("argument {} (`{raw}`)", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(function = %cli.function, ?args, "evaluating");
    let result = function_registry::evaluate(&cli.function, &args);
    if let LiteralValue::Error(e) = &result {
        if let Some(msg) = &e.message {
            tracing::info!(code = %e.kind, "{msg}");
        }
    }

    if cli.json {
        let json = serde_json::to_string(&result).context("serializing result")?;
        println!("{json}");
    } else {
        println!("{}", render(&result));
    }
    Ok(())
}
