use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use prodnorm_cli::session::{Session, SessionError};
use prodnorm_cli::terminal::Terminal;
use prodnorm_config::Settings;
use prodnorm_io::IoError;
use prodnorm_matcher::MatchError;
use tracing_subscriber::EnvFilter;

mod exit_codes;
use exit_codes::*;

/// Interactive product-name normalizer for Excel workbooks.
///
/// Prompts for a product list, an input workbook, the columns to clean and
/// an output location, then resolves each cell against the list, asking
/// when a match is uncertain. Set RUST_LOG for diagnostics on stderr.
#[derive(Parser)]
#[command(name = "prodnorm")]
#[command(about = "Normalize product names in an Excel workbook against a canonical list")]
#[command(version, long_version = long_version())]
struct Cli {}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("PRODNORM_COMMIT"), ")",
        "\ntarget:  ", env!("PRODNORM_TARGET"),
    )
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::Match(MatchError::InputClosed) => {
                Self { code: EXIT_INPUT_CLOSED, message, hint: None }
            }
            SessionError::Io(IoError::Open { .. } | IoError::NoSheets(_)) => Self {
                code: EXIT_WORKBOOK,
                message,
                hint: Some("check that the file is a valid .xlsx, .xls or .ods workbook".to_string()),
            },
            SessionError::Io(IoError::NotFound(_)) => {
                Self { code: EXIT_WORKBOOK, message, hint: None }
            }
            SessionError::Io(IoError::Write { .. }) => Self {
                code: EXIT_WORKBOOK,
                message,
                hint: Some("close the output file if it is open in another program".to_string()),
            },
            SessionError::Io(IoError::ListRead { .. } | IoError::ListWrite { .. })
            | SessionError::Match(_) => Self { code: EXIT_ERROR, message, hint: None },
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .try_init();
}

const TERMINATED: &str = "Program terminated by user.";

/// Print the termination notice. Stdout may already be a closed pipe.
fn say_terminated() {
    let mut out = io::stdout();
    let _ = writeln!(out);
    let _ = writeln!(out, "{TERMINATED}");
    let _ = out.flush();
}

/// Ctrl-C ends the session the same way a closed stdin does.
fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        say_terminated();
        std::process::exit(i32::from(EXIT_INPUT_CLOSED));
    });
    if let Err(e) = installed {
        log::warn!("cannot install Ctrl-C handler: {e}");
    }
}

fn run() -> Result<(), CliError> {
    let working_dir = std::env::current_dir().map_err(|e| CliError {
        code: EXIT_ERROR,
        message: format!("cannot determine working directory: {e}"),
        hint: None,
    })?;
    let settings = Settings::load();
    log::debug!("settings: {settings:?}");

    let session = Session::new(settings, working_dir);
    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout());
    let report = session.run(&mut term)?;

    log::info!(
        "wrote {} ({} processed, {} changed, {} added to {})",
        report.output_path.display(),
        report.stats.processed,
        report.stats.changed,
        report.added,
        report.product_list.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    init_logging();
    install_interrupt_handler();

    match run() {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code: EXIT_INPUT_CLOSED, .. }) => {
            say_terminated();
            ExitCode::from(EXIT_INPUT_CLOSED)
        }
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
