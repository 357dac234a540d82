//! pptx-templater CLI
//!
//! Usage:
//!   pptx-templater [OPTIONS]
//!
//! Reads a JSON render request, renders it against a template directory, and
//! writes the resulting `.pptx` (or its base64 form) out.
//!
//! Exit codes: 0 on success, 2 when the request is at fault, 1 otherwise.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pptx_templater::template::config::TEMPLATES_DIR_ENV;
use pptx_templater::template::output::{encode_base64, resolve_output_name};
use pptx_templater::{EngineConfig, RenderRequest, TemplateEngine, TemplateError};

#[derive(Parser)]
#[command(name = "pptx-templater")]
#[command(about = "Render PowerPoint templates from JSON instructions")]
struct Cli {
    /// JSON request file ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Directory holding the template files
    #[arg(short, long, env = TEMPLATES_DIR_ENV, default_value = "templates")]
    templates_dir: PathBuf,

    /// Output file (default: the request's output.file_name, or presentation.pptx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the document as base64 to stdout instead of writing a file
    #[arg(long)]
    base64: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

enum Failure {
    Render(TemplateError),
    Io(String, io::Error),
}

impl Failure {
    fn exit_code(&self) -> ExitCode {
        match self {
            Failure::Render(err) if err.is_client_fault() => ExitCode::from(2),
            _ => ExitCode::from(1),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(input: &str) -> Result<String, Failure> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Failure::Io("reading stdin".to_string(), e))?;
        Ok(text)
    } else {
        fs::read_to_string(input).map_err(|e| Failure::Io(format!("reading {}", input), e))
    }
}

fn run(cli: Cli) -> Result<(), Failure> {
    let payload = read_input(&cli.input)?;
    let request = RenderRequest::from_json(&payload).map_err(Failure::Render)?;

    let engine = TemplateEngine::with_config(EngineConfig::new(cli.templates_dir));
    let bytes = engine.render(&request).map_err(Failure::Render)?;

    if cli.base64 {
        println!("{}", encode_base64(&bytes));
        return Ok(());
    }

    let path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(resolve_output_name(&request)));
    fs::write(&path, &bytes).map_err(|e| Failure::Io(format!("writing {}", path.display()), e))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote presentation");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            match &failure {
                Failure::Render(err) => error!(client_fault = err.is_client_fault(), "{}", err),
                Failure::Io(context, err) => error!("{}: {}", context, err),
            }
            failure.exit_code()
        },
    }
}
