mod config;
mod error;
mod generate;
mod image;
mod ollama_api;
mod output;

use clap::Parser;
use config::{Config, OutputMode, Settings};
use error::Error;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, subscriber};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use url::Url;

// flags that may also be written Go style, with a single dash
const VALUE_FLAGS: &[&str] = &["image", "baseurl", "config", "model", "prompt", "timeout"];
const SWITCH_FLAGS: &[&str] = &["raw", "help", "version"];

#[derive(Parser, Debug)]
#[clap(version, about = "Describe an image with a locally hosted Ollama vision model")]
struct Args {
    #[clap(long, allow_hyphen_values = true, help = "Path to the image file")]
    image: Option<String>,
    #[clap(long, allow_hyphen_values = true, help = "Base URL of the API [default: http://localhost:11434]")]
    baseurl: Option<String>,
    #[clap(long, allow_hyphen_values = true, help = "Model to run [default: llava]")]
    model: Option<String>,
    #[clap(long, allow_hyphen_values = true, help = "Prompt sent along with the image")]
    prompt: Option<String>,
    #[clap(long, allow_hyphen_values = true, help = "Request timeout in seconds, unbounded when unset")]
    timeout: Option<u64>,
    #[clap(long, allow_hyphen_values = true, help = "Path to a TOML config file")]
    config: Option<PathBuf>,
    #[clap(long, help = "Print the raw response body instead of the parsed fields")]
    raw: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .without_time()
            .with_target(false)
            .with_writer(io::stderr),
    );

    if let Err(err) = subscriber::set_global_default(registry) {
        eprintln!("Failed to set up logging: {err}");
    }

    let args = Args::parse_from(normalize_flags(std::env::args_os()));

    let result = {
        let mut stdout = io::stdout().lock();
        run(args, &mut stdout).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("{err:?}");
            report(&err, &mut io::stdout());
            ExitCode::FAILURE
        }
    }
}

async fn run<W: Write>(args: Args, out: &mut W) -> Result<(), Error> {
    let image_path = match args.image.as_deref() {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => return Err(Error::MissingImage),
    };

    let bytes = image::load(&image_path).await?;
    let encoded = image::encode(&bytes);

    let file_config = match &args.config {
        Some(path) => {
            info!("Reading config from {}", path.display());
            Config::load(path).await?
        }
        None => Config::default(),
    };

    let cli_config = Config {
        base_url: args.baseurl.as_deref().map(Url::parse).transpose()?,
        model: args.model,
        prompt: args.prompt,
        timeout_secs: args.timeout,
    };

    let mode = if args.raw {
        OutputMode::Raw
    } else {
        OutputMode::Detailed
    };

    let settings = Settings::resolve(cli_config.or(file_config), mode)?;

    let exchange = generate::send(&settings, encoded).await?;

    match settings.mode {
        OutputMode::Detailed => {
            let response = exchange.into_response()?;
            output::write_detailed(out, &response)
        }
        OutputMode::Raw => output::write_raw(out, &exchange.body),
    }
    .map_err(Error::WriteOutput)
}

// a closed stdout must not turn a failure into a panic
fn report<W: Write>(err: &Error, out: &mut W) {
    let _ = writeln!(out, "{err}");
}

/// Rewrites `-image x` / `-baseurl=y` into the `--` form clap expects.
/// Values of value-taking flags and everything after `--` pass through untouched.
fn normalize_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut value_next = false;
    let mut passthrough = false;

    for arg in args {
        if passthrough || std::mem::take(&mut value_next) {
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let (long, dashes) = match text.strip_prefix("--") {
            Some(rest) => (rest, "--"),
            None => match text.strip_prefix('-') {
                Some(rest) => (rest, "-"),
                None => {
                    normalized.push(arg);
                    continue;
                }
            },
        };

        let (name, has_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let takes_value = VALUE_FLAGS.contains(&name);

        if takes_value || SWITCH_FLAGS.contains(&name) {
            value_next = takes_value && !has_value;
            if dashes == "-" {
                normalized.push(format!("--{long}").into());
                continue;
            }
        }

        normalized.push(arg);
    }

    normalized
}
