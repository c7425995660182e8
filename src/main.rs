//! xray-bootstrap - Start an Xray proxy on a PaaS host
//!
//! Resolves parameters from the environment (generating secure defaults),
//! renders the engine config, starts Xray and prints the share link.
//!
//! CHANGELOG:
//! - 10/18/2026 - Added render and link subcommands
//! - 10/18/2026 - Initial CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use xray_bootstrap::commands::{self, Settings};
use xray_bootstrap::output::{self, OutputControls};
use xray_bootstrap::resolver::ProcessEnv;
use xray_bootstrap::supervisor::{
    EngineCommand, DEFAULT_CONFIG_PATH, DEFAULT_ENGINE_PATH, DEFAULT_TEMPLATE_PATH,
};
use xray_bootstrap::{ResolveOptions, TransportMode};

/// Bootstrap an Xray proxy: resolve parameters, render config, supervise the engine.
#[derive(Parser, Debug)]
#[command(name = "xray-bootstrap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config template path
    #[arg(long, global = true, env = "XRAY_TEMPLATE", default_value = DEFAULT_TEMPLATE_PATH)]
    template: String,

    /// Rendered config path (read by the engine)
    #[arg(long, global = true, env = "XRAY_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    output: String,

    /// Engine binary
    #[arg(long, global = true, env = "XRAY_BIN", default_value = DEFAULT_ENGINE_PATH)]
    engine: String,

    /// Transport used when FALLBACK_PROTO is unset (ws or reality)
    #[arg(long, global = true, default_value = "ws")]
    default_transport: TransportMode,

    /// Length of a generated SHORT_ID
    #[arg(long, global = true, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    short_id_len: u16,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the config, start the engine and wait for it (default)
    Run,

    /// Render the config only; the engine is not started
    Render,

    /// Print the connection link only; no files are written
    Link,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            template_path: expand(&self.template),
            output_path: expand(&self.output),
            engine: EngineCommand::xray(expand(&self.engine)),
            options: ResolveOptions {
                default_transport: self.default_transport,
                short_id_len: usize::from(self.short_id_len),
                ..ResolveOptions::default()
            },
            output: OutputControls { json: self.json },
        }
    }
}

/// `RUST_LOG` when set and valid, `info` otherwise.
fn log_filter() -> EnvFilter {
    log_filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn log_filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout is reserved for the connection details
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter())
        .init();

    let cli = Cli::parse();
    let settings = cli.settings();
    let source = ProcessEnv;

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => commands::run::run(&settings, &source).await.map(|_| ()),
        Command::Render => commands::render::run(&settings, &source),
        Command::Link => commands::link::run(&settings, &source),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!("Error: {:#}", e);
            if settings.output.json {
                println!("{}", output::format_error(&e.to_string(), &format!("{:#}", e)));
            }
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_len_zero_rejected() {
        let err = Cli::try_parse_from(["xray-bootstrap", "--short-id-len", "0", "link"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_short_id_len_flows_into_options() {
        let cli = Cli::try_parse_from(["xray-bootstrap", "--short-id-len", "16", "link"]).unwrap();
        assert_eq!(cli.settings().options.short_id_len, 16);
    }

    #[test]
    fn test_log_filter_honors_rust_log() {
        use tracing_subscriber::filter::LevelFilter;

        assert_eq!(log_filter_from(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter_from(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_defaults_without_subcommand() {
        let cli = Cli::try_parse_from(["xray-bootstrap"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.settings().options.short_id_len, 8);
        assert_eq!(cli.default_transport, TransportMode::Websocket);
    }
}
