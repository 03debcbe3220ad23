use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use weekly_core::{Credentials, Session, WeeklyConfig};

mod formatter;

#[derive(Parser)]
#[command(name = "weekly")]
#[command(
    about = "Load weekly settings workbooks and dispatch their sheets to a server",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read the expected sheets of a workbook and report what was found
    Load {
        /// Path to the Excel/ODS file
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Load a workbook, then connect and process every sheet
    Run {
        /// Path to the Excel/ODS file
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Server label (defaults to the first configured server)
        #[arg(short, long)]
        server: Option<String>,

        /// User name
        #[arg(short, long)]
        username: String,

        /// Password (prompted without echo when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List the configured servers
    Servers,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    config.validate().context("Invalid configuration")?;

    let mut session = Session::new(config);

    let ok = match cli.command {
        Command::Servers => {
            formatter::print_servers(session.config(), cli.format)?;
            true
        }
        Command::Load { file } => {
            session.select_file(file.as_deref());
            formatter::print_load(&session, cli.format)?;
            !session.status().is_error() && session.data().is_some()
        }
        Command::Run {
            file,
            server,
            username,
            password,
        } => {
            session.select_file(file.as_deref());
            if session.data().is_none() || session.status().is_error() {
                formatter::print_load(&session, cli.format)?;
                false
            } else {
                let server = match server {
                    Some(server) => server,
                    None => session.default_server().unwrap_or_default().to_string(),
                };
                let password = match password {
                    Some(password) => password,
                    None => rpassword::prompt_password("Password: ")
                        .context("Failed to read password")?,
                };
                let credentials = Credentials::new(server, username, password);
                let report = session.connect(&credentials);
                formatter::print_run(&session, report.as_ref(), cli.format)?;
                report.is_some_and(|r| r.is_success())
            }
        }
    };

    std::process::exit(if ok { 0 } else { 1 });
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<WeeklyConfig> {
    if let Some(config_path) = path {
        return WeeklyConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    // Try to load default config from current directory if it exists
    let default_config_path = PathBuf::from("weekly.toml");
    if default_config_path.exists() {
        WeeklyConfig::from_file(&default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(WeeklyConfig::default())
    }
}
