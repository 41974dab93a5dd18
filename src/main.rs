use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use flowdeck::api::{DashboardApi, HttpDashboardClient, Model};
use flowdeck::cli;
use flowdeck::config::DashboardConfig;
use flowdeck::dashboard::DashboardController;
use flowdeck::tui::app::TuiApp;
use flowdeck::tui::runner::run_tui;

#[derive(Parser)]
#[command(name = "flowdeck", about = "Terminal dashboard for server-side workflows.")]
struct Cli {
    /// Backend root URL (overrides config and FLOWDECK_URL)
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Default generation model: openai or deepseek
    #[arg(short, long, global = true)]
    model: Option<Model>,

    /// Default sampling temperature (0.0 to 1.0)
    #[arg(short, long, global = true)]
    temperature: Option<f64>,

    /// Verbose logging
    #[arg(long)]
    debug: bool,

    /// Log file for the interactive dashboard
    #[arg(long, default_value = "flowdeck.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the workflow list
    List,
    /// Run one workflow and print its status
    Run {
        /// Workflow id
        id: String,
    },
    /// Generate text from a prompt
    Generate {
        /// Prompt text
        prompt: String,
    },
    /// Write the resolved settings to .flowdeck/config.yaml
    Init,
}

fn init_logging(debug: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let directive = if debug { "flowdeck=debug" } else { "flowdeck=info" };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?);
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    // stdout belongs to the dashboard in interactive mode.
    let log_file = args.command.is_none().then_some(&args.log_file);
    init_logging(args.debug, log_file)?;

    let mut config = DashboardConfig::load();
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if let Some(model) = args.model {
        config.default_model = model;
    }
    if let Some(t) = args.temperature {
        config.set_temperature(t);
    }

    let client = HttpDashboardClient::new(&config.base_url)?;
    let base_url = client.base_url().to_string();
    let api: Arc<dyn DashboardApi> = Arc::new(client);
    let mut controller = DashboardController::new(config.default_model, config.default_temperature);

    info!("flowdeck using backend {base_url}");

    let report = match args.command {
        None => {
            let app = TuiApp::new(controller, &base_url);
            run_tui(api, app).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Init) => {
            let path = config.save_project(&std::env::current_dir()?)?;
            println!("wrote {}", path.display());
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::List) => cli::list(api.as_ref(), &mut controller, &base_url).await,
        Some(Command::Run { id }) => cli::run(api.as_ref(), &mut controller, &id).await,
        Some(Command::Generate { prompt }) => {
            cli::generate(api.as_ref(), &mut controller, &prompt).await
        }
    };

    println!("{}", report.text);
    Ok(if report.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
