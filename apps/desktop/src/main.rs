use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AnalysisDriver, Command, DirectorySink, FileInput, HttpAnalysisService, Notification, UiState,
};
use shared::domain::InputMode;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod shell;
mod terminal;

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod flow_tests;

use config::{load_settings, ClientSettings, CliOverrides, DEFAULT_CONFIG_FILE};
use terminal::{print_notifications, print_view, TerminalChart};

#[derive(Parser, Debug)]
#[command(name = "netsereno", version, about = "Phishing analysis client")]
struct Cli {
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long, global = true, help = "Analysis service base URL")]
    service_url: Option<String>,
    #[arg(long, global = true, help = "Directory where reports are saved")]
    report_dir: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = false)]
    accept_invalid_certs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one file or text and print the verdict.
    Analyze {
        #[arg(long, conflicts_with = "text", required_unless_present = "text")]
        file: Option<PathBuf>,
        #[arg(long, help = "Text to analyze, or `-` to read stdin")]
        text: Option<String>,
        #[arg(long, default_value_t = false, help = "Download the report afterwards")]
        report: bool,
    },
    /// Interactive session with mode switching, repeated submissions and export.
    Shell,
}

fn build_driver(settings: &ClientSettings, chart: TerminalChart) -> Result<AnalysisDriver> {
    let http = reqwest::Client::builder()
        .danger_accept_invalid_certs(settings.accept_invalid_certs)
        .build()
        .context("failed to build http client")?;
    let service = HttpAnalysisService::with_client(http, &settings.service_url)?;
    let sink = DirectorySink::new(settings.report_dir.clone());
    info!(
        service_url = service.base_url(),
        report_dir = %sink.dir().display(),
        "analysis service configured"
    );
    Ok(AnalysisDriver::new(
        Arc::new(service),
        Box::new(chart),
        Box::new(sink),
    ))
}

async fn read_stdin() -> Result<String> {
    let mut text = String::new();
    BufReader::new(tokio::io::stdin())
        .read_to_string(&mut text)
        .await
        .context("failed to read stdin")?;
    Ok(text)
}

async fn analyze_once(
    driver: &mut AnalysisDriver,
    chart: &TerminalChart,
    file: Option<PathBuf>,
    text: Option<String>,
    report: bool,
) -> Result<()> {
    match (file, text) {
        (Some(path), _) => {
            let input = FileInput::read(&path)?;
            driver.controller_mut().form_mut().set_file(input);
            driver.dispatch(Command::SetMode(InputMode::File)).await;
        }
        (None, Some(text)) => {
            let text = if text == "-" { read_stdin().await? } else { text };
            driver.controller_mut().form_mut().set_text(text);
            driver.dispatch(Command::SetMode(InputMode::Text)).await;
        }
        (None, None) => return Err(anyhow!("either --file or --text is required")),
    }

    driver.dispatch(Command::Submit).await;
    print_notifications(driver.take_notifications());
    print_view(&driver.view_model(), driver.controller().session().meta(), chart);

    if driver.state() != UiState::ResultsShown {
        return Err(anyhow!(
            "analysis did not complete (state: {:?})",
            driver.state()
        ));
    }

    if report {
        driver.dispatch(Command::Export).await;
        let notifications = driver.take_notifications();
        let failure = notifications.iter().find_map(|notification| match notification {
            Notification::Error(message) => Some(message.clone()),
            Notification::Info(_) => None,
        });
        print_notifications(notifications);
        if let Some(message) = failure {
            return Err(anyhow!("report export failed: {message}"));
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let overrides = CliOverrides {
        service_url: cli.service_url,
        report_dir: cli.report_dir,
        accept_invalid_certs: cli.accept_invalid_certs,
    };
    let settings = load_settings(&cli.config, &overrides)?;
    let chart = TerminalChart::default();
    let mut driver = build_driver(&settings, chart.clone())?;

    match cli.command {
        Commands::Analyze { file, text, report } => {
            analyze_once(&mut driver, &chart, file, text, report).await
        }
        Commands::Shell => {
            let lines = BufReader::new(tokio::io::stdin()).lines();
            shell::run(&mut driver, &chart, lines).await
        }
    }
}
