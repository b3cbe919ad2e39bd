mod args;
mod config;
mod logging;
mod report;

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::net::SocketAddr;
use std::path::Path;
use std::process::Command as Process;

use app_api::AppContext;
use bluefin_app::AppState;
use clap::Parser;
use http_api::{HttpState, generate_csrf_token};

use args::{CliArgs, Command, ReportFormat};
use config::CliConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    logging::init();

    let loaded = config::load_or_create(args.config.as_deref()).map_err(io::Error::other)?;
    if loaded.created {
        tracing::info!(path = %loaded.file.display(), "created default config");
    }

    match args.command.unwrap_or_default() {
        Command::Serve { port, no_open } => serve(&loaded.config, port, no_open).await,
        Command::Report {
            input,
            format,
            output,
        } => run_report(&loaded.config, &input, format, output.as_deref()),
    }
}

async fn serve(
    config: &CliConfig,
    port: Option<u16>,
    no_open: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = AppState::new(config.app_config())?;
    let state = HttpState::new(AppContext { app_state }, generate_csrf_token());
    let router = http_api::router(state);

    let port = port.unwrap_or(config.port);
    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    let url = format!("http://127.0.0.1:{actual_port}");

    if used_fallback {
        tracing::warn!(
            configured = port,
            actual = actual_port,
            "configured port unavailable, using another for this run"
        );
    }

    println!("Bluefin is running at {url}");
    println!("Press Ctrl+C to stop.");

    if !no_open {
        if let Err(err) = open_url(&url) {
            tracing::warn!(error = %err, "failed to open browser");
        }
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn run_report(
    config: &CliConfig,
    input: &Path,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app_state = AppState::new(config.app_config())?;
    let service = &app_state.services.report;

    let file = File::open(input)
        .map_err(|err| io::Error::new(err.kind(), format!("open {}: {}", input.display(), err)))?;
    let source_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let report = service.upload(&source_name, BufReader::new(file))?;

    let bytes = match format {
        ReportFormat::Table => report::render_table(&report).into_bytes(),
        ReportFormat::Json => {
            let mut json = serde_json::to_vec_pretty(&report)?;
            json.push(b'\n');
            json
        }
        ReportFormat::Csv => service.export(None)?.bytes,
    };

    match output {
        Some(path) => {
            fs::write(path, &bytes).map_err(|err| {
                io::Error::new(err.kind(), format!("write {}: {}", path.display(), err))
            })?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

fn open_url(url: &str) -> Result<(), io::Error> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    let status = Process::new(opener).arg(url).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{opener} exited with {status}")))
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
