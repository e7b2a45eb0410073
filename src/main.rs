use anyhow::Result;
use reqwest::Client;
use rolscraper::{config::PipelineConfig, extract::pdfium::PdfiumTableEngine, pipeline};
use std::{env, fs::File, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging: stdout + log file ──────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_file = File::create("rol_processor.log")?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
        .init();
    info!("startup");

    // ─── 2) run the pipeline ─────────────────────────────────────────
    let label = env::args().nth(1).unwrap_or_else(|| "Rol".to_string());
    let cfg = PipelineConfig::default();
    let client = Client::new();
    let engine = PdfiumTableEngine::new()?;

    match pipeline::run(&client, &cfg, &engine, &label).await {
        Ok(zip_path) => {
            info!(path = %zip_path.display(), "done");
            Ok(())
        }
        Err(e) => {
            error!("pipeline failed: {e}");
            Err(e.into())
        }
    }
}
