use crate::config::PipelineConfig;
use crate::error::Result;
use crate::extract::TableEngine;
use crate::fetch::{download, locator};
use crate::output::{archive, write};
use crate::process::{normalize, reconcile};
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runs the whole pipeline: locate → fetch → extract → reconcile →
/// normalize → write → archive. Strictly sequential and fail-fast; the
/// first stage error aborts the run, nothing is retried. The engine stays
/// on the calling thread, so engines that are not `Send` work here.
pub async fn run(
    client: &Client,
    cfg: &PipelineConfig,
    engine: &dyn TableEngine,
    label: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(&cfg.download_dir)?;
    fs::create_dir_all(&cfg.output_dir)?;

    info!(url = %cfg.landing_url, "locating annex document");
    let html = locator::fetch_landing_page(client, cfg).await?;
    let annex_url = locator::find_annex_url(&html, cfg)?;

    let pdf_path =
        download::download_file(client, &annex_url, &cfg.download_dir, &cfg.annex_filename)
            .await?;

    let csv_path = process_document(&pdf_path, cfg, engine)?;

    archive_output(&csv_path, cfg, label)
}

/// The post-fetch half of the pipeline: extract the document's tables,
/// reconcile and normalize them, and write the CSV artifact. Split out so it
/// can run against a local file without any network.
pub fn process_document(
    document_path: &Path,
    cfg: &PipelineConfig,
    engine: &dyn TableEngine,
) -> Result<PathBuf> {
    info!(path = %document_path.display(), "extracting tables");
    let chunks = engine.detect_tables(document_path)?;
    info!(chunks = chunks.len(), "raw chunks detected");

    let mut table = reconcile::reconcile(chunks, cfg)?;
    normalize::clean_table(&mut table, cfg);

    let csv_path = cfg.output_dir.join(&cfg.csv_filename);
    write::write_csv(&table, &csv_path)?;
    Ok(csv_path)
}

/// Packages the CSV into `Teste_<label>.zip` in the output directory. The
/// label is sanitized before it reaches the filename.
pub fn archive_output(csv_path: &Path, cfg: &PipelineConfig, label: &str) -> Result<PathBuf> {
    let safe = archive::sanitize_label(label);
    let zip_path = cfg.output_dir.join(format!("Teste_{safe}.zip"));
    archive::archive_file(csv_path, &zip_path)?;
    info!(path = %zip_path.display(), "pipeline complete");
    Ok(zip_path)
}
