use crate::error::Result;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Download `url` into `dest_dir/filename`, streaming the body to disk
/// chunk by chunk. Returns the full path of the saved file.
pub async fn download_file(
    client: &Client,
    url: &str,
    dest_dir: impl AsRef<Path>,
    filename: &str,
) -> Result<PathBuf> {
    let dest_dir = dest_dir.as_ref();
    fs::create_dir_all(dest_dir).await?;
    let dest_path = dest_dir.join(filename);

    let mut resp = client.get(url).send().await?.error_for_status()?;
    let mut file = fs::File::create(&dest_path).await?;
    while let Some(chunk) = resp.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    info!(path = %dest_path.display(), "file downloaded");
    Ok(dest_path)
}
