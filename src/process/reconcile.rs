use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::extract::RawTableChunk;
use crate::process::table::UnifiedTable;
use tracing::{debug, info};

/// Chunks at or below this width are page furniture, not table regions.
const NOISE_COLUMN_THRESHOLD: usize = 3;

/// Filters, trims, and concatenates raw chunks into one table.
///
/// PRECONDITION: the source document's table layout is columnar-stable
/// across pages. Alignment between chunks is strictly positional — column
/// `i` of one chunk lands in column `i` of the unified table, never matched
/// by header text. A layout change in the source silently corrupts data
/// here; the only guard is the minimum-width check below.
pub fn reconcile(chunks: Vec<RawTableChunk>, cfg: &PipelineConfig) -> Result<UnifiedTable> {
    let mut surviving: Vec<Vec<Vec<String>>> = Vec::new();
    for chunk in chunks {
        let width = chunk.width();
        if width <= NOISE_COLUMN_THRESHOLD {
            debug!(page = chunk.page, width, "discarding narrow chunk");
            continue;
        }
        let trimmed = drop_empty_columns(chunk.rows);
        if trimmed.is_empty() {
            debug!(page = chunk.page, "discarding chunk with no content");
            continue;
        }
        surviving.push(trimmed);
    }

    let mut chunks = surviving.into_iter();
    let first = chunks
        .next()
        .ok_or_else(|| Error::Extraction("no valid table chunks detected".to_string()))?;

    // First chunk's first row becomes the unified header. Later chunks also
    // lead with a (repeated) header row; those are dropped, not stacked.
    let mut first_rows = first.into_iter();
    let columns = first_rows.next().unwrap_or_default();
    let width = columns.len();
    let mut rows: Vec<Vec<String>> = first_rows.map(|r| fit_width(r, width)).collect();

    for chunk in chunks {
        let mut chunk_rows = chunk.into_iter();
        chunk_rows.next();
        rows.extend(chunk_rows.map(|r| fit_width(r, width)));
    }

    let expected = cfg.expected_columns.len();
    if width < expected {
        return Err(Error::Schema {
            actual: width,
            expected,
        });
    }

    info!(rows = rows.len(), columns = width, "chunks reconciled");
    Ok(UnifiedTable { columns, rows })
}

/// Removes columns that are empty across every row of the chunk.
fn drop_empty_columns(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let kept: Vec<usize> = (0..width)
        .filter(|&col| {
            rows.iter()
                .any(|row| row.get(col).is_some_and(|cell| !cell.trim().is_empty()))
        })
        .collect();

    rows.into_iter()
        .map(|row| {
            kept.iter()
                .map(|&col| row.get(col).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

fn fit_width(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn wide_chunk(page: usize, width: usize, data_rows: usize) -> RawTableChunk {
        let header: Vec<String> = (0..width).map(|i| format!("H{i}")).collect();
        let mut rows = vec![header];
        for r in 0..data_rows {
            rows.push((0..width).map(|c| format!("v{r}-{c}")).collect());
        }
        RawTableChunk::new(page, rows)
    }

    #[test]
    fn narrow_chunks_are_excluded() {
        let cfg = PipelineConfig::default();
        let narrow = RawTableChunk::new(1, vec![cells(&["a", "b", "c"]), cells(&["1", "2", "3"])]);
        let wide = wide_chunk(2, 13, 2);
        let table = reconcile(vec![narrow, wide], &cfg).unwrap();
        assert_eq!(table.width(), 13);
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns[0], "H0");
    }

    #[test]
    fn later_chunk_headers_are_dropped() {
        let cfg = PipelineConfig::default();
        let table = reconcile(vec![wide_chunk(1, 13, 3), wide_chunk(2, 13, 2)], &cfg).unwrap();
        assert_eq!(table.len(), 5);
        assert!(table.rows.iter().all(|r| r[0] != "H0"));
    }

    #[test]
    fn too_few_columns_is_a_schema_error() {
        let cfg = PipelineConfig::default();
        let err = reconcile(vec![wide_chunk(1, 10, 2)], &cfg).unwrap_err();
        match err {
            Error::Schema { actual, expected } => {
                assert_eq!(actual, 10);
                assert_eq!(expected, 13);
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn no_surviving_chunks_is_an_extraction_error() {
        let cfg = PipelineConfig::default();
        let narrow = RawTableChunk::new(1, vec![cells(&["a", "b"])]);
        assert!(matches!(
            reconcile(vec![narrow], &cfg),
            Err(Error::Extraction(_))
        ));
    }

    #[test]
    fn all_empty_columns_are_trimmed() {
        let rows = vec![
            cells(&["a", "", "b", " "]),
            cells(&["c", "", "d", ""]),
        ];
        let trimmed = drop_empty_columns(rows);
        assert_eq!(trimmed, vec![cells(&["a", "b"]), cells(&["c", "d"])]);
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let cfg = PipelineConfig::default();
        let header: Vec<String> = (0..13).map(|i| format!("H{i}")).collect();
        let mut short = cells(&["only", "four", "cells", "here"]);
        short.resize(5, "x".to_string());
        let chunk = RawTableChunk::new(1, vec![header, short]);
        let table = reconcile(vec![chunk], &cfg).unwrap();
        assert_eq!(table.rows[0].len(), 13);
        assert_eq!(table.rows[0][12], "");
    }
}
