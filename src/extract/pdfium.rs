use super::{RawTableChunk, TableEngine};
use crate::error::{Error, Result};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Segments whose baselines are within this many points share a row.
const ROW_TOLERANCE: f32 = 4.0;
/// Segment left edges within this many points share a column.
const COLUMN_TOLERANCE: f32 = 6.0;
const MIN_GRID_ROWS: usize = 2;
const MIN_GRID_COLS: usize = 2;

/// A positioned run of text on a page, in PDF points (origin bottom-left).
struct TextPiece {
    text: String,
    left: f32,
    bottom: f32,
}

/// Production table engine over pdfium. Clusters the page's positioned text
/// segments into a row/column grid: row bands by baseline, column anchors by
/// left edge. Pages that do not yield at least a 2x2 grid produce no chunk.
pub struct PdfiumTableEngine {
    pdfium: Pdfium,
}

impl PdfiumTableEngine {
    /// Binds the system pdfium library, falling back to a copy next to the
    /// executable.
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_system_library()
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            })
            .map_err(|e| Error::Extraction(format!("failed to bind pdfium: {e}")))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn page_pieces(page: &PdfPage) -> Result<Vec<TextPiece>> {
        let text = page
            .text()
            .map_err(|e| Error::Extraction(format!("page text unavailable: {e}")))?;

        let mut pieces = Vec::new();
        for segment in text.segments().iter() {
            let content = segment.text();
            if content.trim().is_empty() {
                continue;
            }
            let bounds = segment.bounds();
            pieces.push(TextPiece {
                text: content,
                left: bounds.left().value,
                bottom: bounds.bottom().value,
            });
        }
        Ok(pieces)
    }

    /// Clusters pieces into a grid. Returns None when the page has no
    /// plausible table region.
    fn grid_from_pieces(mut pieces: Vec<TextPiece>) -> Option<Vec<Vec<String>>> {
        if pieces.is_empty() {
            return None;
        }

        // PDF y grows upward, so descending bottom = top-to-bottom reading order.
        pieces.sort_by(|a, b| {
            b.bottom
                .partial_cmp(&a.bottom)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    a.left
                        .partial_cmp(&b.left)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });

        // Row bands: a new band starts when the baseline drops past tolerance.
        let mut bands: Vec<Vec<TextPiece>> = Vec::new();
        let mut current: Vec<TextPiece> = Vec::new();
        let mut band_bottom = f32::INFINITY;
        for piece in pieces {
            if !current.is_empty() && band_bottom - piece.bottom > ROW_TOLERANCE {
                bands.push(std::mem::take(&mut current));
            }
            band_bottom = piece.bottom;
            current.push(piece);
        }
        if !current.is_empty() {
            bands.push(current);
        }
        if bands.len() < MIN_GRID_ROWS {
            return None;
        }

        // Column anchors: merged left-edge positions across the whole page.
        let mut lefts: Vec<f32> = bands
            .iter()
            .flat_map(|band| band.iter().map(|p| p.left))
            .collect();
        lefts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mut anchors: Vec<f32> = Vec::new();
        for left in lefts {
            match anchors.last() {
                Some(&last) if left - last <= COLUMN_TOLERANCE => {}
                _ => anchors.push(left),
            }
        }
        if anchors.len() < MIN_GRID_COLS {
            return None;
        }

        let mut rows = Vec::with_capacity(bands.len());
        for band in bands {
            let mut row = vec![String::new(); anchors.len()];
            for piece in band {
                let col = nearest_anchor(&anchors, piece.left);
                if !row[col].is_empty() {
                    row[col].push(' ');
                }
                row[col].push_str(piece.text.trim());
            }
            rows.push(row);
        }
        Some(rows)
    }
}

fn nearest_anchor(anchors: &[f32], left: f32) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (i, anchor) in anchors.iter().enumerate() {
        let distance = (left - anchor).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}

impl TableEngine for PdfiumTableEngine {
    fn detect_tables(&self, path: &Path) -> Result<Vec<RawTableChunk>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Extraction(format!("failed to open {}: {e}", path.display())))?;

        let mut chunks = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let pieces = Self::page_pieces(&page)?;
            if let Some(rows) = Self::grid_from_pieces(pieces) {
                debug!(page = index + 1, rows = rows.len(), "grid detected");
                chunks.push(RawTableChunk::new(index + 1, rows));
            }
        }
        info!(chunks = chunks.len(), "page scan complete");
        Ok(chunks)
    }
}
