pub mod pdfium;

use crate::error::Result;
use std::path::Path;

/// One raw tabular region detected on a single page. Cells carry whatever
/// text the engine found; missing cells are empty strings. The first row is
/// data like any other — no header inference happens at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTableChunk {
    /// 1-based page number the region was found on.
    pub page: usize,
    pub rows: Vec<Vec<String>>,
}

impl RawTableChunk {
    pub fn new(page: usize, rows: Vec<Vec<String>>) -> Self {
        Self { page, rows }
    }

    /// Grid width before any trimming.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}

/// Page-table detection engine. Implementations return chunks in page
/// order, then region order within each page.
pub trait TableEngine {
    fn detect_tables(&self, path: &Path) -> Result<Vec<RawTableChunk>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_the_widest_row() {
        let chunk = RawTableChunk::new(
            1,
            vec![
                vec!["a".into(), "b".into()],
                vec!["c".into(), "d".into(), "e".into()],
            ],
        );
        assert_eq!(chunk.width(), 3);
    }

    #[test]
    fn empty_chunk_has_zero_width() {
        assert_eq!(RawTableChunk::new(1, vec![]).width(), 0);
    }
}
