/// A reconciled table: one fixed ordered column list shared by every row.
///
/// Invariant: every row holds exactly `columns.len()` cells. The reconciler
/// establishes this by padding or truncating chunk rows; the normalizer
/// preserves it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl UnifiedTable {
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
