use crate::config::PipelineConfig;
use crate::process::table::UnifiedTable;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s,.;-]").expect("char filter regex should be valid"));
static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex should be valid"));

/// Stringified missing values produced upstream; coerced to empty.
const MISSING_LITERALS: &[&str] = &["nan", "None", "NaT"];

/// Canonical text cleanup: strip diacritics (NFKD decompose, drop non-ASCII),
/// fold CR/LF to spaces, remove everything outside alphanumerics, whitespace
/// and `,.;-`, then collapse whitespace runs and trim. Idempotent.
pub fn normalize_text(raw: &str) -> String {
    let ascii: String = raw.nfkd().filter(char::is_ascii).collect();
    let flattened = ascii.replace(['\n', '\r'], " ");
    let kept = DISALLOWED.replace_all(&flattened, "");
    WHITESPACE_RUNS.replace_all(&kept, " ").trim().to_string()
}

/// Cleans the reconciled table in place, in this order:
/// empty-row drop, header normalization, truncation to the canonical width,
/// positional rename, abbreviation expansion, cell normalization,
/// missing-literal coercion.
///
/// Expansion runs after the rename and addresses the code columns by the
/// position of each abbreviation's label in the canonical schema, so it
/// fires regardless of what header text the document carried. Because cell
/// normalization runs after expansion, expanded labels are themselves
/// normalized; the accented forms survive only in the header row.
pub fn clean_table(table: &mut UnifiedTable, cfg: &PipelineConfig) {
    table
        .rows
        .retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));

    for col in &mut table.columns {
        *col = normalize_text(col);
    }

    let target = cfg.expected_columns.len();
    if table.columns.len() > target {
        table.columns.truncate(target);
        for row in &mut table.rows {
            row.truncate(target);
        }
    }

    for (i, col) in table.columns.iter_mut().enumerate() {
        if let Some(name) = cfg.expected_columns.get(i) {
            *col = name.clone();
        }
    }

    for abbrev in &cfg.abbreviations {
        let Some(idx) = cfg
            .expected_columns
            .iter()
            .position(|c| c == &abbrev.label)
        else {
            continue;
        };
        if idx >= table.width() {
            continue;
        }
        for row in &mut table.rows {
            if let Some(cell) = row.get_mut(idx) {
                if cell.trim().eq_ignore_ascii_case(&abbrev.code) {
                    *cell = abbrev.label.clone();
                }
            }
        }
    }

    for row in &mut table.rows {
        for cell in row.iter_mut() {
            let cleaned = normalize_text(cell);
            *cell = if MISSING_LITERALS.contains(&cleaned.as_str()) {
                String::new()
            } else {
                cleaned
            };
        }
    }

    info!(rows = table.len(), columns = table.width(), "table cleaned");
}
