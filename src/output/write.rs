use crate::error::Result;
use crate::process::table::UnifiedTable;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Serializes the table as semicolon-delimited CSV: UTF-8 with BOM, LF
/// terminators, quoting only where a field needs it, header row first.
pub fn write_csv(table: &UnifiedTable, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    drop(writer);

    strip_blank_lines(path)?;
    info!(path = %path.display(), rows = table.len(), "csv written");
    Ok(())
}

/// Re-reads the file, trims each line and drops empty ones, then rewrites it
/// in place with the BOM restored. Guards against serialization artifacts.
fn strip_blank_lines(path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path)?;
    let body = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let mut cleaned = String::with_capacity(body.len());
    for line in body.lines() {
        let line = line.trim();
        if !line.is_empty() {
            cleaned.push_str(line);
            cleaned.push('\n');
        }
    }

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    file.write_all(cleaned.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sample_table() -> UnifiedTable {
        UnifiedTable {
            columns: cells(&["A", "B", "C"]),
            rows: vec![cells(&["1", "um", "x"]), cells(&["2", "dois", "y"])],
        }
    }

    #[test]
    fn two_data_rows_serialize_to_three_lines() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        write_csv(&sample_table(), &path)?;

        let bytes = fs::read(&path)?;
        assert_eq!(&bytes[..3], UTF8_BOM);

        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["A;B;C", "1;um;x", "2;dois;y"]);
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
        Ok(())
    }

    #[test]
    fn fields_with_the_delimiter_are_quoted() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        let table = UnifiedTable {
            columns: cells(&["A", "B"]),
            rows: vec![cells(&["a;b", "plain"])],
        };
        write_csv(&table, &path)?;

        let text = fs::read_to_string(&path)?;
        assert!(text.contains("\"a;b\";plain"));
        Ok(())
    }

    #[test]
    fn blank_lines_are_stripped_in_place() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        fs::write(&path, "\u{feff}A;B\n\n1;2\n   \n")?;
        strip_blank_lines(&path)?;

        let bytes = fs::read(&path)?;
        assert_eq!(&bytes[..3], UTF8_BOM);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(text, "A;B\n1;2\n");
        Ok(())
    }
}
