// src/utils/sheet_debug.rs
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::extractors::LocatedSection;
use crate::sheet::Sheet;
use crate::utils::error::AppError;

/// Renders the sheet as tab-separated text with located sections marked.
pub fn render_debug_dump(sheet: &Sheet, sections: &[LocatedSection]) -> String {
    let mut dump = String::new();

    // Summary of section ranges first
    let _ = writeln!(dump, "# Sheet '{}': {} rows", sheet.name, sheet.len());
    for section in sections {
        let _ = writeln!(
            dump,
            "# {:?} '{}' rows {}..{}",
            section.kind, section.keyword, section.start, section.end
        );
    }
    dump.push('\n');

    for (index, row) in sheet.rows.iter().enumerate() {
        for section in sections.iter().filter(|s| s.start == index) {
            let _ = writeln!(dump, ">>> {:?}", section.kind);
        }
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        let _ = writeln!(dump, "{:>5}\t{}", index, cells.join("\t"));
    }

    dump
}

/// Writes the annotated dump of a sheet for debugging section detection.
pub fn create_debug_dump(sheet: &Sheet, sections: &[LocatedSection], filename: &Path) -> Result<(), AppError> {
    if let Some(parent) = filename.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(filename, render_debug_dump(sheet, sections))?;

    tracing::info!("Saved debug dump to {}", filename.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::locate_sections;
    use crate::extractors::test_support::sheet;

    #[test]
    fn test_dump_marks_sections() {
        let sheet = sheet(&[
            &["", "Red", "Blue"],
            &["Cost report"],
            &["USA", "1,000", "2"],
        ]);
        let sections = locate_sections(&sheet);

        let dump = render_debug_dump(&sheet, &sections);

        assert!(dump.contains("# Costs 'Cost report' rows 1..3"));
        let marker = dump.find(">>> Costs").unwrap();
        let header = dump.find("    1\tCost report").unwrap();
        assert!(marker < header);
        assert!(dump.contains("    2\tUSA\t1,000\t2"));
    }

    #[test]
    fn test_create_debug_dump_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug").join("r1_sheet.txt");
        let sheet = sheet(&[&["a"]]);

        create_debug_dump(&sheet, &[], &path).unwrap();

        assert!(fs::read_to_string(path).unwrap().contains("Sheet 'Results': 1 rows"));
    }
}
