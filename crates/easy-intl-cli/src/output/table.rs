//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};

/// Coverage data for a single language.
pub struct LanguageCoverage {
    /// Language code (e.g., "es", "fr").
    pub language: String,
    /// Number of source keys translated.
    pub translated: usize,
    /// `scope/key` names of missing keys.
    pub missing: Vec<String>,
}

impl LanguageCoverage {
    /// Share of source keys translated, as a whole percentage.
    pub fn percent(&self, source_count: usize) -> usize {
        if source_count == 0 {
            return 100;
        }
        (self.translated * 100).div_euclid(source_count)
    }
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Percent", "Missing"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, source_count),
            format!("{}%", lang.percent(source_count)),
            lang.missing.len().to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(translated: usize, missing: usize) -> LanguageCoverage {
        LanguageCoverage {
            language: "fr".to_string(),
            translated,
            missing: (0..missing).map(|i| format!("scope/key{i}")).collect(),
        }
    }

    #[test]
    fn percent_rounds_down() {
        assert_eq!(coverage(2, 1).percent(3), 66);
        assert_eq!(coverage(0, 0).percent(0), 100);
    }

    #[test]
    fn table_has_a_row_per_language() {
        let table = format_coverage_table(3, &[coverage(2, 1), coverage(3, 0)]);
        let rendered = table.to_string();
        assert!(rendered.contains("2/3"));
        assert!(rendered.contains("3/3"));
        assert_eq!(table.row_iter().count(), 2);
    }
}
