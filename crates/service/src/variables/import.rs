//! Bulk import from dotenv-style text.

/// One `KEY=VALUE` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportEntry {
    pub name: String,
    pub value: String,
}

/// Split `text` into entries. Lines without `=` are skipped; the key ends at the first `=`.
pub fn parse_entries(text: &str) -> Vec<ImportEntry> {
    text.lines()
        .filter_map(|line| {
            let (name, value) = line.split_once('=')?;
            Some(ImportEntry { name: name.trim().to_string(), value: value.trim().to_string() })
        })
        .collect()
}
