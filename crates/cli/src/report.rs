use std::fmt;
use tarifa_classify::{CategoryTable, Classification};
use tarifa_core::StatementEntry;

fn describe(entry: &StatementEntry) -> String {
    match entry.subtitle.as_deref().filter(|s| !s.is_empty()) {
        Some(subtitle) => format!("{} / {}", entry.name, subtitle),
        None => entry.name.clone(),
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &CategoryTable) -> fmt::Result {
    writeln!(f, "== {} ==", table.name)?;
    for entry in &table.entries {
        writeln!(f, "{:<10}  {:<48}  {:>12}", entry.date, describe(entry), entry.value)?;
    }
    writeln!(f, "{:<60}  {:>12}", "Total", table.total.to_string())?;
    writeln!(f)
}

/// Plain-text rendering: one block per non-empty table, collapse first,
/// then the entries that were left out.
pub struct Report<'a>(pub &'a Classification);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classification = self.0;
        for table in classification.tables().iter().filter(|t| !t.is_empty()) {
            write_table(f, table)?;
        }

        writeln!(f, "Unmatched: {}", classification.unmatched_count())?;
        for entry in classification.unmatched() {
            writeln!(f, "  {}  {}  {}", entry.date, describe(entry), entry.value)?;
        }
        writeln!(f, "Rejected: {}", classification.rejected_count())?;
        for rejected in classification.rejected() {
            writeln!(f, "  {}: {}", describe(&rejected.entry), rejected.error)?;
        }
        Ok(())
    }
}

pub fn render(classification: &Classification) -> String {
    Report(classification).to_string()
}
