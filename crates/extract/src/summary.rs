use tarifa_core::StatementEntry;

use crate::extractor::ExtractError;

/// Strip the Markdown code fences the extraction model tends to wrap its
/// JSON in.
pub fn clean_summary(summary: &str) -> String {
    summary
        .trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Decode extraction output into statement entries.
pub fn decode_entries(summary: &str) -> Result<Vec<StatementEntry>, ExtractError> {
    let cleaned = clean_summary(summary);
    if cleaned.is_empty() {
        return Err(ExtractError::EmptySummary);
    }
    let entries: Vec<StatementEntry> = serde_json::from_str(&cleaned)?;
    tracing::debug!("Decoded {} entries from summary", entries.len());
    Ok(entries)
}
