/// Reduce text to an uppercase run of ASCII letters, digits and underscores.
///
/// Whitespace and punctuation disappear entirely, so `"CESTA B.EXPRESSO2"`
/// becomes `"CESTABEXPRESSO2"`. Non-ASCII letters are dropped too, not
/// folded: `"BÁSICA"` becomes `"BSICA"`. Keyword lists are written against
/// this form.
pub fn standardize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
