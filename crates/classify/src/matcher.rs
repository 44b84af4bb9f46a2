use tarifa_core::StatementEntry;

use crate::normalize::standardize;

/// The standardized name and subtitle of an entry, computed once and reused
/// against every keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchText {
    name: String,
    subtitle: Option<String>,
}

impl MatchText {
    pub fn of(entry: &StatementEntry) -> Self {
        MatchText {
            name: standardize(&entry.name),
            subtitle: entry.subtitle.as_deref().map(standardize),
        }
    }

    /// `key` must already be standardized and non-empty.
    fn contains(&self, key: &str) -> bool {
        self.name.contains(key) || self.subtitle.as_deref().is_some_and(|s| s.contains(key))
    }
}

/// Internal pairing of a configured keyword with its standardized form.
#[derive(Debug, Clone)]
struct Keyword {
    label: String,
    key: String,
}

/// An ordered keyword list, standardized up front.
///
/// Keywords that standardize to nothing (blank or punctuation-only) would
/// match every entry, so they are dropped here.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .filter_map(|kw| {
                let label = kw.as_ref();
                let key = standardize(label);
                if key.is_empty() {
                    tracing::warn!("Ignoring keyword {label:?}: nothing left after standardizing");
                    return None;
                }
                Some(Keyword {
                    label: label.to_string(),
                    key,
                })
            })
            .collect();
        Self { keywords }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.label.as_str())
    }

    pub fn is_included(&self, text: &MatchText) -> bool {
        self.keywords.iter().any(|k| text.contains(&k.key))
    }

    /// First keyword, in list order, found in the entry's text. Earlier
    /// keywords win over later, longer or more specific ones.
    pub fn find_match(&self, text: &MatchText) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| text.contains(&k.key))
            .map(|k| k.label.as_str())
    }
}

/// Whether any keyword occurs in the entry's name or subtitle.
pub fn is_included<S: AsRef<str>>(entry: &StatementEntry, keywords: &[S]) -> bool {
    let text = MatchText::of(entry);
    keywords.iter().any(|kw| {
        let key = standardize(kw.as_ref());
        !key.is_empty() && text.contains(&key)
    })
}

/// The first keyword in `keywords` occurring in the entry's name or subtitle.
pub fn find_match<'a, S: AsRef<str>>(entry: &StatementEntry, keywords: &'a [S]) -> Option<&'a str> {
    let text = MatchText::of(entry);
    keywords.iter().map(|kw| kw.as_ref()).find(|kw| {
        let key = standardize(kw);
        !key.is_empty() && text.contains(&key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, subtitle: Option<&str>) -> StatementEntry {
        StatementEntry::new("13/01/2017", name, subtitle, "110117", "-13,50")
    }

    #[test]
    fn included_via_name() {
        assert!(is_included(&entry("TARIFA BANCARIA", None), &["TARIFA"]));
    }

    #[test]
    fn included_via_subtitle() {
        let e = entry("DEBITO AUTOMATICO", Some("CESTA B.EXPRESSO2"));
        assert!(is_included(&e, &["cesta b expresso"]));
    }

    #[test]
    fn not_included() {
        assert!(!is_included(&entry("COMPRA DESCONHECIDA", None), &["TARIFA", "IOF"]));
        assert!(!is_included(&entry("TARIFA", None), &[] as &[&str]));
    }

    #[test]
    fn matching_ignores_case_and_punctuation() {
        let e = entry("Tar. Bancária - Pacote", None);
        assert!(is_included(&e, &["TAR BANCÁRIA"]));
        assert!(is_included(&e, &["tar.bancária"]));
    }

    #[test]
    fn accented_keyword_does_not_match_unaccented_text() {
        let e = entry("TARIFA BASICA", None);
        assert!(!is_included(&e, &["BÁSICA"]));
    }

    #[test]
    fn accented_letters_vanish_on_both_sides() {
        let e = entry("PAGAMENTO À VISTA", None);
        assert!(is_included(&e, &["PAGAMENTO VISTA"]));
        assert!(is_included(&entry("TARIFA BÁSICA", None), &["TARIFA BSICA"]));
        assert_eq!(find_match(&e, &["IOF", "pagamento-vista"]), Some("pagamento-vista"));
    }

    #[test]
    fn matching_spans_removed_whitespace() {
        // "TARIFABANCARIA" contains "FABAN" once spaces are gone.
        assert!(is_included(&entry("TARIFA BANCARIA", None), &["FA BAN"]));
    }

    #[test]
    fn blank_keyword_never_matches() {
        let e = entry("ANYTHING", None);
        assert!(!is_included(&e, &["", " - "]));
        assert_eq!(find_match(&e, &["", "..."]), None);
        assert!(KeywordSet::new(["", " . "]).is_empty());
    }

    #[test]
    fn find_match_first_listed_wins() {
        let e = entry("TARIFA BANCARIA SERVICO", None);
        let categories = ["TARIFA", "TARIFA BANCARIA"];
        assert_eq!(find_match(&e, &categories), Some("TARIFA"));

        let reversed = ["TARIFA BANCARIA", "TARIFA"];
        assert_eq!(find_match(&e, &reversed), Some("TARIFA BANCARIA"));
    }

    #[test]
    fn find_match_returns_configured_spelling() {
        let e = entry("juros do cheque especial", None);
        assert_eq!(find_match(&e, &["Juros Cheque", "juros"]), Some("juros"));
    }

    #[test]
    fn find_match_checks_subtitle() {
        let e = entry("DEBITO", Some("IOF ADICIONAL"));
        assert_eq!(find_match(&e, &["JUROS", "IOF"]), Some("IOF"));
    }

    #[test]
    fn find_match_none() {
        assert_eq!(find_match(&entry("PIX ENVIADO", None), &["JUROS", "IOF"]), None);
    }

    #[test]
    fn keyword_set_agrees_with_free_functions() {
        let keywords = ["TARIFA", "TARIFA BANCARIA", "IOF"];
        let set = KeywordSet::new(keywords);
        for e in [
            entry("TARIFA BANCARIA SERVICO", None),
            entry("COMPRA", Some("IOF")),
            entry("COMPRA", None),
        ] {
            let text = MatchText::of(&e);
            assert_eq!(set.find_match(&text), find_match(&e, &keywords));
            assert_eq!(set.is_included(&text), is_included(&e, &keywords));
        }
    }

    #[test]
    fn keyword_set_keeps_order_and_labels() {
        let set = KeywordSet::new(vec!["B".to_string(), "".to_string(), "a".to_string()]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.labels().collect::<Vec<_>>(), vec!["B", "a"]);
    }
}
