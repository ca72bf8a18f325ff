//! Product category code extraction.
//!
//! Category cells hold free text such as `PC21 Laborchemikalien`. Every
//! `PC<digits>[letter]` substring is extracted in order of occurrence, with
//! no word boundaries, so `PC21_Labor` yields `PC21` and `PC21Labor` yields
//! `PC21L`. The first token present in the allow-list wins. The tie-break
//! ignores tokens outside the allow-list even when they occur earlier.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chem_model::{CategoryOptions, Diagnostic, DiagnosticCode};
use regex::Regex;

use crate::staged::Staged;

static CATEGORY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PC[0-9]+[A-Z]?").expect("Invalid category token regex"));

/// Extracts controlled-vocabulary codes against an allow-list.
#[derive(Debug, Clone, Default)]
pub struct CodeExtractor {
    allowed: BTreeSet<String>,
}

impl CodeExtractor {
    /// Build from allowed codes; comparison is case-insensitive.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|code| code.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    pub fn from_options(options: &CategoryOptions) -> Self {
        Self::new(&options.allowed)
    }

    pub fn is_allowed(&self, code: &str) -> bool {
        self.allowed.contains(&code.to_uppercase())
    }

    /// All code tokens in order of occurrence, uppercased.
    pub fn candidates(raw: &str) -> Vec<String> {
        CATEGORY_TOKEN
            .find_iter(raw)
            .map(|found| found.as_str().to_uppercase())
            .collect()
    }

    /// Extract the first allowed code from `raw`.
    pub fn extract(&self, raw: &str) -> Staged<Option<String>> {
        let raw = raw.trim();
        let candidates = Self::candidates(raw);

        if candidates.is_empty() {
            if raw.is_empty() {
                return Staged::clean(None);
            }
            return Staged::with_diagnostic(
                None,
                Diagnostic::new(
                    DiagnosticCode::UnmappableCategory,
                    format!("unmappable category '{raw}': no product category code found"),
                ),
            );
        }

        let Some(position) = candidates.iter().position(|code| self.is_allowed(code)) else {
            return Staged::with_diagnostic(
                None,
                Diagnostic::new(
                    DiagnosticCode::DisallowedCategory,
                    format!(
                        "unmappable category '{raw}': {} not in the allowed codes",
                        candidates.join(", ")
                    ),
                ),
            );
        };

        let chosen = candidates[position].clone();
        if candidates.len() == 1 {
            return Staged::clean(Some(chosen));
        }
        let discarded: Vec<&str> = candidates
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != position)
            .map(|(_, code)| code.as_str())
            .collect();
        Staged::with_diagnostic(
            Some(chosen.clone()),
            Diagnostic::new(
                DiagnosticCode::AmbiguousCategory,
                format!(
                    "chose {chosen} from '{raw}', discarded {}",
                    discarded.join(", ")
                ),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_uppercased_in_order() {
        assert_eq!(
            CodeExtractor::candidates("pc9a Reiniger, PC35; xPC1"),
            vec!["PC9A", "PC35", "PC1"]
        );
    }

    #[test]
    fn tokens_are_found_inside_words() {
        assert_eq!(CodeExtractor::candidates("xPC21"), vec!["PC21"]);
        assert_eq!(CodeExtractor::candidates("PC21_Laborchemikalien"), vec!["PC21"]);
        assert_eq!(CodeExtractor::candidates("PC21Labor"), vec!["PC21L"]);
    }

    #[test]
    fn empty_text_is_silent() {
        let extractor = CodeExtractor::new(["PC21"]);
        let result = extractor.extract("   ");
        assert_eq!(result.value, None);
        assert!(result.diagnostics.is_empty());
    }
}
