//! Field extraction service.
//!
//! Resolves single-valued fields by trying ordered selector rules against a
//! parsed page.

use scraper::{ElementRef, Html, Selector};

use crate::models::selectors::fields;
use crate::models::{Probe, SelectorRule, TextSource};
use crate::utils::{char_len, normalize_whitespace};

/// Field text must be strictly shorter than this many characters.
pub const MAX_FIELD_CHARS: usize = 200;

/// Try one rule inside `scope`.
///
/// Matching elements are visited in document order and the first one whose
/// text passes `accept` is returned. Elements missing the requested attribute
/// are skipped.
pub fn probe(scope: ElementRef<'_>, rule: &SelectorRule, accept: impl Fn(&str) -> bool) -> Probe {
    let selector = match Selector::parse(rule.css) {
        Ok(selector) => selector,
        Err(e) => {
            log::debug!("Unsupported selector '{}': {:?}", rule.css, e);
            return Probe::Unsupported(format!("{e:?}"));
        }
    };

    scope
        .select(&selector)
        .filter_map(|element| read_text(element, rule.source))
        .find(|text| accept(text.trim()))
        .map_or(Probe::NoMatch, |text| Probe::Matched(normalize_whitespace(&text)))
}

/// First acceptable text over an ordered rule list, or `None`.
///
/// Each rule is tried independently; an unsupported selector only skips that
/// rule.
pub fn first_match(
    scope: ElementRef<'_>,
    rules: &[SelectorRule],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    rules
        .iter()
        .find_map(|rule| probe(scope, rule, &accept).into_text())
}

/// Raw text of a matched element. Acceptance sees it trimmed; the
/// returned match has its whitespace collapsed.
fn read_text(element: ElementRef<'_>, source: TextSource) -> Option<String> {
    match source {
        TextSource::Text => Some(element.text().collect()),
        TextSource::Attr(name) => element.value().attr(name).map(str::to_string),
    }
}

/// Acceptance rule for top-level fields.
pub fn is_field_text(text: &str) -> bool {
    !text.is_empty() && char_len(text) < MAX_FIELD_CHARS
}

/// Service resolving the single-valued snapshot fields.
pub struct FieldExtractor;

impl FieldExtractor {
    /// Resolve a field from its rule list; empty when nothing qualifies.
    pub fn extract_field(document: &Html, rules: &[SelectorRule]) -> String {
        first_match(document.root_element(), rules, is_field_text).unwrap_or_default()
    }

    pub fn status(document: &Html) -> String {
        Self::extract_field(document, fields::STATUS)
    }

    pub fn location(document: &Html) -> String {
        Self::extract_field(document, fields::LOCATION)
    }

    pub fn carrier(document: &Html) -> String {
        Self::extract_field(document, fields::CARRIER)
    }

    pub fn estimated_delivery(document: &Html) -> String {
        Self::extract_field(document, fields::ESTIMATED_DELIVERY)
    }
}
