// src/models/selectors.rs

//! Ordered selector rules for the aggregator's tracking page.
//!
//! Every list is ordered by priority: the most specific structural hint comes
//! first and the most generic one last. The first rule producing acceptable
//! text wins, so reordering a list changes extraction results.

/// Where the text of a matched element comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Concatenated text content of the element
    Text,
    /// Value of the named attribute
    Attr(&'static str),
}

/// A single structural query tried against the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorRule {
    /// CSS selector
    pub css: &'static str,

    /// Text source for matched elements
    pub source: TextSource,
}

impl SelectorRule {
    pub const fn text(css: &'static str) -> Self {
        Self {
            css,
            source: TextSource::Text,
        }
    }

    pub const fn attr(css: &'static str, name: &'static str) -> Self {
        Self {
            css,
            source: TextSource::Attr(name),
        }
    }
}

/// Outcome of trying one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// An element produced acceptable text
    Matched(String),
    /// The rule is valid but nothing acceptable matched
    NoMatch,
    /// The selector could not be parsed by the HTML engine
    Unsupported(String),
}

impl Probe {
    pub fn into_text(self) -> Option<String> {
        match self {
            Probe::Matched(text) => Some(text),
            Probe::NoMatch | Probe::Unsupported(_) => None,
        }
    }
}

/// Rules for the top-level snapshot fields.
pub mod fields {
    use super::SelectorRule;

    pub const STATUS: &[SelectorRule] = &[
        SelectorRule::text("h1, h2, h3"),
        SelectorRule::text(r#"[class*="status"]"#),
        SelectorRule::text("strong, b"),
        SelectorRule::text(".parcel-status"),
    ];

    pub const LOCATION: &[SelectorRule] = &[
        SelectorRule::text(r#"[class*="location"]"#),
        SelectorRule::text(r#"[class*="city"]"#),
        SelectorRule::text(r#"[class*="current-location"]"#),
    ];

    pub const CARRIER: &[SelectorRule] = &[
        SelectorRule::text(r#"[class*="carrier"]"#),
        SelectorRule::attr(r#"img[alt*="logo"]"#, "alt"),
        SelectorRule::attr("img[alt]", "alt"),
        SelectorRule::text(r#"[class*="shipping"]"#),
    ];

    pub const ESTIMATED_DELIVERY: &[SelectorRule] = &[
        SelectorRule::text(r#"[class*="delivery"]"#),
        SelectorRule::text(r#"[class*="arrive"]"#),
        SelectorRule::text(r#"[class*="edd"]"#),
    ];
}

/// Rules for the event timeline.
pub mod events {
    use super::SelectorRule;

    /// Repeating containers, one per history row.
    pub const CONTAINERS: &[&str] = &[
        "ul li",
        "tbody tr",
        r#"[class*="event"]"#,
        r#"[class*="timeline"] > *"#,
        "ol li",
        ".events li",
    ];

    pub const DATE: &[SelectorRule] = &[
        SelectorRule::text(r#"[class*="date"]"#),
        SelectorRule::text("td:nth-child(1)"),
        SelectorRule::text(".date"),
        SelectorRule::text("span:first-child"),
    ];

    pub const DESCRIPTION: &[SelectorRule] = &[
        SelectorRule::text(r#"[class*="desc"]"#),
        SelectorRule::text("td:nth-child(2)"),
        SelectorRule::text(".description"),
        SelectorRule::text("span:nth-child(2)"),
    ];

    pub const LOCATION: &[SelectorRule] = &[
        SelectorRule::text(r#"[class*="location"]"#),
        SelectorRule::text("td:nth-child(3)"),
        SelectorRule::text(".location"),
    ];
}
