//! Attribute catalog and per-component attribute validation.
//!
//! Components declare attribute *names*; what a name accepts is fixed by the
//! master catalog here. Validation never fails a dispatch: values that miss
//! an enumerated set degrade to [`AttrValue::Invalid`], unsupplied attributes
//! surface as [`AttrValue::Missing`], and each concrete component decides
//! whether that warrants a visible inline error fragment.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

/// A raw attribute value as supplied by the caller, before validation.
///
/// Bare inline arguments (no `=`) arrive as [`RawValue::Bool`] `(true)`; markup
/// syntaxes cannot express a bare boolean attribute any other way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Str(String),
    Bool(bool),
}

impl RawValue {
    pub fn str(value: impl Into<String>) -> Self {
        RawValue::Str(value.into())
    }
}

/// What an attribute name accepts, per the master catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Any string, including the empty string, accepted verbatim.
    AnyValue,
    /// Boolean-like: empty means true, a negation-set word means false,
    /// anything else passes through unchanged.
    Flag,
    /// Must case-insensitively match one of the allowed strings.
    Enumerated(&'static [&'static str]),
}

/// A validated attribute value.
///
/// `Missing` (declared but unsupplied) and `Invalid` (supplied but rejected)
/// are distinct from `Flag(false)` so downstream code never confuses "the
/// caller turned this off" with "the caller gave us garbage".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Declared by the component but not supplied in the request.
    Missing,
    /// Supplied but rejected by the attribute's enumerated set.
    Invalid,
    /// A boolean-like attribute that was explicitly set or negated.
    Flag(bool),
    /// A concrete string value.
    Text(String),
}

impl AttrValue {
    /// True when the caller supplied a usable value: set flag or any text.
    pub fn is_set(&self) -> bool {
        matches!(self, AttrValue::Flag(true) | AttrValue::Text(_))
    }

    /// The text value, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Non-empty text, if any.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.as_text().filter(|s| !s.is_empty())
    }

    /// True when the attribute should switch behaviour on: a set flag or
    /// non-empty text.
    pub fn truthy(&self) -> bool {
        match self {
            AttrValue::Flag(b) => *b,
            AttrValue::Text(s) => !s.is_empty(),
            AttrValue::Missing | AttrValue::Invalid => false,
        }
    }
}

pub const COLORS: &[&str] = &[
    "default", "primary", "secondary", "success", "danger", "warning", "info", "light", "dark",
];
pub const PLACEMENTS: &[&str] = &["top", "bottom", "left", "right"];
pub const SIZES: &[&str] = &["xs", "sm", "md", "lg"];
pub const TRIGGERS: &[&str] = &["default", "focus", "hover"];

/// Raw values that negate a flag attribute, compared case-insensitively.
const FLAG_NEGATIONS: &[&str] = &["0", "no", "false", "off", "disabled", "ignored"];

/// Looks an attribute name up in the master catalog.
///
/// Returns `None` for names no component may declare; the validator drops
/// them silently at construction time.
pub fn catalog_kind(name: &str) -> Option<AttributeKind> {
    match name {
        "class" | "style" | "id" | "text" | "title" | "header" | "footer" | "link"
        | "help" => Some(AttributeKind::AnyValue),
        "active" | "collapsible" | "disabled" | "dismissible" | "fade" | "nonav" | "pill" => {
            Some(AttributeKind::Flag)
        }
        "color" => Some(AttributeKind::Enumerated(COLORS)),
        "placement" => Some(AttributeKind::Enumerated(PLACEMENTS)),
        "size" => Some(AttributeKind::Enumerated(SIZES)),
        "trigger" => Some(AttributeKind::Enumerated(TRIGGERS)),
        _ => None,
    }
}

/// Validates a raw request attribute map against one component's declared
/// attribute names.
#[derive(Debug, Clone)]
pub struct AttributeValidator {
    /// Declared names with their catalog kinds, in declaration order.
    declared: Vec<(String, AttributeKind)>,
    /// Alias → canonical name, tried in declaration order.
    aliases: Vec<(String, String)>,
    /// Lowercased negation words for flag attributes.
    negations: Vec<String>,
}

impl AttributeValidator {
    /// Builds a validator from a component's declared attribute names and
    /// alias map. Names missing from the master catalog are dropped here;
    /// aliases whose canonical target is not declared are dropped with them.
    pub fn new(declared: &[String], aliases: &BTreeMap<String, String>) -> Self {
        let mut kept: Vec<(String, AttributeKind)> = Vec::with_capacity(declared.len());
        for name in declared {
            if kept.iter().any(|(n, _)| n == name) {
                continue;
            }
            match catalog_kind(name) {
                Some(kind) => kept.push((name.clone(), kind)),
                None => debug!("dropping undeclarable attribute '{}'", name),
            }
        }

        let aliases = aliases
            .iter()
            .filter(|(_, canonical)| kept.iter().any(|(n, _)| n == *canonical))
            .map(|(alias, canonical)| (alias.clone(), canonical.clone()))
            .collect();

        AttributeValidator {
            declared: kept,
            aliases,
            negations: FLAG_NEGATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Extends the flag negation set with one locale-supplied negative word
    /// (e.g. the wiki's localized "no"). The core never consults a message
    /// catalog itself; the host resolves the word and passes it in.
    pub fn with_locale_negation(mut self, word: impl Into<String>) -> Self {
        let word = word.into().to_lowercase();
        if !word.is_empty() && !self.negations.contains(&word) {
            self.negations.push(word);
        }
        self
    }

    /// The declared attribute names this validator will produce entries for.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(|(n, _)| n.as_str())
    }

    /// Validates a raw key→value map.
    ///
    /// Every declared attribute appears in the result under its canonical
    /// name: resolved by direct key match first, then by trying its aliases
    /// in order, else as [`AttrValue::Missing`]. Alias keys never appear in
    /// the output.
    pub fn validate(&self, raw: &HashMap<String, RawValue>) -> HashMap<String, AttrValue> {
        let mut out = HashMap::with_capacity(self.declared.len());
        for (name, kind) in &self.declared {
            let resolved = raw.get(name).or_else(|| {
                self.aliases
                    .iter()
                    .filter(|(_, canonical)| canonical == name)
                    .find_map(|(alias, _)| raw.get(alias))
            });
            let value = match resolved {
                None => AttrValue::Missing,
                Some(raw_value) => self.check(*kind, raw_value),
            };
            out.insert(name.clone(), value);
        }
        out
    }

    fn check(&self, kind: AttributeKind, raw: &RawValue) -> AttrValue {
        match kind {
            AttributeKind::AnyValue => match raw {
                RawValue::Bool(b) => AttrValue::Flag(*b),
                RawValue::Str(s) => AttrValue::Text(s.clone()),
            },
            AttributeKind::Flag => match raw {
                RawValue::Bool(b) => AttrValue::Flag(*b),
                // The empty string means "present": markup cannot spell a
                // bare boolean attribute any other way.
                RawValue::Str(s) if s.is_empty() => AttrValue::Flag(true),
                RawValue::Str(s) if self.negations.contains(&s.to_lowercase()) => {
                    AttrValue::Flag(false)
                }
                RawValue::Str(s) => AttrValue::Text(s.clone()),
            },
            AttributeKind::Enumerated(allowed) => match raw {
                RawValue::Bool(_) => AttrValue::Invalid,
                RawValue::Str(s) => allowed
                    .iter()
                    .find(|a| a.eq_ignore_ascii_case(s))
                    .map(|a| AttrValue::Text(a.to_string()))
                    .unwrap_or(AttrValue::Invalid),
            },
        }
    }
}
