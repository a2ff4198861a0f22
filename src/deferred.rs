//! Deferred content: HTML a component emits at a different point of the
//! final document than where it was invoked.
//!
//! Modal-like components render a small trigger fragment in place and push
//! the actual dialog onto the per-render [`DeferredContentQueue`]; the host
//! drains the queue once when it emits the end of the document body.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::html::HtmlAttrs;

/// Sentinel written immediately before injected deferred content.
pub const DEFERRED_BEGIN: &str = "<!-- BEGIN deferred -->";
/// Sentinel written immediately after injected deferred content.
pub const DEFERRED_END: &str = "<!-- END deferred -->";

/// One scheduled block of already-safe HTML.
///
/// The id is carried for logging; draining is plain ordered concatenation,
/// never an id-based replace or merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredEntry {
    pub id: String,
    pub html: String,
}

/// An append/drain buffer of deferred HTML blocks, scoped to one render.
#[derive(Debug, Default)]
pub struct DeferredContentQueue {
    entries: Vec<DeferredEntry>,
}

impl DeferredContentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block. Insertion order is preserved on drain.
    pub fn enqueue(&mut self, id: impl Into<String>, html: impl Into<String>) {
        let entry = DeferredEntry {
            id: id.into(),
            html: html.into(),
        };
        debug!("deferring content for '{}' ({} bytes)", entry.id, entry.html.len());
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Concatenates all entries in insertion order, wrapped in the fixed
    /// sentinel markers, and clears the buffer.
    ///
    /// An empty buffer yields the empty string, so calling this repeatedly
    /// is safe: the second of two back-to-back drains always returns `""`.
    pub fn drain_and_clear(&mut self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        debug!("draining {} deferred block(s)", self.entries.len());
        let mut out = String::from(DEFERRED_BEGIN);
        for entry in self.entries.drain(..) {
            out.push_str(&entry.html);
        }
        out.push_str(DEFERRED_END);
        out
    }
}

fn toggle_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"data-toggle\s*=\s*"[^"]+""#).unwrap())
}

/// Assembles the structured HTML block that is the typical payload of
/// [`DeferredContentQueue::enqueue`]: an outer wrapper with optional header,
/// a body, and an optional footer, each carrying its own mergeable
/// class/style attribute set.
#[derive(Debug, Clone)]
pub struct DeferredBlockBuilder {
    id: String,
    /// The `data-toggle` kind a trigger must carry to activate this block.
    toggle: String,
    outer_attrs: HtmlAttrs,
    header_attrs: HtmlAttrs,
    body_attrs: HtmlAttrs,
    footer_attrs: HtmlAttrs,
    header: Option<String>,
    body: String,
    footer: Option<String>,
}

impl DeferredBlockBuilder {
    pub fn new(id: impl Into<String>, toggle: impl Into<String>) -> Self {
        DeferredBlockBuilder {
            id: id.into(),
            toggle: toggle.into(),
            outer_attrs: HtmlAttrs::new(),
            header_attrs: HtmlAttrs::new(),
            body_attrs: HtmlAttrs::new(),
            footer_attrs: HtmlAttrs::new(),
            header: None,
            body: String::new(),
            footer: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(mut self, html: impl Into<String>) -> Self {
        self.header = Some(html.into());
        self
    }

    pub fn body(mut self, html: impl Into<String>) -> Self {
        self.body = html.into();
        self
    }

    pub fn footer(mut self, html: impl Into<String>) -> Self {
        self.footer = Some(html.into());
        self
    }

    pub fn outer_attrs(&mut self) -> &mut HtmlAttrs {
        &mut self.outer_attrs
    }

    pub fn header_attrs(&mut self) -> &mut HtmlAttrs {
        &mut self.header_attrs
    }

    pub fn body_attrs(&mut self) -> &mut HtmlAttrs {
        &mut self.body_attrs
    }

    pub fn footer_attrs(&mut self) -> &mut HtmlAttrs {
        &mut self.footer_attrs
    }

    /// True when `fragment` already carries the markers needed to activate
    /// this block: some `data-toggle="…"` plus a `data-target` pointing at
    /// this block's id.
    pub fn is_activating_trigger(&self, fragment: &str) -> bool {
        if !toggle_marker_re().is_match(fragment) {
            return false;
        }
        let target =
            Regex::new(&format!(r##"data-target\s*=\s*"#{}""##, regex::escape(&self.id)));
        match target {
            Ok(re) => re.is_match(fragment),
            Err(_) => false,
        }
    }

    /// Returns `fragment` unchanged when it can already activate this block,
    /// otherwise wraps it in a span carrying the activation markers.
    pub fn wrap_trigger(&self, fragment: &str) -> String {
        if self.is_activating_trigger(fragment) {
            return fragment.to_string();
        }
        let mut attrs = HtmlAttrs::new();
        attrs
            .add_class("shortcode-trigger")
            .set("data-toggle", self.toggle.clone())
            .set("data-target", format!("#{}", self.id));
        crate::html::tag("span", &attrs, fragment)
    }

    /// Renders the assembled block.
    pub fn build(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("<div id=\"{}\"{}>", self.id, self.outer_attrs.render()));
        if let Some(ref header) = self.header {
            out.push_str(&format!("<div{}>{}</div>", self.header_attrs.render(), header));
        }
        out.push_str(&format!("<div{}>{}</div>", self.body_attrs.render(), self.body));
        if let Some(ref footer) = self.footer {
            out.push_str(&format!("<div{}>{}</div>", self.footer_attrs.render(), footer));
        }
        out.push_str("</div>");
        out
    }
}
