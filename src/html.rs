//! Small HTML assembly helpers shared by the concrete components.
//!
//! The engine does not escape component body text (nested markup expansion is
//! the host's job); the only escaping performed anywhere is [`escape_attr`],
//! applied to values that end up inside double-quoted attribute positions.

/// Escapes a string for use inside a double-quoted HTML attribute value.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An accumulating set of HTML attributes with independently mergeable
/// `class` and `style` lists.
///
/// Components build their own classes first, then merge whatever the caller
/// supplied via the `class`/`style` attributes, so user additions never
/// replace the component's structural classes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlAttrs {
    classes: Vec<String>,
    styles: Vec<String>,
    extra: Vec<(String, String)>,
}

impl HtmlAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a class token; empty or duplicate tokens are dropped.
    pub fn add_class(&mut self, class: impl Into<String>) -> &mut Self {
        let class = class.into();
        let class = class.trim();
        if !class.is_empty() && !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    /// Appends a `property: value` style declaration (or any raw fragment).
    pub fn add_style(&mut self, style: impl Into<String>) -> &mut Self {
        let style = style.into();
        let style = style.trim().trim_end_matches(';').to_string();
        if !style.is_empty() {
            self.styles.push(style);
        }
        self
    }

    /// Sets a plain attribute. Later calls with the same name win.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.extra.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.extra.push((name, value));
        }
        self
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.styles.is_empty() && self.extra.is_empty()
    }

    /// Renders the attribute list with a leading space, ready to be placed
    /// directly after a tag name. Empty sets render as the empty string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_attr(&self.classes.join(" "))));
        }
        if !self.styles.is_empty() {
            out.push_str(&format!(" style=\"{}\"", escape_attr(&self.styles.join("; "))));
        }
        for (name, value) in &self.extra {
            out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
        }
        out
    }
}

/// Wraps `inner` in `tag`, rendering `attrs` after the tag name.
pub fn tag(tag: &str, attrs: &HtmlAttrs, inner: &str) -> String {
    format!("<{0}{1}>{2}</{0}>", tag, attrs.render(), inner)
}
