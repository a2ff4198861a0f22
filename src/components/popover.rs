use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::{color_variant, error_fragment, merge_user_attrs};

/// A click-to-open bubble whose content travels inside a data attribute.
/// Final HTML by necessity: the escaped content must not be re-parsed.
pub struct Popover;

impl Popover {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Popover)
    }
}

impl ComponentRenderer for Popover {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let Some(label) = invocation.attr("text").non_empty_text() else {
            return RenderOutput::Markup(error_fragment("popover requires trigger text"));
        };
        let Some(header) = invocation.attr("header").non_empty_text() else {
            return RenderOutput::Markup(error_fragment("popover requires a header"));
        };

        let mut attrs = HtmlAttrs::new();
        attrs
            .add_class("btn")
            .add_class(format!("btn-{}", color_variant(invocation)));
        if let Some(size) = invocation.attr("size").non_empty_text() {
            attrs.add_class(format!("btn-{}", size));
        }
        merge_user_attrs(&mut attrs, invocation);
        attrs
            .set("id", invocation.id())
            .set("type", "button")
            .set("data-toggle", "popover")
            .set("title", header)
            .set("data-content", invocation.input());
        if let Some(placement) = invocation.attr("placement").non_empty_text() {
            attrs.set("data-placement", placement);
        }
        if let Some(trigger) = invocation.attr("trigger").non_empty_text() {
            if trigger != "default" {
                attrs.set("data-trigger", trigger);
            }
        }

        RenderOutput::FinalHtml(html::tag("button", &attrs, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::components::testutil::render_with;

    #[test]
    fn test_popover_escapes_content() {
        let output = render_with(
            &Popover,
            vec![
                ("text", AttrValue::Text("Why?".to_string())),
                ("header", AttrValue::Text("Reason".to_string())),
            ],
            "sc_popover_0",
            "<b>because</b>",
            None,
        );
        assert!(output.is_final());
        assert!(output
            .text()
            .contains("data-content=\"&lt;b&gt;because&lt;/b&gt;\""));
        assert!(output.text().contains("title=\"Reason\""));
    }

    #[test]
    fn test_popover_title_escapes_once() {
        let output = render_with(
            &Popover,
            vec![
                ("text", AttrValue::Text("Why?".to_string())),
                ("header", AttrValue::Text("R&D".to_string())),
            ],
            "sc_popover_0",
            "<b>x</b>",
            None,
        );
        assert!(output.text().contains("title=\"R&amp;D\""));
        assert!(output.text().contains("data-content=\"&lt;b&gt;x&lt;/b&gt;\""));
        assert!(!output.text().contains("&amp;amp;"));
        assert!(!output.text().contains("&amp;lt;"));
    }

    #[test]
    fn test_popover_requires_header() {
        let output = render_with(
            &Popover,
            vec![("text", AttrValue::Text("Why?".to_string()))],
            "p",
            "body",
            None,
        );
        assert!(output.text().contains("popover requires a header"));
    }
}
