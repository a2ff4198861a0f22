use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::merge_user_attrs;

/// An inset content box; `size` picks the padding variant.
pub struct Well;

impl Well {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Well)
    }
}

impl ComponentRenderer for Well {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let mut attrs = HtmlAttrs::new();
        attrs.add_class("well");
        if let Some(size) = invocation.attr("size").non_empty_text() {
            attrs.add_class(format!("well-{}", size));
        }
        merge_user_attrs(&mut attrs, invocation);
        attrs.set("id", invocation.id());
        RenderOutput::Markup(html::tag("div", &attrs, invocation.input()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::components::testutil::render_with;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_well_with_size() {
        let output = render_with(
            &Well,
            vec![("size", AttrValue::Text("lg".to_string()))],
            "sc_well_0",
            "content",
            None,
        );
        assert_eq!(
            output.text(),
            "<div class=\"well well-lg\" id=\"sc_well_0\">content</div>"
        );
    }

    #[test]
    fn test_invalid_size_is_ignored() {
        let output = render_with(&Well, vec![("size", AttrValue::Invalid)], "w", "x", None);
        assert_eq!(output.text(), "<div class=\"well\" id=\"w\">x</div>");
    }
}
