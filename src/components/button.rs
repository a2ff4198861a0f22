use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::{color_variant, error_fragment, merge_user_attrs};

/// A styled link that looks like a button. The rendered anchor is final
/// HTML; its attribute values must survive untouched by markup expansion.
pub struct Button;

impl Button {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Button)
    }
}

impl ComponentRenderer for Button {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let Some(link) = invocation.attr("link").non_empty_text() else {
            return RenderOutput::Markup(error_fragment("button requires a link"));
        };

        let mut attrs = HtmlAttrs::new();
        attrs
            .add_class("btn")
            .add_class(format!("btn-{}", color_variant(invocation)));
        if let Some(size) = invocation.attr("size").non_empty_text() {
            attrs.add_class(format!("btn-{}", size));
        }
        if invocation.attr("active").truthy() {
            attrs.add_class("active");
        }
        if invocation.attr("disabled").truthy() {
            attrs.add_class("disabled");
        }
        merge_user_attrs(&mut attrs, invocation);
        attrs
            .set("id", invocation.id())
            .set("href", link)
            .set("role", "button");

        let label = invocation
            .attr("text")
            .non_empty_text()
            .map(str::to_string)
            .unwrap_or_else(|| {
                if invocation.input().is_empty() {
                    link.to_string()
                } else {
                    invocation.input().to_string()
                }
            });

        RenderOutput::FinalHtml(html::tag("a", &attrs, &label))
    }
}
