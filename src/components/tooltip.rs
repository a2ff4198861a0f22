use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::{error_fragment, merge_user_attrs};

/// Wraps its input in a span carrying a hover tooltip; the tooltip text
/// comes from the `text` attribute.
pub struct Tooltip;

impl Tooltip {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Tooltip)
    }
}

impl ComponentRenderer for Tooltip {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let Some(text) = invocation.attr("text").non_empty_text() else {
            return RenderOutput::Markup(error_fragment("tooltip requires text"));
        };

        let mut attrs = HtmlAttrs::new();
        merge_user_attrs(&mut attrs, invocation);
        attrs
            .set("id", invocation.id())
            .set("data-toggle", "tooltip")
            .set("title", text);
        if let Some(placement) = invocation.attr("placement").non_empty_text() {
            attrs.set("data-placement", placement);
        }
        RenderOutput::Markup(html::tag("span", &attrs, invocation.input()))
    }
}
