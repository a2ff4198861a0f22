use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::{color_variant, error_fragment, merge_user_attrs};

/// A small count-or-status marker. Also registered under the alias `label`.
pub struct Badge;

impl Badge {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Badge)
    }
}

impl ComponentRenderer for Badge {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        if invocation.input().trim().is_empty() {
            return RenderOutput::Markup(error_fragment("badge requires content"));
        }

        let mut attrs = HtmlAttrs::new();
        attrs
            .add_class("badge")
            .add_class(format!("badge-{}", color_variant(invocation)));
        if invocation.attr("pill").truthy() {
            attrs.add_class("badge-pill");
        }
        merge_user_attrs(&mut attrs, invocation);
        attrs.set("id", invocation.id());

        RenderOutput::Markup(html::tag("span", &attrs, invocation.input()))
    }
}
