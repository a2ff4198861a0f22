use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::merge_user_attrs;

/// A group of collapsible cards. The accordion itself is a plain wrapper;
/// the interesting part happens in the cards, which discover this frame as
/// their parent and link their collapse panes to its id.
pub struct Accordion;

impl Accordion {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Accordion)
    }
}

impl ComponentRenderer for Accordion {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let mut attrs = HtmlAttrs::new();
        attrs.add_class("accordion");
        merge_user_attrs(&mut attrs, invocation);
        attrs.set("id", invocation.id());
        RenderOutput::Markup(html::tag("div", &attrs, invocation.input()))
    }
}
