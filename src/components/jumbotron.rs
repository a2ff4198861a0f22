use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::merge_user_attrs;

/// A full-width callout wrapper.
pub struct Jumbotron;

impl Jumbotron {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Jumbotron)
    }
}

impl ComponentRenderer for Jumbotron {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let mut attrs = HtmlAttrs::new();
        attrs.add_class("jumbotron");
        merge_user_attrs(&mut attrs, invocation);
        attrs.set("id", invocation.id());
        RenderOutput::Markup(html::tag("div", &attrs, invocation.input()))
    }
}
