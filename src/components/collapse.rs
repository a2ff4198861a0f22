use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::HtmlAttrs;

use super::{color_variant, merge_user_attrs};

/// Hides its content behind a generated toggle button.
pub struct Collapse;

impl Collapse {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Collapse)
    }
}

impl ComponentRenderer for Collapse {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let label = invocation.attr("text").non_empty_text().unwrap_or("Toggle");

        let mut toggle = HtmlAttrs::new();
        toggle
            .add_class("btn")
            .add_class(format!("btn-{}", color_variant(invocation)));
        if let Some(size) = invocation.attr("size").non_empty_text() {
            toggle.add_class(format!("btn-{}", size));
        }
        toggle
            .set("type", "button")
            .set("data-toggle", "collapse")
            .set("data-target", format!("#{}", invocation.id()));

        let mut pane = HtmlAttrs::new();
        pane.add_class("collapse");
        merge_user_attrs(&mut pane, invocation);
        pane.set("id", invocation.id());

        RenderOutput::Markup(format!(
            "<button{}>{}</button><div{}>{}</div>",
            toggle.render(),
            label,
            pane.render(),
            invocation.input()
        ))
    }
}
