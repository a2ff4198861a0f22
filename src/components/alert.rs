use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::{color_variant, merge_user_attrs};

const DISMISS_BUTTON: &str = "<button type=\"button\" class=\"close\" data-dismiss=\"alert\" \
aria-label=\"Close\"><span aria-hidden=\"true\">&times;</span></button>";

/// A contextual message box. Dismissible alerts get a close button and the
/// matching class; `fade` animates the dismissal.
pub struct Alert;

impl Alert {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Alert)
    }
}

impl ComponentRenderer for Alert {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let mut attrs = HtmlAttrs::new();
        attrs
            .add_class("alert")
            .add_class(format!("alert-{}", color_variant(invocation)));

        let dismissible = invocation.attr("dismissible").truthy();
        if dismissible {
            attrs.add_class("alert-dismissible");
        }
        if invocation.attr("fade").truthy() {
            attrs.add_class("fade").add_class("in");
        }
        merge_user_attrs(&mut attrs, invocation);
        attrs.set("id", invocation.id()).set("role", "alert");

        let mut inner = String::new();
        if dismissible {
            inner.push_str(DISMISS_BUTTON);
        }
        inner.push_str(invocation.input());
        RenderOutput::Markup(html::tag("div", &attrs, &inner))
    }
}
