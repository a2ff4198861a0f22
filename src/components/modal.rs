use crate::deferred::DeferredBlockBuilder;
use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};

use super::error_fragment;

const CLOSE_BUTTON: &str = "<button type=\"button\" class=\"close\" data-dismiss=\"modal\" \
aria-label=\"Close\"><span aria-hidden=\"true\">&times;</span></button>";

/// A dialog rendered away from its invocation site.
///
/// The dialog body goes onto the render's deferred queue (the host injects
/// it at end-of-body); only the trigger fragment is returned in place, as
/// final HTML so the host never re-expands it.
pub struct Modal;

impl Modal {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Modal)
    }
}

impl ComponentRenderer for Modal {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let Some(trigger_text) = invocation.attr("text").non_empty_text() else {
            return RenderOutput::Markup(error_fragment("modal requires trigger text"));
        };

        let mut builder = DeferredBlockBuilder::new(invocation.id(), "modal");
        builder
            .outer_attrs()
            .add_class("modal");
        if invocation.attr("fade").truthy() {
            builder.outer_attrs().add_class("fade");
        }
        if let Some(size) = invocation.attr("size").non_empty_text() {
            builder.outer_attrs().add_class(format!("modal-{}", size));
        }
        if let Some(classes) = invocation.attr("class").non_empty_text() {
            for token in classes.split_whitespace() {
                builder.outer_attrs().add_class(token);
            }
        }
        if let Some(style) = invocation.attr("style").non_empty_text() {
            builder.outer_attrs().add_style(style);
        }
        builder
            .outer_attrs()
            .set("role", "dialog")
            .set("aria-hidden", "true");
        builder.header_attrs().add_class("modal-header");
        builder.body_attrs().add_class("modal-body");
        builder.footer_attrs().add_class("modal-footer");

        let header = match invocation.attr("header").non_empty_text() {
            Some(header) => format!("<span class=\"modal-title\">{}</span>{}", header, CLOSE_BUTTON),
            None => CLOSE_BUTTON.to_string(),
        };
        builder = builder.header(header).body(invocation.input().to_string());
        if let Some(footer) = invocation.attr("footer").non_empty_text() {
            builder = builder.footer(footer.to_string());
        }

        let trigger = builder.wrap_trigger(trigger_text);
        invocation
            .context()
            .deferred()
            .enqueue(invocation.id(), builder.build());
        RenderOutput::FinalHtml(trigger)
    }
}
