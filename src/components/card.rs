use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::HtmlAttrs;

use super::{color_variant, merge_user_attrs};

/// A bordered content box with optional header and footer. Also registered
/// under the alias `panel`.
///
/// Inside an accordion the card renders its body as a collapse pane linked
/// to the enclosing accordion frame, which is the one place the engine's
/// parent-frame lookup is load-bearing for markup structure.
pub struct Card;

impl Card {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Card)
    }
}

impl Card {
    fn collapse_pane(&self, invocation: &Invocation<'_>, data_parent: Option<&str>) -> String {
        let pane_id = format!("{}_collapse", invocation.id());
        let header = invocation.attr("header").non_empty_text().unwrap_or("");

        let mut toggle = HtmlAttrs::new();
        toggle
            .set("data-toggle", "collapse")
            .set("href", format!("#{}", pane_id));
        if let Some(parent_id) = data_parent {
            toggle.set("data-parent", format!("#{}", parent_id));
        }

        let mut pane = HtmlAttrs::new();
        pane.add_class("card-collapse").add_class("collapse");
        if invocation.attr("active").truthy() {
            pane.add_class("in");
        }
        pane.set("id", pane_id);

        format!(
            "<div class=\"card-header\"><a{}>{}</a></div>\
             <div{}><div class=\"card-body\">{}</div>{}</div>",
            toggle.render(),
            header,
            pane.render(),
            invocation.input(),
            self.footer(invocation),
        )
    }

    fn footer(&self, invocation: &Invocation<'_>) -> String {
        match invocation.attr("footer").non_empty_text() {
            Some(footer) => format!("<div class=\"card-footer\">{}</div>", footer),
            None => String::new(),
        }
    }
}

impl ComponentRenderer for Card {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let mut attrs = HtmlAttrs::new();
        attrs
            .add_class("card")
            .add_class(format!("card-{}", color_variant(invocation)));
        merge_user_attrs(&mut attrs, invocation);
        attrs.set("id", invocation.id());

        let in_accordion = invocation
            .parent()
            .is_some_and(|parent| parent.component() == "accordion");

        let inner = if in_accordion {
            let parent_id = invocation.parent().map(|parent| parent.id().to_string());
            self.collapse_pane(invocation, parent_id.as_deref())
        } else if invocation.attr("collapsible").truthy() {
            self.collapse_pane(invocation, None)
        } else {
            let header = match invocation.attr("header").non_empty_text() {
                Some(header) => format!("<div class=\"card-header\">{}</div>", header),
                None => String::new(),
            };
            format!(
                "{}<div class=\"card-body\">{}</div>{}",
                header,
                invocation.input(),
                self.footer(invocation)
            )
        };

        RenderOutput::Markup(format!("<div{}>{}</div>", attrs.render(), inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::components::testutil::render_with;
    use crate::dispatch::ParentRef;

    #[test]
    fn test_plain_card() {
        let output = render_with(
            &Card,
            vec![("header", AttrValue::Text("Title".to_string()))],
            "sc_card_0",
            "body",
            None,
        );
        assert!(output.text().contains("<div class=\"card-header\">Title</div>"));
        assert!(output.text().contains("<div class=\"card-body\">body</div>"));
        assert!(!output.text().contains("data-toggle"));
    }

    #[test]
    fn test_card_inside_accordion_links_to_parent() {
        let output = render_with(
            &Card,
            vec![("header", AttrValue::Text("Section".to_string()))],
            "sc_card_0",
            "body",
            Some(ParentRef::new("accordion", "sc_accordion_0")),
        );
        assert!(output.text().contains("data-toggle=\"collapse\""));
        assert!(output.text().contains("data-parent=\"#sc_accordion_0\""));
        assert!(output.text().contains("href=\"#sc_card_0_collapse\""));
    }

    #[test]
    fn test_card_inside_other_component_stays_plain() {
        let output = render_with(
            &Card,
            vec![],
            "sc_card_0",
            "body",
            Some(ParentRef::new("jumbotron", "sc_jumbotron_0")),
        );
        assert!(!output.text().contains("data-parent"));
    }

    #[test]
    fn test_standalone_collapsible_card() {
        let output = render_with(
            &Card,
            vec![
                ("collapsible", AttrValue::Flag(true)),
                ("active", AttrValue::Flag(true)),
            ],
            "sc_card_0",
            "body",
            None,
        );
        assert!(output.text().contains("data-toggle=\"collapse\""));
        assert!(!output.text().contains("data-parent"));
        assert!(output.text().contains("collapse in"));
    }
}
