use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::{self, HtmlAttrs};

use super::{error_fragment, merge_user_attrs};

/// An icon glyph named by the input text.
pub struct Icon;

impl Icon {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Icon)
    }
}

impl ComponentRenderer for Icon {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let name = invocation.input().trim();
        if name.is_empty() {
            return RenderOutput::Markup(error_fragment("icon requires a glyph name"));
        }
        let mut attrs = HtmlAttrs::new();
        attrs.add_class("icon").add_class(format!("icon-{}", name));
        merge_user_attrs(&mut attrs, invocation);
        attrs.set("aria-hidden", "true");
        RenderOutput::Markup(html::tag("span", &attrs, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testutil::render_with;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_icon() {
        let output = render_with(&Icon, vec![], "sc_icon_0", " search ", None);
        assert_eq!(
            output.text(),
            "<span class=\"icon icon-search\" aria-hidden=\"true\"></span>"
        );
    }

    #[test]
    fn test_icon_without_name_is_an_error() {
        let output = render_with(&Icon, vec![], "sc_icon_0", "", None);
        assert_eq!(output.text(), "<span class=\"error\">icon requires a glyph name</span>");
    }
}
