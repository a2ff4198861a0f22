use crate::dispatch::{ComponentRenderer, Invocation, RenderOutput};
use crate::html::HtmlAttrs;

use super::{error_fragment, merge_user_attrs};

/// A slideshow over the non-empty lines of its input, each line being one
/// already-expanded slide fragment. Output is final HTML: the slides must
/// not go through markup expansion a second time.
pub struct Carousel;

impl Carousel {
    pub fn boxed() -> Box<dyn ComponentRenderer> {
        Box::new(Carousel)
    }
}

impl ComponentRenderer for Carousel {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput {
        let slides: Vec<&str> = invocation
            .input()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if slides.is_empty() {
            return RenderOutput::Markup(error_fragment("carousel requires at least one slide"));
        }

        let id = invocation.id();
        let mut attrs = HtmlAttrs::new();
        attrs.add_class("carousel").add_class("slide");
        if invocation.attr("fade").truthy() {
            attrs.add_class("carousel-fade");
        }
        merge_user_attrs(&mut attrs, invocation);
        attrs.set("id", id).set("data-ride", "carousel");

        let nonav = invocation.attr("nonav").truthy();

        let mut inner = String::new();
        if !nonav {
            inner.push_str("<ol class=\"carousel-indicators\">");
            for index in 0..slides.len() {
                let active = if index == 0 { " class=\"active\"" } else { "" };
                inner.push_str(&format!(
                    "<li data-target=\"#{}\" data-slide-to=\"{}\"{}></li>",
                    id, index, active
                ));
            }
            inner.push_str("</ol>");
        }

        inner.push_str("<div class=\"carousel-inner\">");
        for (index, slide) in slides.iter().enumerate() {
            let class = if index == 0 {
                "carousel-item active"
            } else {
                "carousel-item"
            };
            inner.push_str(&format!("<div class=\"{}\">{}</div>", class, slide));
        }
        inner.push_str("</div>");

        if !nonav {
            inner.push_str(&format!(
                "<a class=\"carousel-control-prev\" href=\"#{0}\" data-slide=\"prev\">\
                 <span class=\"carousel-control-prev-icon\"></span></a>\
                 <a class=\"carousel-control-next\" href=\"#{0}\" data-slide=\"next\">\
                 <span class=\"carousel-control-next-icon\"></span></a>",
                id
            ));
        }

        RenderOutput::FinalHtml(format!("<div{}>{}</div>", attrs.render(), inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttrValue;
    use crate::components::testutil::render_with;

    #[test]
    fn test_first_slide_is_active() {
        let output = render_with(
            &Carousel,
            vec![],
            "sc_carousel_0",
            "<img src=\"a.png\">\n<img src=\"b.png\">\n",
            None,
        );
        assert!(output.is_final());
        assert!(output
            .text()
            .contains("<div class=\"carousel-item active\"><img src=\"a.png\"></div>"));
        assert!(output
            .text()
            .contains("<div class=\"carousel-item\"><img src=\"b.png\"></div>"));
        assert!(output.text().contains("carousel-indicators"));
    }

    #[test]
    fn test_nonav_drops_indicators_and_controls() {
        let output = render_with(
            &Carousel,
            vec![("nonav", AttrValue::Flag(true))],
            "sc_carousel_0",
            "<img src=\"a.png\">",
            None,
        );
        assert!(!output.text().contains("carousel-indicators"));
        assert!(!output.text().contains("carousel-control-prev"));
    }

    #[test]
    fn test_empty_carousel_is_an_error() {
        let output = render_with(&Carousel, vec![], "c", "  \n ", None);
        assert!(output.text().contains("class=\"error\""));
        assert!(!output.is_final());
    }
}
