//! The concrete component renderers and their registration data.
//!
//! Everything here is template-filling glue over the validated data the
//! dispatch core produces. The constructor table ([`constructor_for`]) is the
//! only place an implementation-binding string is turned into code, so
//! construction stays statically checkable.

pub mod accordion;
pub mod alert;
pub mod badge;
pub mod button;
pub mod card;
pub mod carousel;
pub mod collapse;
pub mod icon;
pub mod jumbotron;
pub mod modal;
pub mod popover;
pub mod tooltip;
pub mod well;

use std::collections::BTreeMap;

use crate::dispatch::{ComponentCtor, Invocation};
use crate::html::HtmlAttrs;
use crate::registry::{DefinitionEntry, DefinitionSpec, HandlerStyle, ModuleBundle};

/// Resolves an implementation-binding string to its constructor.
pub fn constructor_for(implementation: &str) -> Option<ComponentCtor> {
    let ctor: ComponentCtor = match implementation {
        "accordion" => accordion::Accordion::boxed,
        "alert" => alert::Alert::boxed,
        "badge" => badge::Badge::boxed,
        "button" => button::Button::boxed,
        "card" => card::Card::boxed,
        "carousel" => carousel::Carousel::boxed,
        "collapse" => collapse::Collapse::boxed,
        "icon" => icon::Icon::boxed,
        "jumbotron" => jumbotron::Jumbotron::boxed,
        "modal" => modal::Modal::boxed,
        "popover" => popover::Popover::boxed,
        "tooltip" => tooltip::Tooltip::boxed,
        "well" => well::Well::boxed,
        _ => return None,
    };
    Some(ctor)
}

fn definition(
    implementation: &str,
    handler_style: HandlerStyle,
    attributes: &[&str],
    aliases: &[(&str, &str)],
) -> DefinitionEntry {
    DefinitionEntry::Definition(DefinitionSpec {
        implementation: implementation.to_string(),
        handler_style,
        attributes: attributes.iter().map(|s| s.to_string()).collect(),
        aliases: aliases
            .iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect(),
        modules: ModuleBundle {
            default: vec![format!("shortcodes.{}", implementation)],
            skins: BTreeMap::new(),
        },
    })
}

/// The built-in component definition source.
pub fn builtin_definitions() -> BTreeMap<String, DefinitionEntry> {
    use HandlerStyle::{Block, Inline};

    let mut source = BTreeMap::new();
    source.insert(
        "accordion".to_string(),
        definition("accordion", Block, &["class", "style", "id"], &[]),
    );
    source.insert(
        "alert".to_string(),
        definition(
            "alert",
            Block,
            &["class", "style", "id", "color", "dismissible", "fade"],
            &[("colour", "color")],
        ),
    );
    source.insert(
        "badge".to_string(),
        definition(
            "badge",
            Inline,
            &["class", "style", "id", "color", "pill"],
            &[("colour", "color")],
        ),
    );
    source.insert(
        "button".to_string(),
        definition(
            "button",
            Inline,
            &[
                "class", "style", "id", "color", "size", "link", "text", "active", "disabled",
            ],
            &[("href", "link")],
        ),
    );
    source.insert(
        "card".to_string(),
        definition(
            "card",
            Block,
            &[
                "class",
                "style",
                "id",
                "color",
                "header",
                "footer",
                "collapsible",
                "active",
            ],
            &[("heading", "header"), ("footing", "footer")],
        ),
    );
    source.insert(
        "carousel".to_string(),
        definition("carousel", Inline, &["class", "style", "id", "fade", "nonav"], &[]),
    );
    source.insert(
        "collapse".to_string(),
        definition(
            "collapse",
            Block,
            &["class", "style", "id", "color", "size", "text"],
            &[],
        ),
    );
    source.insert(
        "icon".to_string(),
        definition("icon", Inline, &["class", "style", "id"], &[]),
    );
    source.insert(
        "jumbotron".to_string(),
        definition("jumbotron", Block, &["class", "style", "id"], &[]),
    );

    let mut modal = DefinitionSpec {
        implementation: "modal".to_string(),
        handler_style: Block,
        attributes: ["class", "style", "id", "size", "text", "header", "footer", "fade"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        aliases: BTreeMap::new(),
        modules: ModuleBundle {
            default: vec!["shortcodes.modal".to_string()],
            skins: BTreeMap::new(),
        },
    };
    modal
        .aliases
        .insert("heading".to_string(), "header".to_string());
    modal
        .modules
        .skins
        .insert("vector".to_string(), vec!["shortcodes.modal.vector".to_string()]);
    source.insert("modal".to_string(), DefinitionEntry::Definition(modal));

    source.insert(
        "popover".to_string(),
        definition(
            "popover",
            Block,
            &[
                "class", "style", "id", "color", "size", "header", "text", "placement",
                "trigger",
            ],
            &[("heading", "header")],
        ),
    );
    source.insert(
        "tooltip".to_string(),
        definition(
            "tooltip",
            Inline,
            &["class", "style", "id", "text", "placement"],
            &[],
        ),
    );
    source.insert(
        "well".to_string(),
        definition("well", Block, &["class", "style", "id", "size"], &[]),
    );

    // Component-level aliases: same definition object, different name.
    source.insert("panel".to_string(), DefinitionEntry::Alias("card".to_string()));
    source.insert("label".to_string(), DefinitionEntry::Alias("badge".to_string()));

    source
}

/// A visible inline error fragment, the recovery path for attribute-level
/// problems (a malformed component never aborts the surrounding render).
pub(crate) fn error_fragment(message: &str) -> String {
    format!("<span class=\"error\">{}</span>", message)
}

/// Merges the caller's `class` and `style` attribute values into a
/// component's own attribute set.
pub(crate) fn merge_user_attrs(attrs: &mut HtmlAttrs, invocation: &Invocation<'_>) {
    if let Some(classes) = invocation.attr("class").non_empty_text() {
        for token in classes.split_whitespace() {
            attrs.add_class(token);
        }
    }
    if let Some(style) = invocation.attr("style").non_empty_text() {
        attrs.add_style(style);
    }
}

/// The validated `color` variant, or `default` when the attribute is
/// missing, negated, or failed validation.
pub(crate) fn color_variant<'a>(invocation: &'a Invocation<'_>) -> &'a str {
    invocation.attr("color").non_empty_text().unwrap_or("default")
}
