use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use pretty_assertions::assert_eq;

use shortcodes::{
    dispatch_component, CanonicalRequest, ComponentDispatcher, ComponentRegistry, ContentFrame,
    EngineError, InlineArg, MarkupExpander, PassthroughExpander, RawValue, RenderContext,
    Whitelist, DEFERRED_BEGIN, DEFERRED_END,
};

fn registry() -> Rc<ComponentRegistry> {
    Rc::new(ComponentRegistry::with_builtins().unwrap())
}

fn context() -> Rc<RenderContext> {
    Rc::new(RenderContext::new(Box::new(PassthroughExpander)))
}

fn raw_attrs(pairs: &[(&str, &str)]) -> HashMap<String, RawValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), RawValue::str(*v)))
        .collect()
}

fn block_request(
    input: &str,
    attrs: &[(&str, &str)],
    context: &Rc<RenderContext>,
) -> CanonicalRequest {
    CanonicalRequest::from_block(input, raw_attrs(attrs), Rc::clone(context), ContentFrame::new())
}

// ─── Dispatch lifecycle ──────────────────────────────────────────────────────

#[test]
fn test_alert_end_to_end() {
    let registry = registry();
    let context = context();
    let request = block_request("Check your settings.", &[("color", "warning")], &context);

    let output = dispatch_component(&registry, "alert", &request).unwrap();
    assert_eq!(
        output.text(),
        "<div class=\"alert alert-warning\" id=\"sc_alert_0\" role=\"alert\">\
         Check your settings.</div>"
    );
    assert!(!output.is_final());

    // Uniform side effects ran: active set and asset modules attached.
    assert_eq!(context.assets_ref().active_components(), vec!["alert"]);
    assert_eq!(
        context.assets_ref().loaded_modules(),
        &["shortcodes.base".to_string(), "shortcodes.alert".to_string()]
    );

    // The stack is balanced again after the dispatch.
    assert!(context.stack_ref().current_frame().is_none());
}

#[test]
fn test_explicit_id_is_used_verbatim() {
    let registry = registry();
    let context = context();
    let request = block_request("x", &[("id", "my-alert")], &context);
    let output = dispatch_component(&registry, "alert", &request).unwrap();
    assert!(output.text().contains("id=\"my-alert\""));
}

#[test]
fn test_generated_ids_are_per_component_and_increasing() {
    let registry = registry();
    let context = context();

    let first = dispatch_component(&registry, "alert", &block_request("a", &[], &context));
    let well = dispatch_component(&registry, "well", &block_request("w", &[], &context));
    let second = dispatch_component(&registry, "alert", &block_request("b", &[], &context));

    assert!(first.unwrap().text().contains("id=\"sc_alert_0\""));
    assert!(well.unwrap().text().contains("id=\"sc_well_0\""));
    assert!(second.unwrap().text().contains("id=\"sc_alert_1\""));
}

#[test]
fn test_renders_are_isolated_per_context() {
    let registry = registry();
    let first_render = context();
    let second_render = context();

    dispatch_component(&registry, "alert", &block_request("a", &[], &first_render)).unwrap();
    let output =
        dispatch_component(&registry, "alert", &block_request("b", &[], &second_render)).unwrap();

    // A fresh render starts its counters over; the registry is shared.
    assert!(output.text().contains("id=\"sc_alert_0\""));
}

#[test]
fn test_inline_invocation_of_button() {
    let registry = registry();
    let context = context();
    let request = CanonicalRequest::from_inline(vec![
        InlineArg::Context(Rc::clone(&context)),
        InlineArg::text("Go home"),
        InlineArg::text("link=/wiki/Main"),
        InlineArg::text("color=primary"),
        InlineArg::text("active"),
    ])
    .unwrap();

    let output = dispatch_component(&registry, "button", &request).unwrap();
    assert!(output.is_final());
    assert!(output.text().contains("btn-primary"));
    assert!(output.text().contains("active"));
    assert!(output.text().contains("href=\"/wiki/Main\""));
    assert!(output.text().contains(">Go home</a>"));
}

#[test]
fn test_handler_style_contract_is_enforced() {
    let registry = registry();
    let context = context();

    // Block component without a content frame.
    let inline_shaped =
        CanonicalRequest::from_inline(vec![InlineArg::Context(Rc::clone(&context))]).unwrap();
    let err = dispatch_component(&registry, "alert", &inline_shaped).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRequest { .. }));

    // Inline component with a content frame.
    let block_shaped = block_request("search", &[], &context);
    let err = dispatch_component(&registry, "icon", &block_shaped).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRequest { .. }));

    // A failed contract check leaves no frame behind.
    assert!(context.stack_ref().current_frame().is_none());
}

#[test]
fn test_whitelisted_out_component_is_not_dispatchable() {
    let mut registry = ComponentRegistry::with_builtins().unwrap();
    registry.apply_whitelist(Whitelist::Only(vec!["alert".to_string()]));
    let registry = Rc::new(registry);
    let context = context();

    let err =
        dispatch_component(&registry, "well", &block_request("x", &[], &context)).unwrap_err();
    assert_eq!(
        err,
        EngineError::UnknownComponent {
            name: "well".to_string()
        }
    );

    // Still known: metadata stays queryable even while undispatchable.
    assert!(registry.is_known("well"));
    assert!(registry.resolve_asset_bundle("well", "default").is_empty());
}

#[test]
fn test_whitelisted_alias_is_dispatchable() {
    let mut registry = ComponentRegistry::with_builtins().unwrap();
    registry.apply_whitelist(Whitelist::Only(vec!["panel".to_string()]));
    let registry = Rc::new(registry);
    let context = context();

    assert_eq!(registry.registered(), vec!["panel"]);

    // The whitelisted alias dispatches and attaches the shared definition's
    // asset bundle.
    let output =
        dispatch_component(&registry, "panel", &block_request("body", &[], &context)).unwrap();
    assert!(output.text().contains("class=\"card card-default\""));
    assert!(context
        .assets_ref()
        .loaded_modules()
        .contains(&"shortcodes.card".to_string()));

    // The canonical name was not listed and stays undispatchable.
    let err =
        dispatch_component(&registry, "card", &block_request("x", &[], &context)).unwrap_err();
    assert_eq!(
        err,
        EngineError::UnknownComponent {
            name: "card".to_string()
        }
    );
}

#[test]
fn test_component_aliases_dispatch_to_the_shared_definition() {
    let registry = registry();
    let context = context();

    let panel = dispatch_component(
        &registry,
        "panel",
        &block_request("body", &[("header", "Title")], &context),
    )
    .unwrap();
    assert!(panel.text().contains("class=\"card card-default\""));
    // The canonical name drives ids and asset tracking.
    assert!(panel.text().contains("id=\"sc_card_0\""));
    assert!(context
        .assets_ref()
        .active_components()
        .contains(&"card".to_string()));
}

#[test]
fn test_attribute_alias_resolves_to_canonical_name() {
    let registry = registry();
    let context = context();
    let request = block_request("body", &[("heading", "Title")], &context);
    let output = dispatch_component(&registry, "card", &request).unwrap();
    assert!(output.text().contains("<div class=\"card-header\">Title</div>"));
}

#[test]
fn test_locale_negation_extends_flag_negations() {
    let registry = registry();
    let context = context();
    let dispatcher = ComponentDispatcher::for_component(Rc::clone(&registry), "alert")
        .unwrap()
        .with_locale_negation("nope");

    let request = block_request("x", &[("dismissible", "NOPE")], &context);
    let output = dispatcher.dispatch(&request).unwrap();
    assert!(!output.text().contains("alert-dismissible"));
}

// ─── Markup expansion through the host collaborator ─────────────────────────

/// Expands `{{color}}` to `info`; stands in for the host's text transforms.
struct TemplateExpander;

impl MarkupExpander for TemplateExpander {
    fn expand(&self, raw: &str) -> String {
        raw.replace("{{color}}", "info")
    }
}

#[test]
fn test_raw_attribute_values_are_expanded_before_validation() {
    let registry = registry();
    let context = Rc::new(RenderContext::new(Box::new(TemplateExpander)));
    let request = block_request("{{color}} body", &[("color", "{{color}}")], &context);

    let output = dispatch_component(&registry, "alert", &request).unwrap();
    // The enumerated check ran against the expanded value, and the body text
    // went through expansion without any attribute validation.
    assert!(output.text().contains("alert-info"));
    assert!(output.text().contains("info body"));
}

/// Dispatches a nested card whenever the body contains the `@card` marker,
/// the way a host parser would re-enter the engine for nested components.
struct NestedCardExpander {
    registry: Rc<ComponentRegistry>,
    context: Rc<RefCell<Weak<RenderContext>>>,
}

impl MarkupExpander for NestedCardExpander {
    fn expand(&self, raw: &str) -> String {
        if raw != "@card" {
            return raw.to_string();
        }
        let context = match self.context.borrow().upgrade() {
            Some(context) => context,
            None => return raw.to_string(),
        };
        let request = CanonicalRequest::from_block(
            "inner",
            raw_attrs(&[("header", "Section")]),
            Rc::clone(&context),
            ContentFrame::new(),
        );
        dispatch_component(&self.registry, "card", &request)
            .map(|output| output.text().to_string())
            .unwrap_or_default()
    }
}

#[test]
fn test_nested_card_sees_accordion_parent_frame() {
    let registry = registry();
    // The expander needs the context that owns it; wire the cycle up through
    // a shared weak slot filled in after construction.
    let slot: Rc<RefCell<Weak<RenderContext>>> = Rc::new(RefCell::new(Weak::new()));
    let expander = NestedCardExpander {
        registry: Rc::clone(&registry),
        context: Rc::clone(&slot),
    };
    let context = Rc::new(RenderContext::new(Box::new(expander)));
    *slot.borrow_mut() = Rc::downgrade(&context);

    let request = block_request("@card", &[], &context);
    let output = dispatch_component(&registry, "accordion", &request).unwrap();

    // The card rendered while the accordion frame was open, so its collapse
    // pane links back to the accordion's generated id.
    assert!(output.text().contains("id=\"sc_accordion_0\""));
    assert!(output.text().contains("data-parent=\"#sc_accordion_0\""));
    assert!(output.text().contains("href=\"#sc_card_0_collapse\""));
    // Both frames closed again.
    assert!(context.stack_ref().current_frame().is_none());
}

// ─── Deferred content ────────────────────────────────────────────────────────

#[test]
fn test_modal_dispatch_defers_the_dialog() {
    let registry = registry();
    let context = context();
    let request = block_request(
        "<p>dialog body</p>",
        &[("text", "Open"), ("header", "Hello")],
        &context,
    );

    let output = dispatch_component(&registry, "modal", &request).unwrap();
    assert!(output.is_final());
    assert!(output.text().contains("data-target=\"#sc_modal_0\""));
    assert!(!output.text().contains("dialog body"));

    let deferred = context.drain_deferred();
    assert!(deferred.starts_with(DEFERRED_BEGIN));
    assert!(deferred.ends_with(DEFERRED_END));
    assert!(deferred.contains("dialog body"));
    assert_eq!(context.drain_deferred(), "");
}

#[test]
fn test_deferred_blocks_keep_invocation_order() {
    let registry = registry();
    let context = context();

    for header in ["First", "Second"] {
        let request = block_request("body", &[("text", "open"), ("header", header)], &context);
        dispatch_component(&registry, "modal", &request).unwrap();
    }

    let deferred = context.drain_deferred();
    let first = deferred.find("First").unwrap();
    let second = deferred.find("Second").unwrap();
    assert!(first < second);
    assert!(deferred.contains("id=\"sc_modal_0\""));
    assert!(deferred.contains("id=\"sc_modal_1\""));
}

#[test]
fn test_modal_skin_assets_resolve_against_context_skin() {
    let registry = registry();
    let context = Rc::new(
        RenderContext::new(Box::new(PassthroughExpander)).with_skin("vector"),
    );
    let request = block_request("body", &[("text", "open")], &context);
    dispatch_component(&registry, "modal", &request).unwrap();

    assert_eq!(
        context.assets_ref().loaded_modules(),
        &[
            "shortcodes.base".to_string(),
            "shortcodes.modal".to_string(),
            "shortcodes.modal.vector".to_string(),
        ]
    );
}

// ─── Attribute degradation (never an error) ─────────────────────────────────

#[test]
fn test_invalid_enumerated_value_degrades_inside_the_render() {
    let registry = registry();
    let context = context();
    let request = block_request("x", &[("color", "ultraviolet")], &context);

    // No error: the alert falls back to its default variant.
    let output = dispatch_component(&registry, "alert", &request).unwrap();
    assert!(output.text().contains("alert-default"));
}

#[test]
fn test_missing_required_attribute_becomes_an_inline_error_fragment() {
    let registry = registry();
    let context = context();
    let request = CanonicalRequest::from_inline(vec![
        InlineArg::Context(Rc::clone(&context)),
        InlineArg::text("Go"),
    ])
    .unwrap();

    let output = dispatch_component(&registry, "button", &request).unwrap();
    assert_eq!(
        output.text(),
        "<span class=\"error\">button requires a link</span>"
    );
}
