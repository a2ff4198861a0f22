//! The per-invocation lifecycle driver.
//!
//! A [`ComponentDispatcher`] ties one concrete component to the registry,
//! builds that component's attribute validator once, and drives every
//! invocation through the same sequence: contract check → attribute
//! expansion and validation → id resolution → frame open → uniform asset
//! side effects → input expansion → render → frame close.

use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::attributes::{AttrValue, AttributeValidator, RawValue};
use crate::context::RenderContext;
use crate::error::{EngineError, EngineResult};
use crate::registry::{ComponentRegistry, HandlerStyle};
use crate::request::CanonicalRequest;
use crate::stack::NestingFrame;

/// Constructor for a concrete component renderer. The registry's
/// implementation bindings resolve to these, and
/// [`ComponentRegistry::reverse_lookup`] maps them back to canonical names.
pub type ComponentCtor = fn() -> Box<dyn ComponentRenderer>;

/// What a concrete component's render step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    /// Ordinary markup; the host may expand it further.
    Markup(String),
    /// Already-finalized HTML. The host must not feed this back through
    /// markup expansion (it may contain literal bracket characters).
    FinalHtml(String),
}

impl RenderOutput {
    pub fn text(&self) -> &str {
        match self {
            RenderOutput::Markup(text) | RenderOutput::FinalHtml(text) => text,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, RenderOutput::FinalHtml(_))
    }
}

/// Name and id of the frame that was top-of-stack when an invocation opened.
///
/// A value snapshot, deliberately not a reference into the stack: the stack
/// keeps moving while children render, and a popped parent must never be
/// kept alive through a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    component: String,
    id: String,
}

impl ParentRef {
    pub(crate) fn new(component: impl Into<String>, id: impl Into<String>) -> Self {
        ParentRef {
            component: component.into(),
            id: id.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Everything a concrete component's render step may look at.
pub struct Invocation<'a> {
    attributes: &'a HashMap<String, AttrValue>,
    id: &'a str,
    input: &'a str,
    parent: Option<&'a ParentRef>,
    context: &'a RenderContext,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(
        attributes: &'a HashMap<String, AttrValue>,
        id: &'a str,
        input: &'a str,
        parent: Option<&'a ParentRef>,
        context: &'a RenderContext,
    ) -> Self {
        Invocation {
            attributes,
            id,
            input,
            parent,
            context,
        }
    }

    /// The validated value of a declared attribute. Undeclared names read as
    /// [`AttrValue::Missing`], so components can probe without panicking.
    pub fn attr(&self, name: &str) -> &AttrValue {
        self.attributes.get(name).unwrap_or(&AttrValue::Missing)
    }

    /// This invocation's resolved id: the `id` attribute if it was set and
    /// non-empty, otherwise a generated unique id.
    pub fn id(&self) -> &str {
        self.id
    }

    /// The input text, already expanded through the host.
    pub fn input(&self) -> &str {
        self.input
    }

    /// The immediately enclosing open component, if any.
    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent
    }

    pub fn context(&self) -> &RenderContext {
        self.context
    }
}

/// A concrete component's render step.
///
/// Render never fails: invalid or absent attributes arrive degraded
/// ([`AttrValue::Invalid`] / [`AttrValue::Missing`]) and it is this step's
/// choice whether to emit a visible inline error fragment for them.
pub trait ComponentRenderer {
    fn render(&self, invocation: &Invocation<'_>) -> RenderOutput;
}

/// Drives the open → validate → render → close lifecycle for one component.
///
/// Holds no per-render state; the same dispatcher may serve many sequential
/// invocations, each carrying its own context in the request.
pub struct ComponentDispatcher {
    registry: Rc<ComponentRegistry>,
    name: String,
    /// The identifier the caller dispatched under: an alias, or the
    /// canonical name itself. Whitelisting and asset bundles resolve
    /// against this name, not the canonical one.
    invoked: String,
    style: HandlerStyle,
    validator: AttributeValidator,
    renderer: Box<dyn ComponentRenderer>,
}

impl ComponentDispatcher {
    /// Builds a dispatcher from an implementation binding. The component's
    /// canonical name is resolved through the registry's reverse lookup, so
    /// concrete components never hard-code their own names.
    pub fn new(registry: Rc<ComponentRegistry>, ctor: ComponentCtor) -> EngineResult<Self> {
        let name = registry.reverse_lookup(ctor)?.to_string();
        let definition = Rc::clone(registry.definition(&name)?);
        let validator = AttributeValidator::new(definition.attributes(), definition.aliases());
        Ok(ComponentDispatcher {
            registry,
            invoked: name.clone(),
            name,
            style: definition.handler_style(),
            validator,
            renderer: ctor(),
        })
    }

    /// Builds a dispatcher for a registered identifier (canonical or alias).
    pub fn for_component(registry: Rc<ComponentRegistry>, name: &str) -> EngineResult<Self> {
        let ctor = registry.ctor(name)?;
        let mut dispatcher = Self::new(registry, ctor)?;
        dispatcher.invoked = name.to_string();
        Ok(dispatcher)
    }

    /// Extends the validator's flag negation set with a locale-supplied
    /// negative word; see [`AttributeValidator::with_locale_negation`].
    pub fn with_locale_negation(mut self, word: impl Into<String>) -> Self {
        self.validator = self.validator.with_locale_negation(word);
        self
    }

    /// The canonical name of the component this dispatcher serves.
    pub fn component_name(&self) -> &str {
        &self.name
    }

    /// Runs one invocation through the full lifecycle.
    ///
    /// Registry, request and nesting failures abort this invocation and are
    /// never retried; attribute problems never surface here (they degrade
    /// inside the validated map).
    pub fn dispatch(&self, request: &CanonicalRequest) -> EngineResult<RenderOutput> {
        if !self.registry.is_registered(&self.invoked) {
            return Err(EngineError::UnknownComponent {
                name: self.invoked.clone(),
            });
        }
        self.check_contract(request)?;

        let context = request.context();
        debug!("dispatching '{}'", self.name);

        // Raw attribute values pass through the host's markup expansion
        // before validation; the body text does not get validated at all.
        let expanded = expand_raw_attributes(context, request.attributes());
        let attributes = self.validator.validate(&expanded);

        let id = match attributes.get("id").and_then(AttrValue::non_empty_text) {
            Some(explicit) => explicit.to_string(),
            None => context.stack().generate_unique_id(&self.name),
        };

        let parent = context
            .stack_ref()
            .current_frame()
            .map(|frame| ParentRef::new(frame.component(), frame.id()));
        context.stack().open(NestingFrame::new(&self.name, &id))?;

        // Uniform side effects, identical for every component.
        {
            let mut assets = context.assets();
            assets.mark_active(&self.name);
            assets.ensure_base_loaded();
            assets.attach(&self.registry.resolve_asset_bundle(&self.invoked, context.skin()));
        }

        let input = context.expand_markup(request.input());
        let invocation = Invocation::new(&attributes, &id, &input, parent.as_ref(), context);
        let output = self.renderer.render(&invocation);

        // The popped frame must be this invocation's own; anything else
        // means a component closed out of order underneath us.
        context.stack().close(&id)?;
        debug!("dispatched '{}' as #{}", self.name, id);
        Ok(output)
    }

    fn check_contract(&self, request: &CanonicalRequest) -> EngineResult<()> {
        match (self.style, request.content_frame()) {
            (HandlerStyle::Block, None) => Err(EngineError::InvalidRequest {
                reason: format!(
                    "block component '{}' invoked without a content frame",
                    self.name
                ),
            }),
            (HandlerStyle::Inline, Some(_)) => Err(EngineError::InvalidRequest {
                reason: format!(
                    "inline component '{}' invoked with a content frame",
                    self.name
                ),
            }),
            _ => Ok(()),
        }
    }
}

fn expand_raw_attributes(
    context: &RenderContext,
    raw: &HashMap<String, RawValue>,
) -> HashMap<String, RawValue> {
    raw.iter()
        .map(|(key, value)| {
            let value = match value {
                RawValue::Str(s) => RawValue::Str(context.expand_markup(s)),
                RawValue::Bool(b) => RawValue::Bool(*b),
            };
            (key.clone(), value)
        })
        .collect()
}
