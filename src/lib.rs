//! # Shortcodes — a component dispatch engine for embedded markup
//!
//! Renders named, nestable components (alerts, cards, modals, carousels…)
//! embedded in documents into HTML fragments.
//!
//! ## Features
//! - Immutable component registry with whitelisting and per-skin asset bundles
//! - Attribute validation that degrades instead of failing (tagged
//!   `Missing`/`Invalid` values, alias resolution to canonical names)
//! - Strict-LIFO nesting stack exposing parent context to children
//! - One canonical request shape for both inline-positional and block-style
//!   invocations
//! - Deferred content: components can emit HTML injected at end-of-body
//!
//! ## Example
//! ```ignore
//! use std::rc::Rc;
//! use shortcodes::{
//!     CanonicalRequest, ComponentDispatcher, ComponentRegistry, ContentFrame,
//!     PassthroughExpander, RenderContext,
//! };
//!
//! let registry = Rc::new(ComponentRegistry::with_builtins()?);
//! let context = Rc::new(RenderContext::new(Box::new(PassthroughExpander)));
//!
//! let dispatcher = ComponentDispatcher::for_component(Rc::clone(&registry), "alert")?;
//! let request = CanonicalRequest::from_block(
//!     "Check your settings.",
//!     [("color".to_string(), shortcodes::RawValue::str("warning"))].into(),
//!     Rc::clone(&context),
//!     ContentFrame::new(),
//! );
//! let fragment = dispatcher.dispatch(&request)?;
//! // …emit fragment.text(), then at end-of-body:
//! let deferred = context.drain_deferred();
//! ```

pub mod attributes;
pub mod components;
pub mod context;
pub mod deferred;
pub mod dispatch;
pub mod error;
pub mod html;
pub mod registry;
pub mod request;
pub mod stack;

// --- Core types ---
pub use attributes::{AttrValue, AttributeKind, AttributeValidator, RawValue};
pub use context::{AssetTracker, MarkupExpander, PassthroughExpander, RenderContext};
pub use dispatch::{
    ComponentCtor, ComponentDispatcher, ComponentRenderer, Invocation, ParentRef, RenderOutput,
};
pub use error::{EngineError, EngineResult};
pub use registry::{
    ComponentDefinition, ComponentRegistry, DefinitionEntry, DefinitionSpec, HandlerStyle,
    ModuleBundle, Whitelist,
};
pub use request::{CanonicalRequest, ContentFrame, InlineArg};
pub use stack::{NestingFrame, NestingStack};

// --- Deferred content ---
pub use deferred::{DeferredBlockBuilder, DeferredContentQueue, DEFERRED_BEGIN, DEFERRED_END};

use std::rc::Rc;

/// Dispatches one request to a registered component identifier.
///
/// Convenience for hosts that build a dispatcher per invocation; hosts that
/// dispatch the same component repeatedly should keep the
/// [`ComponentDispatcher`] around instead.
pub fn dispatch_component(
    registry: &Rc<ComponentRegistry>,
    name: &str,
    request: &CanonicalRequest,
) -> EngineResult<RenderOutput> {
    ComponentDispatcher::for_component(Rc::clone(registry), name)?.dispatch(request)
}
