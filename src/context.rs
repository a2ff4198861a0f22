//! Per-render state and the narrow interface to the host document parser.
//!
//! Everything mutable during a render — the nesting stack, the deferred
//! queue, the asset tracker — lives here, and every document render gets a
//! fresh `RenderContext`. The engine is single-threaded by design: isolation
//! between concurrent renders comes from each render owning its own context,
//! not from locking. Only the [`ComponentRegistry`](crate::ComponentRegistry)
//! is shared between renders, and it is read-only after construction.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeSet;
use std::fmt;

use crate::deferred::DeferredContentQueue;
use crate::stack::NestingStack;

/// Framework-level modules every render needs once any component is used.
pub const BASE_MODULES: &[&str] = &["shortcodes.base"];

/// The skin asset overrides resolve against when none is specified.
pub const DEFAULT_SKIN: &str = "default";

/// The host's "render nested markup" capability.
///
/// Implementations receive raw markup (component body text or attribute
/// values) and return expanded HTML. The engine treats this as opaque; it is
/// the only text transformation it ever delegates.
pub trait MarkupExpander {
    fn expand(&self, raw: &str) -> String;
}

/// An expander that returns its input unchanged. Used by hosts whose markup
/// needs no expansion, and by tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughExpander;

impl MarkupExpander for PassthroughExpander {
    fn expand(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Tracks which components a render used and which asset modules the final
/// page must load. The engine only records names; fetching the assets is the
/// host's job.
#[derive(Debug, Default)]
pub struct AssetTracker {
    active: BTreeSet<String>,
    modules: Vec<String>,
    base_loaded: bool,
}

impl AssetTracker {
    /// Records a component name as used by this render.
    pub fn mark_active(&mut self, component: &str) {
        self.active.insert(component.to_string());
    }

    /// Adds the framework base modules. Only the first call has an effect.
    pub fn ensure_base_loaded(&mut self) {
        if !self.base_loaded {
            self.base_loaded = true;
            self.attach(&BASE_MODULES.iter().map(|m| m.to_string()).collect::<Vec<_>>());
        }
    }

    /// Appends modules, keeping first-seen order and dropping duplicates.
    pub fn attach(&mut self, modules: &[String]) {
        for module in modules {
            if !self.modules.iter().any(|m| m == module) {
                self.modules.push(module.clone());
            }
        }
    }

    /// Component names used so far, sorted.
    pub fn active_components(&self) -> Vec<String> {
        self.active.iter().cloned().collect()
    }

    /// Modules to load, in first-attach order.
    pub fn loaded_modules(&self) -> &[String] {
        &self.modules
    }
}

/// One document render's worth of mutable engine state, plus the injected
/// host collaborators. Share it within a render via `Rc`; never across
/// renders.
pub struct RenderContext {
    expander: Box<dyn MarkupExpander>,
    skin: String,
    stack: RefCell<NestingStack>,
    deferred: RefCell<DeferredContentQueue>,
    assets: RefCell<AssetTracker>,
}

impl RenderContext {
    pub fn new(expander: Box<dyn MarkupExpander>) -> Self {
        RenderContext {
            expander,
            skin: DEFAULT_SKIN.to_string(),
            stack: RefCell::new(NestingStack::new()),
            deferred: RefCell::new(DeferredContentQueue::new()),
            assets: RefCell::new(AssetTracker::default()),
        }
    }

    pub fn with_skin(mut self, skin: impl Into<String>) -> Self {
        self.skin = skin.into();
        self
    }

    /// The active skin name asset bundles resolve against.
    pub fn skin(&self) -> &str {
        &self.skin
    }

    /// Expands nested markup through the host collaborator.
    pub fn expand_markup(&self, raw: &str) -> String {
        self.expander.expand(raw)
    }

    pub fn stack(&self) -> RefMut<'_, NestingStack> {
        self.stack.borrow_mut()
    }

    pub fn stack_ref(&self) -> Ref<'_, NestingStack> {
        self.stack.borrow()
    }

    pub fn deferred(&self) -> RefMut<'_, DeferredContentQueue> {
        self.deferred.borrow_mut()
    }

    pub fn assets(&self) -> RefMut<'_, AssetTracker> {
        self.assets.borrow_mut()
    }

    pub fn assets_ref(&self) -> Ref<'_, AssetTracker> {
        self.assets.borrow()
    }

    /// Drains the deferred queue. The host calls this exactly where it emits
    /// the end of the document body; repeated calls after that yield `""`.
    pub fn drain_deferred(&self) -> String {
        self.deferred.borrow_mut().drain_and_clear()
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("skin", &self.skin)
            .field("stack_depth", &self.stack.borrow().depth())
            .field("deferred_empty", &self.deferred.borrow().is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_modules_load_once() {
        let mut assets = AssetTracker::default();
        assets.ensure_base_loaded();
        assets.ensure_base_loaded();
        assert_eq!(assets.loaded_modules(), &["shortcodes.base".to_string()]);
    }

    #[test]
    fn test_attach_dedups_preserving_order() {
        let mut assets = AssetTracker::default();
        assets.attach(&["a.mod".to_string(), "b.mod".to_string()]);
        assets.attach(&["b.mod".to_string(), "c.mod".to_string()]);
        assert_eq!(
            assets.loaded_modules(),
            &["a.mod".to_string(), "b.mod".to_string(), "c.mod".to_string()]
        );
    }

    #[test]
    fn test_active_components_sorted() {
        let mut assets = AssetTracker::default();
        assets.mark_active("modal");
        assets.mark_active("alert");
        assets.mark_active("modal");
        assert_eq!(assets.active_components(), vec!["alert", "modal"]);
    }

    #[test]
    fn test_context_defaults() {
        let ctx = RenderContext::new(Box::new(PassthroughExpander));
        assert_eq!(ctx.skin(), DEFAULT_SKIN);
        assert_eq!(ctx.expand_markup("[[x]]"), "[[x]]");
        assert_eq!(ctx.drain_deferred(), "");
    }
}
