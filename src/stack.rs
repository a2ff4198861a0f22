//! The LIFO stack of currently-open component frames.
//!
//! One stack exists per document render. Frames live in an arena `Vec` owned
//! by the stack; a frame's parent is recorded as an index into that arena, so
//! no frame ever holds a strong reference to another and a popped frame can
//! never be kept alive by a child.

use std::collections::HashMap;

use log::trace;

use crate::error::{EngineError, EngineResult};

/// Prefix for generated frame ids: `sc_{component}_{counter}`.
const ID_PREFIX: &str = "sc";

/// One currently-open component instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestingFrame {
    id: String,
    component: String,
    /// Arena index of the frame that was top-of-stack when this one was
    /// pushed. Lookup only; never an ownership edge.
    parent: Option<usize>,
}

impl NestingFrame {
    pub fn new(component: impl Into<String>, id: impl Into<String>) -> Self {
        NestingFrame {
            id: id.into(),
            component: component.into(),
            parent: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

/// A strict stack of open frames plus per-component-name id counters.
///
/// State machine: `Empty ⇄ open ⇄ NonEmpty`; the only legal close is "pop the
/// current top by matching id". Anything else is a fatal [`EngineError`]
/// because it signals a logic bug in the calling component tree, not bad
/// user input.
#[derive(Debug, Default)]
pub struct NestingStack {
    frames: Vec<NestingFrame>,
    counters: HashMap<String, u64>,
}

impl NestingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a frame, recording the current top as its parent.
    ///
    /// Fails if the frame carries an empty id or component name (defensive;
    /// a well-formed dispatcher never constructs such a frame).
    pub fn open(&mut self, mut frame: NestingFrame) -> EngineResult<()> {
        if frame.id.is_empty() {
            return Err(EngineError::MalformedFrame {
                field: "id".to_string(),
            });
        }
        if frame.component.is_empty() {
            return Err(EngineError::MalformedFrame {
                field: "component name".to_string(),
            });
        }
        frame.parent = self.frames.len().checked_sub(1);
        trace!("open frame '{}' ({})", frame.id, frame.component);
        self.frames.push(frame);
        Ok(())
    }

    /// Pops the top frame, which must carry exactly `id`.
    ///
    /// Components must close in exact reverse order of opening; an
    /// out-of-order or double close has no recovery path.
    pub fn close(&mut self, id: &str) -> EngineResult<NestingFrame> {
        match self.frames.last() {
            None => Err(EngineError::CloseOnEmptyStack {
                requested: id.to_string(),
            }),
            Some(top) if top.id != id => Err(EngineError::MismatchedClose {
                requested: id.to_string(),
                open: top.id.clone(),
            }),
            Some(_) => {
                trace!("close frame '{}'", id);
                self.frames.pop().ok_or(EngineError::CloseOnEmptyStack {
                    requested: id.to_string(),
                })
            }
        }
    }

    /// The currently open frame, or `None` between component invocations.
    pub fn current_frame(&self) -> Option<&NestingFrame> {
        self.frames.last()
    }

    /// The parent of `frame` at the time it was pushed, if that frame is
    /// still on the stack.
    pub fn parent_of(&self, frame: &NestingFrame) -> Option<&NestingFrame> {
        frame.parent.and_then(|idx| self.frames.get(idx))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Produces `sc_{component}_{n}` with one monotonically increasing
    /// counter per component name, independent of stack depth. A number is
    /// never reused within this stack's lifetime.
    pub fn generate_unique_id(&mut self, component: &str) -> String {
        let counter = self.counters.entry(component.to_string()).or_insert(0);
        let id = format!("{}_{}_{}", ID_PREFIX, component, counter);
        *counter += 1;
        id
    }
}
