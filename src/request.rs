//! Request normalization: the two invocation shapes a host can hand us,
//! unified into one canonical request object.
//!
//! The shape is always chosen by the caller — [`CanonicalRequest::from_inline`]
//! for positional "function style" invocations, [`CanonicalRequest::from_block`]
//! for explicit input+attributes+context "tag style" invocations. The two
//! shapes are structurally ambiguous at small sizes, so there is no
//! auto-detection.

use std::collections::HashMap;
use std::rc::Rc;

use crate::attributes::RawValue;
use crate::context::RenderContext;
use crate::error::{EngineError, EngineResult};

/// Opaque handle to the host's expansion frame. Present only on block-style
/// invocations; the engine never looks inside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFrame {
    pub title: Option<String>,
}

impl ContentFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titled(title: impl Into<String>) -> Self {
        ContentFrame {
            title: Some(title.into()),
        }
    }
}

/// One positional element of an inline-style invocation.
#[derive(Clone)]
pub enum InlineArg {
    /// The rendering-context handle; must be the first element.
    Context(Rc<RenderContext>),
    /// Any other element: input text, `key=value`, or a bare flag.
    Text(String),
}

impl InlineArg {
    pub fn text(value: impl Into<String>) -> Self {
        InlineArg::Text(value.into())
    }
}

/// The one canonical invocation shape the dispatcher consumes.
///
/// Attribute keys are exactly as the caller gave them: not yet
/// alias-resolved, not yet validated. Constructed once per invocation and
/// immutable afterwards.
#[derive(Debug)]
pub struct CanonicalRequest {
    input: String,
    attributes: HashMap<String, RawValue>,
    context: Rc<RenderContext>,
    content_frame: Option<ContentFrame>,
}

impl CanonicalRequest {
    /// Normalizes an inline-style positional argument list.
    ///
    /// The first element must be the context handle. The element after it
    /// (if any) is the raw input text. Every element after the context is
    /// also scanned for attributes: `key=value` splits on the *first* `=`
    /// with both sides trimmed, and a bare string becomes a flag attribute
    /// set to boolean true.
    pub fn from_inline(args: Vec<InlineArg>) -> EngineResult<Self> {
        let mut args = args.into_iter();
        let context = match args.next() {
            Some(InlineArg::Context(context)) => context,
            _ => return Err(EngineError::MissingContext),
        };

        let mut trailing: Vec<String> = Vec::new();
        for (position, arg) in args.enumerate() {
            match arg {
                InlineArg::Text(text) => trailing.push(text),
                InlineArg::Context(_) => {
                    return Err(EngineError::NonStringArgument { position: position + 1 })
                }
            }
        }

        let input = trailing.first().cloned().unwrap_or_default();
        let mut attributes = HashMap::new();
        for element in &trailing {
            match element.split_once('=') {
                Some((key, value)) => {
                    attributes.insert(
                        key.trim().to_string(),
                        RawValue::Str(value.trim().to_string()),
                    );
                }
                None => {
                    let key = element.trim();
                    if !key.is_empty() {
                        attributes.insert(key.to_string(), RawValue::Bool(true));
                    }
                }
            }
        }

        Ok(CanonicalRequest {
            input,
            attributes,
            context,
            content_frame: None,
        })
    }

    /// Normalizes a block-style invocation: input text, an explicit
    /// attribute map, the context handle and the host's content frame.
    ///
    /// The four-part shape and the presence of the context are enforced by
    /// the signature itself, so this constructor cannot fail.
    pub fn from_block(
        input: impl Into<String>,
        attributes: HashMap<String, RawValue>,
        context: Rc<RenderContext>,
        content_frame: ContentFrame,
    ) -> Self {
        CanonicalRequest {
            input: input.into(),
            attributes,
            context,
            content_frame: Some(content_frame),
        }
    }

    /// The raw input text, possibly empty.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The raw attribute map, keys exactly as supplied.
    pub fn attributes(&self) -> &HashMap<String, RawValue> {
        &self.attributes
    }

    pub fn context(&self) -> &Rc<RenderContext> {
        &self.context
    }

    /// The host content frame; present only for block-style invocations.
    pub fn content_frame(&self) -> Option<&ContentFrame> {
        self.content_frame.as_ref()
    }
}
