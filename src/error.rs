use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the dispatch engine.
///
/// All of these abort the single component invocation that triggered them;
/// none are retried. Attribute validation is deliberately *not* part of this
/// taxonomy — invalid attribute values degrade to
/// [`AttrValue::Invalid`](crate::attributes::AttrValue) and each concrete
/// component decides how to surface them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Unknown component '{name}'")]
    UnknownComponent { name: String },

    #[error("No registered component owns the given implementation binding")]
    UnknownImplementation,

    #[error("Malformed component definition for '{name}': {reason}")]
    MalformedDefinition { name: String, reason: String },

    #[error("Invalid request: the first inline argument must be the rendering context")]
    MissingContext,

    #[error("Invalid request: inline argument at position {position} is not a string")]
    NonStringArgument { position: usize },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Nesting violation: cannot open a frame with an empty {field}")]
    MalformedFrame { field: String },

    #[error("Nesting violation: close('{requested}') called on an empty stack")]
    CloseOnEmptyStack { requested: String },

    #[error("Nesting violation: close('{requested}') does not match the open frame '{open}'")]
    MismatchedClose { requested: String, open: String },

    #[error("YAML error: {0}")]
    Yaml(String),
}

impl From<serde_yaml::Error> for EngineError {
    fn from(err: serde_yaml::Error) -> Self {
        EngineError::Yaml(err.to_string())
    }
}

impl EngineError {
    /// True for the nesting-violation variants, which signal a logic bug in
    /// the calling component tree rather than bad user input.
    pub fn is_nesting_violation(&self) -> bool {
        matches!(
            self,
            EngineError::MalformedFrame { .. }
                | EngineError::CloseOnEmptyStack { .. }
                | EngineError::MismatchedClose { .. }
        )
    }
}
