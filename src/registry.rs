//! The component registry: the static identifier → definition table every
//! dispatch consults.
//!
//! Definitions are loaded once, at construction, from a definition source (a
//! serde-deserializable mapping, see [`DefinitionEntry`]); the registry is
//! immutable afterwards and safe to share read-only across renders. Alias
//! identifiers resolve to the *same* definition object as their canonical
//! target, never to a copy.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dispatch::ComponentCtor;
use crate::error::{EngineError, EngineResult};

/// How a component is invoked: inline-positional or with explicit
/// input/attributes/context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerStyle {
    Inline,
    Block,
}

/// A component's asset bundle: default module list plus per-skin overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleBundle {
    #[serde(default)]
    pub default: Vec<String>,
    #[serde(default, flatten)]
    pub skins: BTreeMap<String, Vec<String>>,
}

/// One entry of a definition source: either a full definition object or a
/// bare string naming the identifier this one is an alias of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefinitionEntry {
    Alias(String),
    Definition(DefinitionSpec),
}

/// The serde shape of a full component definition.
///
/// `implementation` is a key into the constructor table
/// ([`crate::components::constructor_for`]); registration fails if it names
/// no known constructor, so a stringly-typed binding can never survive into
/// a built registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionSpec {
    pub implementation: String,
    #[serde(rename = "handlerStyle")]
    pub handler_style: HandlerStyle,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub modules: ModuleBundle,
}

/// A resolved, immutable component definition.
#[derive(Debug)]
pub struct ComponentDefinition {
    name: String,
    ctor: ComponentCtor,
    handler_style: HandlerStyle,
    attributes: Vec<String>,
    aliases: BTreeMap<String, String>,
    modules: ModuleBundle,
}

impl ComponentDefinition {
    /// The canonical component identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ctor(&self) -> ComponentCtor {
        self.ctor
    }

    pub fn handler_style(&self) -> HandlerStyle {
        self.handler_style
    }

    /// Declared attribute names.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Attribute alias → canonical attribute name.
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    pub fn modules(&self) -> &ModuleBundle {
        &self.modules
    }
}

/// Which known identifiers are enabled for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Whitelist {
    /// Every known identifier.
    All,
    /// No identifier at all.
    None,
    /// An explicit identifier list; entries are trimmed, lower-cased and
    /// intersected with the known set.
    Only(Vec<String>),
}

impl From<bool> for Whitelist {
    fn from(all: bool) -> Self {
        if all {
            Whitelist::All
        } else {
            Whitelist::None
        }
    }
}

/// The identifier → definition table, plus the registered (dispatchable)
/// subset.
///
/// Identifiers outside the registered subset stay *known*: their metadata
/// remains queryable, but dispatching to them fails and their asset bundles
/// resolve to nothing.
#[derive(Debug)]
pub struct ComponentRegistry {
    definitions: HashMap<String, Rc<ComponentDefinition>>,
    registered: BTreeSet<String>,
}

impl ComponentRegistry {
    /// Builds the registry from a definition source. All identifiers start
    /// out registered; apply a [`Whitelist`] to restrict dispatch.
    ///
    /// Fails only on malformed source data: an implementation binding with
    /// no constructor, an alias pointing at a missing or alias target, or an
    /// empty identifier.
    pub fn from_source(source: &BTreeMap<String, DefinitionEntry>) -> EngineResult<Self> {
        let mut definitions: HashMap<String, Rc<ComponentDefinition>> = HashMap::new();

        for (name, entry) in source {
            if name.trim().is_empty() {
                return Err(EngineError::MalformedDefinition {
                    name: name.clone(),
                    reason: "empty component identifier".to_string(),
                });
            }
            if let DefinitionEntry::Definition(spec) = entry {
                let ctor = crate::components::constructor_for(&spec.implementation)
                    .ok_or_else(|| EngineError::MalformedDefinition {
                        name: name.clone(),
                        reason: format!(
                            "implementation binding '{}' has no constructor",
                            spec.implementation
                        ),
                    })?;
                let definition = ComponentDefinition {
                    name: name.clone(),
                    ctor,
                    handler_style: spec.handler_style,
                    attributes: spec.attributes.clone(),
                    aliases: spec.aliases.clone(),
                    modules: spec.modules.clone(),
                };
                definitions.insert(name.clone(), Rc::new(definition));
            }
        }

        // Alias entries inherit the full definition of their target via a
        // shared pointer, not a copy.
        for (name, entry) in source {
            if let DefinitionEntry::Alias(target) = entry {
                let definition = definitions.get(target).cloned().ok_or_else(|| {
                    EngineError::MalformedDefinition {
                        name: name.clone(),
                        reason: format!("alias target '{}' is not a component definition", target),
                    }
                })?;
                definitions.insert(name.clone(), definition);
            }
        }

        let registered = definitions.keys().cloned().collect();
        Ok(ComponentRegistry {
            definitions,
            registered,
        })
    }

    /// Builds the registry from a YAML definition source document.
    pub fn from_yaml(yaml: &str) -> EngineResult<Self> {
        let source: BTreeMap<String, DefinitionEntry> = serde_yaml::from_str(yaml)?;
        Self::from_source(&source)
    }

    /// Builds the registry from the built-in component definitions.
    pub fn with_builtins() -> EngineResult<Self> {
        Self::from_source(&crate::components::builtin_definitions())
    }

    /// Restricts (or restores) the set of dispatchable identifiers.
    ///
    /// `Whitelist::All` registers every known identifier, `Whitelist::None`
    /// registers none, and an explicit list is trimmed, lower-cased,
    /// intersected with the known identifiers and kept sorted.
    pub fn apply_whitelist(&mut self, whitelist: impl Into<Whitelist>) {
        let whitelist = whitelist.into();
        self.registered = match whitelist {
            Whitelist::All => self.definitions.keys().cloned().collect(),
            Whitelist::None => BTreeSet::new(),
            Whitelist::Only(list) => list
                .iter()
                .map(|name| name.trim().to_lowercase())
                .filter(|name| self.definitions.contains_key(name))
                .collect(),
        };
        debug!("whitelist applied: {} component(s) registered", self.registered.len());
    }

    /// All known identifiers (canonical names and component aliases), sorted.
    pub fn known(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// The identifiers currently enabled for dispatch, sorted.
    pub fn registered(&self) -> Vec<&str> {
        self.registered.iter().map(|k| k.as_str()).collect()
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains(name)
    }

    /// The definition behind an identifier (canonical or alias).
    pub fn definition(&self, name: &str) -> EngineResult<&Rc<ComponentDefinition>> {
        self.definitions
            .get(name)
            .ok_or_else(|| EngineError::UnknownComponent {
                name: name.to_string(),
            })
    }

    pub fn handler_style(&self, name: &str) -> EngineResult<HandlerStyle> {
        Ok(self.definition(name)?.handler_style())
    }

    pub fn declared_attributes(&self, name: &str) -> EngineResult<&[String]> {
        Ok(self.definition(name)?.attributes())
    }

    pub fn attribute_aliases(&self, name: &str) -> EngineResult<&BTreeMap<String, String>> {
        Ok(self.definition(name)?.aliases())
    }

    pub fn ctor(&self, name: &str) -> EngineResult<ComponentCtor> {
        Ok(self.definition(name)?.ctor())
    }

    /// The default asset module list merged with the per-skin override list.
    ///
    /// Unregistered identifiers resolve to an empty list; this never fails.
    pub fn resolve_asset_bundle(&self, name: &str, skin: &str) -> Vec<String> {
        if !self.is_registered(name) {
            return Vec::new();
        }
        let Ok(definition) = self.definition(name) else {
            return Vec::new();
        };
        let bundle = definition.modules();
        let mut modules = bundle.default.clone();
        if let Some(overrides) = bundle.skins.get(skin) {
            for module in overrides {
                if !modules.iter().any(|m| m == module) {
                    modules.push(module.clone());
                }
            }
        }
        modules
    }

    /// The canonical identifier owning a given implementation binding.
    ///
    /// Lets a concrete component instance learn its own declared name
    /// without hard-coding it.
    pub fn reverse_lookup(&self, ctor: ComponentCtor) -> EngineResult<&str> {
        self.definitions
            .iter()
            .filter(|(name, definition)| *name == definition.name())
            .find(|(_, definition)| definition.ctor() as usize == ctor as usize)
            .map(|(name, _)| name.as_str())
            .ok_or(EngineError::UnknownImplementation)
    }
}
