//! Name to constructor lookup for transforms.

use std::collections::BTreeMap;

use crate::effects::{Echo, Mix, Mute, Transform, Volume};
use crate::error::{AudioError, AudioResult};

/// Constructor producing a fresh, unconfigured transform.
pub type TransformConstructor = Box<dyn Fn() -> Box<dyn Transform> + Send + Sync>;

/// Help metadata for a registered transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformInfo {
    /// Registered name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Parameter syntax.
    pub usage: String,
}

/// Registry of available transforms, keyed by case-sensitive name.
pub struct TransformRegistry {
    constructors: BTreeMap<String, TransformConstructor>,
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TransformRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Creates a registry with `mute`, `volume`, `echo` and `mix` registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("mute", || Box::new(Mute::default()));
        registry.register("volume", || Box::new(Volume::default()));
        registry.register("echo", || Box::new(Echo::default()));
        registry.register("mix", || Box::new(Mix::default()));
        registry
    }

    /// Registers a constructor, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Transform> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Box::new(constructor));
    }

    /// Creates a fresh transform by name.
    pub fn create(&self, name: &str) -> AudioResult<Box<dyn Transform>> {
        self.constructors
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| AudioError::UnknownTransform {
                name: name.to_string(),
            })
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Help metadata for `name`.
    pub fn describe(&self, name: &str) -> AudioResult<TransformInfo> {
        let transform = self.create(name)?;
        Ok(TransformInfo {
            name: name.to_string(),
            description: transform.description().to_string(),
            usage: transform.usage().to_string(),
        })
    }

    /// Help metadata for every registered transform.
    pub fn describe_all(&self) -> Vec<TransformInfo> {
        self.names()
            .filter_map(|name| self.describe(name).ok())
            .collect()
    }

    /// Returns the number of registered transforms.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns true if no transforms are registered.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
