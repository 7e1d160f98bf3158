//! Cache key generation

use std::collections::BTreeMap;
use std::fmt::Debug;

/// Trait for generating cache keys from input data
pub trait CacheKeyGenerator: Send + Sync + Debug {
    /// Generates a cache key from the given components
    fn generate(&self, params: &CacheKeyParams) -> String;

    /// Generates a key with a namespace prefix
    fn generate_with_namespace(&self, namespace: &str, params: &CacheKeyParams) -> String {
        let key = self.generate(params);

        if key.is_empty() {
            namespace.to_string()
        } else {
            format!("{}:{}", namespace, key)
        }
    }
}

/// Parameters for cache key generation
#[derive(Debug, Clone, Default)]
pub struct CacheKeyParams {
    /// Primary identifier, may be empty when only components matter
    pub primary: String,
    /// Secondary components (sorted for consistency)
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    /// Creates new cache key parameters with a primary identifier
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            components: BTreeMap::new(),
        }
    }

    /// Adds a component to the key parameters
    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }
}

/// Readable key generator: `primary:k1=v1:k2=v2`
///
/// Separator characters inside values are percent-escaped so distinct
/// parameter sets never produce the same key.
#[derive(Debug, Clone, Default)]
pub struct DefaultKeyGenerator;

impl DefaultKeyGenerator {
    pub fn new() -> Self {
        Self
    }

    fn escape(part: &str) -> String {
        let mut escaped = String::with_capacity(part.len());

        for c in part.chars() {
            match c {
                '%' => escaped.push_str("%25"),
                ':' => escaped.push_str("%3A"),
                '=' => escaped.push_str("%3D"),
                other => escaped.push(other),
            }
        }

        escaped
    }
}

impl CacheKeyGenerator for DefaultKeyGenerator {
    fn generate(&self, params: &CacheKeyParams) -> String {
        let mut parts = Vec::with_capacity(params.components.len() + 1);

        if !params.primary.is_empty() {
            parts.push(Self::escape(&params.primary));
        }

        for (k, v) in &params.components {
            parts.push(format!("{}={}", Self::escape(k), Self::escape(v)));
        }

        parts.join(":")
    }
}
