//! Per-listener options store.

use serde_json::{Map, Value};

/// Raw options mapping as supplied by the caller.
pub type Options = Map<String, Value>;

/// Key the factory writes the listener port under.
pub const PORT_KEY: &str = "port";

/// Read-only options owned by exactly one listener.
///
/// Built by [`HandlerFactory`](super::HandlerFactory) from a private copy of
/// the shared options, so no two listeners observe the same instance.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOptions {
    values: Options,
}

impl HandlerOptions {
    /// Copy `shared` and stamp it with `port`.
    pub fn for_port(shared: &Options, port: u16) -> Self {
        let mut values = shared.clone();
        values.insert(PORT_KEY.to_string(), Value::from(port));
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Port of the listener these options belong to.
    pub fn port(&self) -> u16 {
        self.get_u64(PORT_KEY)
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Owned copy of the underlying mapping.
    pub fn to_map(&self) -> Options {
        self.values.clone()
    }
}
