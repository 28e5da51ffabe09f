//! Named storage of values such as strategy configurations and alerts. Stores are owned and passed
//! around by their callers.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Saved<V> {
    pub value: V,
    pub saved_at: DateTime<Utc>,
}

pub trait Store<V> {
    /// Saves `value` under `name`, replacing any value already saved under it.
    fn save(&mut self, name: &str, value: V);

    fn load(&self, name: &str) -> Option<&Saved<V>>;

    /// The saved names in ascending order.
    fn list(&self) -> Vec<String>;

    /// Removes the value saved under `name`, returning `true` if there was one.
    fn delete(&mut self, name: &str) -> bool;
}

/// A [Store] that lives only as long as the process.
#[derive(Debug, Clone)]
pub struct MemoryStore<V> {
    entries: FxHashMap<String, Saved<V>>,
}
impl<V> MemoryStore<V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<V> Store<V> for MemoryStore<V> {
    fn save(&mut self, name: &str, value: V) {
        self.entries.insert(
            name.to_string(),
            Saved {
                value,
                saved_at: Utc::now(),
            },
        );
    }

    fn load(&self, name: &str) -> Option<&Saved<V>> {
        self.entries.get(name)
    }

    fn list(&self) -> Vec<String> {
        let mut names = self.entries.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    fn delete(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }
}
