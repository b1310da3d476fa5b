//! Post name to block id cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

/// Process-wide mapping from post names to page block ids.
///
/// Entries are added on a successful lookup and never invalidated, so a
/// cache lives as long as the process (or the caller) that owns it. A
/// renamed post keeps resolving to its old name until restart.
#[derive(Debug, Default)]
pub struct NameCache {
    entries: RwLock<HashMap<String, String>>,
}

impl NameCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached id for `name`, without loading.
    pub fn get(&self, name: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Number of cached names.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve `name` to a block id, loading candidates on a miss.
    ///
    /// `load` returns `(name, id)` pairs; the first pair whose name matches
    /// is cached and returned. Only the requested name is cached. Unknown
    /// names return `Ok(None)` and are looked up again next time.
    ///
    /// # Errors
    ///
    /// Returns whatever `load` fails with.
    pub fn resolve<F, I, E>(&self, name: &str, load: F) -> Result<Option<String>, E>
    where
        F: FnOnce() -> Result<I, E>,
        I: IntoIterator<Item = (String, String)>,
    {
        if let Some(id) = self.get(name) {
            debug!("Name cache hit for {}", name);
            return Ok(Some(id));
        }

        let found = load()?
            .into_iter()
            .find_map(|(candidate, id)| (candidate == name).then_some(id));

        if let Some(id) = &found {
            debug!("Caching {} -> {}", name, id);
            self.entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(name.to_owned(), id.clone());
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::convert::Infallible;

    use pretty_assertions::assert_eq;

    use super::*;

    fn posts() -> Vec<(String, String)> {
        vec![
            ("hello-world".to_owned(), "id-1".to_owned()),
            ("rust-notes".to_owned(), "id-2".to_owned()),
            ("hello-world".to_owned(), "id-3".to_owned()),
        ]
    }

    #[test]
    fn test_miss_then_hit_loads_once() {
        let cache = NameCache::new();
        let loads = Cell::new(0);
        let load = || {
            loads.set(loads.get() + 1);
            Ok::<_, Infallible>(posts())
        };

        assert_eq!(cache.resolve("rust-notes", load).unwrap(), Some("id-2".to_owned()));
        assert_eq!(cache.resolve("rust-notes", load).unwrap(), Some("id-2".to_owned()));
        assert_eq!(loads.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_match_wins() {
        let cache = NameCache::new();
        let id = cache
            .resolve("hello-world", || Ok::<_, Infallible>(posts()))
            .unwrap();
        assert_eq!(id.as_deref(), Some("id-1"));
    }

    #[test]
    fn test_unknown_name_not_cached() {
        let cache = NameCache::new();
        let loads = Cell::new(0);
        let load = || {
            loads.set(loads.get() + 1);
            Ok::<_, Infallible>(posts())
        };

        assert_eq!(cache.resolve("missing", load).unwrap(), None);
        assert_eq!(cache.resolve("missing", load).unwrap(), None);
        assert_eq!(loads.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_error_propagates() {
        let cache = NameCache::new();
        let result: Result<Option<String>, &str> =
            cache.resolve("hello-world", || Err::<Vec<(String, String)>, _>("offline"));
        assert_eq!(result, Err("offline"));
        assert!(cache.get("hello-world").is_none());
    }
}
