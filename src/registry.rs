//! Mapping from state keys to placeholder views.
use crate::placeholder::PlaceholderHandle;
use ahash::HashMap;

/// Owns the association between state keys and placeholder views.
///
/// The registry only tracks associations: it never attaches or detaches
/// views. Replacing or removing an entry leaves the previous view as it
/// was.
#[derive(Debug)]
pub struct ViewRegistry {
    views: HashMap<String, PlaceholderHandle>,
}

new_default!(ViewRegistry);

impl ViewRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        ViewRegistry {
            views: HashMap::default(),
        }
    }

    /// Associates `view` with `key`.
    ///
    /// Returns the view previously associated with this key, if any.
    pub fn set<S>(&mut self, key: S, view: PlaceholderHandle) -> Option<PlaceholderHandle>
    where
        S: Into<String>,
    {
        self.views.insert(key.into(), view)
    }

    /// Returns the view associated with `key`, if any.
    pub fn get(&self, key: &str) -> Option<&PlaceholderHandle> {
        self.views.get(key)
    }

    /// Clears the association for `key`.
    ///
    /// Returns the view that was associated with this key, if any.
    pub fn remove(&mut self, key: &str) -> Option<PlaceholderHandle> {
        self.views.remove(key)
    }

    /// Returns `true` if a view is associated with `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.views.contains_key(key)
    }

    /// Runs `f` on every `(key, view)` pair.
    ///
    /// The order is unspecified.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&str, &PlaceholderHandle),
    {
        for (key, view) in &self.views {
            f(key, view);
        }
    }

    /// Iterates on every `(key, view)` pair, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlaceholderHandle)> {
        self.views.iter().map(|(key, view)| (key.as_str(), view))
    }

    /// Returns the number of registered views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if no view is registered.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursive_core::views::DummyView;

    #[test]
    fn set_get_remove() {
        let mut registry = ViewRegistry::new();
        let loading = PlaceholderHandle::new(DummyView);

        assert!(registry.set("loading", loading.clone()).is_none());
        assert!(registry.get("loading").unwrap().ptr_eq(&loading));
        assert!(registry.get("error").is_none());

        let removed = registry.remove("loading").unwrap();
        assert!(removed.ptr_eq(&loading));
        assert!(registry.is_empty());
        assert!(registry.remove("loading").is_none());
    }

    #[test]
    fn set_replaces_previous() {
        let mut registry = ViewRegistry::new();
        let first = PlaceholderHandle::new(DummyView);
        let second = PlaceholderHandle::new(DummyView);

        registry.set("error", first.clone());
        let previous = registry.set("error", second.clone()).unwrap();

        assert!(previous.ptr_eq(&first));
        assert!(registry.get("error").unwrap().ptr_eq(&second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn for_each_visits_all() {
        let mut registry = ViewRegistry::new();
        for key in ["loading", "error", "empty"] {
            registry.set(key, PlaceholderHandle::new(DummyView));
        }

        let mut keys = Vec::new();
        registry.for_each(|key, _| keys.push(key.to_string()));
        keys.sort();

        assert_eq!(keys, ["empty", "error", "loading"]);
        assert_eq!(registry.iter().count(), 3);
    }
}
