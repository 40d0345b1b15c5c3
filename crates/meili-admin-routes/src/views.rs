//! Lazily loaded page components.
//!
//! Front ends register a loader per [`View`]. The loader runs the first time
//! the view is requested; every later request returns the same cached
//! component.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::matcher::RouteMatch;
use crate::table::View;

type Loader<C> = Box<dyn Fn() -> C + Send + Sync>;

struct Slot<C> {
    loader: Loader<C>,
    loaded: OnceLock<Arc<C>>,
}

/// Registry of view loaders, generic over the component type `C`.
pub struct ViewRegistry<C> {
    slots: HashMap<View, Slot<C>>,
}

impl<C> ViewRegistry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Register the loader for `view`, replacing any earlier one (and its
    /// cached component).
    pub fn register<F>(&mut self, view: View, loader: F)
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.slots.insert(
            view,
            Slot {
                loader: Box::new(loader),
                loaded: OnceLock::new(),
            },
        );
    }

    /// Component for `view`, loading it on first use.
    ///
    /// Returns `None` when no loader is registered.
    pub fn get(&self, view: View) -> Option<Arc<C>> {
        let slot = self.slots.get(&view)?;
        Some(Arc::clone(
            slot.loaded.get_or_init(|| Arc::new((slot.loader)())),
        ))
    }

    /// Components for every level of a resolved route, outermost first.
    ///
    /// Levels without a registered loader are skipped.
    pub fn components(&self, route: &RouteMatch) -> Vec<Arc<C>> {
        route
            .matched
            .iter()
            .filter_map(|level| self.get(level.view))
            .collect()
    }

    /// Whether `view` has been loaded already.
    pub fn is_loaded(&self, view: View) -> bool {
        self.slots
            .get(&view)
            .is_some_and(|slot| slot.loaded.get().is_some())
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<C> Default for ViewRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ViewRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut views: Vec<View> = self.slots.keys().copied().collect();
        views.sort_unstable();
        f.debug_struct("ViewRegistry")
            .field("views", &views)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::matcher::resolve;

    #[test]
    fn loader_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ViewRegistry::new();
        let counter = Arc::clone(&calls);
        registry.register(View::Projects, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "projects page".to_owned()
        });

        assert!(!registry.is_loaded(View::Projects));
        let first = registry.get(View::Projects);
        let second = registry.get(View::Projects);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_loaded(View::Projects));
        assert!(matches!((first, second), (Some(a), Some(b)) if Arc::ptr_eq(&a, &b)));
    }

    #[test]
    fn unregistered_view_is_none() {
        let registry: ViewRegistry<String> = ViewRegistry::default();
        assert!(registry.get(View::Home).is_none());
        assert!(!registry.is_loaded(View::Home));
        assert!(registry.is_empty());
    }

    #[test]
    fn components_follow_the_route_chain() {
        let mut registry = ViewRegistry::new();
        for view in View::ALL {
            let view = *view;
            registry.register(view, move || view.as_str());
        }
        assert_eq!(registry.len(), View::ALL.len());

        let chain = resolve("/projects/1/indexes/movies/faceting")
            .map(|m| registry.components(&m))
            .unwrap_or_default();
        let names: Vec<&str> = chain.iter().map(|c| **c).collect();
        assert_eq!(names, vec!["IndexDetail", "index/Faceting"]);

        // Views off the chain stay unloaded.
        assert!(!registry.is_loaded(View::Home));
    }
}
