//! Content registry: template and behavior lookup.
//!
//! Built once at startup, wrapped in an `Arc`, and injected into `Game`.
//! There is deliberately no global card list — tests construct a registry
//! with exactly the fixture content they need.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::behavior::{CardBehavior, NullBehavior};
use super::template::{CardId, CardTemplate};

/// Registry of card templates and their behaviors.
///
/// ## Example
///
/// ```
/// use hearth_sim::cards::{CardId, CardTemplate, ContentRegistry};
///
/// let mut content = ContentRegistry::new();
/// content.register(CardTemplate::minion(CardId::new(1), "Bog Lurker", 2, 2, 3));
///
/// assert_eq!(content.template(CardId::new(1)).unwrap().name, "Bog Lurker");
/// ```
#[derive(Clone)]
pub struct ContentRegistry {
    templates: FxHashMap<CardId, CardTemplate>,
    behaviors: FxHashMap<CardId, Arc<dyn CardBehavior>>,
    vanilla: Arc<dyn CardBehavior>,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            templates: FxHashMap::default(),
            behaviors: FxHashMap::default(),
            vanilla: Arc::new(NullBehavior),
        }
    }

    /// Register a card with no ability text.
    ///
    /// Panics if the card ID is already registered — duplicate content is
    /// a startup configuration bug.
    pub fn register(&mut self, template: CardTemplate) {
        let id = template.id;
        if self.templates.insert(id, template).is_some() {
            panic!("card {id} registered twice");
        }
    }

    /// Register a card together with its behavior.
    pub fn register_with_behavior(
        &mut self,
        template: CardTemplate,
        behavior: Arc<dyn CardBehavior>,
    ) {
        let id = template.id;
        self.register(template);
        self.behaviors.insert(id, behavior);
    }

    /// Get a card template by ID.
    #[must_use]
    pub fn template(&self, id: CardId) -> Option<&CardTemplate> {
        self.templates.get(&id)
    }

    /// The behavior for a card; vanilla if none was registered.
    #[must_use]
    pub fn behavior(&self, id: CardId) -> Arc<dyn CardBehavior> {
        self.behaviors
            .get(&id)
            .map_or_else(|| Arc::clone(&self.vanilla), Arc::clone)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.templates.contains_key(&id)
    }

    /// Number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values()
    }
}

impl std::fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRegistry")
            .field("templates", &self.templates.len())
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_register_and_lookup() {
        let mut content = ContentRegistry::new();
        content.register(CardTemplate::minion(CardId::new(1), "Bog Lurker", 2, 2, 3));

        let template = content.template(CardId::new(1)).unwrap();
        assert_eq!(template.name, "Bog Lurker");
        assert_eq!(template.kind, CardKind::Minion);

        assert!(content.contains(CardId::new(1)));
        assert!(!content.contains(CardId::new(2)));
        assert_eq!(content.len(), 1);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_duplicate_registration_panics() {
        let mut content = ContentRegistry::new();
        content.register(CardTemplate::spell(CardId::new(1), "Scorch", 2));
        content.register(CardTemplate::spell(CardId::new(1), "Scorch", 2));
    }

    #[test]
    fn test_vanilla_behavior_fallback() {
        let mut content = ContentRegistry::new();
        content.register(CardTemplate::minion(CardId::new(1), "Bog Lurker", 2, 2, 3));

        let behavior = content.behavior(CardId::new(1));
        assert!(!behavior.requires_target());
        assert!(behavior.triggers().is_empty());
    }
}
