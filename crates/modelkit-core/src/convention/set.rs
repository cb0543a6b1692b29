use crate::convention::{
    Convention, ConventionEvent, EntityTypeAddedConvention, ForeignKeyAddedConvention,
    ForeignKeyRemovedConvention, KeyAddedConvention, ModelInitializingConvention,
    PropertyAddedConvention,
};
use std::{fmt, sync::Arc};

///
/// ConventionSet
///
/// Ordered handlers per event. Frozen once built; index 0 runs first.
///

#[derive(Clone, Default)]
pub struct ConventionSet {
    entity_type_added: Vec<Arc<dyn EntityTypeAddedConvention>>,
    property_added: Vec<Arc<dyn PropertyAddedConvention>>,
    key_added: Vec<Arc<dyn KeyAddedConvention>>,
    foreign_key_added: Vec<Arc<dyn ForeignKeyAddedConvention>>,
    foreign_key_removed: Vec<Arc<dyn ForeignKeyRemovedConvention>>,
    model_initializing: Vec<Arc<dyn ModelInitializingConvention>>,
}

impl ConventionSet {
    #[must_use]
    pub fn builder() -> ConventionSetBuilder {
        ConventionSetBuilder::default()
    }

    /// A set with no handlers for any event.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entity_type_added(&self) -> &[Arc<dyn EntityTypeAddedConvention>] {
        &self.entity_type_added
    }

    #[must_use]
    pub fn property_added(&self) -> &[Arc<dyn PropertyAddedConvention>] {
        &self.property_added
    }

    #[must_use]
    pub fn key_added(&self) -> &[Arc<dyn KeyAddedConvention>] {
        &self.key_added
    }

    #[must_use]
    pub fn foreign_key_added(&self) -> &[Arc<dyn ForeignKeyAddedConvention>] {
        &self.foreign_key_added
    }

    #[must_use]
    pub fn foreign_key_removed(&self) -> &[Arc<dyn ForeignKeyRemovedConvention>] {
        &self.foreign_key_removed
    }

    #[must_use]
    pub fn model_initializing(&self) -> &[Arc<dyn ModelInitializingConvention>] {
        &self.model_initializing
    }

    /// Handler names registered for `event`, in run order.
    #[must_use]
    pub fn names(&self, event: ConventionEvent) -> Vec<&'static str> {
        match event {
            ConventionEvent::EntityTypeAdded => names_of(&self.entity_type_added),
            ConventionEvent::PropertyAdded => names_of(&self.property_added),
            ConventionEvent::KeyAdded => names_of(&self.key_added),
            ConventionEvent::ForeignKeyAdded => names_of(&self.foreign_key_added),
            ConventionEvent::ForeignKeyRemoved => names_of(&self.foreign_key_removed),
            ConventionEvent::ModelInitializing => names_of(&self.model_initializing),
        }
    }

    #[must_use]
    pub fn len(&self, event: ConventionEvent) -> usize {
        match event {
            ConventionEvent::EntityTypeAdded => self.entity_type_added.len(),
            ConventionEvent::PropertyAdded => self.property_added.len(),
            ConventionEvent::KeyAdded => self.key_added.len(),
            ConventionEvent::ForeignKeyAdded => self.foreign_key_added.len(),
            ConventionEvent::ForeignKeyRemoved => self.foreign_key_removed.len(),
            ConventionEvent::ModelInitializing => self.model_initializing.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        ConventionEvent::ALL.into_iter().all(|event| self.len(event) == 0)
    }
}

impl fmt::Debug for ConventionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for event in ConventionEvent::ALL {
            map.entry(&event.to_string(), &self.names(event));
        }

        map.finish()
    }
}

fn names_of<C: Convention + ?Sized>(conventions: &[Arc<C>]) -> Vec<&'static str> {
    conventions.iter().map(|c| c.name()).collect()
}

///
/// ConventionSetBuilder
///
/// Appends handlers in call order. The only way to populate a set.
///

#[derive(Default)]
#[must_use]
pub struct ConventionSetBuilder {
    set: ConventionSet,
}

impl ConventionSetBuilder {
    pub fn entity_type_added(mut self, convention: Arc<dyn EntityTypeAddedConvention>) -> Self {
        self.set.entity_type_added.push(convention);
        self
    }

    pub fn property_added(mut self, convention: Arc<dyn PropertyAddedConvention>) -> Self {
        self.set.property_added.push(convention);
        self
    }

    pub fn key_added(mut self, convention: Arc<dyn KeyAddedConvention>) -> Self {
        self.set.key_added.push(convention);
        self
    }

    pub fn foreign_key_added(mut self, convention: Arc<dyn ForeignKeyAddedConvention>) -> Self {
        self.set.foreign_key_added.push(convention);
        self
    }

    pub fn foreign_key_removed(mut self, convention: Arc<dyn ForeignKeyRemovedConvention>) -> Self {
        self.set.foreign_key_removed.push(convention);
        self
    }

    pub fn model_initializing(mut self, convention: Arc<dyn ModelInitializingConvention>) -> Self {
        self.set.model_initializing.push(convention);
        self
    }

    #[must_use]
    pub fn build(self) -> ConventionSet {
        self.set
    }
}
