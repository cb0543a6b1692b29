//! Recording conventions shared by the dispatch and builder tests.

use crate::{
    builder::{EntityTypeBuilder, KeyBuilder, ModelBuilder, PropertyBuilder, RelationshipBuilder},
    convention::{
        Convention, EntityTypeAddedConvention, ForeignKeyAddedConvention,
        ForeignKeyRemovedConvention, KeyAddedConvention, ModelInitializingConvention,
        PropertyAddedConvention,
    },
    error::ModelError,
    metadata::ForeignKey,
};
use std::sync::{Arc, Mutex};

pub(crate) const LABELS: [&str; 8] = ["h0", "h1", "h2", "h3", "h4", "h5", "h6", "h7"];

///
/// Journal
///
/// Shared, ordered record of which handler ran.
///

#[derive(Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<&'static str>>>);

impl Journal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, label: &'static str) {
        self.0.lock().expect("journal lock poisoned").push(label);
    }

    pub(crate) fn entries(&self) -> Vec<&'static str> {
        self.0.lock().expect("journal lock poisoned").clone()
    }
}

///
/// Step
///
/// What a `Recorder` does after recording itself.
///

#[derive(Clone, Copy, Debug)]
pub(crate) enum Step {
    Pass,
    Veto,
    Fail,
    /// Rename the entity type (entity-type-added only; passes elsewhere).
    Rename(&'static str),
    /// Veto entity types whose name starts with `_`.
    VetoUnderscore,
}

///
/// Recorder
///

pub(crate) struct Recorder {
    label: &'static str,
    step: Step,
    journal: Journal,
}

impl Recorder {
    pub(crate) fn new(label: &'static str, step: Step, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            label,
            step,
            journal: journal.clone(),
        })
    }

    pub(crate) fn fault(label: &'static str) -> ModelError {
        ModelError::convention(label, "scripted failure")
    }

    fn run<B>(&self, builder: B) -> Result<Option<B>, ModelError> {
        self.journal.record(self.label);

        match self.step {
            Step::Veto => Ok(None),
            Step::Fail => Err(Self::fault(self.label)),
            Step::Pass | Step::Rename(_) | Step::VetoUnderscore => Ok(Some(builder)),
        }
    }
}

impl Convention for Recorder {
    fn name(&self) -> &'static str {
        self.label
    }
}

impl EntityTypeAddedConvention for Recorder {
    fn apply<'m>(
        &self,
        mut builder: EntityTypeBuilder<'m>,
    ) -> Result<Option<EntityTypeBuilder<'m>>, ModelError> {
        match self.step {
            Step::Rename(name) => builder.rename(name)?,
            Step::VetoUnderscore if builder.name()?.starts_with('_') => {
                self.journal.record(self.label);
                return Ok(None);
            }
            _ => {}
        }

        self.run(builder)
    }
}

impl PropertyAddedConvention for Recorder {
    fn apply<'m>(
        &self,
        builder: PropertyBuilder<'m>,
    ) -> Result<Option<PropertyBuilder<'m>>, ModelError> {
        self.run(builder)
    }
}

impl KeyAddedConvention for Recorder {
    fn apply<'m>(&self, builder: KeyBuilder<'m>) -> Result<Option<KeyBuilder<'m>>, ModelError> {
        self.run(builder)
    }
}

impl ForeignKeyAddedConvention for Recorder {
    fn apply<'m>(
        &self,
        builder: RelationshipBuilder<'m>,
    ) -> Result<Option<RelationshipBuilder<'m>>, ModelError> {
        self.run(builder)
    }
}

impl ForeignKeyRemovedConvention for Recorder {
    fn apply(
        &self,
        _builder: &mut EntityTypeBuilder<'_>,
        _foreign_key: &ForeignKey,
    ) -> Result<(), ModelError> {
        self.journal.record(self.label);

        match self.step {
            Step::Fail => Err(Self::fault(self.label)),
            _ => Ok(()),
        }
    }
}

impl ModelInitializingConvention for Recorder {
    fn apply<'m>(
        &self,
        builder: ModelBuilder<'m>,
    ) -> Result<Option<ModelBuilder<'m>>, ModelError> {
        self.run(builder)
    }
}
