use crate::{
    builder::{BuildContext, ModelBuilder},
    convention::{ConventionDispatcher, ConventionEvent, ConventionSet},
    error::{ErrorOrigin, ModelError},
    metadata::Model,
};
use std::sync::Arc;
use tracing::debug;

///
/// ModelSession
///
/// One model-building session: the model under construction and the
/// dispatcher that announces changes to it. Sessions share nothing but the
/// `ConventionSet`.
///

#[derive(Debug)]
pub struct ModelSession {
    model: Model,
    dispatcher: ConventionDispatcher,
}

impl ModelSession {
    /// Start a session and run the model-initializing conventions.
    ///
    /// Initialization has no partial result to hand back, so a veto here is
    /// reported as an error.
    pub fn new(conventions: Arc<ConventionSet>) -> Result<Self, ModelError> {
        let mut session = Self {
            model: Model::new(),
            dispatcher: ConventionDispatcher::new(conventions),
        };

        let initialized = session
            .dispatcher
            .on_model_initializing(ModelBuilder::new(BuildContext::new(
                &mut session.model,
                &session.dispatcher,
            )))?
            .is_some();
        if !initialized {
            return Err(ModelError::vetoed(
                ErrorOrigin::Session,
                "model initialization was vetoed by a convention",
            ));
        }

        debug!(
            model_initializing = session
                .dispatcher
                .conventions()
                .len(ConventionEvent::ModelInitializing),
            "model session initialized"
        );

        Ok(session)
    }

    pub fn builder(&mut self) -> ModelBuilder<'_> {
        ModelBuilder::new(BuildContext::new(&mut self.model, &self.dispatcher))
    }

    #[must_use]
    pub const fn model(&self) -> &Model {
        &self.model
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &ConventionDispatcher {
        &self.dispatcher
    }

    /// End the session and hand back the model.
    #[must_use]
    pub fn finish(self) -> Model {
        self.model
    }
}
