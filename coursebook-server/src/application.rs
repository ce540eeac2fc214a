mod commands;
mod queries;

use std::error::Error as StdError;

use coursebook::{BoxDynError, Settings, ValidationErrors};

/// Represents all the ways an application operation can fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No record has the requested id.
    #[error("not found")]
    NotFound,
    /// The request carried invalid data.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The store failed to serve the request.
    #[error("course store failure: {0}")]
    Store(#[source] BoxDynError),
}

#[derive(Clone)]
pub struct Application<S> {
    store: S,
    settings: Settings,
}

impl<S> Application<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

fn store_error<E>(err: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    tracing::error!(error = %err, "course store failure");
    Error::Store(Box::new(err))
}
