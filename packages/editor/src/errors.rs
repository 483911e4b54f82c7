//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Persistence error: {0}")]
    Persist(#[from] crate::persist::PersistError),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("A version preview is active; restore or cancel it first")]
    VersionPreviewActive,

    #[error("No version is being previewed")]
    NotPreviewingVersion,

    #[error("The stored page was never loaded; reload or overwrite it")]
    PageNotLoaded,
}
