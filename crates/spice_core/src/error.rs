//! Error types for the game simulation.

use thiserror::Error;

use crate::store::EntityId;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all game simulation errors.
///
/// The taxonomy is deliberately narrow: systems recover from every
/// condition within the tick that discovers it, so these errors surface
/// only at the API boundary (despawning a stale id, fetching a component
/// an entity never had).
#[derive(Debug, Error)]
pub enum GameError {
    /// Invalid entity reference.
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    /// Entity exists but lacks the requested component.
    #[error("Entity {entity} has no {component} component")]
    ComponentMissing {
        /// The entity that was queried.
        entity: EntityId,
        /// Name of the missing component kind.
        component: &'static str,
    },

    /// Invalid game state.
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}
