use crate::scene::EntityId;

pub type FitResult<T> = Result<T, FitError>;

/// Reasons a camera fit is refused. The camera is left untouched in every case.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("camera fit requested with an empty selection")]
    EmptySelection,

    #[error("no visible entities to frame")]
    NoVisibleEntities,

    #[error("entity {0:?} is not part of the scene")]
    MissingEntity(EntityId),
}
