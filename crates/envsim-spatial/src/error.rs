use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpatialError {
    #[error("cannot build a BVH over zero areas")]
    EmptyScene,
}
