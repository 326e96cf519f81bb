use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid registry id: {0:?}")]
    InvalidRorId(String),
}
