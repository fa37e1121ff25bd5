use editopia_domain::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("no image loaded")]
    NoImageLoaded,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to write image: {0}")]
    EncodeWrite(String),
}
