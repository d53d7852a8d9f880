use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] authos_gate_service::error::ServiceError),

    #[error(transparent)]
    CoreError(#[from] authos_gate_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
