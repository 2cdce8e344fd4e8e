use loaderkit_model::UnsupportedFrameworkError;
use thiserror::Error;

pub type CodegenResult<T> = Result<T, CodegenError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error(transparent)]
    UnsupportedFramework(#[from] UnsupportedFrameworkError),

    #[error("Cannot generate code for non-finite value in '{field}'")]
    NonFiniteValue { field: String },

    #[error("'{0}' is not a valid component name")]
    InvalidComponentName(String),
}
