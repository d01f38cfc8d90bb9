use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("user not found")]
    NotFound,

    /// `field` names the request body field; path arguments carry `None`.
    #[error("{}required field is empty", field_prefix(.field))]
    EmptyField { field: Option<&'static str> },

    #[error("invalid email format")]
    InvalidEmail,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

fn field_prefix(field: &Option<&'static str>) -> String {
    field.map(|name| format!("{name}: ")).unwrap_or_default()
}
