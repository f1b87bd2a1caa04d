use crate::models::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },
    #[error("invalid text: {0}")]
    Text(#[from] medcrm_types::TextError),
    #[error("identifier error: {0}")]
    Id(#[from] medcrm_ids::IdError),
}

pub type CrmResult<T> = std::result::Result<T, CrmError>;
