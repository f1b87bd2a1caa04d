use medcrm_core::CrmError;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{target} not mounted.")]
    NotMounted { target: &'static str },
    #[error("{target} is busy handling another call.")]
    Busy { target: &'static str },
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CrmError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ToolResult<T> = std::result::Result<T, ToolError>;
