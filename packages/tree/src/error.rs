use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Invalid Protypo JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a node or an array of nodes, found {found}")]
    UnexpectedShape { found: &'static str },
}
