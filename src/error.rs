use thiserror::Error;

/// Errors raised while loading or compiling a crafting domain.
///
/// None of these are produced by the search loop itself: a search that finds
/// no plan returns [`SearchOutcome::Failed`](crate::SearchOutcome::Failed)
/// instead.
#[derive(Error, Debug)]
pub enum CraftError {
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("Malformed recipe '{recipe}': {reason}")]
    MalformedRecipe { recipe: String, reason: String },
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
    #[error("Invalid planner configuration: {0}")]
    InvalidConfig(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CraftError {
    pub(crate) fn malformed(recipe: &str, reason: impl Into<String>) -> Self {
        CraftError::MalformedRecipe {
            recipe: recipe.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CraftError>;
