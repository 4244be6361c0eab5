use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidColor(String),
    EmptyId(&'static str),
    DuplicateCategory(String),
    DuplicateSubCategory { category: String, sub_category: String },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidColor(raw) => {
                write!(f, "invalid color '{raw}': expected #RRGGBB")
            }
            ModelError::EmptyId(kind) => write!(f, "{kind} id cannot be empty"),
            ModelError::DuplicateCategory(id) => {
                write!(f, "duplicate category id: {id}")
            }
            ModelError::DuplicateSubCategory {
                category,
                sub_category,
            } => write!(
                f,
                "duplicate sub-category id {sub_category} in category {category}"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
