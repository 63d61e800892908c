//! Error types for shop and library operations

use std::fmt;

/// Upload form problems, reported one field at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    MissingVideo,
    InvalidPrice,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "Enter a movie title"),
            ValidationError::MissingVideo => write!(f, "Choose a video file"),
            ValidationError::InvalidPrice => write!(f, "Price must be at least 1 coin"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every recoverable failure of the shop. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    InsufficientFunds { shortfall: u32 },
    AlreadyPurchased,
    UnknownMovie(u64),
    NotOwned,
    Validation(ValidationError),
    InvalidFileType(String),
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::InsufficientFunds { shortfall } => {
                write!(f, "You need {} more coins", shortfall)
            }
            ShopError::AlreadyPurchased => write!(f, "You already own this movie"),
            ShopError::UnknownMovie(id) => write!(f, "No movie with id {}", id),
            ShopError::NotOwned => write!(f, "Buy the movie before watching it"),
            ShopError::Validation(e) => write!(f, "{}", e),
            ShopError::InvalidFileType(_) => write!(f, "Please choose a video file"),
        }
    }
}

impl std::error::Error for ShopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShopError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ShopError {
    fn from(e: ValidationError) -> Self {
        ShopError::Validation(e)
    }
}

impl ShopError {
    /// Toast title for this failure
    pub fn title(&self) -> &'static str {
        match self {
            ShopError::InsufficientFunds { .. } => "❌ Not enough coins",
            ShopError::AlreadyPurchased => "ℹ Already purchased",
            _ => "❌ Error",
        }
    }
}
