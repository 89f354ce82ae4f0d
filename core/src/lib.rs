#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod error;
pub mod models;
pub mod pager;

// Re-export commonly used types
pub use error::FetchError;
pub use models::{Ad, AdPage, NewAd, UserProfile, AD_PAGE_SIZES, CATEGORIES};
pub use pager::{FetchRequest, PageData, Pager};
