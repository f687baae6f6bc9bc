//! Domain entities for the user management system.

pub mod account;
pub mod token;
pub mod user;
pub mod user_metadata;

pub use account::Account;
pub use token::{Claims, TokenPurpose};
pub use user::User;
pub use user_metadata::UserMetadata;
