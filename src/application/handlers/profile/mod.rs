//! Profile command and query handlers.

mod create_profile;
mod delete_profile;
mod get_profile;
mod update_profile;

pub use create_profile::{CreateProfileCommand, CreateProfileHandler};
pub use delete_profile::DeleteProfileHandler;
pub use get_profile::GetProfileHandler;
pub(crate) use get_profile::load_profile;
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
