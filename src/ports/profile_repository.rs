//! ProfileRepository port for coaching profile persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::UserProfile;

/// Repository for user profiles, one per user.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a new profile.
    ///
    /// # Errors
    ///
    /// - `ProfileAlreadyExists` if the user already has one
    /// - `DatabaseError` on persistence failure
    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError>;

    /// Replace an existing profile.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` if the user has no profile
    async fn update(&self, profile: &UserProfile) -> Result<(), DomainError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    async fn exists_for_user(&self, user_id: &UserId) -> Result<bool, DomainError>;

    /// Remove the profile. Returns false when there was none.
    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
