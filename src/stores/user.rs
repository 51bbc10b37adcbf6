//! Defines the user store trait.

use email_address::EmailAddress;

use crate::{
    Error,
    auth::{PasswordHash, User, UserID},
};

/// Creates and retrieves users.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateEmail] if the address is already registered.
    fn create(&self, email: EmailAddress, password_hash: PasswordHash) -> Result<User, Error>;

    /// Get a user by their ID, or [Error::NotFound].
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their email, or [Error::NotFound].
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error>;

    /// Replace a user's password hash, or return [Error::NotFound].
    fn set_password(&self, id: UserID, password_hash: PasswordHash) -> Result<(), Error>;
}
