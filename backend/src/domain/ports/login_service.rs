//! Driving port for login.
//!
//! Inbound adapters call this port to resolve credentials to an owner id
//! without knowing which identity collaborator sits behind it.

use async_trait::async_trait;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{Error, LoginCredentials, UserId};

/// Owner id issued to the default `admin` account.
pub const DEFAULT_ADMIN_USER_ID: Uuid = Uuid::from_u128(0x123e4567_e89b_12d3_a456_426614174000);

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// A username/password pair mapped to a fixed owner id.
#[derive(Debug, Clone)]
pub struct StaticAccount {
    username: String,
    password: Zeroizing<String>,
    user_id: UserId,
}

impl StaticAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>, user_id: UserId) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
            user_id,
        }
    }
}

/// In-memory authenticator standing in for an external identity provider.
///
/// The default instance knows a single `admin` / `password` account.
///
/// # Examples
/// ```
/// use habit_tracker::domain::UserId;
/// use habit_tracker::domain::ports::{StaticAccount, StaticLoginService};
///
/// let second = UserId::random();
/// let service = StaticLoginService::default()
///     .with_account(StaticAccount::new("guest", "guest", second));
/// assert_eq!(service.accounts(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StaticLoginService {
    accounts: Vec<StaticAccount>,
}

impl Default for StaticLoginService {
    fn default() -> Self {
        Self::new([StaticAccount::new(
            "admin",
            "password",
            UserId::from_uuid(DEFAULT_ADMIN_USER_ID),
        )])
    }
}

impl StaticLoginService {
    pub fn new(accounts: impl IntoIterator<Item = StaticAccount>) -> Self {
        Self {
            accounts: accounts.into_iter().collect(),
        }
    }

    /// Add another account.
    #[must_use]
    pub fn with_account(mut self, account: StaticAccount) -> Self {
        self.accounts.push(account);
        self
    }

    /// Number of known accounts.
    pub fn accounts(&self) -> usize {
        self.accounts.len()
    }
}

#[async_trait]
impl LoginService for StaticLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        self.accounts
            .iter()
            .find(|account| {
                account.username == credentials.username()
                    && account.password.as_str() == credentials.password()
            })
            .map(|account| account.user_id)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
