//! Account sign-up and login. Delegates storage to AccountStore.
//!
//! Secrets are stored as hex SHA-256 over a per-account random salt followed by the secret.

use crate::domain::{Account, AccountId, DomainError};
use crate::ports::AccountStore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const MIN_SECRET_LEN: usize = 3;

pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Trimmed, lowercased email. Must look like an address.
    fn normalize_email(email: &str) -> Result<String, DomainError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(DomainError::Validation("email is required".to_string()));
        }
        let valid = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && !domain.is_empty())
            .unwrap_or(false);
        if !valid {
            return Err(DomainError::Validation("email is not valid".to_string()));
        }
        Ok(email)
    }

    fn hash_secret(salt: &str, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Create an account.
    ///
    /// # Errors
    /// `Validation` for a bad email or a secret shorter than 3 characters,
    /// `DuplicateEmail` if the email is taken.
    pub async fn create_account(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<AccountId, DomainError> {
        let email = Self::normalize_email(email)?;
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(DomainError::Validation(format!(
                "password must be at least {MIN_SECRET_LEN} characters"
            )));
        }

        let salt = Uuid::new_v4().simple().to_string();
        let account = Account {
            id: AccountId(Uuid::new_v4().to_string()),
            secret_hash: Self::hash_secret(&salt, secret),
            salt,
            email,
            created_at: chrono::Utc::now().timestamp(),
        };
        self.store.insert_account(&account).await?;
        info!(account_id = %account.id, "account created");
        Ok(account.id)
    }

    /// Check credentials. Unknown email and wrong secret are indistinguishable.
    pub async fn authenticate(&self, email: &str, secret: &str) -> Result<AccountId, DomainError> {
        let email = Self::normalize_email(email).map_err(|_| DomainError::InvalidCredentials)?;
        let account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;
        if Self::hash_secret(&account.salt, secret) != account.secret_hash {
            return Err(DomainError::InvalidCredentials);
        }
        info!(account_id = %account.id, "login succeeded");
        Ok(account.id)
    }
}
