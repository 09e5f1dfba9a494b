use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::{Store, StoreError};
use crate::dto::user_dto::{CreateUserPayload, LoginPayload, UpdateUserPayload};
use crate::error::{Entity, Error, Result};
use crate::models::user::{NewUser, User, UserChanges};
use crate::utils::crypto::{hash_password_blocking, verify_password_blocking};
use crate::utils::token::TokenIssuer;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
    tokens: TokenIssuer,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn email_taken(err: StoreError) -> Error {
    match err {
        StoreError::UniqueViolation(_) => Error::Conflict("Email already registered".to_string()),
        other => Error::Store(other),
    }
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub async fn create_user(&self, payload: CreateUserPayload) -> Result<User> {
        payload.validate()?;
        let email = normalize_email(&payload.email);
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(Error::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password_blocking(payload.password).await?;
        let user = self
            .store
            .insert_user(NewUser {
                name: payload.name.trim().to_string(),
                email,
                password_hash,
                phone: payload.phone,
            })
            .await
            .map_err(email_taken)?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Checks credentials and issues a session token for the user.
    pub async fn login(&self, payload: LoginPayload) -> Result<(User, String)> {
        payload.validate()?;
        let email = normalize_email(&payload.email);
        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or(Error::Reference(Entity::User))?;

        if !verify_password_blocking(payload.password, user.password_hash.clone()).await? {
            tracing::info!(user_id = %user.id, "login rejected");
            return Err(Error::InvalidPassword);
        }

        let token = self.tokens.issue(user.id, &user.email, user.role)?;
        tracing::info!(user_id = %user.id, "login succeeded");
        Ok((user, token))
    }

    pub async fn update_user(
        &self,
        id: Uuid,
        caller_id: Uuid,
        payload: UpdateUserPayload,
    ) -> Result<User> {
        payload.validate()?;
        if self.store.find_user(id).await?.is_none() {
            return Err(Error::NotFound(Entity::User));
        }
        if id != caller_id {
            return Err(Error::Forbidden(
                "You can only update your own account".to_string(),
            ));
        }

        let password_hash = match payload.password {
            Some(plain) => Some(hash_password_blocking(plain).await?),
            None => None,
        };
        let changes = UserChanges {
            name: payload.name.map(|n| n.trim().to_string()),
            email: payload.email.as_deref().map(normalize_email),
            password_hash,
            phone: payload.phone,
        };

        let user = self
            .store
            .update_user(id, changes)
            .await
            .map_err(email_taken)?
            .ok_or(Error::NotFound(Entity::User))?;

        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }
}
