//! Accounts with email OTP verification
//!
//! Flow: `signup` creates an unverified account and sends a six-digit code,
//! `verify_email` confirms it and returns a session, `login` only succeeds
//! for verified accounts. `resend_verification` replaces the pending code.

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, ShelterError};
use crate::models::{new_id, normalize_email, PendingVerification, PublicUser, Role, User};
use crate::notify::OtpNotifier;
use crate::store::UserRepository;
use chrono::Duration;
use petadopt_core::config::AuthConfig;
use petadopt_core::validation::Validator;
use petadopt_crypto::{
    generate_otp, hash_password, sign_token, verify_otp, verify_password, verify_token,
    TokenClaims,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Lifetimes and secrets used by [`AuthService`].
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub otp_ttl: Duration,
    pub token_ttl: Duration,
    pub token_secret: String,
    pub password_rounds: u32,
}

impl From<&AuthConfig> for AuthSettings {
    fn from(config: &AuthConfig) -> Self {
        Self {
            otp_ttl: Duration::minutes(config.otp_ttl_minutes),
            token_ttl: Duration::days(config.token_ttl_days),
            token_secret: config.token_secret.clone(),
            password_rounds: config.password_rounds,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Issued on verification or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: PublicUser,
}

/// Sign-up, verification, and login over a [`UserRepository`].
pub struct AuthService<S, N> {
    store: Arc<S>,
    notifier: N,
    settings: AuthSettings,
    clock: Arc<dyn Clock>,
}

impl<S: UserRepository, N: OtpNotifier> AuthService<S, N> {
    pub fn new(store: Arc<S>, notifier: N, settings: AuthSettings) -> Self {
        Self::with_clock(store, notifier, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<S>,
        notifier: N,
        settings: AuthSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notifier,
            settings,
            clock,
        }
    }

    /// Create an unverified account and send its first code.
    ///
    /// If the code cannot be delivered the account is removed again, so the
    /// same email can retry.
    pub fn signup(&self, request: SignupRequest) -> Result<PublicUser> {
        let email = normalize_email(&request.email);
        let validation = Validator::new()
            .required("name", &request.name)
            .email("email", &email)
            .min_length("password", &request.password, MIN_PASSWORD_LEN)
            .validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let password_hash = hash_password(&request.password, self.settings.password_rounds)?;
        let now = self.clock.now();
        let code = generate_otp()?;
        let user = User {
            id: new_id(),
            name: request.name.trim().to_string(),
            email,
            password_hash,
            role: Role::User,
            created_at: now,
            email_verified: false,
            verification: Some(PendingVerification {
                code: code.clone(),
                expires_at: now + self.settings.otp_ttl,
            }),
        };
        let Some(user) = self.store.insert_user_if_absent(user)? else {
            return Err(ShelterError::Conflict(
                "User with this email already exists".to_string(),
            ));
        };

        if let Err(err) = self.notifier.send_verification(&user, &code) {
            warn!(email = %user.email, error = %err, "Verification delivery failed, rolling back signup");
            self.store.delete_user_by_email(&user.email)?;
            return Err(ShelterError::Delivery(err.to_string()));
        }

        info!(user = %user.id, email = %user.email, "Account created, awaiting verification");
        Ok(user.public())
    }

    /// Confirm the pending code and open a session.
    pub fn verify_email(&self, email: &str, code: &str) -> Result<Session> {
        let validation = Validator::new()
            .required("email", email)
            .required("otp", code)
            .validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let mut user = self.find_by_email(email)?;
        if user.email_verified {
            return Err(ShelterError::AlreadyVerified);
        }

        let pending = user.verification.as_ref().ok_or(ShelterError::InvalidOtp)?;
        if !verify_otp(&pending.code, code) {
            warn!(email = %user.email, "Wrong verification code");
            return Err(ShelterError::InvalidOtp);
        }
        if self.clock.now() > pending.expires_at {
            return Err(ShelterError::OtpExpired);
        }

        user.email_verified = true;
        user.verification = None;
        self.store.update_user(user.clone())?;

        info!(user = %user.id, "Email verified");
        self.session_for(&user)
    }

    /// Replace the pending code and send it again.
    pub fn resend_verification(&self, email: &str) -> Result<()> {
        let validation = Validator::new().required("email", email).validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let mut user = self.find_by_email(email)?;
        if user.email_verified {
            return Err(ShelterError::AlreadyVerified);
        }

        let code = generate_otp()?;
        user.verification = Some(PendingVerification {
            code: code.clone(),
            expires_at: self.clock.now() + self.settings.otp_ttl,
        });
        self.store.update_user(user.clone())?;

        self.notifier
            .send_verification(&user, &code)
            .map_err(|err| ShelterError::Delivery(err.to_string()))?;

        info!(user = %user.id, "Verification code resent");
        Ok(())
    }

    /// Check credentials of a verified account.
    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let validation = Validator::new()
            .required("email", email)
            .required("password", password)
            .validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let email = normalize_email(email);
        let Some(user) = self.store.find_user_by_email(&email)? else {
            warn!(email = %email, "Login for unknown email");
            return Err(ShelterError::InvalidCredentials);
        };
        if !verify_password(password, &user.password_hash)? {
            warn!(email = %email, "Login with wrong password");
            return Err(ShelterError::InvalidCredentials);
        }
        if !user.email_verified {
            return Err(ShelterError::EmailNotVerified);
        }

        info!(user = %user.id, "Logged in");
        self.session_for(&user)
    }

    /// Resolve a session token to its user.
    pub fn authenticate(&self, token: &str) -> Result<PublicUser> {
        let claims = verify_token(
            self.settings.token_secret.as_bytes(),
            token,
            self.clock.now().timestamp(),
        )
        .map_err(ShelterError::InvalidToken)?;

        self.store
            .find_user(&claims.sub)?
            .map(|user| user.public())
            .ok_or_else(|| ShelterError::not_found("User", claims.sub))
    }

    fn find_by_email(&self, email: &str) -> Result<User> {
        let email = normalize_email(email);
        self.store
            .find_user_by_email(&email)?
            .ok_or_else(|| ShelterError::not_found("User", email))
    }

    fn session_for(&self, user: &User) -> Result<Session> {
        let claims = TokenClaims {
            sub: user.id.clone(),
            exp: (self.clock.now() + self.settings.token_ttl).timestamp(),
        };
        Ok(Session {
            token: sign_token(self.settings.token_secret.as_bytes(), &claims)?,
            user: user.public(),
        })
    }
}
