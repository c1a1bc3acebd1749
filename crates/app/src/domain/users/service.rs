//! Users service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::users::{
        data::{Credentials, NewUser},
        errors::UsersServiceError,
        password::{hash_password, verify_password},
        records::{Identity, IssuedSession, Role, SessionUuid, UserRecord, UserUuid},
        repository::{NewSession, PgUsersRepository},
        token::{
            SessionTokenVersion, format_session_token, generate_session_secret,
            parse_session_token, session_verifier,
        },
    },
    validation::normalise_email,
};

/// Lifetime of a bearer token when none is configured.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    session_ttl: SignedDuration,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            session_ttl,
        }
    }

    async fn insert_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUser,
        role: Role,
    ) -> Result<UserRecord, UsersServiceError> {
        let user = user.validated()?;
        let password_hash = hash_password(&user.password)?;

        let created = self
            .repository
            .create_user(tx, user.uuid, &user.name, &user.email, &password_hash, role)
            .await
            .map_err(UsersServiceError::from);

        if matches!(created, Err(UsersServiceError::AlreadyExists)) {
            warn!(email = %user.email, "signup rejected: email already registered");
        }

        created
    }

    async fn issue_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserRecord,
    ) -> Result<IssuedSession, UsersServiceError> {
        let session = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session, version, &secret);
        let token_hash = session_verifier(session, version, user.uuid, &secret);

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(UsersServiceError::SessionExpiry)?;

        let record = self
            .repository
            .create_session(
                tx,
                &NewSession {
                    uuid: session,
                    user: user.uuid,
                    version,
                    token_hash: &token_hash,
                    expires_at,
                },
            )
            .await?;

        Ok(IssuedSession {
            token,
            expires_at: record.expires_at,
            user,
        })
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn signup(&self, user: NewUser) -> Result<IssuedSession, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.insert_user(&mut tx, user, Role::User).await?;
        let session = self.issue_session(&mut tx, created).await?;

        tx.commit().await?;

        info!(user = %session.user.uuid, "user signed up");

        Ok(session)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, UsersServiceError> {
        let email =
            normalise_email(&credentials.email).ok_or(UsersServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let Some(stored) = self.repository.find_user_by_email(&mut tx, &email).await? else {
            return Err(UsersServiceError::InvalidCredentials);
        };

        if !verify_password(&credentials.password, &stored.password_hash)? {
            warn!(user = %stored.user.uuid, "login rejected: wrong password");

            return Err(UsersServiceError::InvalidCredentials);
        }

        let session = self.issue_session(&mut tx, stored.user).await?;

        tx.commit().await?;

        info!(user = %session.user.uuid, "user logged in");

        Ok(session)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, UsersServiceError> {
        let parsed = parse_session_token(bearer_token)?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, parsed.session, parsed.version)
            .await?
            .ok_or(UsersServiceError::InvalidCredential)?;

        let expected = session_verifier(
            parsed.session,
            parsed.version,
            session.user_uuid,
            &parsed.secret,
        );

        if session.version != parsed.version
            || !constant_time_eq(expected.as_bytes(), session.token_hash.as_bytes())
            || session.expires_at <= Timestamp::now()
        {
            return Err(UsersServiceError::InvalidCredential);
        }

        // Best-effort metadata update; authentication does not depend on it.
        let _touched = self.repository.touch_session(&mut tx, parsed.session).await;

        tx.commit().await?;

        Ok(Identity {
            user: session.user_uuid,
            role: session.role,
        })
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_user(&self, user: NewUser, role: Role) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.insert_user(&mut tx, user, role).await?;

        tx.commit().await?;

        info!(user = %created.uuid, role = %created.role, "user created");

        Ok(created)
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |acc, (l, r)| acc | (l ^ r))
            == 0
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a regular user and issue their first bearer token.
    async fn signup(&self, user: NewUser) -> Result<IssuedSession, UsersServiceError>;

    /// Exchange an email and password for a bearer token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, UsersServiceError>;

    /// Resolve a bearer token to the identity it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Identity, UsersServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Create a user with an explicit role, without issuing a token.
    async fn create_user(&self, user: NewUser, role: Role) -> Result<UserRecord, UsersServiceError>;
}
