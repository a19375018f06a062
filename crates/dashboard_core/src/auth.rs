//! Sign-in gate. Pages only ever read the session user; the provider behind
//! it is pluggable.

use std::sync::Arc;

use async_trait::async_trait;
use shared::records::SessionUser;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("name must not be empty")]
    EmptyName,
    #[error("no user is signed in")]
    NotSignedIn,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError>;
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError>;
    async fn logout(&self) -> Result<(), AuthError>;
}

/// Accepts any well-formed email with a non-empty password.
#[derive(Debug, Default, Clone)]
pub struct MockAuthProvider;

fn validate_email(email: &str) -> Result<&str, AuthError> {
    let email = email.trim();
    let invalid = || AuthError::InvalidEmail(email.to_string());
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let domain_ok = !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if local.is_empty() || !domain_ok {
        return Err(invalid());
    }
    Ok(local)
}

/// `jane.doe` becomes `Jane Doe`.
fn display_name(local: &str) -> String {
    local
        .split(['.', '_', '-', '+'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let local = validate_email(email)?;
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        Ok(SessionUser {
            name: display_name(local),
            email: email.trim().to_string(),
            avatar_url: None,
        })
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        if name.trim().is_empty() {
            return Err(AuthError::EmptyName);
        }
        let mut user = self.login(email, password).await?;
        user.name = name.trim().to_string();
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(SessionUser),
    SignedOut,
}

pub struct Session {
    provider: Arc<dyn AuthProvider>,
    user: Option<SessionUser>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            provider,
            user: None,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&SessionUser, AuthError> {
        let user = self.provider.login(email, password).await.inspect_err(|err| {
            warn!(error = %err, "sign-in rejected");
        })?;
        Ok(self.establish(user))
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&SessionUser, AuthError> {
        let user = self
            .provider
            .register(name, email, password)
            .await
            .inspect_err(|err| warn!(error = %err, "registration rejected"))?;
        Ok(self.establish(user))
    }

    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        if self.user.is_none() {
            return Err(AuthError::NotSignedIn);
        }
        self.provider.logout().await?;
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "signed out");
        }
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    fn establish(&mut self, user: SessionUser) -> &SessionUser {
        info!(email = %user.email, name = %user.name, "signed in");
        let _ = self.events.send(SessionEvent::SignedIn(user.clone()));
        self.user.insert(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Arc::new(MockAuthProvider))
    }

    #[tokio::test]
    async fn login_derives_name_from_email() {
        let mut session = session();
        let mut events = session.subscribe();
        let user = session
            .sign_in("jane.doe@example.com", "secret")
            .await
            .expect("sign in");
        assert_eq!(user.name, "Jane Doe");
        assert_eq!(user.avatar_url, None);
        assert!(session.is_signed_in());
        assert!(matches!(
            events.recv().await.expect("event"),
            SessionEvent::SignedIn(user) if user.email == "jane.doe@example.com"
        ));
    }

    #[tokio::test]
    async fn login_rejects_malformed_credentials() {
        let mut session = session();
        for email in ["", "nobody", "@example.com", "a@b", "a b@example.com", "a@@b.com"] {
            assert!(
                matches!(
                    session.sign_in(email, "secret").await,
                    Err(AuthError::InvalidEmail(_))
                ),
                "{email}"
            );
        }
        assert_eq!(
            session.sign_in("artist@example.com", "").await.err(),
            Some(AuthError::EmptyPassword)
        );
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn register_keeps_given_name() {
        let mut session = session();
        let user = session
            .register("  DJ Nova ", "nova@example.com", "pw")
            .await
            .expect("register");
        assert_eq!(user.name, "DJ Nova");

        assert_eq!(
            session.register(" ", "nova@example.com", "pw").await.err(),
            Some(AuthError::EmptyName)
        );
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("DJ Nova"));
    }

    #[tokio::test]
    async fn sign_out_clears_user_and_notifies() {
        let mut session = session();
        assert_eq!(session.sign_out().await, Err(AuthError::NotSignedIn));

        session
            .sign_in("artist@example.com", "pw")
            .await
            .expect("sign in");
        let mut events = session.subscribe();
        session.sign_out().await.expect("sign out");
        assert!(!session.is_signed_in());
        assert_eq!(events.recv().await.expect("event"), SessionEvent::SignedOut);
    }
}
