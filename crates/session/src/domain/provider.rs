//! Identity Provider Trait
//!
//! Interface to the external credential-issuing collaborator. Issuance,
//! persistence, and transient-failure retry policy are the provider's
//! concern; the session manager treats any renewal failure as terminal.

use thiserror::Error;

use crate::domain::credential::Credential;

/// Sign-in request forwarded to the identity provider
#[derive(Debug, Clone)]
pub struct SignInRequest {
    /// User name or email
    pub identifier: String,
    /// Provider-defined secret (password, one-time code, ...)
    pub secret: String,
}

/// Error reported by the identity provider
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider rejected the request (bad credentials, revoked session)
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached
    #[error("Provider unreachable: {0}")]
    Network(String),
}

/// Identity provider trait
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Authenticate and obtain a fresh credential
    async fn sign_in(&self, request: SignInRequest) -> Result<Credential, ProviderError>;

    /// Current ambient credential, if any
    async fn current_credential(&self) -> Result<Option<Credential>, ProviderError>;

    /// Renew the current credential
    ///
    /// Network-bound and may fail.
    async fn renew(&self) -> Result<Credential, ProviderError>;

    /// Invalidate the current credential
    ///
    /// Must be a no-op when no credential exists.
    async fn sign_out(&self) -> Result<(), ProviderError>;
}
