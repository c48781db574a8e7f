//! Authorize Use Case
//!
//! Decides, per protected-view render, whether the current user may see the
//! view. One gate instance corresponds to one view mount: the fallback role
//! lookup is cached for the mount only and never across sign-in/sign-out
//! cycles or subjects.

use std::sync::{Arc, Mutex};

use host::clock::Clock;
use serde::Serialize;
use session::SessionManager;
use session::models::{Credential, SubjectId, format_remaining};
use session::provider::IdentityProvider;

use crate::domain::platform::Platform;
use crate::domain::profile::ProfileStore;
use crate::domain::role::EffectiveRole;

/// What the view requires of the gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizeRequest {
    /// Exact role the view requires, if any.
    ///
    /// When set, the platform allow-list is not consulted.
    pub required_role: Option<EffectiveRole>,
    /// Opt out of platform gating for views open to every surface.
    pub skip_platform_check: bool,
}

impl AuthorizeRequest {
    /// Any authenticated user the platform allows.
    pub fn any() -> Self {
        Self::default()
    }

    /// Require an exact role.
    pub fn role(required: EffectiveRole) -> Self {
        Self {
            required_role: Some(required),
            skip_platform_check: false,
        }
    }

    pub fn without_platform_check(mut self) -> Self {
        self.skip_platform_check = true;
        self
    }
}

/// Outcome of one render pass.
///
/// `Checking` is the initial state a view holds while [`AccessGate::authorize`]
/// is pending; the gate itself only ever resolves to one of the other four.
/// Every state is terminal for the render pass; only a fresh mount
/// ([`AccessGate::remount`]) returns to `Checking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GateDecision {
    /// Authorization is still being computed; render a loading state.
    Checking,
    /// No valid session; redirect to sign-in.
    Unauthenticated,
    /// The resolved role is not allowed on this surface.
    PlatformDenied { role: EffectiveRole },
    /// The view requires a specific role the user does not hold.
    RoleDenied {
        required: EffectiveRole,
        resolved: EffectiveRole,
    },
    /// All checks passed; render the protected content.
    Authorized { role: EffectiveRole },
}

impl GateDecision {
    /// The only state in which protected content may render.
    pub const fn is_authorized(&self) -> bool {
        matches!(self, GateDecision::Authorized { .. })
    }
}

/// Read-only session diagnostic for support/debug surfaces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub subject_id: String,
    pub role: EffectiveRole,
    pub expires_at_ms: i64,
    /// Human-readable remaining lifetime
    pub remaining: String,
}

struct CachedRole {
    epoch: u64,
    subject_id: SubjectId,
    role: EffectiveRole,
}

/// Access gate for one protected-view mount.
pub struct AccessGate<P, C, S> {
    sessions: SessionManager<P, C>,
    profiles: Arc<S>,
    platform: Platform,
    /// Fallback lookup result, valid for this mount and session epoch only
    role_cache: Mutex<Option<CachedRole>>,
}

impl<P, C, S> AccessGate<P, C, S>
where
    P: IdentityProvider + Send + Sync + 'static,
    C: Clock,
    S: ProfileStore + Send + Sync,
{
    pub fn new(sessions: SessionManager<P, C>, profiles: Arc<S>, platform: Platform) -> Self {
        Self {
            sessions,
            profiles,
            platform,
            role_cache: Mutex::new(None),
        }
    }

    /// Compute the gate decision for this render pass.
    ///
    /// Never renders protected content on a failure path: session errors
    /// resolve to `Unauthenticated`, unresolvable roles fail closed through
    /// the allow-list.
    pub async fn authorize(&self, request: AuthorizeRequest) -> GateDecision {
        let credential = match self.sessions.ensure_valid_session().await {
            Ok(credential) => credential,
            Err(e) => {
                e.log();
                return GateDecision::Unauthenticated;
            }
        };

        let resolved = self.resolve_effective_role(&credential).await;

        if let Some(required) = request.required_role {
            if resolved != required {
                return GateDecision::RoleDenied { required, resolved };
            }
            return GateDecision::Authorized { role: resolved };
        }

        if !request.skip_platform_check && !self.platform.allows(resolved) {
            return GateDecision::PlatformDenied { role: resolved };
        }

        GateDecision::Authorized { role: resolved }
    }

    /// Resolve the effective role for a credential.
    ///
    /// Claims are the primary source and never trigger an external call.
    /// Otherwise exactly one profile lookup runs per mount; its result is
    /// cached for the mount and dies with the session epoch. Lookup failure
    /// resolves to `Unknown`, never to an error.
    pub async fn resolve_effective_role(&self, credential: &Credential) -> EffectiveRole {
        if let Some(role) = credential.role_claim().and_then(EffectiveRole::from_code) {
            return role;
        }

        let epoch = self.sessions.session_epoch();
        if let Some(role) = self.cached_role(epoch, &credential.subject_id) {
            return role;
        }

        let role = match self.profiles.lookup_role(&credential.subject_id).await {
            Ok(Some(code)) => EffectiveRole::from_code(&code).unwrap_or_else(|| {
                tracing::warn!(
                    subject_id = %credential.subject_id,
                    code = %code,
                    "Unrecognized role code from profile store"
                );
                EffectiveRole::Unknown
            }),
            Ok(None) => EffectiveRole::Unknown,
            Err(e) => {
                tracing::warn!(
                    subject_id = %credential.subject_id,
                    error = %e,
                    "Profile lookup failed, treating role as unknown"
                );
                EffectiveRole::Unknown
            }
        };

        *self.cache() = Some(CachedRole {
            epoch,
            subject_id: credential.subject_id.clone(),
            role,
        });
        role
    }

    /// Forget the mount-local role cache; the next render starts from
    /// `Checking` again.
    pub fn remount(&self) {
        *self.cache() = None;
    }

    /// Read-only diagnostic: subject, role, expiry, remaining lifetime.
    pub async fn session_info(&self) -> Option<SessionInfo> {
        let credential = self.sessions.ensure_valid_session().await.ok()?;
        let role = self.resolve_effective_role(&credential).await;
        let status = self.sessions.status(&credential);

        Some(SessionInfo {
            subject_id: credential.subject_id.to_string(),
            role,
            expires_at_ms: credential.expires_at_ms,
            remaining: format_remaining(status.remaining),
        })
    }

    fn cached_role(&self, epoch: u64, subject_id: &SubjectId) -> Option<EffectiveRole> {
        let cache = self.cache();
        cache
            .as_ref()
            .filter(|entry| entry.epoch == epoch && &entry.subject_id == subject_id)
            .map(|entry| entry.role)
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Option<CachedRole>> {
        self.role_cache.lock().expect("role cache lock poisoned")
    }
}
