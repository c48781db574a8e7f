//! Session Manager
//!
//! Owns the process-wide ambient credential and the single pending refresh
//! timer. All mutation of that state goes through the operations here; the
//! access gate and the view layer only read via [`ensure_valid_session`].
//!
//! ## Concurrency
//! Renewal is serialized by an in-flight guard: a caller that reaches the
//! guard after another renewal completed returns the fresh credential without
//! issuing a second provider call. A session epoch counter makes sure a
//! renewal that resolves after `clear_session` is discarded rather than
//! resurrecting a signed-out session.
//!
//! [`ensure_valid_session`]: SessionManager::ensure_valid_session

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use host::clock::Clock;
use host::resume::ResumeEvent;
use host::timer::{CancelHandle, spawn_after};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::application::config::SessionConfig;
use crate::domain::credential::Credential;
use crate::domain::provider::{IdentityProvider, SignInRequest};
use crate::domain::status::SessionStatus;
use crate::error::{SessionError, SessionResult};

/// Mutable state owned exclusively by the manager.
#[derive(Default)]
struct SessionState {
    /// Ambient credential mirrored from the identity provider
    credential: Option<Credential>,
    /// The single pending refresh timer, if any
    timer: Option<CancelHandle>,
    /// Identifies the scheduling generation a timer belongs to
    timer_seq: u64,
    /// Bumped whenever local session state is discarded
    epoch: u64,
}

struct Inner<P, C> {
    provider: P,
    clock: C,
    config: SessionConfig,
    state: Mutex<SessionState>,
    /// In-flight renewal guard
    renew_lock: tokio::sync::Mutex<()>,
}

/// Session lifecycle manager
pub struct SessionManager<P, C> {
    inner: Arc<Inner<P, C>>,
}

impl<P, C> Clone for SessionManager<P, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, C> SessionManager<P, C>
where
    P: IdentityProvider + Send + Sync + 'static,
    C: Clock,
{
    pub fn new(provider: P, clock: C, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                clock,
                config,
                state: Mutex::new(SessionState::default()),
                renew_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Access the identity-provider collaborator.
    pub fn provider(&self) -> &P {
        &self.inner.provider
    }

    /// Compute the status of a credential against this manager's clock and
    /// refresh threshold.
    pub fn status(&self, credential: &Credential) -> SessionStatus {
        SessionStatus::of(
            credential,
            self.inner.clock.now_ms(),
            self.inner.config.refresh_threshold,
        )
    }

    /// Monotonic counter identifying the current session generation.
    ///
    /// Bumped on every local discard (sign-out, renewal failure, expiry).
    /// Derived caches keyed on this value die with the credential.
    pub fn session_epoch(&self) -> u64 {
        self.state().epoch
    }

    /// Sign in through the identity provider and start the refresh timer.
    pub async fn sign_in(&self, request: SignInRequest) -> SessionResult<Credential> {
        let credential = self
            .inner
            .provider
            .sign_in(request)
            .await
            .map_err(|e| SessionError::SignInFailed(e.to_string()))?;

        if !self.status(&credential).is_valid {
            return Err(SessionError::Internal(
                "identity provider issued an expired credential".to_string(),
            ));
        }

        self.store_and_schedule(credential.clone());

        tracing::info!(
            subject_id = %credential.subject_id,
            expires_at_ms = credential.expires_at_ms,
            "Signed in"
        );

        Ok(credential)
    }

    /// Return a credential guaranteed valid at the moment of return.
    ///
    /// The single choke point callers use before any authenticated request.
    /// Fails with [`SessionError::NoSession`] when reauthentication is
    /// required; performs a synchronous renewal when the credential is close
    /// to expiry; otherwise (re)starts the refresh timer and returns the
    /// credential unchanged.
    pub async fn ensure_valid_session(&self) -> SessionResult<Credential> {
        let credential = self
            .inner
            .provider
            .current_credential()
            .await
            .map_err(|e| SessionError::Provider(e.to_string()))?;

        let Some(credential) = credential else {
            self.discard_local();
            return Err(SessionError::NoSession);
        };

        let status = self.status(&credential);
        if !status.is_valid {
            self.discard_local();
            return Err(SessionError::NoSession);
        }

        if status.needs_refresh {
            return self.refresh_session().await;
        }

        self.store_and_schedule(credential.clone());
        Ok(credential)
    }

    /// Renew the credential through the identity provider.
    ///
    /// Success stores the new credential and reschedules the refresh timer
    /// relative to the new expiry. Failure discards all local state and is
    /// terminal for the session.
    pub async fn refresh_session(&self) -> SessionResult<Credential> {
        let epoch = self.session_epoch();
        let _guard = self.inner.renew_lock.lock().await;

        // Another caller may have completed a renewal while we waited.
        {
            let state = self.state();
            if state.epoch != epoch {
                return Err(SessionError::NoSession);
            }
            if let Some(credential) = &state.credential {
                let status = SessionStatus::of(
                    credential,
                    self.inner.clock.now_ms(),
                    self.inner.config.refresh_threshold,
                );
                if status.is_valid && !status.needs_refresh {
                    return Ok(credential.clone());
                }
            }
        }

        match self.inner.provider.renew().await {
            Ok(credential) => {
                {
                    let state = self.state();
                    if state.epoch != epoch {
                        // Session was cleared while the renewal was in flight.
                        tracing::warn!("Discarding stale renewal result");
                        return Err(SessionError::NoSession);
                    }
                }
                self.store_and_schedule(credential.clone());
                tracing::info!(
                    subject_id = %credential.subject_id,
                    expires_at_ms = credential.expires_at_ms,
                    "Session renewed"
                );
                Ok(credential)
            }
            Err(e) => {
                self.discard_local();
                tracing::warn!(error = %e, "Session renewal failed");
                Err(SessionError::RefreshFailed(e.to_string()))
            }
        }
    }

    /// Cancel the refresh timer, sign out from the provider, and discard all
    /// local state. Safe to call when no session exists.
    pub async fn clear_session(&self) -> SessionResult<()> {
        self.discard_local();

        self.inner
            .provider
            .sign_out()
            .await
            .map_err(|e| SessionError::Provider(e.to_string()))?;

        tracing::info!("Signed out");
        Ok(())
    }

    /// Lightweight revalidation for visibility/focus resume triggers.
    ///
    /// Returns `false` (clearing the session) when the credential is gone or
    /// expired; renews when close to expiry; otherwise `true`.
    pub async fn check_session_validity(&self) -> bool {
        let credential = match self.inner.provider.current_credential().await {
            Ok(Some(credential)) => credential,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read current credential");
                return false;
            }
        };

        let status = self.status(&credential);
        if !status.is_valid {
            if let Err(e) = self.clear_session().await {
                e.log();
            }
            return false;
        }

        if status.needs_refresh {
            return self.refresh_session().await.is_ok();
        }

        true
    }

    /// Revalidate the session whenever the application returns to the
    /// foreground. Suspended execution contexts do not fire timers reliably;
    /// this is the compensating control.
    pub fn spawn_resume_listener(
        &self,
        mut events: UnboundedReceiver<ResumeEvent>,
    ) -> CancelHandle {
        let weak = Arc::downgrade(&self.inner);
        CancelHandle::new(tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let manager = SessionManager { inner };
                let valid = manager.check_session_validity().await;
                tracing::debug!(event = ?event, valid, "Revalidated session on resume");
            }
        }))
    }

    /// Store the credential and (re)schedule its refresh timer.
    ///
    /// Replacing the stored handle aborts any previously pending timer, so at
    /// most one is ever pending.
    fn store_and_schedule(&self, credential: Credential) {
        let delay = self.refresh_delay(&credential);
        let mut state = self.state();
        state.credential = Some(credential);
        state.timer_seq += 1;
        let timer = self.spawn_refresh_timer(delay, state.epoch, state.timer_seq);
        state.timer = Some(timer);
    }

    /// `max(remaining - refresh_threshold, min_refresh_delay)`
    fn refresh_delay(&self, credential: &Credential) -> Duration {
        let remaining_ms = credential.remaining_ms(self.inner.clock.now_ms()).max(0) as u64;
        let threshold_ms = self.inner.config.refresh_threshold.as_millis() as u64;
        Duration::from_millis(remaining_ms.saturating_sub(threshold_ms))
            .max(self.inner.config.min_refresh_delay)
    }

    fn spawn_refresh_timer(&self, delay: Duration, epoch: u64, seq: u64) -> CancelHandle {
        let weak = Arc::downgrade(&self.inner);
        spawn_after(delay, async move {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let manager = SessionManager { inner };

            {
                let mut state = manager.state();
                if state.epoch != epoch || state.timer_seq != seq {
                    return;
                }
                // This task is the pending timer and has fired; release its
                // own handle without scheduling its own abort.
                if let Some(handle) = state.timer.take() {
                    handle.disarm();
                }
            }

            if let Err(e) = manager.refresh_session().await {
                tracing::warn!(error = %e, "Scheduled renewal failed, clearing session");
                if let Err(e) = manager.clear_session().await {
                    e.log();
                }
            }
        })
    }

    /// Drop the credential, cancel the timer, and bump the session epoch.
    fn discard_local(&self) {
        let mut state = self.state();
        state.credential = None;
        state.epoch += 1;
        if let Some(timer) = state.timer.take() {
            timer.cancel();
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().expect("session state lock poisoned")
    }
}
