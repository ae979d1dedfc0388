//! The session router.
//!
//! Single source of truth for "what can the user see right now". One
//! router instance is constructed at application start and injected into
//! every screen; it owns the single subscription to the identity
//! provider's auth-state notifications, folds them into an [`AuthState`]
//! in delivery order, and mediates every navigation request against the
//! permission policy.
//!
//! Screens read state through the router (listeners,
//! `resolve_initial_route`, `route_permission`) and never query the
//! provider directly, so there is exactly one writer and many readers of
//! the authentication state.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::auth_state::{AuthSignal, AuthState};
use crate::error::RouterError;
use crate::provider::{AuthError, IdentityProvider};
use crate::remembered::{PreferenceError, PreferenceStore};
use crate::route::{InitialRoute, Route, RouteEvent, RouteOptions, RoutePermission};
use async_trait::async_trait;
use aula_core::{Role, UserId};
use tracing::{debug, warn};

/// Sink receiving validated route-change events.
///
/// Implemented by the navigation presentation layer. The router only ever
/// calls it with transitions permitted by the current state.
pub trait Navigator: Send + Sync {
    /// Applies a route change on the next render cycle.
    fn navigate(&self, event: RouteEvent);
}

/// Error from a role lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleLookupError {
    /// The reason the lookup failed.
    pub reason: String,
}

impl fmt::Display for RoleLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role lookup failed: {}", self.reason)
    }
}

impl std::error::Error for RoleLookupError {}

/// Role-resolution hook, consulted at most once per authentication
/// transition.
///
/// The backend decides where roles live (a profile record here); the
/// router only sees this trait, so a backend that encodes role
/// differently swaps the implementation without touching the router
/// contract.
#[async_trait]
pub trait RoleSource: Send + Sync {
    /// Resolves the role stored for `user_id`; `None` when the account
    /// carries no explicit role.
    async fn role_for(&self, user_id: &UserId) -> Result<Option<Role>, RoleLookupError>;
}

/// Handle identifying a registered state listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type StateListener = Box<dyn Fn(&AuthState) + Send + Sync>;

/// Mutable router state, guarded by a single mutex.
struct RouterState {
    auth: AuthState,
    /// Set on the first transition out of `Unknown`; never cleared.
    ready: bool,
    /// Role cached for the lifetime of the current `Authenticated` state.
    role: Option<Role>,
    /// Counts applied transitions; a role lookup result is discarded if
    /// the epoch moved while the lookup was in flight.
    epoch: u64,
    /// Last notification-delivery failure reported by the provider.
    last_provider_error: Option<AuthError>,
}

struct Listeners {
    next_id: u64,
    by_id: HashMap<u64, StateListener>,
}

/// The provider subscription plus the client-side delivery fence.
struct ActiveSubscription {
    /// Checked inside the forwarding callback; cleared synchronously by
    /// `dispose` so a notification already queued at that point is
    /// dropped instead of applied.
    live: Arc<AtomicBool>,
    handle: crate::provider::ProviderSubscription,
}

struct RouterInner {
    state: Mutex<RouterState>,
    /// Also serializes `apply` so listeners observe transitions in
    /// delivery order.
    listeners: Mutex<Listeners>,
    subscription: Mutex<Option<ActiveSubscription>>,
}

impl RouterInner {
    /// Folds one provider signal into the state.
    ///
    /// Pure state transition: no navigation happens here. Listeners are
    /// notified synchronously, under the same ordering as delivery, and
    /// must not register or unregister from within their callback.
    fn apply(&self, signal: AuthSignal) {
        let listeners = self.listeners.lock().unwrap();
        match signal {
            AuthSignal::Changed(change) => {
                let snapshot = {
                    let mut state = self.state.lock().unwrap();
                    state.auth = change.into_state();
                    state.ready = true;
                    state.role = None;
                    state.epoch += 1;
                    state.auth.clone()
                };
                debug!(state = snapshot.describe(), "auth state changed");
                for listener in listeners.by_id.values() {
                    listener(&snapshot);
                }
            }
            AuthSignal::Unavailable(error) => {
                warn!(
                    error = %error,
                    "auth notification unavailable; keeping last known state"
                );
                self.state.lock().unwrap().last_provider_error = Some(error);
            }
        }
    }
}

/// The session router.
///
/// Cheap to clone; all clones share one state. Construct once at
/// application start, call [`initialize`](Self::initialize), and pair it
/// with [`dispose`](Self::dispose) on teardown.
#[derive(Clone)]
pub struct SessionRouter {
    inner: Arc<RouterInner>,
    provider: Arc<dyn IdentityProvider>,
    navigator: Arc<dyn Navigator>,
    roles: Arc<dyn RoleSource>,
    preferences: Arc<dyn PreferenceStore>,
}

impl SessionRouter {
    /// Creates a router over the injected collaborators.
    ///
    /// The router starts in `Unknown` and stays there until
    /// [`initialize`](Self::initialize) registers the provider
    /// subscription and the first notification arrives.
    #[must_use]
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
        roles: Arc<dyn RoleSource>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            inner: Arc::new(RouterInner {
                state: Mutex::new(RouterState {
                    auth: AuthState::Unknown,
                    ready: false,
                    role: None,
                    epoch: 0,
                    last_provider_error: None,
                }),
                listeners: Mutex::new(Listeners {
                    next_id: 0,
                    by_id: HashMap::new(),
                }),
                subscription: Mutex::new(None),
            }),
            provider,
            navigator,
            roles,
            preferences,
        }
    }

    /// Registers the single provider subscription.
    ///
    /// Idempotent: a second call while a subscription is active is a
    /// no-op, so re-running an application setup path cannot create a
    /// duplicate subscription.
    pub fn initialize(&self) {
        let mut slot = self.inner.subscription.lock().unwrap();
        if slot.is_some() {
            debug!("session router already initialized");
            return;
        }

        let live = Arc::new(AtomicBool::new(true));
        let fence = Arc::clone(&live);
        let weak: Weak<RouterInner> = Arc::downgrade(&self.inner);
        let handle = self.provider.subscribe_auth_state(Box::new(move |signal| {
            // The fence is checked here, not at the provider, so a
            // notification already queued when dispose() ran is dropped
            // rather than applied.
            if !fence.load(Ordering::SeqCst) {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                inner.apply(signal);
            }
        }));

        *slot = Some(ActiveSubscription { live, handle });
        debug!("session router initialized");
    }

    /// Unsubscribes from the provider and fences further delivery.
    ///
    /// Synchronous: once this returns, no notification produces an
    /// observable state change, including one already in flight. The
    /// current `AuthState` value is left as-is.
    pub fn dispose(&self) {
        let taken = self.inner.subscription.lock().unwrap().take();
        if let Some(mut subscription) = taken {
            subscription.live.store(false, Ordering::SeqCst);
            subscription.handle.cancel();
            debug!("session router disposed");
        }
    }

    /// Returns true while a provider subscription is registered.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.subscription.lock().unwrap().is_some()
    }

    /// The current authentication state.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.inner.state.lock().unwrap().auth.clone()
    }

    /// True once the provider has reported at least once. Never reverts.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.state.lock().unwrap().ready
    }

    /// The signed-in user's ID, if any.
    #[must_use]
    pub fn current_user_id(&self) -> Option<UserId> {
        self.inner.state.lock().unwrap().auth.user_id().cloned()
    }

    /// The last notification-delivery failure, if any.
    #[must_use]
    pub fn last_provider_error(&self) -> Option<AuthError> {
        self.inner.state.lock().unwrap().last_provider_error.clone()
    }

    /// Permission of `route` under the current state.
    #[must_use]
    pub fn route_permission(&self, route: Route) -> RoutePermission {
        route.permission(&self.auth_state())
    }

    /// Registers a state-change listener.
    ///
    /// The listener runs synchronously on every applied transition, in
    /// delivery order, and must not register or unregister listeners from
    /// within the callback.
    pub fn subscribe_state(
        &self,
        listener: impl Fn(&AuthState) + Send + Sync + 'static,
    ) -> ListenerId {
        let mut listeners = self.inner.listeners.lock().unwrap();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.by_id.insert(id, Box::new(listener));
        ListenerId(id)
    }

    /// Removes a previously registered listener.
    pub fn unsubscribe_state(&self, id: ListenerId) {
        self.inner.listeners.lock().unwrap().by_id.remove(&id.0);
    }

    /// Resolves the route to mount as the navigation root.
    ///
    /// Returns the undecided sentinel until the first notification has
    /// been applied; afterwards `Welcome` while anonymous, or the home
    /// route of the cached role while authenticated. When the role lookup
    /// has not completed yet this answers the tutor home; prefer
    /// [`resolve_home_route`](Self::resolve_home_route) where an await is
    /// possible.
    #[must_use]
    pub fn resolve_initial_route(&self) -> InitialRoute {
        let state = self.inner.state.lock().unwrap();
        if !state.ready {
            return InitialRoute::Undecided;
        }
        match &state.auth {
            AuthState::Authenticated { .. } => {
                InitialRoute::Decided(Route::home_for(state.role.unwrap_or_default()))
            }
            _ => InitialRoute::Decided(Route::Welcome),
        }
    }

    /// Resolves the home route, consulting the role hook when needed.
    ///
    /// The lookup runs at most once per authentication transition; the
    /// resolved role is cached for the lifetime of that `Authenticated`
    /// state. A failed lookup answers the tutor home without caching, so
    /// the next call retries.
    pub async fn resolve_home_route(&self) -> InitialRoute {
        let (ready, user_id, cached_role, epoch) = {
            let state = self.inner.state.lock().unwrap();
            (
                state.ready,
                state.auth.user_id().cloned(),
                state.role,
                state.epoch,
            )
        };

        if !ready {
            return InitialRoute::Undecided;
        }
        let Some(user_id) = user_id else {
            return InitialRoute::Decided(Route::Welcome);
        };
        if let Some(role) = cached_role {
            return InitialRoute::Decided(Route::home_for(role));
        }

        let role = match self.roles.role_for(&user_id).await {
            Ok(stored) => {
                let role = stored.unwrap_or_default();
                let mut state = self.inner.state.lock().unwrap();
                // Discard the result if the state moved while the lookup
                // was in flight; the next transition gets its own lookup.
                if state.epoch == epoch {
                    state.role = Some(role);
                }
                role
            }
            Err(error) => {
                warn!(user_id = %user_id, error = %error, "role lookup failed");
                Role::default()
            }
        };

        InitialRoute::Decided(Route::home_for(role))
    }

    /// Requests a navigation to `route`.
    ///
    /// Validates the target against the current state. A rejected request
    /// is a programming-contract violation by the caller: it is logged and
    /// returned as [`RouterError::NotPermitted`], and the navigator is not
    /// called.
    pub fn request_route_change(
        &self,
        route: Route,
        options: RouteOptions,
    ) -> Result<(), RouterError> {
        let state = self.auth_state();
        if !route.permission(&state).is_permitted() {
            warn!(
                route = route.name(),
                state = state.describe(),
                "navigation not permitted"
            );
            return Err(RouterError::NotPermitted { route, state });
        }

        debug!(route = route.name(), "route change");
        self.navigator.navigate(RouteEvent {
            route,
            mode: options.mode,
            gesture_enabled: options.gesture_enabled,
        });
        Ok(())
    }

    /// Handles hardware/software back from `from`.
    ///
    /// Applies the fixed fallback mapping with replace semantics, so back
    /// can never pop into a stale screen from a previous session. Returns
    /// the route navigated to, or `Ok(None)` when `from` has no mapping
    /// and the platform default should apply.
    pub fn request_back(&self, from: Route) -> Result<Option<Route>, RouterError> {
        let Some(target) = from.back_fallback() else {
            return Ok(None);
        };
        self.request_route_change(target, RouteOptions::replace_with(target))?;
        Ok(Some(target))
    }

    /// Ends the current session at the provider.
    ///
    /// On success nothing is written locally: the provider's `SignedOut`
    /// notification drives the transition, preserving the single source
    /// of truth. On failure the state is unchanged and the user may
    /// retry.
    pub async fn sign_out(&self) -> Result<(), RouterError> {
        self.provider
            .sign_out()
            .await
            .map_err(|source| RouterError::AuthOperationFailed { source })?;
        debug!("sign-out accepted; awaiting provider notification");
        Ok(())
    }

    /// Returns the remembered login identifier, if one was stored.
    pub async fn remembered_identifier(&self) -> Result<Option<String>, PreferenceError> {
        self.preferences.remembered_identifier().await
    }

    /// Stores or clears the remembered login identifier.
    pub async fn set_remembered_identifier(
        &self,
        value: Option<&str>,
    ) -> Result<(), PreferenceError> {
        self.preferences.set_remembered_identifier(value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth_state::AuthChange;
    use crate::provider::{AuthCallback, NewAccount, ProviderSubscription};
    use crate::remembered::InMemoryPreferences;
    use crate::route::TransitionMode;
    use std::sync::atomic::AtomicU64;

    /// Scripted identity provider: notifications are emitted by the test.
    struct FakeProvider {
        callbacks: Arc<Mutex<Vec<(u64, AuthCallback)>>>,
        next_id: AtomicU64,
        subscribe_calls: AtomicU64,
        sign_out_calls: AtomicU64,
        fail_sign_out: AtomicBool,
        /// When false, the returned unsubscribe handle leaks the callback
        /// at the provider, so delivery after dispose() exercises the
        /// router's own fence.
        honor_unsubscribe: bool,
    }

    impl FakeProvider {
        fn new() -> Self {
            Self {
                callbacks: Arc::new(Mutex::new(Vec::new())),
                next_id: AtomicU64::new(0),
                subscribe_calls: AtomicU64::new(0),
                sign_out_calls: AtomicU64::new(0),
                fail_sign_out: AtomicBool::new(false),
                honor_unsubscribe: true,
            }
        }

        fn leaky() -> Self {
            Self {
                honor_unsubscribe: false,
                ..Self::new()
            }
        }

        fn emit(&self, signal: AuthSignal) {
            for (_, callback) in self.callbacks.lock().unwrap().iter() {
                callback(signal.clone());
            }
        }

        fn signed_in(&self, user: &str) {
            self.emit(AuthSignal::Changed(AuthChange::SignedIn {
                user_id: user.into(),
            }));
        }

        fn signed_out(&self) {
            self.emit(AuthSignal::Changed(AuthChange::SignedOut));
        }

        fn subscriber_count(&self) -> usize {
            self.callbacks.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        async fn sign_in(&self, _identifier: &str, _secret: &str) -> Result<UserId, AuthError> {
            Ok("u_test".into())
        }

        async fn sign_up(
            &self,
            _identifier: &str,
            _secret: &str,
            _account: NewAccount,
        ) -> Result<UserId, AuthError> {
            Ok("u_test".into())
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_sign_out.load(Ordering::SeqCst) {
                Err(AuthError::NetworkUnavailable)
            } else {
                Ok(())
            }
        }

        async fn request_password_reset(&self, _identifier: &str) -> Result<(), AuthError> {
            Ok(())
        }

        fn subscribe_auth_state(&self, callback: AuthCallback) -> ProviderSubscription {
            self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            self.callbacks.lock().unwrap().push((id, callback));

            if self.honor_unsubscribe {
                let callbacks = Arc::clone(&self.callbacks);
                ProviderSubscription::new(move || {
                    callbacks.lock().unwrap().retain(|(cb_id, _)| *cb_id != id);
                })
            } else {
                ProviderSubscription::new(|| {})
            }
        }
    }

    /// Navigator recording every event it receives.
    #[derive(Default)]
    struct RecordingNavigator {
        events: Mutex<Vec<RouteEvent>>,
    }

    impl RecordingNavigator {
        fn events(&self) -> Vec<RouteEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, event: RouteEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    /// Role source answering a fixed role, counting lookups.
    struct StaticRoles {
        role: Option<Role>,
        fail: bool,
        calls: AtomicU64,
    }

    impl StaticRoles {
        fn of(role: Option<Role>) -> Self {
            Self {
                role,
                fail: false,
                calls: AtomicU64::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                role: None,
                fail: true,
                calls: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl RoleSource for StaticRoles {
        async fn role_for(&self, _user_id: &UserId) -> Result<Option<Role>, RoleLookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(RoleLookupError {
                    reason: "profile store unreachable".to_string(),
                })
            } else {
                Ok(self.role)
            }
        }
    }

    struct Harness {
        provider: Arc<FakeProvider>,
        navigator: Arc<RecordingNavigator>,
        roles: Arc<StaticRoles>,
        router: SessionRouter,
    }

    fn harness_with(provider: FakeProvider, roles: StaticRoles) -> Harness {
        let provider = Arc::new(provider);
        let navigator = Arc::new(RecordingNavigator::default());
        let roles = Arc::new(roles);
        let router = SessionRouter::new(
            Arc::clone(&provider) as Arc<dyn IdentityProvider>,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
            Arc::clone(&roles) as Arc<dyn RoleSource>,
            Arc::new(InMemoryPreferences::new()),
        );
        Harness {
            provider,
            navigator,
            roles,
            router,
        }
    }

    fn harness() -> Harness {
        harness_with(FakeProvider::new(), StaticRoles::of(None))
    }

    #[test]
    fn starts_unknown_and_undecided() {
        let h = harness();

        assert_eq!(h.router.auth_state(), AuthState::Unknown);
        assert!(!h.router.is_ready());
        assert!(h.router.resolve_initial_route().is_undecided());
    }

    #[test]
    fn initialize_registers_exactly_one_subscription() {
        let h = harness();

        h.router.initialize();
        h.router.initialize();

        assert!(h.router.is_initialized());
        assert_eq!(h.provider.subscribe_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.provider.subscriber_count(), 1);
    }

    #[test]
    fn first_anonymous_notification_decides_welcome() {
        let h = harness();
        h.router.initialize();

        h.provider.signed_out();

        assert!(h.router.is_ready());
        assert_eq!(h.router.auth_state(), AuthState::Anonymous);
        assert_eq!(
            h.router.resolve_initial_route().route(),
            Some(Route::Welcome)
        );
    }

    #[test]
    fn ready_never_reverts_to_undecided() {
        let h = harness();
        h.router.initialize();

        h.provider.signed_in("u1");
        h.provider.signed_out();
        h.provider.signed_in("u2");

        assert!(h.router.is_ready());
        assert!(!h.router.resolve_initial_route().is_undecided());
    }

    #[test]
    fn notifications_apply_in_delivery_order_without_coalescing() {
        let h = harness();
        h.router.initialize();

        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        h.router.subscribe_state(move |state| {
            sink.lock().unwrap().push(state.clone());
        });

        h.provider.signed_in("u1");
        h.provider.signed_out();
        h.provider.signed_in("u1");

        let observed = observed.lock().unwrap();
        assert_eq!(
            *observed,
            vec![
                AuthState::Authenticated {
                    user_id: "u1".into()
                },
                AuthState::Anonymous,
                AuthState::Authenticated {
                    user_id: "u1".into()
                },
            ]
        );
    }

    #[test]
    fn unsubscribed_listener_stops_observing() {
        let h = harness();
        h.router.initialize();

        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        let id = h.router.subscribe_state(move |state| {
            sink.lock().unwrap().push(state.clone());
        });

        h.provider.signed_out();
        h.router.unsubscribe_state(id);
        h.provider.signed_in("u1");

        assert_eq!(observed.lock().unwrap().len(), 1);
    }

    #[test]
    fn home_not_permitted_while_anonymous() {
        let h = harness();
        h.router.initialize();
        h.provider.signed_out();

        let result =
            h.router
                .request_route_change(Route::TutorHome, RouteOptions::push_to(Route::TutorHome));

        assert!(matches!(
            result,
            Err(RouterError::NotPermitted {
                route: Route::TutorHome,
                state: AuthState::Anonymous,
            })
        ));
        assert!(h.navigator.events().is_empty());
    }

    #[test]
    fn permitted_route_change_reaches_navigator() {
        let h = harness();
        h.router.initialize();
        h.provider.signed_out();

        h.router
            .request_route_change(Route::Login, RouteOptions::replace_with(Route::Login))
            .expect("login is permitted while anonymous");

        let events = h.navigator.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].route, Route::Login);
        assert_eq!(events[0].mode, TransitionMode::Replace);
        assert!(!events[0].gesture_enabled);
    }

    #[test]
    fn back_follows_fixed_fallbacks() {
        let h = harness();
        h.router.initialize();
        h.provider.signed_out();

        let target = h.router.request_back(Route::ForgotPassword).unwrap();
        assert_eq!(target, Some(Route::Login));

        let target = h.router.request_back(Route::Welcome).unwrap();
        assert_eq!(target, None);

        let events = h.navigator.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].route, Route::Login);
        assert_eq!(events[0].mode, TransitionMode::Replace);
    }

    #[test]
    fn dispose_fences_notifications_already_in_flight() {
        // The leaky provider never removes the callback, standing in for
        // a notification queued before the unsubscribe took effect.
        let h = harness_with(FakeProvider::leaky(), StaticRoles::of(None));
        h.router.initialize();
        h.provider.signed_out();

        h.router.dispose();
        h.provider.signed_in("u1");

        assert!(!h.router.is_initialized());
        assert_eq!(h.router.auth_state(), AuthState::Anonymous);
    }

    #[test]
    fn dispose_then_initialize_resubscribes() {
        let h = harness();
        h.router.initialize();
        h.router.dispose();
        assert_eq!(h.provider.subscriber_count(), 0);

        h.router.initialize();
        assert_eq!(h.provider.subscribe_calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.provider.subscriber_count(), 1);

        h.provider.signed_out();
        assert!(h.router.is_ready());
    }

    #[test]
    fn unavailable_signal_keeps_last_known_state() {
        let h = harness();
        h.router.initialize();
        h.provider.signed_in("u1");

        h.provider
            .emit(AuthSignal::Unavailable(AuthError::NetworkUnavailable));

        assert_eq!(
            h.router.auth_state(),
            AuthState::Authenticated {
                user_id: "u1".into()
            }
        );
        assert_eq!(
            h.router.last_provider_error(),
            Some(AuthError::NetworkUnavailable)
        );
    }

    #[test]
    fn unavailable_signal_before_first_change_stays_unready() {
        let h = harness();
        h.router.initialize();

        h.provider
            .emit(AuthSignal::Unavailable(AuthError::NetworkUnavailable));

        assert!(!h.router.is_ready());
        assert!(h.router.resolve_initial_route().is_undecided());
    }

    #[tokio::test]
    async fn sign_out_failure_leaves_state_unchanged() {
        let h = harness();
        h.router.initialize();
        h.provider.signed_in("u1");
        h.provider.fail_sign_out.store(true, Ordering::SeqCst);

        let result = h.router.sign_out().await;

        assert!(matches!(
            result,
            Err(RouterError::AuthOperationFailed {
                source: AuthError::NetworkUnavailable
            })
        ));
        assert_eq!(
            h.router.auth_state(),
            AuthState::Authenticated {
                user_id: "u1".into()
            }
        );
    }

    #[tokio::test]
    async fn sign_out_success_waits_for_the_notification() {
        let h = harness();
        h.router.initialize();
        h.provider.signed_in("u1");

        h.router.sign_out().await.expect("sign-out accepted");

        // No local write: still authenticated until the provider reports.
        assert_eq!(h.provider.sign_out_calls.load(Ordering::SeqCst), 1);
        assert!(h.router.auth_state().is_authenticated());

        h.provider.signed_out();
        assert_eq!(h.router.auth_state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn staff_role_resolves_staff_home() {
        let h = harness_with(FakeProvider::new(), StaticRoles::of(Some(Role::Staff)));
        h.router.initialize();
        h.provider.signed_in("u_staff");

        let initial = h.router.resolve_home_route().await;
        assert_eq!(initial.route(), Some(Route::StaffHome));

        // Cached for the lifetime of this authenticated state.
        assert_eq!(
            h.router.resolve_initial_route().route(),
            Some(Route::StaffHome)
        );
    }

    #[tokio::test]
    async fn role_lookup_runs_once_per_authentication_transition() {
        let h = harness_with(FakeProvider::new(), StaticRoles::of(Some(Role::Staff)));
        h.router.initialize();
        h.provider.signed_in("u1");

        h.router.resolve_home_route().await;
        h.router.resolve_home_route().await;
        assert_eq!(h.roles.calls.load(Ordering::SeqCst), 1);

        // Re-login invalidates the cache.
        h.provider.signed_out();
        h.provider.signed_in("u1");
        h.router.resolve_home_route().await;
        assert_eq!(h.roles.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_role_defaults_to_tutor_home() {
        let h = harness();
        h.router.initialize();
        h.provider.signed_in("u1");

        let initial = h.router.resolve_home_route().await;
        assert_eq!(initial.route(), Some(Route::TutorHome));
    }

    #[tokio::test]
    async fn failed_role_lookup_defaults_without_caching() {
        let h = harness_with(FakeProvider::new(), StaticRoles::failing());
        h.router.initialize();
        h.provider.signed_in("u1");

        let initial = h.router.resolve_home_route().await;
        assert_eq!(initial.route(), Some(Route::TutorHome));

        // Not cached: the next call retries the lookup.
        h.router.resolve_home_route().await;
        assert_eq!(h.roles.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn remembered_identifier_round_trips_through_router() {
        let h = harness();

        h.router
            .set_remembered_identifier(Some("tutor@escuela.edu.mx"))
            .await
            .unwrap();
        assert_eq!(
            h.router.remembered_identifier().await.unwrap().as_deref(),
            Some("tutor@escuela.edu.mx")
        );

        h.router.set_remembered_identifier(None).await.unwrap();
        assert_eq!(h.router.remembered_identifier().await.unwrap(), None);
    }

    /// The full scenario from the routing contract: anonymous start,
    /// login, external sign-out.
    #[test]
    fn login_logout_scenario() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("aula_session=debug")
            .with_test_writer()
            .try_init();

        let h = harness();
        h.router.initialize();

        h.provider.signed_out();
        assert_eq!(
            h.router.resolve_initial_route().route(),
            Some(Route::Welcome)
        );

        h.provider.signed_in("u1");
        assert_eq!(
            h.router.resolve_initial_route().route(),
            Some(Route::TutorHome)
        );
        assert_eq!(h.router.current_user_id(), Some("u1".into()));

        // External sign-out (another device, session expiry).
        h.provider.signed_out();
        assert_eq!(
            h.router.resolve_initial_route().route(),
            Some(Route::Welcome)
        );
        let result = h
            .router
            .request_route_change(Route::TutorHome, RouteOptions::push_to(Route::TutorHome));
        assert!(matches!(result, Err(RouterError::NotPermitted { .. })));
        assert!(h.navigator.events().is_empty());
    }
}
