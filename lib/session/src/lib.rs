//! Session routing for the aula-movil school portal client.
//!
//! This crate provides:
//! - The session router (`SessionRouter`), the single source of truth for
//!   which screen the user may see at any point in time
//! - The authentication state machine (`AuthState`)
//! - The identity provider contract (`IdentityProvider`) and its
//!   notification subscription
//! - The navigation policy (`Route`, permissions, back fallbacks)
//! - The remembered-login preference store contract (`PreferenceStore`)
//!
//! # Single source of truth
//!
//! Screens never poll the identity provider. One injected router instance
//! owns the one provider subscription, folds notifications into an
//! [`AuthState`] in delivery order, and answers every routing question
//! from that value alone.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use aula_session::{
//!     InMemoryPreferences, Navigator, RouteEvent, SessionRouter,
//! };
//! # fn wire(
//! #     provider: Arc<dyn aula_session::IdentityProvider>,
//! #     roles: Arc<dyn aula_session::RoleSource>,
//! # ) {
//! struct StackNavigator;
//!
//! impl Navigator for StackNavigator {
//!     fn navigate(&self, event: RouteEvent) {
//!         // hand the event to the navigation container
//!         let _ = event;
//!     }
//! }
//!
//! let router = SessionRouter::new(
//!     provider,
//!     Arc::new(StackNavigator),
//!     roles,
//!     Arc::new(InMemoryPreferences::new()),
//! );
//! router.initialize();
//!
//! // Render nothing until the router is ready, then mount the resolved
//! // initial route.
//! let initial = router.resolve_initial_route();
//! # let _ = initial;
//! # }
//! ```

pub mod auth_state;
pub mod error;
pub mod provider;
pub mod remembered;
pub mod route;
pub mod router;

// Re-export main types at crate root
pub use auth_state::{AuthChange, AuthSignal, AuthState};
pub use error::RouterError;
pub use provider::{
    AuthCallback, AuthError, IdentityProvider, NewAccount, ProviderSubscription,
};
pub use remembered::{InMemoryPreferences, PreferenceError, PreferenceStore};
pub use route::{
    InitialRoute, Route, RouteEvent, RouteOptions, RoutePermission, TransitionMode,
};
pub use router::{ListenerId, Navigator, RoleLookupError, RoleSource, SessionRouter};
