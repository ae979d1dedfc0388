//! Screen routes and the permission policy.
//!
//! Routes are the names the navigation presentation layer mounts. The
//! permission policy is a pure function of `(Route, AuthState)`: anonymous
//! users see the welcome/account screens, authenticated users see their
//! role's home and its sub-screens, and nothing is navigable before the
//! first provider notification.

use crate::auth_state::AuthState;
use aula_core::Role;
use serde::{Deserialize, Serialize};

/// A navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Landing screen with login/sign-up entry points.
    Welcome,
    /// Credential entry.
    Login,
    /// Account creation.
    SignUp,
    /// Password-reset request.
    ForgotPassword,
    /// Institutional information, reachable while anonymous.
    AboutUs,
    /// Tutor home: enrolled students overview.
    TutorHome,
    /// Staff home: management entry points.
    StaffHome,
    /// Staff: student roster management.
    ManageStudents,
    /// Staff: tutor management.
    ManageTutors,
    /// Staff: enroll a student into a grade with open seats.
    AddStudent,
    /// Account profile of the signed-in user.
    UserProfile,
}

impl Route {
    /// The route name the presentation layer mounts.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Login => "Login",
            Self::SignUp => "SignUp",
            Self::ForgotPassword => "ForgotPassword",
            Self::AboutUs => "AboutUs",
            Self::TutorHome => "TutorHome",
            Self::StaffHome => "StaffHome",
            Self::ManageStudents => "ManageStudents",
            Self::ManageTutors => "ManageTutors",
            Self::AddStudent => "AddStudent",
            Self::UserProfile => "UserProfile",
        }
    }

    /// The home route for a role.
    #[must_use]
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Tutor => Self::TutorHome,
            Role::Staff => Self::StaffHome,
        }
    }

    /// Returns true if the route belongs to the anonymous graph.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(
            self,
            Self::Welcome | Self::Login | Self::SignUp | Self::ForgotPassword | Self::AboutUs
        )
    }

    /// Permission of this route under `state`.
    ///
    /// Nothing is permitted while the state is still `Unknown`: the
    /// presentation layer must not mount a navigator before the router is
    /// ready.
    #[must_use]
    pub fn permission(self, state: &AuthState) -> RoutePermission {
        let permitted = match state {
            AuthState::Unknown => false,
            AuthState::Anonymous => self.is_anonymous(),
            AuthState::Authenticated { .. } => !self.is_anonymous(),
        };
        if permitted {
            RoutePermission::Permitted
        } else {
            RoutePermission::NotPermitted
        }
    }

    /// Default back-gesture setting for this route.
    ///
    /// Gestures stay disabled on every account flow and management screen
    /// so the router's explicit transitions remain the only path; only the
    /// landing screen and the homes keep the platform default.
    #[must_use]
    pub fn gesture_default(&self) -> bool {
        matches!(self, Self::Welcome | Self::TutorHome | Self::StaffHome)
    }

    /// Fixed fallback for hardware/software back navigation.
    ///
    /// Back from an account flow always lands on a fixed earlier screen
    /// instead of popping the stack, so it can never return into a stale
    /// authenticated screen after logout. Routes without a mapping return
    /// `None`.
    #[must_use]
    pub fn back_fallback(&self) -> Option<Route> {
        match self {
            Self::Login => Some(Self::Welcome),
            Self::SignUp | Self::ForgotPassword => Some(Self::Login),
            Self::AboutUs => Some(Self::Welcome),
            Self::ManageStudents | Self::ManageTutors => Some(Self::StaffHome),
            Self::AddStudent => Some(Self::ManageStudents),
            Self::Welcome
            | Self::TutorHome
            | Self::StaffHome
            | Self::UserProfile => None,
        }
    }
}

/// Outcome of a route permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePermission {
    /// The route is navigable under the current state.
    Permitted,
    /// The route is not navigable under the current state.
    NotPermitted,
}

impl RoutePermission {
    /// Returns true for `Permitted`.
    #[must_use]
    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted)
    }
}

/// Back-stack semantics of a route change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Preserve the current route on the back-stack.
    Push,
    /// Discard the current route from the back-stack.
    Replace,
}

/// Pass-through navigation options for a route change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    /// Back-stack semantics.
    pub mode: TransitionMode,
    /// Whether the swipe/hardware-back gesture stays enabled on the
    /// target screen.
    pub gesture_enabled: bool,
}

impl RouteOptions {
    /// Push onto the back-stack with the target's default gesture setting.
    #[must_use]
    pub fn push_to(route: Route) -> Self {
        Self {
            mode: TransitionMode::Push,
            gesture_enabled: route.gesture_default(),
        }
    }

    /// Replace the current route with the target's default gesture
    /// setting.
    #[must_use]
    pub fn replace_with(route: Route) -> Self {
        Self {
            mode: TransitionMode::Replace,
            gesture_enabled: route.gesture_default(),
        }
    }
}

/// A validated route change, delivered to the navigation presentation
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEvent {
    /// The target screen.
    pub route: Route,
    /// Back-stack semantics.
    pub mode: TransitionMode,
    /// Back-gesture setting for the target screen.
    pub gesture_enabled: bool,
}

/// The navigation root decision.
///
/// `Undecided` is returned until the provider has reported once; callers
/// must treat it as "do not render a navigator yet" rather than mounting
/// a default screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialRoute {
    /// No notification delivered yet.
    Undecided,
    /// The route to mount as the navigation root.
    Decided(Route),
}

impl InitialRoute {
    /// Returns true before the first provider notification.
    #[must_use]
    pub fn is_undecided(&self) -> bool {
        matches!(self, Self::Undecided)
    }

    /// The decided route, if any.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Undecided => None,
            Self::Decided(route) => Some(*route),
        }
    }
}
