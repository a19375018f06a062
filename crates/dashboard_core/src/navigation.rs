//! Routes, the auth guard and the sidebar/header shell around the pages.

use std::fmt;

use serde::Serialize;
use shared::records::SessionUser;
use tracing::debug;

use crate::auth::{AuthError, Session};

pub const DEFAULT_AVATAR_URL: &str = "https://images.pexels.com/photos/4974915/pexels-photo-4974915.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Upload,
    Status,
    Revenue,
    Profile,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Upload,
        Route::Status,
        Route::Revenue,
        Route::Profile,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
            Route::Upload => "/upload",
            Route::Status => "/status",
            Route::Revenue => "/revenue",
            Route::Profile => "/profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Register => "Create Account",
            Route::Dashboard => "Dashboard",
            Route::Upload => "Upload",
            Route::Status => "Release Status",
            Route::Revenue => "Revenue",
            Route::Profile => "Profile",
        }
    }

    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Exact match, ignoring a trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        Route::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Where a request for `self` actually lands.
    pub fn guard(self, signed_in: bool) -> Route {
        match (self.is_protected(), signed_in) {
            (true, false) => Route::Login,
            (false, true) => Route::Dashboard,
            _ => self,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarItem {
    Link(Route),
    Settings,
    Logout,
}

impl SidebarItem {
    pub fn label(self) -> &'static str {
        match self {
            SidebarItem::Link(route) => route.title(),
            SidebarItem::Settings => "Settings",
            SidebarItem::Logout => "Logout",
        }
    }
}

pub const SIDEBAR: [SidebarItem; 7] = [
    SidebarItem::Link(Route::Dashboard),
    SidebarItem::Link(Route::Upload),
    SidebarItem::Link(Route::Status),
    SidebarItem::Link(Route::Revenue),
    SidebarItem::Link(Route::Profile),
    SidebarItem::Settings,
    SidebarItem::Logout,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub name: String,
    pub role: &'static str,
    pub avatar_url: String,
}

impl HeaderView {
    pub fn for_user(user: Option<&SessionUser>) -> Self {
        Self {
            name: user.map(|u| u.name.clone()).unwrap_or_default(),
            role: "Artist",
            avatar_url: user
                .and_then(|u| u.avatar_url.clone())
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
        }
    }
}

/// Layout state: the current route and whether the mobile sidebar is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    route: Route,
    sidebar_open: bool,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            route: Route::Login,
            sidebar_open: false,
        }
    }
}

impl Shell {
    pub fn route(&self) -> Route {
        self.route
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn open_sidebar(&mut self) {
        self.sidebar_open = true;
    }

    /// Close button or backdrop click.
    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn navigate(&mut self, requested: Route, session: &Session) -> Route {
        let landed = requested.guard(session.is_signed_in());
        if landed != requested {
            debug!(requested = %requested, landed = %landed, "route redirected");
        }
        self.route = landed;
        self.sidebar_open = false;
        landed
    }

    /// `None` for paths that match no route; the current route is kept.
    pub fn navigate_path(&mut self, path: &str, session: &Session) -> Option<Route> {
        let route = Route::from_path(path)?;
        Some(self.navigate(route, session))
    }

    /// Settings and Logout both end the session.
    pub async fn activate(
        &mut self,
        item: SidebarItem,
        session: &mut Session,
    ) -> Result<Route, AuthError> {
        match item {
            SidebarItem::Link(route) => Ok(self.navigate(route, session)),
            SidebarItem::Settings | SidebarItem::Logout => {
                session.sign_out().await?;
                Ok(self.navigate(Route::Login, session))
            }
        }
    }

    pub fn header(&self, session: &Session) -> HeaderView {
        HeaderView::for_user(session.user())
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
