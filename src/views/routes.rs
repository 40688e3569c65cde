//! Route table
//!
//! Every page path the client knows, with the access each one needs.

use std::fmt;

/// Who may open a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Any signed-in user
    AuthRequired,
    /// Signed in, and the record must belong to them
    OwnerRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
    AddPrompt,
    EditPrompt(String),
    PublicPrompt(String),
    Login,
    Signup,
    Account,
    Settings,
    Playground,
    Stats,
    Billing,
}

impl Route {
    /// Parse a path. Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Self::Home,
            ["dashboard"] => Self::Dashboard,
            ["add"] => Self::AddPrompt,
            ["edit", id] => Self::EditPrompt((*id).to_string()),
            ["public", id] => Self::PublicPrompt((*id).to_string()),
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["account"] => Self::Account,
            ["settings"] => Self::Settings,
            ["playground"] => Self::Playground,
            ["stats"] => Self::Stats,
            ["billing"] => Self::Billing,
            _ => return None,
        };
        Some(route)
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Home
            | Self::PublicPrompt(_)
            | Self::Login
            | Self::Signup
            | Self::Playground
            | Self::Billing => Access::Public,
            Self::EditPrompt(_) => Access::OwnerRequired,
            Self::Dashboard | Self::AddPrompt | Self::Account | Self::Settings | Self::Stats => {
                Access::AuthRequired
            }
        }
    }

    /// Where to send a visitor, given whether they are signed in.
    /// Ownership is checked when the page loads its record.
    pub fn guard(self, signed_in: bool) -> Self {
        match self.access() {
            Access::Public => self,
            Access::AuthRequired | Access::OwnerRequired if signed_in => self,
            _ => Self::Login,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Dashboard => write!(f, "/dashboard"),
            Self::AddPrompt => write!(f, "/add"),
            Self::EditPrompt(id) => write!(f, "/edit/{}", id),
            Self::PublicPrompt(id) => write!(f, "/public/{}", id),
            Self::Login => write!(f, "/login"),
            Self::Signup => write!(f, "/signup"),
            Self::Account => write!(f, "/account"),
            Self::Settings => write!(f, "/settings"),
            Self::Playground => write!(f, "/playground"),
            Self::Stats => write!(f, "/stats"),
            Self::Billing => write!(f, "/billing"),
        }
    }
}
