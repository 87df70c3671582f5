// src/widgets/nav.rs
use crate::types::{Role, User};
use crate::utils::initials;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub route: &'static str,
    /// Highlight only on an exact route match.
    pub exact: bool,
}

const fn item(label: &'static str, icon: &'static str, route: &'static str, exact: bool) -> NavItem {
    NavItem {
        label,
        icon,
        route,
        exact,
    }
}

/// Sidebar entries for a role's namespace.
pub fn nav_items(role: Role) -> Vec<NavItem> {
    match role {
        Role::Seeker => vec![
            item("Dashboard", "fas fa-th-large", "/dashboard/seeker", true),
            item("My Profile", "fas fa-user", "/dashboard/seeker/profile", false),
            item("Find Jobs", "fas fa-search", "/dashboard/seeker/find-jobs", false),
            item("Saved Jobs", "fas fa-bookmark", "/dashboard/seeker/saved-jobs", false),
            item("Applications", "fas fa-briefcase", "/dashboard/seeker/applications", false),
        ],
        Role::Recruiter => vec![
            item("Dashboard", "fas fa-th-large", "/dashboard/recruiter", true),
            item("My Profile", "fas fa-user", "/dashboard/recruiter/profile", false),
            item("My Listings", "fas fa-briefcase", "/dashboard/recruiter/listings", false),
            item("Manage Applicants", "fas fa-users", "/dashboard/recruiter/applicants", false),
        ],
    }
}

impl NavItem {
    pub fn is_active(&self, current_route: &str) -> bool {
        if self.exact {
            current_route == self.route
        } else {
            current_route == self.route || current_route.starts_with(&format!("{}/", self.route))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavbarUser {
    pub name: String,
    pub role_label: &'static str,
    pub avatar: Option<String>,
}

impl NavbarUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            role_label: match user.role {
                Role::Seeker => "Job Seeker",
                Role::Recruiter => "Recruiter",
            },
            avatar: None,
        }
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}
