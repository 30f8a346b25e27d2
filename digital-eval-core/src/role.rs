//! User roles and role-based access checks.
//!
//! The portal has five fixed roles. Every protected area of the front-end is
//! reachable by a subset of them; [`authorize`] applies the same rule the
//! route guards do: no user means "log in first", a user with the wrong role
//! means "forbidden".

use crate::errors::CoreError;
use crate::user::CurrentUser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried in the access token and user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Uploads answer scripts.
    Examiner,
    /// Scores assigned scripts.
    Evaluator,
    /// Approves evaluation requests and releases results.
    Authority,
    /// Looks up released results.
    Student,
    /// Controls backend services.
    Admin,
}

impl Role {
    /// All roles, in menu order.
    pub const ALL: [Role; 5] = [
        Role::Examiner,
        Role::Evaluator,
        Role::Authority,
        Role::Student,
        Role::Admin,
    ];

    /// Wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Examiner => "examiner",
            Role::Evaluator => "evaluator",
            Role::Authority => "authority",
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }

    /// Landing route for a signed-in user of this role.
    #[must_use]
    pub fn dashboard(&self) -> &'static str {
        match self {
            Role::Examiner => "/examiner/dashboard",
            Role::Evaluator => "/evaluator/dashboard",
            Role::Authority => "/authority/dashboard",
            Role::Student => "/student/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

/// Outcome of a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The user may enter.
    Granted,
    /// Nobody is signed in; send the user to login.
    Unauthenticated,
    /// Signed in, but the role is not allowed here.
    Forbidden,
}

impl Access {
    /// Whether access was granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }

    /// Where the host should send the user instead, if anywhere.
    #[must_use]
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            Access::Granted => None,
            Access::Unauthenticated => Some("/login"),
            Access::Forbidden => Some("/unauthorized"),
        }
    }
}

/// Check whether `user` may enter an area open to `allowed` roles.
#[must_use]
pub fn authorize(user: Option<&CurrentUser>, allowed: &[Role]) -> Access {
    match user {
        None => Access::Unauthenticated,
        Some(u) if allowed.contains(&u.role) => Access::Granted,
        Some(_) => Access::Forbidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            id: Some(7),
            user_id: "someone".into(),
            name: None,
            email: None,
            role,
        }
    }

    #[rstest]
    #[case("examiner", Role::Examiner)]
    #[case("Evaluator", Role::Evaluator)]
    #[case(" authority ", Role::Authority)]
    #[case("student", Role::Student)]
    #[case("ADMIN", Role::Admin)]
    fn test_parse_role(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_role() {
        let err = "janitor".parse::<Role>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownRole(r) if r == "janitor"));
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Authority).unwrap();
        assert_eq!(json, "\"authority\"");
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_authorize_without_user() {
        let access = authorize(None, &Role::ALL);
        assert_eq!(access, Access::Unauthenticated);
        assert_eq!(access.redirect(), Some("/login"));
    }

    #[test]
    fn test_authorize_role_allowed() {
        let u = user(Role::Evaluator);
        let access = authorize(Some(&u), &[Role::Evaluator, Role::Authority]);
        assert!(access.is_granted());
        assert_eq!(access.redirect(), None);
    }

    #[test]
    fn test_authorize_role_forbidden() {
        let u = user(Role::Student);
        let access = authorize(Some(&u), &[Role::Admin]);
        assert_eq!(access, Access::Forbidden);
        assert_eq!(access.redirect(), Some("/unauthorized"));
    }

    #[test]
    fn test_empty_allow_list_forbids_everyone() {
        let u = user(Role::Admin);
        assert_eq!(authorize(Some(&u), &[]), Access::Forbidden);
    }
}
