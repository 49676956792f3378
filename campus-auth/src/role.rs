// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Roles which can be assigned to an actor.
///
/// Roles are compared by value only. They do not form a hierarchy: a `SuperAdmin` is not
/// implicitly a `Teacher`. Groupings like "any admin" are expressed through the named predicates
/// in [`crate::predicate`].
///
/// The derived ordering exists to keep role sets deterministic and carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// Operator of the whole platform, across schools.
    SuperAdmin,

    /// Administrator of a single school.
    SchoolAdmin,

    Principal,

    VicePrincipal,

    Teacher,

    /// Teacher who is additionally responsible for one class.
    ClassTeacher,

    Student,

    /// Guardian of one or more students.
    Parent,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 8] = [
        Role::SuperAdmin,
        Role::SchoolAdmin,
        Role::Principal,
        Role::VicePrincipal,
        Role::Teacher,
        Role::ClassTeacher,
        Role::Student,
        Role::Parent,
    ];

    /// Canonical name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::SchoolAdmin => "school_admin",
            Role::Principal => "principal",
            Role::VicePrincipal => "vice_principal",
            Role::Teacher => "teacher",
            Role::ClassTeacher => "class_teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    /// Parse a role name coming from a session or another external source.
    ///
    /// Unrecognised names yield `None`, which every policy treats as "no role".
    pub fn parse(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = PolicyError;

    /// Accepts canonical names case-insensitively, with `_`, `-` or spaces between words.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| PolicyError::UnknownRole(value.to_string()))
    }
}
