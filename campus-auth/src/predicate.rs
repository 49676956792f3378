// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named groupings of roles.
//!
//! These predicates are the only place where roles are grouped together. Rules and consumers
//! use them instead of checking role membership in ad hoc lists. Every predicate matches all
//! roles explicitly, adding a role to [`Role`] requires deciding where it belongs.
use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Platform or school administrators.
pub fn is_admin(role: Role) -> bool {
    match role {
        Role::SuperAdmin | Role::SchoolAdmin => true,
        Role::Principal
        | Role::VicePrincipal
        | Role::Teacher
        | Role::ClassTeacher
        | Role::Student
        | Role::Parent => false,
    }
}

/// Principal and vice principal.
pub fn is_school_leadership(role: Role) -> bool {
    match role {
        Role::Principal | Role::VicePrincipal => true,
        Role::SuperAdmin
        | Role::SchoolAdmin
        | Role::Teacher
        | Role::ClassTeacher
        | Role::Student
        | Role::Parent => false,
    }
}

/// Roles which teach classes.
pub fn is_teaching_staff(role: Role) -> bool {
    match role {
        Role::Teacher | Role::ClassTeacher => true,
        Role::SuperAdmin
        | Role::SchoolAdmin
        | Role::Principal
        | Role::VicePrincipal
        | Role::Student
        | Role::Parent => false,
    }
}

pub fn is_student(role: Role) -> bool {
    role == Role::Student
}

pub fn is_parent(role: Role) -> bool {
    role == Role::Parent
}

/// Everyone employed by or operating a school.
pub fn is_staff(role: Role) -> bool {
    is_admin(role) || is_school_leadership(role) || is_teaching_staff(role)
}

/// Role condition of a policy rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RolePredicate {
    /// Any role. An actor without a role never matches.
    Any,

    /// See [`is_admin`].
    Admin,

    /// See [`is_school_leadership`].
    SchoolLeadership,

    /// See [`is_teaching_staff`].
    TeachingStaff,

    /// See [`is_staff`].
    Staff,

    Student,

    Parent,

    /// Exactly this role.
    Exactly(Role),
}

impl RolePredicate {
    /// Return `true` if the given role satisfies this predicate.
    pub fn matches(&self, role: Role) -> bool {
        match self {
            RolePredicate::Any => true,
            RolePredicate::Admin => is_admin(role),
            RolePredicate::SchoolLeadership => is_school_leadership(role),
            RolePredicate::TeachingStaff => is_teaching_staff(role),
            RolePredicate::Staff => is_staff(role),
            RolePredicate::Student => is_student(role),
            RolePredicate::Parent => is_parent(role),
            RolePredicate::Exactly(expected) => *expected == role,
        }
    }
}

impl Display for RolePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RolePredicate::Any => write!(f, "any role"),
            RolePredicate::Admin => write!(f, "admin"),
            RolePredicate::SchoolLeadership => write!(f, "school leadership"),
            RolePredicate::TeachingStaff => write!(f, "teaching staff"),
            RolePredicate::Staff => write!(f, "staff"),
            RolePredicate::Student => write!(f, "student"),
            RolePredicate::Parent => write!(f, "parent"),
            RolePredicate::Exactly(role) => write!(f, "{role}"),
        }
    }
}
