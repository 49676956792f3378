// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role-gated dashboard content.
//!
//! Every role has exactly one dashboard view. The mapping is a total function over [`Role`]
//! without a fallback arm, adding a role does not compile until it is given a view here. Actors
//! without an active role, or with a role name which is not recognised, get an empty view.
use std::fmt::Display;

use campus_auth::{Actor, Role, active_role};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Dashboard shown to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum View {
    SuperAdmin,
    SchoolAdmin,
    Principal,
    VicePrincipal,
    Teacher,
    ClassTeacher,
    Student,
    Parent,

    /// No content.
    Empty,
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            View::SuperAdmin => "super_admin",
            View::SchoolAdmin => "school_admin",
            View::Principal => "principal",
            View::VicePrincipal => "vice_principal",
            View::Teacher => "teacher",
            View::ClassTeacher => "class_teacher",
            View::Student => "student",
            View::Parent => "parent",
            View::Empty => "empty",
        };

        write!(f, "{}", s)
    }
}

/// Stat cards and panels a dashboard can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Widget {
    SchoolCount,
    UserCount,
    ActiveSessions,
    SystemHealth,
    StudentCount,
    TeacherCount,
    ClassCount,
    AttendanceRate,
    GradeAverages,
    TodaySchedule,
    HomeworkToReview,
    ClassAttendance,
    HomeworkDue,
    RecentGrades,
    ChildrenOverview,
    UnreadMessages,
}

/// A dashboard view and the widgets it contains, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ViewDescriptor {
    pub view: View,
    pub widgets: &'static [Widget],
}

impl ViewDescriptor {
    /// Descriptor without any content.
    pub const fn empty() -> Self {
        Self {
            view: View::Empty,
            widgets: &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.view == View::Empty
    }

    pub fn shows(&self, widget: Widget) -> bool {
        self.widgets.contains(&widget)
    }
}

impl Default for ViewDescriptor {
    fn default() -> Self {
        Self::empty()
    }
}

/// Dashboard for the given active role.
pub fn select_view(role: Option<Role>) -> ViewDescriptor {
    use Widget::*;

    let Some(role) = role else {
        trace!("no active role, showing empty dashboard");
        return ViewDescriptor::empty();
    };

    let (view, widgets): (View, &'static [Widget]) = match role {
        Role::SuperAdmin => (
            View::SuperAdmin,
            &[SchoolCount, UserCount, ActiveSessions, SystemHealth],
        ),
        Role::SchoolAdmin => (
            View::SchoolAdmin,
            &[StudentCount, TeacherCount, ClassCount, AttendanceRate],
        ),
        Role::Principal => (
            View::Principal,
            &[StudentCount, TeacherCount, AttendanceRate, GradeAverages],
        ),
        Role::VicePrincipal => (
            View::VicePrincipal,
            &[AttendanceRate, GradeAverages, TodaySchedule],
        ),
        Role::Teacher => (
            View::Teacher,
            &[TodaySchedule, HomeworkToReview, UnreadMessages],
        ),
        Role::ClassTeacher => (
            View::ClassTeacher,
            &[TodaySchedule, HomeworkToReview, ClassAttendance, UnreadMessages],
        ),
        Role::Student => (
            View::Student,
            &[TodaySchedule, HomeworkDue, RecentGrades, UnreadMessages],
        ),
        Role::Parent => (
            View::Parent,
            &[ChildrenOverview, RecentGrades, UnreadMessages],
        ),
    };

    trace!(%role, %view, widgets = widgets.len(), "selected dashboard view");

    ViewDescriptor { view, widgets }
}

/// Dashboard for a possibly signed-out actor.
pub fn select_view_for_actor<ID>(actor: Option<&Actor<ID>>) -> ViewDescriptor {
    select_view(active_role(actor))
}

/// Dashboard for a role given by name. Unrecognised names get the empty dashboard.
pub fn select_view_by_name(role: &str) -> ViewDescriptor {
    select_view(Role::parse(role))
}
