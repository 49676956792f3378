// SPDX-License-Identifier: MIT OR Apache-2.0

//! Permissions for homework assignments and student submissions.
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::action::ActionSet;
use crate::context::Context;
use crate::evaluator::Evaluator;
use crate::predicate::RolePredicate;
use crate::role::Role;
use crate::rule::Rule;
use crate::table::RuleTable;
use crate::traits::PolicyFamily;

/// Once graded, a submission can not be changed or removed by anyone.
pub const GRADED_SUBMISSION_RULE: &str = "graded-submission-locked";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HomeworkKind {
    /// Homework handed out to a class.
    Assignment,

    /// A student's answer to an assignment.
    Submission,
}

impl Display for HomeworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HomeworkKind::Assignment => "assignment",
            HomeworkKind::Submission => "submission",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for HomeworkKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "assignment" => Ok(HomeworkKind::Assignment),
            "submission" => Ok(HomeworkKind::Submission),
            _ => Err(format!("invalid homework kind: {value}")),
        }
    }
}

/// How the actor relates to an assignment or submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HomeworkRelationship {
    /// Actor authored the assignment or the submission.
    pub is_owner: bool,

    /// Submission has been graded. Always `false` for assignments.
    pub is_graded: bool,
}

impl HomeworkRelationship {
    pub fn owner() -> Self {
        Self {
            is_owner: true,
            is_graded: false,
        }
    }

    pub fn other() -> Self {
        Self::default()
    }

    pub fn graded(mut self) -> Self {
        self.is_graded = true;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HomeworkAction {
    View,
    Edit,
    Delete,
    Submit,
    Grade,
}

impl Display for HomeworkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HomeworkAction::View => "view",
            HomeworkAction::Edit => "edit",
            HomeworkAction::Delete => "delete",
            HomeworkAction::Submit => "submit",
            HomeworkAction::Grade => "grade",
        };

        write!(f, "{}", s)
    }
}

/// Rule family for homework.
#[derive(Clone, Copy, Debug)]
pub struct HomeworkPolicy;

impl PolicyFamily for HomeworkPolicy {
    const NAME: &'static str = "homework";

    type Kind = HomeworkKind;
    type Relationship = HomeworkRelationship;
    type Action = HomeworkAction;

    fn kinds() -> &'static [HomeworkKind] {
        &[HomeworkKind::Assignment, HomeworkKind::Submission]
    }

    fn relationships() -> &'static [HomeworkRelationship] {
        &[
            HomeworkRelationship {
                is_owner: false,
                is_graded: false,
            },
            HomeworkRelationship {
                is_owner: true,
                is_graded: false,
            },
            HomeworkRelationship {
                is_owner: false,
                is_graded: true,
            },
            HomeworkRelationship {
                is_owner: true,
                is_graded: true,
            },
        ]
    }
}

pub type HomeworkContext = Context<HomeworkPolicy>;

type HomeworkRule = Rule<HomeworkPolicy>;

static RULES: LazyLock<RuleTable<HomeworkPolicy>> = LazyLock::new(|| {
    use HomeworkAction::*;
    use HomeworkKind::*;

    RuleTable::<HomeworkPolicy>::builder()
        .rule(
            HomeworkRule::allow("assignment-readers", Assignment)
                .for_roles(RolePredicate::Any)
                .actions([View]),
        )
        .rule(
            HomeworkRule::allow("assignment-author", Assignment)
                .when(|relationship| relationship.is_owner)
                .for_roles(RolePredicate::TeachingStaff)
                .actions([Edit, Delete]),
        )
        .rule(
            HomeworkRule::allow("assignment-admin", Assignment)
                .for_roles(RolePredicate::Admin)
                .actions([Edit, Delete]),
        )
        .rule(
            HomeworkRule::allow("assignment-submit", Assignment)
                .for_roles(RolePredicate::Student)
                .actions([Submit]),
        )
        .rule(
            HomeworkRule::allow("submission-owner", Submission)
                .when(|relationship| relationship.is_owner)
                .for_roles(RolePredicate::Student)
                .actions([View, Edit, Delete]),
        )
        .rule(
            HomeworkRule::allow("submission-grader", Submission)
                .for_roles(RolePredicate::TeachingStaff)
                .actions([View, Grade]),
        )
        .rule(
            HomeworkRule::allow("submission-guardian", Submission)
                .for_roles(RolePredicate::Parent)
                .actions([View]),
        )
        .rule(
            HomeworkRule::allow("submission-school-leadership", Submission)
                .for_roles(RolePredicate::SchoolLeadership)
                .actions([View]),
        )
        .rule(
            HomeworkRule::deny(GRADED_SUBMISSION_RULE, Submission)
                .when(|relationship| relationship.is_graded)
                .for_roles(RolePredicate::Any)
                .actions([Edit, Delete]),
        )
        .build()
        .expect("homework rules are valid")
});

/// Process-wide homework rule table.
pub fn rules() -> &'static RuleTable<HomeworkPolicy> {
    &RULES
}

/// Evaluator over the process-wide homework rule table.
pub fn evaluator() -> Evaluator<'static, HomeworkPolicy> {
    Evaluator::new(rules())
}

/// Actions an actor with the given active role may perform on an assignment or submission.
pub fn evaluate(
    kind: HomeworkKind,
    relationship: HomeworkRelationship,
    role: Option<Role>,
) -> ActionSet<HomeworkAction> {
    evaluator().evaluate(&Context::describe(kind, relationship), role)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::test_utils::setup_logging;
    use crate::{ActionSet, Role};

    use super::*;

    use super::HomeworkAction::*;

    fn set(actions: &[HomeworkAction]) -> ActionSet<HomeworkAction> {
        actions.iter().copied().collect()
    }

    #[rstest]
    #[case(HomeworkKind::Assignment, HomeworkRelationship::owner(), Role::Teacher, &[View, Edit, Delete])]
    #[case(HomeworkKind::Assignment, HomeworkRelationship::other(), Role::Teacher, &[View])]
    #[case(HomeworkKind::Assignment, HomeworkRelationship::other(), Role::SchoolAdmin, &[View, Edit, Delete])]
    #[case(HomeworkKind::Assignment, HomeworkRelationship::other(), Role::Student, &[View, Submit])]
    #[case(HomeworkKind::Assignment, HomeworkRelationship::other(), Role::Parent, &[View])]
    #[case(HomeworkKind::Submission, HomeworkRelationship::owner(), Role::Student, &[View, Edit, Delete])]
    #[case(HomeworkKind::Submission, HomeworkRelationship::other(), Role::Student, &[])]
    #[case(HomeworkKind::Submission, HomeworkRelationship::other(), Role::ClassTeacher, &[View, Grade])]
    #[case(HomeworkKind::Submission, HomeworkRelationship::other(), Role::Principal, &[View])]
    #[case(HomeworkKind::Submission, HomeworkRelationship::other(), Role::SuperAdmin, &[])]
    fn homework_scenarios(
        #[case] kind: HomeworkKind,
        #[case] relationship: HomeworkRelationship,
        #[case] role: Role,
        #[case] expected: &[HomeworkAction],
    ) {
        setup_logging();
        assert_eq!(evaluate(kind, relationship, Some(role)), set(expected));
    }

    #[test]
    fn deny_wins_on_graded_submissions() {
        let graded = HomeworkRelationship::owner().graded();
        assert_eq!(
            evaluate(HomeworkKind::Submission, graded, Some(Role::Student)),
            set(&[View])
        );

        let decision = evaluator().decide(
            &HomeworkContext::describe(HomeworkKind::Submission, graded),
            Some(Role::Student),
        );
        assert_eq!(decision.granted_by(), &["submission-owner"]);
        assert_eq!(decision.withheld_by(), &[GRADED_SUBMISSION_RULE]);

        // Grading stays possible for teachers.
        assert_eq!(
            evaluate(
                HomeworkKind::Submission,
                HomeworkRelationship::other().graded(),
                Some(Role::Teacher)
            ),
            set(&[View, Grade])
        );
    }

    #[test]
    fn conflicts_only_stem_from_graded_submissions() {
        let conflicts = rules().conflicts();
        assert!(!conflicts.is_empty());

        for conflict in conflicts {
            assert_eq!(conflict.kind, HomeworkKind::Submission);
            assert!(conflict.relationship.is_graded);
            assert!(conflict.relationship.is_owner);
            assert_eq!(conflict.role, Role::Student);
            assert!(matches!(conflict.action, Edit | Delete));
            assert_eq!(conflict.granted_by, vec!["submission-owner"]);
            assert_eq!(conflict.withheld_by, vec![GRADED_SUBMISSION_RULE]);
        }
    }

    #[test]
    fn no_role_no_actions() {
        for kind in HomeworkPolicy::kinds() {
            for relationship in HomeworkPolicy::relationships() {
                assert!(evaluate(*kind, *relationship, None).is_empty());
            }
        }
    }

    #[test]
    fn parse_homework_context() {
        let context = HomeworkContext::parse("submission", HomeworkRelationship::other());
        assert_eq!(context.map(|c| c.kind()), Ok(HomeworkKind::Submission));
        assert!(HomeworkContext::parse("exam", HomeworkRelationship::other()).is_err());
    }
}
