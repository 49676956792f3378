// SPDX-License-Identifier: MIT OR Apache-2.0

//! Permissions for private and group chats.
//!
//! Chat context menus and swipe panels both ask this policy which actions to offer, neither of
//! them inspects chat kind or creator status on its own.
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

/// Both participants of a private chat may delete it and leave it.
pub const PRIVATE_PARTICIPANT_RULE: &str = "private-participant";

/// Only the creator of a group chat may edit or delete it.
pub const GROUP_EDIT_RULE: &str = "group-creator";

/// Group members who did not create the chat may leave it.
pub const GROUP_MEMBER_RULE: &str = "group-member";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChatKind {
    /// Conversation between exactly two participants.
    Private,

    /// Conversation with a creator and any number of members.
    Group,
}

impl Display for ChatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChatKind::Private => "private",
            ChatKind::Group => "group",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for ChatKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(ChatKind::Private),
            "group" => Ok(ChatKind::Group),
            _ => Err(format!("invalid chat kind: {value}")),
        }
    }
}

/// How the actor relates to a chat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChatRelationship {
    pub is_creator: bool,
}

impl ChatRelationship {
    pub const CREATOR: Self = Self { is_creator: true };

    pub const PARTICIPANT: Self = Self { is_creator: false };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChatAction {
    Edit,
    Delete,
    Leave,
}

impl Display for ChatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChatAction::Edit => "edit",
            ChatAction::Delete => "delete",
            ChatAction::Leave => "leave",
        };

        write!(f, "{}", s)
    }
}

/// Rule family for chats.
#[derive(Clone, Copy, Debug)]
pub struct ChatPolicy;

impl PolicyFamily for ChatPolicy {
    const NAME: &'static str = "chat";

    type Kind = ChatKind;
    type Relationship = ChatRelationship;
    type Action = ChatAction;

    fn kinds() -> &'static [ChatKind] {
        &[ChatKind::Private, ChatKind::Group]
    }

    fn relationships() -> &'static [ChatRelationship] {
        &[ChatRelationship::CREATOR, ChatRelationship::PARTICIPANT]
    }
}

pub type ChatContext = Context<ChatPolicy>;

type ChatRule = Rule<ChatPolicy>;

static RULES: LazyLock<RuleTable<ChatPolicy>> = LazyLock::new(|| {
    RuleTable::<ChatPolicy>::builder()
        .rule(
            ChatRule::allow(PRIVATE_PARTICIPANT_RULE, ChatKind::Private)
                .for_roles(RolePredicate::Any)
                .actions([ChatAction::Delete, ChatAction::Leave]),
        )
        .rule(
            ChatRule::allow(GROUP_EDIT_RULE, ChatKind::Group)
                .when(|relationship| relationship.is_creator)
                .for_roles(RolePredicate::Any)
                .actions([ChatAction::Edit, ChatAction::Delete]),
        )
        .rule(
            ChatRule::allow(GROUP_MEMBER_RULE, ChatKind::Group)
                .when(|relationship| !relationship.is_creator)
                .for_roles(RolePredicate::Any)
                .actions([ChatAction::Leave]),
        )
        .build()
        .expect("chat rules are valid")
});

/// Process-wide chat rule table.
pub fn rules() -> &'static RuleTable<ChatPolicy> {
    &RULES
}

/// Evaluator over the process-wide chat rule table.
pub fn evaluator() -> Evaluator<'static, ChatPolicy> {
    Evaluator::new(rules())
}

/// Actions an actor with the given active role may perform on a chat.
pub fn evaluate(
    kind: ChatKind,
    relationship: ChatRelationship,
    role: Option<Role>,
) -> ActionSet<ChatAction> {
    evaluator().evaluate(&Context::describe(kind, relationship), role)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::test_utils::{all_roles, setup_logging};
    use crate::{ActionSet, Context, PolicyError, Role};

    use super::*;

    #[rstest]
    #[case(ChatKind::Private, ChatRelationship::PARTICIPANT, Role::Student, &[ChatAction::Delete, ChatAction::Leave])]
    #[case(ChatKind::Private, ChatRelationship::CREATOR, Role::Parent, &[ChatAction::Delete, ChatAction::Leave])]
    #[case(ChatKind::Group, ChatRelationship::CREATOR, Role::Teacher, &[ChatAction::Edit, ChatAction::Delete])]
    #[case(ChatKind::Group, ChatRelationship::PARTICIPANT, Role::Student, &[ChatAction::Leave])]
    #[case(ChatKind::Group, ChatRelationship::PARTICIPANT, Role::SuperAdmin, &[ChatAction::Leave])]
    fn chat_scenarios(
        #[case] kind: ChatKind,
        #[case] relationship: ChatRelationship,
        #[case] role: Role,
        #[case] expected: &[ChatAction],
    ) {
        setup_logging();

        let expected: ActionSet<ChatAction> = expected.iter().copied().collect();
        assert_eq!(evaluate(kind, relationship, Some(role)), expected);
    }

    #[test]
    fn no_role_no_actions() {
        for kind in ChatPolicy::kinds() {
            for relationship in ChatPolicy::relationships() {
                assert!(evaluate(*kind, *relationship, None).is_empty());
            }
        }

        assert!(evaluate(ChatKind::Group, ChatRelationship::CREATOR, None).is_empty());
    }

    #[test]
    fn group_edit_is_creator_only() {
        for role in all_roles() {
            let creator = evaluate(ChatKind::Group, ChatRelationship::CREATOR, role);
            let member = evaluate(ChatKind::Group, ChatRelationship::PARTICIPANT, role);
            assert_eq!(creator.contains(&ChatAction::Edit), role.is_some());
            assert!(!member.contains(&ChatAction::Edit));
        }

        let decision = evaluator().decide(
            &Context::describe(ChatKind::Group, ChatRelationship::CREATOR),
            Some(Role::Student),
        );
        assert_eq!(decision.granted_by(), &[GROUP_EDIT_RULE]);
        assert!(decision.withheld_by().is_empty());
    }

    #[test]
    fn role_does_not_change_chat_permissions() {
        for kind in ChatPolicy::kinds() {
            for relationship in ChatPolicy::relationships() {
                let reference = evaluate(*kind, *relationship, Some(Role::Student));
                for role in Role::ALL {
                    assert_eq!(evaluate(*kind, *relationship, Some(role)), reference);
                }
            }
        }
    }

    #[test]
    fn chat_table_has_no_conflicts() {
        assert!(rules().conflicts().is_empty());
        assert_eq!(rules().rules().len(), 3);
        assert!(rules().rule(GROUP_EDIT_RULE).is_some());
    }

    #[test]
    fn parse_chat_context() {
        let context = ChatContext::parse("Group", ChatRelationship::CREATOR).unwrap();
        assert_eq!(context.kind(), ChatKind::Group);
        assert_eq!(context.relationship(), ChatRelationship::CREATOR);

        assert_eq!(
            ChatContext::parse("channel", ChatRelationship::PARTICIPANT),
            Err(PolicyError::UnknownEntityKind {
                family: "chat",
                value: "channel".to_string(),
            })
        );
    }

    #[test]
    fn permitted_action_check() {
        let context = ChatContext::describe(ChatKind::Private, ChatRelationship::PARTICIPANT);
        assert!(evaluator().is_permitted(&context, Some(Role::Parent), ChatAction::Leave));
        assert!(!evaluator().is_permitted(&context, Some(Role::Parent), ChatAction::Edit));
        assert!(!evaluator().is_permitted(&context, None, ChatAction::Leave));
    }
}
