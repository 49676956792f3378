// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Interface describing a family of entities which share one set of policy rules.
///
/// A family owns a closed set of entity kinds, the record describing how an actor relates to an
/// entity of that family, and the closed set of actions which can be performed on it. Because
/// kinds, relationships and actions are associated types, rules of one family can never be
/// applied to entities of another one.
///
/// Kinds and relationships have to be enumerable so rule tables can be checked for coverage and
/// conflicts ahead of time.
pub trait PolicyFamily: 'static {
    /// Name of this family, used in errors and logs.
    const NAME: &'static str;

    /// Kind of entity, for example a private or a group chat.
    type Kind: Copy + Debug + Display + Eq + Hash + FromStr + Send + Sync + 'static;

    /// Standing of an actor towards a concrete entity, for example being its creator.
    type Relationship: Copy + Debug + Eq + Send + Sync + 'static;

    /// Action which can be permitted on an entity of this family.
    type Action: Copy + Debug + Display + Ord + Hash + Send + Sync + 'static;

    /// All kinds of this family.
    fn kinds() -> &'static [Self::Kind];

    /// All possible relationships an actor can have towards an entity of this family.
    fn relationships() -> &'static [Self::Relationship];
}
