// SPDX-License-Identifier: MPL-2.0

//! Local reconciliation of a post's reactions after the viewer reacts.
//!
//! The server does not return the new reaction set, so the client derives it:
//! reacting adds, reacting with the same kind again removes, reacting with a
//! different kind switches. A reactor never holds more than one entry.

use crate::api::{Reaction, ReactionKind};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReactionError {
    #[error("invalid reaction kind: {0:?}")]
    InvalidKind(String),
}

impl FromStr for ReactionKind {
    type Err = ReactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ReactionError::InvalidKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    Added(ReactionKind),
    Removed(ReactionKind),
    Switched {
        from: ReactionKind,
        to: ReactionKind,
    },
}

impl ReactionChange {
    /// Change in the number of entries: +1, -1 or 0.
    pub fn delta(self) -> isize {
        match self {
            ReactionChange::Added(_) => 1,
            ReactionChange::Removed(_) => -1,
            ReactionChange::Switched { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub reactions: Vec<Reaction>,
    pub change: ReactionChange,
}

/// Compute the reaction set after `reactor_id` reacts with `kind`.
///
/// Order is preserved: a new entry is appended, a switched entry keeps its
/// position. Stray duplicate entries for the reactor are dropped.
pub fn reconcile(current: &[Reaction], reactor_id: &str, kind: ReactionKind) -> Reconciled {
    let Some(existing) = current.iter().position(|r| r.reactor_id == reactor_id) else {
        let mut reactions = current.to_vec();
        reactions.push(Reaction {
            reactor_id: reactor_id.to_string(),
            kind,
        });
        return Reconciled {
            reactions,
            change: ReactionChange::Added(kind),
        };
    };

    let previous = current[existing].kind;
    let mut reactions = Vec::with_capacity(current.len());
    for (i, reaction) in current.iter().enumerate() {
        if reaction.reactor_id != reactor_id {
            reactions.push(reaction.clone());
        } else if i == existing && previous != kind {
            reactions.push(Reaction {
                reactor_id: reactor_id.to_string(),
                kind,
            });
        }
    }

    let change = if previous == kind {
        ReactionChange::Removed(kind)
    } else {
        ReactionChange::Switched {
            from: previous,
            to: kind,
        }
    };
    Reconciled { reactions, change }
}

/// Number of reactions of each kind, in [`ReactionKind::ALL`] order.
pub fn tally(reactions: &[Reaction]) -> [(ReactionKind, usize); 3] {
    ReactionKind::ALL.map(|kind| (kind, reactions.iter().filter(|r| r.kind == kind).count()))
}

/// The reaction `reactor_id` currently holds, if any.
pub fn reaction_of(reactions: &[Reaction], reactor_id: &str) -> Option<ReactionKind> {
    reactions
        .iter()
        .find(|r| r.reactor_id == reactor_id)
        .map(|r| r.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn reaction(reactor_id: &str, kind: ReactionKind) -> Reaction {
        Reaction {
            reactor_id: reactor_id.to_string(),
            kind,
        }
    }

    #[test]
    fn test_add_toggle_and_readd() {
        let step = reconcile(&[], "u1", ReactionKind::Like);
        assert_eq!(step.reactions, [reaction("u1", ReactionKind::Like)]);
        assert_eq!(step.change, ReactionChange::Added(ReactionKind::Like));

        let step = reconcile(&step.reactions, "u1", ReactionKind::Like);
        assert!(step.reactions.is_empty());
        assert_eq!(step.change, ReactionChange::Removed(ReactionKind::Like));

        let step = reconcile(&step.reactions, "u1", ReactionKind::Love);
        assert_eq!(step.reactions, [reaction("u1", ReactionKind::Love)]);
    }

    #[test]
    fn test_switch_keeps_position_and_others() {
        let current = [
            reaction("u1", ReactionKind::Like),
            reaction("u2", ReactionKind::Love),
            reaction("u3", ReactionKind::Angry),
        ];
        let step = reconcile(&current, "u2", ReactionKind::Angry);
        assert_eq!(
            step.reactions,
            [
                reaction("u1", ReactionKind::Like),
                reaction("u2", ReactionKind::Angry),
                reaction("u3", ReactionKind::Angry),
            ]
        );
        assert_eq!(
            step.change,
            ReactionChange::Switched {
                from: ReactionKind::Love,
                to: ReactionKind::Angry,
            }
        );
        assert_eq!(step.change.delta(), 0);
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let current = [
            reaction("u1", ReactionKind::Like),
            reaction("u2", ReactionKind::Like),
            reaction("u1", ReactionKind::Love),
        ];
        let step = reconcile(&current, "u1", ReactionKind::Angry);
        assert_eq!(
            step.reactions,
            [
                reaction("u1", ReactionKind::Angry),
                reaction("u2", ReactionKind::Like),
            ]
        );

        let step = reconcile(&current, "u1", ReactionKind::Like);
        assert_eq!(step.reactions, [reaction("u2", ReactionKind::Like)]);
    }

    #[test]
    fn test_sequences_never_duplicate_reactors() {
        let script = [
            ("a", ReactionKind::Like),
            ("b", ReactionKind::Love),
            ("a", ReactionKind::Love),
            ("c", ReactionKind::Angry),
            ("a", ReactionKind::Love),
            ("b", ReactionKind::Love),
            ("a", ReactionKind::Angry),
            ("c", ReactionKind::Like),
        ];
        let mut reactions: Vec<Reaction> = Vec::new();
        for (reactor, kind) in script {
            let before = reactions.len() as isize;
            let step = reconcile(&reactions, reactor, kind);
            assert_eq!(step.reactions.len() as isize - before, step.change.delta());
            reactions = step.reactions;

            let reactors: HashSet<&str> = reactions.iter().map(|r| r.reactor_id.as_str()).collect();
            assert_eq!(reactors.len(), reactions.len());
        }
        assert_eq!(
            reactions,
            [
                reaction("c", ReactionKind::Like),
                reaction("a", ReactionKind::Angry),
            ]
        );
    }

    #[test]
    fn test_kind_parsing_is_exact() {
        assert_eq!("love".parse::<ReactionKind>(), Ok(ReactionKind::Love));
        assert_eq!(
            "wow".parse::<ReactionKind>(),
            Err(ReactionError::InvalidKind("wow".to_string()))
        );
        assert_eq!(
            "Like".parse::<ReactionKind>(),
            Err(ReactionError::InvalidKind("Like".to_string()))
        );
        assert_eq!(
            ReactionError::InvalidKind(String::new()).to_string(),
            "invalid reaction kind: \"\""
        );
    }

    #[test]
    fn test_tally_and_reaction_of() {
        let reactions = [
            reaction("u1", ReactionKind::Like),
            reaction("u2", ReactionKind::Like),
            reaction("u3", ReactionKind::Angry),
        ];
        assert_eq!(
            tally(&reactions),
            [
                (ReactionKind::Like, 2),
                (ReactionKind::Love, 0),
                (ReactionKind::Angry, 1),
            ]
        );
        assert_eq!(reaction_of(&reactions, "u3"), Some(ReactionKind::Angry));
        assert_eq!(reaction_of(&reactions, "u9"), None);
    }
}
