//! Player roster and status line.
//!
//! The roster lists player parts in the order they first appeared, so an
//! operator can pick one to kick. It follows the same appear/disappear
//! rules as the scene.

use std::collections::{HashMap, HashSet};

use scene_relay_shared::{Part, PartId};

/// Ids that joined or left the roster in one pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterChanges {
    /// Newly listed players.
    pub joined: Vec<PartId>,
    /// Players no longer present.
    pub left: Vec<PartId>,
}

impl RosterChanges {
    /// True if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty()
    }
}

/// Ordered list of players currently in the snapshot.
#[derive(Clone, Debug, Default)]
pub struct PlayerRoster {
    players: Vec<PartId>,
}

impl PlayerRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the roster in line with the player parts of a snapshot.
    ///
    /// Like the scene, only the last entry of a repeated id counts.
    pub fn reconcile(&mut self, parts: &[Part]) -> RosterChanges {
        let mut changes = RosterChanges::default();

        let mut latest: HashMap<&str, bool> = HashMap::with_capacity(parts.len());
        for part in parts {
            latest.insert(part.id.as_str(), part.is_player);
        }
        let mut unlisted: HashSet<&str> = latest
            .into_iter()
            .filter_map(|(id, is_player)| is_player.then_some(id))
            .collect();

        self.players.retain(|id| {
            let keep = unlisted.remove(id.as_str());
            if !keep {
                changes.left.push(id.clone());
            }
            keep
        });

        // Whatever is still unlisted joins, in order of first appearance.
        for part in parts {
            if unlisted.remove(part.id.as_str()) {
                self.players.push(part.id.clone());
                changes.joined.push(part.id.clone());
            }
        }

        changes
    }

    /// True if `id` is listed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|listed| listed == id)
    }

    /// Listed ids, in order of first appearance.
    #[must_use]
    pub fn players(&self) -> &[PartId] {
        &self.players
    }
}

/// Status line for a fetched snapshot of `count` entries.
#[must_use]
pub fn status_text(count: usize) -> String {
    if count == 0 {
        "Waiting for producer...".to_owned()
    } else {
        format!("Parts: {count}")
    }
}
