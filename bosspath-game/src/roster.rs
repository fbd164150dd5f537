//! Boss roster: the fixed catalogue of encounters and their path affinity.
use crate::constants::{LEFT_TAG, RIGHT_TAG};
use crate::error::{PathError, RosterError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const DEFAULT_ROSTER_DATA: &str = include_str!("../assets/roster.json");

static STANDARD_ROSTER: Lazy<Roster> = Lazy::new(|| {
    Roster::from_json(DEFAULT_ROSTER_DATA).unwrap_or_else(|err| {
        log::warn!("embedded roster rejected ({err}); using compiled roster");
        Roster::compiled()
    })
});

/// Branch direction, doubling as the affinity group of a boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn from_is_left(is_left: bool) -> Self {
        if is_left { Self::Left } else { Self::Right }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// One-letter tag mixed into the selection hash.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Left => LEFT_TAG,
            Self::Right => RIGHT_TAG,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One possible encounter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BossEntry {
    pub id: String,
    pub affinity: Direction,
}

impl BossEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, affinity: Direction) -> Self {
        Self {
            id: id.into(),
            affinity,
        }
    }
}

#[derive(Deserialize)]
struct RosterFile {
    bosses: Vec<BossEntry>,
}

/// Immutable boss catalogue. Every id is unique and belongs to exactly one
/// affinity group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    bosses: Vec<BossEntry>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl Roster {
    /// The reference roster of eight bosses, four per affinity.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_ROSTER
    }

    fn compiled() -> Self {
        let left = ["Pride", "Greed", "Lust", "Sloth"];
        let right = ["Wrath", "Envy", "Gluttony", "Devil"];
        let bosses = left
            .iter()
            .map(|id| BossEntry::new(*id, Direction::Left))
            .chain(right.iter().map(|id| BossEntry::new(*id, Direction::Right)))
            .collect();
        Self { bosses }
    }

    /// Build a roster from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, an id is blank, or an id repeats.
    pub fn new(bosses: Vec<BossEntry>) -> Result<Self, RosterError> {
        if bosses.is_empty() {
            return Err(RosterError::Empty);
        }
        let mut seen = HashSet::with_capacity(bosses.len());
        for (index, boss) in bosses.iter().enumerate() {
            if boss.id.trim().is_empty() {
                return Err(RosterError::BlankId { index });
            }
            if !seen.insert(boss.id.as_str()) {
                return Err(RosterError::DuplicateId {
                    id: boss.id.clone(),
                });
            }
        }
        let roster = Self { bosses };
        let left = roster.ids_with(Direction::Left).count();
        let right = roster.ids_with(Direction::Right).count();
        if left != right {
            log::warn!("roster affinity groups are unbalanced (left {left}, right {right})");
        }
        Ok(roster)
    }

    /// Load a roster from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the entries are invalid.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let file: RosterFile = serde_json::from_str(json)?;
        Self::new(file.bosses)
    }

    #[must_use]
    pub fn entries(&self) -> &[BossEntry] {
        &self.bosses
    }

    /// All ids in roster order.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.bosses.iter().map(|boss| boss.id.as_str())
    }

    pub fn ids_with(&self, affinity: Direction) -> impl Iterator<Item = &str> {
        self.bosses
            .iter()
            .filter(move |boss| boss.affinity == affinity)
            .map(|boss| boss.id.as_str())
    }

    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&BossEntry> {
        self.bosses.iter().find(|boss| boss.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entry(id).is_some()
    }

    /// Look up the affinity group of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::UnknownBoss`] when `id` is not in the roster.
    pub fn affinity_of(&self, id: &str) -> Result<Direction, PathError> {
        self.entry(id)
            .map(|boss| boss.affinity)
            .ok_or_else(|| PathError::unknown(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bosses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bosses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_roster_partitions_four_and_four() {
        let roster = Roster::standard();
        assert_eq!(roster.len(), 8);
        let left: Vec<_> = roster.ids_with(Direction::Left).collect();
        let right: Vec<_> = roster.ids_with(Direction::Right).collect();
        assert_eq!(left, ["Pride", "Greed", "Lust", "Sloth"]);
        assert_eq!(right, ["Wrath", "Envy", "Gluttony", "Devil"]);
    }

    #[test]
    fn embedded_asset_matches_compiled_fallback() {
        assert_eq!(Roster::standard(), &Roster::compiled());
    }

    #[test]
    fn affinity_lookup_rejects_unknown_ids() {
        let roster = Roster::standard();
        assert_eq!(roster.affinity_of("Envy").unwrap(), Direction::Right);
        assert_eq!(
            roster.affinity_of("Mimic"),
            Err(PathError::UnknownBoss { id: "Mimic".into() })
        );
    }

    #[test]
    fn rejects_invalid_catalogues() {
        assert!(matches!(Roster::new(Vec::new()), Err(RosterError::Empty)));
        assert!(matches!(
            Roster::new(vec![BossEntry::new("  ", Direction::Left)]),
            Err(RosterError::BlankId { index: 0 })
        ));
        let dup = vec![
            BossEntry::new("Pride", Direction::Left),
            BossEntry::new("Pride", Direction::Right),
        ];
        assert!(matches!(
            Roster::new(dup),
            Err(RosterError::DuplicateId { id }) if id == "Pride"
        ));
        assert!(matches!(
            Roster::from_json("{\"bosses\": 3}"),
            Err(RosterError::Parse(_))
        ));
    }

    #[test]
    fn custom_roster_from_json() {
        let json = r#"{
            "bosses": [
                { "id": "Hydra", "affinity": "left" },
                { "id": "Golem", "affinity": "right" },
                { "id": "Wyrm", "affinity": "right" }
            ]
        }"#;
        let roster = Roster::from_json(json).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(roster.contains("Wyrm"));
        assert_eq!(roster.affinity_of("Hydra").unwrap(), Direction::Left);
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::from_is_left(true), Direction::Left);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.tag(), "R");
        assert_eq!(
            serde_json::to_string(&Direction::Left).unwrap(),
            "\"left\""
        );
    }
}
