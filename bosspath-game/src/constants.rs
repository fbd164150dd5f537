//! Centralized constants for the bosspath selection engine.
//!
//! These values define the deterministic math of boss selection. Changing any
//! of them changes which boss every existing seed resolves to, so they are
//! only adjusted through reviewed code changes.

// Seeds --------------------------------------------------------------------
/// Length of a canonical run seed.
pub const SEED_LEN: usize = 6;
/// Characters a seed may contain.
pub const SEED_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Hashing ------------------------------------------------------------------
pub(crate) const FNV32_OFFSET: u32 = 0x811c_9dc5;
pub(crate) const FNV32_PRIME: u32 = 0x0100_0193;
pub(crate) const HASH_FIELD_SEPARATOR: u8 = 0x1F;

// Direction tags -----------------------------------------------------------
pub(crate) const LEFT_TAG: &str = "L";
pub(crate) const RIGHT_TAG: &str = "R";

// Preview ------------------------------------------------------------------
/// Most nodes a look-ahead tree may hold. Each level can double the node
/// count, so deep previews of large rosters are cut off here.
pub const PREVIEW_NODE_LIMIT: usize = 1024;

// Visualization ------------------------------------------------------------
pub(crate) const VIS_SEED_PREFIX: &str = "[SEED: ";
pub(crate) const VIS_FINAL_BOSS: &str = "FINAL BOSS";
pub(crate) const VIS_RUN_COMPLETE: &str = "RUN COMPLETE";
pub(crate) const VIS_LEFT_LABEL: &str = "LEFT ";
pub(crate) const VIS_RIGHT_LABEL: &str = "RIGHT";
