//! Work-experience list with stable row identity.
//!
//! Rows live in an arena keyed by [`ExperienceId`]; display order is a
//! separate `Vec` of ids. Removing or appending a row never changes the id
//! (or the values) of any other row, so per-row UI state keyed by id stays
//! attached to the right row.

use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::values::WorkExperience;
use crate::error::FormError;

/// Stable synthetic key of one work-experience row.
///
/// Issued from a monotonically increasing counter; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExperienceId(u64);

impl ExperienceId {
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered, identity-preserving list of work experiences.
///
/// Always holds at least one row.
#[derive(Debug, Clone)]
pub struct ExperienceList {
    entries: HashMap<ExperienceId, WorkExperience>,
    order: Vec<ExperienceId>,
    next_id: u64,
}

impl ExperienceList {
    /// Create a list holding one blank row.
    pub fn new() -> Self {
        let mut list = Self {
            entries: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
        };
        list.append();
        list
    }

    fn issue_id(&mut self) -> ExperienceId {
        let id = ExperienceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Never true for a list built through this API; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a row may be removed (more than one row present).
    pub fn can_remove(&self) -> bool {
        self.order.len() > 1
    }

    /// Append a blank row at the end and return its fresh id.
    pub fn append(&mut self) -> ExperienceId {
        let id = self.issue_id();
        self.entries.insert(id, WorkExperience::default());
        self.order.push(id);
        id
    }

    /// Remove the row at `index`.
    ///
    /// Refuses to remove the last remaining row.
    pub fn remove(&mut self, index: usize) -> Result<WorkExperience, FormError> {
        let len = self.order.len();
        if index >= len {
            return Err(FormError::ExperienceIndexOutOfRange { index, len });
        }
        if !self.can_remove() {
            return Err(FormError::LastExperience);
        }
        let id = self.order.remove(index);
        self.entries
            .remove(&id)
            .ok_or(FormError::UnknownExperience(id))
    }

    /// Remove a row by identity. Same rules as [`remove`](Self::remove).
    pub fn remove_id(&mut self, id: ExperienceId) -> Result<WorkExperience, FormError> {
        let index = self.index_of(id).ok_or(FormError::UnknownExperience(id))?;
        self.remove(index)
    }

    /// Id of the row at `index`.
    pub fn id_at(&self, index: usize) -> Option<ExperienceId> {
        self.order.get(index).copied()
    }

    /// Display position of the row with `id`.
    pub fn index_of(&self, id: ExperienceId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    pub fn contains(&self, id: ExperienceId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: ExperienceId) -> Option<&WorkExperience> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: ExperienceId) -> Option<&mut WorkExperience> {
        self.entries.get_mut(&id)
    }

    /// Row ids in display order.
    pub fn ids(&self) -> &[ExperienceId] {
        &self.order
    }

    /// Rows in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ExperienceId, &WorkExperience)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.entries.get(id).map(|entry| (*id, entry)))
    }

    /// Drop every row and start over with one blank row.
    ///
    /// The id counter keeps counting so ids from before the reset never
    /// come back.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.append();
    }
}

impl Default for ExperienceList {
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when the rows match in order; ids are not compared.
impl PartialEq for ExperienceList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((_, a), (_, b))| a == b)
    }
}

impl Eq for ExperienceList {}

/// Serialized as a plain array in display order.
impl Serialize for ExperienceList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (_, entry) in self.iter() {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

// =============================================================================
// Tests
// =============================================================================
