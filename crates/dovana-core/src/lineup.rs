// ABOUTME: Ordered collection backing the featured carousel
// ABOUTME: Computes position changes for append, compacting remove, adjacent swap and reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dovana Contributors

//! # Featured Lineup
//!
//! The featured carousel is a short list whose `position` column must always
//! be the dense sequence `0..n`. Every mutation goes through
//! [`FeaturedLineup`]: callers load the current rows, ask the lineup for the
//! operation, and persist exactly the returned [`PositionChange`]s in the same
//! transaction they loaded the rows in.
//!
//! ```
//! use dovana_core::lineup::{FeaturedLineup, LineupEntry};
//! use dovana_core::models::MoveDirection;
//!
//! let mut lineup = FeaturedLineup::from_entries([
//!     LineupEntry::new(10, 0),
//!     LineupEntry::new(11, 1),
//!     LineupEntry::new(12, 2),
//! ]);
//! let changes = lineup.move_entry(11, MoveDirection::Down).unwrap();
//! assert_eq!(changes.len(), 2);
//! assert_eq!(lineup.ids(), vec![10, 12, 11]);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::limits::MAX_FEATURED_ITEMS;
use crate::errors::{AppError, AppResult};
use crate::models::MoveDirection;

/// Message returned when the carousel is full
pub const CAPACITY_MESSAGE: &str = "Maximum number of featured items reached";
/// Message returned for a move past either end
pub const BOUNDARY_MESSAGE: &str = "Cannot move item in that direction";

/// Row id with its stored position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    /// Featured row id
    pub id: i64,
    /// Position as currently stored
    pub position: i64,
}

impl LineupEntry {
    /// Pair a row id with its position
    #[must_use]
    pub const fn new(id: i64, position: i64) -> Self {
        Self { id, position }
    }
}

/// A position update the database layer must persist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    /// Featured row id
    pub id: i64,
    /// Stored position before the operation
    pub from: i64,
    /// Position after the operation
    pub to: i64,
}

/// Carousel rows in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedLineup {
    entries: Vec<LineupEntry>,
    capacity: usize,
}

impl FeaturedLineup {
    /// Build a lineup from stored rows in any order, with the default capacity
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = LineupEntry>) -> Self {
        Self::with_capacity(entries, MAX_FEATURED_ITEMS)
    }

    /// Build a lineup with an explicit capacity
    #[must_use]
    pub fn with_capacity(entries: impl IntoIterator<Item = LineupEntry>, capacity: usize) -> Self {
        let mut entries: Vec<LineupEntry> = entries.into_iter().collect();
        entries.sort_by_key(|entry| (entry.position, entry.id));
        Self { entries, capacity }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the carousel is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether another row can be appended
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Row ids in display order
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Rows in display order
    #[must_use]
    pub fn entries(&self) -> &[LineupEntry] {
        &self.entries
    }

    /// Whether positions are exactly `0..len` without gaps or duplicates
    #[must_use]
    pub fn is_dense(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(index, entry)| entry.position == index as i64)
    }

    fn index_of(&self, id: i64) -> AppResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| AppError::not_found(format!("Featured item {id}")))
    }

    /// Position the next appended row will receive, `max + 1` or `0`
    ///
    /// # Errors
    ///
    /// Returns a capacity error when the carousel is full
    pub fn next_position(&self) -> AppResult<i64> {
        if self.is_full() {
            return Err(AppError::capacity_exceeded(CAPACITY_MESSAGE).with_details(
                serde_json::json!({ "max_featured_items": self.capacity }),
            ));
        }
        Ok(self.entries.last().map_or(0, |entry| entry.position + 1))
    }

    /// Append a row at the end and return its position
    ///
    /// # Errors
    ///
    /// Returns a capacity error when the carousel is full
    pub fn append(&mut self, id: i64) -> AppResult<i64> {
        let position = self.next_position()?;
        self.entries.push(LineupEntry::new(id, position));
        Ok(position)
    }

    /// Remove a row and close the gap it leaves
    ///
    /// Changes are returned in ascending position order, so applying them one
    /// by one never collides with a row that has not moved yet.
    ///
    /// # Errors
    ///
    /// Returns not-found when `id` is not in the lineup
    pub fn remove(&mut self, id: i64) -> AppResult<Vec<PositionChange>> {
        let index = self.index_of(id)?;
        let removed = self.entries.remove(index);

        let changes = self.entries[index..]
            .iter_mut()
            .filter(|entry| entry.position > removed.position)
            .map(|entry| {
                let change = PositionChange {
                    id: entry.id,
                    from: entry.position,
                    to: entry.position - 1,
                };
                entry.position -= 1;
                change
            })
            .collect();
        Ok(changes)
    }

    /// Swap a row with its neighbour in the given direction
    ///
    /// Exactly two positions are exchanged.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id and a boundary error when moving
    /// the first row up or the last row down
    pub fn move_entry(&mut self, id: i64, direction: MoveDirection) -> AppResult<[PositionChange; 2]> {
        let index = self.index_of(id)?;
        let neighbour = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.entries.len() => index + 1,
            _ => return Err(AppError::boundary(BOUNDARY_MESSAGE)),
        };

        let moved = self.entries[index];
        let other = self.entries[neighbour];
        self.entries.swap(index, neighbour);
        self.entries[neighbour].position = other.position;
        self.entries[index].position = moved.position;

        Ok([
            PositionChange {
                id: moved.id,
                from: moved.position,
                to: other.position,
            },
            PositionChange {
                id: other.id,
                from: other.position,
                to: moved.position,
            },
        ])
    }

    /// Renumber rows `0..n` in ascending id order
    ///
    /// Only rows whose position actually changes are returned.
    pub fn reset_by_id(&mut self) -> Vec<PositionChange> {
        self.entries.sort_by_key(|entry| entry.id);
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(index, entry)| {
                let to = index as i64;
                if entry.position == to {
                    return None;
                }
                let change = PositionChange {
                    id: entry.id,
                    from: entry.position,
                    to,
                };
                entry.position = to;
                Some(change)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    const A: i64 = 1;
    const B: i64 = 2;
    const C: i64 = 3;

    fn abc() -> FeaturedLineup {
        FeaturedLineup::from_entries([
            LineupEntry::new(A, 0),
            LineupEntry::new(B, 1),
            LineupEntry::new(C, 2),
        ])
    }

    #[test]
    fn test_append_uses_max_plus_one() {
        let mut lineup = FeaturedLineup::from_entries([]);
        assert_eq!(lineup.append(7).unwrap(), 0);
        assert_eq!(lineup.append(8).unwrap(), 1);
        assert!(lineup.is_dense());
    }

    #[test]
    fn test_sixth_append_is_rejected() {
        let mut lineup = FeaturedLineup::from_entries([]);
        for id in 1..=5 {
            lineup.append(id).unwrap();
        }
        let before = lineup.clone();

        let err = lineup.append(6).unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityExceeded);
        assert_eq!(err.message, CAPACITY_MESSAGE);
        assert_eq!(lineup, before);
    }

    #[test]
    fn test_remove_shifts_later_rows_down_by_one() {
        let mut lineup = FeaturedLineup::from_entries((1..=5).map(|id| LineupEntry::new(id, id - 1)));

        let changes = lineup.remove(2).unwrap();

        assert_eq!(
            changes,
            vec![
                PositionChange { id: 3, from: 2, to: 1 },
                PositionChange { id: 4, from: 3, to: 2 },
                PositionChange { id: 5, from: 4, to: 3 },
            ]
        );
        assert_eq!(lineup.ids(), vec![1, 3, 4, 5]);
        assert!(lineup.is_dense());
    }

    #[test]
    fn test_remove_last_needs_no_changes() {
        let mut lineup = abc();
        assert!(lineup.remove(C).unwrap().is_empty());
        assert!(lineup.is_dense());
    }

    #[test]
    fn test_remove_unknown_is_not_found() {
        let mut lineup = abc();
        let err = lineup.remove(99).unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
        assert_eq!(lineup, abc());
    }

    #[test]
    fn test_move_down_then_first_up_hits_boundary() {
        let mut lineup = abc();

        let changes = lineup.move_entry(B, MoveDirection::Down).unwrap();
        assert_eq!(
            changes,
            [
                PositionChange { id: B, from: 1, to: 2 },
                PositionChange { id: C, from: 2, to: 1 },
            ]
        );
        assert_eq!(lineup.ids(), vec![A, C, B]);

        let err = lineup.move_entry(A, MoveDirection::Up).unwrap_err();
        assert_eq!(err.code, ErrorCode::BoundaryReached);
        assert_eq!(err.message, BOUNDARY_MESSAGE);
        assert_eq!(lineup.ids(), vec![A, C, B]);
    }

    #[test]
    fn test_last_down_hits_boundary() {
        let mut lineup = abc();
        assert!(lineup.move_entry(C, MoveDirection::Down).is_err());
        assert_eq!(lineup, abc());
    }

    #[test]
    fn test_single_row_cannot_move() {
        let mut lineup = FeaturedLineup::from_entries([LineupEntry::new(A, 0)]);
        assert!(lineup.move_entry(A, MoveDirection::Up).is_err());
        assert!(lineup.move_entry(A, MoveDirection::Down).is_err());
    }

    #[test]
    fn test_reset_renumbers_by_id() {
        let mut lineup = FeaturedLineup::from_entries([
            LineupEntry::new(9, 0),
            LineupEntry::new(4, 3),
            LineupEntry::new(6, 7),
        ]);
        assert!(!lineup.is_dense());

        let changes = lineup.reset_by_id();

        assert_eq!(lineup.ids(), vec![4, 6, 9]);
        assert!(lineup.is_dense());
        assert_eq!(
            changes,
            vec![
                PositionChange { id: 4, from: 3, to: 0 },
                PositionChange { id: 6, from: 7, to: 1 },
                PositionChange { id: 9, from: 0, to: 2 },
            ]
        );
    }

    #[test]
    fn test_mixed_sequence_stays_dense() {
        let mut lineup = FeaturedLineup::from_entries([]);
        let mut next_id = 1;
        // Deterministic walk over every operation, including failing ones
        for step in 0_i64..200 {
            match step % 4 {
                0 | 1 => {
                    if lineup.append(next_id).is_ok() {
                        next_id += 1;
                    }
                }
                2 => {
                    let ids = lineup.ids();
                    if !ids.is_empty() {
                        let target = ids[(step as usize / 4) % ids.len()];
                        let direction = if step % 8 == 2 {
                            MoveDirection::Up
                        } else {
                            MoveDirection::Down
                        };
                        let _ = lineup.move_entry(target, direction);
                    }
                }
                _ => {
                    let ids = lineup.ids();
                    if step % 3 == 0 && !ids.is_empty() {
                        let target = ids[(step as usize) % ids.len()];
                        lineup.remove(target).unwrap();
                    }
                }
            }
            assert!(lineup.is_dense(), "not dense after step {step}");
            assert!(lineup.len() <= MAX_FEATURED_ITEMS);
        }
    }
}
