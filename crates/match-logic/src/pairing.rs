//! Ordered round-robin pairings
//!
//! Every roster entry meets every entry, itself included, once as row and
//! once as column. A pairing is identified by its matrix cell
//! `row * n + column`, which also keys the per-match generator.

/// Number of matches in a full ordered round-robin of `participant_count`
pub fn calculate_match_count(participant_count: u32) -> u64 {
    participant_count as u64 * participant_count as u64
}

/// Map a matrix cell to its `(row, column)` pairing
///
/// Returns `None` if the cell lies outside the `n × n` matrix.
pub fn cell_to_pair(cell: u64, participant_count: u32) -> Option<(u32, u32)> {
    let n = participant_count as u64;
    if cell >= n * n {
        return None;
    }
    Some(((cell / n) as u32, (cell % n) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_match_count() {
        assert_eq!(calculate_match_count(0), 0);
        assert_eq!(calculate_match_count(1), 1);
        assert_eq!(calculate_match_count(7), 49);
    }

    #[test]
    fn test_cells_cover_matrix_once() {
        let pairs: Vec<_> = (0..calculate_match_count(5))
            .map(|cell| cell_to_pair(cell, 5).unwrap())
            .collect();
        assert_eq!(pairs.len(), 25);

        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), 25);

        for i in 0..5 {
            assert!(unique.contains(&(i, i)), "self-play ({}, {}) missing", i, i);
        }
    }

    #[test]
    fn test_cells_are_row_major() {
        assert_eq!(cell_to_pair(0, 3), Some((0, 0)));
        assert_eq!(cell_to_pair(1, 3), Some((0, 1)));
        assert_eq!(cell_to_pair(3, 3), Some((1, 0)));
        assert_eq!(cell_to_pair(8, 3), Some((2, 2)));
    }

    #[test]
    fn test_cell_out_of_range() {
        assert_eq!(cell_to_pair(9, 3), None);
        assert_eq!(cell_to_pair(0, 0), None);
    }
}
