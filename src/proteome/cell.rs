//! Immutable proteome snapshots.

use crate::errors::InvalidProteomeState;
use crate::proteome::ReferenceProteome;
use std::sync::Arc;

/// One cell's proteome: an integer copy count per protein type.
///
/// A `Cell` is an immutable value. Division never mutates a parent in place;
/// it always produces two new cells. Counts are stored in the canonical
/// ordering of the shared [`ReferenceProteome`], so every cell in a run has
/// exactly the reference's key set.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Reference this cell's counts are aligned with
    proteome: Arc<ReferenceProteome>,
    /// Copy counts in the reference's canonical order
    counts: Vec<u64>,
}

impl Cell {
    /// Create a cell from a count vector aligned with the reference order.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if the count vector does not cover exactly
    /// the reference's protein types.
    pub fn new(
        proteome: Arc<ReferenceProteome>,
        counts: Vec<u64>,
    ) -> Result<Self, InvalidProteomeState> {
        if counts.len() != proteome.len() {
            return Err(InvalidProteomeState::LengthMismatch {
                expected: proteome.len(),
                actual: counts.len(),
            });
        }
        Ok(Self { proteome, counts })
    }

    /// Internal constructor for counts produced against the same reference.
    /// Length agreement is guaranteed by the caller.
    pub(crate) fn with_counts(proteome: Arc<ReferenceProteome>, counts: Vec<u64>) -> Self {
        debug_assert_eq!(counts.len(), proteome.len());
        Self { proteome, counts }
    }

    /// The reference proteome this cell is aligned with.
    pub fn reference(&self) -> &Arc<ReferenceProteome> {
        &self.proteome
    }

    /// Copy counts in canonical order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Copy count for the protein at `index`.
    pub fn count(&self, index: usize) -> Option<u64> {
        self.counts.get(index).copied()
    }

    /// Copy count for a protein by id.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.proteome.index_of(name).map(|i| self.counts[i])
    }

    /// Number of protein types.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the cell tracks no protein types.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of protein copies across all types.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_reference() -> Arc<ReferenceProteome> {
        Arc::new(ReferenceProteome::new([("A", 100.0), ("B", 50.0)]).unwrap())
    }

    #[test]
    fn test_cell_new() {
        let reference = test_reference();
        let cell = Cell::new(reference, vec![90, 55]).unwrap();

        assert_eq!(cell.len(), 2);
        assert_eq!(cell.get("A"), Some(90));
        assert_eq!(cell.get("B"), Some(55));
        assert_eq!(cell.get("Z"), None);
        assert_eq!(cell.total(), 145);
    }

    #[test]
    fn test_cell_length_mismatch() {
        let reference = test_reference();
        let result = Cell::new(reference, vec![90]);

        assert_eq!(
            result.unwrap_err(),
            InvalidProteomeState::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_cell_count_by_index() {
        let reference = test_reference();
        let cell = Cell::new(reference, vec![90, 55]).unwrap();

        // Canonical order is sorted: A then B.
        assert_eq!(cell.count(0), Some(90));
        assert_eq!(cell.count(1), Some(55));
        assert_eq!(cell.count(2), None);
    }

    #[test]
    fn test_cell_shares_reference() {
        let reference = test_reference();
        let cell = Cell::new(reference.clone(), vec![1, 2]).unwrap();

        assert!(Arc::ptr_eq(cell.reference(), &reference));
    }
}
