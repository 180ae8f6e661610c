//! The reference proteome: expected copy counts per protein.

use crate::errors::InvalidConfiguration;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Expected copy counts for every protein tracked by the simulation.
///
/// Protein ids are stored sorted, giving every derived [`Cell`] a single
/// fixed ordering. The mapping is immutable once constructed; it is supplied
/// once at configuration time and shared via `Arc` by every cell, sampler,
/// and classifier in a run.
///
/// Expected counts are non-negative and finite. Zero is a valid expectation
/// (a protein that is absent on average still segregates without error).
///
/// [`Cell`]: crate::proteome::Cell
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceProteome {
    /// Protein ids, sorted and unique
    names: Vec<Arc<str>>,
    /// Expected copy counts, aligned with `names`
    means: Vec<f64>,
}

impl ReferenceProteome {
    /// Create a reference proteome from `(id, expected count)` pairs.
    ///
    /// # Errors
    /// Returns an error if the input is empty, contains a duplicate id, or
    /// contains a negative or non-finite expected count.
    pub fn new<I, S>(entries: I) -> Result<Self, InvalidConfiguration>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<Arc<str>>,
    {
        let mut pairs: Vec<(Arc<str>, f64)> = entries
            .into_iter()
            .map(|(name, mean)| (name.into(), mean))
            .collect();

        if pairs.is_empty() {
            return Err(InvalidConfiguration::EmptyReference);
        }

        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        for pair in pairs.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(InvalidConfiguration::DuplicateProtein(
                    pair[0].0.to_string(),
                ));
            }
        }

        for (name, mean) in &pairs {
            if !mean.is_finite() {
                return Err(InvalidConfiguration::NonFinite {
                    name: "reference mean",
                    value: *mean,
                });
            }
            if *mean < 0.0 {
                return Err(InvalidConfiguration::NegativeMean {
                    protein: name.to_string(),
                    value: *mean,
                });
            }
        }

        let (names, means) = pairs.into_iter().unzip();
        Ok(Self { names, means })
    }

    /// Create a reference proteome from a map (the JSON input surface).
    pub fn from_map(map: BTreeMap<String, f64>) -> Result<Self, InvalidConfiguration> {
        Self::new(map)
    }

    /// Export as a map, e.g. for persistence alongside a run record.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.names
            .iter()
            .map(|n| n.to_string())
            .zip(self.means.iter().copied())
            .collect()
    }

    /// Number of protein types.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the proteome has no proteins. Always false for a constructed
    /// instance; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Protein ids in the canonical (sorted) order.
    pub fn names(&self) -> &[Arc<str>] {
        &self.names
    }

    /// Expected counts in the canonical order.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Expected count for the protein at `index`.
    pub fn mean(&self, index: usize) -> Option<f64> {
        self.means.get(index).copied()
    }

    /// Expected count for a protein by id.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.index_of(name).map(|i| self.means[i])
    }

    /// Canonical index of a protein id.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .binary_search_by(|probe| probe.as_ref().cmp(name))
            .ok()
    }

    /// Iterate over `(id, expected count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, f64)> {
        self.names.iter().zip(self.means.iter().copied())
    }
}
