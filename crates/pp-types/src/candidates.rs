//! Candidate tables and the selections recommenders produce from them.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{PpError, PpResult};
use crate::matrix::{CandidateBatch, Matrix};

/// Stable identifier of one candidate experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CandidateId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Ordered pool of untested candidates, each with a feature vector of the
/// same dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTable {
    ids: Vec<CandidateId>,
    features: Matrix,
}

impl CandidateTable {
    pub fn new(ids: Vec<CandidateId>, features: Matrix) -> PpResult<Self> {
        if ids.len() != features.rows() {
            return Err(PpError::Validation(format!(
                "candidate table has {} ids but {} feature rows",
                ids.len(),
                features.rows()
            )));
        }

        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(*id) {
                return Err(PpError::Validation(format!("duplicate candidate id {id}")));
            }
        }

        Ok(Self { ids, features })
    }

    /// Build a table from `(id, features)` pairs.
    pub fn from_rows<I, R>(rows: I) -> PpResult<Self>
    where
        I: IntoIterator<Item = (CandidateId, R)>,
        R: AsRef<[f64]>,
    {
        let (ids, vectors): (Vec<CandidateId>, Vec<R>) = rows.into_iter().unzip();
        let features = Matrix::from_rows(&vectors)?;
        Self::new(ids, features)
    }

    /// Table whose ids are the row positions `0..n`.
    pub fn with_positional_ids(features: Matrix) -> Self {
        let ids = (0..features.rows() as u64).map(CandidateId).collect();
        Self { ids, features }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Feature dimension D.
    pub fn dim(&self) -> usize {
        self.features.cols()
    }

    pub fn ids(&self) -> &[CandidateId] {
        &self.ids
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    /// Dense copy of the full numeric content.
    pub fn to_matrix(&self) -> Matrix {
        self.features.clone()
    }

    /// Every candidate as its own single-member group, shape `(n, 1, D)`.
    pub fn to_batch(&self) -> CandidateBatch {
        CandidateBatch::singleton_groups(&self.features)
    }

    pub fn id_at(&self, position: usize) -> Option<CandidateId> {
        self.ids.get(position).copied()
    }

    /// Map row positions to ids.
    pub fn ids_at(&self, positions: &[usize]) -> PpResult<Vec<CandidateId>> {
        positions
            .iter()
            .map(|&p| {
                self.id_at(p).ok_or_else(|| {
                    PpError::Validation(format!(
                        "position {p} out of range for table of {} candidates",
                        self.len()
                    ))
                })
            })
            .collect()
    }

    /// Draw `n` distinct ids uniformly at random.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> PpResult<Vec<CandidateId>> {
        if n > self.len() {
            return Err(PpError::Sampling {
                requested: n,
                available: self.len(),
            });
        }
        Ok(rand::seq::index::sample(rng, self.len(), n)
            .into_iter()
            .map(|p| self.ids[p])
            .collect())
    }
}

/// Candidate ids chosen in one recommendation round. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<CandidateId>,
}

impl Selection {
    pub fn new(ids: Vec<CandidateId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[CandidateId] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<CandidateId> {
        self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateId> {
        self.ids.iter()
    }
}

impl IntoIterator for Selection {
    type Item = CandidateId;
    type IntoIter = std::vec::IntoIter<CandidateId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl FromIterator<CandidateId> for Selection {
    fn from_iter<T: IntoIterator<Item = CandidateId>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_table() -> CandidateTable {
        CandidateTable::from_rows(vec![
            (CandidateId(10), [0.0, 1.0]),
            (CandidateId(20), [2.0, 3.0]),
            (CandidateId(30), [4.0, 5.0]),
            (CandidateId(40), [6.0, 7.0]),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = CandidateTable::from_rows(vec![(CandidateId(1), [0.0]), (CandidateId(1), [1.0])])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate candidate id 1"));
    }

    #[test]
    fn rejects_id_row_mismatch() {
        let features = Matrix::from_rows(&[[0.0], [1.0]]).unwrap();
        assert!(CandidateTable::new(vec![CandidateId(1)], features).is_err());
    }

    #[test]
    fn positional_lookup() {
        let table = sample_table();
        assert_eq!(table.dim(), 2);
        assert_eq!(table.id_at(2), Some(CandidateId(30)));
        assert_eq!(table.id_at(4), None);
        assert_eq!(
            table.ids_at(&[3, 0]).unwrap(),
            vec![CandidateId(40), CandidateId(10)]
        );
        assert!(table.ids_at(&[7]).is_err());
    }

    #[test]
    fn batch_view_has_unit_groups() {
        let table = sample_table();
        let batch = table.to_batch();
        assert_eq!(batch.shape(), (4, 1, 2));
        assert_eq!(batch.point(3, 0), Some(&[6.0, 7.0][..]));
    }

    #[test]
    fn sample_without_replacement() {
        let table = sample_table();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let picked = table.sample(4, &mut rng).unwrap();
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(picked.iter().all(|id| table.ids().contains(id)));
    }

    #[test]
    fn sample_more_than_available_fails() {
        let table = sample_table();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        match table.sample(5, &mut rng) {
            Err(PpError::Sampling {
                requested,
                available,
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(available, 4);
            }
            other => panic!("expected sampling error, got {other:?}"),
        }
    }

    #[test]
    fn selection_collects_ids() {
        let selection: Selection = vec![CandidateId(3), CandidateId(1)].into_iter().collect();
        assert_eq!(selection.len(), 2);
        assert!(selection.contains(CandidateId(1)));
        assert!(!selection.contains(CandidateId(2)));
    }
}
