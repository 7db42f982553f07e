//! Per-bin storage of first and second LCTs.

use lctforge_core::constants::MAX_LCT_TBINS;
use lctforge_core::CorrelatedLct;
use thiserror::Error;

/// Why an LCT could not be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("bx {bx} outside the LCT buffer [0, {max})", max = MAX_LCT_TBINS)]
    OutOfTime { bx: i32 },

    #[error("track number {0} is neither first nor second")]
    TrackNumber(u8),
}

/// First- and second-rank LCT of every bunch crossing in the LCT buffer.
///
/// A new store is created for each pass. Storing into an occupied slot
/// replaces the earlier LCT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LctStore {
    first: [CorrelatedLct; MAX_LCT_TBINS],
    second: [CorrelatedLct; MAX_LCT_TBINS],
}

impl LctStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            first: [CorrelatedLct::default(); MAX_LCT_TBINS],
            second: [CorrelatedLct::default(); MAX_LCT_TBINS],
        }
    }

    /// Stores an LCT in the slot named by its rank and bunch crossing.
    ///
    /// # Errors
    ///
    /// Fails when the bunch crossing lies outside the buffer or the rank is
    /// not 1 or 2; the store is left untouched.
    pub fn insert(&mut self, lct: CorrelatedLct) -> Result<(), StoreError> {
        if lct.bx < 0 || lct.bx as usize >= MAX_LCT_TBINS {
            return Err(StoreError::OutOfTime { bx: lct.bx });
        }
        let bx = lct.bx as usize;
        match lct.track_number {
            1 => self.first[bx] = lct,
            2 => self.second[bx] = lct,
            rank => return Err(StoreError::TrackNumber(rank)),
        }
        Ok(())
    }

    /// First-rank LCT at `bx`.
    pub fn first(&self, bx: usize) -> &CorrelatedLct {
        &self.first[bx]
    }

    /// Second-rank LCT at `bx`.
    pub fn second(&self, bx: usize) -> &CorrelatedLct {
        &self.second[bx]
    }

    /// Valid LCTs in increasing bunch crossing, first before second.
    pub fn iter(&self) -> impl Iterator<Item = &CorrelatedLct> + '_ {
        self.first
            .iter()
            .zip(self.second.iter())
            .flat_map(|(first, second)| [first, second])
            .filter(|lct| lct.is_valid())
    }

    /// Number of valid LCTs.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LctStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lct(bx: i32, track_number: u8, quality: u8) -> CorrelatedLct {
        CorrelatedLct {
            valid: true,
            track_number,
            quality,
            bx,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = LctStore::new();
        assert!(store.is_empty());
        assert!(!store.first(0).is_valid());
    }

    #[test]
    fn test_insert_by_rank() {
        let mut store = LctStore::new();
        store.insert(lct(5, 1, 11)).unwrap();
        store.insert(lct(5, 2, 12)).unwrap();

        assert_eq!(store.first(5).quality, 11);
        assert_eq!(store.second(5).quality, 12);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_replaces_same_slot() {
        let mut store = LctStore::new();
        store.insert(lct(5, 1, 11)).unwrap();
        store.insert(lct(5, 1, 14)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.first(5).quality, 14);
    }

    #[test]
    fn test_insert_rejects_out_of_time() {
        let mut store = LctStore::new();
        assert_eq!(
            store.insert(lct(-1, 1, 11)),
            Err(StoreError::OutOfTime { bx: -1 })
        );
        assert_eq!(
            store.insert(lct(MAX_LCT_TBINS as i32, 1, 11)),
            Err(StoreError::OutOfTime { bx: 16 })
        );
        assert!(store.insert(lct((MAX_LCT_TBINS - 1) as i32, 1, 11)).is_ok());
        assert!(store.insert(lct(0, 1, 11)).is_ok());
    }

    #[test]
    fn test_insert_rejects_bad_rank() {
        let mut store = LctStore::new();
        assert_eq!(store.insert(lct(3, 3, 11)), Err(StoreError::TrackNumber(3)));
        assert_eq!(store.insert(lct(3, 0, 11)), Err(StoreError::TrackNumber(0)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_out_of_time_checked_before_rank() {
        let mut store = LctStore::new();
        assert_eq!(
            store.insert(lct(20, 3, 11)),
            Err(StoreError::OutOfTime { bx: 20 })
        );
    }

    #[test]
    fn test_iter_order() {
        let mut store = LctStore::new();
        store.insert(lct(9, 2, 1)).unwrap();
        store.insert(lct(9, 1, 2)).unwrap();
        store.insert(lct(3, 1, 3)).unwrap();

        let order: Vec<(i32, u8)> = store.iter().map(|l| (l.bx, l.track_number)).collect();
        assert_eq!(order, vec![(3, 1), (9, 1), (9, 2)]);
    }
}
