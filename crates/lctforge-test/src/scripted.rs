//! Primitive sources replaying a scripted list.
//!
//! The raw input of a scripted source is the primitive list itself. Each
//! run files the valid primitives into per-bin best/second slots in input
//! order, so the first primitive listed for a bin becomes its best.

use lctforge_core::constants::{MAX_ALCT_TBINS, MAX_CLCT_TBINS};
use lctforge_core::{AnodeLct, CathodeLct, LctSource};

/// A primitive a [`ScriptedSource`] can file by bunch crossing.
pub trait ScriptedPrimitive: Copy + Default {
    /// Buffer depth of the finder producing this primitive.
    const DEPTH: usize;

    fn is_valid(&self) -> bool;

    fn bx(&self) -> i32;
}

impl ScriptedPrimitive for AnodeLct {
    const DEPTH: usize = MAX_ALCT_TBINS;

    fn is_valid(&self) -> bool {
        AnodeLct::is_valid(self)
    }

    fn bx(&self) -> i32 {
        self.bx
    }
}

impl ScriptedPrimitive for CathodeLct {
    const DEPTH: usize = MAX_CLCT_TBINS;

    fn is_valid(&self) -> bool {
        CathodeLct::is_valid(self)
    }

    fn bx(&self) -> i32 {
        self.bx
    }
}

/// Source that replays the primitives it is given.
#[derive(Debug, Clone)]
pub struct ScriptedSource<T> {
    best: Vec<T>,
    second: Vec<T>,
    high_multiplicity_bits: u8,
    /// Number of completed runs.
    pub runs: usize,
    /// Number of clears received.
    pub clears: usize,
}

/// Scripted anode finder.
pub type ScriptedAnodeSource = ScriptedSource<AnodeLct>;

/// Scripted cathode finder.
pub type ScriptedCathodeSource = ScriptedSource<CathodeLct>;

impl<T: ScriptedPrimitive> ScriptedSource<T> {
    pub fn new() -> Self {
        Self {
            best: vec![T::default(); T::DEPTH],
            second: vec![T::default(); T::DEPTH],
            high_multiplicity_bits: 0,
            runs: 0,
            clears: 0,
        }
    }

    /// Reports the given high-multiplicity bits after every run.
    pub fn with_high_multiplicity_bits(mut self, bits: u8) -> Self {
        self.high_multiplicity_bits = bits;
        self
    }

    fn reset_slots(&mut self) {
        self.best.iter_mut().for_each(|slot| *slot = T::default());
        self.second.iter_mut().for_each(|slot| *slot = T::default());
    }
}

impl<T: ScriptedPrimitive> Default for ScriptedSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ScriptedPrimitive> LctSource for ScriptedSource<T> {
    type Input = [T];
    type Lct = T;

    fn run(&mut self, input: &[T]) -> Vec<T> {
        self.reset_slots();
        let mut filed = Vec::new();
        for primitive in input.iter().filter(|p| p.is_valid()) {
            let Ok(bx) = usize::try_from(primitive.bx()) else {
                continue;
            };
            if bx >= T::DEPTH {
                continue;
            }
            if !self.best[bx].is_valid() {
                self.best[bx] = *primitive;
            } else if !self.second[bx].is_valid() {
                self.second[bx] = *primitive;
            } else {
                continue;
            }
            filed.push(*primitive);
        }
        self.runs += 1;
        filed
    }

    fn best(&self, bx: usize) -> T {
        self.best.get(bx).copied().unwrap_or_default()
    }

    fn second(&self, bx: usize) -> T {
        self.second.get(bx).copied().unwrap_or_default()
    }

    fn high_multiplicity_bits(&self) -> u8 {
        self.high_multiplicity_bits
    }

    fn clear(&mut self) {
        self.reset_slots();
        self.clears += 1;
    }
}

/// A quality-3 anode primitive at `bx`, key wire group 20.
pub fn alct(bx: i32) -> AnodeLct {
    AnodeLct::new(3, 20, bx)
}

/// A quality-6, pattern-10 cathode primitive at `bx`, key half-strip 40.
pub fn clct(bx: i32) -> CathodeLct {
    CathodeLct::new(6, 10, 40, bx)
}
