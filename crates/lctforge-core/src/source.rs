//! Interface to the upstream primitive finders.
//!
//! The motherboard never looks at raw detector data. It hands the raw input
//! to an [`LctSource`], then reads back the best and second-best primitive
//! of every time bin.

/// A primitive finder processor that turns raw digis into per-bin
/// best/second-best primitives.
///
/// # Contract
///
/// After [`run`](LctSource::run), `best(bx)` and `second(bx)` must be
/// answerable for every `bx` in `0..depth`. A valid primitive returned for
/// bin `bx` must report that same `bx`. Bins without a primitive return an
/// invalid (default) value.
pub trait LctSource {
    /// Raw input consumed by one pass (wire or comparator digis).
    type Input: ?Sized;

    /// Primitive type produced.
    type Lct: Copy;

    /// Runs the finder over one event's raw input and returns all primitives.
    fn run(&mut self, input: &Self::Input) -> Vec<Self::Lct>;

    /// Best primitive in bin `bx`.
    fn best(&self, bx: usize) -> Self::Lct;

    /// Second-best primitive in bin `bx`.
    fn second(&self, bx: usize) -> Self::Lct;

    /// High-multiplicity trigger bits computed during the last run.
    fn high_multiplicity_bits(&self) -> u8 {
        0
    }

    /// Resets per-event state before the next run.
    fn clear(&mut self) {}
}
