use std::fmt::Display;

/// A solution to a single puzzle.
///
/// Implementations map raw puzzle text to an answer value. The harness
/// obtains a fresh solution from a caller-supplied factory for every
/// invocation, so `solve` may freely consume internal state.
pub trait Solution {
    /// The answer type. Must be comparable for verification against expected
    /// values, and renderable for reports.
    type Answer: PartialEq + Display;

    /// Solves the puzzle for the given input.
    fn solve(&mut self, input: &str) -> anyhow::Result<Self::Answer>;
}
