//! Random number port
//!
//! Every random decision in the roll pipeline goes through this port so
//! tests can script the draws.

#[cfg(test)]
use mockall::automock;

/// Source of uniformly distributed integers
///
/// Implementations need not be cryptographically secure, but concurrent
/// callers must draw independently of each other.
#[cfg_attr(test, automock)]
pub trait RandomSource: Send + Sync {
    /// Draw a uniform integer in `[0, n)`
    ///
    /// `n` is always non-zero when called from this crate.
    fn below(&self, n: u32) -> u32;
}
