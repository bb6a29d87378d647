//! Opt-in structural self checks.
//!
//! Checks run in debug builds, or in any build with the `check-invariants`
//! feature. Release builds without the feature compile them out.

use crate::manifold_error::ManifoldError;

/// Run a fallible check and panic on error when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), ManifoldError>;

    /// Panic on the first violated invariant when checking is enabled.
    fn debug_assert_invariants(&self) {
        debug_invariants!(self.validate_invariants(), "structural check");
    }
}
