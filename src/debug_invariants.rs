//! Self-checks for derived tables.
//!
//! Debug builds validate every freshly built structure; release builds only do
//! so with the `check-invariants` (or `strict-invariants`) feature.

use crate::lagrange_error::LagrangeError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), LagrangeError>;

    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "debug_assert_invariants");
    }
}

/// Run a fallible check and panic on error when invariant checking is
/// compiled in. The trailing tokens are prepended to the panic message.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
