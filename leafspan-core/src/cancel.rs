//! Cooperative cancellation shared between a solver and its caller.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Cloneable handle over a shared cancellation flag.
///
/// Solvers poll [`CancellationToken::is_cancelled`] once at the top of every
/// recursive call and unwind as soon as it reports `true`. Cancellation is
/// advisory: work between two polls always completes.
///
/// # Examples
/// ```
/// use leafspan_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
/// assert!(!observer.is_cancelled());
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation for every clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once any clone has called [`CancellationToken::cancel`].
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
