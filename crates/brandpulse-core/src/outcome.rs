//! Result type for operations that absorb their own failures.
//!
//! The store and the fetcher log failures and carry on. `Outcome` keeps the
//! distinction between "nothing there" and "it broke" visible to callers
//! while [`Outcome::into_value`] gives the default treat-both-as-empty view.

/// Success, nothing to report, or a failure that was logged and absorbed.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Empty,
    Failed(String),
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The failure reason, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Outcome::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Empty => Outcome::Empty,
            Outcome::Failed(reason) => Outcome::Failed(reason),
        }
    }
}

impl<T: Default> Outcome<T> {
    /// Collapse `Empty` and `Failed` into `T::default()`.
    pub fn into_value(self) -> T {
        match self {
            Outcome::Success(v) => v,
            Outcome::Empty | Outcome::Failed(_) => T::default(),
        }
    }
}
