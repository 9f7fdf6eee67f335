//! Request generations for discarding stale asynchronous results.
//!
//! Every time a form instance starts a new unit of background work it draws a
//! fresh [`RequestToken`] from its own [`Generation`]. When the work finishes,
//! the result is applied only if its token is still the current one. Older
//! work is allowed to finish; its result is simply dropped.

/// A token identifying one request issued by a [`Generation`].
///
/// Tokens from the same generation are totally ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Get the raw u64 value of this token.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A per-owner monotonic counter of request tokens.
///
/// Not shared between owners: two form instances each hold their own
/// generation and never observe each other's tokens.
#[derive(Debug, Default)]
pub struct Generation {
    issued: u64,
    current: Option<RequestToken>,
}

impl Generation {
    /// Create a generation with no issued tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token and make it the current one.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.current = Some(token);
        token
    }

    /// The most recently issued token, if it has not been retired.
    pub fn current(&self) -> Option<RequestToken> {
        self.current
    }

    /// Returns true if `token` is the current token.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token)
    }

    /// Retire the current token so that no outstanding request matches.
    ///
    /// Later calls to [`issue`](Self::issue) still produce larger tokens.
    pub fn retire(&mut self) {
        self.current = None;
    }

    /// Number of tokens issued so far.
    pub fn issued_count(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let mut generation = Generation::new();
        let a = generation.issue();
        let b = generation.issue();
        assert!(b > a);
        assert_eq!(generation.issued_count(), 2);
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut generation = Generation::new();
        let a = generation.issue();
        assert!(generation.is_current(a));

        let b = generation.issue();
        assert!(!generation.is_current(a));
        assert!(generation.is_current(b));
    }

    #[test]
    fn test_retire() {
        let mut generation = Generation::new();
        let a = generation.issue();
        generation.retire();
        assert!(!generation.is_current(a));
        assert_eq!(generation.current(), None);

        let b = generation.issue();
        assert!(b > a);
    }

    #[test]
    fn test_generations_are_independent() {
        let mut first = Generation::new();
        let mut second = Generation::new();
        let a = first.issue();
        first.issue();
        let b = second.issue();
        assert_eq!(a.as_u64(), b.as_u64());
        assert!(second.is_current(b));
        assert!(!first.is_current(a));
    }
}
