//! Variables with globally unique identities.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use serde::{de::Error, Deserialize, Deserializer, Serialize};

/// Identity of the next fresh variable.
///
/// This is the only process-wide mutable state of the calculus.
/// It never exceeds `u64::MAX`, which is therefore never handed out.
static NEXT: AtomicU64 = AtomicU64::new(0);

/// Take the next identity from a counter, unless it is exhausted.
fn take(next: &AtomicU64) -> Option<u64> {
    next.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1)).ok()
}

/// Variable, identified by a number that is never handed out twice.
///
/// Variables are never compared by name; two variables are equal
/// if and only if they stem from the same call to [`Var::fresh`]
/// (or were deserialized from the same identity).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Var(u64);

impl Var {
    /// Create a variable that is distinct from all variables created so far.
    ///
    /// ~~~
    /// # use linarrow::Var;
    /// assert_ne!(Var::fresh(), Var::fresh());
    /// ~~~
    pub fn fresh() -> Self {
        match take(&NEXT) {
            Some(id) => Self(id),
            None => panic!("variable identities exhausted"),
        }
    }

    /// Return the numeric identity of the variable.
    pub fn id(self) -> u64 {
        self.0
    }

    /// Recreate a variable with a given identity,
    /// making sure that no fresh variable will ever receive the same identity.
    fn reserve(id: u64) -> Option<Self> {
        NEXT.fetch_max(id.checked_add(1)?, Ordering::Relaxed);
        Some(Self(id))
    }
}

impl<'de> Deserialize<'de> for Var {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u64::deserialize(deserializer)?;
        Self::reserve(id).ok_or_else(|| D::Error::custom("variable identity out of range"))
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialized_identities_are_not_reused() {
        let far = Var::fresh().id() + 1000;
        let loaded: Var = serde_json::from_str(&far.to_string()).unwrap();
        assert_eq!(loaded.id(), far);
        assert!(Var::fresh().id() > far);
        assert!(serde_json::from_str::<Var>(&u64::MAX.to_string()).is_err());
    }

    #[test]
    fn counter_does_not_wrap() {
        let next = AtomicU64::new(u64::MAX - 1);
        assert_eq!(take(&next), Some(u64::MAX - 1));
        assert_eq!(take(&next), None);
        assert_eq!(next.load(Ordering::Relaxed), u64::MAX);
    }
}
