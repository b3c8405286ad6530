//! Capacity growth configuration for [`Sequence`](crate::Sequence) appends.

/// Decides how large a reallocated store is when an append overflows.
///
/// Only the reallocation size is configurable. Whether an append reuses the
/// existing store is fixed: it does exactly when the new length fits in the
/// current capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Capacities below this double on growth; larger ones grow by roughly 1.25x.
    pub small_threshold: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            small_threshold: 256,
        }
    }
}

impl GrowthPolicy {
    /// A policy that always doubles (never switches to proportional growth).
    #[must_use]
    pub fn doubling() -> Self {
        Self {
            small_threshold: usize::MAX,
        }
    }

    /// A policy that allocates exactly the required length.
    #[must_use]
    pub fn exact() -> Self {
        Self { small_threshold: 0 }
    }

    /// Builder method to set the small-capacity threshold.
    #[must_use]
    pub fn with_small_threshold(mut self, threshold: usize) -> Self {
        self.small_threshold = threshold;
        self
    }

    /// Returns the capacity to allocate when `required` slots are needed and
    /// the current capacity is `old_cap`.
    ///
    /// The result is always at least `required`.
    #[must_use]
    pub fn next_capacity(&self, old_cap: usize, required: usize) -> usize {
        if self.small_threshold == 0 {
            return required;
        }
        let doubled = old_cap.saturating_mul(2);
        if required > doubled {
            return required;
        }
        if old_cap < self.small_threshold {
            return doubled;
        }

        let step_base = self.small_threshold.saturating_mul(3);
        let mut cap = old_cap;
        while cap < required {
            cap = cap.saturating_add(cap.saturating_add(step_base) / 4);
        }
        cap
    }
}
