use std::time::{Duration, Instant};

/// Wall clock budget of a single search.
///
/// The deadline is `time_left - safety_margin` after construction, so whoever asked for the move still has the
/// margin to receive it.
#[derive(Debug, Clone, Copy)]
pub struct SearchTimer {
    start: Instant,
    deadline: Option<Instant>,
}

impl SearchTimer {
    pub fn new(time_left: Duration, safety_margin: Duration) -> Self {
        let start = Instant::now();

        SearchTimer {
            start,
            // budgets too large to represent never expire
            deadline: start.checked_add(time_left.saturating_sub(safety_margin)),
        }
    }

    pub fn unlimited() -> Self {
        SearchTimer {
            start: Instant::now(),
            deadline: None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn remaining(&self) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Whether something expected to take `estimated_cost` can still finish before the deadline.
    pub fn should_continue(&self, estimated_cost: Duration) -> bool {
        let remaining = self.remaining();

        !remaining.is_zero() && remaining > estimated_cost
    }
}

/*====================================================================================================================*/
