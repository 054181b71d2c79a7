//! Session limits

/// How many heartbeat ticks a session may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickBudget {
    limit: Option<u64>,
    used: u64,
}

impl TickBudget {
    /// `None` means unlimited
    pub fn new(limit: Option<u64>) -> Self {
        Self { limit, used: 0 }
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    /// True once no more ticks may run
    pub fn exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.used >= limit)
    }

    /// Record one tick
    pub fn spend(&mut self) {
        self.used += 1;
    }
}
