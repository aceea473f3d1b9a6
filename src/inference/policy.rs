use std::time::Duration;

pub static DEFAULT_MAX_RETRIES: u32 = 3;
pub static DEFAULT_BASE_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Upper bound on a whole `submit` call, waits included.
    pub deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            deadline: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// delay = base_delay * 2^attempt_index
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt_index.min(63));
        let millis = (self.base_delay.as_millis() as u64).saturating_mul(factor);
        Duration::from_millis(millis)
    }

    /// Waits taken between consecutive attempts, one per permitted retry.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let policy = *self;
        (0..policy.max_retries).map(move |attempt_index| policy.delay_for(attempt_index))
    }
}
