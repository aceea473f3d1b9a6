use crate::app::util::time::current_time_in_millis;

/// One try against the upstream endpoint. Lives only for the duration of the attempt.
#[derive(Debug, Clone)]
pub struct OutboundAttempt<'a> {
    pub index: u32,
    pub started_at_ms: u128,
    pub url: &'a str,
    pub body_len: usize,
}

impl<'a> OutboundAttempt<'a> {
    pub fn new(index: u32, url: &'a str, body_len: usize) -> Self {
        Self {
            index,
            started_at_ms: current_time_in_millis(),
            url,
            body_len,
        }
    }
}
