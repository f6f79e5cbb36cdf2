use std::time::Duration;

/// "Keep re-rendering until `deadline`" bookkeeping shared by every time-boxed trigger.
///
/// Timestamps are whatever monotonic clock the host passes in (typically the animation-frame
/// timestamp). Extending a budget never shortens a deadline that is already further out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameBudget {
    deadline: Option<Duration>,
}

impl FrameBudget {
    pub fn extend(&mut self, now: Duration, window: Duration) {
        let candidate = now + window;
        self.deadline = Some(match self.deadline {
            Some(current) if current > candidate => current,
            _ => candidate,
        });
    }

    pub fn is_live(&self, now: Duration) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn expire(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn live_until_deadline() {
        let mut budget = FrameBudget::default();
        assert!(!budget.is_live(ms(0)));
        budget.extend(ms(100), ms(2500));
        assert!(budget.is_live(ms(2599)));
        assert!(!budget.is_live(ms(2600)));
    }

    #[test]
    fn shorter_extension_keeps_later_deadline() {
        let mut budget = FrameBudget::default();
        budget.extend(ms(0), ms(2500));
        budget.extend(ms(500), ms(1500));
        assert_eq!(budget.deadline(), Some(ms(2500)));
        budget.extend(ms(2000), ms(1500));
        assert_eq!(budget.deadline(), Some(ms(3500)));
    }

    #[test]
    fn expire_clears_deadline() {
        let mut budget = FrameBudget::default();
        budget.extend(ms(0), ms(10));
        budget.expire();
        assert!(!budget.is_live(ms(1)));
        assert_eq!(budget.deadline(), None);
    }
}
