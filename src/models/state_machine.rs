// Request lifecycle state machine shared by the view controllers
//
// Every outbound request is stamped with a per-controller sequence number.
// Only the reply to the most recently issued request may settle the view;
// anything older is dropped on arrival.

use chrono::{DateTime, Utc};

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Monotonic issuer of request tickets
#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self { issued: 0 }
    }

    /// Issue a ticket that supersedes every earlier one
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket { seq: self.issued }
    }

    /// Whether this ticket is still the latest issued
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Supersede all outstanding tickets without issuing a new request
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}

/// Where a controller's lifecycle currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Nothing requested since mount
    Idle,
    /// A request is outstanding
    Loading,
    /// The latest request came back, with or without a value
    Settled,
}

/// Loading flag, last value and request guard for one view
#[derive(Debug)]
pub struct RequestLifecycle<T> {
    tracker: RequestTracker,
    phase: LifecyclePhase,
    value: Option<T>,
    settled_at: Option<DateTime<Utc>>,
}

impl<T> Default for RequestLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestLifecycle<T> {
    pub fn new() -> Self {
        Self {
            tracker: RequestTracker::new(),
            phase: LifecyclePhase::Idle,
            value: None,
            settled_at: None,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LifecyclePhase::Loading
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn settled_at(&self) -> Option<DateTime<Utc>> {
        self.settled_at
    }

    /// Start a request, keeping whatever value is currently shown
    pub fn begin(&mut self) -> RequestTicket {
        self.phase = LifecyclePhase::Loading;
        self.tracker.issue()
    }

    /// Start a request and drop the current value first
    pub fn begin_clearing(&mut self) -> RequestTicket {
        self.value = None;
        self.begin()
    }

    /// Settle with a reply, replacing the value (`None` clears it).
    ///
    /// Returns false and changes nothing when the ticket is stale.
    pub fn replace(&mut self, ticket: RequestTicket, value: Option<T>) -> bool {
        if !self.tracker.is_current(&ticket) {
            return false;
        }
        self.value = value;
        self.settle();
        true
    }

    /// Settle without touching the value, for failures that keep prior results.
    ///
    /// Returns false and changes nothing when the ticket is stale.
    pub fn keep(&mut self, ticket: RequestTicket) -> bool {
        if !self.tracker.is_current(&ticket) {
            return false;
        }
        self.settle();
        true
    }

    /// Back to a freshly mounted state; outstanding replies become stale
    pub fn reset(&mut self) {
        self.tracker.invalidate();
        self.phase = LifecyclePhase::Idle;
        self.value = None;
        self.settled_at = None;
    }

    fn settle(&mut self) {
        self.phase = LifecyclePhase::Settled;
        self.settled_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_latest_ticket_only() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert!(second.seq() > first.seq());
    }

    #[test]
    fn test_invalidate_supersedes_outstanding() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.issue();
        tracker.invalidate();
        assert!(!tracker.is_current(&ticket));
    }

    #[test]
    fn test_begin_then_replace() {
        let mut lifecycle: RequestLifecycle<u32> = RequestLifecycle::new();
        assert_eq!(lifecycle.phase(), LifecyclePhase::Idle);

        let ticket = lifecycle.begin();
        assert!(lifecycle.is_loading());

        assert!(lifecycle.replace(ticket, Some(7)));
        assert_eq!(lifecycle.phase(), LifecyclePhase::Settled);
        assert_eq!(lifecycle.value(), Some(&7));
        assert!(lifecycle.settled_at().is_some());
    }

    #[test]
    fn test_stale_reply_is_dropped_and_loading_kept() {
        let mut lifecycle: RequestLifecycle<&str> = RequestLifecycle::new();
        let first = lifecycle.begin();
        let second = lifecycle.begin();

        assert!(lifecycle.replace(second, Some("second")));
        assert!(!lifecycle.replace(first, Some("first")));
        assert_eq!(lifecycle.value(), Some(&"second"));

        let third = lifecycle.begin();
        let fourth = lifecycle.begin();
        assert!(!lifecycle.replace(third, Some("third")));
        assert!(lifecycle.is_loading());
        assert!(lifecycle.replace(fourth, None));
        assert!(!lifecycle.is_loading());
        assert_eq!(lifecycle.value(), None);
    }

    #[test]
    fn test_keep_preserves_value() {
        let mut lifecycle: RequestLifecycle<u32> = RequestLifecycle::new();
        let ticket = lifecycle.begin();
        lifecycle.replace(ticket, Some(1));

        let ticket = lifecycle.begin();
        assert!(lifecycle.keep(ticket));
        assert_eq!(lifecycle.value(), Some(&1));
        assert!(!lifecycle.is_loading());
    }

    #[test]
    fn test_begin_clearing_drops_value() {
        let mut lifecycle: RequestLifecycle<u32> = RequestLifecycle::new();
        let ticket = lifecycle.begin();
        lifecycle.replace(ticket, Some(1));

        lifecycle.begin_clearing();
        assert_eq!(lifecycle.value(), None);
        assert!(lifecycle.is_loading());
    }

    #[test]
    fn test_reset_makes_in_flight_reply_stale() {
        let mut lifecycle: RequestLifecycle<u32> = RequestLifecycle::new();
        let ticket = lifecycle.begin();
        lifecycle.reset();

        assert!(!lifecycle.replace(ticket, Some(5)));
        assert_eq!(lifecycle.phase(), LifecyclePhase::Idle);
        assert_eq!(lifecycle.value(), None);
    }
}
