//! Domain event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;

/// An immutable record of a business-significant state change.
///
/// Events are created at the moment a state change commits, published on
/// the event bus, and consumed zero or more times by independently
/// registered handlers. Cross-context consumers deserialize the payload
/// into their own local types; no event type is shared across context
/// boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Symbolic event name, e.g. `catalog.product_created`.
    pub name: String,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
    /// Serializable payload specific to the event kind.
    pub payload: serde_json::Value,
}

impl DomainEvent {
    /// Creates a new event stamped by `clock`.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: serde_json::Value, clock: &dyn Clock) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            name: name.into(),
            occurred_at: clock.now(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    struct TestClock(DateTime<Utc>);

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_new_stamps_name_payload_and_clock_time() {
        let fixed_now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let clock = TestClock(fixed_now);

        let event = DomainEvent::new(
            "catalog.product_created",
            serde_json::json!({"product_id": "7"}),
            &clock,
        );

        assert_eq!(event.name, "catalog.product_created");
        assert_eq!(event.occurred_at, fixed_now);
        assert_eq!(event.payload["product_id"], "7");
    }

    #[test]
    fn test_each_event_gets_a_distinct_id() {
        let clock = TestClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap());
        let a = DomainEvent::new("x", serde_json::Value::Null, &clock);
        let b = DomainEvent::new("x", serde_json::Value::Null, &clock);
        assert_ne!(a.event_id, b.event_id);
    }
}
