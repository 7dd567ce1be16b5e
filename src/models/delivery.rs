//! Delivery model.
//!
//! A delivery is a single scheduled drop-off: an order (or a split
//! portion of one) bound to a date, a time slot, a district, and a
//! driver. Deliveries are created only through a successful slot
//! allocation; the surrounding service owns persistence.
//!
//! # Time Representation
//! Dates are calendar dates (`NaiveDate`) with no timezone; the consumer
//! defines which wall clock "today" is read from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A scheduled drop-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    /// Unique delivery identifier.
    pub id: String,
    /// Originating order reference.
    pub order_ref: String,
    /// Customer display name.
    pub customer_name: String,
    /// Street address for the drop-off.
    pub address: String,
    /// Delivery district (the capacity-limiting area).
    pub district: String,
    /// Scheduled calendar date.
    pub date: NaiveDate,
    /// Scheduled time slot.
    pub slot: TimeSlot,
    /// Assigned driver ID. A delivery has at most one driver.
    pub driver_id: String,
    /// Lifecycle status.
    pub status: DeliveryStatus,
    /// Free-text dispatcher notes.
    pub notes: String,
}

/// Delivery lifecycle status.
///
/// Transitions: `Scheduled → InTransit → Delivered`, plus
/// `Scheduled → Cancelled`. Cancellation after dispatch is not allowed;
/// `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// Booked; driver not yet dispatched.
    Scheduled,
    /// Driver en route.
    InTransit,
    /// Drop-off completed (terminal).
    Delivered,
    /// Cancelled before dispatch (terminal).
    Cancelled,
}

impl DeliveryStatus {
    /// Whether a transition from `self` to `next` is legal.
    pub fn can_transition_to(self, next: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        matches!(
            (self, next),
            (Scheduled, InTransit) | (InTransit, Delivered) | (Scheduled, Cancelled)
        )
    }

    /// Whether this status is terminal (no further transitions).
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Cancelled)
    }

    /// Whether the delivery still occupies its slot.
    ///
    /// Cancelled deliveries release their slot; all other statuses keep
    /// the (date, slot) pair booked for conflict purposes.
    pub fn occupies_slot(self) -> bool {
        self != DeliveryStatus::Cancelled
    }
}

impl Delivery {
    /// Creates a new `Scheduled` delivery.
    pub fn new(
        id: impl Into<String>,
        order_ref: impl Into<String>,
        date: NaiveDate,
        slot: TimeSlot,
        district: impl Into<String>,
        driver_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            order_ref: order_ref.into(),
            customer_name: String::new(),
            address: String::new(),
            district: district.into(),
            date,
            slot,
            driver_id: driver_id.into(),
            status: DeliveryStatus::Scheduled,
            notes: String::new(),
        }
    }

    /// Sets the customer name.
    pub fn with_customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    /// Sets the drop-off address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets dispatcher notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether this delivery occupies the given (date, slot) pair.
    pub fn occupies(&self, date: NaiveDate, slot: TimeSlot) -> bool {
        self.status.occupies_slot() && self.date == date && self.slot == slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_delivery_builder() {
        let d = Delivery::new("D1", "ORD-17", june(1), TimeSlot::Morning, "Colombo", "DRV1")
            .with_customer("Perera Constructions")
            .with_address("12 Galle Rd")
            .with_notes("Call on arrival");

        assert_eq!(d.id, "D1");
        assert_eq!(d.order_ref, "ORD-17");
        assert_eq!(d.district, "Colombo");
        assert_eq!(d.driver_id, "DRV1");
        assert_eq!(d.status, DeliveryStatus::Scheduled);
        assert_eq!(d.customer_name, "Perera Constructions");
        assert_eq!(d.notes, "Call on arrival");
    }

    #[test]
    fn test_status_transitions() {
        use DeliveryStatus::*;
        assert!(Scheduled.can_transition_to(InTransit));
        assert!(InTransit.can_transition_to(Delivered));
        assert!(Scheduled.can_transition_to(Cancelled));

        // No cancellation after dispatch.
        assert!(!InTransit.can_transition_to(Cancelled));
        // Terminal states go nowhere.
        assert!(!Delivered.can_transition_to(InTransit));
        assert!(!Cancelled.can_transition_to(Scheduled));
        // No skipping dispatch.
        assert!(!Scheduled.can_transition_to(Delivered));
    }

    #[test]
    fn test_terminal_states() {
        assert!(DeliveryStatus::Delivered.is_terminal());
        assert!(DeliveryStatus::Cancelled.is_terminal());
        assert!(!DeliveryStatus::Scheduled.is_terminal());
        assert!(!DeliveryStatus::InTransit.is_terminal());
    }

    #[test]
    fn test_cancelled_releases_slot() {
        let mut d = Delivery::new("D1", "O1", june(1), TimeSlot::Morning, "Colombo", "DRV1");
        assert!(d.occupies(june(1), TimeSlot::Morning));
        assert!(!d.occupies(june(1), TimeSlot::Afternoon));
        assert!(!d.occupies(june(2), TimeSlot::Morning));

        d.status = DeliveryStatus::Cancelled;
        assert!(!d.occupies(june(1), TimeSlot::Morning));
    }
}
