//! Slot allocation and conflict detection.
//!
//! Decides whether a single requested booking may be created or updated.
//! Two conflict rules apply, in order, after an unconditional past-date
//! guard:
//!
//! 1. **Driver exclusivity** — a driver holds at most one delivery per
//!    (date, slot) pair.
//! 2. **District capacity** — at most `district_slot_capacity` deliveries
//!    share a (date, slot, district) triple.
//!
//! Everything here is a pure predicate over the snapshot the caller
//! passes in: no clock reads, no mutation. The check-then-insert
//! sequence is made atomic by [`crate::board::DeliveryBoard`]; callers
//! going through the raw functions own that race themselves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Delivery, Driver, TimeSlot};
use crate::policy::DispatchPolicy;

/// A requested booking to validate against the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    /// Requested calendar date.
    pub date: NaiveDate,
    /// Requested time slot.
    pub slot: TimeSlot,
    /// Delivery district.
    pub district: String,
    /// Driver to assign.
    pub driver_id: String,
    /// Delivery ID to exclude from both conflict scans.
    ///
    /// Set when re-validating an edit so the delivery does not conflict
    /// with itself; `None` for new bookings.
    pub exclude_id: Option<String>,
}

impl SlotRequest {
    /// Creates a request for a new booking.
    pub fn new(
        date: NaiveDate,
        slot: TimeSlot,
        district: impl Into<String>,
        driver_id: impl Into<String>,
    ) -> Self {
        Self {
            date,
            slot,
            district: district.into(),
            driver_id: driver_id.into(),
            exclude_id: None,
        }
    }

    /// Excludes an existing delivery from the conflict scans (edit flow).
    pub fn excluding(mut self, delivery_id: impl Into<String>) -> Self {
        self.exclude_id = Some(delivery_id.into());
        self
    }
}

/// Outcome of a slot-allocation check.
///
/// A tagged result rather than a bare boolean, so callers can surface
/// the precise rejection reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationOutcome {
    /// The booking may proceed.
    Accepted,
    /// The requested date is before today. Checked before either rule.
    PastDate,
    /// The driver already holds a delivery at (date, slot).
    DriverConflict,
    /// The (date, slot, district) triple is at capacity.
    CapacityExceeded,
}

impl AllocationOutcome {
    /// Boolean view for callers that only need accept/reject.
    pub fn is_accepted(self) -> bool {
        self == AllocationOutcome::Accepted
    }
}

/// Checks whether a requested booking can be allocated.
///
/// `today` is the allocation day supplied by the caller (date-only; the
/// time of day never matters). `request.exclude_id`, when set, removes
/// that delivery from both rule scans so an edit can re-save its own
/// slot. Cancelled deliveries have released their slot and never count
/// toward either rule.
pub fn check_slot(
    deliveries: &[Delivery],
    request: &SlotRequest,
    policy: &DispatchPolicy,
    today: NaiveDate,
) -> AllocationOutcome {
    // Past dates are never allocatable, regardless of conflicts.
    if request.date < today {
        return AllocationOutcome::PastDate;
    }

    let others = deliveries.iter().filter(|d| {
        request.exclude_id.as_deref() != Some(d.id.as_str())
            && d.occupies(request.date, request.slot)
    });

    let mut district_count = 0;
    for d in others {
        if d.driver_id == request.driver_id {
            return AllocationOutcome::DriverConflict;
        }
        if d.district == request.district {
            district_count += 1;
        }
    }

    if district_count >= policy.district_slot_capacity {
        return AllocationOutcome::CapacityExceeded;
    }

    AllocationOutcome::Accepted
}

/// A driver annotated with derived availability for one (date, slot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverAvailability {
    /// The driver, as fetched from the registry.
    pub driver: Driver,
    /// `false` if the driver already holds a delivery at the queried
    /// (date, slot).
    pub available: bool,
}

/// Annotates every driver with availability at (date, slot).
///
/// Busy drivers are kept in the result (flagged unavailable) so the
/// caller can render them; use [`default_driver`] to pick an initial
/// selection.
pub fn available_drivers(
    drivers: &[Driver],
    deliveries: &[Delivery],
    date: NaiveDate,
    slot: TimeSlot,
) -> Vec<DriverAvailability> {
    drivers
        .iter()
        .map(|driver| {
            let busy = deliveries
                .iter()
                .any(|d| d.occupies(date, slot) && d.driver_id == driver.id);
            DriverAvailability {
                driver: driver.clone(),
                available: !busy,
            }
        })
        .collect()
}

/// Default driver selection: the first available entry, if any.
pub fn default_driver(annotated: &[DriverAvailability]) -> Option<&Driver> {
    annotated.iter().find(|a| a.available).map(|a| &a.driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeliveryStatus;
    use pretty_assertions::assert_eq;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn delivery(id: &str, date: NaiveDate, slot: TimeSlot, district: &str, driver: &str) -> Delivery {
        Delivery::new(id, format!("{id}-ord"), date, slot, district, driver)
    }

    #[test]
    fn test_past_date_always_rejected() {
        // No conflicting deliveries at all; the date alone rejects.
        let req = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV1");
        let outcome = check_slot(&[], &req, &DispatchPolicy::default(), june(2));
        assert_eq!(outcome, AllocationOutcome::PastDate);
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn test_today_is_allocatable() {
        let req = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV1");
        let outcome = check_slot(&[], &req, &DispatchPolicy::default(), june(1));
        assert_eq!(outcome, AllocationOutcome::Accepted);
    }

    #[test]
    fn test_driver_double_booking_rejected() {
        let existing = vec![delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1")];
        let req = SlotRequest::new(june(1), TimeSlot::Morning, "Gampaha", "DRV1");
        assert_eq!(
            check_slot(&existing, &req, &DispatchPolicy::default(), june(1)),
            AllocationOutcome::DriverConflict
        );
    }

    #[test]
    fn test_same_driver_different_slot_accepted() {
        let existing = vec![delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1")];
        // Same date, 13:00-15:00 instead of 09:00-11:00.
        let req = SlotRequest::new(june(1), TimeSlot::Afternoon, "Colombo", "DRV1");
        assert_eq!(
            check_slot(&existing, &req, &DispatchPolicy::default(), june(1)),
            AllocationOutcome::Accepted
        );
    }

    #[test]
    fn test_same_driver_different_date_accepted() {
        let existing = vec![delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1")];
        let req = SlotRequest::new(june(2), TimeSlot::Morning, "Colombo", "DRV1");
        assert_eq!(
            check_slot(&existing, &req, &DispatchPolicy::default(), june(1)),
            AllocationOutcome::Accepted
        );
    }

    #[test]
    fn test_district_capacity_boundary() {
        let policy = DispatchPolicy::default(); // capacity 3
        let mut existing = vec![
            delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1"),
            delivery("D2", june(1), TimeSlot::Morning, "Colombo", "DRV2"),
        ];

        // Third booking in the district fills it to capacity.
        let third = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV3");
        assert_eq!(
            check_slot(&existing, &third, &policy, june(1)),
            AllocationOutcome::Accepted
        );
        existing.push(delivery("D3", june(1), TimeSlot::Morning, "Colombo", "DRV3"));

        // Fourth is over capacity.
        let fourth = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV4");
        assert_eq!(
            check_slot(&existing, &fourth, &policy, june(1)),
            AllocationOutcome::CapacityExceeded
        );

        // Same date/slot in another district is unaffected.
        let gampaha = SlotRequest::new(june(1), TimeSlot::Morning, "Gampaha", "DRV4");
        assert_eq!(
            check_slot(&existing, &gampaha, &policy, june(1)),
            AllocationOutcome::Accepted
        );
    }

    #[test]
    fn test_capacity_policy_is_data() {
        let policy = DispatchPolicy::new().with_district_slot_capacity(1);
        let existing = vec![delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1")];
        let req = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV2");
        assert_eq!(
            check_slot(&existing, &req, &policy, june(1)),
            AllocationOutcome::CapacityExceeded
        );
    }

    #[test]
    fn test_self_exclusion_on_edit() {
        let existing = vec![delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1")];

        // Re-saving D1's own unchanged slot must not self-conflict.
        let resave = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV1")
            .excluding("D1");
        assert_eq!(
            check_slot(&existing, &resave, &DispatchPolicy::default(), june(1)),
            AllocationOutcome::Accepted
        );

        // Without the exclusion the same request is a driver conflict.
        let fresh = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV1");
        assert_eq!(
            check_slot(&existing, &fresh, &DispatchPolicy::default(), june(1)),
            AllocationOutcome::DriverConflict
        );
    }

    #[test]
    fn test_exclusion_applies_to_capacity_scan() {
        let policy = DispatchPolicy::default();
        let existing = vec![
            delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1"),
            delivery("D2", june(1), TimeSlot::Morning, "Colombo", "DRV2"),
            delivery("D3", june(1), TimeSlot::Morning, "Colombo", "DRV3"),
        ];

        // District is full, but D3 editing itself stays inside capacity.
        let edit = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV3")
            .excluding("D3");
        assert_eq!(
            check_slot(&existing, &edit, &policy, june(1)),
            AllocationOutcome::Accepted
        );
    }

    #[test]
    fn test_cancelled_deliveries_release_slot() {
        let mut cancelled = delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1");
        cancelled.status = DeliveryStatus::Cancelled;

        let req = SlotRequest::new(june(1), TimeSlot::Morning, "Colombo", "DRV1");
        assert_eq!(
            check_slot(&[cancelled], &req, &DispatchPolicy::default(), june(1)),
            AllocationOutcome::Accepted
        );
    }

    #[test]
    fn test_available_drivers_annotation() {
        let drivers = vec![
            Driver::new("DRV1", "Kumara"),
            Driver::new("DRV2", "Silva"),
            Driver::new("DRV3", "Fernando"),
        ];
        let deliveries = vec![delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1")];

        let annotated = available_drivers(&drivers, &deliveries, june(1), TimeSlot::Morning);
        // Busy drivers are kept, not filtered.
        assert_eq!(annotated.len(), 3);
        assert!(!annotated[0].available);
        assert!(annotated[1].available);
        assert!(annotated[2].available);

        // Default selection skips the busy driver.
        assert_eq!(default_driver(&annotated).unwrap().id, "DRV2");
    }

    #[test]
    fn test_available_drivers_other_slot_free() {
        let drivers = vec![Driver::new("DRV1", "Kumara")];
        let deliveries = vec![delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1")];

        let annotated = available_drivers(&drivers, &deliveries, june(1), TimeSlot::Afternoon);
        assert!(annotated[0].available);
    }

    #[test]
    fn test_default_driver_none_available() {
        let drivers = vec![Driver::new("DRV1", "Kumara")];
        let deliveries = vec![delivery("D1", june(1), TimeSlot::Morning, "Colombo", "DRV1")];

        let annotated = available_drivers(&drivers, &deliveries, june(1), TimeSlot::Morning);
        assert!(default_driver(&annotated).is_none());
    }
}
