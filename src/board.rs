//! Concurrent delivery board.
//!
//! Owns the live set of deliveries and makes the check-then-insert
//! sequence atomic: every mutation evaluates the allocation rules and
//! applies the change under one lock, so two concurrent requests for
//! the last seat in a slot cannot both observe "available".
//!
//! The board never reads the system clock; every time-sensitive call
//! takes `today` from the caller, which keeps the whole crate
//! deterministic under test.

use chrono::NaiveDate;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::allocator::{check_slot, AllocationOutcome, SlotRequest};
use crate::models::{Delivery, DeliveryStatus, TimeSlot};
use crate::policy::DispatchPolicy;

/// Errors from board mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// No delivery with the given ID exists on the board.
    #[error("delivery '{0}' not found")]
    NotFound(String),
    /// A delivery with the given ID is already booked.
    #[error("delivery '{0}' already exists")]
    DuplicateId(String),
    /// The slot request failed an allocation rule.
    #[error("slot request rejected: {0:?}")]
    Rejected(AllocationOutcome),
    /// The requested status change is not a legal lifecycle transition.
    #[error("illegal status transition {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current status.
        from: DeliveryStatus,
        /// Requested status.
        to: DeliveryStatus,
    },
    /// The delivery's date has passed; it can no longer be edited or
    /// cancelled.
    #[error("delivery '{0}' is dated in the past and can no longer be modified")]
    PastDelivery(String),
    /// The delivery is no longer in a status that permits rescheduling.
    #[error("delivery '{id}' cannot be rescheduled in status {status:?}")]
    NotReschedulable {
        /// Delivery ID.
        id: String,
        /// Current status.
        status: DeliveryStatus,
    },
}

/// The live booking store.
///
/// A mutex-guarded snapshot plus the policy the allocation rules run
/// under. Reads clone out of the lock; writes hold it across the
/// rule check and the mutation.
#[derive(Debug)]
pub struct DeliveryBoard {
    deliveries: Mutex<Vec<Delivery>>,
    policy: DispatchPolicy,
}

impl DeliveryBoard {
    /// Creates an empty board with the given policy.
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            policy,
        }
    }

    /// Creates a board seeded with persisted deliveries.
    ///
    /// The seed is trusted as-is; run
    /// [`crate::validation::validate_snapshot`] on it first if it comes
    /// from outside.
    pub fn with_deliveries(policy: DispatchPolicy, deliveries: Vec<Delivery>) -> Self {
        Self {
            deliveries: Mutex::new(deliveries),
            policy,
        }
    }

    /// The policy this board allocates under.
    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Read-only allocation probe (no reservation).
    pub fn check(&self, request: &SlotRequest, today: NaiveDate) -> AllocationOutcome {
        let deliveries = self.deliveries.lock();
        let outcome = check_slot(&deliveries, request, &self.policy, today);
        debug!(?outcome, date = %request.date, slot = %request.slot, "allocation probe");
        outcome
    }

    /// Books a new delivery.
    ///
    /// Validates the delivery's (date, slot, district, driver) against
    /// the current snapshot and inserts it in the same critical
    /// section. The delivery enters as `Scheduled` regardless of the
    /// status on the passed value.
    pub fn schedule(&self, mut delivery: Delivery, today: NaiveDate) -> Result<(), BoardError> {
        let mut deliveries = self.deliveries.lock();

        if deliveries.iter().any(|d| d.id == delivery.id) {
            return Err(BoardError::DuplicateId(delivery.id));
        }

        let request = SlotRequest::new(
            delivery.date,
            delivery.slot,
            delivery.district.clone(),
            delivery.driver_id.clone(),
        );
        let outcome = check_slot(&deliveries, &request, &self.policy, today);
        if !outcome.is_accepted() {
            warn!(?outcome, id = %delivery.id, "booking rejected");
            return Err(BoardError::Rejected(outcome));
        }

        delivery.status = DeliveryStatus::Scheduled;
        info!(id = %delivery.id, date = %delivery.date, slot = %delivery.slot,
            district = %delivery.district, driver = %delivery.driver_id, "delivery booked");
        deliveries.push(delivery);
        Ok(())
    }

    /// Moves an existing delivery to a new (date, slot, district, driver).
    ///
    /// Re-validates with the delivery itself excluded, so re-saving an
    /// unchanged booking always succeeds. Only `Scheduled` deliveries
    /// can move, and a delivery whose date has already passed cannot
    /// be moved at all.
    pub fn reschedule(
        &self,
        id: &str,
        date: NaiveDate,
        slot: TimeSlot,
        district: impl Into<String>,
        driver_id: impl Into<String>,
        today: NaiveDate,
    ) -> Result<Delivery, BoardError> {
        let district = district.into();
        let driver_id = driver_id.into();
        let mut deliveries = self.deliveries.lock();

        let idx = deliveries
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;

        if deliveries[idx].date < today {
            return Err(BoardError::PastDelivery(id.to_string()));
        }
        if deliveries[idx].status != DeliveryStatus::Scheduled {
            return Err(BoardError::NotReschedulable {
                id: id.to_string(),
                status: deliveries[idx].status,
            });
        }

        let request = SlotRequest::new(date, slot, district.clone(), driver_id.clone())
            .excluding(id);
        let outcome = check_slot(&deliveries, &request, &self.policy, today);
        if !outcome.is_accepted() {
            warn!(?outcome, id, "reschedule rejected");
            return Err(BoardError::Rejected(outcome));
        }

        let delivery = &mut deliveries[idx];
        delivery.date = date;
        delivery.slot = slot;
        delivery.district = district;
        delivery.driver_id = driver_id;
        info!(id, date = %date, slot = %slot, "delivery rescheduled");
        Ok(delivery.clone())
    }

    /// Advances a delivery's lifecycle status.
    ///
    /// Enforces the `Scheduled → InTransit → Delivered` machine. Use
    /// [`DeliveryBoard::cancel`] for cancellation so the past-date rule
    /// also applies.
    pub fn update_status(&self, id: &str, next: DeliveryStatus) -> Result<(), BoardError> {
        let mut deliveries = self.deliveries.lock();
        let delivery = deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;

        if !delivery.status.can_transition_to(next) {
            return Err(BoardError::InvalidTransition {
                from: delivery.status,
                to: next,
            });
        }
        info!(id, from = ?delivery.status, to = ?next, "status updated");
        delivery.status = next;
        Ok(())
    }

    /// Cancels a `Scheduled` delivery, releasing its slot.
    ///
    /// Past-dated deliveries cannot be cancelled (core rule, not UI
    /// gating), and neither can anything already dispatched.
    pub fn cancel(&self, id: &str, today: NaiveDate) -> Result<(), BoardError> {
        let mut deliveries = self.deliveries.lock();
        let delivery = deliveries
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;

        if delivery.date < today {
            return Err(BoardError::PastDelivery(id.to_string()));
        }
        if !delivery.status.can_transition_to(DeliveryStatus::Cancelled) {
            return Err(BoardError::InvalidTransition {
                from: delivery.status,
                to: DeliveryStatus::Cancelled,
            });
        }
        info!(id, "delivery cancelled");
        delivery.status = DeliveryStatus::Cancelled;
        Ok(())
    }

    /// Removes a delivery from the board entirely (staff deletion).
    pub fn remove(&self, id: &str) -> Result<Delivery, BoardError> {
        let mut deliveries = self.deliveries.lock();
        let idx = deliveries
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
        info!(id, "delivery removed");
        Ok(deliveries.remove(idx))
    }

    /// A point-in-time copy of all deliveries.
    pub fn snapshot(&self) -> Vec<Delivery> {
        self.deliveries.lock().clone()
    }

    /// Number of deliveries on the board (all statuses).
    pub fn len(&self) -> usize {
        self.deliveries.lock().len()
    }

    /// Whether the board is empty.
    pub fn is_empty(&self) -> bool {
        self.deliveries.lock().is_empty()
    }
}
