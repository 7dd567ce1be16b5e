//! Snapshot validation.
//!
//! Checks structural integrity of a (deliveries, drivers) snapshot
//! before it is trusted — typically when seeding a board from
//! persistence or after fetching from the external services. Detects:
//! - Duplicate delivery IDs
//! - Duplicate driver IDs
//! - Deliveries referencing unknown drivers
//! - Driver double-bookings already present in the snapshot
//! - Inactive drivers still holding open deliveries

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::models::{Delivery, Driver, TimeSlot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A delivery references a driver that doesn't exist in the roster.
    UnknownDriver,
    /// A driver holds two deliveries in one (date, slot) pair.
    DriverDoubleBooked,
    /// An inactive driver still holds an open delivery.
    InactiveDriverAssigned,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a (deliveries, drivers) snapshot.
///
/// Checks:
/// 1. No duplicate delivery IDs
/// 2. No duplicate driver IDs
/// 3. Every delivery's driver exists in the roster
/// 4. No driver holds two slot-occupying deliveries at one (date, slot)
/// 5. No inactive driver holds an open (non-terminal) delivery
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(deliveries: &[Delivery], drivers: &[Driver]) -> ValidationResult {
    let mut errors = Vec::new();

    // Collect driver IDs
    let mut driver_ids = HashSet::new();
    let mut inactive_ids = HashSet::new();
    for driver in drivers {
        if !driver_ids.insert(driver.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate driver ID: {}", driver.id),
            ));
        }
        if !driver.active {
            inactive_ids.insert(driver.id.as_str());
        }
    }

    // Delivery IDs and driver references
    let mut delivery_ids = HashSet::new();
    for d in deliveries {
        if !delivery_ids.insert(d.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate delivery ID: {}", d.id),
            ));
        }

        if !driver_ids.contains(d.driver_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDriver,
                format!("Delivery '{}' references unknown driver '{}'", d.id, d.driver_id),
            ));
        } else if inactive_ids.contains(d.driver_id.as_str()) && !d.status.is_terminal() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InactiveDriverAssigned,
                format!(
                    "Delivery '{}' is open but driver '{}' is inactive",
                    d.id, d.driver_id
                ),
            ));
        }
    }

    // Driver exclusivity within the snapshot itself
    let mut bookings: HashMap<(&str, NaiveDate, TimeSlot), &str> = HashMap::new();
    for d in deliveries {
        if !d.status.occupies_slot() {
            continue;
        }
        let key = (d.driver_id.as_str(), d.date, d.slot);
        if let Some(first) = bookings.insert(key, d.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DriverDoubleBooked,
                format!(
                    "Driver '{}' holds deliveries '{}' and '{}' at {} {}",
                    d.driver_id, first, d.id, d.date, d.slot
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
