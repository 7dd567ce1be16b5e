//! Driver model.
//!
//! Drivers are externally managed (fetched from the driver registry);
//! this crate never stores per-slot availability on the driver itself.
//! Availability is derived at query time by scanning existing deliveries
//! for the requested (date, slot) — see `allocator::available_drivers`.

use serde::{Deserialize, Serialize};

/// A delivery driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Unique driver identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Vehicle descriptor (e.g., "Tata 1615 flatbed").
    pub vehicle: String,
    /// Whether the driver is currently on the active roster.
    pub active: bool,
    /// Optional last-known location hint (free text from the registry).
    pub location_hint: Option<String>,
    /// Completed-delivery counter maintained by the registry.
    pub delivery_count: u32,
    /// Registry rating (0.0 to 5.0).
    pub rating: f64,
}

impl Driver {
    /// Creates a new active driver.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: String::new(),
            vehicle: String::new(),
            active: true,
            location_hint: None,
            delivery_count: 0,
            rating: 0.0,
        }
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the vehicle descriptor.
    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = vehicle.into();
        self
    }

    /// Marks the driver inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Sets the location hint.
    pub fn with_location_hint(mut self, hint: impl Into<String>) -> Self {
        self.location_hint = Some(hint.into());
        self
    }

    /// Sets the registry rating (clamped to 0.0–5.0).
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self
    }
}
