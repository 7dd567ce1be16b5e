//! Delivery-dispatch domain models.
//!
//! Core data types for the scheduling boundary of a construction-materials
//! delivery system. Everything here is a plain value type: the snapshot of
//! deliveries, the driver roster, and the materials catalog are supplied by
//! the caller, and mutation happens only in `board`.
//!
//! # External Boundaries
//!
//! | Type | Source |
//! |------|--------|
//! | `Delivery` | Created by this crate, persisted by the caller |
//! | `Driver` | Driver registry (read-only here) |
//! | `MaterialsCatalog` | Catalog service snapshot (read-only here) |
//! | `OrderLine` | Customer order input |

mod delivery;
mod driver;
mod order;
mod slot;

pub use delivery::{Delivery, DeliveryStatus};
pub use driver::Driver;
pub use order::{MaterialRecord, MaterialsCatalog, OrderLine};
pub use slot::{ParseTimeSlotError, TimeSlot};
