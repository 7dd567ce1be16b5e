//! Delivery scheduling core for construction-materials dispatch.
//!
//! Provides the domain models and the two scheduling algorithms of a
//! materials ordering and delivery-coordination system: time-slot
//! allocation with conflict detection, and category-based order
//! splitting. Authentication, persistence, notifications, and all
//! rendering live outside this crate and talk to it through plain
//! value types.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Delivery`, `Driver`, `OrderLine`,
//!   `MaterialsCatalog`, `TimeSlot`
//! - **`policy`**: Injected constants — district capacity, stagger
//!   interval, duration model, category ranks
//! - **`allocator`**: Slot conflict rules (driver exclusivity,
//!   district capacity, past-date guard) and driver availability
//! - **`splitter`**: Order → prioritized sub-delivery preview
//! - **`board`**: Mutex-guarded booking store making check-then-insert
//!   atomic
//! - **`validation`**: Integrity checks on externally-sourced snapshots
//!
//! # Control Flow
//!
//! A caller runs [`splitter::build_preview`] to propose sub-deliveries
//! for an order, then confirms each candidate independently through
//! [`board::DeliveryBoard::schedule`]; one rejection never invalidates
//! the other candidates.

pub mod allocator;
pub mod board;
pub mod models;
pub mod policy;
pub mod splitter;
pub mod validation;

pub use allocator::{available_drivers, check_slot, AllocationOutcome, SlotRequest};
pub use board::{BoardError, DeliveryBoard};
pub use models::{Delivery, DeliveryStatus, Driver, MaterialsCatalog, OrderLine, TimeSlot};
pub use policy::{CategoryRankTable, DispatchPolicy};
pub use splitter::{build_preview, SubDeliveryCandidate};
