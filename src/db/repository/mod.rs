//! Repository layer — entity-scoped database operations.
//!
//! Plain functions over a borrowed `Connection`; row structs keep the SQL
//! mapping separate from the domain types. JSON text columns hold the
//! back-reference lists and the availability grid.

mod content;
mod doctor;
mod enquiry;
mod patient;
mod user;

pub use content::*;
pub use doctor::*;
pub use enquiry::*;
pub use patient::*;
pub use user::*;
