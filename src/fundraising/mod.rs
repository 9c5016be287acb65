// Validation and persistence for fundraising events
pub mod store;
pub mod validation;

pub use store::FundraisingEventStore;
pub use validation::{FieldError, NewFundraisingEvent, ValidFundraisingEvent, ValidationErrors};
