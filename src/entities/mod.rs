pub mod fundraising_events;

pub use fundraising_events::*;

pub use fundraising_events::Entity as FundraisingEvents;
