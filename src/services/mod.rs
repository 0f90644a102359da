pub mod calendar;
pub mod catalog;
pub mod clock;
pub mod intent;
pub mod ledger;
pub mod slots;
pub mod workflow;
