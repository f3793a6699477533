pub mod calendar;
pub mod conflict;
pub mod ledger;
pub mod lifecycle;
pub mod scheduling;
pub mod search;
pub mod store;
