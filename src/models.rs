pub mod auth;
pub mod budget;
pub mod calendar;
pub mod class;
pub mod directory;
pub mod event;
pub mod payment;
