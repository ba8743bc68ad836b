pub mod auth;
pub mod classes;
pub mod directory;
pub mod documents;
pub mod events;
pub mod holidays;
pub mod payments;
pub mod public;
