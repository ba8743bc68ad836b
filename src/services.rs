pub mod auth;
pub mod budget_service;
pub mod class_service;
pub mod directory_service;
pub mod document_service;
pub mod event_catalog;
pub mod hebrew_calendar;
pub mod holiday_service;
pub mod payment_service;
pub mod public_service;
