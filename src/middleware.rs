pub mod auth;
pub mod class_scope;
pub mod i18n;
pub mod rbac;
