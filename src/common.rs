pub mod contact;
pub mod dates;
pub mod error;
pub mod i18n;
pub mod invite_code;
pub mod validation;
