//! Rock Bridge site core: bilingual content resolution for the public pages
//! and the client side of the admin dashboard.

pub mod api;
pub mod auth;
pub mod carousel;
pub mod config;
pub mod contact;
pub mod dashboard;
pub mod fields;
pub mod forms;
pub mod i18n;
pub mod notify;
pub mod panel;
pub mod record;
pub mod sections;
pub mod session;
pub mod showcase;
pub mod storage;
