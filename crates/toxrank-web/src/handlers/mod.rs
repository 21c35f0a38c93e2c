//! HTTP handlers for all web routes.

pub mod form;
pub mod api;
