//! Common utility functions

pub mod contact;
pub mod validation;
