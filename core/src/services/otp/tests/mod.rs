//! Tests for the OTP registry

#[cfg(test)]
mod registry_tests;
