//! Unit tests for SMS module

#[cfg(test)]
mod demo_sms_tests;
