//! Tests for the guarded flows
