//! Unit tests for the in-memory stores
