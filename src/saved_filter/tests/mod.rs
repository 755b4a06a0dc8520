//! Unit tests for the saved filter module.
