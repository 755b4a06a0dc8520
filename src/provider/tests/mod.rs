//! Unit tests for the provider module.
