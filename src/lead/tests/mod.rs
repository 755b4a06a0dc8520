//! Unit tests for the lead module.
