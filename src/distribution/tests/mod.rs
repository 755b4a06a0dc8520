//! Unit tests for the distribution module.

mod support;
