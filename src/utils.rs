//! Utility functions shared by the pointer targets.

pub mod safe_cast;
