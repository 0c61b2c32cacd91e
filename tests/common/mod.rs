//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use data_charts::store::{ConfigStore, PersistentStore};
use std::time::Duration;

/// How long to wait on the snapshot writer thread
pub fn test_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Wait for startup rehydration, panicking if it never completes
pub fn wait_ready(store: &mut PersistentStore) {
    assert!(
        store.wait_for_rehydration(test_timeout()),
        "rehydration did not finish in time"
    );
    assert!(!store.loading());
}
