//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use primetime::app::{app_reducer, AppAction, AppState};
use primetime::mvi::Store;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary config file with the given TOML body.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Root store running the unwrapped application reducer.
pub fn app_store(initial: AppState) -> Store<AppState, AppAction> {
    Store::new(initial, app_reducer())
}

/// Collects every value an observer sees.
pub fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(T) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |value| sink.lock().push(value))
}
