//! Test fixtures for the behavior-profiling workspace: observation builders,
//! stub collaborators, and typed loading of the golden scenario files.

pub mod builders;
pub mod scenarios;
pub mod stubs;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use builders::{axis_vector, ObservationBuilder};
pub use scenarios::{load_scenario, ScenarioExpectation, ScenarioFixture};
pub use stubs::{FailingEmbedder, FailingGenerator, ScriptedGenerator, StubEmbedder};

/// Root directory of the fixture data (`crates/test-fixtures/golden`).
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// All JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}
