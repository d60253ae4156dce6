/*!
 * Common test utilities for the erashape test suite
 */

use anyhow::Result;
use serde_json::{json, Value};
use tempfile::TempDir;

use erashape::app_config::Config;
use erashape::comparison::Era;


/// Route library log output through the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Config with the given eras, writing its report into `dir`
pub fn test_config(dir: &TempDir, eras: &[(&str, i32)]) -> Config {
    Config {
        eras: eras.iter().map(|(label, year)| Era::new(*label, *year)).collect(),
        output_path: dir.path().join("era_differences.csv").to_string_lossy().to_string(),
        ..Config::default()
    }
}

/// A trimmed live feed in the shape of a modern game
pub fn modern_feed() -> Value {
    json!({
        "gamePk": 718780,
        "gameData": {
            "game": {"pk": 718780, "season": "2023"},
            "weather": {"condition": "Clear", "temp": "72"},
            "venue": {"id": 15, "name": "Chase Field"}
        },
        "liveData": {
            "plays": {
                "allPlays": [{
                    "result": {"event": "Strikeout", "rbi": 0},
                    "pitchIndex": [0, 1, 2],
                    "playEvents": [{"pitchData": {"startSpeed": 95.3, "extension": 6.4}}]
                }]
            }
        }
    })
}

/// A trimmed live feed in the shape of an early game
pub fn early_feed() -> Value {
    json!({
        "gamePk": 1,
        "gameData": {
            "game": {"pk": 1, "season": "2000"},
            "weather": {},
            "venue": {"id": 15, "name": null}
        },
        "liveData": {
            "plays": {
                "allPlays": [{
                    "result": {"event": "Strikeout", "rbi": 0},
                    "pitchIndex": [],
                    "playEvents": [{"pitchData": {"startSpeed": 95}}]
                }]
            }
        }
    })
}
