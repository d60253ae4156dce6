/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;
use std::fs;

use erashape::app_controller::{summarize, Controller};
use erashape::comparison::Era;
use erashape::structure::ListPolicy;
use crate::common;
use crate::common::http_stub::{serve, StubResponse};
use crate::common::mock_sources::MockStatsSource;

/// Full run over a mock source writes only differing rows
#[test]
fn test_run_with_two_eras_should_write_differences() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir, &[("Statcast", 2023), ("Pre-tracking", 2000)]);
    let output_path = config.output_path.clone();
    let source = MockStatsSource::new()
        .with_game(2023, 718780, common::modern_feed())
        .with_game(2000, 1, common::early_feed());

    let controller = Controller::with_source(config, source).without_progress();
    let summary = tokio_test::block_on(controller.run())?;

    assert_eq!(summary.analyzed, vec!["Statcast", "Pre-tracking"]);
    assert!(summary.skipped.is_empty());
    assert!(summary.distinct_paths > summary.differences.len());

    let csv = fs::read_to_string(&output_path)?;
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("path,Statcast,Pre-tracking"));
    assert!(csv.contains("gameData.venue.name,str,NoneType\n"));
    assert!(csv.contains("gameData.weather.condition,str,N/A\n"));
    assert!(!csv.contains("gamePk,"));
    assert_eq!(lines.count(), summary.differences.len());
    Ok(())
}

/// An era with an empty schedule gets no column and no fetch
#[test]
fn test_run_with_empty_season_should_omit_era() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(
        &temp_dir,
        &[("Statcast", 2023), ("Nothing", 1850), ("Pre-tracking", 2000)],
    );
    let output_path = config.output_path.clone();
    let source = MockStatsSource::new()
        .with_game(2023, 718780, common::modern_feed())
        .with_empty_season(1850)
        .with_game(2000, 1, common::early_feed());
    let tracker = source.tracker();

    let controller = Controller::with_source(config, source).without_progress();
    let summary = tokio_test::block_on(controller.run())?;

    assert_eq!(summary.skipped, vec!["Nothing"]);
    assert_eq!(summary.differences.eras, vec!["Statcast", "Pre-tracking"]);
    assert!(fs::read_to_string(&output_path)?.starts_with("path,Statcast,Pre-tracking\n"));

    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.schedule_calls, vec![2023, 1850, 2000]);
    assert_eq!(tracker.game_calls, vec![718780, 1]);
    Ok(())
}

/// A transport failure ends the run before later eras are fetched
#[test]
fn test_run_with_failing_fetch_should_stop_and_write_nothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::test_config(&temp_dir, &[("A", 2023), ("B", 2010), ("C", 2000)]);
    let output_path = config.output_path.clone();
    let source = MockStatsSource::new()
        .with_game(2023, 1, common::modern_feed())
        .failing_year(2010)
        .with_game(2000, 2, common::early_feed());
    let tracker = source.tracker();

    let controller = Controller::with_source(config, source).without_progress();
    let result = tokio_test::block_on(controller.run());

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("connection refused for 2010"));
    assert_eq!(tracker.lock().unwrap().schedule_calls, vec![2023, 2010]);
    assert!(!std::path::Path::new(&output_path).exists());
    Ok(())
}

/// Concurrent mode keeps configured column order
#[test]
fn test_collect_structures_concurrently_should_keep_era_order() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(&temp_dir, &[("Old", 2000), ("New", 2023)]);
    config.concurrent = true;
    let source = MockStatsSource::new()
        .with_game(2000, 1, common::early_feed())
        .with_game(2023, 2, common::modern_feed());

    let controller = Controller::with_source(config, source).without_progress();
    let structures = tokio_test::block_on(controller.collect_structures())?;

    let labels: Vec<&str> = structures.iter().map(|s| s.era.label.as_str()).collect();
    assert_eq!(labels, vec!["Old", "New"]);
    Ok(())
}

/// The list policy from the config reaches the analyzer
#[test]
fn test_analyze_era_should_apply_list_policy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = common::test_config(&temp_dir, &[("A", 2023)]);
    config.list_policy = ListPolicy::Tag;
    let source = MockStatsSource::new().with_game(2023, 1, json!({"tags": [], "id": 1}));

    let controller = Controller::with_source(config, source).without_progress();
    let era = controller.config().eras[0].clone();
    let structure = tokio_test::block_on(controller.analyze_era(&era))?
        .expect("season has a game");

    assert!(structure.structure.contains_key("tags"));
    Ok(())
}

/// A single analyzed era yields no differences
#[test]
fn test_summarize_with_one_era_should_have_no_differences() {
    let eras = vec![Era::new("A", 2023), Era::new("B", 2010)];
    let structures = vec![erashape::comparison::EraStructure {
        era: eras[0].clone(),
        structure: erashape::structure::analyze(&common::modern_feed()),
    }];

    let summary = summarize(&eras, &structures);

    assert_eq!(summary.skipped, vec!["B"]);
    assert!(summary.differences.is_empty());
    assert!(summary.distinct_paths > 0);
}

/// End to end through the real HTTP client
#[tokio::test]
async fn test_run_against_http_stub_should_compare_eras() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let routes = HashMap::from([
        (
            "/api/v1/schedule".to_string(),
            StubResponse::ok(r#"{"dates": [{"games": [{"gamePk": 42}]}]}"#),
        ),
        (
            "/api/v1.1/game/42/feed/live".to_string(),
            StubResponse::ok(common::modern_feed().to_string()),
        ),
    ]);
    let stub = serve(routes).await;

    let mut config = common::test_config(&temp_dir, &[("A", 2023), ("B", 2010)]);
    config.api.base_url = stub.base_url.clone();
    let output_path = config.output_path.clone();

    let controller = Controller::with_config(config)?.without_progress();
    let summary = controller.run().await?;

    // Same game for both seasons, so nothing differs
    assert_eq!(summary.analyzed, vec!["A", "B"]);
    assert!(summary.differences.is_empty());
    assert_eq!(fs::read_to_string(&output_path)?, "path,A,B\n");
    assert_eq!(stub.requests.lock().unwrap().len(), 4);
    Ok(())
}
