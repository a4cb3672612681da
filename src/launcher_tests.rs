use std::time::Duration;

use super::*;
use crate::config::BrowserConfig;

fn config_with_candidates(candidates: Vec<String>) -> BrowserConfig {
    BrowserConfig {
        chrome_candidates: candidates,
        debug_port: 18923,
        launch_poll_attempts: 2,
        launch_poll_interval: Duration::from_millis(25),
        ..BrowserConfig::default()
    }
}

#[tokio::test]
async fn launch_fails_without_candidates() {
    let launcher = ChromeLauncher::new(config_with_candidates(vec![]));
    let err = launcher.launch().await.unwrap_err();
    assert!(matches!(err, BrowserError::ChromeNotFound));
}

#[tokio::test]
async fn launch_fails_when_no_candidate_path_exists() {
    let launcher = ChromeLauncher::new(config_with_candidates(vec![
        "/definitely/not/a/browser".to_string(),
        "/also/missing/chrome".to_string(),
    ]));
    let err = launcher.launch().await.unwrap_err();
    assert!(matches!(err, BrowserError::ChromeNotFound));
}

#[cfg(unix)]
#[tokio::test]
async fn poll_exhaustion_fails_with_connection_error() {
    // /bin/sh spawns fine but never serves the debug endpoint, so the
    // launcher must burn its polling budget and clean the process up.
    let launcher = ChromeLauncher::new(config_with_candidates(vec!["/bin/sh".to_string()]));
    let err = launcher.launch().await.unwrap_err();
    assert!(matches!(err, BrowserError::ConnectionFailed(_)));
}

#[test]
fn bare_names_pass_through_to_path_resolution() {
    let launcher = ChromeLauncher::new(config_with_candidates(vec![
        "/missing/absolute/path".to_string(),
        "some-browser-name".to_string(),
    ]));
    assert_eq!(launcher.resolve_executable().unwrap(), "some-browser-name");
}

#[test]
fn absolute_candidates_are_tried_in_order() {
    let launcher = ChromeLauncher::new(config_with_candidates(vec![
        "/missing/one".to_string(),
        "/bin/sh".to_string(),
    ]));
    #[cfg(unix)]
    assert_eq!(launcher.resolve_executable().unwrap(), "/bin/sh");
}
