use super::*;

#[tokio::test]
async fn click_with_unknown_index_returns_false_without_protocol_calls() {
    // No session exists, so reaching any protocol path would panic or hang;
    // the cache miss must short-circuit first.
    let browser = Browser::default();
    assert!(!browser.click(0).await);
    assert!(!browser.click(99).await);
}

#[tokio::test]
async fn script_click_with_unknown_index_returns_false() {
    let browser = Browser::default();
    assert!(!browser.click_via_script(3).await);
}

#[tokio::test]
async fn input_text_with_unknown_index_returns_false() {
    let browser = Browser::default();
    assert!(!browser.input_text(0, "hello").await);
}

#[tokio::test]
async fn observe_before_start_is_an_error() {
    let mut browser = Browser::default();
    assert!(matches!(browser.observe().await, Err(BrowserError::NotStarted)));
}

#[tokio::test]
async fn operations_before_start_are_errors() {
    let browser = Browser::default();
    assert!(matches!(browser.send_keys("Enter").await, Err(BrowserError::NotStarted)));
    assert!(matches!(browser.scroll(true, 1.0).await, Err(BrowserError::NotStarted)));
    assert!(matches!(browser.screenshot().await, Err(BrowserError::NotStarted)));
    assert!(matches!(browser.extract_content().await, Err(BrowserError::NotStarted)));
    assert!(matches!(
        browser.click_with_feedback(0).await,
        Err(BrowserError::NotStarted)
    ));
}

#[tokio::test]
async fn navigate_before_start_is_an_error() {
    let mut browser = Browser::default();
    assert!(matches!(
        browser.navigate("https://example.com").await,
        Err(BrowserError::NotStarted)
    ));
}

#[tokio::test]
async fn close_without_start_is_a_no_op() {
    let mut browser = Browser::default();
    browser.close().await;
    browser.close().await;
}

#[test]
fn default_config_is_sane() {
    let config = BrowserConfig::default();
    assert_eq!(config.debug_port, 9222);
    assert!(!config.headless);
    assert!(!config.chrome_candidates.is_empty());
    assert_eq!(config.launch_poll_attempts, 15);
    assert_eq!(config.launch_poll_interval.as_secs(), 1);
    assert!(config.max_frame_size >= 10 * 1024 * 1024);
}

#[test]
fn browser_state_is_a_plain_value() {
    let state = BrowserState {
        url: "https://example.com".to_string(),
        title: "Example".to_string(),
        elements: "[0] <a href='/'> Home".to_string(),
        screenshot: None,
    };
    let copy = state.clone();
    assert_eq!(copy.url, state.url);
    assert!(copy.screenshot.is_none());
}
