use std::path::{Path, PathBuf};
use std::time::Duration;

use rsvpbot_protocols::SessionError;

use super::launcher_core::parse_active_port;
use super::*;

#[test]
fn test_config_default() {
    let config = LaunchConfig::default();
    assert!(config.headless);
    assert!(config.chrome_path.is_none());
    assert_eq!(config.startup_timeout, Duration::from_secs(10));
    assert!(config.profile_root.ends_with("rsvpbot-profiles"));
}

#[test]
fn test_parse_active_port() {
    assert_eq!(
        parse_active_port("40123\n/devtools/browser/1b2c\n"),
        Some(40123)
    );
    assert_eq!(parse_active_port(""), None);
    assert_eq!(parse_active_port("not-a-port\n"), None);
    assert_eq!(parse_active_port("0\n"), None);
}

#[test]
fn test_args_headless() {
    let launcher = ChromeLauncher::new(LaunchConfig::default());
    let args = launcher.args(Path::new("/tmp/profile-1"));
    assert!(args.contains(&"--remote-debugging-port=0".to_string()));
    assert!(args.contains(&"--user-data-dir=/tmp/profile-1".to_string()));
    assert!(args.contains(&"--headless=new".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("about:blank"));
}

#[test]
fn test_args_headed_with_extras() {
    let launcher = ChromeLauncher::new(LaunchConfig {
        headless: false,
        extra_args: vec!["--lang=en-US".to_string()],
        ..Default::default()
    });
    let args = launcher.args(Path::new("/tmp/profile-2"));
    assert!(!args.contains(&"--headless=new".to_string()));
    assert!(args.contains(&"--lang=en-US".to_string()));
    assert!(args.contains(&"--window-size=1280,1024".to_string()));
}

#[test]
fn test_find_chrome() {
    let _result = ChromeLauncher::find_chrome();
}

#[tokio::test]
async fn test_launch_missing_executable() {
    let profile = tempfile::tempdir().unwrap();
    let launcher = ChromeLauncher::new(LaunchConfig {
        chrome_path: Some(PathBuf::from("/nonexistent/chrome-binary")),
        ..Default::default()
    });
    let result = launcher.launch(profile.path()).await;
    assert!(matches!(result, Err(LaunchError::SpawnFailed(_))));
}

#[test]
fn test_launch_error_into_session_error() {
    let err: SessionError = LaunchError::ChromeNotFound.into();
    assert!(matches!(err, SessionError::BrowserNotFound(_)));

    let err: SessionError = LaunchError::StartupTimeout(Duration::from_secs(1)).into();
    assert!(matches!(err, SessionError::LaunchFailed(_)));
}
