//! Integration test for the `init` and `validate` commands.
//!
//! Only exercises local configuration handling.

use kube_sanitizer::Host;

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_init_then_validate() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("sanitizer.toml");
    let config_path = config_path.to_str().expect("valid path");

    let mut host = TestHost::new();
    kube_sanitizer::run(&mut host, ["kube-sanitizer", "init", config_path])
        .await
        .expect("init should succeed");
    assert!(host.output_str().contains("Generated default configuration file"));

    let mut host = TestHost::new();
    kube_sanitizer::run(&mut host, ["kube-sanitizer", "validate", "--config", config_path])
        .await
        .expect("validate should succeed");
    assert!(host.output_str().contains("Configuration file is valid"));
    assert_eq!(host.exit_code, None);
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_validate_fixture_policy() {
    let mut host = TestHost::new();
    kube_sanitizer::run(
        &mut host,
        ["kube-sanitizer", "validate", "-c", "tests/fixtures/strict_policy.toml"],
    )
    .await
    .expect("fixture policy should be valid");

    assert!(host.output_str().contains("Tolerated versions: 1.28"));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "Miri cannot call CreateIoCompletionPort")]
async fn test_validate_rejects_unknown_code() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("bad.toml");
    std::fs::write(&config_path, "excluded_codes = [404]\n").expect("Failed to write test config");

    let mut host = TestHost::new();
    let result = kube_sanitizer::run(
        &mut host,
        ["kube-sanitizer", "validate", "--config", config_path.to_str().expect("valid path")],
    )
    .await;

    assert!(result.is_err(), "unknown excluded code should fail validation");
    assert_eq!(host.exit_code, Some(1));
}
