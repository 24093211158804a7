#![cfg(unix)]

use std::error::Error;
use std::io::Write;
use std::sync::{Arc, Mutex};

use shipkit::errors::ExecError;
use shipkit::exec::{CommandRunner, Redactor, RunSpec, ShellCommandRunner};
use shipkit_test_utils::{init_tracing, with_timeout};
use tokio_util::sync::CancellationToken;

type TestResult = Result<(), Box<dyn Error>>;

fn runner() -> ShellCommandRunner {
    ShellCommandRunner::new(Redactor::with_default_rules())
}

#[tokio::test]
async fn empty_command_without_shell_is_a_config_error() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let err = runner().run(&cancel, RunSpec::new("")).await.unwrap_err();

    assert!(matches!(err, ExecError::Config(_)), "got: {err:?}");
    assert!(err.run_result().is_none(), "no process should have run");
    Ok(())
}

#[tokio::test]
async fn captured_run_collects_stdout() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let result = with_timeout(runner().run(&cancel, RunSpec::new("echo").arg("hello"))).await?;

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "hello\n");
    assert_eq!(result.stderr, "");
    Ok(())
}

#[tokio::test]
async fn missing_binary_is_a_start_error() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let err = runner()
        .run(&cancel, RunSpec::new("shipkit-no-such-binary-zz"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExecError::Start(_)), "got: {err:?}");
    Ok(())
}

#[tokio::test]
async fn extra_env_is_appended_and_later_duplicates_win() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let spec = RunSpec::new("env")
        .env("SHIPKIT_TEST_DUP=first")
        .env("SHIPKIT_TEST_DUP=second")
        .env("SHIPKIT_TEST_EXTRA=present");

    let result = with_timeout(runner().run(&cancel, spec)).await?;
    let lines: Vec<&str> = result.stdout.lines().collect();

    // Ambient environment is inherited alongside the extras.
    assert!(lines.iter().any(|l| l.starts_with("PATH=")));
    assert!(lines.contains(&"SHIPKIT_TEST_DUP=second"));
    assert!(!lines.contains(&"SHIPKIT_TEST_DUP=first"));
    assert!(lines.contains(&"SHIPKIT_TEST_EXTRA=present"));
    Ok(())
}

#[tokio::test]
async fn interactive_run_reports_empty_captured_output() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let spec = RunSpec::new("sh")
        .args(["-c", "echo interactive-noise"])
        .interactive(true);

    let result = with_timeout(runner().run(&cancel, spec)).await?;

    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "");
    assert_eq!(result.stderr, "");
    Ok(())
}

#[tokio::test]
async fn shell_single_command_passes_args_positionally() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    // "$HOME" must come out literally: positional parameters are never
    // re-interpreted by the shell.
    let spec = RunSpec::new("echo")
        .args(["$HOME", "hello world"])
        .use_shell(true);

    let result = with_timeout(runner().run(&cancel, spec)).await?;

    assert_eq!(result.stdout, "$HOME hello world\n");
    Ok(())
}

#[tokio::test]
async fn run_list_short_circuits_at_the_first_failure() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let commands = vec![
        "echo first".to_string(),
        "false".to_string(),
        "echo should-not-run".to_string(),
    ];

    let err = with_timeout(runner().run_list(&cancel, commands, RunSpec::new("")))
        .await
        .unwrap_err();

    let result = err.run_result().expect("process ran");
    assert_ne!(result.exit_code, 0);
    assert!(result.stdout.contains("first"));
    assert!(!result.stdout.contains("should-not-run"));
    Ok(())
}

#[derive(Clone)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn stderr_is_duplicated_into_the_secondary_sink() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let sink = SharedBuf(Arc::new(Mutex::new(Vec::new())));
    let spec = RunSpec::new("sh")
        .args(["-c", "echo oops 1>&2"])
        .stderr_sink(Box::new(sink.clone()));

    let result = with_timeout(runner().run(&cancel, spec)).await?;

    assert!(result.stderr.contains("oops"), "captured: {result:?}");
    let duplicated = String::from_utf8(sink.0.lock().unwrap().clone())?;
    assert!(duplicated.contains("oops"), "sink saw: {duplicated:?}");
    Ok(())
}

#[tokio::test]
async fn stdin_is_fed_to_the_child() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let spec = RunSpec::new("cat").stdin("hello from stdin");
    let result = with_timeout(runner().run(&cancel, spec)).await?;

    assert_eq!(result.stdout, "hello from stdin");
    Ok(())
}

#[tokio::test]
async fn enriched_error_carries_redacted_output() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let spec = RunSpec::new("sh")
        .args(["-c", "echo logging in with --password hunter2; exit 3"])
        .enrich_error(true);

    let err = with_timeout(runner().run(&cancel, spec)).await.unwrap_err();

    assert_eq!(err.exit_code(), Some(3));
    let message = err.to_string();
    assert!(message.contains("--password <redacted>"), "got: {message}");
    assert!(!message.contains("hunter2"), "secret leaked: {message}");
    // Redaction is cosmetic: the captured result itself is untouched.
    assert!(err.run_result().unwrap().stdout.contains("hunter2"));
    Ok(())
}

#[tokio::test]
async fn working_directory_is_applied() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let dir = tempfile::tempdir()?;
    let spec = RunSpec::new("pwd").cwd(dir.path());

    let result = with_timeout(runner().run(&cancel, spec)).await?;

    let reported = std::fs::canonicalize(result.stdout.trim())?;
    assert_eq!(reported, std::fs::canonicalize(dir.path())?);
    Ok(())
}
