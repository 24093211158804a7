#![cfg(unix)]

use std::error::Error;
use std::time::{Duration, Instant};

use shipkit::errors::ExecError;
use shipkit::exec::{CommandRunner, Redactor, RunSpec, ShellCommandRunner};
use shipkit_test_utils::{init_tracing, with_timeout};
use tokio_util::sync::CancellationToken;

type TestResult = Result<(), Box<dyn Error>>;

fn runner() -> ShellCommandRunner {
    ShellCommandRunner::new(Redactor::with_default_rules())
}

#[tokio::test]
async fn cancellation_kills_a_long_running_process() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = with_timeout(runner().run(&cancel, RunSpec::new("sleep").arg("5")))
        .await
        .unwrap_err();

    assert!(matches!(err, ExecError::Cancelled { .. }), "got: {err:?}");
    assert_eq!(err.exit_code(), Some(-1));
    // Killed well before the natural 5s runtime.
    assert!(started.elapsed() < Duration::from_secs(4));
    Ok(())
}

#[tokio::test]
async fn cancellation_kills_a_command_list() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let commands = vec!["echo begun".to_string(), "sleep 5".to_string()];
    let err = with_timeout(runner().run_list(&cancel, commands, RunSpec::new("")))
        .await
        .unwrap_err();

    let result = match err {
        ExecError::Cancelled { result } => result,
        other => panic!("expected cancellation, got: {other:?}"),
    };
    assert_eq!(result.exit_code, -1);
    // Output produced before the kill is still captured.
    assert!(result.stdout.contains("begun"));
    Ok(())
}

#[tokio::test]
async fn already_cancelled_token_stops_the_run_promptly() -> TestResult {
    init_tracing();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = with_timeout(runner().run(&cancel, RunSpec::new("sleep").arg("5")))
        .await
        .unwrap_err();

    assert!(matches!(err, ExecError::Cancelled { .. }), "got: {err:?}");
    Ok(())
}
