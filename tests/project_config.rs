use std::error::Error;
use std::io::Write;

use shipkit::config::{load_and_validate, load_from_path};
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn Error>>;

fn write_project(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn full_project_file_round_trips() -> TestResult {
    let file = write_project(
        r#"
[service]
name = "web"
artifact_dir = "build-out"

[publish]
tool = "swa"
args = ["deploy"]
deployment_token = "tok-123"
endpoints_args = ["hostname", "list"]

[pipeline]
remote_name = "upstream"
principal_name = "deployer"
role_name = "Owner"
"#,
    )?;

    let project = load_and_validate(file.path())?;
    assert_eq!(project.service.name, "web");
    assert_eq!(project.service.artifact_dir, "build-out");
    assert_eq!(project.publish.tool, "swa");
    assert_eq!(project.publish.args, vec!["deploy"]);
    assert_eq!(project.publish.deployment_token.as_deref(), Some("tok-123"));
    assert_eq!(
        project.publish.endpoints_args,
        Some(vec!["hostname".to_string(), "list".to_string()])
    );
    assert_eq!(project.pipeline.remote_name, "upstream");
    assert_eq!(project.pipeline.principal_name.as_deref(), Some("deployer"));
    assert_eq!(project.pipeline.role_name, "Owner");
    Ok(())
}

#[test]
fn minimal_project_file_fills_in_defaults() -> TestResult {
    let file = write_project(
        r#"
[service]
name = "api"
"#,
    )?;

    let project = load_and_validate(file.path())?;
    assert_eq!(project.service.artifact_dir, "dist");
    assert_eq!(project.publish.tool, "az");
    assert!(project.publish.args.is_empty());
    assert!(project.publish.deployment_token.is_none());
    assert!(project.publish.endpoints_args.is_none());
    assert_eq!(project.pipeline.remote_name, "origin");
    assert_eq!(project.pipeline.role_name, "Contributor");
    Ok(())
}

#[test]
fn missing_service_section_is_a_parse_error() -> TestResult {
    let file = write_project("[publish]\ntool = \"az\"\n")?;

    let err = load_from_path(file.path()).unwrap_err();
    assert!(
        format!("{err:#}").contains("parsing TOML project file"),
        "got: {err:#}"
    );
    Ok(())
}

#[test]
fn empty_service_name_fails_validation() -> TestResult {
    let file = write_project(
        r#"
[service]
name = "  "
"#,
    )?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(
        err.to_string().contains("[service] name must not be empty"),
        "got: {err}"
    );
    Ok(())
}

#[test]
fn empty_publish_tool_fails_validation() -> TestResult {
    let file = write_project(
        r#"
[service]
name = "web"

[publish]
tool = ""
"#,
    )?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(
        err.to_string().contains("[publish] tool must not be empty"),
        "got: {err}"
    );
    Ok(())
}

#[test]
fn missing_file_reports_the_path() {
    let err = load_from_path("/definitely/not/here/Shipkit.toml").unwrap_err();
    assert!(
        format!("{err:#}").contains("reading project file"),
        "got: {err:#}"
    );
}
