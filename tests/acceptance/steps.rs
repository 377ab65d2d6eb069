use crate::LooseEndWorld;
use cucumber::{given, then, when};
use loose_end::cli::parser::parse_args;
use loose_end::config::{PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILENAME};
use loose_end::prompt::ScriptedPrompter;
use loose_end::run::{self, RunContext};
use regex::Regex;
use serde_json::{Value, json};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUES_PATH: &str = "/repos/acme/widgets/issues";

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute git {:?}: {}", args, e));
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn project_nodes(names: &str) -> Value {
    let nodes: Vec<Value> = names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(i, name)| {
            json!({
                "id": format!("PVT_{}", name.to_lowercase()),
                "title": name,
                "number": i + 1,
            })
        })
        .collect();
    json!({"projectsV2": {"nodes": nodes}})
}

fn server(world: &LooseEndWorld) -> &MockServer {
    world
        .server
        .as_ref()
        .expect("a git repository step must start the mock server first")
}

async fn received_posts(world: &LooseEndWorld, request_path: &str) -> Vec<wiremock::Request> {
    server(world)
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == "POST" && r.url.path() == request_path)
        .collect()
}

fn output(world: &LooseEndWorld) -> String {
    String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8")
}

async fn start_repository(world: &mut LooseEndWorld, remote: Option<&str>) {
    let dir = TempDir::new().expect("Failed to create temporary directory");
    git(dir.path(), &["init", "--quiet"]);
    if let Some(url) = remote {
        git(dir.path(), &["remote", "add", "origin", url]);
    }

    let server = MockServer::start().await;
    let config_dir = dir.path().join(PROJECT_CONFIG_DIR);
    std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    std::fs::write(
        config_dir.join(PROJECT_CONFIG_FILENAME),
        json!({"api_url": server.uri()}).to_string(),
    )
    .expect("Failed to write config file");

    world.work_dir = Some(dir);
    world.server = Some(server);
}

#[given(regex = r#"^a git repository with remote "(.*)"$"#)]
async fn given_repository_with_remote(world: &mut LooseEndWorld, remote: String) {
    start_repository(world, Some(&remote)).await;
}

#[given("a git repository without a remote")]
async fn given_repository_without_remote(world: &mut LooseEndWorld) {
    start_repository(world, None).await;
}

#[given("a directory that is not a git repository")]
async fn given_plain_directory(world: &mut LooseEndWorld) {
    world.work_dir = Some(TempDir::new().expect("Failed to create temporary directory"));
}

async fn mount_repository_projects(world: &LooseEndWorld, names: &str) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("repository(owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"repository": project_nodes(names)}
        })))
        .mount(server(world))
        .await;
}

#[given(regex = r#"^the repository has projects "(.*)"$"#)]
async fn given_repository_projects(world: &mut LooseEndWorld, names: String) {
    mount_repository_projects(world, &names).await;
}

#[given("the repository has no projects")]
async fn given_no_repository_projects(world: &mut LooseEndWorld) {
    mount_repository_projects(world, "").await;
}

#[given(regex = r#"^the organization has projects "(.*)"$"#)]
async fn given_organization_projects(world: &mut LooseEndWorld, names: String) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("organization(login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"organization": project_nodes(&names)}
        })))
        .mount(server(world))
        .await;
}

#[given(regex = r#"^issue creation succeeds with URL "(.*)"$"#)]
async fn given_issue_creation_succeeds(world: &mut LooseEndWorld, url: String) {
    Mock::given(method("POST"))
        .and(path(ISSUES_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1001,
            "node_id": "I_kwDOtest",
            "number": 7,
            "html_url": url,
        })))
        .mount(server(world))
        .await;
}

#[given(regex = r#"^issue creation fails with status (\d+) and message "(.*)"$"#)]
async fn given_issue_creation_fails(world: &mut LooseEndWorld, status: u16, message: String) {
    Mock::given(method("POST"))
        .and(path(ISSUES_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"message": message})))
        .mount(server(world))
        .await;
}

#[given("adding to a project succeeds")]
async fn given_link_succeeds(world: &mut LooseEndWorld) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("addProjectV2ItemById"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"addProjectV2ItemById": {"item": {"id": "PVTI_1"}}}
        })))
        .mount(server(world))
        .await;
}

#[given("adding to a project fails")]
async fn given_link_fails(world: &mut LooseEndWorld) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("addProjectV2ItemById"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"addProjectV2ItemById": null},
            "errors": [{"message": "Your token has not been granted the required scopes"}]
        })))
        .mount(server(world))
        .await;
}

#[given(regex = r#"^the user answers "(.*)"$"#)]
async fn given_user_answers(world: &mut LooseEndWorld, answer: String) {
    world.answers.push(answer);
}

async fn run_with_args(world: &mut LooseEndWorld, extra: &[&str]) {
    let args: Vec<String> = std::iter::once("loose-end")
        .chain(extra.iter().copied())
        .map(String::from)
        .collect();
    let cli = parse_args(&args).expect("arguments should parse");
    let context = RunContext {
        work_dir: world
            .work_dir
            .as_ref()
            .expect("a directory step must run first")
            .path()
            .to_path_buf(),
        env_token: Some("test-token".to_string()),
    };
    let mut prompter = ScriptedPrompter::new(world.answers.clone());

    let mut captured: Vec<u8> = Vec::new();
    let result = run::run(
        cli,
        context,
        &mut prompter,
        Some(&mut captured as &mut dyn Write),
    )
    .await;
    if let Err(err) = &result {
        writeln!(captured, "❌ {err}").expect("write to buffer");
    }

    world.captured_output = captured;
    world.outcome = Some(result);
}

#[when("I run loose-end without arguments")]
async fn when_run_without_arguments(world: &mut LooseEndWorld) {
    run_with_args(world, &[]).await;
}

#[when(regex = r#"^I run loose-end with title "(.*)" and description "(.*)"$"#)]
async fn when_run_with_title(world: &mut LooseEndWorld, title: String, description: String) {
    run_with_args(world, &[&title, &description]).await;
}

#[when(regex = r#"^I run loose-end with title "(.*)", description "(.*)" and project "(.*)"$"#)]
async fn when_run_with_project(
    world: &mut LooseEndWorld,
    title: String,
    description: String,
    project: String,
) {
    run_with_args(world, &[&title, &description, "-p", &project]).await;
}

#[then(regex = r#"^the exit code should be (\d+)$"#)]
async fn then_exit_code(world: &mut LooseEndWorld, expected: i32) {
    let outcome = world.outcome.as_ref().expect("the command must run first");
    let code = if outcome.is_ok() { 0 } else { 1 };
    assert_eq!(
        code,
        expected,
        "Unexpected exit code, output:\n---\n{}\n---",
        output(world)
    );
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_contains(world: &mut LooseEndWorld, expected: String) {
    let output = output(world);
    assert!(
        output.contains(&expected),
        "Expected output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r#"^the error should contain "(.*)"$"#)]
async fn then_error_contains(world: &mut LooseEndWorld, expected: String) {
    let error = match world.outcome.as_ref().expect("the command must run first") {
        Err(err) => err.to_string(),
        Ok(outcome) => panic!("Expected an error, but the run succeeded: {:?}", outcome),
    };
    assert!(
        error.contains(&expected),
        "Expected error to contain '{}', but got '{}'",
        expected,
        error
    );
}

#[then("the output should contain an issue URL")]
async fn then_output_contains_issue_url(world: &mut LooseEndWorld) {
    let re = Regex::new(r"https://github\.com/[^/\s]+/[^/\s]+/issues/\d+").expect("valid regex");
    assert!(
        re.is_match(&output(world)),
        "No issue URL in output:\n{}",
        output(world)
    );
}

#[then("an issue should have been created")]
async fn then_issue_created(world: &mut LooseEndWorld) {
    assert_eq!(received_posts(world, ISSUES_PATH).await.len(), 1);
}

#[then("no issue should have been created")]
async fn then_no_issue_created(world: &mut LooseEndWorld) {
    assert!(received_posts(world, ISSUES_PATH).await.is_empty());
}

#[then(regex = r#"^the issue should have been added to project "(.*)"$"#)]
async fn then_issue_added_to_project(world: &mut LooseEndWorld, project_id: String) {
    let mutations: Vec<Value> = received_posts(world, "/graphql")
        .await
        .into_iter()
        .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
        .filter(|body| {
            body["query"]
                .as_str()
                .is_some_and(|q| q.contains("addProjectV2ItemById"))
        })
        .collect();
    assert_eq!(mutations.len(), 1, "Expected exactly one link mutation");
    assert_eq!(mutations[0]["variables"]["projectId"], json!(project_id));
    assert_eq!(mutations[0]["variables"]["contentId"], json!("I_kwDOtest"));
}
