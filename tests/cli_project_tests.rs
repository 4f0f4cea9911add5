//! End-to-end tests for `mailforge project` commands.

use std::fs;

mod fixtures;
use fixtures::*;

/// Creates a project with one instance of a fresh module.
/// Returns (project id, module id, instance id).
fn project_with_instance(env: &CliEnv, code: &str) -> (String, String, String) {
    let module = env.run_ok(&["module", "add", "--name", "Block", "--code", code]);
    let project = env.run_ok(&["project", "new", "Launch"]);
    let instance = env.run_ok(&["project", "add", &project, &module]);
    (project, module, instance)
}

// ============================================================================
// New / List Command Tests
// ============================================================================

#[test]
fn test_new_project_appears_in_list() {
    let env = CliEnv::new();
    let id = env.run_ok(&["project", "new", "Spring Sale"]);
    assert!(id.starts_with("proj_"));

    let projects = env.run_json(&["project", "list", "--json"]);
    let projects = projects.as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], id.as_str());
    assert_eq!(projects[0]["name"], "Spring Sale");
    assert_eq!(projects[0]["instanceCount"], 0);
    assert!(projects[0]["createdAt"].is_string());
}

#[test]
fn test_new_project_with_blank_name_fails_validation() {
    let env = CliEnv::new();
    let output = env.run(&["project", "new", "  "]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_list_empty_is_friendly() {
    let env = CliEnv::new();
    let stdout = env.run_ok(&["project", "list"]);
    assert!(stdout.contains("No projects yet"));
}

// ============================================================================
// Add / Set / Render Command Tests
// ============================================================================

#[test]
fn test_set_value_and_render_to_stdout() {
    let env = CliEnv::new();
    let (project, _, instance) = project_with_instance(&env, HERO_CODE);

    env.run_ok(&["project", "set", &project, &instance, "url", "https://x/1.png"]);
    let html = env.run_ok(&["project", "render", &project]);
    assert_eq!(html, "<img src='https://x/1.png'>");
}

#[test]
fn test_set_color_value_is_normalized() {
    let env = CliEnv::new();
    let (project, _, instance) = project_with_instance(&env, CTA_CODE);

    let stdout = env.run_ok(&["project", "set", &project, &instance, "ctaColor", "abc"]);
    assert_eq!(stdout, "ctaColor = #ABC");

    let stdout = env.run_ok(&["project", "set", &project, &instance, "ctaText", "abc"]);
    assert_eq!(stdout, "ctaText = abc");

    let html = env.run_ok(&["project", "render", &project]);
    assert_eq!(html, "<a href=\"\" style=\"background:#ABC\">abc</a>");
}

#[test]
fn test_render_to_file() {
    let env = CliEnv::new();
    let (project, _, instance) = project_with_instance(&env, HERO_CODE);
    env.run_ok(&["project", "set", &project, &instance, "url", "a.png"]);

    let out = env.temp.path().join("out").join("email.html");
    let output = env.run(&["project", "render", &project, "-o", out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Wrote"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "<img src='a.png'>");
}

#[test]
fn test_stdout_and_file_render_are_identical() {
    let env = CliEnv::new();
    let (project, _, instance) = project_with_instance(&env, HERO_CODE);
    env.run_ok(&["project", "set", &project, &instance, "url", "a.png"]);

    let stdout = env.run(&["project", "render", &project]).stdout;
    let out = env.temp.path().join("email.html");
    env.run_ok(&["project", "render", &project, "-o", out.to_str().unwrap()]);

    assert_eq!(stdout, fs::read(&out).unwrap());
    assert_eq!(stdout, b"<img src='a.png'>");
}

#[test]
fn test_render_with_frames() {
    let env = CliEnv::new();
    let (project, _, _) = project_with_instance(&env, "<p>{{body}}</p>");

    let html = env.run_ok(&["project", "render", &project, "--frames"]);
    assert_eq!(html, "<div class=\"frame\"><p></p></div>");
}

#[test]
fn test_render_unknown_project_is_not_found() {
    let env = CliEnv::new();
    let output = env.run(&["project", "render", "proj_nope"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("project not found"));
}

#[test]
fn test_add_unknown_module_is_not_found() {
    let env = CliEnv::new();
    let project = env.run_ok(&["project", "new", "Launch"]);
    let output = env.run(&["project", "add", &project, "mod_nope"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_set_on_unknown_instance_is_not_found() {
    let env = CliEnv::new();
    let (project, _, _) = project_with_instance(&env, HERO_CODE);
    let output = env.run(&["project", "set", &project, "inst_nope", "url", "x"]);
    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// Remove / Move Command Tests
// ============================================================================

#[test]
fn test_move_instance_changes_render_order() {
    let env = CliEnv::new();
    let first = env.run_ok(&["module", "add", "--name", "A", "--code", "<a/>"]);
    let second = env.run_ok(&["module", "add", "--name", "B", "--code", "<b/>"]);
    let project = env.run_ok(&["project", "new", "Order"]);
    env.run_ok(&["project", "add", &project, &first]);
    let moved = env.run_ok(&["project", "add", &project, &second]);

    let stdout = env.run_ok(&["project", "move", &project, &moved, "0"]);
    assert!(stdout.contains("position 0"));
    assert_eq!(env.run_ok(&["project", "render", &project]), "<b/><a/>");

    let stdout = env.run_ok(&["project", "move", &project, &moved, "99"]);
    assert!(stdout.contains("position 1"), "Target should clamp: {stdout}");
    assert_eq!(env.run_ok(&["project", "render", &project]), "<a/><b/>");
}

#[test]
fn test_remove_instance() {
    let env = CliEnv::new();
    let (project, _, instance) = project_with_instance(&env, HERO_CODE);

    let stdout = env.run_ok(&["project", "remove", &project, &instance]);
    assert!(stdout.contains("Removed"));
    assert_eq!(env.run_ok(&["project", "render", &project]), "");

    let stdout = env.run_ok(&["project", "remove", &project, &instance]);
    assert!(stdout.contains("nothing removed"));
}

// ============================================================================
// Fields Command Tests
// ============================================================================

#[test]
fn test_fields_json_lists_every_instance() {
    let env = CliEnv::new();
    let (project, module, instance) = project_with_instance(&env, CTA_CODE);
    let second = env.run_ok(&["project", "add", &project, &module]);
    env.run_ok(&["project", "set", &project, &second, "ctaText", "Go"]);

    let fields = env.run_json(&["project", "fields", &project, "--json"]);
    let fields = fields.as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["instanceId"], instance.as_str());
    assert_eq!(fields[0]["moduleName"], "Block");
    assert_eq!(fields[1]["fields"][2], serde_json::json!(["ctaText", "Go"]));
    assert_eq!(fields[0]["fields"][2], serde_json::json!(["ctaText", ""]));
}

#[test]
fn test_fields_human_output() {
    let env = CliEnv::new();
    let (project, _, _) = project_with_instance(&env, HERO_CODE);
    let stdout = env.run_ok(&["project", "fields", &project]);
    assert!(stdout.contains("[0] Block"));
    assert!(stdout.contains("url = "));
}
