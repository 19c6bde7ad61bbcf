//! Command workflows driven through `AppContext`, without spawning the binary.

#![cfg(unix)]

use std::fs;

use ai_skills::SkillsError;
use ai_skills::app::AppContext;
use ai_skills::cli::commands::activate::{self, ActivateArgs};
use ai_skills::cli::commands::init::{self, InitArgs};
use ai_skills::cli::commands::sync::{self, SyncArgs};
use ai_skills::config::Settings;
use ai_skills::test_utils::fixtures::SkillsFixture;

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn context(fx: &SkillsFixture) -> AppContext {
    AppContext::new(fx.home.clone(), fx.project_dir.clone(), Settings::default())
}

#[test]
fn test_init_uses_detected_agents_and_links_every_skill() {
    let fx = SkillsFixture::new();
    fx.install_agent_dir(".claude");
    fx.install_agent_dir(".codex");
    fx.create_skill("a");
    fx.create_skill("b");
    let ctx = context(&fx);

    init::run(&ctx, &InitArgs::default()).unwrap();

    assert_eq!(ctx.central.configured_agents().unwrap(), ids(&["claude", "codex"]));
    assert_eq!(SkillsFixture::link_names(&fx.home.join(".claude/skills")), ids(&["a", "b"]));
    assert_eq!(SkillsFixture::link_names(&fx.home.join(".codex/skills")), ids(&["a", "b"]));
    assert!(!fx.home.join(".gemini").exists());
}

#[test]
fn test_init_without_agents_leaves_central_uninitialized() {
    let fx = SkillsFixture::new();
    let ctx = context(&fx);

    init::run(&ctx, &InitArgs::default()).unwrap();

    assert!(!ctx.central.is_initialized());
}

#[test]
fn test_init_again_adds_agents_unless_forced() {
    let fx = SkillsFixture::new();
    let ctx = context(&fx);
    let with_agents = |agents: &[&str], force: bool| InitArgs {
        agents: ids(agents),
        force,
    };

    init::run(&ctx, &with_agents(&["claude"], false)).unwrap();
    init::run(&ctx, &with_agents(&["gemini"], false)).unwrap();
    assert_eq!(ctx.central.configured_agents().unwrap(), ids(&["claude", "gemini"]));

    init::run(&ctx, &with_agents(&["codex"], true)).unwrap();
    assert_eq!(ctx.central.configured_agents().unwrap(), ids(&["codex"]));
}

#[test]
fn test_init_rejects_unknown_agent() {
    let fx = SkillsFixture::new();
    let ctx = context(&fx);

    let err = init::run(
        &ctx,
        &InitArgs {
            agents: ids(&["claude", "invalid-agent"]),
            force: false,
        },
    )
    .unwrap_err();

    assert!(matches!(err, SkillsError::UnknownAgent(_)));
    assert!(!ctx.central.is_initialized());
}

#[test]
fn test_activate_before_init_is_guidance_not_error() {
    let fx = SkillsFixture::new();
    fs::remove_dir_all(&fx.central_dir).unwrap();
    let ctx = context(&fx);

    activate::run(
        &ctx,
        &ActivateArgs {
            skills: Some(ids(&["a"])),
            ..ActivateArgs::default()
        },
    )
    .unwrap();

    assert!(!ctx.project.path().exists());
}

#[test]
fn test_activate_records_project_and_new_agents() {
    let fx = SkillsFixture::new();
    fx.create_skill("skill-1");
    fx.create_skill("skill-2");
    let ctx = context(&fx);
    init::run(&ctx, &InitArgs { agents: ids(&["claude"]), force: false }).unwrap();

    activate::run(
        &ctx,
        &ActivateArgs {
            skills: Some(ids(&["skill-2"])),
            agents: Some(ids(&["claude", "copilot"])),
            clear: false,
        },
    )
    .unwrap();

    assert_eq!(ctx.project.active_skills().unwrap(), ids(&["skill-2"]));
    assert_eq!(ctx.central.configured_agents().unwrap(), ids(&["claude", "copilot"]));
    assert_eq!(SkillsFixture::link_names(&fx.home.join(".claude/skills")), ids(&["skill-2"]));
    assert!(fx.project_dir.join(".github/copilot-instructions.md").is_file());
}

#[test]
fn test_activate_defaults_to_current_project_skills() {
    let fx = SkillsFixture::new();
    fx.create_skill("skill-1");
    let ctx = context(&fx);
    init::run(&ctx, &InitArgs { agents: ids(&["claude"]), force: false }).unwrap();
    ctx.project.save(&ids(&["skill-1"]), &ids(&["claude"])).unwrap();

    activate::run(&ctx, &ActivateArgs::default()).unwrap();

    let claude_md = fs::read_to_string(fx.project_dir.join(".claude/CLAUDE.md")).unwrap();
    assert!(claude_md.contains("`skill-1`"));
}

#[test]
fn test_activate_unknown_skill_changes_nothing() {
    let fx = SkillsFixture::new();
    fx.create_skill("skill-1");
    let ctx = context(&fx);
    init::run(&ctx, &InitArgs { agents: ids(&["claude"]), force: false }).unwrap();

    let err = activate::run(
        &ctx,
        &ActivateArgs {
            skills: Some(ids(&["skill-1", "missing"])),
            ..ActivateArgs::default()
        },
    )
    .unwrap_err();

    assert!(matches!(err, SkillsError::UnknownSkill(name) if name == "missing"));
    assert!(!ctx.project.path().exists());
    assert!(!fx.project_dir.join(".claude").exists());
}

#[test]
fn test_activate_clear_removes_links() {
    let fx = SkillsFixture::new();
    fx.create_skill("skill-1");
    let ctx = context(&fx);
    init::run(&ctx, &InitArgs { agents: ids(&["claude"]), force: false }).unwrap();
    assert_eq!(SkillsFixture::link_names(&fx.home.join(".claude/skills")), ids(&["skill-1"]));

    activate::run(
        &ctx,
        &ActivateArgs {
            clear: true,
            ..ActivateArgs::default()
        },
    )
    .unwrap();

    assert!(SkillsFixture::link_names(&fx.home.join(".claude/skills")).is_empty());
    assert!(ctx.project.active_skills().unwrap().is_empty());
}

#[test]
fn test_sync_restores_every_skill_after_activation() {
    let fx = SkillsFixture::new();
    fx.create_skill("a");
    fx.create_skill("b");
    let ctx = context(&fx);
    init::run(&ctx, &InitArgs { agents: ids(&["gemini"]), force: false }).unwrap();
    activate::run(
        &ctx,
        &ActivateArgs {
            skills: Some(ids(&["a"])),
            ..ActivateArgs::default()
        },
    )
    .unwrap();
    assert_eq!(SkillsFixture::link_names(&fx.home.join(".gemini/skills")), ids(&["a"]));

    sync::run(&ctx, &SyncArgs::default()).unwrap();

    assert_eq!(SkillsFixture::link_names(&fx.home.join(".gemini/skills")), ids(&["a", "b"]));
}

/// Replace the agent list in config.json the way a hand edit would.
fn edit_configured_agents(ctx: &AppContext, agents: &[&str]) -> String {
    let path = ctx.central.config_path();
    let mut doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    doc["agents"] = serde_json::json!(agents);
    let raw = serde_json::to_string_pretty(&doc).unwrap();
    fs::write(path, &raw).unwrap();
    raw
}

#[test]
fn test_activate_rejects_unknown_configured_agent_before_writing() {
    let fx = SkillsFixture::new();
    fx.create_skill("a");
    let ctx = context(&fx);
    init::run(&ctx, &InitArgs { agents: ids(&["claude"]), force: false }).unwrap();
    let central_before = edit_configured_agents(&ctx, &["claude", "cursor"]);

    let err = activate::run(
        &ctx,
        &ActivateArgs {
            skills: Some(ids(&["a"])),
            ..ActivateArgs::default()
        },
    )
    .unwrap_err();

    assert!(matches!(err, SkillsError::UnknownAgent(ref id) if id == "cursor"));
    assert!(!ctx.project.path().exists());
    assert!(!fx.project_dir.join(".claude").exists());
    assert_eq!(fs::read_to_string(ctx.central.config_path()).unwrap(), central_before);
}

#[test]
fn test_activate_with_explicit_agents_still_checks_configured_ids() {
    let fx = SkillsFixture::new();
    fx.create_skill("a");
    let ctx = context(&fx);
    init::run(&ctx, &InitArgs { agents: ids(&["claude"]), force: false }).unwrap();
    let central_before = edit_configured_agents(&ctx, &["cursor"]);

    let err = activate::run(
        &ctx,
        &ActivateArgs {
            skills: Some(ids(&["a"])),
            agents: Some(ids(&["gemini"])),
            clear: false,
        },
    )
    .unwrap_err();

    assert!(matches!(err, SkillsError::UnknownAgent(ref id) if id == "cursor"));
    assert!(!ctx.project.path().exists());
    assert_eq!(fs::read_to_string(ctx.central.config_path()).unwrap(), central_before);
}

#[test]
fn test_init_merge_rejects_unknown_configured_agent() {
    let fx = SkillsFixture::new();
    let ctx = context(&fx);
    init::run(&ctx, &InitArgs { agents: ids(&["claude"]), force: false }).unwrap();
    let central_before = edit_configured_agents(&ctx, &["claude", "cursor"]);

    let err = init::run(&ctx, &InitArgs { agents: ids(&["gemini"]), force: false }).unwrap_err();

    assert!(matches!(err, SkillsError::UnknownAgent(ref id) if id == "cursor"));
    assert_eq!(fs::read_to_string(ctx.central.config_path()).unwrap(), central_before);

    init::run(&ctx, &InitArgs { agents: ids(&["gemini"]), force: true }).unwrap();
    assert_eq!(ctx.central.configured_agents().unwrap(), ids(&["gemini"]));
}
