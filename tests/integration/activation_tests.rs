//! End-to-end activation across agents through the engine.

#![cfg(unix)]

use std::fs;

use ai_skills::SkillsError;
use ai_skills::agents::{AgentId, AgentRegistry};
use ai_skills::engine::{AgentOutcome, Engine};
use ai_skills::test_utils::fixtures::SkillsFixture;
use serde_json::Value;

const START: &str = "<!-- SKILLS_ACTIVATION_START -->";

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn codex_entries(fx: &SkillsFixture) -> Vec<(String, bool)> {
    let raw = fs::read_to_string(fx.home.join(".codex/config.toml")).unwrap();
    let doc: toml::Table = toml::from_str(&raw).unwrap();
    doc["skills"]["config"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| {
            (
                entry["path"].as_str().unwrap().to_string(),
                entry["enabled"].as_bool().unwrap(),
            )
        })
        .collect()
}

#[test]
fn test_switching_skills_moves_links_and_rewrites_block() {
    let fx = SkillsFixture::new();
    fx.create_skill("skill-1");
    fx.create_skill("skill-2");
    let registry = AgentRegistry::with_home(&fx.home);
    let engine = Engine::new(&registry, &fx.central_dir, &fx.project_dir);
    let claude_skills = fx.home.join(".claude/skills");

    engine.activate(&ids(&["claude"]), &ids(&["skill-1"])).unwrap();
    assert_eq!(SkillsFixture::link_names(&claude_skills), ids(&["skill-1"]));

    engine.activate(&ids(&["claude"]), &ids(&["skill-2"])).unwrap();
    assert_eq!(SkillsFixture::link_names(&claude_skills), ids(&["skill-2"]));

    let claude_md = fs::read_to_string(fx.project_dir.join(".claude/CLAUDE.md")).unwrap();
    assert_eq!(claude_md.matches(START).count(), 1);
    assert!(claude_md.contains("`skill-2`"));
    assert!(!claude_md.contains("`skill-1`"));
}

#[test]
fn test_activation_writes_every_agent_surface() {
    let fx = SkillsFixture::new();
    fx.create_skill("a");
    fx.create_skill("b");
    let registry = AgentRegistry::with_home(&fx.home);
    let engine = Engine::new(&registry, &fx.central_dir, &fx.project_dir);

    let report = engine
        .activate(&ids(&["claude", "gemini", "codex", "copilot"]), &ids(&["a", "b"]))
        .unwrap();
    assert_eq!(report.failed_count(), 0);

    for dot_dir in [".claude", ".gemini", ".codex", ".copilot"] {
        assert_eq!(
            SkillsFixture::link_names(&fx.home.join(dot_dir).join("skills")),
            ids(&["a", "b"]),
            "links for {dot_dir}"
        );
    }

    let claude_md = fs::read_to_string(fx.project_dir.join(".claude/CLAUDE.md")).unwrap();
    assert!(claude_md.contains("- Active global skills: `a`, `b`."));

    let copilot = fs::read_to_string(fx.project_dir.join(".github/copilot-instructions.md")).unwrap();
    assert!(copilot.starts_with("# Copilot Instructions\n"));
    assert!(copilot.contains("- @a\n- @b"));

    let gemini: Value =
        serde_json::from_str(&fs::read_to_string(fx.project_dir.join(".gemini/settings.json")).unwrap())
            .unwrap();
    assert_eq!(gemini["agent"]["activeSkills"], serde_json::json!(["a", "b"]));

    assert_eq!(
        codex_entries(&fx),
        vec![
            ("~/.codex/skills/a".to_string(), true),
            ("~/.codex/skills/b".to_string(), true),
        ]
    );
}

#[test]
fn test_second_activation_changes_nothing() {
    let fx = SkillsFixture::new();
    fx.create_skill("a");
    let registry = AgentRegistry::with_home(&fx.home);
    let engine = Engine::new(&registry, &fx.central_dir, &fx.project_dir);
    let agents = ids(&["claude", "gemini", "codex", "copilot"]);

    engine.activate(&agents, &ids(&["a"])).unwrap();
    let snapshot = |fx: &SkillsFixture| {
        [
            fx.project_dir.join(".claude/CLAUDE.md"),
            fx.project_dir.join(".github/copilot-instructions.md"),
            fx.project_dir.join(".gemini/settings.json"),
            fx.home.join(".codex/config.toml"),
        ]
        .map(|path| fs::read_to_string(path).unwrap())
    };
    let before = snapshot(&fx);

    let report = engine.activate(&agents, &ids(&["a"])).unwrap();

    assert_eq!(snapshot(&fx), before);
    for outcome in &report.outcomes {
        let links = outcome.links().unwrap();
        assert!(links.created.is_empty() && links.removed.is_empty());
    }
}

#[test]
fn test_deactivating_everything() {
    let fx = SkillsFixture::new();
    fx.create_skill("a");
    let registry = AgentRegistry::with_home(&fx.home);
    let engine = Engine::new(&registry, &fx.central_dir, &fx.project_dir);
    let agents = ids(&["claude", "gemini", "codex"]);

    engine.activate(&agents, &ids(&["a"])).unwrap();
    engine.activate(&agents, &[]).unwrap();

    assert!(SkillsFixture::link_names(&fx.home.join(".claude/skills")).is_empty());
    let claude_md = fs::read_to_string(fx.project_dir.join(".claude/CLAUDE.md")).unwrap();
    assert!(claude_md.contains("<!-- No skills activated -->"));
    assert_eq!(codex_entries(&fx), vec![("~/.codex/skills/a".to_string(), false)]);

    // Gemini settings only ever grow.
    let gemini: Value =
        serde_json::from_str(&fs::read_to_string(fx.project_dir.join(".gemini/settings.json")).unwrap())
            .unwrap();
    assert_eq!(gemini["agent"]["activeSkills"], serde_json::json!(["a"]));
}

#[test]
fn test_user_content_survives_activation() {
    let fx = SkillsFixture::new();
    fx.create_skill("a");
    fx.create_file("home/.claude/skills/my-local-skill/SKILL.md", "# mine\n");
    fx.create_file(
        "project/.claude/CLAUDE.md",
        "# My notes\n\nKeep this paragraph.\n",
    );
    fx.create_file(
        "project/.gemini/settings.json",
        r#"{"theme": "dark", "agent": {"model": "pro"}}"#,
    );
    fx.create_file(
        "home/.codex/config.toml",
        "model = \"o4\"\n\n[[skills.config]]\npath = \"/elsewhere/tool\"\nenabled = true\n",
    );
    let registry = AgentRegistry::with_home(&fx.home);
    let engine = Engine::new(&registry, &fx.central_dir, &fx.project_dir);

    engine
        .activate(&ids(&["claude", "gemini", "codex"]), &ids(&["a"]))
        .unwrap();

    assert!(fx.home.join(".claude/skills/my-local-skill/SKILL.md").is_file());

    let claude_md = fs::read_to_string(fx.project_dir.join(".claude/CLAUDE.md")).unwrap();
    assert!(claude_md.starts_with("# My notes\n\nKeep this paragraph.\n\n<!-- SKILLS_ACTIVATION_START -->"));

    let gemini: Value =
        serde_json::from_str(&fs::read_to_string(fx.project_dir.join(".gemini/settings.json")).unwrap())
            .unwrap();
    assert_eq!(gemini["theme"], "dark");
    assert_eq!(gemini["agent"]["model"], "pro");

    let raw = fs::read_to_string(fx.home.join(".codex/config.toml")).unwrap();
    let doc: toml::Table = toml::from_str(&raw).unwrap();
    assert_eq!(doc["model"].as_str(), Some("o4"));
    assert!(codex_entries(&fx).contains(&("/elsewhere/tool".to_string(), true)));
}

#[test]
fn test_corrupt_agent_config_fails_only_that_agent() {
    let fx = SkillsFixture::new();
    fx.create_skill("a");
    fx.create_file("home/.codex/config.toml", "this is = = not toml");
    let registry = AgentRegistry::with_home(&fx.home);
    let engine = Engine::new(&registry, &fx.central_dir, &fx.project_dir);

    let report = engine
        .activate(&ids(&["codex", "claude"]), &ids(&["a"]))
        .unwrap();

    match &report.outcomes[0] {
        AgentOutcome::Failed { agent, code, .. } => {
            assert_eq!(*agent, AgentId::Codex);
            assert_eq!(*code, "parse");
        }
        other => panic!("expected codex failure, got {other:?}"),
    }
    assert!(matches!(report.outcomes[1], AgentOutcome::Activated(_)));
    assert_eq!(
        fs::read_to_string(fx.home.join(".codex/config.toml")).unwrap(),
        "this is = = not toml"
    );
    assert!(fx.project_dir.join(".claude/CLAUDE.md").is_file());

    assert!(matches!(
        report.into_result(),
        Err(SkillsError::AgentFailures { failed: 1, total: 2 })
    ));
}

#[test]
fn test_sync_replaces_orphaned_links() {
    let fx = SkillsFixture::new();
    let old = fx.create_skill("old");
    fx.create_skill("keep");
    let registry = AgentRegistry::with_home(&fx.home);
    let engine = Engine::new(&registry, &fx.central_dir, &fx.project_dir);

    engine.sync(&ids(&["gemini"])).unwrap();
    fs::remove_dir_all(old).unwrap();
    fx.create_skill("new");

    let report = engine.sync(&ids(&["gemini"])).unwrap();

    assert_eq!(
        SkillsFixture::link_names(&fx.home.join(".gemini/skills")),
        ids(&["keep", "new"])
    );
    let links = report.outcomes[0].links().unwrap();
    assert_eq!(links.created, ids(&["new"]));
    assert_eq!(links.removed, ids(&["old"]));
}
