use std::path::Path;

use proptest::prelude::*;

use ai_skills::reconcile::reconcile;
use ai_skills::test_utils::fixtures::SkillsFixture;

const CATALOG: [&str; 5] = ["alpha", "beta", "gamma", "delta", "epsilon"];

fn pick(mask: &[bool]) -> Vec<String> {
    CATALOG
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(name, _)| (*name).to_string())
        .collect()
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

fn setup() -> SkillsFixture {
    let fx = SkillsFixture::new();
    for name in CATALOG {
        fx.create_skill(name);
    }
    fx
}

fn agent_dir(fx: &SkillsFixture) -> std::path::PathBuf {
    fx.home.join(".claude").join("skills")
}

fn managed(dir: &Path) -> Vec<String> {
    SkillsFixture::link_names(dir)
        .into_iter()
        .filter(|name| name != "foreign")
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_reconcile_converges_from_any_prior_state(
        first in prop::collection::vec(any::<bool>(), CATALOG.len()),
        second in prop::collection::vec(any::<bool>(), CATALOG.len()),
    ) {
        let fx = setup();
        let dir = agent_dir(&fx);

        reconcile(&pick(&first), &dir, &fx.central_dir).unwrap();
        let desired = pick(&second);
        reconcile(&desired, &dir, &fx.central_dir).unwrap();

        prop_assert_eq!(managed(&dir), sorted(desired));
    }

    #[test]
    fn test_reconcile_twice_changes_nothing(
        mask in prop::collection::vec(any::<bool>(), CATALOG.len()),
    ) {
        let fx = setup();
        let dir = agent_dir(&fx);
        let desired = pick(&mask);

        reconcile(&desired, &dir, &fx.central_dir).unwrap();
        let second = reconcile(&desired, &dir, &fx.central_dir).unwrap();

        prop_assert!(second.created.is_empty());
        prop_assert!(second.removed.is_empty());
        prop_assert_eq!(managed(&dir), sorted(desired));
    }

    #[test]
    fn test_foreign_entries_always_survive(
        mask in prop::collection::vec(any::<bool>(), CATALOG.len()),
    ) {
        let fx = setup();
        let dir = agent_dir(&fx);
        let elsewhere = fx.create_file("elsewhere/tool/SKILL.md", "# tool\n");
        std::fs::create_dir_all(&dir).unwrap();
        std::os::unix::fs::symlink(elsewhere.parent().unwrap(), dir.join("foreign")).unwrap();
        fx.create_file("home/.claude/skills/local/SKILL.md", "# local\n");

        reconcile(&pick(&mask), &dir, &fx.central_dir).unwrap();

        prop_assert!(dir.join("foreign").join("SKILL.md").is_file());
        prop_assert!(dir.join("local").join("SKILL.md").is_file());
    }
}
