use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Isolated home / central / project layout for reconciliation tests.
pub struct SkillsFixture {
    pub temp_dir: TempDir,
    pub home: PathBuf,
    pub central_dir: PathBuf,
    pub project_dir: PathBuf,
}

impl Default for SkillsFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillsFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let home = root.join("home");
        let central_dir = home.join(".config").join("ai-skills");
        let project_dir = root.join("project");

        std::fs::create_dir_all(&central_dir).expect("Failed to create central dir");
        std::fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        println!("[FIXTURE] Created temp directory: {root:?}");

        Self {
            temp_dir,
            home,
            central_dir,
            project_dir,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a skill folder with a SKILL.md in the central directory.
    pub fn create_skill(&self, name: &str) -> PathBuf {
        let dir = self.central_dir.join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create skill dir");
        std::fs::write(dir.join("SKILL.md"), format!("# {name}\n")).expect("Failed to write SKILL.md");
        println!("[FIXTURE] Created skill: {name}");
        dir
    }

    /// Create a file relative to the fixture root.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Create an agent's dot-directory (e.g. `.claude`) under home.
    pub fn install_agent_dir(&self, dot_dir: &str) -> PathBuf {
        let dir = self.home.join(dot_dir);
        std::fs::create_dir_all(&dir).expect("Failed to create agent dir");
        dir
    }

    /// Names of entries under `dir` that are symlinks, sorted.
    #[must_use]
    pub fn link_names(dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| crate::utils::fs::is_link(&entry.path()))
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}

impl Drop for SkillsFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.root());
    }
}
