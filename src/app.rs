use std::path::PathBuf;

use crate::agents::AgentRegistry;
use crate::config::Settings;
use crate::engine::Engine;
use crate::error::{Result, SkillsError};
use crate::store::{CentralStore, ProjectStore};
use crate::utils::fs::absolute;

pub struct AppContext {
    pub home: PathBuf,
    pub project_root: PathBuf,
    pub settings: Settings,
    pub central: CentralStore,
    pub project: ProjectStore,
    pub registry: AgentRegistry,
    pub robot_mode: bool,
}

impl AppContext {
    /// Relative `--home`, `--project` and central dir values are anchored at
    /// the current directory.
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let home = match &cli.home {
            Some(home) => absolute(home)?,
            None => dirs::home_dir()
                .ok_or_else(|| SkillsError::MissingConfig("home directory not found".to_string()))?,
        };
        let project_root = match &cli.project {
            Some(project) => absolute(project)?,
            None => std::env::current_dir()?,
        };
        let settings = Settings::load(&home)?;
        let central_dir = absolute(settings.central_dir(&home))?;

        let mut ctx = Self::assemble(home, project_root, central_dir, settings);
        ctx.robot_mode = cli.robot || ctx.settings.output.robot;
        Ok(ctx)
    }

    /// Context for an explicit home and project, in human output mode.
    #[must_use]
    pub fn new(home: PathBuf, project_root: PathBuf, settings: Settings) -> Self {
        let central_dir = settings.central_dir(&home);
        Self::assemble(home, project_root, central_dir, settings)
    }

    fn assemble(home: PathBuf, project_root: PathBuf, central_dir: PathBuf, settings: Settings) -> Self {
        let central = CentralStore::new(central_dir);
        let project = ProjectStore::new(&project_root, &settings.paths.project_file);
        let registry = AgentRegistry::with_home(&home);
        Self {
            home,
            project_root,
            settings,
            central,
            project,
            registry,
            robot_mode: false,
        }
    }

    #[must_use]
    pub fn engine(&self) -> Engine<'_> {
        Engine::new(&self.registry, self.central.dir(), &self.project_root)
    }
}
