//! End-to-end project creation
//!
//! [`ProjectCreator`] runs the scaffolding steps in a fixed order:
//!
//! 1. Resolve `<base>/<name>`; refuse if it exists, or remove it with `force`
//! 2. Validate the name
//! 3. Shallow-clone the template branch
//! 4. Drop the clone's `.git` directory
//! 5. Derive `.env` from `.env.example`
//! 6. Install dependencies (best effort)
//! 7. Write a fresh `APP_KEY`
//! 8. Optionally create a new git repository with one commit
//!
//! Steps 1 and 2 swap places depending on [`CheckOrder`].

use crate::config::{self, Secret, ENV_EXAMPLE_FILE, ENV_FILE};
use crate::error::CreateError;
use crate::install::{DependencyInstaller, InstallOutcome, INSTALL_TIMEOUT};
use crate::project::ProjectRequest;
use crate::report::{Reporter, Stage};
use crate::runtime::CommandRunner;
use crate::templates::{count_files, strip_history, RemoteFetcher, TemplateRepository};
use crate::validation::{self, ProjectName};
use crate::vcs::VersionControlInitializer;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// When the name check runs relative to removing an existing directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckOrder {
    /// Reject bad names before touching the filesystem
    #[default]
    ValidateFirst,

    /// Handle the existing directory first, then validate
    ///
    /// With `force`, a directory named like an invalid project (`Blog`, say)
    /// is deleted before the name is rejected. Names that are not a single
    /// plain path component are never removed.
    RemoveBeforeValidate,
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    pub name: ProjectName,
    pub directory: PathBuf,
    /// Template branch that was cloned
    pub branch: &'static str,
    /// Files fetched from the template
    pub files: usize,
    /// `.env` was derived from `.env.example`
    pub env_configured: bool,
    pub app_key_written: bool,
    pub git_initialized: bool,
    /// Best-effort steps that failed
    pub warnings: Vec<String>,
}

impl CreatedProject {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Orchestrates one project creation run
pub struct ProjectCreator<'a, R> {
    runner: R,
    reporter: &'a dyn Reporter,
    repository: TemplateRepository,
    base_dir: PathBuf,
    check_order: CheckOrder,
    install_timeout: Duration,
}

impl<'a, R: CommandRunner> ProjectCreator<'a, R> {
    /// Create projects as subdirectories of `base_dir`
    pub fn new(
        runner: R,
        reporter: &'a dyn Reporter,
        repository: TemplateRepository,
        base_dir: PathBuf,
    ) -> Self {
        Self {
            runner,
            reporter,
            repository,
            base_dir,
            check_order: CheckOrder::default(),
            install_timeout: INSTALL_TIMEOUT,
        }
    }

    pub fn with_check_order(mut self, check_order: CheckOrder) -> Self {
        self.check_order = check_order;
        self
    }

    pub fn with_install_timeout(mut self, limit: Duration) -> Self {
        self.install_timeout = limit;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    pub async fn create(&self, request: &ProjectRequest) -> Result<CreatedProject, CreateError> {
        let project_dir = self.project_dir(&request.name);

        let name = match self.check_order {
            CheckOrder::ValidateFirst => {
                let name = validation::validate(&request.name)?;
                self.prepare_directory(request, &project_dir).await?;
                name
            }
            CheckOrder::RemoveBeforeValidate => {
                self.prepare_directory(request, &project_dir).await?;
                validation::validate(&request.name)?
            }
        };

        let branch = request.template.branch();
        self.reporter.stage(&Stage::Cloning {
            template: request.template,
        });
        RemoteFetcher::new(&self.runner)
            .fetch(self.repository.url(), &project_dir, branch)
            .await
            .map_err(CreateError::Fetch)?;

        self.reporter.stage(&Stage::RemovingHistory);
        strip_history(&project_dir)
            .await
            .map_err(CreateError::StripHistory)?;
        let files = count_files(&project_dir);

        self.reporter.stage(&Stage::ConfiguringEnvironment);
        let env_path = project_dir.join(ENV_FILE);
        let env_configured = config::configure(
            &project_dir.join(ENV_EXAMPLE_FILE),
            &env_path,
            request.database,
        )
        .await
        .map_err(CreateError::Environment)?;

        let mut warnings = Vec::new();

        self.reporter.stage(&Stage::InstallingDependencies {
            python: request.python_version.clone(),
        });
        let outcome = DependencyInstaller::new(&self.runner)
            .with_timeout(self.install_timeout)
            .install(&project_dir, &request.python_version)
            .await;
        if let InstallOutcome::Warning { message, detail } = outcome {
            let warning = match detail {
                Some(detail) => format!("{}\n{}", message, detail),
                None => message,
            };
            self.reporter.warning(&warning);
            warnings.push(warning);
        }

        self.reporter.stage(&Stage::GeneratingKey);
        let app_key_written = config::write_app_key(&env_path, &Secret::generate())
            .await
            .map_err(CreateError::Environment)?;

        if request.init_git {
            self.reporter.stage(&Stage::InitializingGit);
            VersionControlInitializer::new(&self.runner)
                .init(&project_dir)
                .await
                .map_err(CreateError::VersionControl)?;
        }

        self.reporter.stage(&Stage::Finalizing);
        self.reporter
            .success(&format!("Project '{}' created successfully!", name));

        Ok(CreatedProject {
            name,
            directory: project_dir,
            branch,
            files,
            env_configured,
            app_key_written,
            git_initialized: request.init_git,
            warnings,
        })
    }

    /// Refuse an existing directory, or remove it when forced
    async fn prepare_directory(
        &self,
        request: &ProjectRequest,
        project_dir: &Path,
    ) -> Result<(), CreateError> {
        if !project_dir.exists() {
            return Ok(());
        }

        if !request.force {
            return Err(CreateError::DirectoryExists {
                name: request.name.clone(),
                path: project_dir.to_path_buf(),
            });
        }

        if !is_single_component(&request.name) {
            return Ok(());
        }

        self.reporter.warning(&format!(
            "Removing existing directory '{}'",
            request.name
        ));
        let removed = if project_dir.is_dir() {
            fs::remove_dir_all(project_dir).await
        } else {
            fs::remove_file(project_dir).await
        };
        removed.map_err(|source| CreateError::RemoveExisting {
            path: project_dir.to_path_buf(),
            source,
        })
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Database;
    use crate::report::testing::RecordingReporter;
    use crate::runtime::fake::{FakeRunner, Reply};
    use crate::templates::Template;
    use url::Url;

    const ENV_EXAMPLE: &str = "APP_NAME=Larapy\n\
                               APP_KEY=\n\
                               DB_CONNECTION=sqlite\n\
                               DB_DATABASE=storage/database.sqlite\n";

    fn template_runner() -> FakeRunner {
        FakeRunner::new()
            .with_template_file(ENV_EXAMPLE_FILE, ENV_EXAMPLE)
            .with_template_file("pyproject.toml", "[project]\nname = \"larapy-app\"\n")
            .with_template_file("app/main.py", "")
    }

    fn repository() -> TemplateRepository {
        TemplateRepository::new(Url::parse("https://github.com/larapy-lab/larapy").unwrap())
    }

    fn creator<'a>(
        runner: FakeRunner,
        reporter: &'a RecordingReporter,
        base: &Path,
    ) -> ProjectCreator<'a, FakeRunner> {
        ProjectCreator::new(runner, reporter, repository(), base.to_path_buf())
    }

    fn request(name: &str) -> ProjectRequest {
        ProjectRequest::new(name)
    }

    #[tokio::test]
    async fn test_creates_api_project_with_sqlite_defaults() {
        let base = tempfile::tempdir().unwrap();
        let reporter = RecordingReporter::default();
        let creator = creator(template_runner(), &reporter, base.path());

        let mut req = request("blog-app");
        req.template = Template::Api;
        let created = creator.create(&req).await.unwrap();

        let project_dir = base.path().join("blog-app");
        assert_eq!(created.directory, project_dir);
        assert_eq!(created.branch, "api");
        assert_eq!(created.files, 3);
        assert!(created.env_configured);
        assert!(created.app_key_written);
        assert!(!created.git_initialized);
        assert!(!created.has_warnings());

        assert_eq!(
            creator.runner().command_lines(),
            vec![
                format!(
                    "git clone --branch api --depth 1 https://github.com/larapy-lab/larapy {}",
                    project_dir.display()
                ),
                "pip install -e .".to_string(),
            ]
        );

        assert!(!project_dir.join(".git").exists());
        let env = std::fs::read_to_string(project_dir.join(ENV_FILE)).unwrap();
        let lines: Vec<&str> = env.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "APP_NAME=Larapy");
        assert!(lines[1].starts_with("APP_KEY=") && lines[1].len() > "APP_KEY=".len());
        assert_eq!(lines[2], "DB_CONNECTION=sqlite");
        assert_eq!(lines[3], "DB_DATABASE=storage/database.sqlite");
    }

    #[tokio::test]
    async fn test_reports_stages_in_order() {
        let base = tempfile::tempdir().unwrap();
        let reporter = RecordingReporter::default();
        let creator = creator(template_runner(), &reporter, base.path());

        let mut req = request("blog-app");
        req.init_git = true;
        creator.create(&req).await.unwrap();

        assert_eq!(
            reporter.stages(),
            vec![
                Stage::Cloning {
                    template: Template::Default
                },
                Stage::RemovingHistory,
                Stage::ConfiguringEnvironment,
                Stage::InstallingDependencies {
                    python: "3.11".to_string()
                },
                Stage::GeneratingKey,
                Stage::InitializingGit,
                Stage::Finalizing,
            ]
        );
    }

    #[tokio::test]
    async fn test_reserved_name_rejected_before_filesystem_access() {
        let base = tempfile::tempdir().unwrap();
        std::fs::create_dir(base.path().join("test")).unwrap();
        std::fs::write(base.path().join("test/keep.txt"), "keep").unwrap();

        for force in [false, true] {
            let reporter = RecordingReporter::default();
            let creator = creator(template_runner(), &reporter, base.path());
            let mut req = request("test");
            req.force = force;

            let err = creator.create(&req).await.unwrap_err();
            assert!(matches!(err, CreateError::InvalidName(_)));
            assert!(creator.runner().calls().is_empty());
            assert!(reporter.events().is_empty());
        }
        assert!(base.path().join("test/keep.txt").exists());
    }

    #[tokio::test]
    async fn test_legacy_order_removes_before_rejecting() {
        let base = tempfile::tempdir().unwrap();
        std::fs::create_dir(base.path().join("Blog")).unwrap();

        let reporter = RecordingReporter::default();
        let creator = creator(template_runner(), &reporter, base.path())
            .with_check_order(CheckOrder::RemoveBeforeValidate);
        let mut req = request("Blog");
        req.force = true;

        let err = creator.create(&req).await.unwrap_err();
        assert!(matches!(err, CreateError::InvalidName(_)));
        assert!(!base.path().join("Blog").exists());
        assert!(creator.runner().calls().is_empty());
        assert_eq!(
            reporter.warnings(),
            vec!["Removing existing directory 'Blog'".to_string()]
        );
    }

    #[tokio::test]
    async fn test_legacy_order_never_removes_outside_base() {
        let outer = tempfile::tempdir().unwrap();
        let base = outer.path().join("workspace");
        std::fs::create_dir(&base).unwrap();
        std::fs::write(outer.path().join("keep.txt"), "keep").unwrap();

        let reporter = RecordingReporter::default();
        let creator = creator(template_runner(), &reporter, &base)
            .with_check_order(CheckOrder::RemoveBeforeValidate);
        let mut req = request("..");
        req.force = true;

        let err = creator.create(&req).await.unwrap_err();
        assert!(matches!(err, CreateError::InvalidName(_)));
        assert!(outer.path().join("keep.txt").exists());
        assert!(base.exists());
    }

    #[tokio::test]
    async fn test_existing_directory_without_force() {
        let base = tempfile::tempdir().unwrap();
        std::fs::create_dir(base.path().join("blog-app")).unwrap();
        std::fs::write(base.path().join("blog-app/notes.txt"), "mine").unwrap();

        let reporter = RecordingReporter::default();
        let creator = creator(template_runner(), &reporter, base.path());

        let err = creator.create(&request("blog-app")).await.unwrap_err();
        assert!(matches!(err, CreateError::DirectoryExists { .. }));
        assert!(base.path().join("blog-app/notes.txt").exists());
        assert!(creator.runner().calls().is_empty());
    }

    #[tokio::test]
    async fn test_force_replaces_existing_directory() {
        let base = tempfile::tempdir().unwrap();
        std::fs::create_dir(base.path().join("blog-app")).unwrap();
        std::fs::write(base.path().join("blog-app/stale.txt"), "old").unwrap();

        let reporter = RecordingReporter::default();
        let creator = creator(template_runner(), &reporter, base.path());
        let mut req = request("blog-app");
        req.force = true;

        let created = creator.create(&req).await.unwrap();
        assert!(!created.directory.join("stale.txt").exists());
        assert!(created.directory.join("pyproject.toml").exists());
        assert!(created.directory.join(ENV_FILE).exists());
        assert_eq!(
            reporter.warnings(),
            vec!["Removing existing directory 'blog-app'".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fatal() {
        let base = tempfile::tempdir().unwrap();
        let runner = template_runner().reply(
            "git clone",
            Reply::Exit {
                code: 128,
                stderr: "fatal: unable to access 'https://github.com/larapy-lab/larapy/'"
                    .to_string(),
            },
        );
        let reporter = RecordingReporter::default();
        let creator = creator(runner, &reporter, base.path());

        let err = creator.create(&request("blog-app")).await.unwrap_err();
        assert!(matches!(err, CreateError::Fetch(_)));
        assert!(err.to_string().contains("unable to access"));
        assert_eq!(creator.runner().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_install_failure_is_only_a_warning() {
        let base = tempfile::tempdir().unwrap();
        let runner = template_runner().reply(
            "pip",
            Reply::Exit {
                code: 1,
                stderr: "ERROR: file:///tmp does not appear to be a Python project".to_string(),
            },
        );
        let reporter = RecordingReporter::default();
        let creator = creator(runner, &reporter, base.path());

        let created = creator.create(&request("blog-app")).await.unwrap();
        assert!(created.has_warnings());
        assert!(created.warnings[0].starts_with("Failed to install dependencies"));
        assert!(created.warnings[0].contains("not appear to be a Python project"));
        assert!(created.app_key_written);
        assert_eq!(reporter.warnings(), created.warnings);
    }

    #[tokio::test]
    async fn test_git_init_runs_in_project_dir() {
        let base = tempfile::tempdir().unwrap();
        let reporter = RecordingReporter::default();
        let creator = creator(template_runner(), &reporter, base.path());
        let mut req = request("blog-app");
        req.init_git = true;

        let created = creator.create(&req).await.unwrap();
        assert!(created.git_initialized);

        let calls = creator.runner().calls();
        let git_calls: Vec<_> = calls[2..].iter().collect();
        assert_eq!(
            git_calls
                .iter()
                .map(|c| c.command_line.as_str())
                .collect::<Vec<_>>(),
            vec!["git init", "git add .", "git commit -m Initial commit"]
        );
        assert!(git_calls
            .iter()
            .all(|c| c.workdir.as_deref() == Some(created.directory.as_path())));
    }

    #[tokio::test]
    async fn test_git_failure_is_fatal() {
        let base = tempfile::tempdir().unwrap();
        let runner = template_runner().reply(
            "git commit",
            Reply::Exit {
                code: 128,
                stderr: "Please tell me who you are.".to_string(),
            },
        );
        let reporter = RecordingReporter::default();
        let creator = creator(runner, &reporter, base.path());
        let mut req = request("blog-app");
        req.init_git = true;

        let err = creator.create(&req).await.unwrap_err();
        assert!(matches!(err, CreateError::VersionControl(_)));
        assert!(err.to_string().contains("Please tell me who you are."));
    }

    #[tokio::test]
    async fn test_template_without_env_example() {
        let base = tempfile::tempdir().unwrap();
        let runner = FakeRunner::new().with_template_file("README.md", "# app\n");
        let reporter = RecordingReporter::default();
        let creator = creator(runner, &reporter, base.path());

        let created = creator.create(&request("blog-app")).await.unwrap();
        assert!(!created.env_configured);
        assert!(!created.app_key_written);
        assert!(!created.directory.join(ENV_FILE).exists());
    }

    #[tokio::test]
    async fn test_postgresql_project() {
        let base = tempfile::tempdir().unwrap();
        let reporter = RecordingReporter::default();
        let creator = creator(template_runner(), &reporter, base.path());
        let mut req = request("shop");
        req.database = Database::Postgresql;

        let created = creator.create(&req).await.unwrap();
        let env = std::fs::read_to_string(created.directory.join(ENV_FILE)).unwrap();
        assert!(env.lines().any(|l| l == "DB_CONNECTION=postgresql"));
        assert!(env.lines().any(|l| l == "DB_PORT=5432"));
        assert!(!env.contains("storage/database.sqlite"));
        assert_eq!(env.matches("APP_KEY=").count(), 1);
    }

    #[tokio::test]
    async fn test_each_project_gets_a_new_key() {
        let base = tempfile::tempdir().unwrap();
        let reporter = RecordingReporter::default();

        let first = creator(template_runner(), &reporter, base.path())
            .create(&request("one"))
            .await
            .unwrap();
        let second = creator(template_runner(), &reporter, base.path())
            .create(&request("two"))
            .await
            .unwrap();

        let key = |dir: &Path| {
            std::fs::read_to_string(dir.join(ENV_FILE))
                .unwrap()
                .lines()
                .find(|l| l.starts_with("APP_KEY="))
                .unwrap()
                .to_string()
        };
        assert_ne!(key(&first.directory), key(&second.directory));
    }

    #[test]
    fn test_single_component_names() {
        assert!(is_single_component("blog-app"));
        assert!(is_single_component("Blog"));
        assert!(!is_single_component(".."));
        assert!(!is_single_component("a/b"));
        assert!(!is_single_component("/abs"));
        assert!(!is_single_component(""));
    }
}
