//! End-to-end scaffolding against a template repository on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use honest_adapters::{LocalDirectoryFetcher, LocalFilesystem};
use honest_core::application::{
    CommandRunner, Filesystem, ScaffoldService, TemplateCache, TemplateService,
};
use honest_core::domain::{PackageManager, ProjectConfig, WarningStage};
use honest_core::error::HonestResult;
use mockall::mock;
use mockall::predicate::{always, eq};
use serde_json::Value;
use tempfile::TempDir;

mock! {
    pub Runner {}
    impl CommandRunner for Runner {
        fn run(&self, program: &str, args: &[String], cwd: &Path, inherit_stdio: bool) -> HonestResult<()>;
    }
}

const ICON_PLACEHOLDER: &[u8] = &[0x89, b'P', b'N', b'G', 0x00];
const ICON_REAL: &[u8] = &[0x89, b'P', b'N', b'G', 0xff, 0xfe];

fn write(path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
    let path = path.as_ref();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A template repository with a structured, a legacy and a broken template.
fn template_repo(root: &Path) {
    write(
        root.join("templates.json"),
        r#"{
            "version": "1.0.0",
            "templates": {
                "barebone": { "description": "Minimal API", "category": "starter", "tags": ["api"] },
                "legacy": { "description": "Old layout", "path": "templates/legacy" },
                "broken": { "description": "Bad config" },
                "patchy": { "description": "One bad transform" }
            },
            "categories": { "starter": "Starter templates" }
        }"#,
    );

    let barebone = root.join("templates/barebone");
    write(
        barebone.join("template.json"),
        r#"{ "variables": { "projectName": "", "port": 3000 } }"#,
    );
    write(
        barebone.join("files/package.json"),
        r#"{
  "name": "{{projectName}}",
  "version": "0.1.0",
  "scripts": {
    "dev": "bun --watch src/index.ts",
    "build": "bun build src/index.ts --outdir dist",
    "lint": "eslint ."
  }
}"#,
    );
    write(
        barebone.join("files/README.md"),
        "# {{projectName}}\n\nRun `{{packageManager}} run dev`.\n",
    );
    write(
        barebone.join("files/src/index.ts"),
        "const name = '{{projectName}}'\nconst port = {{port}}\n",
    );
    write(barebone.join("files/src/docker-only.ts"), "export {}\n");
    write(barebone.join("files/public/icon.png"), ICON_PLACEHOLDER);
    write(barebone.join("assets/icon.png"), ICON_REAL);
    write(
        barebone.join("transforms.json"),
        r#"{
            "src/docker-only.ts": { "action": "delete", "unless": "docker" },
            "public/icon.png": { "action": "copy", "source": "assets/icon.png" },
            "src/index.ts": { "action": "substitute", "find": "3000", "replace": "8080", "when": "docker" }
        }"#,
    );

    write(root.join("shared/configs/eslint.config.js"), "export default []\n");
    write(root.join("shared/configs/Dockerfile"), "FROM oven/bun\n");
    write(root.join("shared/configs/.gitignore"), "node_modules\n");
    write(root.join("shared/configs/LICENSE"), "MIT\n");

    write(
        root.join("templates/legacy/package.json"),
        r#"{ "name": "legacy", "scripts": { "start": "bun index.js" } }"#,
    );
    write(root.join("templates/legacy/index.js"), "console.log('{{projectName}}')\n");

    let patchy = root.join("templates/patchy");
    write(patchy.join("template.json"), r#"{ "variables": {} }"#);
    write(patchy.join("files/package.json"), r#"{ "name": "patchy" }"#);
    write(patchy.join("files/src/keep.ts"), "export {}\n");
    write(patchy.join("files/src/drop.ts"), "export {}\n");
    write(
        patchy.join("transforms.json"),
        r#"{
            "src/keep.ts": { "action": "copy", "source": "../../../etc/passwd" },
            "src/drop.ts": { "action": "delete" }
        }"#,
    );

    write(root.join("templates/broken/template.json"), "{ not json");
    write(root.join("templates/broken/files/a.txt"), "a");
}

struct Fixture {
    _tmp: TempDir,
    repo: PathBuf,
    cache_base: PathBuf,
    work: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let repo = tmp.path().join("repo");
        let cache_base = tmp.path().join("cache");
        let work = tmp.path().join("work");
        template_repo(&repo);
        std::fs::create_dir_all(&cache_base).unwrap();
        std::fs::create_dir_all(&work).unwrap();
        Self {
            _tmp: tmp,
            repo,
            cache_base,
            work,
        }
    }

    fn service(&self, runner: MockRunner) -> ScaffoldService {
        let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
        let cache = Arc::new(TemplateCache::with_base_dir(
            Box::new(LocalDirectoryFetcher::new(&self.repo)),
            fs.clone(),
            &self.cache_base,
        ));
        ScaffoldService::new(TemplateService::new(cache, fs.clone()), fs, Arc::new(runner))
    }
}

fn quiet_config(name: &str, template: &str) -> ProjectConfig {
    let mut config = ProjectConfig::new(name, template);
    config.git = false;
    config.install = false;
    config
}

fn scripts(project: &Path) -> serde_json::Map<String, Value> {
    let manifest: Value =
        serde_json::from_str(&std::fs::read_to_string(project.join("package.json")).unwrap()).unwrap();
    manifest["scripts"].as_object().unwrap().clone()
}

#[test]
fn barebone_with_npm_without_eslint() {
    let fixture = Fixture::new();
    let mut runner = MockRunner::new();
    runner
        .expect_run()
        .with(eq("git"), always(), always(), eq(false))
        .times(1)
        .returning(|_, _, _, _| Ok(()));
    runner
        .expect_run()
        .with(eq("npm"), always(), always(), eq(true))
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let mut config = ProjectConfig::new("my-api", "barebone");
    config.package_manager = PackageManager::Npm;
    config.eslint = false;
    config.docker = true;

    let project = fixture.work.join("my-api");
    let report = fixture
        .service(runner)
        .create("barebone", &project, &config)
        .unwrap();

    assert!(report.structured);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);

    let scripts = scripts(&project);
    assert!(!scripts.contains_key("lint"));
    assert!(!scripts.contains_key("lint:fix"));
    assert_eq!(scripts["dev"], "npm --watch src/index.ts");
    assert_eq!(scripts["build"], "npm build src/index.ts --outdir dist");
    assert_eq!(scripts["docker:build"], "docker compose build");
    assert_eq!(scripts["docker:up"], "docker compose up -d");
    assert_eq!(scripts["docker:down"], "docker compose down");
    assert_eq!(scripts["format"], "npm run prettier --write .");

    let manifest = std::fs::read_to_string(project.join("package.json")).unwrap();
    assert!(manifest.contains("\"name\": \"my-api\""));
}

#[test]
fn placeholders_are_fully_replaced() {
    let fixture = Fixture::new();
    let project = fixture.work.join("blog");
    fixture
        .service(MockRunner::new())
        .create("barebone", &project, &quiet_config("blog", "barebone"))
        .unwrap();

    for file in ["package.json", "README.md", "src/index.ts"] {
        let content = std::fs::read_to_string(project.join(file)).unwrap();
        assert!(!content.contains("{{projectName}}"), "{file}: {content}");
        assert!(!content.contains("{{packageManager}}"), "{file}: {content}");
    }
    assert_eq!(
        std::fs::read_to_string(project.join("README.md")).unwrap(),
        "# blog\n\nRun `bun run dev`.\n"
    );
    // Declared variable default, then the docker-gated substitution.
    assert_eq!(
        std::fs::read_to_string(project.join("src/index.ts")).unwrap(),
        "const name = 'blog'\nconst port = 8080\n"
    );
}

#[test]
fn transforms_and_shared_configs_follow_flags() {
    let fixture = Fixture::new();
    let project = fixture.work.join("slim");
    let mut config = quiet_config("slim", "barebone");
    config.docker = false;
    config.eslint = true;

    fixture
        .service(MockRunner::new())
        .create("barebone", &project, &config)
        .unwrap();

    assert!(!project.join("src/docker-only.ts").exists());
    assert_eq!(std::fs::read(project.join("public/icon.png")).unwrap(), ICON_REAL);
    assert!(project.join("eslint.config.js").is_file());
    assert!(project.join("LICENSE").is_file());
    assert!(!project.join("Dockerfile").exists());
    assert!(!project.join("prettier.config.js").exists());
    assert!(
        std::fs::read_to_string(project.join("src/index.ts"))
            .unwrap()
            .contains("port = 3000")
    );
}

#[test]
fn a_bad_transform_only_skips_its_own_file() {
    let fixture = Fixture::new();
    let project = fixture.work.join("patchy");
    let report = fixture
        .service(MockRunner::new())
        .create("patchy", &project, &quiet_config("patchy", "patchy"))
        .unwrap();

    assert!(!project.join("src/drop.ts").exists());
    assert_eq!(
        std::fs::read_to_string(project.join("src/keep.ts")).unwrap(),
        "export {}\n"
    );
    assert_eq!(report.warnings.len(), 1, "{:?}", report.warnings);
    assert_eq!(report.warnings[0].stage, WarningStage::Transforms);
    assert!(report.warnings[0].message.contains("../../../etc/passwd"));
}

#[test]
fn legacy_templates_are_copied_and_configured() {
    let fixture = Fixture::new();
    let project = fixture.work.join("old");
    let mut config = quiet_config("old", "legacy");
    config.package_manager = PackageManager::Yarn;

    let report = fixture
        .service(MockRunner::new())
        .create("legacy", &project, &config)
        .unwrap();

    assert!(!report.structured);
    assert_eq!(scripts(&project)["start"], "yarn index.js");
    // Legacy templates get no variable substitution in sources.
    assert!(
        std::fs::read_to_string(project.join("index.js"))
            .unwrap()
            .contains("{{projectName}}")
    );
    assert!(!project.join("LICENSE").exists());
}

#[test]
fn failing_git_and_install_are_warnings() {
    let fixture = Fixture::new();
    let mut runner = MockRunner::new();
    runner.expect_run().returning(|program, _, _, _| {
        Err(honest_core::application::ApplicationError::CommandFailed {
            command: program.to_string(),
            reason: "not found".into(),
        }
        .into())
    });

    let project = fixture.work.join("warned");
    let report = fixture
        .service(runner)
        .create("barebone", &project, &ProjectConfig::new("warned", "barebone"))
        .unwrap();

    let stages: Vec<WarningStage> = report.warnings.iter().map(|w| w.stage).collect();
    assert_eq!(stages, vec![WarningStage::Git, WarningStage::Install]);
    assert!(project.join("package.json").is_file());
}

#[test]
fn failures_remove_the_destination() {
    let fixture = Fixture::new();
    let project = fixture.work.join("doomed");

    let err = fixture
        .service(MockRunner::new())
        .create("broken", &project, &quiet_config("doomed", "broken"))
        .unwrap_err();

    assert!(
        err.to_string()
            .starts_with("Failed to create project from template 'broken':")
    );
    assert!(!project.exists());
}

#[test]
fn unknown_template_and_existing_destination_are_rejected() {
    let fixture = Fixture::new();
    let service = fixture.service(MockRunner::new());

    let err = service
        .create("nope", &fixture.work.join("x"), &quiet_config("x", "nope"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Template 'nope' not found");

    let existing = fixture.work.join("taken");
    std::fs::create_dir_all(&existing).unwrap();
    let err = service
        .create("barebone", &existing, &quiet_config("taken", "barebone"))
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert!(existing.is_dir());
}

#[test]
fn cache_directory_is_removed_when_the_service_is_dropped() {
    let fixture = Fixture::new();
    let service = fixture.service(MockRunner::new());
    service
        .create("barebone", &fixture.work.join("p"), &quiet_config("p", "barebone"))
        .unwrap();

    let cached = service.templates().cache().cached_dir().unwrap();
    assert!(cached.is_dir());
    drop(service);
    assert!(!cached.exists());
}
