//! Scaffolding into a destination given relative to the working directory.
//!
//! Kept in its own test binary: it changes the process working directory.

use std::path::Path;
use std::sync::Arc;

use honest_adapters::{LocalDirectoryFetcher, LocalFilesystem, SystemCommandRunner};
use honest_core::application::{Filesystem, ScaffoldService, TemplateCache, TemplateService};
use honest_core::domain::ProjectConfig;
use tempfile::TempDir;

fn write(path: impl AsRef<Path>, content: &str) {
    let path = path.as_ref();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn absolute_transform_keys_match_a_relative_destination() {
    let tmp = TempDir::new().unwrap();
    let work = tmp.path().join("work");
    std::fs::create_dir_all(&work).unwrap();
    std::env::set_current_dir(&work).unwrap();
    let absolute_key = std::env::current_dir().unwrap().join("my-app/src/a.ts");

    let repo = tmp.path().join("repo");
    write(
        repo.join("templates.json"),
        r#"{ "templates": { "barebone": { "description": "Minimal API" } } }"#,
    );
    let template = repo.join("templates/barebone");
    write(template.join("template.json"), r#"{ "variables": {} }"#);
    write(template.join("files/package.json"), r#"{ "name": "x" }"#);
    write(template.join("files/src/a.ts"), "export {}\n");
    write(template.join("files/src/b.ts"), "export {}\n");
    let mut transforms = serde_json::Map::new();
    transforms.insert(
        absolute_key.display().to_string(),
        serde_json::json!({ "action": "delete" }),
    );
    write(
        template.join("transforms.json"),
        &serde_json::Value::Object(transforms).to_string(),
    );

    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let cache = Arc::new(TemplateCache::with_base_dir(
        Box::new(LocalDirectoryFetcher::new(&repo)),
        fs.clone(),
        tmp.path(),
    ));
    let service = ScaffoldService::new(
        TemplateService::new(cache, fs.clone()),
        fs,
        Arc::new(SystemCommandRunner::new()),
    );

    let mut config = ProjectConfig::new("my-app", "barebone");
    config.git = false;
    config.install = false;
    let report = service
        .create("barebone", Path::new("my-app"), &config)
        .unwrap();

    assert!(report.project_path.is_absolute());
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert!(!work.join("my-app/src/a.ts").exists());
    assert!(work.join("my-app/src/b.ts").is_file());
}
