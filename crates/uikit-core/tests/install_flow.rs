mod common;

use common::{FakeFetch, Project, RecordingInstaller, ScriptedConfirm};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use uikit_core::registry::{ArtifactFile, Registry};
use uikit_core::{
    AddRequest, ArtifactBundle, CssStatus, Ecosystem, HttpRegistry, Installer, ScaffoldError,
    SourceSpec, TailwindMode,
};
use url::Url;

const REGISTRY: &str = "https://ui.test/kit";

fn two_file_bundle() -> ArtifactBundle {
    let mut bundle = ArtifactBundle::new("tabs", "test");
    bundle.files.insert(
        "tabs.blade.php.stub".to_string(),
        ArtifactFile::new("<div>{{ componentName }}</div>", "tabs.blade.php"),
    );
    bundle.files.insert(
        "tabs/list.blade.php.stub".to_string(),
        ArtifactFile::new("<div role=\"tablist\"></div>", "tabs/list.blade.php"),
    );
    bundle
}

#[tokio::test]
async fn test_declined_overwrite_does_not_fail_the_run() {
    let project = Project::new(TailwindMode::V4);
    project.write("resources/views/components/ui/tabs.blade.php", "keep me");

    let confirm = ScriptedConfirm::answering(false);
    let packages = RecordingInstaller::default();
    let installer = Installer::new(
        project.root(),
        &project.config,
        &confirm,
        &packages,
        Arc::new(FakeFetch::default()),
    );

    let report = installer.install_bundle(two_file_bundle(), false).await.unwrap();

    assert_eq!(report.created, vec![project.path("resources/views/components/ui/tabs/list.blade.php")]);
    assert_eq!(report.skipped, vec![project.path("resources/views/components/ui/tabs.blade.php")]);
    assert_eq!(project.read("resources/views/components/ui/tabs.blade.php"), "keep me");
    assert_eq!(confirm.asked().len(), 1);
    assert!(confirm.asked()[0].ends_with("already exists. Overwrite?"));
}

#[tokio::test]
async fn test_everything_skipped_fails_the_run() {
    let project = Project::new(TailwindMode::V4);
    project.write("resources/views/components/ui/badge.blade.php", "existing");

    let mut bundle = ArtifactBundle::new("badge", "test");
    bundle.files.insert(
        "badge.blade.php.stub".to_string(),
        ArtifactFile::new("<span/>", "badge.blade.php"),
    );

    let confirm = ScriptedConfirm::answering(false);
    let packages = RecordingInstaller::default();
    let installer = Installer::new(
        project.root(),
        &project.config,
        &confirm,
        &packages,
        Arc::new(FakeFetch::default()),
    );

    let err = installer.install_bundle(bundle, false).await.unwrap_err();
    assert!(matches!(err, ScaffoldError::NothingWritten(ref name) if name == "badge"));
    assert_eq!(project.read("resources/views/components/ui/badge.blade.php"), "existing");
}

#[tokio::test]
async fn test_github_shorthand_matches_explicit_base() {
    let shorthand = Arc::new(FakeFetch::default());
    let explicit = Arc::new(FakeFetch::default());

    let repo = SourceSpec::select(None, Some("acme/ui-kit@dev"), None).unwrap();
    let repo_registry = repo.registry(shorthand.clone()).unwrap();
    assert!(repo_registry.resolve("button").await.is_none());

    let base = Url::parse("https://raw.githubusercontent.com/acme/ui-kit/dev").unwrap();
    let url_registry = HttpRegistry::new(base, explicit.clone());
    assert!(url_registry.resolve("button").await.is_none());

    assert_eq!(shorthand.requested(), explicit.requested());
    assert_eq!(
        shorthand.requested()[0],
        "https://raw.githubusercontent.com/acme/ui-kit/dev/registry/button.json"
    );
}

#[tokio::test]
async fn test_add_from_remote_registry() {
    let project = Project::new(TailwindMode::V4);
    project.write("composer.json", r#"{"require": {"livewire/livewire": "^3.0"}}"#);
    project.write("resources/css/app.css", "@import 'tailwindcss';\n\n@theme {\n}\n");

    let fetch = Arc::new(
        FakeFetch::default()
            .with(
                "https://ui.test/kit/registry/toast.json",
                r##"{
                    "description": "Toast notifications",
                    "dependencies": {"composer": ["livewire/livewire", "vendor/icons"], "npm": []},
                    "css_vars": {"--ui-toast-bg": "#111"},
                    "files": {"toast.blade.php.stub": "toast.blade.php"},
                    "class": "toast.php.stub",
                    "js_stubs": ["toast.js"]
                }"##,
            )
            .with("https://ui.test/kit/stubs/toast.blade.php.stub", "<div wire:key=\"{{ componentName }}\"></div>")
            .with(
                "https://ui.test/kit/stubs/toast.php.stub",
                "<?php\nnamespace {{ namespace }};\nclass {{ class }} { public function render() { return view('{{ view }}'); } }\n",
            )
            .with("https://ui.test/kit/stubs/toast.js.stub", "window.toast = '{{ componentName }}';"),
    );

    let confirm = ScriptedConfirm::answering(true);
    let packages = RecordingInstaller::default();
    let installer = Installer::new(project.root(), &project.config, &confirm, &packages, fetch);

    let request = AddRequest {
        name: Some("toast".to_string()),
        registry: Some(REGISTRY.to_string()),
        ..AddRequest::default()
    };
    let report = installer.add(&request).await.unwrap();

    assert_eq!(report.source, "https://ui.test/kit/registry/toast.json");
    assert_eq!(report.created.len(), 3);
    assert_eq!(
        project.read("app/Livewire/UI/Toast.php"),
        "<?php\nnamespace App\\Livewire\\UI;\nclass Toast { public function render() { return view('livewire.ui.toast'); } }\n"
    );
    assert_eq!(
        project.read("resources/views/components/ui/toast.blade.php"),
        "<div wire:key=\"toast\"></div>"
    );
    assert_eq!(project.read("resources/js/ui/toast.js"), "window.toast = 'toast';");
    assert_eq!(report.script_imports, vec!["import './ui/toast';"]);

    assert_eq!(packages.calls(), vec![(Ecosystem::Composer, "vendor/icons".to_string())]);
    assert_eq!(
        confirm.asked(),
        vec!["The component requires Composer package vendor/icons. Install it?"]
    );

    assert_eq!(report.css, CssStatus::Injected);
    assert_eq!(
        project.read("resources/css/app.css"),
        "@import 'tailwindcss';\n\n@theme {\n  --ui-toast-bg: #111;\n}\n"
    );
}

#[tokio::test]
async fn test_repeated_add_keeps_stylesheet_stable() {
    let project = Project::new(TailwindMode::V4);
    project.write("resources/css/app.css", "@theme {\n  --ui-primary: #123456;\n}\n");

    let confirm = ScriptedConfirm::answering(true);
    let packages = RecordingInstaller::default();
    let installer = Installer::new(
        project.root(),
        &project.config,
        &confirm,
        &packages,
        Arc::new(FakeFetch::default()),
    );

    let request = AddRequest {
        name: Some("button".to_string()),
        force: true,
        ..AddRequest::default()
    };

    installer.add(&request).await.unwrap();
    let first = project.read("resources/css/app.css");
    installer.add(&request).await.unwrap();
    let second = project.read("resources/css/app.css");

    assert_eq!(first, second);
    assert_eq!(first.matches("--ui-primary:").count(), 1);
    assert!(first.contains("--ui-primary: #123456;"), "existing value is kept");
    assert!(first.contains("--ui-primary-foreground: #ffffff;"));
    assert!(confirm.asked().is_empty(), "force never prompts");
}

#[tokio::test]
async fn test_unreachable_registry_is_not_found() {
    let project = Project::new(TailwindMode::V4);
    let fetch = Arc::new(FakeFetch::default());
    let confirm = ScriptedConfirm::answering(true);
    let packages = RecordingInstaller::default();
    let installer = Installer::new(project.root(), &project.config, &confirm, &packages, fetch.clone());

    let request = AddRequest {
        name: Some("button".to_string()),
        registry: Some(REGISTRY.to_string()),
        ..AddRequest::default()
    };
    let err = installer.add(&request).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to fetch component 'button' from https://ui.test/kit"
    );
    assert!(!project.path("resources").exists());
    assert!(!fetch.requested().is_empty());
}

#[tokio::test]
async fn test_add_from_direct_url() {
    let project = Project::new(TailwindMode::V3);
    let fetch = Arc::new(
        FakeFetch::default().with("https://cdn.test/stubs/Pill.blade.php.stub", "<span>{{ componentName }}</span>"),
    );
    let confirm = ScriptedConfirm::answering(true);
    let packages = RecordingInstaller::default();
    let installer = Installer::new(project.root(), &project.config, &confirm, &packages, fetch);

    let request = AddRequest {
        url: Some("https://cdn.test/stubs/Pill.blade.php.stub".to_string()),
        registry: Some(REGISTRY.to_string()),
        ..AddRequest::default()
    };
    let report = installer.add(&request).await.unwrap();

    assert_eq!(report.component, "Pill");
    assert_eq!(report.css, CssStatus::NotRequired);
    assert_eq!(
        project.read("resources/views/components/ui/pill.blade.php"),
        "<span>pill</span>"
    );
}

#[tokio::test]
async fn test_add_from_local_registry_directory() {
    let project = Project::new(TailwindMode::V4);
    let registry = tempfile::TempDir::new().unwrap();
    let write = |relative: &str, content: &str| {
        let path = registry.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    };
    write(
        "registry.json",
        r#"{"components": {"avatar-group": {
            "description": "Stacked avatars",
            "dependencies": [],
            "css_vars": [],
            "files": {
                "avatar-group.blade.php.stub": "avatar-group.blade.php",
                "avatar.blade.php.stub": "avatar.blade.php"
            }
        }}}"#,
    );
    write("stubs/avatar-group.blade.php.stub", "<div class=\"{{ componentName }}\"></div>");
    write("avatar.blade.php.stub", "<img/>");

    let confirm = ScriptedConfirm::answering(true);
    let packages = RecordingInstaller::default();
    let installer = Installer::new(
        project.root(),
        &project.config,
        &confirm,
        &packages,
        Arc::new(FakeFetch::default()),
    );

    let request = AddRequest {
        name: Some("avatar-group".to_string()),
        registry: Some(format!("file://{}", registry.path().display())),
        ..AddRequest::default()
    };
    let report = installer.add(&request).await.unwrap();

    assert_eq!(report.created.len(), 2);
    assert_eq!(
        project.read("resources/views/components/ui/avatar-group.blade.php"),
        "<div class=\"avatar-group\"></div>"
    );
    assert_eq!(project.read("resources/views/components/ui/avatar.blade.php"), "<img/>");
    assert!(packages.calls().is_empty());
}

#[tokio::test]
async fn test_missing_config_fails_before_any_fetch() {
    let dir = tempfile::TempDir::new().unwrap();
    let fetch = Arc::new(FakeFetch::default());
    let confirm = ScriptedConfirm::answering(true);
    let packages = RecordingInstaller::default();

    let err = Installer::open(dir.path(), "php-ui.json", &confirm, &packages, fetch.clone())
        .err()
        .unwrap();

    assert!(matches!(err, ScaffoldError::ConfigMissing { ref file, .. } if file == "php-ui.json"));
    assert!(err.to_string().contains("init"));
    assert!(fetch.requested().is_empty());
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_open_installs_with_saved_config() {
    let project = Project::new(TailwindMode::V3);
    let confirm = ScriptedConfirm::answering(true);
    let packages = RecordingInstaller::default();
    let installer = Installer::open(
        project.root(),
        "php-ui.json",
        &confirm,
        &packages,
        Arc::new(FakeFetch::default()),
    )
    .unwrap();

    let request = AddRequest {
        name: Some("button".to_string()),
        ..AddRequest::default()
    };
    let report = installer.add(&request).await.unwrap();

    assert!(project.path("resources/views/components/ui/button.blade.php").is_file());
    assert!(matches!(report.css, CssStatus::Manual(ref vars) if vars["--ui-primary"] == "#0f172a"));
}
