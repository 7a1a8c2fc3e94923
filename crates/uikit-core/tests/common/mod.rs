//! Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use uikit_core::{Confirm, Ecosystem, Fetch, PackageInstaller, ProjectConfig, TailwindMode};
use url::Url;

/// In-memory transport that records every requested URL
#[derive(Default)]
pub struct FakeFetch {
    responses: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetch {
    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for FakeFetch {
    async fn get_text(&self, url: &Url) -> Option<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses.get(url.as_str()).cloned()
    }
}

/// Answers with a fixed value and remembers every question
pub struct ScriptedConfirm {
    answer: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str, _default: bool) -> bool {
        self.asked.lock().unwrap().push(message.to_string());
        self.answer
    }
}

/// Package installer that only records what it was asked to install
#[derive(Default)]
pub struct RecordingInstaller {
    calls: Mutex<Vec<(Ecosystem, String)>>,
}

impl RecordingInstaller {
    pub fn calls(&self) -> Vec<(Ecosystem, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageInstaller for RecordingInstaller {
    async fn run_install(&self, ecosystem: Ecosystem, package: &str, _root: &Path) -> Option<i32> {
        self.calls.lock().unwrap().push((ecosystem, package.to_string()));
        Some(0)
    }
}

/// A Laravel-ish project in a temporary directory
pub struct Project {
    pub dir: TempDir,
    pub config: ProjectConfig,
}

impl Project {
    pub fn new(tailwind: TailwindMode) -> Self {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::new("App\\", tailwind, None);
        config.save(dir.path(), "php-ui.json").unwrap();
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }
}
