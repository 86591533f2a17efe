//! Shared fixtures for cadence tests.
//!
//! `runner_configs` loads named JSON configs listed in `fixtures/manifest.json`.
//! The probe types record what commands did, so tests can assert on side
//! effects without hand-rolling `Rc<Cell<_>>` plumbing each time.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "runner-configs")]
    runner_configs: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod runner_configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.runner_configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.runner_configs, "runner config", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.runner_configs, "runner config", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.runner_configs, "runner config", name)?;
        Ok(resolve_path(rel))
    }
}

/// A boolean that closures can set.
#[derive(Clone, Debug, Default)]
pub struct Flag(Rc<Cell<bool>>);

impl Flag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self) {
        self.0.set(true);
    }

    pub fn clear(&self) {
        self.0.set(false);
    }

    /// A closure that raises this flag.
    pub fn setter(&self) -> impl FnMut() + 'static {
        let flag = self.clone();
        move || flag.set()
    }
}

/// Counts how many times closures fired.
#[derive(Clone, Debug, Default)]
pub struct Counter(Rc<Cell<u32>>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// A closure that bumps this counter.
    pub fn incrementer(&self) -> impl FnMut() + 'static {
        let counter = self.clone();
        move || counter.incr()
    }
}

/// Ordered record of labelled calls.
#[derive(Clone, Debug, Default)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, label: &str) {
        self.0.borrow_mut().push(label.to_owned());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.0.borrow().last().cloned()
    }

    /// A closure that appends `label` each time it runs.
    pub fn recorder(&self, label: &str) -> impl FnMut() + 'static {
        let log = self.clone();
        let label = label.to_owned();
        move || log.push(&label)
    }
}
