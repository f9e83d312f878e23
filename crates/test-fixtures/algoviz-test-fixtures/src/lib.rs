//! Shared JSON fixtures for algoviz tests, resolved through
//! `fixtures/manifest.json` at the workspace root.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

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
    brackets: HashMap<String, String>,
    searches: HashMap<String, String>,
    sorts: HashMap<String, String>,
}

/// One bracket string and whether it is balanced.
#[derive(Clone, Debug, Deserialize)]
pub struct BracketCase {
    pub input: String,
    pub balanced: bool,
}

/// Ascending items, a target, and the leftmost index holding it.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchCase {
    pub items: Vec<i64>,
    pub target: i64,
    pub index: Option<usize>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SortCase {
    pub items: Vec<i64>,
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

pub mod brackets {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.brackets.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.brackets, "bracket", name)?)
    }

    pub fn cases(name: &str) -> Result<Vec<BracketCase>> {
        load_json(lookup(&MANIFEST.brackets, "bracket", name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.brackets, "bracket", name)?))
    }
}

pub mod searches {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.searches.keys().cloned().collect()
    }

    pub fn cases(name: &str) -> Result<Vec<SearchCase>> {
        load_json(lookup(&MANIFEST.searches, "search", name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.searches, "search", name)?))
    }
}

pub mod sorts {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.sorts.keys().cloned().collect()
    }

    pub fn cases(name: &str) -> Result<Vec<SortCase>> {
        load_json(lookup(&MANIFEST.sorts, "sort", name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.sorts, "sort", name)?))
    }
}
