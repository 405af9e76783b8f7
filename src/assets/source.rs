use std::{
    collections::HashMap,
    io::Read as _,
    path::{Component, Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{ZenithError, ZenithResult};

/// Where encoded frame bytes come from.
///
/// Implementations must be shareable across the loader's worker threads.
pub trait FrameSource: Send + Sync {
    /// Fetch the encoded bytes at `rel_path` (as produced by
    /// [`crate::FrameSequenceSpec::relative_path`]).
    fn fetch(&self, rel_path: &str) -> ZenithResult<Vec<u8>>;
}

/// Normalize a web-root style path (`/images/a.jpg`) into a relative path with `/` separators.
pub fn normalize_rel_path(raw: &str) -> ZenithResult<String> {
    let s = raw.replace('\\', "/");
    let s = s.trim_start_matches('/');
    let p = Path::new(s);

    let mut parts = Vec::<String>::new();
    for c in p.components() {
        match c {
            Component::Normal(os) => parts.push(os.to_string_lossy().to_string()),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(ZenithError::validation(format!(
                    "asset path must not contain '..': '{raw}'"
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ZenithError::validation(format!(
                    "asset path must be relative: '{raw}'"
                )));
            }
        }
    }
    if parts.is_empty() {
        return Err(ZenithError::validation("asset path is empty"));
    }
    Ok(parts.join("/"))
}

#[derive(Clone, Debug)]
/// Reads frames from a static-files root on disk.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FrameSource for DirSource {
    fn fetch(&self, rel_path: &str) -> ZenithResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        let path = self.root.join(&norm);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read frame '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// Fetches frames over HTTP from the site serving the static assets.
pub struct HttpSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: ureq::Agent::new(),
        }
    }

    pub fn url_for(&self, rel_path: &str) -> ZenithResult<String> {
        Ok(format!("{}/{}", self.base_url, normalize_rel_path(rel_path)?))
    }
}

impl FrameSource for HttpSource {
    fn fetch(&self, rel_path: &str) -> ZenithResult<Vec<u8>> {
        let url = self.url_for(rel_path)?;
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| ZenithError::asset(format!("GET {url}: {e}")))?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .with_context(|| format!("read body of {url}"))?;
        Ok(bytes)
    }
}

#[derive(Clone, Debug, Default)]
/// In-memory frames keyed by normalized relative path.
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rel_path: &str, bytes: Vec<u8>) -> ZenithResult<()> {
        self.files.insert(normalize_rel_path(rel_path)?, bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for MemorySource {
    fn fetch(&self, rel_path: &str) -> ZenithResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        self.files
            .get(&norm)
            .cloned()
            .ok_or_else(|| ZenithError::asset(format!("no such frame '{norm}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
