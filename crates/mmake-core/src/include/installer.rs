//! Installs remote includes into a local include directory.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;

use crate::resolver::{ResolveError, Resolver};

use super::parse::{Include, parse_includes};

/// Outcome for a single include reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    /// Fetched and written to the include directory
    Installed,
    /// Already present and not updating
    AlreadyPresent,
    /// Local file or no resolver claims it; left to make
    Skipped,
    /// Optional include (`-include`/`sinclude`) that could not be fetched
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installed {
    pub reference: String,
    pub path: Option<PathBuf>,
    pub status: InstallStatus,
}

/// Resolves the remote includes of a Makefile and writes each one to
/// `<dir>/<reference>`, so `make -I <dir>` finds it under the unchanged
/// include line.
#[derive(Debug, Clone)]
pub struct IncludeInstaller<R> {
    resolver: R,
    dir: PathBuf,
    update: bool,
}

impl<R: Resolver> IncludeInstaller<R> {
    pub fn new(resolver: R, dir: impl Into<PathBuf>) -> Self {
        Self {
            resolver,
            dir: dir.into(),
            update: false,
        }
    }

    /// Re-fetch includes that are already installed.
    pub fn update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Install location for `reference`. Fails for references that would
    /// land outside the include directory.
    pub fn target_path(&self, reference: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(reference);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes || reference.is_empty() {
            anyhow::bail!("Include path escapes include directory: {}", reference);
        }
        Ok(self.dir.join(relative))
    }

    /// Install every remote include referenced by Makefile `text`.
    pub fn install(&self, text: &str) -> anyhow::Result<Vec<Installed>> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for include in parse_includes(text) {
            if !seen.insert(include.reference.clone()) {
                continue;
            }
            let installed = self.install_one(&include).with_context(|| {
                format!(
                    "Failed to install include {} (line {})",
                    include.reference, include.line
                )
            })?;
            results.push(installed);
        }

        Ok(results)
    }

    /// Read the Makefile at `path` and install its remote includes.
    pub fn install_file(&self, path: &Path) -> anyhow::Result<Vec<Installed>> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read makefile: {}", path.display()))?;
        self.install(&text)
    }

    fn install_one(&self, include: &Include) -> anyhow::Result<Installed> {
        let skipped = || Installed {
            reference: include.reference.clone(),
            path: None,
            status: InstallStatus::Skipped,
        };

        if !include.is_remote() {
            return Ok(skipped());
        }

        let target = self.target_path(&include.reference)?;
        if !self.update && target.exists() {
            tracing::debug!(reference = %include.reference, "include already installed");
            return Ok(Installed {
                reference: include.reference.clone(),
                path: Some(target),
                status: InstallStatus::AlreadyPresent,
            });
        }

        let content = match self.resolver.get(&include.reference) {
            Ok(content) => content,
            Err(ResolveError::NotSupported) => {
                tracing::debug!(reference = %include.reference, "no resolver for include");
                return Ok(skipped());
            }
            Err(e) if include.optional => {
                tracing::warn!(
                    reference = %include.reference,
                    line = include.line,
                    error = %e,
                    "optional include unavailable"
                );
                return Ok(Installed {
                    reference: include.reference.clone(),
                    path: None,
                    status: InstallStatus::Missing,
                });
            }
            Err(e) => return Err(e.into()),
        };

        write_atomic(&target, content)?;
        tracing::info!(
            reference = %include.reference,
            path = %target.display(),
            "installed include"
        );

        Ok(Installed {
            reference: include.reference.clone(),
            path: Some(target),
            status: InstallStatus::Installed,
        })
    }
}

fn write_atomic(target: &Path, mut content: impl io::Read) -> anyhow::Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create include directory: {}", dir.display()))?;

    // Each writer gets its own temp file; the include appears only once complete.
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;
    io::copy(&mut content, tmp.as_file_mut())
        .with_context(|| format!("Failed to write include: {}", target.display()))?;
    tmp.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write include: {}", target.display()))?;
    Ok(())
}
