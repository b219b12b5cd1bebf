//! Source-to-destination project matching by id prefix

use crate::types::{FileOp, Project, SyncError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// First project whose trimmed name starts with `id`.
///
/// `None` means no destination project exists for this id yet; it is not an
/// error.
pub fn find_destination<'a>(id: &str, projects: &'a [Project]) -> Option<&'a Project> {
    projects.iter().find(|p| p.name.trim().starts_with(id))
}

/// Destination project picked for a source project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub id: String,
    pub project: Project,
    /// True when the folder was created for this source project
    pub created: bool,
}

/// Known destination projects of one run.
///
/// Grows when an unmatched source project gets a new folder; entries are
/// never removed. Mutated only between projects, never while file tasks run.
#[derive(Debug, Clone)]
pub struct DestinationSet {
    root: PathBuf,
    projects: Vec<Project>,
    dry_run: bool,
}

impl DestinationSet {
    pub fn new(root: impl Into<PathBuf>, projects: Vec<Project>) -> Self {
        Self {
            root: root.into(),
            projects,
            dry_run: false,
        }
    }

    /// Register new projects without creating folders on disk
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Find the destination for `source`, creating it on first sight.
    ///
    /// # Errors
    /// * `InvalidIdentifier` if the source name has no 4-character id
    /// * `FileOperation` if the new destination folder cannot be created
    pub fn resolve(&mut self, source: &Project) -> Result<Resolved, SyncError> {
        let id = source.id()?;

        let candidates: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| p.name.trim().starts_with(id.as_str()))
            .collect();
        if candidates.len() > 1 {
            let names: Vec<&str> = candidates.iter().map(|p| p.name.as_str()).collect();
            warn!(
                id = %id,
                "several destination projects share this id, using {:?}: {:?}",
                names[0],
                names
            );
        }

        if let Some(project) = find_destination(&id, &self.projects) {
            return Ok(Resolved {
                id,
                project: project.clone(),
                created: false,
            });
        }

        let folder = source
            .path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&source.name));
        let path = self.root.join(folder);

        if !self.dry_run {
            fs::create_dir_all(&path).map_err(|e| SyncError::file_op(FileOp::Copy, &path, e))?;
        }
        info!(project = %source.name, "create project in destination path");

        let project = Project::new(source.name.clone(), path);
        self.projects.push(project.clone());

        Ok(Resolved {
            id,
            project,
            created: true,
        })
    }
}
