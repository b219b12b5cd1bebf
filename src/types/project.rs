//! Project - A top-level folder identified by its name prefix

use super::SyncError;
use std::path::PathBuf;

/// Number of leading characters forming a project id
pub const ID_LEN: usize = 4;

/// One project folder under a source or destination root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Raw folder name
    pub name: String,

    /// Full path of the folder
    pub path: PathBuf,
}

impl Project {
    pub fn new(name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    /// Derive this project's id from its folder name.
    ///
    /// Fails with [`SyncError::InvalidIdentifier`] when the trimmed name does
    /// not start with [`ID_LEN`] characters.
    pub fn id(&self) -> Result<String, SyncError> {
        project_id(&self.name)
    }
}

/// First [`ID_LEN`] characters of the trimmed name.
///
/// Whitespace falling inside the window is trimmed off, so `"ab c"` yields
/// `"ab"` and is rejected.
pub fn project_id(name: &str) -> Result<String, SyncError> {
    let window: String = name.trim().chars().take(ID_LEN).collect();
    let id = window.trim_end();

    if id.chars().count() != ID_LEN {
        return Err(SyncError::InvalidIdentifier {
            name: name.to_string(),
            id: id.to_string(),
        });
    }

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_first_four_chars() {
        assert_eq!(project_id("0007 Summer Trip").unwrap(), "0007");
        assert_eq!(project_id("0007").unwrap(), "0007");
    }

    #[test]
    fn test_id_ignores_surrounding_whitespace() {
        assert_eq!(project_id("   0012 - vol 2  ").unwrap(), "0012");
    }

    #[test]
    fn test_id_counts_characters_not_bytes() {
        assert_eq!(project_id("äöüß extra").unwrap(), "äöüß");
    }

    #[test]
    fn test_short_name_is_rejected() {
        let err = project_id("ab").unwrap_err();
        assert!(matches!(err, SyncError::InvalidIdentifier { ref id, .. } if id == "ab"));
    }

    #[test]
    fn test_whitespace_inside_window_is_rejected() {
        assert!(project_id("ab c").is_err());
        assert!(project_id("   ").is_err());
    }

    #[test]
    fn test_project_id_method() {
        let project = Project::new("A001 misc", PathBuf::from("/src/A001 misc"));
        assert_eq!(project.id().unwrap(), "A001");
    }
}
