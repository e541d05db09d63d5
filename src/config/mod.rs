//! Run configuration for archgen
//!
//! There is no config file; everything comes from CLI flags and resolves
//! against the directory archgen was invoked from.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Marker file that identifies a Flutter project root
pub const MARKER_FILE: &str = "pubspec.yaml";

/// Where the layout is placed inside the project
#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `lib/`
    #[default]
    Standard,
    /// `src/lib/`
    Src,
}

impl Layout {
    /// Output root relative to the project root
    pub fn relative_root(&self) -> PathBuf {
        match self {
            Layout::Standard => PathBuf::from("lib"),
            Layout::Src => Path::new("src").join("lib"),
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Standard => write!(f, "standard"),
            Layout::Src => write!(f, "src"),
        }
    }
}

/// Options for a single scaffolding run
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub layout: Layout,
    pub marker: String,
    pub dry_run: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            marker: MARKER_FILE.to_string(),
            dry_run: false,
        }
    }
}

/// Resolved paths for a run
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// Directory that must contain the marker file
    pub project_root: PathBuf,
    pub marker: PathBuf,
    /// Directory the manifest is applied under
    pub output_root: PathBuf,
}

impl ProjectPaths {
    pub fn new(project_root: impl Into<PathBuf>, config: &ScaffoldConfig) -> Self {
        let project_root = project_root.into();
        Self {
            marker: project_root.join(&config.marker),
            output_root: project_root.join(config.layout.relative_root()),
            project_root,
        }
    }

    /// Resolve against the current working directory
    pub fn from_current_dir(config: &ScaffoldConfig) -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?, config))
    }

    /// Absolute target for a manifest-relative path
    pub fn resolve(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.output_root.clone(), |acc, seg| acc.join(seg))
    }

    /// Output root as shown to the user, relative to the project root
    pub fn display_root(&self) -> String {
        let rel = self
            .output_root
            .strip_prefix(&self.project_root)
            .unwrap_or(self.output_root.as_path());
        format!("{}/", rel.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_uses_lib() {
        let paths = ProjectPaths::new("/proj", &ScaffoldConfig::default());
        assert_eq!(paths.output_root, PathBuf::from("/proj/lib"));
        assert_eq!(paths.marker, PathBuf::from("/proj/pubspec.yaml"));
        assert_eq!(paths.display_root(), "lib/");
    }

    #[test]
    fn test_src_layout_nests_lib() {
        let config = ScaffoldConfig {
            layout: Layout::Src,
            ..Default::default()
        };
        let paths = ProjectPaths::new("/proj", &config);
        assert_eq!(paths.output_root, PathBuf::from("/proj/src/lib"));
        assert_eq!(
            paths.resolve("core/utils/validators.dart"),
            PathBuf::from("/proj/src/lib/core/utils/validators.dart")
        );
    }

    #[test]
    fn test_layout_values_match_cli() {
        use clap::ValueEnum;

        assert_eq!(Layout::from_str("src", false).unwrap(), Layout::Src);
        assert_eq!(Layout::from_str("standard", false).unwrap(), Layout::Standard);
        assert!(Layout::from_str("lib", false).is_err());
        for layout in Layout::value_variants() {
            let name = layout.to_possible_value().unwrap();
            assert_eq!(name.get_name(), layout.to_string());
        }
    }
}
