// Project configuration
//
// A TOML file describing the frame grid, the shared animation list, the main
// sheet and any override sheets.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Frame grid layout shared by every sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Frames per animation (grid columns)
    pub width: usize,
    /// Animations per variant (grid rows)
    pub height: usize,
    /// Playback speed of generated clips, frames per second
    pub frame_rate: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 49,
            frame_rate: 12.0,
        }
    }
}

/// Pixel size of one cell when slicing image sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlicingConfig {
    pub cell_width: u32,
    pub cell_height: u32,
}

/// A named animation and the grid row holding its frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationDefinition {
    /// Animation name without prefix, e.g. `walk_down`
    pub name: String,
    pub row: usize,
}

impl AnimationDefinition {
    pub fn new(name: &str, row: usize) -> Self {
        Self {
            name: name.to_string(),
            row,
        }
    }
}

/// Where a sheet comes from and where its assets go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSettings {
    /// Image file to slice, or directory of frame images
    pub sheet: PathBuf,
    pub export_folder: PathBuf,
    /// Prepended to every clip and controller name, e.g. `body` or `beard`
    #[serde(default)]
    pub prefix: String,
}

/// Complete project description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub slicing: Option<SlicingConfig>,

    pub animations: Vec<AnimationDefinition>,

    pub main: ExportSettings,

    #[serde(default)]
    pub overrides: Vec<ExportSettings>,
}

impl ProjectConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load, resolve and validate a configuration file
    ///
    /// Relative sheet and export paths are taken relative to the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;

        Ok(config)
    }

    /// Make relative paths absolute against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for settings in std::iter::once(&mut self.main).chain(self.overrides.iter_mut()) {
            if settings.sheet.is_relative() {
                settings.sheet = base.join(&settings.sheet);
            }
            if settings.export_folder.is_relative() {
                settings.export_folder = base.join(&settings.export_folder);
            }
        }
    }

    /// Cell size for image sheets, if configured
    pub fn cell_size(&self) -> Option<(u32, u32)> {
        self.slicing.map(|s| (s.cell_width, s.cell_height))
    }

    /// Main settings followed by every override
    pub fn sheets(&self) -> impl Iterator<Item = &ExportSettings> {
        std::iter::once(&self.main).chain(self.overrides.iter())
    }

    /// Collect every configuration problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();

        if self.grid.width == 0 {
            issues.push("grid width must be greater than zero".to_string());
        }
        if self.grid.height == 0 {
            issues.push("grid height must be greater than zero".to_string());
        }
        if self.grid.width > 0
            && self.grid.height > 0
            && self.grid.width.checked_mul(self.grid.height).is_none()
        {
            issues.push(format!(
                "grid of {} x {} cells is too large",
                self.grid.width, self.grid.height
            ));
        }
        if !self.grid.frame_rate.is_finite() || self.grid.frame_rate <= 0.0 {
            issues.push(format!(
                "frame rate must be greater than zero, got {}",
                self.grid.frame_rate
            ));
        }

        if let Some(slicing) = self.slicing {
            if slicing.cell_width == 0 || slicing.cell_height == 0 {
                issues.push("slicing cell size must be greater than zero".to_string());
            }
        }

        if self.animations.is_empty() {
            issues.push("at least one animation is required".to_string());
        }

        let mut names = HashSet::new();
        for animation in &self.animations {
            if animation.name.trim().is_empty() {
                issues.push(format!("animation at row {} has an empty name", animation.row));
            } else if !names.insert(animation.name.as_str()) {
                issues.push(format!("animation '{}' is defined twice", animation.name));
            }

            if self.grid.height > 0 && animation.row >= self.grid.height {
                issues.push(format!(
                    "animation '{}' uses row {} but the grid only has {} rows",
                    animation.name, animation.row, self.grid.height
                ));
            }
        }

        let mut folders = HashSet::new();
        for settings in self.sheets() {
            if !folders.insert(settings.export_folder.as_path()) {
                issues.push(format!(
                    "export folder {} is used by more than one sheet",
                    settings.export_folder.display()
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"
[grid]
width = 4
height = 2
frame_rate = 10.0

[slicing]
cell_width = 32
cell_height = 32

[[animations]]
name = "walk_up"
row = 0

[[animations]]
name = "walk_down"
row = 1

[main]
sheet = "body.png"
export_folder = "out/body"
prefix = "body"

[[overrides]]
sheet = "shirt.png"
export_folder = "out/shirt"
prefix = "shirt"
"#;

    fn issues(config: &ProjectConfig) -> Vec<String> {
        match config.validate() {
            Err(ConfigError::Invalid(issues)) => issues,
            other => panic!("expected validation issues, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_project() {
        let config = ProjectConfig::from_toml_str(PROJECT).unwrap();

        assert_eq!(config.grid.width, 4);
        assert_eq!(config.grid.frame_rate, 10.0);
        assert_eq!(config.cell_size(), Some((32, 32)));
        assert_eq!(config.animations[1], AnimationDefinition::new("walk_down", 1));
        assert_eq!(config.overrides.len(), 1);
        assert_eq!(config.sheets().count(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = ProjectConfig::from_toml_str(
            r#"
[[animations]]
name = "idle"
row = 0

[main]
sheet = "frames"
export_folder = "out"
"#,
        )
        .unwrap();

        assert_eq!(config.grid, GridConfig::default());
        assert_eq!(config.grid.height, 49);
        assert_eq!(config.main.prefix, "");
        assert!(config.slicing.is_none());
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ProjectConfig::from_toml_str(&format!("{}\nspacing = 60\n", PROJECT));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_row_out_of_range() {
        let mut config = ProjectConfig::from_toml_str(PROJECT).unwrap();
        config.animations.push(AnimationDefinition::new("jump", 2));

        let issues = issues(&config);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("row 2"));
    }

    #[test]
    fn test_validate_collects_everything() {
        let mut config = ProjectConfig::from_toml_str(PROJECT).unwrap();
        config.grid.width = 0;
        config.grid.frame_rate = -1.0;
        config.animations.push(AnimationDefinition::new("walk_up", 0));
        config.overrides[0].export_folder = PathBuf::from("out/body");

        let issues = issues(&config);
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn test_validate_grid_area_overflow() {
        let mut config = ProjectConfig::from_toml_str(PROJECT).unwrap();
        config.grid.width = usize::MAX;
        config.grid.height = 2;

        let issues = issues(&config);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("too large"));
    }

    #[test]
    fn test_validate_no_animations() {
        let mut config = ProjectConfig::from_toml_str(PROJECT).unwrap();
        config.animations.clear();

        assert_eq!(issues(&config), vec!["at least one animation is required"]);
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = ProjectConfig::from_toml_str(PROJECT).unwrap();
        config.overrides[0].sheet = PathBuf::from("/abs/shirt.png");
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.main.sheet, PathBuf::from("/project/body.png"));
        assert_eq!(config.main.export_folder, PathBuf::from("/project/out/body"));
        assert_eq!(config.overrides[0].sheet, PathBuf::from("/abs/shirt.png"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.toml");
        std::fs::write(&path, PROJECT).unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.main.sheet, dir.path().join("body.png"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ProjectConfig::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::Invalid(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Invalid config: a; b");
    }
}
