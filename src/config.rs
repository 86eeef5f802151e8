use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::scoring::{DEFAULT_MILESTONES, DEFAULT_POINTS_PER_CORRECT, ScoreRules};
use crate::generator::difficulty::{Difficulty, DifficultyLevel};

pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "ja"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: DifficultyLevel,
    #[serde(default = "default_custom_root_min")]
    pub custom_root_min: i32,
    #[serde(default = "default_custom_root_max")]
    pub custom_root_max: i32,
    #[serde(default = "default_custom_max_linear")]
    pub custom_max_linear: i32,
    #[serde(default = "default_custom_max_constant")]
    pub custom_max_constant: i32,
    #[serde(default = "default_custom_allow_zero_roots")]
    pub custom_allow_zero_roots: bool,
    #[serde(default = "default_points_per_correct")]
    pub points_per_correct: u32,
    #[serde(default = "default_combo_milestones")]
    pub combo_milestones: Vec<u32>,
    #[serde(default = "default_history_len")]
    pub history_len: usize,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_difficulty() -> DifficultyLevel {
    DifficultyLevel::Normal
}
fn default_custom_root_min() -> i32 {
    -10
}
fn default_custom_root_max() -> i32 {
    10
}
fn default_custom_max_linear() -> i32 {
    20
}
fn default_custom_max_constant() -> i32 {
    100
}
fn default_custom_allow_zero_roots() -> bool {
    true
}
fn default_points_per_correct() -> u32 {
    DEFAULT_POINTS_PER_CORRECT
}
fn default_combo_milestones() -> Vec<u32> {
    DEFAULT_MILESTONES.to_vec()
}
fn default_history_len() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            language: default_language(),
            difficulty: default_difficulty(),
            custom_root_min: default_custom_root_min(),
            custom_root_max: default_custom_root_max(),
            custom_max_linear: default_custom_max_linear(),
            custom_max_constant: default_custom_max_constant(),
            custom_allow_zero_roots: default_custom_allow_zero_roots(),
            points_per_correct: default_points_per_correct(),
            combo_milestones: default_combo_milestones(),
            history_len: default_history_len(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("factordrill")
            .join("config.toml")
    }

    /// Repairs values a hand-edited file may get wrong.
    pub fn normalize(&mut self) {
        let rules = ScoreRules::new(self.points_per_correct, &self.combo_milestones);
        self.combo_milestones = rules.milestones;
        self.history_len = self.history_len.clamp(1, 50);
        if !SUPPORTED_LANGUAGES.contains(&self.language.as_str()) {
            self.language = default_language();
        }
    }

    /// Generation bounds for the selected level.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty.preset().unwrap_or(Difficulty {
            root_min: self.custom_root_min,
            root_max: self.custom_root_max,
            max_linear: self.custom_max_linear,
            max_constant: self.custom_max_constant,
            allow_zero_roots: self.custom_allow_zero_roots,
        })
    }

    pub fn score_rules(&self) -> ScoreRules {
        ScoreRules::new(self.points_per_correct, &self.combo_milestones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.difficulty, DifficultyLevel::Normal);
        assert_eq!(config.combo_milestones, vec![5, 10, 20]);
        assert_eq!(config.points_per_correct, 10);
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
theme = "gruvbox"
difficulty = "hard"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "gruvbox");
        assert_eq!(config.difficulty, DifficultyLevel::Hard);
        assert_eq!(config.history_len, 10);
    }

    #[test]
    fn test_config_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.difficulty = DifficultyLevel::Custom;
        config.custom_root_min = -4;
        config.language = "ja".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "difficulty = \"impossible\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_normalize_repairs_values() {
        let mut config = Config::default();
        config.combo_milestones = vec![10, 0, 3, 10];
        config.history_len = 0;
        config.language = "klingon".to_string();
        config.normalize();
        assert_eq!(config.combo_milestones, vec![3, 10]);
        assert_eq!(config.history_len, 1);
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_custom_difficulty_uses_custom_bounds() {
        let mut config = Config::default();
        config.difficulty = DifficultyLevel::Custom;
        config.custom_root_max = 4;
        config.custom_allow_zero_roots = false;
        let difficulty = config.difficulty();
        assert_eq!(difficulty.root_min, -10);
        assert_eq!(difficulty.root_max, 4);
        assert!(!difficulty.allow_zero_roots);
    }

    #[test]
    fn test_preset_ignores_custom_bounds() {
        let mut config = Config::default();
        config.custom_root_max = 4;
        assert_eq!(config.difficulty(), DifficultyLevel::Normal.preset().unwrap());
    }
}
