// Application settings
// Loaded from ~/.config/prodnorm/settings.json

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_AUTO_ACCEPT: f64 = 0.85;
const DEFAULT_CONFIRM: f64 = 0.60;
const DEFAULT_CANDIDATE_LIMIT: usize = 5;
const DEFAULT_PRODUCT_LIST: &str = "products.txt";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Matching policy
    #[serde(rename = "match.autoAcceptThreshold")]
    pub auto_accept_threshold: f64,

    #[serde(rename = "match.confirmThreshold")]
    pub confirm_threshold: f64,

    #[serde(rename = "match.candidateLimit")]
    pub candidate_limit: usize,

    // Files
    #[serde(rename = "productList.defaultFile")]
    pub product_list_file: String,

    /// None = the working directory
    #[serde(rename = "output.defaultDirectory")]
    pub output_directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_accept_threshold: DEFAULT_AUTO_ACCEPT,
            confirm_threshold: DEFAULT_CONFIRM,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            product_list_file: DEFAULT_PRODUCT_LIST.to_string(),
            output_directory: None,
        }
    }
}

const DEFAULT_CONFIG: &str = r#"{
    // Matching policy
    // Best score >= autoAcceptThreshold is applied without asking.
    // Best score >= confirmThreshold is offered for a Y/N confirmation.
    // Anything lower goes to the numbered candidate list.
    "match.autoAcceptThreshold": 0.85,
    "match.confirmThreshold": 0.6,
    "match.candidateLimit": 5,

    // Product list used when the name prompt is left blank
    "productList.defaultFile": "products.txt",

    // Output directory offered as '0' (null = working directory)
    "output.defaultDirectory": null
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prodnorm");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            Self::create_default_file(&path);
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load settings from an explicit path. Unreadable or malformed files
    /// fall back to defaults; out-of-range values are reset.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings.validated(),
                Err(e) => {
                    log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Error reading {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring `//` comment lines
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Reset values the matcher cannot work with
    pub fn validated(mut self) -> Self {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);

        if !in_unit(self.auto_accept_threshold) || !in_unit(self.confirm_threshold) {
            log::warn!(
                "thresholds must be within 0..1 (got {}, {}); using defaults",
                self.auto_accept_threshold,
                self.confirm_threshold
            );
            self.auto_accept_threshold = DEFAULT_AUTO_ACCEPT;
            self.confirm_threshold = DEFAULT_CONFIRM;
        } else if self.confirm_threshold > self.auto_accept_threshold {
            log::warn!(
                "confirm threshold {} is above auto-accept threshold {}; using defaults",
                self.confirm_threshold,
                self.auto_accept_threshold
            );
            self.auto_accept_threshold = DEFAULT_AUTO_ACCEPT;
            self.confirm_threshold = DEFAULT_CONFIRM;
        }

        if self.candidate_limit == 0 {
            log::warn!("candidate limit must be at least 1; using {}", DEFAULT_CANDIDATE_LIMIT);
            self.candidate_limit = DEFAULT_CANDIDATE_LIMIT;
        }

        if self.product_list_file.trim().is_empty() {
            self.product_list_file = DEFAULT_PRODUCT_LIST.to_string();
        }

        self
    }

    /// Create default settings file with comments
    fn create_default_file(path: &Path) {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }
}
