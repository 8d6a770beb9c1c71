use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub target_directory: PathBuf,
    pub output_directory: PathBuf,
    pub root_label: String,
    pub rules: ClassificationRules,
}

/// The fixed rule set driving the walk and the relevance classification.
/// All matching is case-insensitive; extensions are suffix matches including
/// the dot, exclude_files are fnmatch-style globs applied to the bare
/// filename, include_subdirs and relevant_keywords are substring tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRules {
    pub file_extensions: Vec<String>,
    pub exclude_folders: Vec<String>,
    pub exclude_files: Vec<String>,
    pub include_subdirs: Vec<String>,
    pub relevant_keywords: Vec<String>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            file_extensions: vec![
                ".js".to_string(),
                ".jsx".to_string(),
                ".ts".to_string(),
                ".tsx".to_string(),
                ".prisma".to_string(),
                ".md".to_string(),
                ".scss".to_string(),
                ".css".to_string(),
                ".mdx".to_string(),
            ],
            exclude_folders: vec![
                ".next".to_string(),
                "node_modules".to_string(),
                ".vscode".to_string(),
                ".git".to_string(),
                ".contentlayer".to_string(),
                ".husky".to_string(),
                "utils".to_string(),
            ],
            exclude_files: vec![
                "package-lock.json".to_string(),
                "*.log".to_string(),
                "*.lock".to_string(),
                "*.env".to_string(),
                "*.test.js".to_string(),
                "*.spec.js".to_string(),
                "*.map".to_string(),
                "pnpm-lock.yaml".to_string(),
                "pnpm-workspace.yaml".to_string(),
            ],
            include_subdirs: vec![
                "app".to_string(),
                "src".to_string(),
                "pages".to_string(),
                "components".to_string(),
                "lib".to_string(),
                "models".to_string(),
                "api".to_string(),
            ],
            relevant_keywords: vec![
                "trello".to_string(),
                "board".to_string(),
                "card".to_string(),
                "list".to_string(),
                "cloudinary".to_string(),
                "image".to_string(),
                "upload".to_string(),
                "prisma".to_string(),
                "schema".to_string(),
                "model".to_string(),
            ],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_directory: PathBuf::from("."),
            output_directory: PathBuf::from("./pack-output"),
            root_label: "project".to_string(),
            rules: ClassificationRules::default(),
        }
    }
}

impl Config {
    /// Get the default config file path (~/.packsource.toml)
    pub fn default_config_path() -> crate::Result<PathBuf> {
        let home_dir = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(PathBuf::from(home_dir).join(".packsource.toml"))
    }

    /// Load config from file, falling back to defaults if file doesn't exist
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            println!("📝 Loading configuration from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific file path
    pub fn from_file(path: &PathBuf) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a file
    pub fn to_file(&self, path: &PathBuf) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create a config file with all available options documented
    pub fn create_documented_config() -> String {
        r#"# Packsource Configuration File
# This file configures how packsource scans and packages your codebase

# Target directory to scan (defaults to current directory)
target_directory = "."

# Directory where report artifacts are written
output_directory = "./pack-output"

# Label used for the per-root report filename and summary sections
root_label = "project"

[rules]
# File name suffixes admitted into classification (everything else is
# recorded as excluded)
file_extensions = [
    ".js", ".jsx", ".ts", ".tsx", ".prisma", ".md", ".scss", ".css", ".mdx"
]

# Folder names pruned from the walk entirely; their contents never appear
# in any list
exclude_folders = [
    ".next", "node_modules", ".vscode", ".git", ".contentlayer", ".husky",
    "utils"
]

# Filename globs rejected even when the extension is admitted
exclude_files = [
    "package-lock.json", "*.log", "*.lock", "*.env", "*.test.js",
    "*.spec.js", "*.map", "pnpm-lock.yaml", "pnpm-workspace.yaml"
]

# A directory's files are only considered when its relative path contains
# one of these substrings
include_subdirs = ["app", "src", "pages", "components", "lib", "models", "api"]

# Substrings that mark a file's relative path as feature-relevant
relevant_keywords = [
    "trello", "board", "card", "list", "cloudinary", "image", "upload",
    "prisma", "schema", "model"
]
"#
        .to_string()
    }
}
