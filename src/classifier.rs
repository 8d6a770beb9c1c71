use crate::config::ClassificationRules;
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Included,
    Excluded,
}

/// One walked file: its path relative to the scanned root plus the
/// classification outcome. Never mutated after the walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub status: FileStatus,
}

/// Everything discovered under admitted directories, sorted by path.
/// Included and excluded partition the record set: every record carries
/// exactly one status.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub records: Vec<FileRecord>,
}

impl ScanResult {
    pub fn all_files(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.path.as_str()).collect()
    }

    pub fn included(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.status == FileStatus::Included)
            .map(|r| r.path.as_str())
            .collect()
    }

    pub fn excluded(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.status == FileStatus::Excluded)
            .map(|r| r.path.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct PathClassifier {
    rules: ClassificationRules,
    exclude_globs: Vec<Pattern>,
}

impl PathClassifier {
    pub fn new(rules: ClassificationRules) -> crate::Result<Self> {
        let exclude_globs = rules
            .exclude_files
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules, exclude_globs })
    }

    /// Walk a root directory and classify every file that survives folder
    /// pruning and the include-subdir gate. Records are returned sorted by
    /// path so artifacts are reproducible regardless of traversal order.
    pub fn scan(&self, root: &Path) -> crate::Result<ScanResult> {
        let mut records = Vec::new();

        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            // Pruned folders are cut before entry: their contents never
            // appear in any list. The root itself is never pruned.
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && self.is_excluded_folder(&entry.file_name().to_string_lossy()))
        });

        for entry in walker {
            // Unreadable directories do not abort the walk; read errors
            // surface later at content-read time.
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };

            let parent = relative
                .parent()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default();

            if !self.passes_gate(&parent) {
                continue;
            }

            let relative_path = relative.to_string_lossy().to_string();
            let file_name = entry.file_name().to_string_lossy();

            let status = if self.is_admitted(&file_name) && self.is_relevant(&relative_path) {
                FileStatus::Included
            } else {
                FileStatus::Excluded
            };

            records.push(FileRecord { path: relative_path, status });
        }

        records.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(ScanResult { records })
    }

    fn is_excluded_folder(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.rules
            .exclude_folders
            .iter()
            .any(|folder| folder.to_lowercase() == name)
    }

    /// A directory's files are only considered when its relative path
    /// contains one of the include-subdir substrings.
    fn passes_gate(&self, relative_dir: &str) -> bool {
        let relative_dir = relative_dir.to_lowercase();
        self.rules
            .include_subdirs
            .iter()
            .any(|subdir| relative_dir.contains(&subdir.to_lowercase()))
    }

    /// Admitted extension and no exclusion glob hit, tested on the bare
    /// filename. First failing test wins.
    fn is_admitted(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();

        if !self
            .rules
            .file_extensions
            .iter()
            .any(|ext| lowered.ends_with(&ext.to_lowercase()))
        {
            return false;
        }

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::default()
        };

        !self
            .exclude_globs
            .iter()
            .any(|pattern| pattern.matches_with(file_name, options))
    }

    fn is_relevant(&self, relative_path: &str) -> bool {
        let relative_path = relative_path.to_lowercase();
        self.rules
            .relevant_keywords
            .iter()
            .any(|keyword| relative_path.contains(&keyword.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn classifier() -> PathClassifier {
        PathClassifier::new(ClassificationRules::default()).unwrap()
    }

    #[test]
    fn included_and_excluded_partition_all_files() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("app/TrelloBoard.tsx"), "x");
        write_file(&temp.path().join("app/About.tsx"), "x");
        write_file(&temp.path().join("src/models/card.ts"), "x");
        write_file(&temp.path().join("src/styles/site.scss"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        let mut union: Vec<&str> = result.included();
        union.extend(result.excluded());
        union.sort();
        assert_eq!(union, result.all_files());

        for path in result.included() {
            assert!(!result.excluded().contains(&path));
        }
    }

    #[test]
    fn pruned_folders_never_appear_in_any_list() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("node_modules/app/board.js"), "x");
        write_file(&temp.path().join("app/utils/card.ts"), "x");
        write_file(&temp.path().join("app/board.ts"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        assert_eq!(result.all_files(), vec!["app/board.ts"]);
        for path in result.all_files() {
            assert!(!path.contains("node_modules"));
            assert!(!path.contains("utils"));
        }
    }

    #[test]
    fn gate_skips_directories_without_include_subdir() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("docs/board.md"), "x");
        write_file(&temp.path().join("board.ts"), "x");
        write_file(&temp.path().join("app/board.ts"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        // Neither the root itself nor docs/ contains a gate substring, so
        // their files never appear, not even as excluded.
        assert_eq!(result.all_files(), vec!["app/board.ts"]);
    }

    #[test]
    fn relevance_keyword_decides_included_vs_excluded() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("app/components/TrelloBoard.tsx"), "x");
        write_file(&temp.path().join("app/components/Readme.md"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        assert_eq!(result.included(), vec!["app/components/TrelloBoard.tsx"]);
        assert_eq!(result.excluded(), vec!["app/components/Readme.md"]);
    }

    #[test]
    fn exclusion_globs_demote_admitted_extensions() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("app/board.test.js"), "x");
        write_file(&temp.path().join("app/board.js"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        assert_eq!(result.included(), vec!["app/board.js"]);
        assert_eq!(result.excluded(), vec!["app/board.test.js"]);
    }

    #[test]
    fn unknown_extension_is_listed_but_excluded() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/schema.sql"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        assert_eq!(result.included(), Vec::<&str>::new());
        assert_eq!(result.excluded(), vec!["src/schema.sql"]);
    }

    #[test]
    fn classification_is_case_insensitive() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("APP/BOARD.TSX"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        assert_eq!(result.included(), vec!["APP/BOARD.TSX"]);
    }

    #[test]
    fn directory_matching_multiple_gate_substrings_processed_once() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/app/board.ts"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        assert_eq!(result.all_files(), vec!["src/app/board.ts"]);
    }

    #[test]
    fn records_are_sorted_by_path() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/zed/board.ts"), "x");
        write_file(&temp.path().join("app/board.ts"), "x");
        write_file(&temp.path().join("app/alpha/card.ts"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        assert_eq!(
            result.all_files(),
            vec!["app/alpha/card.ts", "app/board.ts", "src/zed/board.ts"]
        );
    }

    #[test]
    fn round_trip_scenario() {
        let temp = tempdir().unwrap();
        write_file(
            &temp.path().join("app/components/TrelloBoard.tsx"),
            "import React from \"react\";\n",
        );
        write_file(&temp.path().join("app/utils/helper.ts"), "x");
        write_file(&temp.path().join("app/components/Readme.md"), "x");

        let result = classifier().scan(temp.path()).unwrap();

        assert_eq!(result.included(), vec!["app/components/TrelloBoard.tsx"]);
        assert_eq!(result.excluded(), vec!["app/components/Readme.md"]);
        assert!(!result
            .all_files()
            .iter()
            .any(|path| path.contains("helper.ts")));
    }
}
