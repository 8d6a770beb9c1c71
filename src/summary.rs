use crate::packer::DirectoryResult;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed scaffold written into the plugin package; a starting point for
/// wiring the packed sources into a Payload CMS plugin.
const PLUGIN_SCAFFOLD: &str = r#"
import { Plugin } from 'payload/config';

const TrelloCloudinaryPlugin: Plugin = {
  name: 'trello-cloudinary-plugin',
  // Add your plugin logic here
};

export default TrelloCloudinaryPlugin;
"#;

#[derive(Debug, Serialize)]
struct JsonSummary {
    directories: Vec<JsonDirectory>,
    all_dependencies: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonDirectory {
    name: String,
    total_files: usize,
    included_files: usize,
    excluded_files: usize,
    dependencies: Vec<String>,
}

/// Combines per-root results into the global artifacts: `summary.txt`,
/// `all_source_files_combined.txt`, the optional JSON summary and the
/// optional plugin package.
pub struct SummaryAggregator {
    output_dir: PathBuf,
}

impl SummaryAggregator {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Write `summary.txt`: per-root counts and sorted dependency names,
    /// then the sorted union of dependencies across all roots.
    pub fn write_summary(&self, results: &[(String, DirectoryResult)]) -> crate::Result<PathBuf> {
        let mut text = String::from("Application Structure Summary:\n\n");
        let mut all_dependencies: HashSet<&str> = HashSet::new();

        for (name, result) in results {
            writeln!(text, "{}:", name)?;
            writeln!(text, "  Total files: {}", result.total_files())?;
            writeln!(text, "  Included files: {}", result.included.len())?;
            writeln!(text, "  Excluded files: {}", result.excluded.len())?;
            writeln!(
                text,
                "  Dependencies: {}\n",
                result.sorted_dependencies().join(", ")
            )?;

            all_dependencies.extend(result.dependencies.iter().map(String::as_str));
        }

        let mut sorted: Vec<&str> = all_dependencies.into_iter().collect();
        sorted.sort_unstable();
        writeln!(text, "All dependencies:\n{}", sorted.join(", "))?;

        let path = self.output_dir.join("summary.txt");
        fs::write(&path, text)?;
        println!("Summary has been written to: {}", path.display());

        Ok(path)
    }

    /// Write `all_source_files_combined.txt`: every root's included file
    /// contents re-read from disk, with inline error markers for files that
    /// can no longer be read. Excluded files are not repeated here.
    pub fn write_combined(&self, results: &[(String, DirectoryResult)]) -> crate::Result<PathBuf> {
        let mut text = String::new();

        for (name, result) in results {
            writeln!(text, "// Files from {}:\n", name)?;
            for file in &result.included {
                writeln!(text, "// {}", file)?;
                match fs::read_to_string(result.root.join(file)) {
                    Ok(content) => text.push_str(&content),
                    Err(e) => writeln!(text, "// Error reading file: {}", e)?,
                }
                text.push_str("\n\n");
            }
        }

        let path = self.output_dir.join("all_source_files_combined.txt");
        fs::write(&path, text)?;
        println!("All source files have been combined into: {}", path.display());

        Ok(path)
    }

    /// Write `summary.json`, the machine-readable counterpart of
    /// `summary.txt`. Dependency lists are sorted so the artifact is
    /// deterministic across runs.
    pub fn write_json(&self, results: &[(String, DirectoryResult)]) -> crate::Result<PathBuf> {
        let mut all_dependencies: HashSet<&str> = HashSet::new();

        let directories = results
            .iter()
            .map(|(name, result)| {
                all_dependencies.extend(result.dependencies.iter().map(String::as_str));
                JsonDirectory {
                    name: name.clone(),
                    total_files: result.total_files(),
                    included_files: result.included.len(),
                    excluded_files: result.excluded.len(),
                    dependencies: result
                        .sorted_dependencies()
                        .into_iter()
                        .map(String::from)
                        .collect(),
                }
            })
            .collect();

        let mut sorted: Vec<String> = all_dependencies.into_iter().map(String::from).collect();
        sorted.sort_unstable();

        let summary = JsonSummary {
            directories,
            all_dependencies: sorted,
        };

        let path = self.output_dir.join("summary.json");
        fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
        println!("JSON summary has been written to: {}", path.display());

        Ok(path)
    }

    /// Copy the generated artifacts into a `payload-plugin/` package next
    /// to them and drop in the fixed `index.js` scaffold.
    pub fn package_plugin(&self) -> crate::Result<PathBuf> {
        let plugin_dir = self.output_dir.join("payload-plugin");
        fs::create_dir_all(&plugin_dir)?;

        for entry in fs::read_dir(&self.output_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let is_artifact = name.ends_with("_source_files.txt")
                || name == "summary.txt"
                || name == "all_source_files_combined.txt";
            if is_artifact {
                let content = fs::read_to_string(entry.path())?;
                fs::write(plugin_dir.join(&name), content)?;
            }
        }

        fs::write(plugin_dir.join("index.js"), PLUGIN_SCAFFOLD)?;
        println!("Payload CMS 3.0 Plugin package created in: {}", plugin_dir.display());

        Ok(plugin_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn result_for(root: &Path, included: &[&str], excluded: &[&str], deps: &[&str]) -> DirectoryResult {
        DirectoryResult {
            root: root.to_path_buf(),
            included: included.iter().map(|s| s.to_string()).collect(),
            excluded: excluded.iter().map(|s| s.to_string()).collect(),
            dependencies: deps.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn summary_lists_counts_and_sorted_dependencies() {
        let output = tempdir().unwrap();
        let root = tempdir().unwrap();

        let results = vec![(
            "project".to_string(),
            result_for(
                root.path(),
                &["app/Board.tsx"],
                &["app/Notes.md"],
                &["react", "@prisma", "axios"],
            ),
        )];

        let aggregator = SummaryAggregator::new(output.path());
        let path = aggregator.write_summary(&results).unwrap();

        let summary = fs::read_to_string(path).unwrap();
        assert!(summary.starts_with("Application Structure Summary:\n\n"));
        assert!(summary.contains(
            "project:\n  Total files: 2\n  Included files: 1\n  Excluded files: 1\n"
        ));
        assert!(summary.contains("  Dependencies: @prisma, axios, react\n"));
        assert!(summary.ends_with("All dependencies:\n@prisma, axios, react\n"));
    }

    #[test]
    fn combined_repeats_included_contents_only() {
        let output = tempdir().unwrap();
        let root = tempdir().unwrap();
        write_file(&root.path().join("app/Board.tsx"), "board contents\n");

        let results = vec![(
            "project".to_string(),
            result_for(root.path(), &["app/Board.tsx"], &["app/Notes.md"], &[]),
        )];

        let aggregator = SummaryAggregator::new(output.path());
        let path = aggregator.write_combined(&results).unwrap();

        let combined = fs::read_to_string(path).unwrap();
        assert!(combined.starts_with("// Files from project:\n\n// app/Board.tsx\nboard contents\n"));
        assert!(!combined.contains("Notes.md"));
    }

    #[test]
    fn combined_substitutes_error_marker_for_missing_file() {
        let output = tempdir().unwrap();
        let root = tempdir().unwrap();

        let results = vec![(
            "project".to_string(),
            result_for(root.path(), &["app/Gone.tsx"], &[], &[]),
        )];

        let aggregator = SummaryAggregator::new(output.path());
        let path = aggregator.write_combined(&results).unwrap();

        let combined = fs::read_to_string(path).unwrap();
        assert!(combined.contains("// app/Gone.tsx\n// Error reading file: "));
    }

    #[test]
    fn json_summary_is_sorted_and_parseable() {
        let output = tempdir().unwrap();
        let root = tempdir().unwrap();

        let results = vec![(
            "project".to_string(),
            result_for(root.path(), &["a"], &["b", "c"], &["react", "axios"]),
        )];

        let aggregator = SummaryAggregator::new(output.path());
        let path = aggregator.write_json(&results).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["directories"][0]["total_files"], 3);
        assert_eq!(value["directories"][0]["dependencies"][0], "axios");
        assert_eq!(value["all_dependencies"][1], "react");
    }

    #[test]
    fn plugin_package_copies_artifacts_and_writes_scaffold() {
        let output = tempdir().unwrap();
        write_file(&output.path().join("project_source_files.txt"), "report\n");
        write_file(&output.path().join("summary.txt"), "summary\n");
        write_file(&output.path().join("all_source_files_combined.txt"), "combined\n");
        write_file(&output.path().join("unrelated.txt"), "skip\n");

        let aggregator = SummaryAggregator::new(output.path());
        let plugin_dir = aggregator.package_plugin().unwrap();

        assert!(plugin_dir.join("project_source_files.txt").exists());
        assert!(plugin_dir.join("summary.txt").exists());
        assert!(plugin_dir.join("all_source_files_combined.txt").exists());
        assert!(!plugin_dir.join("unrelated.txt").exists());

        let scaffold = fs::read_to_string(plugin_dir.join("index.js")).unwrap();
        assert!(scaffold.contains("TrelloCloudinaryPlugin"));
    }
}
