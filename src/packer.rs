use crate::{
    classifier::PathClassifier,
    config::Config,
    report::ReportWriter,
    summary::SummaryAggregator,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// The read-only outcome of processing one named root: its path, the
/// classified file lists and the dependency names extracted from the
/// included files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryResult {
    pub root: PathBuf,
    pub included: Vec<String>,
    pub excluded: Vec<String>,
    pub dependencies: HashSet<String>,
}

impl DirectoryResult {
    pub fn total_files(&self) -> usize {
        self.included.len() + self.excluded.len()
    }

    /// Dependencies are stored unordered; sorting happens here, at the
    /// output boundary.
    pub fn sorted_dependencies(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.dependencies.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }
}

#[derive(Debug)]
pub struct PackOutcome {
    pub results: Vec<(String, DirectoryResult)>,
    pub artifacts: Vec<PathBuf>,
}

impl PackOutcome {
    pub fn total_included(&self) -> usize {
        self.results.iter().map(|(_, r)| r.included.len()).sum()
    }

    pub fn total_excluded(&self) -> usize {
        self.results.iter().map(|(_, r)| r.excluded.len()).sum()
    }
}

/// Pipeline orchestrator: classify each registered root, write its report,
/// then aggregate everything into the summary and combined artifacts. Roots
/// are processed sequentially in registration order.
pub struct Packer {
    config: Config,
    classifier: PathClassifier,
    writer: ReportWriter,
    roots: Vec<(String, PathBuf)>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PackOptions {
    pub plugin: bool,
    pub json: bool,
}

impl Packer {
    pub fn new(config: Config) -> crate::Result<Self> {
        let classifier = PathClassifier::new(config.rules.clone())?;
        let writer = ReportWriter::new()?;
        let roots = vec![(config.root_label.clone(), config.target_directory.clone())];

        Ok(Self {
            config,
            classifier,
            writer,
            roots,
        })
    }

    /// Register an additional named root. The model supports any number;
    /// the CLI registers one.
    pub fn add_root(&mut self, label: impl Into<String>, path: impl Into<PathBuf>) {
        self.roots.push((label.into(), path.into()));
    }

    pub fn run(&self, options: PackOptions) -> crate::Result<PackOutcome> {
        // Output directory creation happens once, idempotently, at run
        // start rather than as a load-time side effect.
        fs::create_dir_all(&self.config.output_directory)?;

        let mut results = Vec::new();
        let mut artifacts = Vec::new();

        for (label, path) in &self.roots {
            let result = self.process_root(label, path, &mut artifacts)?;
            results.push((label.clone(), result));
        }

        let aggregator = SummaryAggregator::new(&self.config.output_directory);
        artifacts.push(aggregator.write_summary(&results)?);
        artifacts.push(aggregator.write_combined(&results)?);

        if options.json {
            artifacts.push(aggregator.write_json(&results)?);
        }
        if options.plugin {
            artifacts.push(aggregator.package_plugin()?);
        }

        Ok(PackOutcome { results, artifacts })
    }

    /// Classify one root and write its `<label>_source_files.txt`. An empty
    /// root writes no report and contributes empty lists and an empty
    /// dependency set to the summary.
    fn process_root(
        &self,
        label: &str,
        path: &PathBuf,
        artifacts: &mut Vec<PathBuf>,
    ) -> crate::Result<DirectoryResult> {
        let scan = self.classifier.scan(path)?;

        if scan.is_empty() {
            println!("No files found in {}", label);
            return Ok(DirectoryResult {
                root: path.clone(),
                included: Vec::new(),
                excluded: Vec::new(),
                dependencies: HashSet::new(),
            });
        }

        let output_file = self
            .config
            .output_directory
            .join(format!("{}_source_files.txt", label));

        let included = scan.included();
        let excluded = scan.excluded();
        let dependencies = self
            .writer
            .write_report(path, &included, &excluded, &output_file)?;

        println!(
            "Files from {} have been processed and written to: {}",
            label,
            output_file.display()
        );
        println!("  Included files: {}", included.len());
        println!("  Excluded files: {}", excluded.len());

        artifacts.push(output_file);

        Ok(DirectoryResult {
            root: path.clone(),
            included: included.into_iter().map(String::from).collect(),
            excluded: excluded.into_iter().map(String::from).collect(),
            dependencies,
        })
    }
}
