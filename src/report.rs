use crate::extractor::DependencyExtractor;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders the per-root report: included file contents followed by the
/// excluded file listing, accumulating the root's dependency set as a side
/// effect of reading each included file.
pub struct ReportWriter {
    extractor: DependencyExtractor,
}

impl ReportWriter {
    pub fn new() -> crate::Result<Self> {
        Ok(Self {
            extractor: DependencyExtractor::new()?,
        })
    }

    /// Write `<label>_source_files.txt` for one root and return the union of
    /// dependencies extracted from every readable included file.
    ///
    /// An included file that cannot be read stays listed; its content block
    /// is replaced with an inline error marker and the report goes on. A
    /// failure to write the report itself propagates.
    pub fn write_report(
        &self,
        root: &Path,
        included: &[&str],
        excluded: &[&str],
        output_file: &PathBuf,
    ) -> crate::Result<HashSet<String>> {
        let mut dependencies = HashSet::new();
        let mut report = String::from("// Included files:\n");

        for file in included {
            writeln!(report, "// {}", file)?;

            let file_path = root.join(file);
            match fs::read_to_string(&file_path) {
                Ok(content) => {
                    report.push_str(&content);
                    dependencies.extend(self.extractor.extract(&content));
                }
                Err(e) => {
                    writeln!(report, "// Error reading file: {}", e)?;
                }
            }
            report.push_str("\n\n");
        }

        report.push_str("\n// Excluded files:\n");
        for file in excluded {
            writeln!(report, "// {}", file)?;
        }

        fs::write(output_file, report)?;

        Ok(dependencies)
    }
}
