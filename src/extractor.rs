use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Best-effort static scan for ES-style import statements. This is not a
/// parser: dynamic imports, multi-line re-exports and require() calls are
/// out of scope, matching the heuristic the reports were built around.
pub struct DependencyExtractor {
    pattern: Regex,
}

impl DependencyExtractor {
    pub fn new() -> crate::Result<Self> {
        let pattern = Regex::new(r#"import\s+.*?from\s+['"]([^'"]+)['"]"#)?;
        Ok(Self { pattern })
    }

    /// Extract the distinct top-level package names referenced by
    /// `import ... from "<specifier>"` statements. Relative specifiers
    /// (leading `.`) are discarded; otherwise the segment before the first
    /// `/` is taken, or the whole specifier when it has none.
    pub fn extract(&self, content: &str) -> HashSet<String> {
        let mut dependencies = HashSet::new();

        for captures in self.pattern.captures_iter(content) {
            if let Some(specifier) = captures.get(1) {
                let specifier = specifier.as_str();
                if specifier.starts_with('.') {
                    continue;
                }

                let top_level = specifier.split('/').next().unwrap_or(specifier);
                dependencies.insert(top_level.to_string());
            }
        }

        dependencies
    }

    /// Read a file and extract its dependencies. Undecodable or unreadable
    /// files error out here; callers record the failure in-place.
    pub fn extract_from_file(&self, path: &Path) -> crate::Result<HashSet<String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.extract(&content))
    }
}
