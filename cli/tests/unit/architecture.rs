//! Structural tests for architectural boundary enforcement.
//!
//! These tests scan source files to verify that the layer boundaries
//! (domain → application → infra/commands/output) are maintained.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

fn src_dir(sub: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(sub)
}

fn relative(file: &Path) -> String {
    file.strip_prefix(env!("CARGO_MANIFEST_DIR"))
        .unwrap_or(file)
        .display()
        .to_string()
        .replace('\\', "/")
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a test-only block.
    fn process_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(") && trimmed.contains("test") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

/// Non-test, non-comment lines of `file` with their 1-based line numbers.
fn production_lines(file: &Path) -> Vec<(usize, String)> {
    let Ok(content) = std::fs::read_to_string(file) else {
        return Vec::new();
    };
    let mut tracker = CfgTestTracker::new();
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let in_test = tracker.process_line(line);
            let trimmed = line.trim();
            let comment = trimmed.starts_with("//") || trimmed.starts_with("/*");
            (!in_test && !comment).then(|| (i + 1, line.to_string()))
        })
        .collect()
}

/// Every production line under `dir` containing one of `forbidden`.
fn find_violations(dir: &Path, forbidden: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(dir) {
        let rel = relative(&file);
        for (lineno, line) in production_lines(&file) {
            for needle in forbidden {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{lineno}: `{needle}`: {}", line.trim()));
                }
            }
        }
    }
    violations
}

#[test]
fn domain_is_free_of_io_and_outer_layers() {
    let violations = find_violations(
        &src_dir("domain"),
        &[
            "tokio",
            "std::fs",
            "std::process",
            "std::net",
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
        ],
    );
    assert!(
        violations.is_empty(),
        "domain/ must stay pure:\n{}",
        violations.join("\n")
    );
}

#[test]
fn services_import_only_domain_and_ports() {
    let violations = find_violations(
        &src_dir("application"),
        &[
            "crate::infra",
            "crate::commands",
            "crate::output",
            "std::fs",
            "tokio::process",
        ],
    );
    assert!(
        violations.is_empty(),
        "application/ must route I/O through ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_imports_from_commands_or_output() {
    let violations = find_violations(&src_dir("infra"), &["crate::commands", "crate::output"]);
    assert!(
        violations.is_empty(),
        "infra/ must not import from commands/ or output/:\n{}",
        violations.join("\n")
    );
}

#[test]
fn infra_has_no_print_macros_outside_tests() {
    let violations = find_violations(&src_dir("infra"), &["println!", "eprintln!"]);
    assert!(
        violations.is_empty(),
        "infra/ must log through tracing, not print:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_tokio_command_runner_new_outside_infra() {
    let mut violations = Vec::new();
    for file in collect_rs_files(&src_dir("")) {
        let rel = relative(&file);
        if rel.contains("/infra/") {
            continue;
        }
        for (lineno, line) in production_lines(&file) {
            if line.contains("TokioCommandRunner::new") {
                violations.push(format!("{rel}:{lineno}: {}", line.trim()));
            }
        }
    }
    assert!(
        violations.is_empty(),
        "TokioCommandRunner must be constructed in infra/ or via Default:\n{}",
        violations.join("\n")
    );
}

#[test]
fn command_handlers_accept_app_context() {
    let mut missing = Vec::new();
    for file in collect_rs_files(&src_dir("commands")) {
        if file.file_name().and_then(|n| n.to_str()) == Some("mod.rs") {
            continue;
        }
        let content = std::fs::read_to_string(&file).unwrap_or_default();
        if !(content.contains("pub async fn run(") && content.contains("app: &AppContext")) {
            missing.push(relative(&file));
        }
    }
    assert!(
        missing.is_empty(),
        "command handlers must take `app: &AppContext`:\n{}",
        missing.join("\n")
    );
}
