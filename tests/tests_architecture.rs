//! Architecture Layer Dependency Tests
//!
//! These tests enforce the layered architecture dependency rules:
//!
//! ```text
//! project
//!    ↓
//! query
//!    ↓
//! index
//!    ↓
//! dom
//!    ↓
//! syntax
//!    ↓
//! base
//! ```
//!
//! A layer may use any layer below it, never one above. Test modules may
//! import anything.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

const LAYERS: &[&str] = &["base", "syntax", "dom", "index", "query", "project"];

fn is_test_file(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_str() == Some("tests"))
}

fn source_files(layer: &str) -> Vec<PathBuf> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join(layer);
    let mut files: Vec<PathBuf> = WalkDir::new(&root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .filter(|p| !is_test_file(p))
        .collect();
    files.sort();
    files
}

/// `file:line` of every reference to a layer above `layer`.
fn collect_layer_violations(layer: &str) -> Vec<String> {
    let position = LAYERS.iter().position(|l| *l == layer).unwrap_or(0);
    let forbidden = &LAYERS[position + 1..];

    let mut violations = Vec::new();
    for file in source_files(layer) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        for (line_no, line) in content.lines().enumerate() {
            let code = line.trim_start();
            if code.starts_with("//") {
                continue;
            }
            for upper in forbidden {
                if code.contains(&format!("crate::{upper}::"))
                    || code.contains(&format!("crate::{upper};"))
                    || code.contains(&format!("crate::{upper}::{{"))
                {
                    violations.push(format!("{}:{} uses {}", file.display(), line_no + 1, upper));
                }
            }
        }
    }
    violations
}

#[test]
fn test_every_layer_has_sources() {
    for layer in LAYERS {
        assert!(
            !source_files(layer).is_empty(),
            "layer `{layer}` has no source files"
        );
    }
}

#[test]
fn test_base_layer_has_no_dependencies() {
    let violations = collect_layer_violations("base");
    assert!(
        violations.is_empty(),
        "\n❌ Base layer should not depend on any other crate module.\nViolations:\n{}\n",
        violations.join("\n")
    );
}

#[test]
fn test_lower_layers_do_not_reach_up() {
    for layer in &LAYERS[1..] {
        let violations = collect_layer_violations(layer);
        assert!(
            violations.is_empty(),
            "\n❌ Layer `{layer}` depends on a layer above it.\nViolations:\n{}\n",
            violations.join("\n")
        );
    }
}
