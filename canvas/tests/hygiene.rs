//! Hygiene: enforces coding standards at test time
//!
//! These tests scan the canvas crate source tree for antipatterns that violate
//! project standards. Each has a budget (ideally zero). If you must add one,
//! you have to fix an existing one first; the budget never grows.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics: a panic in wasm kills the whole board.
    Budget { pattern: ".unwrap()", max: 0, why: "propagate or log instead" },
    Budget { pattern: ".expect(", max: 0, why: "propagate or log instead" },
    Budget { pattern: "panic!(", max: 0, why: "return an error" },
    Budget { pattern: "unreachable!(", max: 0, why: "make the match exhaustive" },
    Budget { pattern: "todo!(", max: 0, why: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "finish the stub" },
    // Silent loss: discards errors without inspecting.
    Budget { pattern: "let _ =", max: 0, why: "log the error" },
    Budget { pattern: ".ok()", max: 0, why: "log the error" },
    // Output goes through the `log` facade so the console logger can filter it.
    Budget { pattern: "println!(", max: 0, why: "use log::info!" },
    Budget { pattern: "eprintln!(", max: 0, why: "use log::warn!" },
    Budget { pattern: "web_sys::console", max: 0, why: "use the log macros" },
    // Style / structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete the code" },
    Budget { pattern: "unsafe ", max: 0, why: "no unsafe in this crate" },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect `.rs` files from `canvas/src/`.
fn all_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

/// Production files only: everything except the `*_test.rs` siblings.
fn source_files() -> Vec<SourceFile> {
    all_files().into_iter().filter(|f| !f.path.ends_with("_test.rs")).collect()
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path.to_string_lossy().to_string(), content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn source_tree_is_found() {
    assert!(!source_files().is_empty(), "no sources under src/; run tests from the crate root");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits = count_in_source(&files, budget.pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            failures.push(format!(
                "{} budget exceeded: found {count}, max {} ({}).\n{}",
                budget.pattern,
                budget.max,
                budget.why,
                format_hits(&hits)
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

/// Every `foo_test.rs` must be wired into `foo.rs`, or its tests never run.
#[test]
fn test_files_are_wired() {
    let files = all_files();
    let mut orphans = Vec::new();
    for test in files.iter().filter(|f| f.path.ends_with("_test.rs")) {
        let Some(name) = Path::new(&test.path).file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let owner = test.path.replace("_test.rs", ".rs");
        let wired = files
            .iter()
            .find(|f| f.path == owner)
            .is_some_and(|f| f.content.contains(&format!("#[path = \"{name}\"]")));
        if !wired {
            orphans.push(test.path.clone());
        }
    }
    assert!(orphans.is_empty(), "test files not declared by their module:\n  {}", orphans.join("\n  "));
}
