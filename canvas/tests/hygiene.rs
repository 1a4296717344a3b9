//! Hygiene: source-level budgets for patterns the editor core must not use.
//!
//! Every library file under `src/` (test files excluded) is scanned line by
//! line. Budgets are zero. The editor reports refused edits through
//! `DeckError` and never aborts the host page, so a panic path or a silently
//! dropped `Result` is a bug.

use std::fs;
use std::path::Path;

/// (pattern, budget, what it costs us)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics in the host page"),
    (".expect(", 0, "panics in the host page"),
    ("panic!(", 0, "panics in the host page"),
    ("unreachable!(", 0, "panics in the host page"),
    ("todo!(", 0, "ships an unfinished path"),
    ("unimplemented!(", 0, "ships an unfinished path"),
    ("let _ =", 0, "drops a result unread"),
    (".ok()", 0, "drops an error unread"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
];

struct SourceFile {
    path: String,
    content: String,
}

fn library_sources() -> Vec<SourceFile> {
    let mut files = Vec::new();
    walk(Path::new("src"), &mut files);
    files
}

fn walk(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path.extension().is_none_or(|e| e != "rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[test]
fn sources_are_found() {
    let files = library_sources();
    assert!(files.iter().any(|f| f.path.ends_with("engine.rs")), "run from the crate root");
}

#[test]
fn antipattern_budgets() {
    let files = library_sources();
    let mut report = Vec::new();
    for (pattern, budget, why) in BUDGETS {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > *budget {
            let detail: Vec<String> = found.iter().map(|(p, n)| format!("    {p}: {n}")).collect();
            report.push(format!("`{pattern}` ({why}): found {count}, max {budget}\n{}", detail.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}
