// Chunk: docs/chunks/render_pipeline - File-backed render tests

//! End-to-end tests: files on disk through `render_file`.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use smart_read::{render, render_file, render_file_with_config, Config};
use smart_read_buffer::LineIndex;
use smart_read_syntax::{truncate_with_report, Grammar, LiteralSource, TreeSitterLiterals, TruncationLimit};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn long_literal_line(len: usize) -> String {
    format!("const s = \"{}\";", "x".repeat(len))
}

// ==================== Missing and unreadable input ====================

#[test]
fn test_missing_file_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.js");
    let out = render_file(&path, 1, 10, 200);
    assert_eq!(out, format!("❌ Error: File not found: {}", path.display()));
}

#[test]
fn test_directory_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let out = render_file(dir.path(), 1, 10, 200);
    assert!(out.starts_with("❌ Error reading file: "), "got {:?}", out);
}

#[test]
fn test_file_over_size_cap_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "big.js", "a".repeat(100));
    let config = Config {
        max_file_bytes: Some(10),
        ..Config::default()
    };
    let out = render_file_with_config(&path, 1, 1, &config);
    assert_eq!(out, "❌ Error reading file: file too large (100 bytes, limit 10)");
}

#[test]
fn test_invalid_utf8_is_decoded_lossily() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bytes.js", b"ok \xff\nnext\n");
    assert_eq!(render_file(&path, 1, 2, 200), "1 | ok \u{FFFD}\n2 | next");
}

// ==================== Truncation through files ====================

#[test]
fn test_js_file_truncates_and_keeps_line_numbers() {
    let dir = TempDir::new().unwrap();
    let contents = format!(
        "const a = 1;\nconst t = `{}\n{}`;\nconst b = 2;\n",
        "p".repeat(150),
        "q".repeat(150)
    );
    let path = write_file(&dir, "app.js", &contents);

    let out = render_file(&path, 1, 10, 200);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2 | const t = `ppppppppppppppppppp ...[TRUNCATED 303 CHARS]... "));
    assert_eq!(lines[2], "3 | qqqqqqqqqqqqqqqqqqq`;");
    assert_eq!(lines[3], "4 | const b = 2;");
}

#[test]
fn test_literal_at_limit_is_untouched() {
    let dir = TempDir::new().unwrap();
    let line = long_literal_line(198);
    let path = write_file(&dir, "edge.js", &line);
    assert_eq!(render_file(&path, 1, 1, 200), format!("1 | {}", line));
}

#[test]
fn test_negative_limit_disables_truncation() {
    let dir = TempDir::new().unwrap();
    let line = long_literal_line(500);
    let path = write_file(&dir, "off.js", &line);
    assert_eq!(render_file(&path, 1, 1, -1), format!("1 | {}", line));
}

#[test]
fn test_grammar_follows_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "script.py", format!("s = \"{}\"\nprint(s)\n", "y".repeat(300)));
    let out = render_file(&path, 1, 2, 200);
    assert!(out.contains("[TRUNCATED 302 CHARS]"), "got {:?}", out);
    assert!(out.ends_with("2 | print(s)"));
}

#[test]
fn test_unknown_extension_uses_default_grammar() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.txt", long_literal_line(300));
    assert!(render_file(&path, 1, 1, 200).contains("[TRUNCATED 302 CHARS]"));

    let config = Config {
        default_grammar: Grammar::Json,
        ..Config::default()
    };
    let json = write_file(&dir, "data.txt", format!("{{\"k\": \"{}\"}}", "z".repeat(300)));
    assert!(render_file_with_config(&json, 1, 1, &config).contains("[TRUNCATED 302 CHARS]"));
}

#[test]
fn test_explicit_grammar_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "looks.js", format!("def f():\n    return '{}'\n", "w".repeat(300)));
    let config = Config {
        grammar: Some(Grammar::Python),
        strict: true,
        ..Config::default()
    };
    let out = render_file_with_config(&path, 1, 2, &config);
    assert!(out.starts_with("1 | def f():"), "got {:?}", out);
    assert!(out.contains("[TRUNCATED 302 CHARS]"));
}

// ==================== Degraded rendering ====================

#[test]
fn test_strict_mode_renders_raw_window_with_warning() {
    let dir = TempDir::new().unwrap();
    let line = long_literal_line(300);
    let path = write_file(&dir, "broken.js", format!("{}\nfunction (", line));
    let config = Config {
        strict: true,
        ..Config::default()
    };

    let out = render_file_with_config(&path, 1, 1, &config);
    let (warning, window) = out.split_once('\n').unwrap();
    assert!(warning.starts_with("⚠️ AST Warning: javascript syntax error"), "got {:?}", warning);
    assert_eq!(window, format!("1 | {}", line));
}

#[test]
fn test_tolerant_mode_truncates_despite_syntax_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.js", format!("{}\nfunction (", long_literal_line(300)));
    let out = render_file(&path, 1, 2, 200);
    assert!(out.starts_with("1 | const s = \""));
    assert!(out.contains("[TRUNCATED 302 CHARS]"));
}

// ==================== Windows ====================

#[test]
fn test_window_past_end_of_file() {
    let dir = TempDir::new().unwrap();
    let contents: String = (1..=50).map(|i| format!("line {}\n", i)).collect();
    let path = write_file(&dir, "fifty.js", contents);
    assert_eq!(
        render_file(&path, 100, 110, 200),
        "⚠️ End of file reached (Total lines: 50)"
    );
}

#[test]
fn test_single_digit_window() {
    assert_eq!(render("a\nb\nc", 1, 3, 200), "1 | a\n2 | b\n3 | c");
}

#[test]
fn test_window_width_uses_clamped_end() {
    let contents: String = (1..=12).map(|i| format!("l{}\n", i)).collect();
    let out = render(&contents, 8, 500, 200);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.first(), Some(&" 8 | l8"));
    assert_eq!(lines.last(), Some(&"12 | l12"));
}

// ==================== Rendered line parity ====================

/// One generated JavaScript statement, possibly with a multi-line template.
fn statement_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => "[a-z]{1,8}\\(\\);",
        3 => "[a-zA-Z0-9 ]{0,80}".prop_map(|body| format!("let s = \"{}\";", body)),
        3 => prop::collection::vec(("[a-z ]{0,40}", prop_oneof!["\n", "\r\n", "\r"]), 0..5)
            .prop_map(|rows| {
                let body: String = rows.into_iter().map(|(row, end)| format!("{}{}", row, end)).collect();
                format!("html(`{}end`);", body)
            }),
    ]
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((statement_strategy(), prop_oneof!["\n", "\r\n", "\r"]), 1..25).prop_map(
        |parts| {
            parts
                .into_iter()
                .map(|(stmt, end)| format!("{}{}", stmt, end))
                .collect()
        },
    )
}

/// 0-based lines of `source` that a literal truncated at `limit` covers.
fn touched_lines(source: &str, limit: i64) -> HashSet<usize> {
    let spans = TreeSitterLiterals::for_grammar(Grammar::JavaScript)
        .unwrap()
        .literal_spans(source)
        .unwrap();
    let report = truncate_with_report(source, &spans, TruncationLimit::from_signed(limit));
    let index = LineIndex::new(source);

    let mut touched = HashSet::new();
    for literal in &report.literals {
        let first = index.line_at_offset(literal.start).unwrap();
        let last = index.line_at_offset(literal.start + literal.byte_len - 1).unwrap();
        touched.extend(first..=last);
    }
    touched
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Lines no truncated literal touches render exactly as with truncation off.
    #[test]
    fn prop_untouched_lines_render_unchanged(source in source_strategy(), limit in 10i64..100) {
        let truncated = render(&source, 1, i64::MAX, limit);
        let full = render(&source, 1, i64::MAX, -1);
        let truncated: Vec<&str> = truncated.lines().collect();
        let full: Vec<&str> = full.lines().collect();
        prop_assert_eq!(truncated.len(), full.len());

        let width = full.len().to_string().len();
        let touched = touched_lines(&source, limit);
        for (i, (after, before)) in truncated.iter().zip(&full).enumerate() {
            let prefix = format!("{:>width$} | ", i + 1, width = width);
            prop_assert!(after.starts_with(&prefix));
            if !touched.contains(&i) {
                prop_assert_eq!(after, before);
            }
        }
    }
}
