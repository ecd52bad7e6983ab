#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
};

use anyhow::{Context, Result};
use regex::Regex;

use super::{
    extract::SourceFacts,
    parser::Parser,
    queries::{MAIN_METHOD_QUERY, MODIFIED_CLASS_QUERY, PACKAGE_QUERY},
};

/// `package a.b.c;`
static PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*package\s+([\w.]+)\s*;").expect("package pattern is valid")
});

/// `public [final|abstract] class Name`
static PUBLIC_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bpublic\s+(?:(?:final|abstract)\s+)*class\s+(\w+)")
        .expect("public class pattern is valid")
});

/// `public static void main(` with the two modifiers in either order
static MAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:public\s+static|static\s+public)\s+(?:final\s+)?void\s+main\s*\(")
        .expect("main pattern is valid")
});

#[derive(Debug, Clone)]
/// Struct representing one Java source file of a submission
pub struct SourceFile {
    /// path the file was read from
    path:         PathBuf,
    /// name of file, e.g. `LoanAccount.java`
    file_name:    String,
    /// package the java file belongs to.
    package_name: Option<String>,
    /// public class name, or the file stem when there is none
    class_name:   String,
    /// whether a `public static void main` is declared
    has_main:     bool,
    /// extracted structural facts
    facts:        SourceFacts,
}

impl SourceFile {
    /// Creates a `SourceFile` from already-read text.
    ///
    /// * `path`: where the text came from; only its file name is used
    /// * `text`: the Java source
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let facts = SourceFacts::parse(text);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Main.java".to_string());
        let stem = file_name
            .strip_suffix(".java")
            .unwrap_or(file_name.as_str())
            .to_string();

        let (package_name, public_class, has_main) = match facts.parser() {
            Some(parser) => detect_with_queries(parser),
            None => detect_with_patterns(facts.source()),
        };

        Self {
            path,
            file_name,
            package_name,
            class_name: public_class.unwrap_or(stem),
            has_main,
            facts,
        }
    }

    /// Reads and analyzes the file at `path`. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("Could not read file: {path:?}"))?;
        Ok(Self::new(path, String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Get a reference to the file's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the file's file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name without the `.java` extension
    pub fn stem(&self) -> &str {
        self.file_name
            .strip_suffix(".java")
            .unwrap_or(self.file_name.as_str())
    }

    /// Package declared by the file, if any
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    /// Public class name, or the file stem
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Whether the file declares an entry point
    pub fn has_main(&self) -> bool {
        self.has_main
    }

    /// Fully qualified class name, as passed to `java`
    pub fn proper_name(&self) -> String {
        match &self.package_name {
            Some(pkg) => format!("{pkg}.{}", self.class_name),
            None => self.class_name.clone(),
        }
    }

    /// Where the file belongs under a source root so that its directory
    /// matches its package.
    pub fn package_relative_path(&self) -> PathBuf {
        let mut rel = PathBuf::new();
        if let Some(pkg) = &self.package_name {
            rel.extend(pkg.split('.').filter(|p| !p.is_empty()));
        }
        rel.push(&self.file_name);
        rel
    }

    /// Raw source text
    pub fn code(&self) -> &str {
        self.facts.source()
    }

    /// Extracted facts
    pub fn facts(&self) -> &SourceFacts {
        &self.facts
    }

    /// Attaches the submission-wide text to this file's facts.
    pub(crate) fn attach_submission_source(&mut self, combined: Arc<str>) {
        self.facts.set_submission_source(combined);
    }
}

/// Package, public class, and entry point from tree-sitter queries, with the
/// patterns filling any gaps.
fn detect_with_queries(parser: &Parser) -> (Option<String>, Option<String>, bool) {
    let (fallback_pkg, fallback_class, fallback_main) = detect_with_patterns(parser.code());

    let package = parser
        .query(PACKAGE_QUERY)
        .ok()
        .and_then(|rows| rows.into_iter().find_map(|mut r| r.remove("name")))
        .or(fallback_pkg);

    let public_class = parser
        .query(MODIFIED_CLASS_QUERY)
        .ok()
        .and_then(|rows| {
            rows.into_iter().find_map(|mut r| {
                let modifiers = r.remove("modifiers").unwrap_or_default();
                if modifiers.split_whitespace().any(|m| m == "public") {
                    r.remove("name")
                } else {
                    None
                }
            })
        })
        .or(fallback_class);

    let has_main = parser
        .query(MAIN_METHOD_QUERY)
        .map(|rows| {
            rows.iter().any(|r| {
                r.get("modifiers").is_some_and(|m| {
                    let words: Vec<&str> = m.split_whitespace().collect();
                    words.contains(&"public") && words.contains(&"static")
                })
            })
        })
        .unwrap_or(fallback_main);

    (package, public_class, has_main)
}

/// Package, public class, and entry point from regular expressions.
fn detect_with_patterns(code: &str) -> (Option<String>, Option<String>, bool) {
    let package = PACKAGE_RE
        .captures(code)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let public_class = PUBLIC_CLASS_RE
        .captures(code)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    (package, public_class, MAIN_RE.is_match(code))
}
