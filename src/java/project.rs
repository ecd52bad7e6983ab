#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{ops::Deref, path::PathBuf, sync::Arc};

use anyhow::{Result, bail};

use super::{
    extract::{SearchScope, pattern_matches},
    facts::ClassFacts,
    file::SourceFile,
};

#[derive(Debug, Clone)]
/// Struct representing one student's submission.
/// Files keep the order they were discovered in.
pub struct Submission {
    /// display name of the student
    student_name: String,
    /// opaque identifier, passed through to the result
    student_id:   String,
    /// Collection of java files in this submission
    files:        Vec<SourceFile>,
    /// every file's text joined with newlines
    combined:     Arc<str>,
}

/// A class together with the file that declares it.
#[derive(Debug, Clone, Copy)]
pub struct ClassView<'a> {
    /// declaring file
    file:  &'a SourceFile,
    /// the class facts
    class: &'a ClassFacts,
}

impl<'a> ClassView<'a> {
    /// Declaring file
    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    /// The class facts
    pub fn facts(&self) -> &'a ClassFacts {
        self.class
    }

    /// Searches the declaring file's text for `pattern`.
    pub fn source_contains(&self, pattern: &str) -> bool {
        self.file.facts().source_contains(pattern, SearchScope::Unit)
    }
}

impl Deref for ClassView<'_> {
    type Target = ClassFacts;

    fn deref(&self) -> &Self::Target {
        self.class
    }
}

impl Submission {
    /// Creates a submission and shares the combined text with every file so
    /// that submission-wide searches work from any of them.
    pub fn new(
        student_name: impl Into<String>,
        student_id: impl Into<String>,
        mut files: Vec<SourceFile>,
    ) -> Self {
        let combined: Arc<str> = files
            .iter()
            .map(SourceFile::code)
            .collect::<Vec<_>>()
            .join("\n")
            .into();
        for file in files.iter_mut() {
            file.attach_submission_source(Arc::clone(&combined));
        }

        Self {
            student_name: student_name.into(),
            student_id: student_id.into(),
            files,
            combined,
        }
    }

    /// Reads every path and builds a submission from them.
    pub fn from_paths(
        student_name: impl Into<String>,
        student_id: impl Into<String>,
        paths: &[PathBuf],
    ) -> Result<Self> {
        let files = paths
            .iter()
            .map(|p| SourceFile::read(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(student_name, student_id, files))
    }

    /// Student display name
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// Student identifier
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Files in discovery order
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Text of all files joined with newlines
    pub fn combined_source(&self) -> &str {
        &self.combined
    }

    /// Source for the report: a single file verbatim, or every file under a
    /// `// === Name.java ===` header.
    pub fn display_source(&self) -> String {
        match self.files.as_slice() {
            [only] => only.code().to_string(),
            files => files
                .iter()
                .map(|f| format!("// === {} ===\n{}", f.file_name(), f.code()))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    /// Attempts to identify a file from its file name, stem, class name, or
    /// fully qualified name.
    ///
    /// * `name`: partial/fully formed name of the Java file to look for.
    pub fn identify(&self, name: &str) -> Result<&SourceFile> {
        let found = self
            .files
            .iter()
            .find(|f| f.file_name() == name)
            .or_else(|| self.files.iter().find(|f| f.stem() == name))
            .or_else(|| self.files.iter().find(|f| f.class_name() == name))
            .or_else(|| self.files.iter().find(|f| f.proper_name() == name));

        match found {
            Some(file) => Ok(file),
            None => bail!("Could not find {} in the submission", name),
        }
    }

    /// The file most likely to hold the graded class rather than the driver:
    /// files without `main` first, then names without `test` or `main`.
    pub fn primary_file(&self) -> Option<&SourceFile> {
        if let [only] = self.files.as_slice() {
            return Some(only);
        }

        let plain_name = |f: &&SourceFile| {
            let stem = f.stem().to_lowercase();
            !stem.contains("test") && !stem.contains("main")
        };

        let (with_main, without_main): (Vec<&SourceFile>, Vec<&SourceFile>) =
            self.files.iter().partition(|f| f.has_main());

        let pool = if without_main.is_empty() {
            with_main
        } else {
            without_main
        };
        pool.iter()
            .copied()
            .find(plain_name)
            .or_else(|| pool.first().copied())
    }

    /// Every class of every file
    pub fn classes(&self) -> impl Iterator<Item = ClassView<'_>> {
        self.files.iter().flat_map(|file| {
            file.facts()
                .classes()
                .iter()
                .map(move |class| ClassView { file, class })
        })
    }

    /// First class whose name equals one of `names`, ignoring case. Names are
    /// tried in order, so earlier names take priority.
    pub fn find_class(&self, names: &[&str]) -> Option<ClassView<'_>> {
        names.iter().find_map(|wanted| {
            self.classes()
                .find(|c| c.name.eq_ignore_ascii_case(wanted))
        })
    }

    /// First class satisfying `predicate`
    pub fn find_class_where(
        &self,
        predicate: impl Fn(&ClassFacts) -> bool,
    ) -> Option<ClassView<'_>> {
        self.classes().find(|c| predicate(c.facts()))
    }

    /// Searches the combined text of all files for `pattern`.
    pub fn source_contains(&self, pattern: &str) -> bool {
        pattern_matches(pattern, &self.combined)
    }
}
