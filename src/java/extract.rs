#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::BTreeSet,
    sync::{Arc, LazyLock},
};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};
use tree_sitter::Node;

use super::{
    facts::{
        ClassFacts, ConstructorFact, FieldFact, JAVA_MODIFIERS, MethodFact, modifier_set,
        parameter_types,
    },
    parser::Parser,
};

/// Class declarations in comment- and string-free source text.
/// * group 1: class name
/// * group 2: everything between the name and the opening brace
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+([A-Za-z_]\w*)([^{;]*)\{").expect("class pattern is valid")
});

/// `extends Parent` inside a class header with generics already removed.
static EXTENDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bextends\s+([A-Za-z_][\w.]*)").expect("extends pattern is valid")
});

/// Field declarations: modifiers, type, name, then `;` or `=`.
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*((?:(?:public|private|protected|static|final|transient|volatile)\s+)*)([A-Za-z_][\w.]*(?:\s*<[^;=(){}]*>)?(?:\s*\[\s*\])*)\s+([A-Za-z_]\w*)\s*[;=]",
    )
    .expect("field pattern is valid")
});

/// Method declarations: modifiers, return type, name, parameter list, then a
/// body or a terminating semicolon.
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"((?:(?:public|private|protected|static|final|abstract|synchronized|native)\s+)*)([A-Za-z_][\w.]*(?:\s*<[^;=(){}]*>)?(?:\s*\[\s*\])*)\s+([A-Za-z_]\w*)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+)?[{;]",
    )
    .expect("method pattern is valid")
});

/// Words that look like calls when followed by parentheses.
const CONTROL_KEYWORDS: &[&str] = &["if", "while", "for", "switch", "catch", "synchronized"];

/// Words that can precede an identifier in a statement but are never types.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "new", "else", "throw", "case", "package", "import", "goto", "break", "continue",
    "yield", "assert", "instanceof", "do", "try", "class",
];

/// Which text `source_contains` searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// only the compilation unit the facts were extracted from
    Unit,
    /// every file of the submission, concatenated
    Submission,
}

/// How the facts of a compilation unit were obtained.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// tree-sitter produced an error-free tree
    Parsed {
        /// the parser holding the tree
        parser:  Parser,
        /// classes found in the tree
        classes: Vec<ClassFacts>,
    },
    /// the source did not parse cleanly; facts come from pattern matching
    Unparsed {
        /// classes found by the fallback patterns
        classes: Vec<ClassFacts>,
        /// why the syntactic parse was rejected
        reason:  String,
    },
}

impl Extraction {
    /// Classes regardless of which strategy found them
    pub fn classes(&self) -> &[ClassFacts] {
        match self {
            Extraction::Parsed { classes, .. } | Extraction::Unparsed { classes, .. } => classes,
        }
    }
}

/// Structural facts of one compilation unit, plus text search over the unit
/// and (once attached) the whole submission.
#[derive(Debug, Clone)]
pub struct SourceFacts {
    /// raw source of this unit
    source:            String,
    /// combined source of every file in the submission
    submission_source: Option<Arc<str>>,
    /// facts and the strategy that produced them
    extraction:        Extraction,
}

/// Serializable view of a unit's facts, used by `inspect`.
#[derive(Debug, Serialize)]
pub struct FactsReport<'a> {
    /// true when tree-sitter produced the facts
    pub parsed:          bool,
    /// fallback reason, if any
    pub fallback_reason: Option<&'a str>,
    /// per-class facts
    pub classes:         &'a [ClassFacts],
}

impl SourceFacts {
    /// Extracts facts from `source`. Never fails: source that does not parse
    /// is handled by the pattern-based fallback.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let extraction = match Parser::new(source.clone()) {
            Ok(parser) if !parser.has_errors() => {
                let classes = syntax_classes(&parser);
                Extraction::Parsed { parser, classes }
            }
            Ok(_) => Extraction::Unparsed {
                classes: pattern_classes(&source),
                reason:  "source contains syntax errors".to_string(),
            },
            Err(e) => {
                warn!("tree-sitter unavailable, using pattern extraction: {e:#}");
                Extraction::Unparsed {
                    classes: pattern_classes(&source),
                    reason:  format!("{e:#}"),
                }
            }
        };

        if let Extraction::Unparsed { reason, classes } = &extraction {
            debug!(reason = %reason, classes = classes.len(), "fell back to pattern extraction");
        }

        Self {
            source,
            submission_source: None,
            extraction,
        }
    }

    /// Attaches the combined text of every file in the submission.
    pub fn set_submission_source(&mut self, combined: Arc<str>) {
        self.submission_source = Some(combined);
    }

    /// The extraction strategy and its facts
    pub fn extraction(&self) -> &Extraction {
        &self.extraction
    }

    /// Whether the syntactic parse succeeded
    pub fn is_parsed(&self) -> bool {
        matches!(self.extraction, Extraction::Parsed { .. })
    }

    /// Why the fallback was used, if it was
    pub fn fallback_reason(&self) -> Option<&str> {
        match &self.extraction {
            Extraction::Parsed { .. } => None,
            Extraction::Unparsed { reason, .. } => Some(reason),
        }
    }

    /// The tree-sitter parser, available only for cleanly parsed units
    pub fn parser(&self) -> Option<&Parser> {
        match &self.extraction {
            Extraction::Parsed { parser, .. } => Some(parser),
            Extraction::Unparsed { .. } => None,
        }
    }

    /// Raw source of this unit
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All classes declared in this unit, outer classes first
    pub fn classes(&self) -> &[ClassFacts] {
        self.extraction.classes()
    }

    /// Names of all declared classes
    pub fn class_names(&self) -> Vec<&str> {
        self.classes().iter().map(|c| c.name.as_str()).collect()
    }

    /// Finds a class by name, ignoring case
    pub fn class(&self, name: &str) -> Option<&ClassFacts> {
        self.classes()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Fields of every class in this unit
    pub fn fields(&self) -> impl Iterator<Item = &FieldFact> {
        self.classes().iter().flat_map(|c| c.fields.iter())
    }

    /// Methods of every class in this unit
    pub fn methods(&self) -> impl Iterator<Item = &MethodFact> {
        self.classes().iter().flat_map(|c| c.methods.iter())
    }

    /// Constructors of every class in this unit
    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorFact> {
        self.classes().iter().flat_map(|c| c.constructors.iter())
    }

    /// Searches for the regular expression `pattern`. `SearchScope::Submission`
    /// falls back to this unit when no submission text was attached.
    ///
    /// An invalid pattern never matches.
    pub fn source_contains(&self, pattern: &str, scope: SearchScope) -> bool {
        let haystack = match (scope, self.submission_source.as_deref()) {
            (SearchScope::Submission, Some(all)) => all,
            _ => self.source.as_str(),
        };
        pattern_matches(pattern, haystack)
    }

    /// Serializable summary of the facts
    pub fn report(&self) -> FactsReport<'_> {
        FactsReport {
            parsed:          self.is_parsed(),
            fallback_reason: self.fallback_reason(),
            classes:         self.classes(),
        }
    }
}

/// Compiles and runs `pattern` against `haystack`, treating invalid patterns as
/// a non-match.
pub fn pattern_matches(pattern: &str, haystack: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(haystack),
        Err(e) => {
            warn!("ignoring invalid search pattern `{pattern}`: {e}");
            false
        }
    }
}

/// Walks the tree and collects every class declaration, nested ones included.
fn syntax_classes(parser: &Parser) -> Vec<ClassFacts> {
    let mut classes = Vec::new();
    collect_classes(parser, parser.root(), &mut classes);
    classes
}

/// Pre-order traversal so outer classes precede their nested classes.
fn collect_classes(parser: &Parser, node: Node<'_>, out: &mut Vec<ClassFacts>) {
    if node.kind() == "class_declaration"
        && let Some(class) = class_facts(parser, node)
    {
        out.push(class);
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_classes(parser, child, out);
    }
}

/// Builds the facts of one `class_declaration` node from its direct members.
fn class_facts(parser: &Parser, node: Node<'_>) -> Option<ClassFacts> {
    let name = parser.text_of(node.child_by_field_name("name")?);
    let superclass = node.child_by_field_name("superclass").and_then(|s| {
        let mut cursor = s.walk();
        let ty = s.named_children(&mut cursor).next();
        ty.map(|t| parser.text_of(t))
    });

    let mut class = ClassFacts::new(name, superclass);
    let body = node.child_by_field_name("body")?;
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "field_declaration" => class.fields.extend(field_facts(parser, member)),
            "method_declaration" => class.methods.extend(method_fact(parser, member)),
            "constructor_declaration" => {
                let parameter_types = member
                    .child_by_field_name("parameters")
                    .map(|p| parameter_types(parser.text_of(p)))
                    .unwrap_or_default();
                class.constructors.push(ConstructorFact {
                    parameter_types,
                    modifiers: modifiers_of(parser, member),
                });
            }
            _ => {}
        }
    }

    Some(class)
}

/// Modifier keywords of a declaration node, annotations dropped.
fn modifiers_of(parser: &Parser, node: Node<'_>) -> BTreeSet<String> {
    let mut cursor = node.walk();
    let modifiers = node
        .children(&mut cursor)
        .find(|c| c.kind() == "modifiers");
    modifiers
        .map(|m| modifier_set(parser.text_of(m)))
        .unwrap_or_default()
}

/// One fact per declarator, so `int a, b;` yields two fields.
fn field_facts(parser: &Parser, node: Node<'_>) -> Vec<FieldFact> {
    let Some(ty) = node.child_by_field_name("type") else {
        return Vec::new();
    };
    let ty = parser.text_of(ty);
    let modifiers = modifiers_of(parser, node);

    let mut cursor = node.walk();
    let names: Vec<&str> = node
        .children_by_field_name("declarator", &mut cursor)
        .filter_map(|d| d.child_by_field_name("name"))
        .map(|n| parser.text_of(n))
        .collect();

    names
        .into_iter()
        .map(|name| FieldFact::new(name, ty, modifiers.clone()))
        .collect()
}

/// Signature facts of a `method_declaration` node.
fn method_fact(parser: &Parser, node: Node<'_>) -> Option<MethodFact> {
    let name = parser.text_of(node.child_by_field_name("name")?);
    let return_type = parser.text_of(node.child_by_field_name("type")?);
    let parameters = node
        .child_by_field_name("parameters")
        .map(|p| parameter_types(parser.text_of(p)))
        .unwrap_or_default();

    Some(MethodFact::new(name, return_type, parameters, modifiers_of(parser, node)))
}

/// Replaces comments and string/char literal contents with spaces, keeping
/// byte offsets and newlines intact.
pub fn blank_comments_and_strings(source: &str) -> String {
    /// Scanner state
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        /// ordinary code
        Code,
        /// inside `// ...`
        LineComment,
        /// inside `/* ... */`
        BlockComment,
        /// inside a string literal
        Str,
        /// inside a char literal
        Char,
    }

    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        let blank = |b: u8| if b == b'\n' { b'\n' } else if b.is_ascii() { b' ' } else { b };

        match state {
            State::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    state = State::LineComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    state = State::BlockComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                (b'"', _) => {
                    state = State::Str;
                    out.push(b'"');
                }
                (b'\'', _) => {
                    state = State::Char;
                    out.push(b'\'');
                }
                _ => out.push(b),
            },
            State::LineComment => {
                if b == b'\n' {
                    state = State::Code;
                }
                out.push(blank(b));
            }
            State::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    state = State::Code;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                out.push(blank(b));
            }
            State::Str | State::Char => {
                let quote = if state == State::Str { b'"' } else { b'\'' };
                if b == b'\\' && next.is_some() {
                    out.push(b' ');
                    out.push(blank(next.unwrap_or(b' ')));
                    i += 2;
                    continue;
                }
                if b == quote {
                    state = State::Code;
                    out.push(b);
                } else if b == b'\n' {
                    // unterminated literal; resume scanning code on the next line
                    state = State::Code;
                    out.push(b'\n');
                } else {
                    out.push(blank(b));
                }
            }
        }
        i += 1;
    }

    // Non-ASCII bytes are copied through untouched, so the result is still
    // valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Removes `<...>` type arguments, nested ones included.
fn strip_type_arguments(text: &str) -> String {
    let mut depth = 0usize;
    text.chars()
        .filter(|c| match c {
            '<' => {
                depth += 1;
                false
            }
            '>' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => depth == 0,
        })
        .collect()
}

/// Brace depth of `text` at byte offset `at`.
fn brace_depth(text: &str, at: usize) -> i64 {
    text.as_bytes()[..at.min(text.len())]
        .iter()
        .fold(0i64, |depth, b| match b {
            b'{' => depth + 1,
            b'}' => depth - 1,
            _ => depth,
        })
}

/// Best-effort, pattern-based fact extraction for source that does not parse.
///
/// Each class owns the text from its declaration up to the next class
/// declaration.
fn pattern_classes(source: &str) -> Vec<ClassFacts> {
    let code = blank_comments_and_strings(source);

    let headers: Vec<(usize, String, Option<String>)> = CLASS_RE
        .captures_iter(&code)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().to_string();
            let header = strip_type_arguments(caps.get(2).map_or("", |m| m.as_str()));
            let parent = EXTENDS_RE
                .captures(&header)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            Some((whole.start(), name, parent))
        })
        .collect();

    let mut classes = Vec::with_capacity(headers.len());
    for (index, (start, name, parent)) in headers.iter().enumerate() {
        let end = headers
            .get(index + 1)
            .map_or(code.len(), |(next_start, ..)| *next_start);
        let segment = &code[*start..end];

        let mut class = ClassFacts::new(name.as_str(), parent.as_deref());
        class.fields = pattern_fields(segment);
        class.methods = pattern_methods(segment);
        class.constructors = pattern_constructors(segment, name);
        classes.push(class);
    }

    classes
}

/// Field declarations at member depth of a class segment.
fn pattern_fields(segment: &str) -> Vec<FieldFact> {
    FIELD_RE
        .captures_iter(segment)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let ty = caps.get(2)?.as_str();
            let name = caps.get(3)?.as_str();
            if STATEMENT_KEYWORDS.contains(&ty) || JAVA_MODIFIERS.contains(&ty) {
                return None;
            }
            if brace_depth(segment, whole.start()) > 1 {
                return None;
            }
            let modifiers = modifier_set(caps.get(1).map_or("", |m| m.as_str()));
            Some(FieldFact::new(name, ty, modifiers))
        })
        .collect()
}

/// Method declarations anywhere in a class segment.
fn pattern_methods(segment: &str) -> Vec<MethodFact> {
    METHOD_RE
        .captures_iter(segment)
        .filter_map(|caps| {
            let ty = caps.get(2)?.as_str();
            let name = caps.get(3)?.as_str();
            if CONTROL_KEYWORDS.contains(&name)
                || STATEMENT_KEYWORDS.contains(&ty)
                || JAVA_MODIFIERS.contains(&ty)
            {
                return None;
            }
            let modifiers = modifier_set(caps.get(1).map_or("", |m| m.as_str()));
            let params = parameter_types(caps.get(4).map_or("", |m| m.as_str()));
            Some(MethodFact::new(name, ty, params, modifiers))
        })
        .collect()
}

/// Constructors: the class name followed by a parameter list and a body, not
/// preceded by `new`.
fn pattern_constructors(segment: &str, class_name: &str) -> Vec<ConstructorFact> {
    let pattern = format!(
        r"((?:(?:public|private|protected)\s+)?)\b{}\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+)?\{{",
        regex::escape(class_name)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    re.captures_iter(segment)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if segment[..whole.start()].trim_end().ends_with("new") {
                return None;
            }
            Some(ConstructorFact {
                parameter_types: parameter_types(caps.get(2).map_or("", |m| m.as_str())),
                modifiers:       modifier_set(caps.get(1).map_or("", |m| m.as_str())),
            })
        })
        .collect()
}
