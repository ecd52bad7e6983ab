#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Java modifier keywords recognised when building modifier sets. Anything
/// else appearing in a modifier list (annotations, mostly) is dropped.
pub const JAVA_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "synchronized",
    "transient",
    "volatile",
    "native",
    "strictfp",
    "default",
    "sealed",
    "non-sealed",
];

/// Builds a modifier set out of free text such as `@Override public static`.
pub fn modifier_set(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .filter(|word| JAVA_MODIFIERS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Collapses runs of whitespace so `Map< String,  Integer >` and
/// `Map<String, Integer>` compare equal.
pub fn normalize_type(text: &str) -> String {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    joined
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" [", "[")
}

/// Splits a raw parameter list (with or without the surrounding parentheses)
/// into parameter types, dropping names, `final`, and annotations.
///
/// Commas nested inside generic arguments do not split parameters.
pub fn parameter_types(params: &str) -> Vec<String> {
    let inner = params.trim();
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner);

    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in inner.chars() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => pieces.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    pieces.push(current);

    pieces
        .iter()
        .filter_map(|piece| {
            let tokens: Vec<&str> = piece
                .split_whitespace()
                .filter(|t| *t != "final" && !t.starts_with('@'))
                .collect();
            match tokens.len() {
                0 => None,
                1 => Some(normalize_type(tokens[0])),
                n => Some(normalize_type(&tokens[..n - 1].join(" "))),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A field declared in a class body
pub struct FieldFact {
    /// field name
    pub name:          String,
    /// declared type as written, whitespace-normalized
    pub declared_type: String,
    /// modifier keywords
    pub modifiers:     BTreeSet<String>,
}

impl FieldFact {
    /// Creates a new field fact
    pub fn new(
        name: impl Into<String>,
        declared_type: impl AsRef<str>,
        modifiers: BTreeSet<String>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: normalize_type(declared_type.as_ref()),
            modifiers,
        }
    }

    /// Whether the given modifier keyword is present
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.contains(modifier)
    }

    /// `private` is present
    pub fn is_private(&self) -> bool {
        self.has_modifier("private")
    }

    /// `static` is present
    pub fn is_static(&self) -> bool {
        self.has_modifier("static")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A method declared in a class body
pub struct MethodFact {
    /// method name
    pub name:            String,
    /// return type, `void` included
    pub return_type:     String,
    /// parameter types in declaration order
    pub parameter_types: Vec<String>,
    /// modifier keywords
    pub modifiers:       BTreeSet<String>,
}

impl MethodFact {
    /// Creates a new method fact
    pub fn new(
        name: impl Into<String>,
        return_type: impl AsRef<str>,
        parameter_types: Vec<String>,
        modifiers: BTreeSet<String>,
    ) -> Self {
        Self {
            name: name.into(),
            return_type: normalize_type(return_type.as_ref()),
            parameter_types,
            modifiers,
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// `static` is present
    pub fn is_static(&self) -> bool {
        self.modifiers.contains("static")
    }

    /// Returns `void`
    pub fn is_void(&self) -> bool {
        self.return_type == "void"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A constructor, identified by its parameter list only
pub struct ConstructorFact {
    /// parameter types in declaration order
    pub parameter_types: Vec<String>,
    /// modifier keywords
    pub modifiers:       BTreeSet<String>,
}

impl ConstructorFact {
    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Everything extracted for one class declaration
pub struct ClassFacts {
    /// simple class name
    pub name:         String,
    /// name of the extended class, without type arguments
    pub superclass:   Option<String>,
    /// declared fields
    pub fields:       Vec<FieldFact>,
    /// declared methods
    pub methods:      Vec<MethodFact>,
    /// declared constructors
    pub constructors: Vec<ConstructorFact>,
}

impl ClassFacts {
    /// Creates an empty fact set for a class
    pub fn new(name: impl Into<String>, superclass: Option<&str>) -> Self {
        Self {
            name: name.into(),
            superclass: superclass.map(|s| {
                let s = s.trim();
                s.split('<').next().unwrap_or(s).trim().to_string()
            }),
            ..Self::default()
        }
    }

    /// Whether this class extends `parent`, compared case-insensitively and
    /// ignoring any package qualifier.
    pub fn extends(&self, parent: &str) -> bool {
        self.superclass.as_deref().is_some_and(|s| {
            let simple = s.rsplit('.').next().unwrap_or(s);
            simple.eq_ignore_ascii_case(parent)
        })
    }
}
