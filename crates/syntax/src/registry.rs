// Chunk: docs/chunks/literal_spans - Grammar registry for literal scanning

//! Language registry mapping file extensions and names to grammars.
//!
//! Each [`Grammar`] knows its tree-sitter `Language` and a query that captures
//! the node kinds it treats as string-like literals. Captures named
//! `literal.template` become [`LiteralKind::TemplateString`](crate::LiteralKind),
//! every other capture a plain string.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tree_sitter::Language;

/// A grammar the literal scanner can parse with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Grammar {
    #[default]
    JavaScript,
    TypeScript,
    Tsx,
    Python,
    Rust,
    Go,
    Cpp,
    Json,
    Bash,
}

impl Grammar {
    /// All supported grammars.
    pub const ALL: [Grammar; 9] = [
        Grammar::JavaScript,
        Grammar::TypeScript,
        Grammar::Tsx,
        Grammar::Python,
        Grammar::Rust,
        Grammar::Go,
        Grammar::Cpp,
        Grammar::Json,
        Grammar::Bash,
    ];

    /// Canonical lowercase name, as accepted by [`Grammar::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Grammar::JavaScript => "javascript",
            Grammar::TypeScript => "typescript",
            Grammar::Tsx => "tsx",
            Grammar::Python => "python",
            Grammar::Rust => "rust",
            Grammar::Go => "go",
            Grammar::Cpp => "cpp",
            Grammar::Json => "json",
            Grammar::Bash => "bash",
        }
    }

    /// The tree-sitter language for this grammar.
    pub fn language(self) -> Language {
        match self {
            Grammar::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Grammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Grammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Grammar::Python => tree_sitter_python::LANGUAGE.into(),
            Grammar::Rust => tree_sitter_rust::LANGUAGE.into(),
            Grammar::Go => tree_sitter_go::LANGUAGE.into(),
            Grammar::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Grammar::Json => tree_sitter_json::LANGUAGE.into(),
            Grammar::Bash => tree_sitter_bash::LANGUAGE.into(),
        }
    }

    /// The query capturing this grammar's string-like literal nodes.
    pub fn literals_query(self) -> &'static str {
        match self {
            // TypeScript and TSX extend the JavaScript grammar
            Grammar::JavaScript | Grammar::TypeScript | Grammar::Tsx => {
                "(string) @literal.string\n(template_string) @literal.template"
            }
            Grammar::Python | Grammar::Json => "(string) @literal.string",
            Grammar::Rust | Grammar::Cpp => {
                "(string_literal) @literal.string\n(raw_string_literal) @literal.string"
            }
            Grammar::Go => {
                "(interpreted_string_literal) @literal.string\n(raw_string_literal) @literal.string"
            }
            Grammar::Bash => "(string) @literal.string\n(raw_string) @literal.string",
        }
    }

    /// Builds the language configuration for this grammar.
    pub fn config(self) -> LanguageConfig {
        LanguageConfig::new(self, self.language(), self.literals_query())
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a grammar name that no grammar answers to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grammar '{0}'")]
pub struct UnknownGrammar(pub String);

impl FromStr for Grammar {
    type Err = UnknownGrammar;

    /// Parses a grammar name. Accepts canonical names, common aliases and
    /// file extensions, case-insensitively.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_lowercase();
        let normalized = normalized.strip_prefix('.').unwrap_or(&normalized);
        match normalized {
            "javascript" | "js" | "jsx" | "mjs" | "cjs" => Ok(Grammar::JavaScript),
            "typescript" | "ts" | "mts" | "cts" => Ok(Grammar::TypeScript),
            "tsx" => Ok(Grammar::Tsx),
            "python" | "py" | "pyi" => Ok(Grammar::Python),
            "rust" | "rs" => Ok(Grammar::Rust),
            "go" | "golang" => Ok(Grammar::Go),
            "cpp" | "c++" | "cc" | "cxx" | "hpp" | "hh" => Ok(Grammar::Cpp),
            "json" => Ok(Grammar::Json),
            "bash" | "shell" | "sh" | "zsh" => Ok(Grammar::Bash),
            _ => Err(UnknownGrammar(name.to_string())),
        }
    }
}

/// Configuration for scanning one grammar's literals.
#[derive(Clone)]
pub struct LanguageConfig {
    /// Which grammar this is
    pub grammar: Grammar,
    /// The tree-sitter language
    pub language: Language,
    /// The literal capture query (tree-sitter query syntax)
    pub literals_query: &'static str,
}

impl LanguageConfig {
    /// Creates a new language configuration.
    pub fn new(grammar: Grammar, language: Language, literals_query: &'static str) -> Self {
        Self {
            grammar,
            language,
            literals_query,
        }
    }
}

impl fmt::Debug for LanguageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageConfig")
            .field("grammar", &self.grammar)
            .field("literals_query", &self.literals_query)
            .finish_non_exhaustive()
    }
}

/// Registry mapping file extensions to language configurations.
pub struct LanguageRegistry {
    /// Map from extension (without leading dot) to language config
    configs: HashMap<&'static str, LanguageConfig>,
}

impl LanguageRegistry {
    /// Creates a new language registry with all supported grammars.
    pub fn new() -> Self {
        let mut configs = HashMap::new();

        let extensions: [(Grammar, &[&'static str]); 9] = [
            (Grammar::JavaScript, &["js", "jsx", "mjs", "cjs"]),
            (Grammar::TypeScript, &["ts", "mts", "cts"]),
            (Grammar::Tsx, &["tsx"]),
            (Grammar::Python, &["py", "pyi"]),
            (Grammar::Rust, &["rs"]),
            (Grammar::Go, &["go"]),
            (Grammar::Cpp, &["cpp", "cc", "cxx", "hpp", "hh"]),
            (Grammar::Json, &["json"]),
            (Grammar::Bash, &["sh", "bash", "zsh"]),
        ];

        for (grammar, exts) in extensions {
            let config = grammar.config();
            for ext in exts {
                configs.insert(*ext, config.clone());
            }
        }

        Self { configs }
    }

    /// Returns the language configuration for a file extension.
    ///
    /// The extension can be with or without a leading dot (e.g., ".js" or "js").
    pub fn config_for_extension(&self, ext: &str) -> Option<&LanguageConfig> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        self.configs.get(ext.to_lowercase().as_str())
    }

    /// Returns the language configuration for a path, by its extension.
    pub fn config_for_path(&self, path: &Path) -> Option<&LanguageConfig> {
        let ext = path.extension()?.to_str()?;
        self.config_for_extension(ext)
    }

    /// Returns an iterator over all supported extensions.
    pub fn supported_extensions(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().copied()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
