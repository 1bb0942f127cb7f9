//! Code block languages, display labels and highlighter aliases.

/// Language of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    Php,
    Blade,
    Html,
    Css,
    JavaScript,
    Json,
    Bash,
    Sql,
    Yaml,
    Xml,
    TypeScript,
    Rust,
    Toml,
    Python,
    /// Any other tag, kept verbatim.
    Other(String),
}

impl Language {
    /// Parse language from the `language-*` class tag emitted for a fence.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        match tag.to_lowercase().as_str() {
            "php" => Self::Php,
            "blade" => Self::Blade,
            "html" => Self::Html,
            "css" => Self::Css,
            "javascript" | "js" => Self::JavaScript,
            "json" => Self::Json,
            "bash" | "shell" | "sh" => Self::Bash,
            "sql" => Self::Sql,
            "yaml" | "yml" => Self::Yaml,
            "xml" => Self::Xml,
            "typescript" | "ts" => Self::TypeScript,
            "rust" | "rs" => Self::Rust,
            "toml" => Self::Toml,
            "python" | "py" => Self::Python,
            _ => Self::Other(tag.to_string()),
        }
    }

    /// Human-readable label shown in the code block header.
    pub fn label(&self) -> String {
        let label = match self {
            Self::Php => "PHP",
            Self::Blade => "Blade",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::JavaScript => "JavaScript",
            Self::Json => "JSON",
            Self::Bash => "Terminal",
            Self::Sql => "SQL",
            Self::Yaml => "YAML",
            Self::Xml => "XML",
            Self::TypeScript => "TypeScript",
            Self::Rust => "Rust",
            Self::Toml => "TOML",
            Self::Python => "Python",
            Self::Other(tag) => return tag.to_uppercase(),
        };
        label.to_string()
    }

    /// Token used to look the language up in the highlighter's syntax set.
    pub fn highlight_token(&self) -> String {
        let token = match self {
            Self::Php => "php",
            // Blade templates are HTML with directives.
            Self::Blade | Self::Html => "html",
            Self::Css => "css",
            Self::JavaScript => "js",
            Self::Json => "json",
            Self::Bash => "bash",
            Self::Sql => "sql",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
            Self::TypeScript => "ts",
            Self::Rust => "rs",
            Self::Toml => "toml",
            Self::Python => "py",
            Self::Other(tag) => return tag.to_lowercase(),
        };
        token.to_string()
    }
}

/// Header label for a code block, `"Code"` when the fence has no language.
pub fn code_label(language: Option<&Language>) -> String {
    language.map_or_else(|| "Code".to_string(), Language::label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_aliases() {
        assert_eq!(Language::from_tag("js"), Language::JavaScript);
        assert_eq!(Language::from_tag("YML"), Language::Yaml);
        assert_eq!(Language::from_tag("shell"), Language::Bash);
        assert_eq!(
            Language::from_tag("elixir"),
            Language::Other("elixir".to_string())
        );
    }

    #[test]
    fn labels_known_languages() {
        assert_eq!(Language::from_tag("php").label(), "PHP");
        assert_eq!(Language::from_tag("sh").label(), "Terminal");
        assert_eq!(Language::from_tag("ts").label(), "TypeScript");
    }

    #[test]
    fn uppercases_unknown_languages() {
        assert_eq!(Language::from_tag("go").label(), "GO");
        assert_eq!(Language::from_tag("Dockerfile").label(), "DOCKERFILE");
    }

    #[test]
    fn labels_untagged_blocks_as_code() {
        assert_eq!(code_label(None), "Code");
        assert_eq!(code_label(Some(&Language::Json)), "JSON");
    }

    #[test]
    fn resolves_highlight_tokens() {
        assert_eq!(Language::Blade.highlight_token(), "html");
        assert_eq!(Language::from_tag("Elixir").highlight_token(), "elixir");
    }
}
