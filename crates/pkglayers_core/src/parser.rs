use anyhow::{Context, Result, anyhow, bail};
use log::{debug, trace};
use std::{fs, path::Path};
use tree_sitter::{Node, Parser as TsParser, Tree};

/// What the analysis needs from one Go source file: its package clause and imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoSource {
    pub package_name: String,
    /// Raw import paths in source order, unquoted and unresolved
    pub imports: Vec<String>,
}

pub fn read_go_source(file: &Path) -> Result<GoSource> {
    trace!("Parsing file for imports: {}", file.display());
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let source =
        parse_go_source(&src).with_context(|| format!("Failed to parse {}", file.display()))?;
    debug!("Found {} imports in {}", source.imports.len(), file.display());
    Ok(source)
}

/// Read only the declared package name of a file.
pub fn read_package_clause(file: &Path) -> Result<String> {
    read_go_source(file).map(|source| source.package_name)
}

/// Parse the header of a Go file.
///
/// Only the package clause and the import declarations have to be well
/// formed; syntax errors further down in the file are not our concern.
pub fn parse_go_source(src: &str) -> Result<GoSource> {
    let tree = parse_tree(src)?;
    let root = tree.root_node();

    let mut package_name = None;
    let mut imports = Vec::new();

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "package_clause" => {
                if child.has_error() {
                    bail!("malformed package clause");
                }
                package_name = package_identifier(&child, src);
            }
            "import_declaration" => {
                if child.has_error() {
                    bail!("malformed import declaration");
                }
                collect_imports(&child, src, &mut imports);
            }
            _ => {}
        }
    }

    let package_name = package_name.ok_or_else(|| anyhow!("missing package clause"))?;
    Ok(GoSource { package_name, imports })
}

fn parse_tree(src: &str) -> Result<Tree> {
    let lang: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
    let mut parser = TsParser::new();
    parser.set_language(&lang).map_err(|e| anyhow!("Failed to load Go grammar: {}", e))?;
    parser.parse(src.as_bytes(), None).ok_or_else(|| anyhow!("Go parser produced no tree"))
}

fn package_identifier(clause: &Node, src: &str) -> Option<String> {
    let mut cursor = clause.walk();
    clause
        .children(&mut cursor)
        .find(|n| n.kind() == "package_identifier")
        .map(|n| src[n.byte_range()].to_string())
}

fn collect_imports(node: &Node, src: &str, imports: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_spec" => {
                if let Some(path) = child.child_by_field_name("path") {
                    imports.push(unquote(&src[path.byte_range()]));
                }
            }
            "import_spec_list" => collect_imports(&child, src, imports),
            // Single import without parens
            "interpreted_string_literal" | "raw_string_literal" => {
                imports.push(unquote(&src[child.byte_range()]));
            }
            _ => {}
        }
    }
}

fn unquote(literal: &str) -> String {
    literal.trim_matches(|c| c == '"' || c == '`').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_package_clause_only() {
        let source = parse_go_source("package fmt\n").unwrap();
        assert_eq!(source.package_name, "fmt");
        assert!(source.imports.is_empty());
    }

    #[test]
    fn test_single_import() {
        let source = parse_go_source("package errors\n\nimport \"internal/reflectlite\"\n").unwrap();
        assert_eq!(source.imports, vec!["internal/reflectlite"]);
    }

    #[test]
    fn test_grouped_imports() {
        let source = parse_go_source(
            "package http\n\nimport (\n\t\"bufio\"\n\t\"io\"\n\n\t\"golang_org/x/net/http2/hpack\"\n)\n",
        )
        .unwrap();
        assert_eq!(source.package_name, "http");
        assert_eq!(source.imports, vec!["bufio", "io", "golang_org/x/net/http2/hpack"]);
    }

    #[test]
    fn test_aliased_dot_and_blank_imports() {
        let source = parse_go_source(
            "package x\n\nimport (\n\tmrand \"math/rand\"\n\t. \"strings\"\n\t_ \"unsafe\"\n)\n",
        )
        .unwrap();
        assert_eq!(source.imports, vec!["math/rand", "strings", "unsafe"]);
    }

    #[test]
    fn test_multiple_import_declarations_and_raw_strings() {
        let source =
            parse_go_source("package x\n\nimport \"C\"\nimport `os`\nimport (\"io\")\n").unwrap();
        assert_eq!(source.imports, vec!["C", "os", "io"]);
    }

    #[test]
    fn test_comments_in_header() {
        let source = parse_go_source(
            "// Copyright notice\n\n// Package sort sorts.\npackage sort // import \"sort\"\n\nimport \"internal/reflectlite\" // for Swapper\n",
        )
        .unwrap();
        assert_eq!(source.package_name, "sort");
        assert_eq!(source.imports, vec!["internal/reflectlite"]);
    }

    #[test]
    fn test_body_errors_are_ignored() {
        let source = parse_go_source("package x\n\nimport \"io\"\n\nfunc f() {\n\treturn +\n}\n").unwrap();
        assert_eq!(source.package_name, "x");
        assert_eq!(source.imports, vec!["io"]);
    }

    #[test]
    fn test_missing_package_clause() {
        assert!(parse_go_source("import \"io\"\n").is_err());
        assert!(parse_go_source("").is_err());
    }

    #[test]
    fn test_read_go_source_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(
            temp_dir.path(),
            "print.go",
            "package fmt\n\nimport (\n\t\"io\"\n\t\"os\"\n)\n",
        );
        let source = read_go_source(&file).unwrap();
        assert_eq!(source.package_name, "fmt");
        assert_eq!(source.imports, vec!["io", "os"]);
        assert_eq!(read_package_clause(&file).unwrap(), "fmt");
    }

    #[test]
    fn test_read_go_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_go_source(&temp_dir.path().join("nope.go")).is_err());
    }
}
