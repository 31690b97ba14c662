//! go.mod model for Go projects
//!
//! Handles:
//! - require statements (single and block), `// indirect` markers
//! - replace directives with optional old/new versions
//! - in-place version edits that keep comments and layout

use crate::domain::VERSION_PREFIX;
use crate::error::ManifestError;
use crate::manifest::syntax::{FileSyntax, Line, Stmt};
use crate::manifest::Manifest;
use std::path::{Path, PathBuf};

/// Directives go.mod files may contain
const KNOWN_VERBS: &[&str] = &[
    "module",
    "go",
    "toolchain",
    "godebug",
    "require",
    "exclude",
    "replace",
    "retract",
    "tool",
    "ignore",
];

const REPLACE_USAGE: &str = "usage: replace module/path [v1.2.3] => other/module v1.4 or replace module/path [v1.2.3] => ../local/directory";

/// A require directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Require {
    pub path: String,
    pub version: String,
    pub indirect: bool,
}

/// A replace directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    pub old_path: String,
    pub old_version: Option<String>,
    pub new_path: String,
    pub new_version: Option<String>,
}

/// Parsed go.mod file
#[derive(Debug, Clone)]
pub struct GoMod {
    path: PathBuf,
    syntax: FileSyntax,
}

impl GoMod {
    /// Parse go.mod content; `path` is used in error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "go.mod".to_string());

        let syntax = FileSyntax::parse(content)
            .map_err(|msg| ManifestError::parse_error(path, format!("{}:{}", file_name, msg)))?;

        validate(&syntax)
            .map_err(|msg| ManifestError::parse_error(path, format!("{}:{}", file_name, msg)))?;

        Ok(Self {
            path: path.to_path_buf(),
            syntax,
        })
    }

    /// Path the manifest was parsed from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `module` directive's path, if present
    pub fn module_path(&self) -> Option<String> {
        self.syntax
            .lines("module")
            .next()
            .and_then(|line| line.args.first())
            .map(|tok| unquote(tok))
    }

    /// All live require directives in file order
    pub fn requires(&self) -> Vec<Require> {
        self.syntax
            .lines("require")
            .filter_map(|line| {
                let [path, version] = line.args.as_slice() else {
                    return None;
                };
                Some(Require {
                    path: unquote(path),
                    version: unquote(version),
                    indirect: line
                        .comment
                        .as_deref()
                        .is_some_and(|c| c.trim_start_matches('/').trim().starts_with("indirect")),
                })
            })
            .collect()
    }

    /// All live replace directives in file order
    pub fn replaces(&self) -> Vec<Replace> {
        self.syntax
            .lines("replace")
            .filter_map(|line| parse_replace(&line.args).ok())
            .collect()
    }

    /// Update the first require of `module` in place or add a new one
    ///
    /// Duplicate requires of the same module are marked removed.
    fn add_require(&mut self, module: &str, version: &str) {
        let tokens = vec![auto_quote(module), version.to_string()];
        let mut need = true;

        for line in self.syntax.lines_mut("require") {
            if line.args.first().map(|t| unquote(t)).as_deref() != Some(module) {
                continue;
            }
            if need {
                line.args = tokens.clone();
                need = false;
            } else {
                line.removed = true;
            }
        }

        if need {
            self.syntax.add_line("require", tokens);
        }
    }

    /// Remove replace directives for `module` that carry no old version
    fn drop_replace(&mut self, module: &str) {
        for line in self.syntax.lines_mut("replace") {
            if let Ok(replace) = parse_replace(&line.args) {
                if replace.old_path == module && replace.old_version.is_none() {
                    line.removed = true;
                }
            }
        }
    }

    /// Point every replace of `module` at `new_path new_version`
    ///
    /// The first match is rewritten in place, any further ones are removed;
    /// with no match a new directive is added after the last replace.
    fn add_replace(&mut self, module: &str, new_path: &str, new_version: &str) {
        let tokens = vec![
            auto_quote(module),
            "=>".to_string(),
            auto_quote(new_path),
            new_version.to_string(),
        ];
        let mut need = true;

        for line in self.syntax.lines_mut("replace") {
            let Ok(replace) = parse_replace(&line.args) else {
                continue;
            };
            if replace.old_path != module {
                continue;
            }
            if need {
                line.args = tokens.clone();
                need = false;
            } else {
                line.removed = true;
            }
        }

        if need {
            self.syntax.add_line("replace", tokens);
        }
    }
}

impl Manifest for GoMod {
    fn pinned(&self, module: &str) -> Option<String> {
        self.requires()
            .into_iter()
            .find(|r| r.path == module)
            .map(|r| r.version)
    }

    fn set_pinned(&mut self, module: &str, version: &str) -> Result<(), ManifestError> {
        check_module_path(module)?;
        check_version(module, version)?;
        self.add_require(module, version);
        Ok(())
    }

    fn has_override(&self, module: &str) -> bool {
        self.replaces().iter().any(|r| r.old_path == module)
    }

    fn set_override(&mut self, module: &str, version: &str) -> Result<(), ManifestError> {
        check_module_path(module)?;
        check_version(module, version)?;
        if !self.has_override(module) {
            return Err(ManifestError::ReplaceNotFound {
                module: module.to_string(),
            });
        }

        self.drop_replace(module);
        self.add_replace(module, module, version);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.syntax.cleanup();
    }

    fn serialize(&self) -> Result<Vec<u8>, ManifestError> {
        let text = self.syntax.format();
        // Every edit goes through the parser's rules, so re-parsing must succeed.
        FileSyntax::parse(&text).map_err(|msg| {
            ManifestError::parse_error(&self.path, format!("formatted output invalid: {}", msg))
        })?;
        Ok(text.into_bytes())
    }
}

/// Check verbs and argument shapes of a freshly parsed file
fn validate(syntax: &FileSyntax) -> Result<(), String> {
    for stmt in &syntax.stmts {
        let (verb, line_no) = match stmt {
            Stmt::Directive { verb, line } => (verb, line.line_no),
            Stmt::Block { verb, line_no, .. } => (verb, *line_no),
            _ => continue,
        };
        if !KNOWN_VERBS.contains(&verb.as_str()) {
            return Err(format!("{}: unknown directive: {}", line_no, verb));
        }
    }

    for verb in KNOWN_VERBS {
        for line in syntax.lines(verb) {
            check_line(verb, line).map_err(|msg| format!("{}: {}", line.line_no, msg))?;
        }
    }

    Ok(())
}

fn check_line(verb: &str, line: &Line) -> Result<(), String> {
    let args = &line.args;
    match verb {
        "module" | "go" | "toolchain" if args.len() != 1 => {
            Err(format!("usage: {} {}", verb, placeholder(verb)))
        }
        "require" | "exclude" if args.len() != 2 => {
            Err(format!("usage: {} module/path v1.2.3", verb))
        }
        "require" | "exclude" if !unquote(&args[1]).starts_with(VERSION_PREFIX) => Err(format!(
            "invalid version {}: must start with '{}'",
            args[1], VERSION_PREFIX
        )),
        "replace" => parse_replace(args).map(|_| ()),
        _ => Ok(()),
    }
}

fn placeholder(verb: &str) -> &'static str {
    match verb {
        "module" => "module/path",
        "go" => "1.23",
        _ => "go1.23.0",
    }
}

fn parse_replace(args: &[String]) -> Result<Replace, String> {
    let arrow = args
        .iter()
        .position(|t| t == "=>")
        .ok_or_else(|| REPLACE_USAGE.to_string())?;
    let (old, new) = (&args[..arrow], &args[arrow + 1..]);

    if old.is_empty() || old.len() > 2 || new.is_empty() || new.len() > 2 {
        return Err(REPLACE_USAGE.to_string());
    }

    Ok(Replace {
        old_path: unquote(&old[0]),
        old_version: old.get(1).map(|v| unquote(v)),
        new_path: unquote(&new[0]),
        new_version: new.get(1).map(|v| unquote(v)),
    })
}

fn check_module_path(module: &str) -> Result<(), ManifestError> {
    if module.is_empty() || module.contains(['\n', '\r']) {
        return Err(ManifestError::InvalidModulePath {
            module: module.to_string(),
            message: "module path must be a non-empty single line".to_string(),
        });
    }
    Ok(())
}

fn check_version(module: &str, version: &str) -> Result<(), ManifestError> {
    if crate::domain::parse_go_version(version).is_none() {
        return Err(ManifestError::invalid_version(
            module,
            version,
            format!("expected '{}' followed by a semantic version", VERSION_PREFIX),
        ));
    }
    Ok(())
}

/// Quote a token only when go.mod syntax requires it
fn auto_quote(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s.contains("//")
        || s.chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '`' | '(' | ')' | '\\'));

    if needs_quotes {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

fn unquote(token: &str) -> String {
    if token.len() >= 2 && token.starts_with('`') && token.ends_with('`') {
        return token[1..token.len() - 1].to_string();
    }
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        let inner = &token[1..token.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(c);
            }
        }
        return out;
    }
    token.to_string()
}
