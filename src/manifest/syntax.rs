//! Line-preserving syntax tree for go.mod files
//!
//! The tree keeps blank lines, comment lines and suffix comments so a
//! rewritten file differs from the original only where a version moved.
//! Lines are never deleted in place: edits mark them removed and
//! [`FileSyntax::cleanup`] drops them together with empty blocks.

use regex::Regex;
use std::sync::LazyLock;

/// A directive line: arguments after the verb plus an optional suffix comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    /// Raw tokens as written (quoted tokens keep their quotes)
    pub args: Vec<String>,
    /// Suffix comment including the leading `//`
    pub comment: Option<String>,
    /// 1-based source line, 0 for lines added after parsing
    pub line_no: usize,
    /// Marked for removal by the next cleanup pass
    pub removed: bool,
}

impl Line {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            comment: None,
            line_no: 0,
            removed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BlockItem {
    Blank,
    Comment(String),
    Line(Line),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Stmt {
    Blank,
    Comment(String),
    /// `verb args... // comment`
    Directive { verb: String, line: Line },
    /// `verb (` ... `)`
    Block {
        verb: String,
        line_no: usize,
        open_comment: Option<String>,
        items: Vec<BlockItem>,
        close_comment: Option<String>,
    },
}

/// Parsed go.mod file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileSyntax {
    pub stmts: Vec<Stmt>,
}

// One token or a trailing comment at the start of the remaining input
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:(?P<comment>//.*)|(?P<token>"(?:[^"\\]|\\.)*"|`[^`]*`|[()]|[^\s()"`]+))"#)
        .unwrap()
});

/// Split one physical line into tokens and an optional `//` comment
fn tokenize(text: &str, line_no: usize) -> Result<(Vec<String>, Option<String>), String> {
    let mut tokens = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Ok((tokens, None));
        }

        if rest.starts_with("/*") {
            return Err(format!(
                "{}: mod files must use // comments, not /* */ comments",
                line_no
            ));
        }

        // Only an unclosed quote can fail to match
        let Some(caps) = TOKEN_RE.captures(rest) else {
            let what = if rest.starts_with('`') {
                "raw string"
            } else {
                "quoted string"
            };
            return Err(format!("{}: unterminated {}", line_no, what));
        };

        if let Some(comment) = caps.name("comment") {
            return Ok((tokens, Some(comment.as_str().trim_end().to_string())));
        }

        let mut token = caps.name("token").map_or("", |m| m.as_str());
        // A bare word ends where a comment starts
        if !token.starts_with(['"', '`']) {
            if let Some(i) = token.find("//") {
                token = &token[..i];
            }
        }

        tokens.push(token.to_string());
        rest = &rest[token.len()..];
    }
}

impl FileSyntax {
    /// Parse go.mod text; errors are `line: message`
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut stmts = Vec::new();
        // (verb, start line, open comment, items)
        let mut open_block: Option<(String, usize, Option<String>, Vec<BlockItem>)> = None;

        for (idx, text) in content.lines().enumerate() {
            let line_no = idx + 1;
            let (tokens, comment) = tokenize(text, line_no)?;

            if let Some((verb, start, open_comment, mut items)) = open_block.take() {
                if tokens.is_empty() {
                    items.push(match comment {
                        Some(c) => BlockItem::Comment(c),
                        None => BlockItem::Blank,
                    });
                    open_block = Some((verb, start, open_comment, items));
                    continue;
                }

                if tokens.len() == 1 && tokens[0] == ")" {
                    stmts.push(Stmt::Block {
                        verb,
                        line_no: start,
                        open_comment,
                        items,
                        close_comment: comment,
                    });
                    continue;
                }

                if tokens.iter().any(|t| t == "(" || t == ")") {
                    return Err(format!("{}: unexpected parenthesis in {} block", line_no, verb));
                }

                items.push(BlockItem::Line(Line {
                    args: tokens,
                    comment,
                    line_no,
                    removed: false,
                }));
                open_block = Some((verb, start, open_comment, items));
                continue;
            }

            if tokens.is_empty() {
                stmts.push(match comment {
                    Some(c) => Stmt::Comment(c),
                    None => Stmt::Blank,
                });
                continue;
            }

            if tokens[0] == "(" || tokens[0] == ")" {
                return Err(format!("{}: unexpected '{}'", line_no, tokens[0]));
            }

            if tokens.len() == 2 && tokens[1] == "(" {
                open_block = Some((tokens[0].clone(), line_no, comment, Vec::new()));
                continue;
            }

            if tokens.iter().any(|t| t == "(" || t == ")") {
                return Err(format!("{}: unexpected parenthesis", line_no));
            }

            let mut tokens = tokens;
            let verb = tokens.remove(0);
            stmts.push(Stmt::Directive {
                verb,
                line: Line {
                    args: tokens,
                    comment,
                    line_no,
                    removed: false,
                },
            });
        }

        if let Some((verb, start, _, _)) = open_block {
            return Err(format!(
                "{}: unexpected EOF, missing ) for {} block",
                start, verb
            ));
        }

        Ok(Self { stmts })
    }

    /// Live lines of the given verb, in file order
    pub fn lines<'a>(&'a self, verb: &'a str) -> impl Iterator<Item = &'a Line> + 'a {
        self.stmts
            .iter()
            .flat_map(move |stmt| -> Box<dyn Iterator<Item = &'a Line> + 'a> {
                match stmt {
                    Stmt::Directive { verb: v, line } if v == verb => {
                        Box::new(std::iter::once(line))
                    }
                    Stmt::Block { verb: v, items, .. } if v == verb => {
                        Box::new(items.iter().filter_map(|item| match item {
                            BlockItem::Line(line) => Some(line),
                            _ => None,
                        }))
                    }
                    _ => Box::new(std::iter::empty()),
                }
            })
            .filter(|line| !line.removed)
    }

    /// Mutable live lines of the given verb, in file order
    pub fn lines_mut(&mut self, verb: &str) -> Vec<&mut Line> {
        let mut out = Vec::new();
        for stmt in self.stmts.iter_mut() {
            match stmt {
                Stmt::Directive { verb: v, line } if v.as_str() == verb => {
                    if !line.removed {
                        out.push(line);
                    }
                }
                Stmt::Block { verb: v, items, .. } if v.as_str() == verb => {
                    for item in items.iter_mut() {
                        if let BlockItem::Line(line) = item {
                            if !line.removed {
                                out.push(line);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Add a line after the last statement with the same verb
    ///
    /// A single-line directive is turned into a block holding both lines;
    /// a removed one is followed by a new directive so the line takes its
    /// place. Without any statement of that verb the line is appended at
    /// the end.
    pub fn add_line(&mut self, verb: &str, args: Vec<String>) {
        let last = self.stmts.iter().rposition(|stmt| match stmt {
            Stmt::Directive { verb: v, .. } | Stmt::Block { verb: v, .. } => v == verb,
            _ => false,
        });

        let Some(idx) = last else {
            if !matches!(self.stmts.last(), None | Some(Stmt::Blank)) {
                self.stmts.push(Stmt::Blank);
            }
            self.stmts.push(Stmt::Directive {
                verb: verb.to_string(),
                line: Line::new(args),
            });
            return;
        };

        if matches!(&self.stmts[idx], Stmt::Directive { line, .. } if line.removed) {
            self.stmts.insert(
                idx + 1,
                Stmt::Directive {
                    verb: verb.to_string(),
                    line: Line::new(args),
                },
            );
            return;
        }

        match &mut self.stmts[idx] {
            Stmt::Block { items, .. } => items.push(BlockItem::Line(Line::new(args))),
            stmt => {
                let placeholder = Stmt::Blank;
                if let Stmt::Directive { verb, line } = std::mem::replace(stmt, placeholder) {
                    let line_no = line.line_no;
                    *stmt = Stmt::Block {
                        verb,
                        line_no,
                        open_comment: None,
                        items: vec![BlockItem::Line(line), BlockItem::Line(Line::new(args))],
                        close_comment: None,
                    };
                }
            }
        }
    }

    /// Drop removed lines and empty blocks; collapse one-line blocks
    ///
    /// A collapsed block's leading comments move above the directive and
    /// its `(` comment joins the line's suffix. Blocks with comments after
    /// their last line or on the `)` stay blocks.
    pub fn cleanup(&mut self) {
        let stmts = std::mem::take(&mut self.stmts);

        for stmt in stmts {
            match stmt {
                Stmt::Directive { line, .. } if line.removed => {}
                Stmt::Block {
                    verb,
                    line_no,
                    open_comment,
                    mut items,
                    close_comment,
                } => {
                    items.retain(|item| !matches!(item, BlockItem::Line(line) if line.removed));
                    let line_count = items
                        .iter()
                        .filter(|item| matches!(item, BlockItem::Line(_)))
                        .count();
                    if line_count == 0 {
                        continue;
                    }

                    // Comments after the last line have nowhere to go once the block is gone
                    let last_line = items
                        .iter()
                        .rposition(|item| matches!(item, BlockItem::Line(_)))
                        .unwrap_or(0);
                    let trailing_comments = items[last_line + 1..]
                        .iter()
                        .any(|item| matches!(item, BlockItem::Comment(_)));

                    if line_count == 1 && !trailing_comments && close_comment.is_none() {
                        let mut single = None;
                        for item in items {
                            match item {
                                BlockItem::Comment(c) => self.stmts.push(Stmt::Comment(c)),
                                BlockItem::Line(line) => single = Some(line),
                                BlockItem::Blank => {}
                            }
                        }
                        if let Some(mut line) = single {
                            if let Some(open) = open_comment {
                                line.comment = Some(match line.comment.take() {
                                    Some(own) => format!("{} {}", own, open),
                                    None => open,
                                });
                            }
                            self.stmts.push(Stmt::Directive { verb, line });
                        }
                        continue;
                    }

                    self.stmts.push(Stmt::Block {
                        verb,
                        line_no,
                        open_comment,
                        items,
                        close_comment,
                    });
                }
                other => self.stmts.push(other),
            }
        }
    }

    /// Render the canonical text form
    pub fn format(&self) -> String {
        fn emit(out: &mut String, text: String, pending_blank: &mut bool) {
            if *pending_blank && !out.is_empty() {
                out.push('\n');
            }
            *pending_blank = false;
            out.push_str(&text);
            out.push('\n');
        }

        let mut out = String::new();
        let mut pending_blank = false;

        for stmt in &self.stmts {
            match stmt {
                Stmt::Blank => pending_blank = true,
                Stmt::Comment(c) => emit(&mut out, c.clone(), &mut pending_blank),
                Stmt::Directive { verb, line } => {
                    if line.removed {
                        continue;
                    }
                    emit(&mut out, render(Some(verb), line), &mut pending_blank);
                }
                Stmt::Block {
                    verb,
                    open_comment,
                    items,
                    close_comment,
                    ..
                } => {
                    let mut text = format!("{} (", verb);
                    if let Some(c) = open_comment {
                        text.push(' ');
                        text.push_str(c);
                    }
                    text.push('\n');

                    let mut block_blank = false;
                    for item in items {
                        let rendered = match item {
                            BlockItem::Blank => {
                                block_blank = true;
                                continue;
                            }
                            BlockItem::Comment(c) => c.clone(),
                            BlockItem::Line(line) if line.removed => continue,
                            BlockItem::Line(line) => render(None, line),
                        };
                        if block_blank && !text.ends_with("(\n") {
                            text.push('\n');
                        }
                        block_blank = false;
                        text.push('\t');
                        text.push_str(&rendered);
                        text.push('\n');
                    }

                    text.push(')');
                    if let Some(c) = close_comment {
                        text.push(' ');
                        text.push_str(c);
                    }
                    emit(&mut out, text, &mut pending_blank);
                }
            }
        }

        out
    }
}

fn render(verb: Option<&str>, line: &Line) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(line.args.len() + 2);
    if let Some(verb) = verb {
        parts.push(verb);
    }
    parts.extend(line.args.iter().map(String::as_str));
    if let Some(c) = &line.comment {
        parts.push(c);
    }
    parts.join(" ")
}
