use std::fs;
use std::path::Path;

use super::ir::{Operation, OperationKind, Value};
use super::keywords::Keywords;
use super::{Compilation, Diagnostic, Program};
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::util::case;

const COMMENT: &str = "//";
const TEXT_OPEN: char = '[';
const TEXT_CLOSE: char = ']';
const SELECT_KEYWORD: &str = "select";

/// Compile macro source with the default configuration.
pub fn compile(source: &str) -> Compilation {
    Compiler::default().compile(source)
}

/// Turns macro source into a [`Program`] plus diagnostics.
#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    keywords: &'static Keywords,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    /// Create a compiler using `config` and the built-in keyword tables.
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            keywords: Keywords::global(),
        }
    }

    /// Compile every line of `source`.
    ///
    /// Compilation never stops early: a bad line contributes a diagnostic and
    /// whatever partial operation could be built, and later lines are still
    /// compiled.
    pub fn compile(&self, source: &str) -> Compilation {
        let mut operations = Vec::new();
        let mut diagnostics = Vec::new();
        for (index, raw) in source.split('\n').enumerate() {
            let mut line = LineCompiler {
                compiler: self,
                number: index + 1,
                raw,
                diagnostics: &mut diagnostics,
            };
            if let Some(operation) = line.compile() {
                operations.push(operation);
            }
        }

        tracing::debug!(
            operations = operations.len(),
            diagnostics = diagnostics.len(),
            "compiled macro"
        );

        Compilation {
            program: Program::new(operations, source),
            diagnostics: if diagnostics.is_empty() {
                None
            } else {
                Some(diagnostics)
            },
        }
    }

    /// Read and compile the macro stored at `path`.
    ///
    /// Unlike [`Compiler::compile`], a macro with diagnostics is an error
    /// here, so the returned program is always safe to play.
    pub fn load_program(&self, path: &Path) -> Result<Program> {
        let source = fs::read_to_string(path)?;
        Ok(self.compile(&source).into_program()?)
    }

    /// Read a count from the leading characters of `token`.
    ///
    /// At most `count_digits` characters are considered; anything that does
    /// not yield a number of at least 1 falls back to the default count.
    pub fn parse_count(&self, token: &str) -> usize {
        let prefix: String = token.chars().take(self.config.count_digits).collect();
        let unsigned = prefix.strip_prefix('+').unwrap_or(&prefix);
        let digits: String = unsigned
            .chars()
            .take_while(|ch| ch.is_ascii_digit())
            .collect();
        match digits.parse::<usize>() {
            Ok(count) if count >= 1 => count,
            _ => self.config.default_count,
        }
    }
}

struct LineCompiler<'c, 'd> {
    compiler: &'c Compiler,
    number: usize,
    raw: &'c str,
    diagnostics: &'d mut Vec<Diagnostic>,
}

impl LineCompiler<'_, '_> {
    fn compile(&mut self) -> Option<Operation> {
        let line = strip_comment(self.raw.trim());
        if line.is_empty() {
            return None;
        }
        if let Some(text) = text_literal(line) {
            return Some(Operation::insert_text(text, self.number));
        }
        let (line, select) = strip_select(line);

        let mut operation = Operation::new(OperationKind::Move, self.number);
        operation.select = select;

        let mut words = case::words(line);
        let Some(first) = words.next() else {
            self.report(SELECT_KEYWORD);
            return Some(operation);
        };
        let preset = self.compiler.keywords.operation(first).copied();
        match preset {
            Some(preset) => preset.apply(&mut operation),
            None => self.report(first),
        }

        let Some(second) = words.next() else {
            // A move needs a direction.
            if preset.is_some_and(|preset| preset.takes_movement()) {
                self.report(first);
            }
            return Some(operation);
        };
        if preset.is_some_and(|preset| !preset.takes_movement()) {
            self.report(second);
            return Some(operation);
        }

        let keyword = second.split(TEXT_OPEN).next().unwrap_or(second);
        match self.compiler.keywords.movement(keyword) {
            Some(preset) if preset.takes_pattern() => {
                preset.apply(&mut operation);
                match self.match_value(line) {
                    Some(value) => operation.value = value,
                    None => self.report(keyword),
                }
                return Some(operation);
            }
            Some(preset) => preset.apply(&mut operation),
            None => self.report(second),
        }

        let count = match words.next() {
            Some(token) => self.compiler.parse_count(token),
            None => self.compiler.config.default_count,
        };
        operation.value = Value::Count(count);
        Some(operation)
    }

    /// `[pattern]` between the first `[` and the last `]`, then a count.
    fn match_value(&self, line: &str) -> Option<Value> {
        let open = line.find(TEXT_OPEN)?;
        let close = line.rfind(TEXT_CLOSE)?;
        if close <= open + 1 {
            return None;
        }
        let pattern = &line[open + 1..close];
        let rest = line[close + 1..].trim();
        let occurrence = match case::words(rest).next() {
            Some(token) => self.compiler.parse_count(token),
            None => self.compiler.config.default_count,
        };
        Some(Value::Match {
            pattern: pattern.to_string(),
            occurrence,
        })
    }

    fn report(&mut self, token: &str) {
        tracing::debug!(line = self.number, token, "unrecognized token");
        self.diagnostics.push(Diagnostic {
            line_number: self.number,
            raw_line: self.raw.trim_end_matches('\r').to_string(),
            unrecognized_token: token.to_string(),
        });
    }
}

/// Text of a `[literal]` line.
fn text_literal(line: &str) -> Option<&str> {
    line.strip_prefix(TEXT_OPEN)?.strip_suffix(TEXT_CLOSE)
}

/// Drop a trailing comment. A `//` inside an unclosed `[...]` span is text.
fn strip_comment(line: &str) -> &str {
    for (index, _) in line.match_indices(COMMENT) {
        let before = &line[..index];
        let inside_span = before
            .find(TEXT_OPEN)
            .is_some_and(|open| !before[open..].contains(TEXT_CLOSE));
        if !inside_span {
            return before.trim_end();
        }
    }
    line
}

/// Remove a final `select` token.
fn strip_select(line: &str) -> (&str, bool) {
    if let Some(head) = line.strip_suffix(SELECT_KEYWORD) {
        if head.is_empty() || head.ends_with(case::is_blank) {
            return (head.trim_end(), true);
        }
    }
    (line, false)
}
