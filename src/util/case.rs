//! Case and identifier-syntax conversions.
//!
//! Every function here is total: empty input, input without letters and
//! single-character input all produce a (possibly unchanged) string. Apart
//! from [`toggle_case`] and [`remove_punctuation`], conversions work line by
//! line, trim each line, and join the results back with the separator the
//! input used (`\r\n` when present, otherwise `\n`).

/// Separator used by member-access syntax (`a.b.c`).
pub const MEMBER_SEPARATOR: &str = ".";
/// Separator used by kebab syntax (`a-b-c`).
pub const KEBAB_SEPARATOR: &str = "-";
/// Separator used by snake syntax (`a_b_c`).
pub const SNAKE_SEPARATOR: &str = "_";

const PUNCTUATION: [char; 4] = ['.', '/', '-', '_'];

/// Whether `ch` counts as a blank between words.
pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Flip the case of every letter; characters without case pass through.
pub fn toggle_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_lowercase() {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Capitalize each blank-delimited word and lower-case the rest of it.
pub fn title_case(text: &str) -> String {
    for_each_line(text, title_case_line)
}

/// Title-case each line, lower the first character, and drop the blanks.
pub fn camel_case(text: &str) -> String {
    for_each_line(text, |line| {
        let titled: String = title_case_line(line)
            .chars()
            .filter(|ch| !is_blank(*ch))
            .collect();
        lower_first(&titled)
    })
}

/// Re-join the words of each line with `separator`.
pub fn programming_syntax(text: &str, separator: &str) -> String {
    for_each_line(text, |line| words(line).collect::<Vec<_>>().join(separator))
}

/// Insert a blank wherever the letter case changes inside a word.
///
/// A lower-to-upper change splits before the upper-case letter
/// (`camelCase` → `camel Case`). An upper-to-lower change splits before the
/// last letter of a run of capitals, so acronyms stay together
/// (`XMLHttp` → `XML Http`). Blank runs between words are preserved.
pub fn split_by_case(text: &str) -> String {
    for_each_line(text, split_line_by_case)
}

/// Replace `.`, `/`, `-` and `_` with blanks.
pub fn remove_punctuation(text: &str) -> String {
    text.chars()
        .map(|ch| if PUNCTUATION.contains(&ch) { ' ' } else { ch })
        .collect()
}

/// Blank-delimited words of `line`, with empty tokens discarded.
pub fn words(line: &str) -> impl Iterator<Item = &str> {
    line.split(is_blank).filter(|word| !word.is_empty())
}

fn line_separator(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

fn for_each_line(text: &str, convert: impl Fn(&str) -> String) -> String {
    let separator = line_separator(text);
    text.split(separator)
        .map(|line| convert(line.trim()))
        .collect::<Vec<_>>()
        .join(separator)
}

fn title_case_line(line: &str) -> String {
    words(line)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_line_by_case(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut word: Vec<char> = Vec::new();
    for ch in line.chars() {
        if is_blank(ch) {
            split_word_by_case(&word, &mut out);
            word.clear();
            out.push(ch);
        } else {
            word.push(ch);
        }
    }
    split_word_by_case(&word, &mut out);
    out
}

fn split_word_by_case(word: &[char], out: &mut String) {
    for (index, &ch) in word.iter().enumerate() {
        if index > 0 {
            let previous = word[index - 1];
            if previous.is_lowercase() && ch.is_uppercase() {
                out.push(' ');
            } else if previous.is_uppercase()
                && ch.is_lowercase()
                && index >= 2
                && word[index - 2].is_uppercase()
            {
                out.pop();
                out.push(' ');
                out.push(previous);
            }
        }
        out.push(ch);
    }
}
