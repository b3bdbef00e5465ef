//! Minimal reader for Steam's text VDF (KeyValues) format.
//!
//! Only the line grammar `"key" "value"` is interpreted. Section headers
//! (`"AppState"`), braces and `//` comments are skipped, so nested keys are
//! returned flattened in document order.

use std::path::PathBuf;

/// Splits one line into its quoted tokens.
///
/// Supports the escapes Steam writes (`\\`, `\"`, `\n`, `\t`). An
/// unterminated token is dropped.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let mut token = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some('n') => token.push('\n'),
                            Some('t') => token.push('\t'),
                            Some('\\') => token.push('\\'),
                            Some('"') => token.push('"'),
                            Some(other) => {
                                token.push('\\');
                                token.push(other);
                            }
                            None => token.push('\\'),
                        },
                        _ => token.push(c),
                    }
                }
                if closed {
                    tokens.push(token);
                }
            }
            '/' if chars.peek() == Some(&'/') => break,
            _ => {}
        }
    }

    tokens
}

/// Returns every `"key" "value"` pair in the text, in document order.
///
/// Lines with any other token count are ignored.
pub fn key_values(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = tokenize_line(line);
            if tokens.len() != 2 {
                return None;
            }
            let value = tokens.pop()?;
            let key = tokens.pop()?;
            Some((key, value))
        })
        .collect()
}

/// Returns the value of the first pair whose key matches (case-insensitive).
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}

/// Extracts the library folder paths declared in `libraryfolders.vdf`.
///
/// Both the current layout (`"path"` inside numbered sections) and the
/// legacy one (`"1" "D:\\SteamLibrary"`) are recognized.
pub fn library_folder_paths(text: &str) -> Vec<PathBuf> {
    key_values(text)
        .into_iter()
        .filter(|(key, value)| {
            !value.is_empty()
                && (key.eq_ignore_ascii_case("path")
                    || (key.parse::<u32>().is_ok() && looks_like_path(value)))
        })
        .map(|(_, value)| PathBuf::from(value))
        .collect()
}

fn looks_like_path(value: &str) -> bool {
    value.starts_with('/') || value.contains(":\\") || value.contains(":/")
}
