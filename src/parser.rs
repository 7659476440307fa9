//! Statement parser
//!
//! Parses a single script statement into a command word and arguments:
//! - The first bare word is the command name
//! - Single-quote strings disable word splitting and variable expansion
//! - `''` inside quotes produces a literal `'`
//! - `#` outside quotes terminates the argument list (trailing comment)
//! - Variable expansion (`$NAME`, `${NAME}`) happens in the engine, not
//!   here — the parser preserves fragments with quoted/unquoted tracking.

/// A fragment of a parsed argument, tracking whether it was quoted.
/// Quoted fragments suppress variable expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// The text content of this fragment
    pub text: String,
    /// If true, this fragment was inside single quotes — taken verbatim
    pub quoted: bool,
}

/// A parsed statement
#[derive(Debug, Clone)]
pub struct Statement {
    /// Command name
    pub command: String,
    /// Raw arguments as fragments (quoted/unquoted tracking for expansion)
    pub raw_args: Vec<Vec<Fragment>>,
    /// Original statement text (for error messages)
    pub raw: String,
}

/// Characters that separate arguments
const ARG_SEP_CHARS: &[char] = &[' ', '\t', '\r', '\n', '#'];

/// Parse error returned when a statement has invalid syntax
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse one statement.
///
/// Returns `Ok(None)` for blank and comment-only statements.
/// Returns `Err(ParseError)` for syntax errors (unterminated quotes, a
/// quoted command word).
pub fn parse_statement(text: &str) -> Result<Option<Statement>, ParseError> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    let mut words: Vec<Vec<Fragment>> = Vec::new();
    let mut current: Vec<Fragment> = Vec::new();
    let mut start: Option<usize> = None; // start of current text chunk
    let mut quoted = false;

    let mut i = 0;
    loop {
        if !quoted && (i >= len || ARG_SEP_CHARS.contains(&(bytes[i] as char))) {
            // Found a word-separating space or #
            if let Some(s) = start {
                if s < i {
                    current.push(Fragment {
                        text: text[s..i].to_string(),
                        quoted: false,
                    });
                }
                start = None;
            }
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            if i >= len || bytes[i] == b'#' {
                break;
            }
            i += 1;
            continue;
        }
        if i >= len {
            return Err(ParseError {
                message: "unterminated quoted argument".into(),
            });
        }
        if bytes[i] == b'\'' {
            if !quoted {
                // Starting a quoted chunk
                if let Some(s) = start {
                    current.push(Fragment {
                        text: text[s..i].to_string(),
                        quoted: false,
                    });
                }
                start = Some(i + 1);
                quoted = true;
                i += 1;
                continue;
            }
            // Inside quotes: check for '' (escaped quote)
            if i + 1 < len && bytes[i + 1] == b'\'' {
                current.push(Fragment {
                    text: text[start.unwrap_or(i)..i].to_string(),
                    quoted: true,
                });
                start = Some(i + 1);
                i += 2; // skip both quotes
                continue;
            }
            // Ending a quoted chunk
            current.push(Fragment {
                text: text[start.unwrap_or(i)..i].to_string(),
                quoted: true,
            });
            start = Some(i + 1);
            quoted = false;
            i += 1;
            continue;
        }
        // Regular character — start tracking if not already
        if start.is_none() {
            start = Some(i);
        }
        i += 1;
    }

    let mut words = words.into_iter();
    let command_word = match words.next() {
        Some(word) => word,
        None => return Ok(None), // blank or comment-only
    };

    // The command word must be a single unquoted fragment
    if command_word.len() != 1 || command_word[0].quoted {
        return Err(ParseError {
            message: "command name must be a bare word".into(),
        });
    }

    Ok(Some(Statement {
        command: command_word[0].text.clone(),
        raw_args: words.collect(),
        raw: text.to_string(),
    }))
}

/// Expand variables in a string.
/// Supports `$NAME` and `${NAME}` syntax; undefined variables expand to
/// the empty string.
pub fn expand(s: &str, lookup: &dyn Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        // Check for ${NAME} syntax
        if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '}' {
                    chars.next();
                    break;
                }
                name.push(c);
                chars.next();
            }
            result.push_str(&lookup(&name).unwrap_or_default());
        } else {
            // $NAME syntax - read until non-alphanumeric/underscore
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }

            if name.is_empty() {
                result.push('$');
            } else {
                result.push_str(&lookup(&name).unwrap_or_default());
            }
        }
    }

    result
}
