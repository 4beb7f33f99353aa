//! HTML tag scanner
//!
//! Fast, simple extraction of tags and text runs from raw markup.
//! No DOM construction, no entity decoding, no error reporting; unparseable
//! input degrades to text.

/// An attribute on an opening tag, e.g. `alt="photo"` or bare `defer`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name, lowercased.
    pub name: String,
    /// Attribute value; `None` for bare attributes like `defer`.
    pub value: Option<String>,
}

/// An opening tag with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Tag name, lowercased.
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

/// A scanned token: opening tag, closing tag, or text run.
///
/// Comments, doctype, and processing instructions are skipped entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Open(Tag),
    Close(String),
    Text(String),
}

/// Scan markup into a token stream.
///
/// The contents of `<script>` and `<style>` elements are raw text: they are
/// consumed up to the matching close tag without tag interpretation, so a
/// `<` inside inline code never produces a phantom element.
pub fn scan(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            // Text run up to the next tag opener
            let end = find_byte(bytes, pos, b'<').unwrap_or(bytes.len());
            push_text(&mut tokens, &input[pos..end]);
            pos = end;
            continue;
        }

        let rest = &input[pos..];
        if rest.starts_with("<!--") {
            // Comment: skip to terminator, or end of input if unterminated
            pos = match input[pos + 4..].find("-->") {
                Some(i) => pos + 4 + i + 3,
                None => bytes.len(),
            };
        } else if rest.starts_with("</") {
            let (name, after_name) = read_name(input, pos + 2);
            pos = skip_past_gt(bytes, after_name);
            if !name.is_empty() {
                tokens.push(Token::Close(name));
            }
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            // Doctype or processing instruction
            pos = skip_past_gt(bytes, pos + 2);
        } else if bytes.get(pos + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let (tag, after_tag) = read_tag(input, pos + 1);
            pos = after_tag;

            let raw_text = !tag.self_closing && matches!(tag.name.as_str(), "script" | "style");
            let name = tag.name.clone();
            tokens.push(Token::Open(tag));

            if raw_text {
                pos = skip_raw_content(input, pos, &name, &mut tokens);
            }
        } else {
            // Stray '<' that opens nothing: treat it as text
            let end = find_byte(bytes, pos + 1, b'<').unwrap_or(bytes.len());
            push_text(&mut tokens, &input[pos..end]);
            pos = end;
        }
    }

    tokens
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if !text.trim().is_empty() {
        tokens.push(Token::Text(text.to_string()));
    }
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == needle).map(|i| from + i)
}

/// Advance past the next '>' (or to end of input).
fn skip_past_gt(bytes: &[u8], from: usize) -> usize {
    match find_byte(bytes, from, b'>') {
        Some(i) => i + 1,
        None => bytes.len(),
    }
}

/// Read a tag or attribute name: ASCII letters, digits, '-', ':'.
fn read_name(input: &str, from: usize) -> (String, usize) {
    let bytes = input.as_bytes();
    let mut end = from;
    while end < bytes.len()
        && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'-' || bytes[end] == b':')
    {
        end += 1;
    }
    (input[from..end].to_ascii_lowercase(), end)
}

/// Read an opening tag starting just after '<'. Returns the tag and the
/// position just after the closing '>'.
fn read_tag(input: &str, from: usize) -> (Tag, usize) {
    let bytes = input.as_bytes();
    let (name, mut pos) = read_name(input, from);
    let mut attributes = Vec::new();
    let mut self_closing = false;

    loop {
        // Skip whitespace between attributes
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        match bytes.get(pos) {
            None => break,
            Some(b'>') => {
                pos += 1;
                break;
            }
            Some(b'/') => {
                pos += 1;
                if bytes.get(pos) == Some(&b'>') {
                    self_closing = true;
                    pos += 1;
                    break;
                }
            }
            Some(_) => {
                let (attr_name, after_name) = read_attr_name(input, pos);
                if attr_name.is_empty() {
                    // Unparseable byte inside the tag; skip it
                    pos += 1;
                    continue;
                }
                pos = after_name;

                // Skip whitespace around '='
                while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                    pos += 1;
                }
                let value = if bytes.get(pos) == Some(&b'=') {
                    pos += 1;
                    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                        pos += 1;
                    }
                    let (v, after_value) = read_attr_value(input, pos);
                    pos = after_value;
                    Some(v)
                } else {
                    None
                };

                attributes.push(Attribute {
                    name: attr_name,
                    value,
                });
            }
        }
    }

    (
        Tag {
            name,
            attributes,
            self_closing,
        },
        pos,
    )
}

/// Attribute names are laxer than tag names: anything up to whitespace,
/// '=', '/', or '>'.
fn read_attr_name(input: &str, from: usize) -> (String, usize) {
    let bytes = input.as_bytes();
    let mut end = from;
    while end < bytes.len()
        && !bytes[end].is_ascii_whitespace()
        && !matches!(bytes[end], b'=' | b'/' | b'>')
    {
        end += 1;
    }
    (input[from..end].to_ascii_lowercase(), end)
}

/// Read a quoted or unquoted attribute value.
fn read_attr_value(input: &str, from: usize) -> (String, usize) {
    let bytes = input.as_bytes();
    match bytes.get(from) {
        Some(&quote @ (b'"' | b'\'')) => {
            let end = find_byte(bytes, from + 1, quote).unwrap_or(bytes.len());
            let value = input[from + 1..end].to_string();
            (value, (end + 1).min(bytes.len()))
        }
        _ => {
            let mut end = from;
            while end < bytes.len()
                && !bytes[end].is_ascii_whitespace()
                && !matches!(bytes[end], b'>' | b'/')
            {
                end += 1;
            }
            (input[from..end].to_string(), end)
        }
    }
}

/// Consume the raw text content of a `<script>` or `<style>` element up to
/// its case-insensitive close tag. Returns the position of the close tag so
/// the main loop emits the `Close` token itself.
fn skip_raw_content(input: &str, from: usize, name: &str, tokens: &mut Vec<Token>) -> usize {
    let needle = format!("</{}", name);
    let lower = input[from..].to_ascii_lowercase();
    match lower.find(&needle) {
        Some(i) => {
            push_text(tokens, &input[from..from + i]);
            from + i
        }
        None => {
            push_text(tokens, &input[from..]);
            input.len()
        }
    }
}
