use crate::ast::Attributes;
use crate::parsing::inline::cursor::Cursor;

pub const OPEN: u8 = b'{';
pub const CLOSE: u8 = b'}';
pub const ID_PREFIX: u8 = b'#';
pub const CLASS_PREFIX: u8 = b'.';

/// Identifier characters of `#id` and `.class`. Every byte of a non-ASCII
/// character qualifies.
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':') || b >= 0x80
}

fn is_key_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'_' | b':')
}

fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-')
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Parses an attribute block `{...}` at the cursor.
///
/// On success the cursor sits just past the closing `}`. On failure it is
/// left where it was.
///
/// - `#ident` sets `id`
/// - `.ident` appends to a space-separated `class`
/// - `key=value` or `key="quoted value"` sets `key`
///
/// A later token for the same name replaces the earlier value (`class`
/// accumulates instead).
pub fn parse_attributes(cur: &mut Cursor<'_>) -> Option<Attributes> {
    let saved = cur.clone();
    let parsed = parse_block(cur);
    if parsed.is_none() {
        *cur = saved;
    }
    parsed
}

fn parse_block(cur: &mut Cursor<'_>) -> Option<Attributes> {
    if !cur.eat(OPEN) {
        return None;
    }
    let mut attrs = Attributes::new();

    loop {
        cur.skip_blanks();
        match cur.peek()? {
            CLOSE => {
                cur.bump();
                return Some(attrs);
            }
            ID_PREFIX => {
                cur.bump();
                let id = cur.bump_while(is_ident_byte);
                if id.is_empty() {
                    return None;
                }
                attrs.set("id", id);
            }
            CLASS_PREFIX => {
                cur.bump();
                let class = cur.bump_while(is_ident_byte);
                if class.is_empty() {
                    return None;
                }
                let joined = match attrs.get("class") {
                    Some(existing) => format!("{existing} {class}"),
                    None => class.to_string(),
                };
                attrs.set("class", joined);
            }
            _ => {
                let (key, value) = parse_pair(cur)?;
                attrs.set(key, value);
            }
        }

        match cur.peek() {
            Some(b) if is_blank(b) || b == CLOSE => {}
            _ => return None,
        }
    }
}

fn parse_pair(cur: &mut Cursor<'_>) -> Option<(String, String)> {
    if !cur.peek().is_some_and(is_key_start) {
        return None;
    }
    let key = cur.bump_while(is_key_byte).to_string();
    cur.skip_blanks();
    if !cur.eat(b'=') {
        return None;
    }
    cur.skip_blanks();
    let value = if cur.peek() == Some(b'"') {
        parse_quoted(cur)?
    } else {
        let raw = cur.bump_while(|b| !is_blank(b) && b != CLOSE);
        if raw.is_empty() {
            return None;
        }
        raw.to_string()
    };
    Some((key, value))
}

/// A `"..."` value. `\"` and `\\` are unescaped; any other backslash is kept.
fn parse_quoted(cur: &mut Cursor<'_>) -> Option<String> {
    cur.bump();
    let mut value = String::new();
    loop {
        let chunk = cur.bump_while(|b| b != b'"' && b != b'\\');
        value.push_str(chunk);
        match cur.bump()? {
            b'"' => return Some(value),
            _ => match cur.peek() {
                Some(b @ (b'"' | b'\\')) => {
                    cur.bump();
                    value.push(char::from(b));
                }
                _ => value.push('\\'),
            },
        }
    }
}
