// Copyright (C) 2024-2026 The Rillc Team
// This file is part of the rillc library.

// The rillc library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The rillc library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the rillc library. If not, see <https://www.gnu.org/licenses/>.

use super::token::{Token, TokenKind};
use rillc_ast::IntSuffix;
use rillc_span::{BytePos, LocKind, Span, SourceMap, Symbol};
use std::sync::Arc;

/// Splits `source` into physical lines, registers each with `map`, and
/// returns the byte offset each line starts at (parallel to the returned
/// `LineId`s) so the scanner below can map a byte position back to a line
/// and column without rescanning.
fn register_lines(source: &str, filepath: Arc<str>, map: &mut SourceMap) -> Vec<(usize, rillc_span::LineId)> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    let mut line_no = 1u32;
    for line in source.split_inclusive('\n') {
        let id = map.add_line(filepath.clone(), line_no, Arc::from(line));
        out.push((offset, id));
        offset += line.len();
        line_no += 1;
    }
    if out.is_empty() {
        let id = map.add_line(filepath, 1, Arc::from(""));
        out.push((0, id));
    }
    out
}

fn line_for_offset(lines: &[(usize, rillc_span::LineId)], offset: usize) -> (rillc_span::LineId, u32) {
    let idx = match lines.binary_search_by(|(start, _)| start.cmp(&offset)) {
        Ok(i) => i,
        Err(i) => i.saturating_sub(1),
    };
    let (line_start, id) = lines[idx];
    (id, (offset - line_start) as u32)
}

/// Tokenizes a complete translation unit's source text. Registers every
/// physical line and every token's location with `map` so the diagnostic
/// engine can later render source context and (via [`rillc_span::SourceMap::loc_for_span`])
/// recover a token's [`rillc_span::SourceLocId`] from the `Span` an AST node or
/// `ParserError` carries.
pub fn tokenize(source: &str, filepath: Arc<str>, map: &mut SourceMap) -> Vec<Token> {
    let lines = register_lines(source, filepath, map);
    let bytes = source.as_bytes();
    let mut pos = 0usize;
    let mut out = Vec::new();

    macro_rules! push {
        ($lo:expr, $hi:expr, $kind:expr) => {{
            let (line_id, column) = line_for_offset(&lines, $lo);
            let loc = map.add_loc(line_id, column, ($hi - $lo) as u32, None, LocKind::File, Span::new(BytePos::from_usize($lo), BytePos::from_usize($hi)));
            out.push(Token { kind: $kind, span: Span::new(BytePos::from_usize($lo), BytePos::from_usize($hi)), loc });
        }};
    }

    while pos < bytes.len() {
        let c = bytes[pos];

        if c == b' ' || c == b'\t' || c == b'\r' || c == b'\n' {
            pos += 1;
            continue;
        }

        if c == b'/' && bytes.get(pos + 1) == Some(&b'/') {
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
            continue;
        }
        if c == b'/' && bytes.get(pos + 1) == Some(&b'*') {
            pos += 2;
            while pos < bytes.len() && !(bytes[pos] == b'*' && bytes.get(pos + 1) == Some(&b'/')) {
                pos += 1;
            }
            pos = (pos + 2).min(bytes.len());
            continue;
        }

        let lo = pos;

        if c == b'_' || c.is_ascii_alphabetic() {
            while pos < bytes.len() && (bytes[pos] == b'_' || bytes[pos].is_ascii_alphanumeric()) {
                pos += 1;
            }
            let ident = &source[lo..pos];
            let kind = match ident {
                "sizeof" => TokenKind::KwSizeof,
                "_Alignof" => TokenKind::KwAlignof,
                "_Generic" => TokenKind::KwGeneric,
                "default" => TokenKind::KwDefault,
                "L" if bytes.get(pos) == Some(&b'"') => {
                    // Wide-string prefix; fold into the string scan below.
                    pos += 1;
                    let wide_lo = lo;
                    let (bytes_out, end) = scan_string_body(source, pos);
                    pos = end;
                    push!(wide_lo, pos, TokenKind::Str { bytes: bytes_out.into(), wide: true });
                    continue;
                }
                _ => TokenKind::Ident(Symbol::intern(ident)),
            };
            push!(lo, pos, kind);
            continue;
        }

        if c.is_ascii_digit() {
            pos = scan_number(source, pos, &mut out, &lines, map, lo);
            continue;
        }

        if c == b'\'' {
            pos += 1;
            let value = scan_char_escape(bytes, &mut pos);
            if bytes.get(pos) == Some(&b'\'') {
                pos += 1;
            }
            push!(lo, pos, TokenKind::Char(value));
            continue;
        }

        if c == b'"' {
            pos += 1;
            let (bytes_out, end) = scan_string_body(source, pos);
            pos = end;
            push!(lo, pos, TokenKind::Str { bytes: bytes_out.into(), wide: false });
            continue;
        }

        let (kind, len) = scan_punctuator(bytes, pos);
        pos += len;
        push!(lo, pos, kind);
    }

    let (line_id, column) = line_for_offset(&lines, pos);
    let loc = map.add_loc(line_id, column, 0, None, LocKind::File, Span::new(BytePos::from_usize(pos), BytePos::from_usize(pos)));
    out.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(BytePos::from_usize(pos), BytePos::from_usize(pos)),
        loc,
    });
    out
}

fn scan_number(
    source: &str,
    start: usize,
    out: &mut Vec<Token>,
    lines: &[(usize, rillc_span::LineId)],
    map: &mut SourceMap,
    lo: usize,
) -> usize {
    let bytes = source.as_bytes();
    let mut pos = start;
    let mut is_float = false;
    let mut is_hex = false;

    if bytes[pos] == b'0' && matches!(bytes.get(pos + 1), Some(b'x') | Some(b'X')) {
        is_hex = true;
        pos += 2;
        while pos < bytes.len() && bytes[pos].is_ascii_hexdigit() {
            pos += 1;
        }
    } else {
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if bytes.get(pos) == Some(&b'.') {
            is_float = true;
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
        if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) && !is_hex {
            is_float = true;
            pos += 1;
            if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
                pos += 1;
            }
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }

    let digits_end = pos;

    if is_float {
        let mut is_f32 = false;
        if matches!(bytes.get(pos), Some(b'f') | Some(b'F')) {
            is_f32 = true;
            pos += 1;
        }
        let value: f64 = source[start..digits_end].parse().unwrap_or(0.0);
        let (line_id, column) = line_for_offset(lines, lo);
        let loc = map.add_loc(line_id, column, (pos - lo) as u32, None, rillc_span::LocKind::File, Span::new(BytePos::from_usize(lo), BytePos::from_usize(pos)));
        out.push(Token { kind: TokenKind::Float { value, is_f32 }, span: Span::new(BytePos::from_usize(lo), BytePos::from_usize(pos)), loc });
        return pos;
    }

    let mut suffix_u = false;
    let mut suffix_l = 0u8;
    loop {
        match bytes.get(pos) {
            Some(b'u') | Some(b'U') => {
                suffix_u = true;
                pos += 1;
            }
            Some(b'l') | Some(b'L') => {
                suffix_l += 1;
                pos += 1;
            }
            _ => break,
        }
    }
    let suffix = match (suffix_u, suffix_l) {
        (false, 0) => IntSuffix::None,
        (true, 0) => IntSuffix::Unsigned,
        (false, 1) => IntSuffix::Long,
        (true, 1) => IntSuffix::UnsignedLong,
        (false, _) => IntSuffix::LongLong,
        (true, _) => IntSuffix::UnsignedLongLong,
    };
    let text = &source[start..digits_end];
    let value = if is_hex {
        i128::from_str_radix(text.trim_start_matches("0x").trim_start_matches("0X"), 16).unwrap_or(0)
    } else {
        text.parse().unwrap_or(0)
    };
    let (line_id, column) = line_for_offset(lines, lo);
    let loc = map.add_loc(line_id, column, (pos - lo) as u32, None, rillc_span::LocKind::File, Span::new(BytePos::from_usize(lo), BytePos::from_usize(pos)));
    out.push(Token { kind: TokenKind::Int { value, suffix }, span: Span::new(BytePos::from_usize(lo), BytePos::from_usize(pos)), loc });
    pos
}

fn scan_escape(bytes: &[u8], pos: &mut usize) -> u32 {
    debug_assert_eq!(bytes[*pos], b'\\');
    *pos += 1;
    let c = bytes.get(*pos).copied().unwrap_or(b'\\');
    *pos += 1;
    match c {
        b'n' => b'\n' as u32,
        b't' => b'\t' as u32,
        b'r' => b'\r' as u32,
        b'0' => 0,
        b'\\' => b'\\' as u32,
        b'\'' => b'\'' as u32,
        b'"' => b'"' as u32,
        other => other as u32,
    }
}

fn scan_char_escape(bytes: &[u8], pos: &mut usize) -> u32 {
    if bytes.get(*pos) == Some(&b'\\') {
        scan_escape(bytes, pos)
    } else {
        let c = bytes.get(*pos).copied().unwrap_or(b'\0');
        *pos += 1;
        c as u32
    }
}

/// Scans a `"..."` body starting just past the opening quote, decoding
/// escapes, and returns the decoded interior bytes plus the position just
/// past the closing quote.
fn scan_string_body(source: &str, start: usize) -> (Vec<u8>, usize) {
    let bytes = source.as_bytes();
    let mut pos = start;
    let mut decoded = Vec::new();
    while pos < bytes.len() && bytes[pos] != b'"' {
        if bytes[pos] == b'\\' {
            let v = scan_escape(bytes, &mut pos);
            decoded.push(v as u8);
        } else {
            decoded.push(bytes[pos]);
            pos += 1;
        }
    }
    if pos < bytes.len() {
        pos += 1; // closing quote
    }
    (decoded, pos)
}

fn scan_punctuator(bytes: &[u8], pos: usize) -> (TokenKind, usize) {
    let three = (bytes.get(pos), bytes.get(pos + 1), bytes.get(pos + 2));
    if let (Some(b'.'), Some(b'.'), Some(b'.')) = three {
        return (TokenKind::Ellipsis, 3);
    }
    if let (Some(b'<'), Some(b'<'), Some(b'=')) = three {
        return (TokenKind::ShlEq, 3);
    }
    if let (Some(b'>'), Some(b'>'), Some(b'=')) = three {
        return (TokenKind::ShrEq, 3);
    }

    let two = (bytes.get(pos), bytes.get(pos + 1));
    let two_kind = match two {
        (Some(b'-'), Some(b'>')) => Some(TokenKind::Arrow),
        (Some(b'+'), Some(b'+')) => Some(TokenKind::PlusPlus),
        (Some(b'-'), Some(b'-')) => Some(TokenKind::MinusMinus),
        (Some(b'<'), Some(b'<')) => Some(TokenKind::Shl),
        (Some(b'>'), Some(b'>')) => Some(TokenKind::Shr),
        (Some(b'<'), Some(b'=')) => Some(TokenKind::Le),
        (Some(b'>'), Some(b'=')) => Some(TokenKind::Ge),
        (Some(b'='), Some(b'=')) => Some(TokenKind::EqEq),
        (Some(b'!'), Some(b'=')) => Some(TokenKind::Ne),
        (Some(b'!'), Some(b'!')) => Some(TokenKind::BangBang),
        (Some(b'&'), Some(b'&')) => Some(TokenKind::AmpAmp),
        (Some(b'|'), Some(b'|')) => Some(TokenKind::PipePipe),
        (Some(b'+'), Some(b'=')) => Some(TokenKind::PlusEq),
        (Some(b'-'), Some(b'=')) => Some(TokenKind::MinusEq),
        (Some(b'*'), Some(b'=')) => Some(TokenKind::StarEq),
        (Some(b'/'), Some(b'=')) => Some(TokenKind::SlashEq),
        (Some(b'%'), Some(b'=')) => Some(TokenKind::PercentEq),
        (Some(b'&'), Some(b'=')) => Some(TokenKind::AmpEq),
        (Some(b'|'), Some(b'=')) => Some(TokenKind::PipeEq),
        (Some(b'^'), Some(b'=')) => Some(TokenKind::CaretEq),
        _ => None,
    };
    if let Some(kind) = two_kind {
        return (kind, 2);
    }

    let kind = match bytes[pos] {
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b'[' => TokenKind::LBracket,
        b']' => TokenKind::RBracket,
        b'{' => TokenKind::LBrace,
        b'}' => TokenKind::RBrace,
        b'.' => TokenKind::Dot,
        b',' => TokenKind::Comma,
        b':' => TokenKind::Colon,
        b';' => TokenKind::Semicolon,
        b'?' => TokenKind::Question,
        b'@' => TokenKind::At,
        b'+' => TokenKind::Plus,
        b'-' => TokenKind::Minus,
        b'*' => TokenKind::Star,
        b'/' => TokenKind::Slash,
        b'%' => TokenKind::Percent,
        b'&' => TokenKind::Amp,
        b'|' => TokenKind::Pipe,
        b'^' => TokenKind::Caret,
        b'~' => TokenKind::Tilde,
        b'!' => TokenKind::Bang,
        b'<' => TokenKind::Lt,
        b'>' => TokenKind::Gt,
        b'=' => TokenKind::Eq,
        other => {
            tracing::debug!(byte = other, "skipping unrecognized byte");
            TokenKind::Eof
        }
    };
    (kind, 1)
}
