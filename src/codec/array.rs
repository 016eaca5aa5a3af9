// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! One-dimensional array codecs.
//!
//! The text format is the brace-delimited literal (`{1,2,NULL}`), with
//! optional double quotes and backslash escapes around elements. The
//! binary format is:
//!
//! ```text
//! i32 ndim | i32 has_null | u32 element oid | (i32 size, i32 lower)* | (i32 len, bytes)*
//! ```
//!
//! with a length of `-1` marking a NULL element. Arrays of more than one
//! dimension are rejected. Arrays are encoded as text literals.

use std::sync::Arc;

use super::{expect_end, parse_text, unexpected_value, Codec};
use crate::buffer::{write_str, ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

/// Element category of an [`ArrayCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Int16,
    Int32,
    Int64,
    Text,
}

impl ElementKind {
    fn array_type(self) -> PgType {
        match self {
            ElementKind::Int16 => PgType::Int2Array,
            ElementKind::Int32 => PgType::Int4Array,
            ElementKind::Int64 => PgType::Int8Array,
            ElementKind::Text => PgType::TextArray,
        }
    }
}

fn invalid(ty: PgType, message: impl Into<String>) -> CodecError {
    CodecError::invalid_value(ty.name(), message)
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

/// Split an array literal into its elements; unquoted `NULL` becomes `None`.
fn parse_literal(text: &str, ty: PgType) -> Result<Vec<Option<String>>> {
    let mut text = text.trim();
    if text.starts_with('[') {
        // Explicit bounds such as "[0:2]={1,2,3}"
        text = text
            .split_once('=')
            .map(|(_, rest)| rest.trim_start())
            .ok_or_else(|| invalid(ty, "malformed array dimensions"))?;
    }
    let inner = text
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| invalid(ty, format!("'{text}' is not an array literal")))?;

    let mut elements = Vec::new();
    if inner.trim().is_empty() {
        return Ok(elements);
    }

    let mut chars = inner.chars().peekable();
    loop {
        skip_whitespace(&mut chars);
        match chars.peek() {
            Some('{') => return Err(invalid(ty, "multi-dimensional arrays are not supported")),
            Some('"') => {
                chars.next();
                let mut item = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some(c) => item.push(c),
                            None => return Err(invalid(ty, "unterminated escape")),
                        },
                        Some('"') => break,
                        Some(c) => item.push(c),
                        None => return Err(invalid(ty, "unterminated quoted element")),
                    }
                }
                elements.push(Some(item));
                skip_whitespace(&mut chars);
            }
            _ => {
                let mut item = String::new();
                while let Some(c) = chars.next_if(|&c| c != ',') {
                    match c {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                item.push(escaped);
                            }
                        }
                        '{' | '}' | '"' => {
                            return Err(invalid(ty, format!("unexpected '{c}' in element")))
                        }
                        c => item.push(c),
                    }
                }
                let item = item.trim_end();
                if item.is_empty() {
                    return Err(invalid(ty, "empty array element"));
                }
                elements.push(if item.eq_ignore_ascii_case("NULL") {
                    None
                } else {
                    Some(item.to_string())
                });
            }
        }
        match chars.next() {
            Some(',') => continue,
            None => break,
            Some(c) => return Err(invalid(ty, format!("unexpected '{c}' after element"))),
        }
    }
    Ok(elements)
}

/// Read the header and element slices of a binary array.
fn read_binary<'a>(
    buffer: &mut ByteCursor<'a>,
    ty: PgType,
) -> Result<Vec<Option<&'a [u8]>>> {
    let ndim = buffer.read_i32()?;
    let _has_null = buffer.read_i32()?;
    let _element_oid = buffer.read_u32()?;
    match ndim {
        0 => {
            expect_end(buffer, ty)?;
            return Ok(Vec::new());
        }
        1 => {}
        n if n > 1 => return Err(invalid(ty, "multi-dimensional arrays are not supported")),
        n => return Err(invalid(ty, format!("invalid dimension count {n}"))),
    }
    let size = buffer.read_i32()?;
    let _lower_bound = buffer.read_i32()?;
    let size = usize::try_from(size).map_err(|_| invalid(ty, format!("invalid size {size}")))?;

    let mut elements = Vec::with_capacity(size.min(buffer.remaining() / 4));
    for _ in 0..size {
        let len = buffer.read_i32()?;
        if len < 0 {
            elements.push(None);
        } else {
            elements.push(Some(buffer.read_bytes(len as usize)?));
        }
    }
    expect_end(buffer, ty)?;
    Ok(elements)
}

fn binary_integer(bytes: &[u8], ty: PgType) -> Result<i64> {
    let mut cursor = ByteCursor::new(bytes);
    let value = match bytes.len() {
        2 => cursor.read_i16()? as i64,
        4 => cursor.read_i32()? as i64,
        8 => cursor.read_i64()?,
        n => return Err(invalid(ty, format!("{n}-byte integer element"))),
    };
    Ok(value)
}

fn narrow<T: TryFrom<i64>>(items: Vec<Option<i64>>, ty: PgType) -> Result<Vec<Option<T>>> {
    items
        .into_iter()
        .map(|item| {
            item.map(|v| T::try_from(v).map_err(|_| invalid(ty, format!("{v} is out of range"))))
                .transpose()
        })
        .collect()
}

fn quote(item: &str, out: &mut String) {
    out.push('"');
    for c in item.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

fn literal<T, F>(items: &[Option<T>], mut write: F) -> String
where
    F: FnMut(&T, &mut String),
{
    let mut out = String::from("{");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match item {
            Some(v) => write(v, &mut out),
            None => out.push_str("NULL"),
        }
    }
    out.push('}');
    out
}

/// Codec for one-dimensional arrays of `int2`, `int4`, `int8` or text.
pub struct ArrayCodec {
    kind: ElementKind,
    allocator: Arc<dyn ByteAllocator>,
}

impl ArrayCodec {
    fn with_kind(kind: ElementKind, allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { kind, allocator }
    }

    /// Codec for [`Value::Int16Array`] (`int2[]`).
    pub fn int16(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self::with_kind(ElementKind::Int16, allocator)
    }

    /// Codec for [`Value::Int32Array`] (`int4[]`).
    pub fn int32(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self::with_kind(ElementKind::Int32, allocator)
    }

    /// Codec for [`Value::Int64Array`] (`int8[]`).
    pub fn int64(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self::with_kind(ElementKind::Int64, allocator)
    }

    /// Codec for [`Value::TextArray`], reading any character array type.
    pub fn text(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self::with_kind(ElementKind::Text, allocator)
    }

    fn integers(&self, items: Vec<Option<i64>>, ty: PgType) -> Result<Value> {
        Ok(match self.kind {
            ElementKind::Int16 => Value::Int16Array(narrow(items, ty)?),
            ElementKind::Int32 => Value::Int32Array(narrow(items, ty)?),
            ElementKind::Int64 => Value::Int64Array(items),
            ElementKind::Text => {
                return Err(CodecError::invalid_argument(format!(
                    "{} codec cannot hold integer elements of {ty}",
                    self.name()
                )))
            }
        })
    }

    fn decode_text(&self, text: &str, ty: PgType) -> Result<Value> {
        let items = parse_literal(text, ty)?;
        if self.kind == ElementKind::Text {
            return Ok(Value::TextArray(items));
        }
        let element = ty.element_type().unwrap_or(ty);
        let ints = items
            .into_iter()
            .map(|item| item.map(|s| parse_text::<i64>(element, s.trim())).transpose())
            .collect::<Result<Vec<_>>>()?;
        self.integers(ints, ty)
    }

    fn decode_binary(&self, buffer: &mut ByteCursor<'_>, ty: PgType) -> Result<Value> {
        let items = read_binary(buffer, ty)?;
        if self.kind == ElementKind::Text {
            let texts = items
                .into_iter()
                .map(|item| {
                    item.map(|bytes| ByteCursor::new(bytes).read_str().map(str::to_string))
                        .transpose()
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(Value::TextArray(texts));
        }
        let ints = items
            .into_iter()
            .map(|item| item.map(|bytes| binary_integer(bytes, ty)).transpose())
            .collect::<Result<Vec<_>>>()?;
        self.integers(ints, ty)
    }

    fn encode_literal(&self, value: &Value) -> Option<String> {
        fn display<T: std::fmt::Display>(v: &T, out: &mut String) {
            out.push_str(&v.to_string());
        }
        match (self.kind, value) {
            (ElementKind::Int16, Value::Int16Array(items)) => Some(literal(items, display)),
            (ElementKind::Int32, Value::Int32Array(items)) => Some(literal(items, display)),
            (ElementKind::Int64, Value::Int64Array(items)) => Some(literal(items, display)),
            (ElementKind::Text, Value::TextArray(items)) => {
                Some(literal(items, |v: &String, out: &mut String| quote(v, out)))
            }
            _ => None,
        }
    }
}

impl Codec for ArrayCodec {
    fn name(&self) -> &str {
        match self.kind {
            ElementKind::Int16 => "int2_array",
            ElementKind::Int32 => "int4_array",
            ElementKind::Int64 => "int8_array",
            ElementKind::Text => "text_array",
        }
    }

    fn value_type(&self) -> ValueType {
        match self.kind {
            ElementKind::Int16 => ValueType::Int16Array,
            ElementKind::Int32 => ValueType::Int32Array,
            ElementKind::Int64 => ValueType::Int64Array,
            ElementKind::Text => ValueType::TextArray,
        }
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        match self.kind {
            ElementKind::Text => matches!(
                ty,
                PgType::TextArray
                    | PgType::VarcharArray
                    | PgType::BpcharArray
                    | PgType::NameArray
                    | PgType::CharArray
            ),
            kind => ty == kind.array_type(),
        }
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        match format {
            Format::Text => self.decode_text(buffer.read_str()?, ty),
            Format::Binary => self.decode_binary(buffer, ty),
        }
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        let text = self
            .encode_literal(value)
            .ok_or_else(|| unexpected_value(self.name(), value))?;
        Ok(Parameter::new(
            Format::Text,
            self.kind.array_type().oid(),
            write_str(self.allocator.as_ref(), &text),
        ))
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, self.kind.array_type().oid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{heap, write_with, HeapAllocator, WireWrite};

    fn decode(codec: &ArrayCodec, bytes: &[u8], ty: PgType, format: Format) -> Result<Value> {
        let mut cursor = ByteCursor::new(bytes);
        codec.decode_value(&mut cursor, ty, format, &codec.value_type())
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(
            parse_literal(r#"{a, "b c" ,NULL,"NULL","x\"y\\z"}"#, PgType::TextArray).unwrap(),
            vec![
                Some("a".to_string()),
                Some("b c".to_string()),
                None,
                Some("NULL".to_string()),
                Some(r#"x"y\z"#.to_string()),
            ]
        );
        assert_eq!(parse_literal("{}", PgType::TextArray).unwrap(), vec![]);
        assert_eq!(
            parse_literal("[1:2]={7,8}", PgType::Int4Array).unwrap(),
            vec![Some("7".to_string()), Some("8".to_string())]
        );
    }

    #[test]
    fn test_parse_literal_errors() {
        for bad in ["1,2", "{{1,2},{3,4}}", r#"{"open}"#, "{1,,2}", "{1 2\"}"] {
            assert!(
                parse_literal(bad, PgType::Int4Array)
                    .unwrap_err()
                    .is_invalid_value(),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_int_array_text() {
        let codec = ArrayCodec::int32(heap());
        assert_eq!(
            decode(&codec, b"{1,-2,NULL}", PgType::Int4Array, Format::Text).unwrap(),
            Value::Int32Array(vec![Some(1), Some(-2), None])
        );
        let short = ArrayCodec::int16(heap());
        assert!(decode(&short, b"{70000}", PgType::Int2Array, Format::Text)
            .unwrap_err()
            .is_invalid_value());
    }

    #[test]
    fn test_int_array_binary() {
        let bytes = write_with(&HeapAllocator, 64, |b| {
            b.put_i32(1)?;
            b.put_i32(1)?;
            b.put_u32(PgType::Int8.oid())?;
            b.put_i32(2)?;
            b.put_i32(1)?;
            b.put_i32(8)?;
            b.put_i64(42)?;
            b.put_i32(-1)
        });
        let codec = ArrayCodec::int64(heap());
        assert_eq!(
            decode(&codec, &bytes, PgType::Int8Array, Format::Binary).unwrap(),
            Value::Int64Array(vec![Some(42), None])
        );
    }

    #[test]
    fn test_empty_binary_array() {
        let bytes = write_with(&HeapAllocator, 12, |b| {
            b.put_i32(0)?;
            b.put_i32(0)?;
            b.put_u32(PgType::Text.oid())
        });
        let codec = ArrayCodec::text(heap());
        assert_eq!(
            decode(&codec, &bytes, PgType::TextArray, Format::Binary).unwrap(),
            Value::TextArray(vec![])
        );
    }

    #[test]
    fn test_text_array_encode_quotes() {
        let codec = ArrayCodec::text(heap());
        let param = codec
            .encode(&Value::TextArray(vec![
                Some("a,b".to_string()),
                None,
                Some(r#"q"\"#.to_string()),
            ]))
            .unwrap();
        assert_eq!(param.format(), Format::Text);
        assert_eq!(param.pg_type(), Some(PgType::TextArray));
        assert_eq!(
            param.payload(),
            Some(&br#"{"a,b",NULL,"q\"\\"}"#[..])
        );
    }

    #[test]
    fn test_text_array_supports_character_arrays() {
        let codec = ArrayCodec::text(heap());
        assert!(codec.supports(PgType::VarcharArray, Format::Text));
        assert!(codec.supports(PgType::NameArray, Format::Binary));
        assert!(!codec.supports(PgType::Int4Array, Format::Text));
    }

    #[test]
    fn test_encode_rejects_mismatched_value() {
        let codec = ArrayCodec::int16(heap());
        assert!(codec
            .encode(&Value::Int32Array(vec![Some(1)]))
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_integer_elements_need_integer_kind() {
        let int8 = ArrayCodec::int64(heap());
        assert_eq!(
            int8.integers(vec![Some(3), None], PgType::Int8Array).unwrap(),
            Value::Int64Array(vec![Some(3), None])
        );

        let text = ArrayCodec::text(heap());
        let err = text.integers(vec![Some(3)], PgType::Int8Array).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("text_array"));
    }
}
