// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Well-known PostgreSQL type identifiers.
//!
//! The server tags every column and parameter with a numeric object id (OID).
//! [`PgType`] is the closed set of OIDs this crate understands; unknown OIDs
//! never produce a tag.

use std::fmt;

use super::error::{CodecError, Result};

/// Numeric PostgreSQL type identifier.
pub type Oid = u32;

macro_rules! pg_types {
    ($($(#[$meta:meta])* $variant:ident = $oid:literal, $name:literal;)+) => {
        /// Well-known PostgreSQL data types, keyed by OID.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PgType {
            $($(#[$meta])* $variant,)+
        }

        impl PgType {
            /// All known types in declaration order.
            pub const ALL: &'static [PgType] = &[$(PgType::$variant,)+];

            /// Resolve an OID to a known type.
            pub fn from_oid(oid: Oid) -> Option<Self> {
                match oid {
                    $($oid => Some(PgType::$variant),)+
                    _ => None,
                }
            }

            /// The OID of this type.
            pub const fn oid(self) -> Oid {
                match self {
                    $(PgType::$variant => $oid,)+
                }
            }

            /// The catalog name of this type.
            pub const fn name(self) -> &'static str {
                match self {
                    $(PgType::$variant => $name,)+
                }
            }
        }
    };
}

pg_types! {
    /// `bit`
    Bit = 1560, "bit";
    /// `bool`
    Bool = 16, "bool";
    /// `bool[]`
    BoolArray = 1000, "_bool";
    /// `box`
    Box = 603, "box";
    /// `bpchar`, blank-padded `char(n)`
    Bpchar = 1042, "bpchar";
    /// `bpchar[]`
    BpcharArray = 1014, "_bpchar";
    /// `bytea`
    Bytea = 17, "bytea";
    /// `"char"`, single-byte internal type
    Char = 18, "char";
    /// `"char"[]`
    CharArray = 1002, "_char";
    /// `date`
    Date = 1082, "date";
    /// `float4`
    Float4 = 700, "float4";
    /// `float4[]`
    Float4Array = 1021, "_float4";
    /// `float8`
    Float8 = 701, "float8";
    /// `float8[]`
    Float8Array = 1022, "_float8";
    /// `inet`
    Inet = 869, "inet";
    /// `int2`
    Int2 = 21, "int2";
    /// `int2[]`
    Int2Array = 1005, "_int2";
    /// `int4`
    Int4 = 23, "int4";
    /// `int4[]`
    Int4Array = 1007, "_int4";
    /// `int8`
    Int8 = 20, "int8";
    /// `int8[]`
    Int8Array = 1016, "_int8";
    /// `interval`
    Interval = 1186, "interval";
    /// `json`
    Json = 114, "json";
    /// `jsonb`
    Jsonb = 3802, "jsonb";
    /// `money`
    Money = 790, "money";
    /// `name`
    Name = 19, "name";
    /// `name[]`
    NameArray = 1003, "_name";
    /// `numeric`
    Numeric = 1700, "numeric";
    /// `oid`
    Oid = 26, "oid";
    /// `point`
    Point = 600, "point";
    /// `refcursor`
    RefCursor = 1790, "refcursor";
    /// `text`
    Text = 25, "text";
    /// `text[]`
    TextArray = 1009, "_text";
    /// `time`
    Time = 1083, "time";
    /// `timetz`
    Timetz = 1266, "timetz";
    /// `timestamp`
    Timestamp = 1114, "timestamp";
    /// `timestamptz`
    Timestamptz = 1184, "timestamptz";
    /// `unknown`, untyped literals
    Unknown = 705, "unknown";
    /// `uuid`
    Uuid = 2950, "uuid";
    /// `uuid[]`
    UuidArray = 2951, "_uuid";
    /// `varchar`
    Varchar = 1043, "varchar";
    /// `varchar[]`
    VarcharArray = 1015, "_varchar";
    /// `xml`
    Xml = 142, "xml";
}

impl PgType {
    /// Check whether an OID names a known type.
    pub fn is_valid(oid: Oid) -> bool {
        Self::from_oid(oid).is_some()
    }

    /// Resolve an OID, failing for unknown identifiers.
    pub fn resolve(oid: Oid) -> Result<Self> {
        Self::from_oid(oid)
            .ok_or_else(|| CodecError::invalid_argument(format!("unknown type oid {oid}")))
    }

    /// Element type of an array type.
    pub fn element_type(self) -> Option<PgType> {
        match self {
            PgType::BoolArray => Some(PgType::Bool),
            PgType::BpcharArray => Some(PgType::Bpchar),
            PgType::CharArray => Some(PgType::Char),
            PgType::Float4Array => Some(PgType::Float4),
            PgType::Float8Array => Some(PgType::Float8),
            PgType::Int2Array => Some(PgType::Int2),
            PgType::Int4Array => Some(PgType::Int4),
            PgType::Int8Array => Some(PgType::Int8),
            PgType::NameArray => Some(PgType::Name),
            PgType::TextArray => Some(PgType::Text),
            PgType::UuidArray => Some(PgType::Uuid),
            PgType::VarcharArray => Some(PgType::Varchar),
            _ => None,
        }
    }
}

impl fmt::Display for PgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
