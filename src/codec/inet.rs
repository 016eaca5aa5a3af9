// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec for host addresses stored as `inet`.
//!
//! Only host addresses are represented: a netmask narrower than the full
//! address width is rejected.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use super::{expect_end, unexpected_value, Codec};
use crate::buffer::{write_str, ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

const FAMILY_INET: u8 = 2;
const FAMILY_INET6: u8 = 3;

fn full_mask(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn invalid(message: impl Into<String>) -> CodecError {
    CodecError::invalid_value(PgType::Inet.name(), message)
}

fn parse_text(text: &str) -> Result<IpAddr> {
    let (addr, mask) = match text.split_once('/') {
        Some((addr, mask)) => (addr, Some(mask)),
        None => (text, None),
    };
    let addr: IpAddr = addr
        .parse()
        .map_err(|_| invalid(format!("cannot parse '{text}'")))?;
    if let Some(mask) = mask {
        if mask.parse::<u8>().ok() != Some(full_mask(&addr)) {
            return Err(invalid(format!("'{text}' is not a host address")));
        }
    }
    Ok(addr)
}

fn decode_binary(buffer: &mut ByteCursor<'_>) -> Result<IpAddr> {
    let family = buffer.read_u8()?;
    let bits = buffer.read_u8()?;
    let _is_cidr = buffer.read_u8()?;
    let len = buffer.read_u8()? as usize;
    let raw = buffer.read_bytes(len)?;
    let addr = match (family, raw) {
        (FAMILY_INET, &[a, b, c, d]) => IpAddr::V4(Ipv4Addr::new(a, b, c, d)),
        (FAMILY_INET6, raw) if raw.len() == 16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(raw);
            IpAddr::V6(Ipv6Addr::from(octets))
        }
        _ => {
            return Err(invalid(format!(
                "unexpected family {family} with {len} address bytes"
            )))
        }
    };
    if bits != full_mask(&addr) {
        return Err(invalid(format!("/{bits} is not a host netmask")));
    }
    Ok(addr)
}

/// Codec for [`Value::Inet`], encoded as text `inet`.
pub struct InetCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl InetCodec {
    /// Create an address codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for InetCodec {
    fn name(&self) -> &str {
        "inet"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Inet
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::Inet
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let addr = match format {
            Format::Text => parse_text(buffer.read_str()?.trim())?,
            Format::Binary => {
                let addr = decode_binary(buffer)?;
                expect_end(buffer, ty)?;
                addr
            }
        };
        Ok(Value::Inet(addr))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Inet(addr) => Ok(Parameter::new(
                Format::Text,
                PgType::Inet.oid(),
                write_str(self.allocator.as_ref(), &addr.to_string()),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::Inet.oid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::heap;

    fn decode(bytes: &[u8], format: Format) -> Result<Value> {
        let mut cursor = ByteCursor::new(bytes);
        InetCodec::new(heap()).decode_value(&mut cursor, PgType::Inet, format, &ValueType::Inet)
    }

    #[test]
    fn test_decode_text() {
        let v4: IpAddr = "10.0.0.1".parse().unwrap();
        assert_eq!(decode(b"10.0.0.1", Format::Text).unwrap(), Value::Inet(v4));
        assert_eq!(decode(b"10.0.0.1/32", Format::Text).unwrap(), Value::Inet(v4));
        let v6: IpAddr = "::1".parse().unwrap();
        assert_eq!(decode(b"::1/128", Format::Text).unwrap(), Value::Inet(v6));
    }

    #[test]
    fn test_decode_text_rejects_networks() {
        assert!(decode(b"10.0.0.0/8", Format::Text)
            .unwrap_err()
            .is_invalid_value());
        assert!(decode(b"localhost", Format::Text)
            .unwrap_err()
            .is_invalid_value());
    }

    #[test]
    fn test_decode_binary() {
        assert_eq!(
            decode(&[2, 32, 0, 4, 127, 0, 0, 1], Format::Binary).unwrap(),
            Value::Inet(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );
        let mut v6 = vec![3, 128, 0, 16];
        v6.extend_from_slice(&Ipv6Addr::LOCALHOST.octets());
        assert_eq!(
            decode(&v6, Format::Binary).unwrap(),
            Value::Inet(IpAddr::V6(Ipv6Addr::LOCALHOST))
        );
        assert!(decode(&[2, 24, 0, 4, 10, 0, 0, 0], Format::Binary)
            .unwrap_err()
            .is_invalid_value());
    }

    #[test]
    fn test_encode_text() {
        let param = InetCodec::new(heap())
            .encode(&Value::Inet(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2))))
            .unwrap();
        assert_eq!(param.format(), Format::Text);
        assert_eq!(param.payload(), Some(&b"192.168.1.2"[..]));
    }
}
