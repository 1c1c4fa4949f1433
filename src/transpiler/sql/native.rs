use super::super::descriptor::DialectDescriptor;
use super::super::traits::SqlGenerator;
use crate::capabilities::CapabilitySet;
use crate::types::{CanonicalType, Charset, RemoteType};

static DESCRIPTOR: DialectDescriptor = DialectDescriptor::standard("NATIVE");

/// Passthrough to a target that speaks the generic function vocabulary.
pub struct NativeGenerator;

impl SqlGenerator for NativeGenerator {
    fn descriptor(&self) -> &DialectDescriptor {
        &DESCRIPTOR
    }

    fn map_type(&self, remote: &RemoteType) -> Option<CanonicalType> {
        let name = remote.upper_name();
        if name.starts_with("INTERVAL YEAR") {
            return Some(CanonicalType::IntervalYearToMonth {
                precision: positive_or(remote.size, 2),
            });
        }
        if name.starts_with("INTERVAL DAY") {
            return Some(CanonicalType::IntervalDayToSecond {
                precision: positive_or(remote.size, 2),
                fraction: positive_or(remote.scale, 3),
            });
        }
        if name.starts_with("GEOMETRY") {
            return Some(CanonicalType::geometry(remote.scale.max(0) as u32));
        }
        if name == "TIMESTAMP WITH LOCAL TIME ZONE" {
            return Some(CanonicalType::timestamp(true));
        }
        if name == "HASHTYPE" {
            // Hex text: two characters per byte.
            return Some(CanonicalType::char(
                i64::from(remote.size) * 2,
                Charset::Ascii,
            ));
        }
        None
    }
}

fn positive_or(value: i32, default: u32) -> u32 {
    if value > 0 { value as u32 } else { default }
}

pub(crate) fn capabilities() -> CapabilitySet {
    CapabilitySet::all()
}
