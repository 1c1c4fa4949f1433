//! Shared mapping for the type families every driver reports the same way.
//!
//! Dialect mappers claim their exotic types first; whatever they leave
//! unclaimed falls through to [`map_base`].

use super::codes;
use super::{CanonicalType, Charset, MAX_DECIMAL_PRECISION, NumericFallback, RemoteType};

/// Size of the text column an unbounded or oversized numeric falls back to.
pub const NUMERIC_TEXT_SIZE: u32 = 128;

/// Size of the text column `TIME` values are transported in.
pub const TIME_TEXT_SIZE: i64 = 100;

/// Map the common type families. Anything else is unsupported.
pub fn map_base(remote: &RemoteType, fallback: NumericFallback) -> CanonicalType {
    match remote.type_code {
        codes::TINYINT => integral(remote.size, 3, fallback),
        codes::SMALLINT => integral(remote.size, 5, fallback),
        codes::INTEGER => integral(remote.size, 10, fallback),
        codes::BIGINT => integral(remote.size, 19, fallback),
        codes::DECIMAL | codes::NUMERIC => numeric(remote.size, remote.scale, fallback),
        codes::REAL | codes::FLOAT | codes::DOUBLE => CanonicalType::Double,
        codes::CHAR | codes::NCHAR => CanonicalType::char(i64::from(remote.size), Charset::Utf8),
        codes::VARCHAR
        | codes::NVARCHAR
        | codes::LONGVARCHAR
        | codes::LONGNVARCHAR
        | codes::CLOB
        | codes::NCLOB => CanonicalType::varchar(i64::from(remote.size), Charset::Utf8),
        codes::DATE => CanonicalType::Date,
        codes::TIMESTAMP => CanonicalType::timestamp(false),
        codes::TIMESTAMP_WITH_TIMEZONE => CanonicalType::timestamp(true),
        codes::TIME | codes::TIME_WITH_TIMEZONE => {
            CanonicalType::varchar(TIME_TEXT_SIZE, Charset::Utf8)
        }
        codes::BOOLEAN => CanonicalType::Boolean,
        codes::BIT if remote.size <= 1 => CanonicalType::Boolean,
        _ => CanonicalType::Unsupported,
    }
}

/// Integral types: precision defaults per width when the driver reports none.
fn integral(size: i32, default_precision: i32, fallback: NumericFallback) -> CanonicalType {
    let precision = if size > 0 { size } else { default_precision };
    numeric(precision, 0, fallback)
}

/// Numeric types with a known or unknown precision and scale.
///
/// Negative scales widen the precision; a scale above the precision raises
/// it. Precision beyond [`MAX_DECIMAL_PRECISION`] or absent uses `fallback`.
pub fn numeric(precision: i32, scale: i32, fallback: NumericFallback) -> CanonicalType {
    match fit_decimal(precision, scale) {
        Some((precision, scale)) => CanonicalType::Decimal { precision, scale },
        None => numeric_fallback(precision, fallback),
    }
}

/// Precision and scale normalized to a representable decimal, if any.
pub fn fit_decimal(precision: i32, scale: i32) -> Option<(u32, u32)> {
    if precision <= 0 {
        return None;
    }
    let (precision, scale) = if scale < 0 {
        (i64::from(precision) - i64::from(scale), 0)
    } else {
        (i64::from(precision).max(i64::from(scale)), i64::from(scale))
    };
    if precision > i64::from(MAX_DECIMAL_PRECISION) {
        return None;
    }
    Some((precision as u32, scale as u32))
}

fn numeric_fallback(precision: i32, fallback: NumericFallback) -> CanonicalType {
    match fallback {
        NumericFallback::Double => CanonicalType::Double,
        NumericFallback::Varchar => {
            // Digits plus sign and decimal point.
            let size = if precision > 0 {
                i64::from(precision) + 2
            } else {
                i64::from(NUMERIC_TEXT_SIZE)
            };
            CanonicalType::varchar(size, Charset::Utf8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(code: i32, size: i32, scale: i32) -> RemoteType {
        RemoteType::new(code, size, scale, "")
    }

    #[test]
    fn test_integral_defaults() {
        let d = NumericFallback::Double;
        assert_eq!(map_base(&remote(codes::TINYINT, 0, 0), d), CanonicalType::decimal(3, 0));
        assert_eq!(map_base(&remote(codes::SMALLINT, 0, 0), d), CanonicalType::decimal(5, 0));
        assert_eq!(map_base(&remote(codes::INTEGER, 0, 0), d), CanonicalType::decimal(10, 0));
        assert_eq!(map_base(&remote(codes::BIGINT, 0, 0), d), CanonicalType::decimal(19, 0));
        assert_eq!(map_base(&remote(codes::BIGINT, 20, 0), d), CanonicalType::decimal(20, 0));
    }

    #[test]
    fn test_decimal_boundary() {
        let d = NumericFallback::Double;
        assert_eq!(
            map_base(&remote(codes::DECIMAL, 36, 4), d),
            CanonicalType::Decimal { precision: 36, scale: 4 }
        );
        assert_eq!(map_base(&remote(codes::DECIMAL, 37, 4), d), CanonicalType::Double);
        assert_eq!(
            map_base(&remote(codes::NUMERIC, 38, 0), NumericFallback::Varchar),
            CanonicalType::Varchar { size: 40, charset: Charset::Utf8 }
        );
    }

    #[test]
    fn test_scale_normalization() {
        assert_eq!(fit_decimal(5, -2), Some((7, 0)));
        assert_eq!(fit_decimal(3, 5), Some((5, 5)));
        assert_eq!(fit_decimal(35, -2), None);
        assert_eq!(fit_decimal(0, 0), None);
    }

    #[test]
    fn test_strings_and_temporal() {
        let d = NumericFallback::Double;
        assert_eq!(
            map_base(&remote(codes::CHAR, 10, 0), d),
            CanonicalType::Char { size: 10, charset: Charset::Utf8 }
        );
        assert_eq!(
            map_base(&remote(codes::CHAR, 3000, 0), d),
            CanonicalType::Varchar { size: 3000, charset: Charset::Utf8 }
        );
        assert_eq!(
            map_base(&remote(codes::CLOB, i32::MAX, 0), d),
            CanonicalType::max_varchar(Charset::Utf8)
        );
        assert_eq!(map_base(&remote(codes::DATE, 0, 0), d), CanonicalType::Date);
        assert_eq!(map_base(&remote(codes::TIMESTAMP, 0, 0), d), CanonicalType::timestamp(false));
        assert_eq!(
            map_base(&remote(codes::TIME, 8, 0), d),
            CanonicalType::Varchar { size: 100, charset: Charset::Utf8 }
        );
    }

    #[test]
    fn test_bits_and_unsupported() {
        let d = NumericFallback::Double;
        assert_eq!(map_base(&remote(codes::BIT, 1, 0), d), CanonicalType::Boolean);
        assert_eq!(map_base(&remote(codes::BIT, 8, 0), d), CanonicalType::Unsupported);
        assert_eq!(map_base(&remote(codes::BLOB, 0, 0), d), CanonicalType::Unsupported);
        assert_eq!(map_base(&remote(codes::VARBINARY, 16, 0), d), CanonicalType::Unsupported);
    }
}
