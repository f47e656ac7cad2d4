//! Conversion of resolved source strings into typed field storage

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::duration::parse_duration;
use crate::error::BindError;
use crate::schema::{FieldDescriptor, SeqSlot, Slot};

/// Convert `value` into the field behind `slot` and assign it.
///
/// Sequence fields are only assigned when every element converts; otherwise
/// the field keeps its previous contents.
pub fn convert(slot: Slot<'_>, field: &FieldDescriptor, value: &str) -> Result<(), BindError> {
    let name = field.env_name();
    match slot {
        Slot::Str(target) => *target = value.to_string(),
        Slot::Bool(target) => *target = parse_bool(name, value)?,
        Slot::Int(target) => *target = parse_number::<i32>(name, value)?,
        Slot::Uint(target) => *target = parse_unsigned(name, value)?,
        Slot::Int64(target) => *target = parse_number::<i64>(name, value)?,
        Slot::Float32(target) => *target = parse_float::<f32>(name, value)?,
        Slot::Float64(target) => *target = parse_float::<f64>(name, value)?,
        Slot::Duration(target) => {
            *target = parse_duration(value)
                .map_err(|e| BindError::parse_error::<Duration>(name, e))?
        }
        Slot::Seq(seq) => convert_seq(seq, name, value, field.effective_separator())?,
        Slot::Record(_) => return Err(BindError::TypeMismatch),
        Slot::Owned(_) | Slot::Unsupported => return Err(BindError::UnsupportedType),
    }
    Ok(())
}

fn convert_seq(seq: SeqSlot<'_>, name: &str, value: &str, separator: &str) -> Result<(), BindError> {
    let pieces = value.split(separator);
    match seq {
        SeqSlot::Str(target) => *target = pieces.map(str::to_string).collect(),
        SeqSlot::Int(target) => *target = parse_all(pieces, |p| parse_number(name, p))?,
        SeqSlot::Int64(target) => *target = parse_all(pieces, |p| parse_number(name, p))?,
        SeqSlot::Float32(target) => *target = parse_all(pieces, |p| parse_float(name, p))?,
        SeqSlot::Float64(target) => *target = parse_all(pieces, |p| parse_float(name, p))?,
        SeqSlot::Bool(target) => *target = parse_all(pieces, |p| parse_bool(name, p))?,
        SeqSlot::Unsupported => return Err(BindError::UnsupportedSliceType),
    }
    Ok(())
}

fn parse_all<'v, T>(
    pieces: impl Iterator<Item = &'v str>,
    parse: impl Fn(&str) -> Result<T, BindError>,
) -> Result<Vec<T>, BindError> {
    pieces.map(parse).collect()
}

fn parse_number<T>(name: &str, value: &str) -> Result<T, BindError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| BindError::parse_error::<T>(name, e))
}

/// Unsigned decimal without any sign.
fn parse_unsigned(name: &str, value: &str) -> Result<u32, BindError> {
    if value.starts_with('+') {
        return Err(BindError::parse_error::<u32>(name, "sign not allowed"));
    }
    parse_number(name, value)
}

/// Rejects finite literals that overflow to infinity.
fn parse_float<T>(name: &str, value: &str) -> Result<T, BindError>
where
    T: FromStr + Copy + Into<f64>,
    T::Err: Display,
{
    let parsed = parse_number::<T>(name, value)?;
    if parsed.into().is_infinite() && !is_infinity_literal(value) {
        return Err(BindError::parse_error::<T>(name, "value out of range"));
    }
    Ok(parsed)
}

fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Accepts `1`, `t`, `true`, `0`, `f` and `false`, ignoring case.
fn parse_bool(name: &str, value: &str) -> Result<bool, BindError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(BindError::parse_error::<bool>(
            name,
            format!("invalid boolean literal '{value}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, Record};

    fn field(key: &'static str) -> FieldDescriptor {
        FieldDescriptor::new("field", "T").key(key)
    }

    #[test]
    fn test_string_verbatim() {
        let mut target = String::new();
        convert(target.slot(), &field("NAME"), " spaced value ").unwrap();
        assert_eq!(target, " spaced value ");
    }

    #[test]
    fn test_bool_literals() {
        for (literal, expected) in [
            ("1", true),
            ("t", true),
            ("T", true),
            ("TRUE", true),
            ("True", true),
            ("0", false),
            ("f", false),
            ("False", false),
        ] {
            let mut target = !expected;
            convert(target.slot(), &field("DEBUG"), literal).unwrap();
            assert_eq!(target, expected, "literal {literal}");
        }
    }

    #[test]
    fn test_bool_invalid() {
        let mut target = false;
        let err = convert(target.slot(), &field("DEBUG"), "yes").unwrap_err();
        assert!(matches!(err, BindError::Parse { ref name, .. } if name == "DEBUG"));
    }

    #[test]
    fn test_int_range() {
        let mut target = 0i32;
        convert(target.slot(), &field("PORT"), "-42").unwrap();
        assert_eq!(target, -42);

        let err = convert(target.slot(), &field("PORT"), "3000000000").unwrap_err();
        assert!(matches!(err, BindError::Parse { .. }));
        assert_eq!(target, -42);
    }

    #[test]
    fn test_uint_rejects_negative() {
        let mut target = 0u32;
        assert!(convert(target.slot(), &field("WORKERS"), "-1").is_err());
        convert(target.slot(), &field("WORKERS"), "4000000000").unwrap();
        assert_eq!(target, 4_000_000_000);
    }

    #[test]
    fn test_uint_rejects_plus_sign() {
        let mut target = 3u32;
        let err = convert(target.slot(), &field("WORKERS"), "+5").unwrap_err();
        assert!(matches!(err, BindError::Parse { ref name, .. } if name == "WORKERS"));
        assert_eq!(target, 3);
    }

    #[test]
    fn test_float_out_of_range() {
        let mut single = 1f32;
        let err = convert(single.slot(), &field("F32"), "1e40").unwrap_err();
        assert!(matches!(err, BindError::Parse { ref name, .. } if name == "F32"));
        assert_eq!(single, 1.0);

        let mut double = 1f64;
        let err = convert(double.slot(), &field("F64"), "-1e400").unwrap_err();
        assert!(matches!(err, BindError::Parse { ref message, .. } if message == "value out of range"));
        assert_eq!(double, 1.0);
    }

    #[test]
    fn test_float_infinity_literals() {
        let mut single = 0f32;
        convert(single.slot(), &field("F32"), "inf").unwrap();
        assert_eq!(single, f32::INFINITY);

        let mut double = 0f64;
        convert(double.slot(), &field("F64"), "-Infinity").unwrap();
        assert_eq!(double, f64::NEG_INFINITY);
    }

    #[test]
    fn test_float_sequence_out_of_range() {
        let mut ratios = vec![0.5f32];
        let err = convert(ratios.slot(), &field("RATIOS"), "1.5,1e40").unwrap_err();
        assert!(matches!(err, BindError::Parse { .. }));
        assert_eq!(ratios, vec![0.5]);

        let mut weights: Vec<f64> = Vec::new();
        assert!(convert(weights.slot(), &field("WEIGHTS"), "1e400,2").is_err());
        assert!(weights.is_empty());
    }

    #[test]
    fn test_int64_and_floats() {
        let mut big = 0i64;
        convert(big.slot(), &field("BIG"), "9000000000").unwrap();
        assert_eq!(big, 9_000_000_000);

        let mut ratio = 0f32;
        convert(ratio.slot(), &field("RATIO"), "0.25").unwrap();
        assert_eq!(ratio, 0.25);

        let mut precise = 0f64;
        convert(precise.slot(), &field("PRECISE"), "1e-3").unwrap();
        assert_eq!(precise, 0.001);
    }

    #[test]
    fn test_duration() {
        let mut target = Duration::ZERO;
        convert(target.slot(), &field("TIMEOUT"), "1h30m").unwrap();
        assert_eq!(target, Duration::from_secs(90 * 60));

        let err = convert(target.slot(), &field("TIMEOUT"), "garbage").unwrap_err();
        assert!(matches!(err, BindError::Parse { ref name, .. } if name == "TIMEOUT"));
    }

    #[test]
    fn test_sequence_with_separator() {
        let mut target: Vec<String> = Vec::new();
        let descriptor = field("HOSTS").separator(":");
        convert(target.slot(), &descriptor, "a:b:c").unwrap();
        assert_eq!(target, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sequence_default_separator() {
        let mut ints: Vec<i32> = Vec::new();
        convert(ints.slot(), &field("IDS"), "1,2,3").unwrap();
        assert_eq!(ints, vec![1, 2, 3]);

        let mut flags: Vec<bool> = Vec::new();
        convert(flags.slot(), &field("FLAGS"), "true,0,T").unwrap();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_sequence_failure_keeps_previous() {
        let mut ints = vec![7i32];
        let err = convert(ints.slot(), &field("IDS"), "1,x,3").unwrap_err();
        assert!(matches!(err, BindError::Parse { .. }));
        assert_eq!(ints, vec![7]);
    }

    #[test]
    fn test_unsupported_sequence_element() {
        let mut bytes: Vec<u8> = Vec::new();
        let err = convert(bytes.slot(), &field("BYTES"), "1,2").unwrap_err();
        assert!(matches!(err, BindError::UnsupportedSliceType));
    }

    #[test]
    fn test_unsupported_type() {
        let mut wide = 0u64;
        let err = convert(wide.slot(), &field("WIDE"), "1").unwrap_err();
        assert!(matches!(err, BindError::UnsupportedType));
    }

    struct Empty;

    impl Record for Empty {
        fn fields(&self) -> &'static [FieldDescriptor] {
            &[]
        }

        fn field_slot(&mut self, _index: usize) -> Slot<'_> {
            Slot::Unsupported
        }
    }

    #[test]
    fn test_record_mismatch() {
        let mut nested = Empty;
        let err = convert(Slot::Record(&mut nested), &field("NESTED"), "x").unwrap_err();
        assert!(matches!(err, BindError::TypeMismatch));
    }

    #[test]
    fn test_null_indirection_is_unsupported() {
        let mut pointer: Option<Box<Empty>> = None;
        let err = convert(pointer.slot(), &field("POINTER"), "x").unwrap_err();
        assert!(matches!(err, BindError::UnsupportedType));
    }
}
