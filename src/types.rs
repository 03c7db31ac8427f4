//! Common GraphQL types

use async_graphql::{Scalar, ScalarType, Value};
use chrono::{DateTime as ChronoDateTime, Utc};

/// RFC 3339 timestamp scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime(pub ChronoDateTime<Utc>);

#[Scalar]
impl ScalarType for DateTime {
    fn parse(value: Value) -> async_graphql::InputValueResult<Self> {
        if let Value::String(s) = value {
            Ok(DateTime(
                ChronoDateTime::parse_from_rfc3339(&s)
                    .map_err(|e| format!("Invalid DateTime: {}", e))?
                    .with_timezone(&Utc),
            ))
        } else {
            Err("Expected string for DateTime".into())
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.to_rfc3339())
    }
}

impl From<ChronoDateTime<Utc>> for DateTime {
    fn from(value: ChronoDateTime<Utc>) -> Self {
        DateTime(value)
    }
}

impl From<DateTime> for crate::value::Value {
    fn from(value: DateTime) -> Self {
        crate::value::Value::Timestamp(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_datetime_round_trips_through_value() {
        let dt = DateTime(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        let value = dt.to_value();
        assert!(matches!(value, Value::String(_)));
        assert_eq!(<DateTime as ScalarType>::parse(value).unwrap(), dt);
    }

    #[test]
    fn test_offsets_normalise_to_utc() {
        let parsed =
            <DateTime as ScalarType>::parse(Value::String("2024-03-01T08:30:00-04:00".into()))
                .unwrap();
        assert_eq!(parsed.0, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_rejects_non_string() {
        assert!(<DateTime as ScalarType>::parse(Value::Boolean(true)).is_err());
    }
}
