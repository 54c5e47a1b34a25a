//! Wall-clock date and time helpers.
//!
//! All scheduling arithmetic is done in wall-clock terms. Pickup windows carry
//! a timezone label for display only; the configured storefront offset
//! qualifies formatting and is never used to convert between zones.

use time::{
    format_description::FormatItem, macros::format_description, Date, Duration, OffsetDateTime,
    PrimitiveDateTime, Time, UtcOffset,
};

use crate::CoreError;

/// Calendar date as entered in event and window forms, e.g. `2024-07-04`.
pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Wall-clock time as entered in event and window forms, e.g. `14:30`.
pub const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

/// Combined instant used when persisting resolved close times.
pub const DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

pub fn parse_date(value: &str) -> Result<Date, CoreError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| CoreError::InvalidDateTime(format!("bad date '{}': {}", value, e)))
}

pub fn parse_time(value: &str) -> Result<Time, CoreError> {
    Time::parse(value, TIME_FORMAT)
        .map_err(|e| CoreError::InvalidDateTime(format!("bad time '{}': {}", value, e)))
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap()
}

pub fn format_time(time: Time) -> String {
    time.format(TIME_FORMAT).unwrap()
}

/// Combine a pickup date and a wall-clock time into a comparable instant.
pub fn instant(date: Date, time: Time) -> PrimitiveDateTime {
    PrimitiveDateTime::new(date, time)
}

/// Subtract an (hours, minutes) lead from a dated wall-clock time.
///
/// The subtraction is calendar-aware: a lead longer than the time since
/// midnight rolls into the previous day.
pub fn minus_lead(date: Date, time: Time, hours: u16, minutes: u16) -> PrimitiveDateTime {
    let lead = Duration::hours(i64::from(hours)) + Duration::minutes(i64::from(minutes));
    PrimitiveDateTime::new(date, time) - lead
}

/// Elapsed wall-clock duration between two times on the same day.
pub fn duration_between(start: Time, end: Time) -> Duration {
    end - start
}

/// Qualify a wall-clock instant with the storefront's fixed display offset.
pub fn at_display_offset(instant: PrimitiveDateTime, offset: UtcOffset) -> OffsetDateTime {
    instant.assume_offset(offset)
}

pub mod serde_date {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(DATE_FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let value = String::deserialize(deserializer)?;
        Date::parse(&value, DATE_FORMAT).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "crate::clock::serde_date")] Date);

            let value: Option<Wrapper> = Option::deserialize(deserializer)?;
            Ok(value.map(|Wrapper(date)| date))
        }
    }
}

pub mod serde_time {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::Time;

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = time.format(TIME_FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let value = String::deserialize(deserializer)?;
        Time::parse(&value, TIME_FORMAT).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Time;

        pub fn serialize<S: Serializer>(
            time: &Option<Time>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Time>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "crate::clock::serde_time")] Time);

            let value: Option<Wrapper> = Option::deserialize(deserializer)?;
            Ok(value.map(|Wrapper(time)| time))
        }
    }
}

pub mod serde_datetime {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    use super::DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(
        instant: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let formatted = instant.format(DATETIME_FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&value, DATETIME_FORMAT).map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::PrimitiveDateTime;

        pub fn serialize<S: Serializer>(
            instant: &Option<PrimitiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match instant {
                Some(instant) => super::serialize(instant, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<PrimitiveDateTime>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "crate::clock::serde_datetime")] PrimitiveDateTime);

            let value: Option<Wrapper> = Option::deserialize(deserializer)?;
            Ok(value.map(|Wrapper(instant)| instant))
        }
    }
}
