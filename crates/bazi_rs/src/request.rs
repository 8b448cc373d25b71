//! JSON-shaped birth request.
//!
//! Mirrors what a request handler receives:
//!
//! ```json
//! { "date": "1990-06-15", "time": "10:30", "place": "Beijing",
//!   "placeGeo": { "lat": 39.9, "lon": 116.4 }, "sexAtBirth": "female" }
//! ```
//!
//! `time` accepts `HH:mm` or `HH:mm:ss`; send `"timeUnknown": true` instead
//! when the birth time is not known.

use bazi_base::Sex;
use bazi_search::{BirthInput, BirthTime, GeoPoint};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::RequestError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Coordinates of the birth place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceGeo {
    pub lat: f64,
    pub lon: f64,
}

/// Birth record as sent by a caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthRequest {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub time_unknown: bool,
    #[serde(default)]
    pub place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_geo: Option<PlaceGeo>,
    pub sex_at_birth: String,
    /// Civil zone offset; the engine default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl BirthRequest {
    /// Parse a request from JSON text.
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every field and build the engine input.
    pub fn to_input(&self) -> Result<BirthInput, RequestError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|e| RequestError::field("date", e.to_string()))?;
        let time = self.birth_time()?;
        let sex: Sex = self
            .sex_at_birth
            .parse()
            .map_err(|_| RequestError::field("sexAtBirth", "expected male or female"))?;

        let mut input = BirthInput::new(date.year(), date.month(), date.day(), time, sex);
        if !self.place.trim().is_empty() {
            input = input.with_place(self.place.trim());
        }
        if let Some(geo) = self.place_geo {
            if !(-90.0..=90.0).contains(&geo.lat) {
                return Err(RequestError::field("placeGeo", "lat must be in [-90, 90]"));
            }
            if !(-180.0..=180.0).contains(&geo.lon) {
                return Err(RequestError::field("placeGeo", "lon must be in [-180, 180]"));
            }
            input = input.with_geo(GeoPoint::new(geo.lat, geo.lon));
        }
        if let Some(offset) = self.utc_offset_minutes {
            input = input.with_utc_offset(offset);
        }
        Ok(input)
    }

    fn birth_time(&self) -> Result<BirthTime, RequestError> {
        match (&self.time, self.time_unknown) {
            (Some(_), true) => Err(RequestError::field(
                "time",
                "must be omitted when timeUnknown is set",
            )),
            (None, true) => Ok(BirthTime::Unknown),
            (None, false) => Err(RequestError::field(
                "time",
                "required unless timeUnknown is set",
            )),
            (Some(text), false) => {
                let t = parse_time(text.trim())
                    .ok_or_else(|| RequestError::field("time", "expected HH:mm or HH:mm:ss"))?;
                Ok(BirthTime::Known {
                    hour: t.hour(),
                    minute: t.minute(),
                    second: f64::from(t.second()),
                })
            }
        }
    }
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
}
