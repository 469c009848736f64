//! Time series for one animal's weight and climate logs.
//!
//! Points are ordered by timestamp ascending. Logs for other animals are ignored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use th_core::entities::{ClimateLog, WeightLog};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub at: DateTime<Utc>,
    pub value: f64,
}

/// Temperature and humidity as two aligned series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClimateSeries {
    pub temperature: Vec<LinePoint>,
    pub humidity: Vec<LinePoint>,
}

impl ClimateSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }
}

/// Weight readings for `animal_id`, oldest first.
#[must_use]
pub fn weight_series(logs: &[WeightLog], animal_id: &str) -> Vec<LinePoint> {
    let mut points: Vec<LinePoint> = logs
        .iter()
        .filter(|log| log.animal_id == animal_id)
        .map(|log| LinePoint {
            at: log.measured_at,
            value: log.weight,
        })
        .collect();
    points.sort_by_key(|point| point.at);
    points
}

/// Climate readings for `animal_id`, oldest first.
#[must_use]
pub fn climate_series(logs: &[ClimateLog], animal_id: &str) -> ClimateSeries {
    let mut matching: Vec<&ClimateLog> = logs.iter().filter(|log| log.animal_id == animal_id).collect();
    matching.sort_by_key(|log| log.recorded_at);

    let (temperature, humidity) = matching
        .into_iter()
        .map(|log| {
            (
                LinePoint {
                    at: log.recorded_at,
                    value: log.temperature,
                },
                LinePoint {
                    at: log.recorded_at,
                    value: log.humidity,
                },
            )
        })
        .unzip();

    ClimateSeries {
        temperature,
        humidity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap()
    }

    fn weight(animal_id: &str, day: u32, grams: f64) -> WeightLog {
        WeightLog {
            id: format!("wgt-{day}"),
            animal_id: animal_id.to_string(),
            measured_at: at(day),
            weight: grams,
            note: None,
            created_at: at(day),
            updated_at: at(day),
        }
    }

    fn climate(animal_id: &str, day: u32, temperature: f64, humidity: f64) -> ClimateLog {
        ClimateLog {
            id: format!("clm-{day}"),
            animal_id: animal_id.to_string(),
            recorded_at: at(day),
            temperature,
            humidity,
            note: None,
            created_at: at(day),
            updated_at: at(day),
        }
    }

    #[test]
    fn weight_series_is_sorted_and_scoped() {
        let logs = vec![
            weight("ani-1", 3, 120.0),
            weight("ani-2", 2, 80.0),
            weight("ani-1", 1, 100.0),
        ];
        let series = weight_series(&logs, "ani-1");
        assert_eq!(
            series,
            vec![
                LinePoint { at: at(1), value: 100.0 },
                LinePoint { at: at(3), value: 120.0 },
            ]
        );
    }

    #[test]
    fn climate_series_keeps_series_aligned() {
        let logs = vec![climate("ani-1", 9, 30.5, 55.0), climate("ani-1", 4, 28.0, 60.0)];
        let series = climate_series(&logs, "ani-1");
        assert_eq!(series.temperature.len(), 2);
        assert_eq!(series.temperature[0].value, 28.0);
        assert_eq!(series.humidity[0].value, 60.0);
        assert_eq!(series.temperature[1].at, series.humidity[1].at);
    }

    #[test]
    fn unknown_animal_gives_empty_series() {
        assert!(weight_series(&[weight("ani-1", 1, 1.0)], "ani-9").is_empty());
        assert!(climate_series(&[], "ani-1").is_empty());
    }
}
