//! Threshold evaluation for sensor readings.
//!
//! Pure logic -- no database access. The caller is responsible for deciding
//! what to do with a breach (store it, notify operators).

use crate::alert::Severity;

/// Warning threshold for temperature (°C). Exceeding it triggers an alert.
pub const TEMPERATURE_WARNING_C: f64 = 30.0;
/// Warning threshold for relative humidity (%).
pub const HUMIDITY_WARNING_PCT: f64 = 70.0;
/// Warning threshold for barometric pressure (hPa).
pub const PRESSURE_WARNING_HPA: f64 = 1020.0;

/// Critical threshold for temperature (°C). Reaching it upgrades severity.
pub const TEMPERATURE_CRITICAL_C: f64 = 35.0;
/// Critical threshold for relative humidity (%).
pub const HUMIDITY_CRITICAL_PCT: f64 = 85.0;
/// Critical threshold for barometric pressure (hPa).
pub const PRESSURE_CRITICAL_HPA: f64 = 1030.0;

/// The three metric values carried by a sensor reading.
#[derive(Debug, Clone, Copy)]
pub struct ReadingMetrics {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// The outcome of evaluating a breaching reading.
#[derive(Debug, Clone)]
pub struct Breach {
    /// Overall severity across all triggered conditions.
    pub severity: Severity,
    /// One human-readable line per exceeded warning threshold.
    pub triggers: Vec<String>,
    /// All triggers joined by `" | "`, stored on the alert record.
    pub message: String,
}

/// Evaluate a reading against the warning and critical thresholds.
///
/// Each warning threshold is checked independently and contributes one
/// trigger line. Severity is `Critical` when any metric reaches its critical
/// threshold, otherwise `Warning`. Returns `None` when no threshold is
/// exceeded; the caller must not persist or notify in that case.
pub fn evaluate(metrics: &ReadingMetrics) -> Option<Breach> {
    let mut triggers = Vec::new();

    if metrics.temperature > TEMPERATURE_WARNING_C {
        triggers.push(format!(
            "Temperature: {}°C (limit: {TEMPERATURE_WARNING_C}°C)",
            metrics.temperature
        ));
    }
    if metrics.humidity > HUMIDITY_WARNING_PCT {
        triggers.push(format!(
            "Humidity: {}% (limit: {HUMIDITY_WARNING_PCT}%)",
            metrics.humidity
        ));
    }
    if metrics.pressure > PRESSURE_WARNING_HPA {
        triggers.push(format!(
            "Pressure: {} hPa (limit: {PRESSURE_WARNING_HPA} hPa)",
            metrics.pressure
        ));
    }

    if triggers.is_empty() {
        return None;
    }

    let critical = metrics.temperature >= TEMPERATURE_CRITICAL_C
        || metrics.humidity >= HUMIDITY_CRITICAL_PCT
        || metrics.pressure >= PRESSURE_CRITICAL_HPA;
    let severity = if critical {
        Severity::Critical
    } else {
        Severity::Warning
    };

    let message = triggers.join(" | ");

    Some(Breach {
        severity,
        triggers,
        message,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(temperature: f64, humidity: f64, pressure: f64) -> ReadingMetrics {
        ReadingMetrics {
            temperature,
            humidity,
            pressure,
        }
    }

    #[test]
    fn warning_on_high_temperature_only() {
        let breach = evaluate(&metrics(32.0, 50.0, 1000.0)).expect("should breach");
        assert_eq!(breach.severity, Severity::Warning);
        assert_eq!(breach.triggers, vec!["Temperature: 32°C (limit: 30°C)"]);
        assert_eq!(breach.message, "Temperature: 32°C (limit: 30°C)");
    }

    #[test]
    fn critical_with_all_three_triggers() {
        let breach = evaluate(&metrics(36.0, 90.0, 1035.0)).expect("should breach");
        assert_eq!(breach.severity, Severity::Critical);
        assert_eq!(breach.triggers.len(), 3);
        assert_eq!(
            breach.message,
            "Temperature: 36°C (limit: 30°C) | Humidity: 90% (limit: 70%) | Pressure: 1035 hPa (limit: 1020 hPa)"
        );
    }

    #[test]
    fn no_breach_when_all_within_limits() {
        assert!(evaluate(&metrics(20.0, 40.0, 1000.0)).is_none());
    }

    #[test]
    fn warning_thresholds_are_exclusive() {
        // Exactly at the warning limit does not trigger.
        assert!(evaluate(&metrics(30.0, 70.0, 1020.0)).is_none());
    }

    #[test]
    fn critical_thresholds_are_inclusive() {
        let breach = evaluate(&metrics(35.0, 40.0, 1000.0)).expect("should breach");
        assert_eq!(breach.severity, Severity::Critical);

        let breach = evaluate(&metrics(20.0, 85.0, 1000.0)).expect("should breach");
        assert_eq!(breach.severity, Severity::Critical);

        let breach = evaluate(&metrics(20.0, 40.0, 1030.0)).expect("should breach");
        assert_eq!(breach.severity, Severity::Critical);
    }

    #[test]
    fn single_critical_metric_upgrades_all_triggers() {
        // Temperature is only a warning, but humidity is critical.
        let breach = evaluate(&metrics(32.0, 86.0, 1000.0)).expect("should breach");
        assert_eq!(breach.severity, Severity::Critical);
        assert_eq!(breach.triggers.len(), 2);
    }

    #[test]
    fn fractional_values_render_verbatim() {
        let breach = evaluate(&metrics(31.5, 50.0, 1000.0)).expect("should breach");
        assert_eq!(breach.triggers, vec!["Temperature: 31.5°C (limit: 30°C)"]);
    }
}
