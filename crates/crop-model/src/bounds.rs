//! Accepted ranges for environmental inputs.

use serde::{Deserialize, Serialize};

use crate::records::Environment;

/// Inclusive limits applied to inference inputs. `None` leaves a side open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub rainfall_min: f64,
    pub rainfall_max: Option<f64>,
    pub pesticides_min: f64,
    pub pesticides_max: Option<f64>,
    pub temp_min: f64,
    pub temp_max: f64,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            rainfall_min: 0.0,
            rainfall_max: Some(10_000.0),
            pesticides_min: 0.0,
            pesticides_max: None,
            temp_min: -50.0,
            temp_max: 60.0,
        }
    }
}

impl InputBounds {
    /// Returns one message per violated limit; empty when the input is usable.
    pub fn check(&self, env: &Environment) -> Vec<String> {
        let mut problems = Vec::new();
        check_value(
            &mut problems,
            "rainfall_mm",
            env.rainfall_mm,
            self.rainfall_min,
            self.rainfall_max,
        );
        check_value(
            &mut problems,
            "pesticides_tonnes",
            env.pesticides_tonnes,
            self.pesticides_min,
            self.pesticides_max,
        );
        check_value(
            &mut problems,
            "avg_temp",
            env.avg_temp,
            self.temp_min,
            Some(self.temp_max),
        );
        problems
    }
}

fn check_value(problems: &mut Vec<String>, name: &str, value: f64, min: f64, max: Option<f64>) {
    if !value.is_finite() {
        problems.push(format!("{name} must be a finite number"));
        return;
    }
    match max {
        Some(max) if value < min || value > max => {
            problems.push(format!("{name} must be between {min} and {max} (got {value})"));
        }
        None if value < min => {
            problems.push(format!("{name} must be at least {min} (got {value})"));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(rain: f64, pest: f64, temp: f64) -> Environment {
        Environment::new("India", rain, pest, temp)
    }

    #[test]
    fn accepts_values_inside_limits() {
        let bounds = InputBounds::default();
        assert!(bounds.check(&env(0.0, 0.0, -50.0)).is_empty());
        assert!(bounds.check(&env(10_000.0, 1e9, 60.0)).is_empty());
    }

    #[test]
    fn reports_each_violation() {
        let problems = InputBounds::default().check(&env(-1.0, -5.0, 61.0));
        assert_eq!(problems.len(), 3);
        assert!(problems[0].starts_with("rainfall_mm"));
        assert!(problems[1].starts_with("pesticides_tonnes"));
        assert!(problems[2].starts_with("avg_temp"));
    }

    #[test]
    fn rejects_non_finite_numbers() {
        let problems = InputBounds::default().check(&env(f64::NAN, 1.0, f64::INFINITY));
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().all(|p| p.contains("finite")));
    }
}
