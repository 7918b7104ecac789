use crate::ServiceState;

/// In which direction a value has to cross the thresholds to raise the state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriggerIfValue {
    /// Raise when the value is greater than or equal to the threshold.
    #[default]
    GreaterOrEqual,
    /// Raise when the value is strictly less than the threshold.
    Less,
}

impl TriggerIfValue {
    fn triggers(&self, value: f64, threshold: f64) -> bool {
        match self {
            TriggerIfValue::GreaterOrEqual => value >= threshold,
            TriggerIfValue::Less => value < threshold,
        }
    }
}

/// A warning/critical pair together with the direction they apply in.
///
/// The critical threshold is always checked first, so a value can never be reported as both
/// warning and critical.
///
/// ```rust
/// # use check_prometheus::{ServiceState, Thresholds, TriggerIfValue};
/// let thresholds = Thresholds::new(30.0, 15.0, TriggerIfValue::Less);
/// assert_eq!(thresholds.state_for(35.0), ServiceState::Ok);
/// assert_eq!(thresholds.state_for(20.0), ServiceState::Warning);
/// assert_eq!(thresholds.state_for(10.0), ServiceState::Critical);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Thresholds {
    warning: f64,
    critical: f64,
    trigger: TriggerIfValue,
}

impl Thresholds {
    pub fn new(warning: f64, critical: f64, trigger: TriggerIfValue) -> Self {
        Thresholds {
            warning,
            critical,
            trigger,
        }
    }

    pub fn warning(&self) -> f64 {
        self.warning
    }

    pub fn critical(&self) -> f64 {
        self.critical
    }

    pub fn trigger(&self) -> TriggerIfValue {
        self.trigger
    }

    /// State of a single value. Comparisons involving NaN are false, so NaN is always Ok.
    pub fn state_for(&self, value: f64) -> ServiceState {
        if self.trigger.triggers(value, self.critical) {
            ServiceState::Critical
        } else if self.trigger.triggers(value, self.warning) {
            ServiceState::Warning
        } else {
            ServiceState::Ok
        }
    }

    /// The threshold that was crossed to reach `state`, if any.
    pub fn threshold_for(&self, state: ServiceState) -> Option<f64> {
        match state {
            ServiceState::Critical => Some(self.critical),
            ServiceState::Warning => Some(self.warning),
            ServiceState::Ok | ServiceState::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greater_or_equal() {
        let thresholds = Thresholds::new(15.0, 30.0, TriggerIfValue::GreaterOrEqual);

        assert_eq!(thresholds.state_for(12.0), ServiceState::Ok);
        assert_eq!(thresholds.state_for(15.0), ServiceState::Warning);
        assert_eq!(thresholds.state_for(18.0), ServiceState::Warning);
        assert_eq!(thresholds.state_for(30.0), ServiceState::Critical);
        assert_eq!(thresholds.state_for(35.0), ServiceState::Critical);
    }

    #[test]
    fn test_critical_wins_regardless_of_warning() {
        for warning in [-100.0, 0.0, 5.0, 10.0, 50.0, 1e9] {
            let thresholds = Thresholds::new(warning, 10.0, TriggerIfValue::GreaterOrEqual);
            assert_eq!(thresholds.state_for(10.0), ServiceState::Critical);
            assert_eq!(thresholds.state_for(11.5), ServiceState::Critical);

            let thresholds = Thresholds::new(warning, 10.0, TriggerIfValue::Less);
            assert_eq!(thresholds.state_for(9.99), ServiceState::Critical);
        }
    }

    #[test]
    fn test_less() {
        let thresholds = Thresholds::new(30.0, 15.0, TriggerIfValue::Less);

        assert_eq!(thresholds.state_for(35.0), ServiceState::Ok);
        assert_eq!(thresholds.state_for(30.0), ServiceState::Ok);
        assert_eq!(thresholds.state_for(29.9), ServiceState::Warning);
        assert_eq!(thresholds.state_for(15.0), ServiceState::Warning);
        assert_eq!(thresholds.state_for(14.9), ServiceState::Critical);
    }

    #[test]
    fn test_default_thresholds_trigger_on_zero() {
        // Both thresholds default to zero on the command line.
        let thresholds = Thresholds::new(0.0, 0.0, TriggerIfValue::GreaterOrEqual);
        assert_eq!(thresholds.state_for(0.0), ServiceState::Critical);
        assert_eq!(thresholds.state_for(-1.0), ServiceState::Ok);
    }

    #[test]
    fn test_special_values() {
        let thresholds = Thresholds::new(3.0, 10.0, TriggerIfValue::GreaterOrEqual);
        assert_eq!(thresholds.state_for(f64::NAN), ServiceState::Ok);
        assert_eq!(thresholds.state_for(f64::INFINITY), ServiceState::Critical);

        let thresholds = Thresholds::new(3.0, 10.0, TriggerIfValue::Less);
        assert_eq!(thresholds.state_for(f64::NAN), ServiceState::Ok);
        assert_eq!(
            thresholds.state_for(f64::NEG_INFINITY),
            ServiceState::Critical
        );
    }

    #[test]
    fn test_threshold_for() {
        let thresholds = Thresholds::new(3.0, 10.0, TriggerIfValue::GreaterOrEqual);
        assert_eq!(thresholds.threshold_for(ServiceState::Critical), Some(10.0));
        assert_eq!(thresholds.threshold_for(ServiceState::Warning), Some(3.0));
        assert_eq!(thresholds.threshold_for(ServiceState::Ok), None);
    }
}
