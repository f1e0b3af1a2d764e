/// Which bound, if any, a value was pulled back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClampType {
    None,
    LowerBound,
    UpperBound,
}

/// A value forced into `[min, max]`, remembering whether that moved it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampedValue {
    pub value: f64,
    pub clamp_type: ClampType,
}

impl ClampedValue {
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        debug_assert!(min <= max, "clamp range is inverted: {min} > {max}");
        if value < min {
            Self {
                value: min,
                clamp_type: ClampType::LowerBound,
            }
        } else if value > max {
            Self {
                value: max,
                clamp_type: ClampType::UpperBound,
            }
        } else {
            Self {
                value,
                clamp_type: ClampType::None,
            }
        }
    }

    pub fn was_clamped(&self) -> bool {
        self.clamp_type != ClampType::None
    }
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    ClampedValue::new(value, min, max).value
}
