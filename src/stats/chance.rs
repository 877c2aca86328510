use std::cmp::Ordering;

/// Shown in reports in place of a number when a chance cannot be computed.
pub const UNDEFINED: &str = "undefined";

/// A win chance in percent.
///
/// `Undefined` is the sentinel for a ratio with a zero denominator. It is
/// never coerced to zero; it ranks above every finite chance so it shows up
/// at the top of a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Chance {
    Finite(f64),
    Undefined,
}

impl Chance {
    /// Percent from a plain ratio (0.1 -> 10%). No clamping: ratios above 1
    /// mean more apartments than subscribers and stay above 100%.
    pub fn from_ratio(ratio: f64) -> Self {
        let percent = ratio * 100.0;
        if percent.is_finite() {
            Chance::Finite(percent)
        } else {
            Chance::Undefined
        }
    }

    /// `numerator / denominator * 100`.
    pub fn percent(numerator: f64, denominator: f64) -> Self {
        Self::from_ratio(numerator / denominator)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Chance::Finite(v) => Some(*v),
            Chance::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Chance::Undefined)
    }

    /// Ascending order with `Undefined` above everything.
    pub fn rank_cmp(&self, other: &Chance) -> Ordering {
        match (self, other) {
            (Chance::Finite(a), Chance::Finite(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Chance::Finite(_), Chance::Undefined) => Ordering::Less,
            (Chance::Undefined, Chance::Finite(_)) => Ordering::Greater,
            (Chance::Undefined, Chance::Undefined) => Ordering::Equal,
        }
    }

    /// Two decimals, or the undefined marker.
    pub fn display(&self) -> String {
        match self {
            Chance::Finite(v) => format!("{:.2}", v),
            Chance::Undefined => UNDEFINED.to_string(),
        }
    }
}
