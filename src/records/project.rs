/// One housing lottery, flattened from the project and lottery responses.
/// Built once per run and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    /// Free text from the source. Used verbatim as the city grouping key.
    pub city: String,
    pub lottery_id: String,
    /// Price per square meter
    pub sqm_price: f64,
    /// Apartments in general competition (local quota excluded)
    pub total_apartments: f64,
    /// Apartments reserved for local residents
    pub local_apartments: f64,
    /// General-pool applicants
    pub subscribers: f64,
}

impl ProjectRecord {
    /// Apartments per subscriber. Non-finite when there are no subscribers.
    pub fn apartment_ratio(&self) -> f64 {
        self.total_apartments / self.subscribers
    }
}
