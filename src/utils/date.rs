// Storage format for release dates, e.g. 2010-01-01. Matches the serde
// representation of chrono::NaiveDate so attribute parsing and item
// serialization stay in agreement.
pub const DATE_FMT: &str = "%Y-%m-%d";
