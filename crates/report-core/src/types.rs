use serde_json::{Map, Value};

use crate::format::to_decimal;

/// Flat attribute bag for one symbol, as delivered by a provider.
///
/// No key is guaranteed to be present and values may be numbers, strings,
/// nulls or anything else the provider felt like sending.
pub type RawRecord = Map<String, Value>;

/// Keys the minimal raw endpoint strips before echoing a record back.
pub const PERSONNEL_FIELDS: [&str; 2] = ["companyOfficers", "fullTimeEmployees"];

/// First value among `keys` that coerces to a number.
///
/// Used to resolve anchor values such as the current price, where a live
/// field is preferred and a regular-market field is the fallback.
pub fn first_numeric<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| to_decimal(value).is_some())
}

/// Drop personnel data from a raw record.
pub fn strip_personnel(mut record: RawRecord) -> RawRecord {
    for key in PERSONNEL_FIELDS {
        record.remove(key);
    }
    record
}
