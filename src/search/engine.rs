use crate::models::PropertyRecord;
use crate::query::FilterSet;

/// Whether a record satisfies every constraint present in `filters`.
///
/// A record lacking the field a present filter inspects never matches.
pub fn matches(record: &PropertyRecord, filters: &FilterSet) -> bool {
    if let Some(bhk) = &filters.bhk {
        if record.bhk.as_deref() != Some(bhk.as_str()) {
            return false;
        }
    }

    if let Some(max_price) = filters.max_price {
        match record.price {
            Some(price) if (price as f64) <= max_price => {}
            _ => return false,
        }
    }

    if let Some(city) = &filters.city {
        match &record.city {
            Some(record_city) if record_city.to_lowercase() == city.to_lowercase() => {}
            _ => return false,
        }
    }

    if let Some(status) = &filters.status {
        if record.status.as_ref() != Some(status) {
            return false;
        }
    }

    if let Some(locality) = &filters.locality {
        match &record.locality {
            Some(record_locality)
                if record_locality
                    .to_lowercase()
                    .contains(&locality.to_lowercase()) => {}
            _ => return false,
        }
    }

    true
}

/// Records of `dataset` matching `filters`, in their original order.
///
/// The dataset is only read; matching records are cloned into the result.
pub fn search(dataset: &[PropertyRecord], filters: &FilterSet) -> Vec<PropertyRecord> {
    dataset
        .iter()
        .filter(|record| matches(record, filters))
        .cloned()
        .collect()
}
