use std::collections::BTreeMap;

use crate::models::{AggregateCounts, Dataset, SentimentRecord};

/// Collect scored records into a dataset and count labels.
///
/// Record order is preserved. Counts are sparse: labels that never occur
/// have no entry.
pub fn aggregate(records: Vec<SentimentRecord>) -> (Dataset, AggregateCounts) {
    let mut counts = BTreeMap::new();
    for record in &records {
        *counts.entry(record.label).or_insert(0) += 1;
    }
    (Dataset { records }, AggregateCounts(counts))
}
