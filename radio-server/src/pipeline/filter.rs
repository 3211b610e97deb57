//! Result filtering and truncation shared by every list query.

use crate::domain::{MAX_RESULTS, Presentability, StationRecord, StationSummary};

/// Keep presentable records in upstream order, stopping at [`MAX_RESULTS`].
///
/// Records past the cap are ignored without being inspected.
pub fn presentable_summaries<'a>(
    records: impl IntoIterator<Item = &'a StationRecord>,
    presentability: &Presentability,
) -> Vec<StationSummary> {
    records
        .into_iter()
        .filter(|record| presentability.admits(record))
        .take(MAX_RESULTS)
        .map(StationRecord::summary)
        .collect()
}
