use crate::snapshot::engine::Snapshot;

/// One row of the ranked standings.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RankedRow {
    pub entity: String,
    pub score: f64,
    /// 0-based position.
    pub rank: usize,
}

/// Order a snapshot into its top-`top_n` rows.
///
/// Absent entries are dropped, the rest sorted by descending score. Equal scores rank by
/// ascending entity id, independent of the order entries arrive in.
pub fn rank(snapshot: &Snapshot<'_>, top_n: usize) -> Vec<RankedRow> {
    let mut present: Vec<(&str, f64)> = snapshot
        .entries
        .iter()
        .filter_map(|&(id, score)| score.map(|s| (id, s)))
        .collect();
    present.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    present
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(rank, (id, score))| RankedRow {
            entity: id.to_string(),
            score,
            rank,
        })
        .collect()
}
