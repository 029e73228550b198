//! Per-strategy and per-mistake breakdowns of closed trades.

use crate::metrics::{avg_r_multiple, total_pnl, win_rate, ClosedTrade};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Performance of one strategy tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyBreakdown {
    pub strategy: String,
    pub trades: usize,
    /// Percent, 0–100.
    pub win_rate: f64,
    pub total_pnl: f64,
    pub avg_r_multiple: Option<f64>,
}

/// Occurrences of one mistake tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeCount {
    pub mistake_type: String,
    pub count: usize,
}

/// Group by strategy tag, sorted by name. Untagged trades are left out, as are
/// strategies with fewer than `min_trades` trades.
pub fn by_strategy(trades: &[ClosedTrade], min_trades: usize) -> Vec<StrategyBreakdown> {
    group_by_tag(trades, |t| t.strategy.as_deref())
        .into_iter()
        .filter(|(_, group)| group.len() >= min_trades.max(1))
        .map(|(strategy, group)| StrategyBreakdown {
            strategy,
            trades: group.len(),
            win_rate: win_rate(&group),
            total_pnl: total_pnl(&group),
            avg_r_multiple: avg_r_multiple(&group),
        })
        .collect()
}

/// Frequency of each mistake tag, most frequent first (ties by tag name).
pub fn mistake_histogram(trades: &[ClosedTrade]) -> Vec<MistakeCount> {
    let mut counts: Vec<MistakeCount> = group_by_tag(trades, |t| t.mistake_type.as_deref())
        .into_iter()
        .map(|(mistake_type, group)| MistakeCount { mistake_type, count: group.len() })
        .collect();
    // BTreeMap order already sorts by name; a stable sort keeps it for ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Blank tags count as untagged.
fn group_by_tag<'a, F>(trades: &'a [ClosedTrade], tag: F) -> BTreeMap<String, Vec<ClosedTrade>>
where
    F: Fn(&'a ClosedTrade) -> Option<&'a str>,
{
    let mut groups: BTreeMap<String, Vec<ClosedTrade>> = BTreeMap::new();
    for trade in trades {
        if let Some(key) = tag(trade).map(str::trim).filter(|k| !k.is_empty()) {
            groups.entry(key.to_string()).or_default().push(trade.clone());
        }
    }
    groups
}
