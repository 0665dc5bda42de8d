use crate::model::BoardEntry;

/// Match quality of a board for a query; lower sorts first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    CodePrefix = 0,
    CodeContains = 1,
    TitleContains = 2,
    /// Never produced for an entry that passed the filter
    Unmatched = 3,
}

/// Tier of an entry for an already-lowercased query
pub fn match_tier(entry: &BoardEntry, query: &str) -> MatchTier {
    let code = entry.code.to_lowercase();
    if code.starts_with(query) {
        MatchTier::CodePrefix
    } else if code.contains(query) {
        MatchTier::CodeContains
    } else if entry.title.to_lowercase().contains(query) {
        MatchTier::TitleContains
    } else {
        MatchTier::Unmatched
    }
}

fn matches(entry: &BoardEntry, query: &str) -> bool {
    query.is_empty()
        || entry.code.to_lowercase().contains(query)
        || entry.title.to_lowercase().contains(query)
}

/// Filter and rank boards for a quick-jump query, keeping at most `limit`.
///
/// Case-insensitive substring match on code or title. An empty query keeps
/// list order; otherwise entries sort by tier, then by list position.
pub fn rank_boards<'a>(dataset: &'a [BoardEntry], query: &str, limit: usize) -> Vec<&'a BoardEntry> {
    let query = query.trim().to_lowercase();
    let mut ranked: Vec<&BoardEntry> = dataset.iter().filter(|e| matches(e, &query)).collect();
    if !query.is_empty() {
        ranked.sort_by_key(|e| (match_tier(e, &query), e.index));
    }
    ranked.truncate(limit);
    ranked
}
