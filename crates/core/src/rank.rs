use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Ascending,
    Descending,
}

/// Competition ("min") ranking: tied values share the best rank and the
/// ranks after a tie are skipped. Missing values stay unranked and do not
/// push anyone else down.
pub fn competition_rank<T>(values: &[Option<T>], order: RankOrder) -> Vec<Option<u32>>
where
    T: PartialOrd + Copy,
{
    values
        .iter()
        .map(|value| {
            let value = (*value)?;
            let ahead = values
                .iter()
                .flatten()
                .filter(|&&other| {
                    let cmp = other.partial_cmp(&value);
                    match order {
                        RankOrder::Descending => cmp == Some(Ordering::Greater),
                        RankOrder::Ascending => cmp == Some(Ordering::Less),
                    }
                })
                .count();
            Some(ahead as u32 + 1)
        })
        .collect()
}

/// Ranks values that are always present.
pub fn rank_all<T>(values: &[T], order: RankOrder) -> Vec<u32>
where
    T: PartialOrd + Copy,
{
    let present: Vec<Option<T>> = values.iter().copied().map(Some).collect();
    competition_rank(&present, order)
        .into_iter()
        .map(|rank| rank.unwrap_or(1))
        .collect()
}
