use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::stats::{ListEntry, PilotStat, ShipStat, UpgradeStat};

/// Sort modes offered by the dashboard ranking panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingSort {
    #[default]
    Popularity,
    WinRate,
}

impl RankingSort {
    pub fn as_str(self) -> &'static str {
        match self {
            RankingSort::Popularity => "popularity",
            RankingSort::WinRate => "win_rate",
        }
    }

    /// Short toggle label shown in panel headers.
    pub fn short_label(self) -> &'static str {
        match self {
            RankingSort::Popularity => "POP",
            RankingSort::WinRate => "WR%",
        }
    }
}

/// Records that can be ranked by the dashboard panels.
pub trait Ranked {
    fn popularity(&self) -> f64;
    fn win_rate(&self) -> f64;

    fn rank_value(&self, sort: RankingSort) -> f64 {
        match sort {
            RankingSort::Popularity => self.popularity(),
            RankingSort::WinRate => self.win_rate(),
        }
    }
}

impl Ranked for ListEntry {
    fn popularity(&self) -> f64 {
        f64::from(self.count)
    }

    fn win_rate(&self) -> f64 {
        self.win_rate.sort_value()
    }
}

impl Ranked for ShipStat {
    fn popularity(&self) -> f64 {
        self.popularity
    }

    fn win_rate(&self) -> f64 {
        self.win_rate.sort_value()
    }
}

impl Ranked for PilotStat {
    fn popularity(&self) -> f64 {
        self.popularity
    }

    fn win_rate(&self) -> f64 {
        self.win_rate.sort_value()
    }
}

impl Ranked for UpgradeStat {
    fn popularity(&self) -> f64 {
        self.popularity
    }

    fn win_rate(&self) -> f64 {
        self.win_rate.sort_value()
    }
}

fn comparable(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Return a copy of `items` sorted descending by `key`. The input is never
/// mutated and ties keep their original relative order.
pub fn sorted_by<T, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let mut keyed: Vec<(f64, &T)> = items.iter().map(|item| (comparable(key(item)), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}

pub fn ranked<T: Ranked + Clone>(items: &[T], sort: RankingSort) -> Vec<T> {
    sorted_by(items, |item| item.rank_value(sort))
}

/// The first `n` entries of [`ranked`].
pub fn top_ranked<T: Ranked + Clone>(items: &[T], sort: RankingSort, n: usize) -> Vec<T> {
    let mut out = ranked(items, sort);
    out.truncate(n);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::win_rate::WinRate;

    fn ship(name: &str, popularity: f64, win_rate: WinRate) -> ShipStat {
        ShipStat {
            ship_name: name.to_string(),
            popularity,
            win_rate,
            ..ShipStat::default()
        }
    }

    fn list(signature: &str, count: u32, win_rate: f64) -> ListEntry {
        ListEntry {
            signature: signature.to_string(),
            count,
            win_rate: WinRate::Numeric(win_rate),
            ..ListEntry::default()
        }
    }

    fn names(ships: &[ShipStat]) -> Vec<&str> {
        ships.iter().map(|s| s.ship_name.as_str()).collect()
    }

    #[test]
    fn not_applicable_win_rate_sorts_below_numbers() {
        let ships = vec![
            ship("na", 1.0, WinRate::NotApplicable),
            ship("ten", 1.0, WinRate::Numeric(10.0)),
        ];
        let sorted = ranked(&ships, RankingSort::WinRate);
        assert_eq!(names(&sorted), vec!["ten", "na"]);
    }

    #[test]
    fn does_not_mutate_input_and_preserves_length() {
        let ships = vec![
            ship("a", 1.0, WinRate::Numeric(40.0)),
            ship("b", 9.0, WinRate::Numeric(60.0)),
            ship("c", 4.0, WinRate::NotApplicable),
        ];
        let before = ships.clone();

        let sorted = ranked(&ships, RankingSort::Popularity);

        assert_eq!(ships, before);
        assert_eq!(sorted.len(), ships.len());
        assert_eq!(names(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn sorting_is_idempotent_and_stable_on_ties() {
        let ships = vec![
            ship("first", 5.0, WinRate::Numeric(50.0)),
            ship("second", 5.0, WinRate::Numeric(50.0)),
            ship("third", 7.0, WinRate::Numeric(50.0)),
            ship("fourth", 5.0, WinRate::Numeric(50.0)),
        ];

        let once = ranked(&ships, RankingSort::Popularity);
        let twice = ranked(&once, RankingSort::Popularity);

        assert_eq!(names(&once), vec!["third", "first", "second", "fourth"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn list_popularity_uses_count_field() {
        let lists = vec![list("rare", 2, 80.0), list("common", 11, 45.0)];

        let by_pop = ranked(&lists, RankingSort::Popularity);
        assert_eq!(by_pop[0].signature, "common");

        let by_wr = ranked(&lists, RankingSort::WinRate);
        assert_eq!(by_wr[0].signature, "rare");
    }

    #[test]
    fn generic_sorter_coerces_non_finite_keys() {
        let values = vec![f64::NAN, 3.0, f64::INFINITY, -1.0];
        let sorted = sorted_by(&values, |v| *v);
        assert_eq!(sorted[0], 3.0);
        assert!(sorted[1].is_nan());
        assert!(sorted[2].is_infinite());
        assert_eq!(sorted[3], -1.0);
    }

    #[test]
    fn top_ranked_truncates() {
        let ships: Vec<ShipStat> = (0..8)
            .map(|i| ship(&format!("s{i}"), f64::from(i), WinRate::NotApplicable))
            .collect();
        let top = top_ranked(&ships, RankingSort::Popularity, 5);
        assert_eq!(names(&top), vec!["s7", "s6", "s5", "s4", "s3"]);
    }
}
