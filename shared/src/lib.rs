pub mod colors;
pub mod factions;
pub mod icons;
pub mod options;
pub mod pagination;
pub mod query;
pub mod ranking;
pub mod stats;
pub mod view;
pub mod win_rate;

pub use factions::{Faction, faction_color, faction_icon_class, faction_label};
pub use options::FilterOption;
pub use pagination::PageWindow;
pub use query::{BrowserState, DataSource, QueryParams, SortDirection, SortMetric};
pub use ranking::{Ranked, RankingSort, ranked, sorted_by, top_ranked};
pub use stats::*;
pub use view::{Route, ViewParams};
pub use win_rate::{BadgeTone, WinRate};
