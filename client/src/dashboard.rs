use leptos::prelude::*;

use m3tacron_shared::icons::upgrade_type_label;
use m3tacron_shared::{
    DataSource, FactionStat, MetaSnapshot, RankingSort, WinRate, faction_color, faction_label,
    top_ranked,
};

use crate::api::{meta_url, use_meta};
use crate::app::CurrentView;
use crate::colors::{BORDER, MONO, SANS, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::icons::FactionIcon;
use crate::ranking::{RankingPanel, TopItemRow, TopListRow, format_count, win_rate_subvalue};
use crate::time_format::format_sync_label;
use crate::widgets::{LoadingLine, StatCard, panel_style};

const TOP_N: usize = 5;

/// Headline value and secondary line of a leaderboard row for `sort`.
fn ranked_values(sort: RankingSort, popularity: f64, games: u32, win_rate: &WinRate) -> (String, String) {
    match sort {
        RankingSort::Popularity => (format_count(popularity), win_rate_subvalue(win_rate)),
        RankingSort::WinRate => (win_rate.label(), format!("{games} GAMES")),
    }
}

fn faction_share(faction: &FactionStat, total: u32) -> f64 {
    faction.percentage.unwrap_or_else(|| {
        if total == 0 {
            0.0
        } else {
            f64::from(faction.popularity) * 100.0 / f64::from(total)
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DashboardPane {
    Loading,
    Unavailable,
    /// Snapshot on screen, labelled with the source it was loaded for.
    Snapshot(DataSource),
}

/// A failed current request always wins; otherwise whatever snapshot is
/// loaded stays up, even while another source is being fetched.
fn dashboard_pane(current_failed: bool, shown_key: Option<&str>) -> DashboardPane {
    if current_failed {
        return DashboardPane::Unavailable;
    }
    shown_key
        .and_then(|key| DataSource::ALL.into_iter().find(|s| meta_url(*s) == key))
        .map_or(DashboardPane::Loading, DashboardPane::Snapshot)
}

#[component]
fn NoData() -> impl IntoView {
    view! {
        <div style=format!("padding: 12px; font-size: 0.85rem; color: {TEXT_SECONDARY}; font-family: {MONO};")>
            "No data available."
        </div>
    }
}

/// Shown when the snapshot cannot be loaded at all.
#[component]
fn BackendUnavailable() -> impl IntoView {
    view! {
        <div style=format!("{} max-width: 640px; margin: 64px auto; display: flex; flex-direction: column; gap: 12px;", panel_style())>
            <h2 style=format!("margin: 0; font-size: 1.1rem; font-family: {MONO}; letter-spacing: 0.1em; color: #ff6b6b;")>
                "BACKEND UNAVAILABLE"
            </h2>
            <p style=format!("margin: 0; color: {TEXT_SECONDARY}; line-height: 1.5;")>
                "Backend unreachable at 127.0.0.1:8000. Please start the backend and reload this page."
            </p>
        </div>
    }
}

#[component]
fn FactionShare(factions: Vec<FactionStat>) -> impl IntoView {
    let total: u32 = factions.iter().map(|f| f.popularity).sum();
    let mut rows: Vec<(FactionStat, f64)> = factions
        .into_iter()
        .filter(|f| !f.xws.is_empty())
        .map(|f| {
            let share = faction_share(&f, total);
            (f, share)
        })
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    view! {
        <div style=format!("{} display: flex; flex-direction: column; gap: 10px;", panel_style())>
            <h3 style=format!("margin: 0; font-size: 0.85rem; font-weight: 700; letter-spacing: 0.1em; color: {TEXT_PRIMARY}; font-family: {MONO};")>
                "FACTION SHARE"
            </h3>
            {rows
                .into_iter()
                .map(|(faction, share)| {
                    let color = faction_color(&faction.xws);
                    view! {
                        <div style="display: flex; align-items: center; gap: 10px;">
                            <FactionIcon faction=faction.xws.clone() size="1.1rem" />
                            <span style=format!("width: 150px; font-size: 0.8rem; color: {TEXT_SECONDARY};")>
                                {faction_label(&faction.xws)}
                            </span>
                            <div style="flex: 1; height: 8px; border-radius: 4px; background: rgba(255,255,255,0.05); overflow: hidden;">
                                <div style=format!("width: {:.1}%; height: 100%; background: {color};", share.clamp(0.0, 100.0)) />
                            </div>
                            <span style=format!("width: 56px; text-align: right; font-size: 0.8rem; font-family: {MONO}; color: {TEXT_PRIMARY};")>
                                {format!("{share:.1}%")}
                            </span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn DashboardBody(snapshot: MetaSnapshot, source: DataSource) -> impl IntoView {
    let MetaSnapshot {
        factions,
        lists,
        ships,
        pilots,
        upgrades,
        last_sync,
        date_range,
        total_tournaments,
        total_players,
        ..
    } = snapshot;

    view! {
        <div style="display: flex; flex-direction: column; gap: 24px;">
            <div style=format!("display: flex; flex-wrap: wrap; align-items: flex-end; justify-content: space-between; gap: 12px; border-bottom: 1px solid {BORDER}; padding-bottom: 20px;")>
                <div style="display: flex; flex-direction: column; gap: 6px;">
                    <h1 style=format!("margin: 0; font-size: 28px; font-weight: 700; font-family: {SANS}; color: {TEXT_PRIMARY};")>
                        "META SNAPSHOT"
                    </h1>
                    <span style=format!("font-size: 0.75rem; font-family: {MONO}; letter-spacing: 0.1em; color: {TEXT_SECONDARY};")>
                        {format!("{} \u{2022} {}", source.label(), format_sync_label(&last_sync))}
                    </span>
                </div>
                {(!date_range.is_empty()).then(|| view! {
                    <span style=format!("font-size: 0.75rem; font-family: {MONO}; letter-spacing: 0.1em; color: {TEXT_SECONDARY};")>
                        {format!("RANGE: {date_range}")}
                    </span>
                })}
            </div>

            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px;">
                <StatCard label="RECENT TOURNAMENTS" value=total_tournaments.to_string() subtext="Last 90 Days" />
                <StatCard label="RECENT LISTS" value=total_players.to_string() subtext="Last 90 Days" />
                <StatCard label="ACTIVE FACTIONS" value="7" />
            </div>

            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(340px, 1fr)); gap: 16px;">
                <RankingPanel
                    title="TOP SQUAD LISTS"
                    render=move |sort: RankingSort| {
                        let top = top_ranked(&lists, sort, TOP_N);
                        if top.is_empty() {
                            return view! { <NoData /> }.into_any();
                        }
                        top.into_iter()
                            .map(|list| view! { <TopListRow list=list sort=sort /> })
                            .collect_view()
                            .into_any()
                    }
                />
                <RankingPanel
                    title="TOP CHASSIS"
                    render=move |sort: RankingSort| {
                        let top = top_ranked(&ships, sort, TOP_N);
                        if top.is_empty() {
                            return view! { <NoData /> }.into_any();
                        }
                        top.into_iter()
                            .enumerate()
                            .map(|(i, ship)| {
                                let (value, subvalue) = ranked_values(sort, ship.popularity, ship.games, &ship.win_rate);
                                view! {
                                    <TopItemRow
                                        rank=i + 1
                                        name=ship.ship_name
                                        value=value
                                        subvalue=subvalue
                                        faction_key=ship.faction_xws
                                        ship_xws=ship.ship_xws
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                />
                <RankingPanel
                    title="TOP PILOTS"
                    render=move |sort: RankingSort| {
                        let top = top_ranked(&pilots, sort, TOP_N);
                        if top.is_empty() {
                            return view! { <NoData /> }.into_any();
                        }
                        top.into_iter()
                            .enumerate()
                            .map(|(i, pilot)| {
                                let (value, subvalue) = ranked_values(sort, pilot.popularity, pilot.games, &pilot.win_rate);
                                view! {
                                    <TopItemRow
                                        rank=i + 1
                                        name=pilot.name
                                        value=value
                                        subvalue=subvalue
                                        faction_key=pilot.faction
                                        ship_xws=pilot.ship_xws
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                />
                <RankingPanel
                    title="TOP UPGRADES"
                    render=move |sort: RankingSort| {
                        let top = top_ranked(&upgrades, sort, TOP_N);
                        if top.is_empty() {
                            return view! { <NoData /> }.into_any();
                        }
                        top.into_iter()
                            .enumerate()
                            .map(|(i, upgrade)| {
                                let (value, subvalue) = ranked_values(sort, upgrade.popularity, upgrade.games, &upgrade.win_rate);
                                view! {
                                    <TopItemRow
                                        rank=i + 1
                                        name=upgrade.name
                                        value=value
                                        subvalue=format!("{} \u{2022} {subvalue}", upgrade_type_label(&upgrade.upgrade_type))
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                />
            </div>

            {(!factions.is_empty()).then(|| view! { <FactionShare factions=factions /> })}
        </div>
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let CurrentView(view_params) = expect_context();
    let source = Memo::new(move |_| view_params.with(|v| v.source));
    let meta = use_meta(move || source.get());

    move || {
        let pane = meta
            .data_key
            .with(|key| dashboard_pane(meta.failed(), key.as_deref()));
        match (pane, meta.data.get()) {
            (DashboardPane::Unavailable, _) => view! { <BackendUnavailable /> }.into_any(),
            (DashboardPane::Snapshot(shown), Some(snapshot)) => {
                view! { <DashboardBody snapshot=snapshot source=shown /> }.into_any()
            }
            _ => view! { <LoadingLine /> }.into_any(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popularity_mode_leads_with_count() {
        let (value, sub) = ranked_values(RankingSort::Popularity, 14.0, 30, &WinRate::Numeric(55.2));
        assert_eq!(value, "14");
        assert_eq!(sub, "55% WR");
    }

    #[test]
    fn win_rate_mode_leads_with_rate() {
        let (value, sub) = ranked_values(RankingSort::WinRate, 14.0, 30, &WinRate::NotApplicable);
        assert_eq!(value, "NA");
        assert_eq!(sub, "30 GAMES");
    }

    #[test]
    fn failed_source_switch_shows_fallback_panel() {
        let xwa = meta_url(DataSource::Xwa);
        // Legacy failed while the XWA snapshot is still held.
        assert_eq!(dashboard_pane(true, Some(&xwa)), DashboardPane::Unavailable);
        assert_eq!(dashboard_pane(true, None), DashboardPane::Unavailable);
    }

    #[test]
    fn pane_is_labelled_with_the_loaded_source() {
        let xwa = meta_url(DataSource::Xwa);
        let legacy = meta_url(DataSource::Legacy);
        assert_eq!(dashboard_pane(false, Some(&xwa)), DashboardPane::Snapshot(DataSource::Xwa));
        assert_eq!(dashboard_pane(false, Some(&legacy)), DashboardPane::Snapshot(DataSource::Legacy));
        assert_eq!(dashboard_pane(false, None), DashboardPane::Loading);
    }

    #[test]
    fn share_falls_back_to_popularity_ratio() {
        let faction = FactionStat {
            popularity: 25,
            ..Default::default()
        };
        assert!((faction_share(&faction, 100) - 25.0).abs() < 1e-9);
        assert_eq!(faction_share(&faction, 0), 0.0);

        let explicit = FactionStat {
            percentage: Some(12.5),
            ..Default::default()
        };
        assert_eq!(faction_share(&explicit, 100), 12.5);
    }
}
