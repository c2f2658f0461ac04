//! Dashboard leaderboards: a titled panel with a POP / WR% toggle whose rows
//! are produced by a caller-supplied render function.

use leptos::prelude::*;

use m3tacron_shared::{ListEntry, RankingSort, WinRate, faction_color, faction_label};

use crate::colors::{BG, BORDER, MONO, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::widgets::panel_style;

/// Whole numbers print without a fraction; anything else keeps one decimal.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

pub fn win_rate_subvalue(win_rate: &WinRate) -> String {
    format!("{} WR", win_rate.label())
}

#[component]
pub fn RankingPanel<F, V>(title: &'static str, render: F) -> impl IntoView
where
    F: Fn(RankingSort) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let sort = RwSignal::new(RankingSort::default());

    let toggle = move |mode: RankingSort| {
        view! {
            <button
                style=move || {
                    let active = sort.get() == mode;
                    format!(
                        "padding: 4px 10px; font-size: 0.72rem; font-weight: 700; font-family: {MONO}; border: none; cursor: pointer; transition: color 0.15s, background 0.15s; background: {}; color: {};",
                        if active { BORDER } else { "transparent" },
                        if active { TEXT_PRIMARY } else { TEXT_SECONDARY },
                    )
                }
                on:click=move |_| sort.set(mode)
            >
                {mode.short_label()}
            </button>
        }
    };

    view! {
        <div style=format!("{} display: flex; flex-direction: column; gap: 8px;", panel_style())>
            <div style="display: flex; align-items: center; gap: 12px; width: 100%;">
                <h3 style=format!("margin: 0; font-size: 0.85rem; font-weight: 700; letter-spacing: 0.1em; color: {TEXT_PRIMARY}; font-family: {MONO};")>
                    {title}
                </h3>
                <div style=format!("margin-left: auto; display: flex; background: {BG}; border: 1px solid {BORDER}; border-radius: 4px; overflow: hidden;")>
                    {toggle(RankingSort::Popularity)}
                    {toggle(RankingSort::WinRate)}
                </div>
            </div>
            <div style="display: flex; flex-direction: column;">
                {move || render(sort.get())}
            </div>
        </div>
    }
}

#[component]
pub fn TopItemRow(
    rank: usize,
    #[prop(into)] name: String,
    #[prop(into)] value: String,
    #[prop(optional, into)] subvalue: Option<String>,
    #[prop(optional, into)] faction_key: Option<String>,
    #[prop(optional, into)] ship_xws: Option<String>,
) -> impl IntoView {
    let accent = faction_key.as_deref().map(faction_color);
    let badge_style = match accent {
        Some(color) => format!("border-color: {color}; color: {color};"),
        None => format!("color: {TEXT_SECONDARY};"),
    };

    view! {
        <div style=format!("display: flex; align-items: center; gap: 12px; padding: 8px 12px; width: 100%; border-bottom: 1px solid {BORDER}; background: rgba(255,255,255,0.02);")>
            <div style=format!("width: 32px; height: 32px; flex-shrink: 0; display: flex; align-items: center; justify-content: center; border-radius: 50%; border: 1px solid {BORDER}; font-family: {MONO}; font-size: 0.85rem; font-weight: 700; {badge_style}")>
                {format!("#{rank}")}
            </div>
            {ship_xws.map(|xws| view! { <crate::icons::ShipIcon xws=xws size="1.6rem" /> })}
            <div style="display: flex; flex-direction: column; min-width: 0; flex: 1;">
                <span style=format!("font-size: 0.875rem; font-weight: 700; color: {TEXT_PRIMARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;")>
                    {name}
                </span>
                {subvalue.map(|s| view! {
                    <span style=format!("font-size: 0.75rem; color: {TEXT_SECONDARY}; font-family: {MONO};")>{s}</span>
                })}
            </div>
            <span style=format!("margin-left: auto; font-size: 0.875rem; font-weight: 700; font-family: {MONO}; color: {TEXT_PRIMARY}; white-space: nowrap;")>
                {value}
            </span>
        </div>
    }
}

/// Squad list leaderboard row: faction dot, pilot breakdown and the value
/// for the active sort mode.
#[component]
pub fn TopListRow(list: ListEntry, sort: RankingSort) -> impl IntoView {
    let color = faction_color(&list.faction_key);
    let label = if faction_label(&list.faction_key) == "Unknown" && !list.faction.is_empty() {
        list.faction.clone()
    } else {
        faction_label(&list.faction_key).to_string()
    };
    let value = match sort {
        RankingSort::WinRate => list.win_rate.raw_label(),
        RankingSort::Popularity => list.count.to_string(),
    };

    view! {
        <div style=format!("display: flex; flex-direction: column; gap: 4px; padding: 10px 12px; width: 100%; border-bottom: 1px solid {BORDER}; background: rgba(255,255,255,0.01);")>
            <div style="display: flex; align-items: center; gap: 8px; width: 100%;">
                <span title=label.clone() style=format!("width: 12px; height: 12px; border-radius: 50%; flex-shrink: 0; background: {color};") />
                <span style=format!("font-size: 0.75rem; color: {TEXT_SECONDARY}; font-family: {MONO};")>{label}</span>
                <span style=format!("margin-left: auto; font-size: 0.875rem; font-weight: 700; font-family: {MONO}; color: {TEXT_PRIMARY};")>
                    {value}
                </span>
            </div>
            <div style="display: flex; flex-direction: column; gap: 2px; padding-left: 20px;">
                {list
                    .pilots
                    .into_iter()
                    .map(|pilot| {
                        let upgrades = pilot.upgrades.iter().map(|u| u.name.clone()).collect::<Vec<_>>();
                        view! {
                            <div style="display: flex; flex-direction: column;">
                                <span style=format!("font-size: 0.875rem; font-weight: 700; color: {TEXT_PRIMARY};")>
                                    {pilot.name}
                                    {(!pilot.ship_name.is_empty()).then(|| view! {
                                        <span style=format!("margin-left: 6px; font-size: 0.75rem; font-weight: 400; color: {TEXT_SECONDARY};")>
                                            {format!("({})", pilot.ship_name)}
                                        </span>
                                    })}
                                </span>
                                {(!upgrades.is_empty()).then(|| view! {
                                    <div style="display: flex; flex-wrap: wrap; column-gap: 6px;">
                                        {upgrades.into_iter().map(|name| view! {
                                            <span style=format!("font-size: 0.75rem; color: {TEXT_SECONDARY};")>{name}</span>
                                        }).collect_view()}
                                    </div>
                                })}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_drop_integral_fraction() {
        assert_eq!(format_count(12.0), "12");
        assert_eq!(format_count(3.4), "3.4");
        assert_eq!(format_count(f64::NAN), "0");
    }

    #[test]
    fn subvalue_uses_rounded_label() {
        assert_eq!(win_rate_subvalue(&WinRate::Numeric(47.6)), "48% WR");
        assert_eq!(win_rate_subvalue(&WinRate::NotApplicable), "NA WR");
    }
}
