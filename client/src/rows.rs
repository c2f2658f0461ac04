use leptos::prelude::*;

use m3tacron_shared::icons::upgrade_type_label;
use m3tacron_shared::{
    BadgeTone, ListEntry, PilotEntry, PilotStat, ShipStat, TournamentRow, UpgradeStat,
    faction_color, faction_label,
};

use crate::colors::{ACCENT, BG, BORDER, MONO, PANEL, SANS, TEXT_PRIMARY, TEXT_SECONDARY, faction_tint};
use crate::icons::{FactionIcon, ShipIcon, UpgradeIcon};
use crate::ranking::format_count;
use crate::time_format::format_event_date;
use crate::widgets::{Badge, panel_style};

/// Display name for a faction key, falling back to the name the backend sent.
fn faction_display(key: &str, fallback: &str) -> String {
    match faction_label(key) {
        "Unknown" if !fallback.is_empty() => fallback.to_string(),
        label => label.to_string(),
    }
}

#[component]
fn StatBadges(popularity: f64, games: u32, win_rate: m3tacron_shared::WinRate) -> impl IntoView {
    view! {
        <div style="display: flex; flex-wrap: wrap; justify-content: center; gap: 8px; padding: 8px;">
            <Badge tone=BadgeTone::Gray>{format!("{} LISTS", format_count(popularity))}</Badge>
            <Badge tone=BadgeTone::Gray>{format!("{games} GAMES")}</Badge>
            <Badge tone=win_rate.tone()>{format!("{} WR", win_rate.label())}</Badge>
        </div>
    }
}

#[component]
fn PilotBlock(pilot: PilotEntry) -> impl IntoView {
    let chip = format!(
        "display: inline-flex; align-items: center; gap: 4px; padding: 2px 6px; border: 1px solid {BORDER}; border-radius: 4px; background: rgba(0,0,0,0.3);"
    );
    view! {
        <div style="display: flex; flex-direction: column; gap: 8px; padding: 8px; flex: 1; min-width: 250px; background: rgba(255,255,255,0.03); border-radius: 8px;">
            <div style="display: flex; align-items: center; gap: 8px;">
                <ShipIcon xws=pilot.ship_icon.clone() size="2.25rem" />
                <div style="display: flex; flex-direction: column;">
                    <span style=format!("font-size: 0.875rem; font-weight: 700; font-family: {SANS}; color: #ffffff;")>
                        {pilot.name.clone()}
                    </span>
                    <div style=format!("display: flex; gap: 8px; font-size: 10px; color: {TEXT_SECONDARY}; font-family: {MONO};")>
                        <span>{format!("{} pts", pilot.points)}</span>
                        {(pilot.loadout > 0).then(|| view! { <span>{format!("LV: {}", pilot.loadout)}</span> })}
                    </div>
                </div>
            </div>
            <div style="display: flex; flex-wrap: wrap; gap: 4px;">
                {pilot
                    .upgrades
                    .into_iter()
                    .map(|upgrade| {
                        view! {
                            <div style=chip.clone() title=upgrade.name.clone()>
                                <UpgradeIcon slot=upgrade.slot.clone() />
                                <span style=format!("font-size: 10px; color: {TEXT_SECONDARY}; white-space: nowrap;")>
                                    {format!("{} ({})", upgrade.name, upgrade.points)}
                                </span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Full squad list row for the list browser.
#[component]
pub fn ListRow(list: ListEntry) -> impl IntoView {
    let color = faction_color(&list.faction_key);
    let (wr_text, wr_border, wr_bg) = crate::colors::tone_colors(list.win_rate.tone());
    let tag = format!(
        "padding: 2px 8px; border-radius: 4px; font-size: 10px; font-weight: 700; font-family: {MONO};"
    );

    view! {
        <div style=format!("display: flex; width: 100%; background: {PANEL}; border: 1px solid {BORDER}; border-radius: 6px; overflow: hidden;")>
            <div style=format!("width: 6px; flex-shrink: 0; background: {color};") />
            <div style="display: flex; flex-direction: column; width: 100%; padding: 12px; gap: 12px;">
                <div style="display: flex; flex-wrap: wrap; align-items: center; justify-content: space-between; gap: 8px;">
                    <div style="display: flex; align-items: center; gap: 8px;">
                        <FactionIcon faction=list.faction_key.clone() size="1.5rem" />
                        <span style=format!("font-size: 0.75rem; font-weight: 700; text-transform: uppercase; color: {TEXT_PRIMARY};")>
                            {faction_display(&list.faction_key, &list.faction)}
                        </span>
                    </div>
                    <div style="display: flex; flex-wrap: wrap; align-items: center; gap: 8px;">
                        <span style=format!("{tag} background: rgba(255,255,255,0.1); color: #ffffff; border: 1px solid rgba(255,255,255,0.2);")>
                            {format!("{} pts", list.points)}
                        </span>
                        {(list.total_loadout > 0).then(|| view! {
                            <span style=format!("{tag} background: rgba(168,85,247,0.1); color: #d8b4fe; border: 1px solid rgba(168,85,247,0.5);")>
                                {format!("LV: {}", list.total_loadout)}
                            </span>
                        })}
                        <span style=format!("{tag} background: {wr_bg}; color: {wr_text}; border: 1px solid {wr_border};")>
                            {format!("{} WR", list.win_rate.raw_label())}
                        </span>
                        <span style=format!("font-size: 10px; font-family: {MONO}; letter-spacing: 0.15em; color: {TEXT_SECONDARY};")>
                            {format!("{} GAMES", list.games)}
                        </span>
                    </div>
                </div>
                <div style="display: flex; flex-wrap: wrap; gap: 8px;">
                    {list.pilots.into_iter().map(|pilot| view! { <PilotBlock pilot=pilot /> }).collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ShipCard(ship: ShipStat) -> impl IntoView {
    let color = faction_color(&ship.faction_xws);
    let glow = faction_tint(&ship.faction_xws, 0.15);

    view! {
        <div style=format!("display: flex; flex-direction: column; height: 350px; padding: 16px; background: {PANEL}; border: 1px solid {BORDER}; border-radius: 12px; box-shadow: inset 0 -40px 60px -40px {glow};")>
            <div style="display: flex; align-items: center; justify-content: center; height: 140px;">
                <ShipIcon xws=ship.ship_xws.clone() color=color.to_string() size="120px" />
            </div>
            <div style="display: flex; flex-direction: column; align-items: center; gap: 8px; margin-top: 8px;">
                <div style=format!("font-size: 1.25rem; font-weight: 700; text-align: center; color: {TEXT_PRIMARY};")>
                    {ship.ship_name.clone()}
                </div>
                <div style=format!("font-size: 0.875rem; font-weight: 700; color: {color};")>
                    {faction_display(&ship.faction_xws, &ship.faction)}
                </div>
                <FactionIcon faction=ship.faction_xws.clone() size="1.8rem" />
            </div>
            <div style="flex-grow: 1;" />
            <StatBadges popularity=ship.popularity games=ship.games win_rate=ship.win_rate />
        </div>
    }
}

#[component]
pub fn PilotCard(pilot: PilotStat) -> impl IntoView {
    let color = faction_color(&pilot.faction);
    let chip = format!(
        "background: {BG}; border: 1px solid {BORDER}; padding: 2px 8px; border-radius: 4px; font-size: 0.75rem; font-family: {MONO}; font-weight: 700;"
    );
    let icon = if pilot.ship_icon.is_empty() {
        view! { <FactionIcon faction=pilot.faction.clone() size="80px" /> }.into_any()
    } else {
        view! { <ShipIcon xws=pilot.ship_xws.clone() size="80px" /> }.into_any()
    };

    view! {
        <div style=format!("{} padding: 0; display: flex; flex-direction: column; justify-content: space-between; overflow: hidden;", panel_style())>
            <div style="padding: 16px; display: flex; flex-direction: column; align-items: center; gap: 16px; flex-grow: 1;">
                <div style="padding-top: 8px;">{icon}</div>
                <div style="display: flex; flex-direction: column; align-items: center; text-align: center; width: 100%;">
                    <h3 style=format!("margin: 0; font-size: 1.1rem; font-weight: 700; font-family: {SANS}; color: {TEXT_PRIMARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; width: 100%;")>
                        {pilot.name.clone()}
                    </h3>
                    <div style=format!("margin: 4px 0 8px; font-size: 0.75rem; font-weight: 700; letter-spacing: 0.15em; text-transform: uppercase; color: {color};")>
                        {faction_display(&pilot.faction, "")}
                    </div>
                    <div style="display: flex; gap: 8px; margin-top: 8px;">
                        <span style=chip.clone()>{format!("{} PTS", pilot.cost)}</span>
                        <span style=format!("{chip} color: {ACCENT};")>{format!("{} LD", pilot.loadout)}</span>
                    </div>
                </div>
            </div>
            <div style=format!("background: rgba(0,0,0,0.4); border-top: 1px solid {BORDER};")>
                <StatBadges popularity=pilot.popularity games=pilot.games win_rate=pilot.win_rate />
            </div>
        </div>
    }
}

#[component]
pub fn UpgradeCard(upgrade: UpgradeStat) -> impl IntoView {
    view! {
        <div style=format!("{} padding: 0; display: flex; flex-direction: column; justify-content: space-between; overflow: hidden;", panel_style())>
            <div style="padding: 16px; display: flex; flex-direction: column; align-items: center; gap: 16px; flex-grow: 1;">
                <div style="padding: 24px 0 8px; display: flex; flex-direction: column; align-items: center; gap: 6px;">
                    <UpgradeIcon slot=upgrade.upgrade_type.clone() />
                    <span style="font-size: 1.6rem; font-weight: 900; text-transform: uppercase; color: #5b6070;">
                        {upgrade_type_label(&upgrade.upgrade_type)}
                    </span>
                </div>
                <div style="display: flex; flex-direction: column; align-items: center; text-align: center; width: 100%;">
                    <h3 style=format!("margin: 0; font-size: 1.1rem; font-weight: 700; font-family: {SANS}; color: {TEXT_PRIMARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; width: 100%;")>
                        {upgrade.name.clone()}
                    </h3>
                    <div style=format!("margin: 4px 0 8px; font-size: 0.75rem; font-weight: 700; letter-spacing: 0.15em; color: {TEXT_SECONDARY};")>
                        "UPGRADE"
                    </div>
                    <span style=format!("background: {BG}; border: 1px solid {BORDER}; padding: 2px 8px; border-radius: 4px; font-size: 0.75rem; font-family: {MONO}; font-weight: 700;")>
                        {format!("{} PTS", upgrade.cost)}
                    </span>
                </div>
            </div>
            <div style=format!("background: rgba(0,0,0,0.4); border-top: 1px solid {BORDER};")>
                <StatBadges popularity=upgrade.popularity games=upgrade.games win_rate=upgrade.win_rate />
            </div>
        </div>
    }
}

#[component]
pub fn TournamentItem(tournament: TournamentRow) -> impl IntoView {
    let has_location = !tournament.location.is_empty() && tournament.location != "Unknown Location";
    let dot = view! { <span style=format!("color: {BORDER};")>"\u{2022}"</span> };
    let name = tournament.name.clone();
    let title = if tournament.url.is_empty() {
        view! {
            <h3 style=format!("margin: 0; font-size: 1rem; font-weight: 700; font-family: {SANS}; color: #ffffff; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;")>
                {name}
            </h3>
        }
        .into_any()
    } else {
        view! {
            <a
                href=tournament.url.clone()
                target="_blank"
                rel="noopener noreferrer"
                style=format!("font-size: 1rem; font-weight: 700; font-family: {SANS}; color: #ffffff; text-decoration: none; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;")
            >
                {name}
            </a>
        }
        .into_any()
    };

    view! {
        <div style=format!("display: flex; align-items: center; width: 100%; min-height: 80px; padding: 12px; border-bottom: 1px solid {BORDER};")>
            <div style=format!("width: 60px; height: 60px; flex-shrink: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; border-radius: 6px; background: {BG}; border: 1px solid {BORDER};")>
                <span style=format!("font-size: 0.95rem; font-weight: 700; color: {TEXT_PRIMARY};")>{tournament.badge_l1.clone()}</span>
                {(!tournament.badge_l2.is_empty()).then(|| view! {
                    <span style=format!("font-size: 10px; font-weight: 700; color: {TEXT_SECONDARY};")>{tournament.badge_l2.clone()}</span>
                })}
            </div>
            <div style="display: flex; flex-direction: column; flex: 1; min-width: 0; padding-left: 16px; gap: 4px;">
                {title}
                <div style="display: flex; align-items: center; gap: 8px; flex-wrap: wrap; font-size: 0.75rem;">
                    <span style=format!("color: {ACCENT}; font-family: {MONO}; text-transform: uppercase;")>{tournament.platform_label.clone()}</span>
                    {dot}
                    <span style=format!("color: {TEXT_SECONDARY}; font-family: {MONO};")>{format_event_date(&tournament.date)}</span>
                    {(!tournament.format_label.is_empty()).then(|| view! {
                        <span style=format!("color: {TEXT_SECONDARY}; font-family: {MONO};")>{format!("\u{2022} {}", tournament.format_label)}</span>
                    })}
                    {has_location.then(|| view! {
                        <span style=format!("color: {TEXT_SECONDARY}; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; max-width: 300px;")>
                            {format!("\u{2022} {}", tournament.location)}
                        </span>
                    })}
                </div>
            </div>
            <div style="display: flex; flex-direction: column; align-items: flex-end; padding-right: 16px; flex-shrink: 0;">
                <span style=format!("font-size: 1.5rem; font-weight: 700; font-family: {MONO}; color: {TEXT_PRIMARY};")>{tournament.players}</span>
                <span style=format!("font-size: 10px; font-family: {MONO}; letter-spacing: 0.15em; color: {TEXT_SECONDARY}; margin-top: 4px;")>"PLY"</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::faction_display;

    #[test]
    fn faction_display_prefers_known_labels() {
        assert_eq!(faction_display("scumandvillainy", "Scum"), "Scum & Villainy");
        assert_eq!(faction_display("", "Mandalorians"), "Mandalorians");
        assert_eq!(faction_display("", ""), "Unknown");
    }
}
