use leptos::prelude::*;

use m3tacron_shared::icons::{ship_icon_class, upgrade_slot_icon_class};
use m3tacron_shared::{faction_color, faction_icon_class};

/// Faction glyph tinted with the faction color. Renders nothing for
/// unknown factions.
#[component]
pub fn FactionIcon(#[prop(into)] faction: String, #[prop(default = "1.2rem")] size: &'static str) -> impl IntoView {
    let color = faction_color(&faction);
    faction_icon_class(&faction).map(|glyph| {
        view! {
            <i
                class=format!("xwing-miniatures-font {glyph}")
                style=format!("color: {color}; font-size: {size}; font-style: normal; line-height: 1;")
            />
        }
    })
}

#[component]
pub fn ShipIcon(
    #[prop(into)] xws: String,
    #[prop(optional, into)] color: Option<String>,
    #[prop(default = "2rem")] size: &'static str,
) -> impl IntoView {
    let color = color.unwrap_or_else(|| crate::colors::TEXT_PRIMARY.to_string());
    ship_icon_class(&xws).map(|class| {
        view! {
            <i
                class=class
                style=format!("color: {color}; font-size: {size}; font-style: normal; line-height: 1;")
            />
        }
    })
}

#[component]
pub fn UpgradeIcon(#[prop(into)] slot: String) -> impl IntoView {
    upgrade_slot_icon_class(&slot).map(|class| {
        view! {
            <i
                class=class
                title=slot.clone()
                style="font-size: 0.8rem; font-style: normal; color: #e6e6e6; line-height: 1;"
            />
        }
    })
}
