//! Static icon table for category badges

use ratatui::style::Color;

#[derive(Debug, PartialEq, Eq)]
pub struct TypeIcon {
    pub name: &'static str,
    pub glyph: &'static str,
    pub color: Color,
    pub asset: &'static str,
}

const fn icon(
    name: &'static str,
    glyph: &'static str,
    color: Color,
    asset: &'static str,
) -> TypeIcon {
    TypeIcon {
        name,
        glyph,
        color,
        asset,
    }
}

pub static UNKNOWN_ICON: TypeIcon = icon(
    "unknown",
    "?",
    Color::Rgb(104, 160, 144),
    "assets/types/unknown.svg",
);

pub static TYPE_ICONS: [TypeIcon; 18] = [
    icon("normal", "○", Color::Rgb(168, 167, 122), "assets/types/normal.svg"),
    icon("fire", "♨", Color::Rgb(238, 129, 48), "assets/types/fire.svg"),
    icon("water", "≈", Color::Rgb(99, 144, 240), "assets/types/water.svg"),
    icon("electric", "ϟ", Color::Rgb(247, 208, 44), "assets/types/electric.svg"),
    icon("grass", "♣", Color::Rgb(122, 199, 76), "assets/types/grass.svg"),
    icon("ice", "❄", Color::Rgb(150, 217, 214), "assets/types/ice.svg"),
    icon("fighting", "‼", Color::Rgb(194, 46, 40), "assets/types/fighting.svg"),
    icon("poison", "☠", Color::Rgb(163, 62, 161), "assets/types/poison.svg"),
    icon("ground", "▤", Color::Rgb(226, 191, 101), "assets/types/ground.svg"),
    icon("flying", "➶", Color::Rgb(169, 143, 243), "assets/types/flying.svg"),
    icon("psychic", "◉", Color::Rgb(249, 85, 135), "assets/types/psychic.svg"),
    icon("bug", "⁂", Color::Rgb(166, 185, 26), "assets/types/bug.svg"),
    icon("rock", "◆", Color::Rgb(182, 161, 54), "assets/types/rock.svg"),
    icon("ghost", "☽", Color::Rgb(115, 87, 151), "assets/types/ghost.svg"),
    icon("dragon", "♆", Color::Rgb(111, 53, 252), "assets/types/dragon.svg"),
    icon("dark", "●", Color::Rgb(112, 87, 70), "assets/types/dark.svg"),
    icon("steel", "⬢", Color::Rgb(183, 183, 206), "assets/types/steel.svg"),
    icon("fairy", "✧", Color::Rgb(214, 133, 173), "assets/types/fairy.svg"),
];

pub fn icon_for(name: &str) -> &'static TypeIcon {
    TYPE_ICONS
        .iter()
        .find(|icon| icon.name.eq_ignore_ascii_case(name))
        .unwrap_or(&UNKNOWN_ICON)
}
