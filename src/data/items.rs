use bracket_terminal::prelude::{GREEN, RGB, YELLOW};

#[derive(Clone, Debug)]
pub struct ItemArchetype {
    pub glyph: char,
    pub name: &'static str,
    pub color: RGB,
    pub healing: i32,
    pub weapon_bonus: i32,
    pub armor_bonus: i32,
    pub goal: bool,
}

impl ItemArchetype {
    const fn new(
        glyph: char,
        name: &'static str,
        color: (u8, u8, u8),
        healing: i32,
        weapon_bonus: i32,
        armor_bonus: i32,
    ) -> Self {
        Self {
            glyph,
            name,
            color: RGB {
                r: color.0 as f32 / 255.0,
                g: color.1 as f32 / 255.0,
                b: color.2 as f32 / 255.0,
            },
            healing,
            weapon_bonus,
            armor_bonus,
            goal: false,
        }
    }
}

pub const ITEM_TABLE: &[ItemArchetype] = &[
    ItemArchetype::new('!', "Energy Drink", YELLOW, 10, 0, 0),
    ItemArchetype::new('/', "Box Cutter", YELLOW, 0, 3, 0),
    ItemArchetype::new(']', "Safety Vest", YELLOW, 0, 0, 2),
    ItemArchetype::new('$', "Paycheck", YELLOW, 0, 0, 0),
];

/// The unique goal item. Only ever placed on the final floor.
pub fn promotion_amulet() -> ItemArchetype {
    let mut amulet = ItemArchetype::new('*', "Promotion Amulet", GREEN, 0, 0, 0);
    amulet.goal = true;
    amulet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_amulet_is_a_goal_item() {
        assert!(promotion_amulet().goal);
        assert!(ITEM_TABLE.iter().all(|item| !item.goal));
    }
}
