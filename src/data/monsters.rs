use bracket_terminal::prelude::{
    GRAY, LIGHT_BLUE, LIGHT_CYAN, MAGENTA, ORANGE, RED, RGB, WHITE, YELLOW,
};

#[derive(Clone, Debug)]
pub struct MonsterArchetype {
    pub glyph: char,
    pub name: &'static str,
    pub color: RGB,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl MonsterArchetype {
    const fn new(
        glyph: char,
        name: &'static str,
        color: (u8, u8, u8),
        hp: i32,
        defense: i32,
        power: i32,
    ) -> Self {
        Self {
            glyph,
            name,
            color: RGB {
                r: color.0 as f32 / 255.0,
                g: color.1 as f32 / 255.0,
                b: color.2 as f32 / 255.0,
            },
            hp,
            defense,
            power,
        }
    }
}

const FLOOR_STAFF: &[MonsterArchetype] = &[
    MonsterArchetype::new('r', "Sorting Bot", RED, 8, 0, 3),
    MonsterArchetype::new('s', "Packing Robot", ORANGE, 10, 1, 4),
    MonsterArchetype::new('d', "Inventory Drone", LIGHT_BLUE, 6, 0, 2),
    MonsterArchetype::new('g', "Security Guard", YELLOW, 12, 2, 5),
    MonsterArchetype::new('m', "Maintenance Bot", GRAY, 7, 1, 3),
];

const MANAGEMENT: &[MonsterArchetype] = &[
    MonsterArchetype::new('M', "Manager Bot", MAGENTA, 15, 3, 7),
    MonsterArchetype::new('S', "Supervisor Drone", LIGHT_CYAN, 18, 3, 8),
];

const EXECUTIVES: &[MonsterArchetype] = &[
    MonsterArchetype::new('X', "Security System", RED, 25, 4, 10),
    MonsterArchetype::new('A', "Executive Assistant", WHITE, 20, 5, 9),
    MonsterArchetype::new('D', "Regional Director", MAGENTA, 30, 6, 12),
];

/// Enemy table for a floor. Management shows up from level 3, executives
/// from level 5.
pub fn archetypes_for_level(level: u32) -> Vec<MonsterArchetype> {
    let mut table: Vec<MonsterArchetype> = FLOOR_STAFF.to_vec();
    if level >= 3 {
        table.extend(MANAGEMENT.iter().cloned());
    }
    if level >= 5 {
        table.extend(EXECUTIVES.iter().cloned());
    }
    table
}

/// The unique scripted anomaly that stalks every floor from level 3 on.
pub fn system_anomaly() -> MonsterArchetype {
    MonsterArchetype::new('X', "SYSTEM ANOMALY", RED, 25, 3, 8)
}

/// The high-speed picker unit. Push strength and speed are set per floor at
/// spawn time, not here.
pub fn super_picker() -> MonsterArchetype {
    MonsterArchetype::new('P', "Prime Picker", ORANGE, 14, 2, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_table_is_level_gated() {
        assert_eq!(archetypes_for_level(1).len(), 5);
        assert_eq!(archetypes_for_level(2).len(), 5);
        assert_eq!(archetypes_for_level(3).len(), 7);
        assert_eq!(archetypes_for_level(5).len(), 10);
    }

    #[test]
    fn all_stats_are_non_negative() {
        for archetype in archetypes_for_level(6) {
            assert!(archetype.hp > 0);
            assert!(archetype.defense >= 0);
            assert!(archetype.power >= 0);
        }
    }
}
