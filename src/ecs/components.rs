use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::RGB;
use specs::prelude::{Component, NullStorage, VecStorage};

#[derive(Copy, Clone, Debug)]
pub struct Position {
    pub point: Point,
}

impl Component for Position {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Renderable {
    pub glyph: char,
    pub color: RGB,
    pub order: i32,
}

impl Component for Renderable {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Name {
    pub name: String,
}

impl Component for Name {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct CombatStats {
    pub max_hp: i32,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Component for CombatStats {
    type Storage = VecStorage<Self>;
}

/// One-shot pickup effects. Converted to permanent stat changes on grab,
/// then the item entity is removed.
#[derive(Clone, Debug)]
pub struct Pickup {
    pub healing: i32,
    pub weapon_bonus: i32,
    pub armor_bonus: i32,
    pub goal: bool,
}

impl Component for Pickup {
    type Storage = VecStorage<Self>;
}

/// Per-entity behavior state machine, ticked once per enemy pass. Each
/// variant owns its persistent state; nothing is shared between entities.
#[derive(Clone, Debug)]
pub enum Brain {
    /// Greedy chase inside a visibility radius, attack when adjacent.
    Chaser { radius: f32 },
    /// Patrols one axis, shoving the player out of the way.
    Picker { dir: Point, push: i32, swap_in: i32 },
    /// Picker that moves several cells per pass and keeps acting on its own
    /// clock while the player stands still.
    SuperPicker {
        dir: Point,
        push: i32,
        speed: i32,
        swap_in: i32,
        countdown: i32,
        last_player: Point,
    },
    /// Chaser with a long leash that periodically stops to monologue.
    Wanderer { radius: f32, interval: i32, clock: i32 },
}

impl Component for Brain {
    type Storage = VecStorage<Self>;
}

#[derive(Default)]
pub struct PlayerTag;

impl Component for PlayerTag {
    type Storage = NullStorage<Self>;
}

#[derive(Default)]
pub struct BlocksTile;

impl Component for BlocksTile {
    type Storage = NullStorage<Self>;
}

/// Set on the player once the goal item is picked up; gates the win
/// condition at the stairs.
#[derive(Default)]
pub struct GoalCarrier;

impl Component for GoalCarrier {
    type Storage = NullStorage<Self>;
}
