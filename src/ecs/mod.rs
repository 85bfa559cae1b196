pub mod components;
pub mod resources;
pub mod systems;

use std::collections::HashSet;

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::{GREEN, RGB};
use log::debug;
use specs::prelude::{
    Builder, Dispatcher, DispatcherBuilder, Entity, Join, World as SpecsWorld, WorldExt,
};

use crate::{
    combat,
    data::{
        items::{ITEM_TABLE, ItemArchetype, promotion_amulet},
        monsters::{MonsterArchetype, archetypes_for_level, super_picker, system_anomaly},
    },
    map::{GenMode, MapGenError, WarehouseMap},
};

use self::{
    components::{
        BlocksTile, Brain, CombatStats, GoalCarrier, Name, Pickup, PlayerTag, Position, Renderable,
    },
    resources::{EventLog, TurnContext},
    systems::{AXIS_DIRS, BehaviorSystem},
};

pub const PLAYER_HP: i32 = 30;
pub const PLAYER_DEFENSE: i32 = 2;
pub const PLAYER_POWER: i32 = 5;

/// Default shove distance for the regular picker units.
const PICKER_PUSH: i32 = 3;

const MAX_SPAWN_ATTEMPTS: u32 = 400;

pub struct AttackReport {
    pub hit: String,
    pub kill: Option<String>,
}

/// The simulation's entity set: one player plus the monsters and items of
/// the current floor. Entities are addressed by their specs id; nothing
/// holds a back-reference.
pub struct SimWorld {
    specs_world: SpecsWorld,
    dispatcher: Dispatcher<'static, 'static>,
    player: Entity,
}

impl SimWorld {
    pub fn new(seed: u64, spawn: Point) -> Self {
        let mut specs_world = SpecsWorld::new();
        Self::register_components(&mut specs_world);
        specs_world.insert(RandomNumberGenerator::seeded(seed));
        specs_world.insert(EventLog::default());
        let player = Self::spawn_player(&mut specs_world, spawn);
        let dispatcher = DispatcherBuilder::new()
            .with(BehaviorSystem::default(), "behavior", &[])
            .build();

        Self {
            specs_world,
            dispatcher,
            player,
        }
    }

    fn register_components(world: &mut SpecsWorld) {
        world.register::<Position>();
        world.register::<Renderable>();
        world.register::<Name>();
        world.register::<CombatStats>();
        world.register::<Pickup>();
        world.register::<Brain>();
        world.register::<PlayerTag>();
        world.register::<BlocksTile>();
        world.register::<GoalCarrier>();
    }

    fn spawn_player(world: &mut SpecsWorld, spawn: Point) -> Entity {
        world
            .create_entity()
            .with(Position { point: spawn })
            .with(Renderable {
                glyph: '@',
                color: RGB::named(GREEN),
                order: 2,
            })
            .with(Name {
                name: "Player".to_string(),
            })
            .with(CombatStats {
                max_hp: PLAYER_HP,
                hp: PLAYER_HP,
                defense: PLAYER_DEFENSE,
                power: PLAYER_POWER,
            })
            .with(PlayerTag)
            .with(BlocksTile)
            .build()
    }

    /// Ticks every brain once against the given map and returns the events
    /// the pass produced, in emission order.
    pub fn run_behaviors(&mut self, map: &WarehouseMap) -> Vec<String> {
        self.specs_world.insert(TurnContext::from_map(map));
        self.dispatcher.dispatch(&self.specs_world);
        self.specs_world.maintain();
        let mut log = self.specs_world.write_resource::<EventLog>();
        std::mem::take(&mut log.entries)
    }

    pub fn player_entity(&self) -> Entity {
        self.player
    }

    pub fn player_point(&self) -> Point {
        let positions = self.specs_world.read_component::<Position>();
        positions
            .get(self.player)
            .map(|p| p.point)
            .unwrap_or(Point::new(0, 0))
    }

    pub fn set_player_point(&mut self, point: Point) {
        let mut positions = self.specs_world.write_component::<Position>();
        if let Some(pos) = positions.get_mut(self.player) {
            pos.point = point;
        }
    }

    pub fn player_stats(&self) -> Option<CombatStats> {
        let stats = self.specs_world.read_component::<CombatStats>();
        stats.get(self.player).cloned()
    }

    pub fn modify_player_stats(&mut self, f: impl FnOnce(&mut CombatStats)) {
        let mut stats = self.specs_world.write_component::<CombatStats>();
        if let Some(player_stats) = stats.get_mut(self.player) {
            f(player_stats);
        }
    }

    /// Clamped regeneration; returns the hp actually gained.
    pub fn heal_player(&mut self, amount: i32) -> i32 {
        let mut stats = self.specs_world.write_component::<CombatStats>();
        stats
            .get_mut(self.player)
            .map(|s| combat::heal(s, amount))
            .unwrap_or(0)
    }

    pub fn player_carrying_goal(&self) -> bool {
        let carriers = self.specs_world.read_component::<GoalCarrier>();
        carriers.contains(self.player)
    }

    /// Marks the player as carrying the goal item: glyph flips and max hp
    /// rises by 10 along with current hp.
    pub fn claim_goal(&mut self) {
        {
            let mut carriers = self.specs_world.write_component::<GoalCarrier>();
            let _ = carriers.insert(self.player, GoalCarrier);
        }
        {
            let mut renderables = self.specs_world.write_component::<Renderable>();
            if let Some(renderable) = renderables.get_mut(self.player) {
                renderable.glyph = '*';
            }
        }
        self.modify_player_stats(|stats| {
            stats.max_hp += 10;
            stats.hp += 10;
        });
    }

    pub fn blocking_entity_at(&self, point: Point) -> Option<Entity> {
        let entities = self.specs_world.entities();
        let positions = self.specs_world.read_component::<Position>();
        let blockers = self.specs_world.read_component::<BlocksTile>();
        (&entities, &positions, &blockers)
            .join()
            .find(|(entity, pos, _)| *entity != self.player && pos.point == point)
            .map(|(entity, _, _)| entity)
    }

    pub fn item_at(&self, point: Point) -> Option<Entity> {
        let entities = self.specs_world.entities();
        let positions = self.specs_world.read_component::<Position>();
        let pickups = self.specs_world.read_component::<Pickup>();
        (&entities, &positions, &pickups)
            .join()
            .find(|(_, pos, _)| pos.point == point)
            .map(|(entity, _, _)| entity)
    }

    pub fn name_of(&self, entity: Entity) -> String {
        let names = self.specs_world.read_component::<Name>();
        names
            .get(entity)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| "something".to_string())
    }

    pub fn pickup_of(&self, entity: Entity) -> Option<Pickup> {
        let pickups = self.specs_world.read_component::<Pickup>();
        pickups.get(entity).cloned()
    }

    /// Player attacks a blocking entity. The defender leaves the entity set
    /// here, exactly once, if the blow was lethal.
    pub fn player_attack(&mut self, target: Entity) -> Option<AttackReport> {
        let name = self.name_of(target);
        let (hit, kill) = {
            let mut stats = self.specs_world.write_component::<CombatStats>();
            let attacker = stats.get(self.player).cloned()?;
            let defender = stats.get_mut(target)?;
            let outcome = combat::attack(&attacker, defender);
            let hit = format!("You attack {name} for {} damage!", outcome.damage);
            let kill = outcome.defeated.then(|| format!("{name} is defeated!"));
            (hit, kill)
        };
        if kill.is_some() {
            let _ = self.specs_world.entities().delete(target);
            self.specs_world.maintain();
        }
        Some(AttackReport { hit, kill })
    }

    pub fn remove_entity(&mut self, entity: Entity) {
        let _ = self.specs_world.entities().delete(entity);
        self.specs_world.maintain();
    }

    /// Deletes every entity except the player. Used on level descent.
    pub fn clear_level_entities(&mut self) {
        let doomed: Vec<Entity> = {
            let entities = self.specs_world.entities();
            (&entities)
                .join()
                .filter(|entity| *entity != self.player)
                .collect()
        };
        for entity in doomed {
            let _ = self.specs_world.entities().delete(entity);
        }
        self.specs_world.maintain();
    }

    pub fn spawn_monster(
        &mut self,
        glyph: char,
        name: String,
        color: RGB,
        stats: CombatStats,
        point: Point,
        brain: Brain,
    ) {
        self.specs_world
            .create_entity()
            .with(Position { point })
            .with(Renderable {
                glyph,
                color,
                order: 1,
            })
            .with(Name { name })
            .with(stats)
            .with(brain)
            .with(BlocksTile)
            .build();
    }

    pub fn spawn_item(&mut self, archetype: &ItemArchetype, point: Point) {
        self.specs_world
            .create_entity()
            .with(Position { point })
            .with(Renderable {
                glyph: archetype.glyph,
                color: archetype.color,
                order: 0,
            })
            .with(Name {
                name: archetype.name.to_string(),
            })
            .with(Pickup {
                healing: archetype.healing,
                weapon_bonus: archetype.weapon_bonus,
                armor_bonus: archetype.armor_bonus,
                goal: archetype.goal,
            })
            .build();
    }

    /// Populates a freshly generated floor with monsters and items. All
    /// placements reject occupied and non-floor cells, with bounded retries.
    pub fn populate(
        &mut self,
        map: &WarehouseMap,
        level: u32,
        spawn_goal: bool,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(), MapGenError> {
        let mut occupied: HashSet<(i32, i32)> = HashSet::new();
        let player = self.player_point();
        occupied.insert((player.x, player.y));

        let chase_radius = match map.mode {
            GenMode::DenseAisles => 6.0,
            GenMode::OpenIslands => 8.0,
        };

        let monster_count = match map.mode {
            GenMode::DenseAisles => rng.range(3, 6 + level as i32),
            GenMode::OpenIslands => rng.range(6, 11 + 2 * level as i32),
        };
        let table = archetypes_for_level(level);
        for _ in 0..monster_count {
            let point = free_floor_cell(map, &occupied, rng, "monster")?;
            let archetype = table[rng.range(0, table.len() as i32) as usize].clone();
            self.spawn_rolled_monster(&archetype, point, level, chase_radius, map.mode, rng);
            occupied.insert((point.x, point.y));
        }

        // The anomaly stalks every floor from level 3 on.
        if level >= 3 {
            let point = free_floor_cell(map, &occupied, rng, "anomaly")?;
            let anomaly = system_anomaly();
            self.spawn_monster(
                anomaly.glyph,
                anomaly.name.to_string(),
                anomaly.color,
                CombatStats {
                    max_hp: anomaly.hp,
                    hp: anomaly.hp,
                    defense: anomaly.defense,
                    power: anomaly.power,
                },
                point,
                Brain::Wanderer {
                    radius: 10.0,
                    interval: 10,
                    clock: 0,
                },
            );
            occupied.insert((point.x, point.y));
        }

        let super_count = level.min(3);
        for _ in 0..super_count {
            let point = free_floor_cell(map, &occupied, rng, "super picker")?;
            let archetype = super_picker();
            let dir = AXIS_DIRS[rng.range(0, AXIS_DIRS.len() as i32) as usize];
            self.spawn_monster(
                archetype.glyph,
                archetype.name.to_string(),
                archetype.color,
                CombatStats {
                    max_hp: archetype.hp,
                    hp: archetype.hp,
                    defense: archetype.defense,
                    power: archetype.power,
                },
                point,
                Brain::SuperPicker {
                    dir,
                    push: 4 + level as i32,
                    speed: 1 + level as i32 / 2,
                    swap_in: rng.range(10, 21),
                    countdown: rng.range(2, 6),
                    last_player: player,
                },
            );
            occupied.insert((point.x, point.y));
        }

        let item_count = rng.range(2, 5 + level as i32 / 2);
        for _ in 0..item_count {
            let point = free_floor_cell(map, &occupied, rng, "item")?;
            let archetype = &ITEM_TABLE[rng.range(0, ITEM_TABLE.len() as i32) as usize];
            self.spawn_item(archetype, point);
            occupied.insert((point.x, point.y));
        }

        if spawn_goal {
            let point = free_floor_cell(map, &occupied, rng, "goal item")?;
            self.spawn_item(&promotion_amulet(), point);
        }

        debug!(
            "populated level {level}: {monster_count} monsters, {super_count} super pickers, {item_count} items"
        );
        Ok(())
    }

    /// Applies the per-monster behavior roll. Dense floors only ever see
    /// basic chasers; the open layout mixes in pickers and self-aware units.
    fn spawn_rolled_monster(
        &mut self,
        archetype: &MonsterArchetype,
        point: Point,
        level: u32,
        chase_radius: f32,
        mode: GenMode,
        rng: &mut RandomNumberGenerator,
    ) {
        let mut name = archetype.name.to_string();
        let mut stats = CombatStats {
            max_hp: archetype.hp,
            hp: archetype.hp,
            defense: archetype.defense,
            power: archetype.power,
        };

        let tier = if mode == GenMode::OpenIslands {
            behavior_tier(rng.range(0, 100), level)
        } else {
            BehaviorTier::Basic
        };
        let brain = match tier {
            BehaviorTier::SelfAware => {
                name = format!("Self-Aware {name}");
                stats.max_hp += 5;
                stats.hp += 5;
                stats.defense += 1;
                stats.power += 2;
                Brain::Wanderer {
                    radius: 10.0,
                    interval: 30,
                    clock: 0,
                }
            }
            BehaviorTier::Picker => {
                name = format!("Product Picker {name}");
                stats.power -= 1;
                Brain::Picker {
                    dir: AXIS_DIRS[rng.range(0, AXIS_DIRS.len() as i32) as usize],
                    push: PICKER_PUSH,
                    swap_in: rng.range(10, 21),
                }
            }
            BehaviorTier::Basic => Brain::Chaser {
                radius: chase_radius,
            },
        };

        self.spawn_monster(archetype.glyph, name, archetype.color, stats, point, brain);
    }

    /// Read-only walk over everything drawable, items first, player last.
    pub fn each_renderable<F>(&self, mut f: F)
    where
        F: FnMut(Point, &Renderable),
    {
        let positions = self.specs_world.read_component::<Position>();
        let renderables = self.specs_world.read_component::<Renderable>();
        let mut drawables: Vec<(&Position, &Renderable)> =
            (&positions, &renderables).join().collect();
        drawables.sort_by_key(|(_, renderable)| renderable.order);
        for (pos, renderable) in drawables {
            f(pos.point, renderable);
        }
    }

    pub fn monster_count(&self) -> usize {
        let brains = self.specs_world.read_component::<Brain>();
        (&brains).join().count()
    }

    pub fn item_count(&self) -> usize {
        let pickups = self.specs_world.read_component::<Pickup>();
        (&pickups).join().count()
    }

    /// Every entity position, for invariant checks in tests.
    pub fn entity_points(&self) -> Vec<Point> {
        let positions = self.specs_world.read_component::<Position>();
        (&positions).join().map(|pos| pos.point).collect()
    }

    #[cfg(test)]
    pub fn brain_of(&self, point: Point) -> Option<Brain> {
        let positions = self.specs_world.read_component::<Position>();
        let brains = self.specs_world.read_component::<Brain>();
        (&positions, &brains)
            .join()
            .find(|(pos, _)| pos.point == point)
            .map(|(_, brain)| brain.clone())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BehaviorTier {
    Basic,
    Picker,
    SelfAware,
}

/// Maps a percentile roll to a behavior tier. The self-aware band [0, 10)
/// needs level 2; below that a low roll stays basic instead of spilling into
/// the picker band [10, 35).
fn behavior_tier(roll: i32, level: u32) -> BehaviorTier {
    match roll {
        0..10 if level >= 2 => BehaviorTier::SelfAware,
        10..35 => BehaviorTier::Picker,
        _ => BehaviorTier::Basic,
    }
}

fn free_floor_cell(
    map: &WarehouseMap,
    occupied: &HashSet<(i32, i32)>,
    rng: &mut RandomNumberGenerator,
    what: &'static str,
) -> Result<Point, MapGenError> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let point = Point::new(rng.range(1, map.width - 1), rng.range(1, map.height - 1));
        if map.is_floor(point) && !occupied.contains(&(point.x, point.y)) {
            return Ok(point);
        }
    }
    Err(MapGenError::PlacementExhausted {
        what,
        attempts: MAX_SPAWN_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;
    use bracket_terminal::prelude::RED;

    fn open_map() -> WarehouseMap {
        WarehouseMap::filled(12, 12, Cell::Floor, GenMode::OpenIslands)
    }

    fn monster_stats(hp: i32, defense: i32, power: i32) -> CombatStats {
        CombatStats {
            max_hp: hp,
            hp,
            defense,
            power,
        }
    }

    fn spawn(sim: &mut SimWorld, point: Point, power: i32, brain: Brain) {
        sim.spawn_monster(
            'r',
            "Sorting Bot".to_string(),
            RGB::named(RED),
            monster_stats(8, 0, power),
            point,
            brain,
        );
    }

    #[test]
    fn adjacent_chaser_attacks_without_moving() {
        let map = open_map();
        let mut sim = SimWorld::new(1, Point::new(4, 4));
        // Diagonal neighbor, distance ~1.41: inside attack range.
        spawn(&mut sim, Point::new(5, 5), 5, Brain::Chaser { radius: 6.0 });

        let events = sim.run_behaviors(&map);

        assert_eq!(events.len(), 1);
        assert!(events[0].contains("3 damage"), "got {events:?}");
        assert_eq!(sim.player_stats().unwrap().hp, PLAYER_HP - 3);
        assert!(sim.brain_of(Point::new(5, 5)).is_some(), "chaser moved");
    }

    #[test]
    fn distant_chaser_steps_horizontally_first() {
        let map = open_map();
        let mut sim = SimWorld::new(1, Point::new(8, 4));
        spawn(&mut sim, Point::new(4, 4), 3, Brain::Chaser { radius: 6.0 });

        let events = sim.run_behaviors(&map);

        assert!(events.is_empty());
        assert!(sim.brain_of(Point::new(5, 4)).is_some());
        assert_eq!(sim.player_stats().unwrap().hp, PLAYER_HP);
    }

    #[test]
    fn chaser_outside_radius_stays_put() {
        let map = WarehouseMap::filled(40, 12, Cell::Floor, GenMode::OpenIslands);
        let mut sim = SimWorld::new(1, Point::new(30, 4));
        spawn(&mut sim, Point::new(4, 4), 3, Brain::Chaser { radius: 6.0 });

        sim.run_behaviors(&map);

        assert!(sim.brain_of(Point::new(4, 4)).is_some());
    }

    #[test]
    fn blocked_picker_reverses_with_zero_displacement() {
        let mut map = open_map();
        map.set_cell(Point::new(5, 4), Cell::Wall);
        let mut sim = SimWorld::new(1, Point::new(1, 10));
        spawn(
            &mut sim,
            Point::new(4, 4),
            4,
            Brain::Picker {
                dir: Point::new(1, 0),
                push: PICKER_PUSH,
                swap_in: 15,
            },
        );

        let events = sim.run_behaviors(&map);

        assert!(sim.brain_of(Point::new(4, 4)).is_some(), "picker moved");
        assert_eq!(events.len(), 1);
        assert!(events[0].contains("west"), "got {events:?}");
        match sim.brain_of(Point::new(4, 4)) {
            Some(Brain::Picker { dir, .. }) => assert_eq!(dir, Point::new(-1, 0)),
            other => panic!("unexpected brain {other:?}"),
        }
    }

    #[test]
    fn picker_push_is_conservative() {
        let map = open_map();
        let mut sim = SimWorld::new(1, Point::new(4, 4));
        spawn(
            &mut sim,
            Point::new(3, 4),
            4,
            Brain::Picker {
                dir: Point::new(1, 0),
                push: PICKER_PUSH,
                swap_in: 15,
            },
        );

        let events = sim.run_behaviors(&map);

        // Pusher takes the player's vacated cell; player lands push cells
        // further down the axis, all of it walkable floor.
        assert!(sim.brain_of(Point::new(4, 4)).is_some());
        assert_eq!(sim.player_point(), Point::new(4 + PICKER_PUSH, 4));
        assert!(events.iter().any(|e| e.contains("shoves")), "got {events:?}");
    }

    #[test]
    fn cornered_player_cannot_be_pushed() {
        let mut map = open_map();
        map.set_cell(Point::new(5, 4), Cell::Wall);
        let mut sim = SimWorld::new(1, Point::new(4, 4));
        spawn(
            &mut sim,
            Point::new(3, 4),
            4,
            Brain::Picker {
                dir: Point::new(1, 0),
                push: PICKER_PUSH,
                swap_in: 15,
            },
        );

        let events = sim.run_behaviors(&map);

        assert_eq!(sim.player_point(), Point::new(4, 4));
        assert!(sim.brain_of(Point::new(3, 4)).is_some(), "picker moved");
        assert!(
            events.iter().any(|e| e.contains("nowhere to go")),
            "got {events:?}"
        );
    }

    #[test]
    fn wanderer_monologues_instead_of_acting() {
        let map = open_map();
        let mut sim = SimWorld::new(1, Point::new(4, 4));
        spawn(
            &mut sim,
            Point::new(6, 4),
            4,
            Brain::Wanderer {
                radius: 10.0,
                interval: 1,
                clock: 0,
            },
        );

        let events = sim.run_behaviors(&map);

        assert!(sim.brain_of(Point::new(6, 4)).is_some(), "wanderer moved");
        assert_eq!(events.len(), 1);
        assert!(events[0].starts_with("Sorting Bot:"), "got {events:?}");
    }

    #[test]
    fn super_picker_acts_on_internal_countdown_when_player_idles() {
        let map = open_map();
        let mut sim = SimWorld::new(1, Point::new(1, 10));
        let player = sim.player_point();
        spawn(
            &mut sim,
            Point::new(4, 4),
            4,
            Brain::SuperPicker {
                dir: Point::new(1, 0),
                push: 5,
                speed: 2,
                swap_in: 15,
                countdown: 2,
                last_player: player,
            },
        );

        // Player never moves: first pass only burns the countdown.
        sim.run_behaviors(&map);
        assert!(sim.brain_of(Point::new(4, 4)).is_some());

        // Countdown hits zero: exactly one extra step fires.
        sim.run_behaviors(&map);
        assert!(sim.brain_of(Point::new(5, 4)).is_some());
    }

    #[test]
    fn super_picker_sprints_when_player_moves() {
        let map = open_map();
        let mut sim = SimWorld::new(1, Point::new(1, 10));
        spawn(
            &mut sim,
            Point::new(4, 4),
            4,
            Brain::SuperPicker {
                dir: Point::new(1, 0),
                push: 5,
                speed: 2,
                swap_in: 15,
                // Stale observation: the player "moved" before this pass.
                countdown: 3,
                last_player: Point::new(0, 0),
            },
        );

        sim.run_behaviors(&map);

        assert!(sim.brain_of(Point::new(6, 4)).is_some(), "expected 2 steps");
    }

    #[test]
    fn enemy_pass_stops_once_player_falls() {
        let map = open_map();
        let mut sim = SimWorld::new(1, Point::new(4, 4));
        sim.modify_player_stats(|stats| stats.hp = 1);
        spawn(&mut sim, Point::new(5, 4), 20, Brain::Chaser { radius: 6.0 });
        spawn(&mut sim, Point::new(3, 4), 20, Brain::Chaser { radius: 6.0 });

        let events = sim.run_behaviors(&map);

        // Second attacker is skipped once the player is down.
        assert_eq!(events.len(), 1);
        assert!(sim.player_stats().unwrap().hp <= 0);
    }

    #[test]
    fn behavior_bands_respect_the_level_gate() {
        // Sub-10 rolls only upgrade from level 2 on; at level 1 they stay
        // basic rather than widening the picker band.
        assert_eq!(behavior_tier(5, 1), BehaviorTier::Basic);
        assert_eq!(behavior_tier(9, 1), BehaviorTier::Basic);
        assert_eq!(behavior_tier(5, 2), BehaviorTier::SelfAware);
        assert_eq!(behavior_tier(10, 1), BehaviorTier::Picker);
        assert_eq!(behavior_tier(34, 1), BehaviorTier::Picker);
        assert_eq!(behavior_tier(35, 1), BehaviorTier::Basic);
        assert_eq!(behavior_tier(99, 5), BehaviorTier::Basic);
    }

    #[test]
    fn pickers_do_not_stack_on_each_others_cells() {
        let map = open_map();
        let mut sim = SimWorld::new(1, Point::new(1, 10));
        spawn(
            &mut sim,
            Point::new(4, 4),
            4,
            Brain::Picker {
                dir: Point::new(1, 0),
                push: PICKER_PUSH,
                swap_in: 15,
            },
        );
        spawn(
            &mut sim,
            Point::new(5, 4),
            4,
            Brain::Picker {
                dir: Point::new(0, 1),
                push: PICKER_PUSH,
                swap_in: 15,
            },
        );

        let events = sim.run_behaviors(&map);

        // The eastbound picker's step lands on the other picker's cell and
        // is treated as blocked.
        assert!(sim.brain_of(Point::new(4, 4)).is_some(), "picker stacked");
        assert!(events.iter().any(|e| e.contains("pivots")), "got {events:?}");
    }

    #[test]
    fn populate_respects_walkability_and_goal_gating() {
        let mut rng = RandomNumberGenerator::seeded(0xbee5);
        let map = WarehouseMap::generate(80, 22, 5, GenMode::OpenIslands, &mut rng).unwrap();
        let mut sim = SimWorld::new(2, map.spawn);
        sim.populate(&map, 5, true, &mut rng).unwrap();

        assert!(sim.monster_count() > 0);
        assert!(sim.item_count() > 0);
        for point in sim.entity_points() {
            assert!(map.is_walkable(point), "entity on blocked cell {point:?}");
        }
    }
}
