use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use log::info;

use crate::{
    ecs::SimWorld,
    input::{Direction, InputSymbol},
    map::{
        Cell, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, GenMode, MapGenError, WarehouseMap,
    },
};

pub const MESSAGE_CAPACITY: usize = 5;
pub const DEFAULT_FINAL_LEVEL: u32 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Defeat,
    Victory,
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub mode: GenMode,
    pub final_level: u32,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            mode: GenMode::default(),
            final_level: DEFAULT_FINAL_LEVEL,
            seed: 0x57a1_57a1,
        }
    }
}

/// One whole game session. `apply` resolves a single atomic turn: the
/// player's action, rest healing, then the enemy pass. Callable without a
/// terminal; all randomness comes from the seeded generators.
pub struct WarehouseGame {
    pub map: WarehouseMap,
    pub sim: SimWorld,
    pub level: u32,
    pub status: Status,
    move_count: u32,
    messages: Vec<String>,
    config: GameConfig,
    rng: RandomNumberGenerator,
}

impl WarehouseGame {
    pub fn new(config: GameConfig) -> Result<Self, MapGenError> {
        let mut rng = RandomNumberGenerator::seeded(config.seed);
        let map = WarehouseMap::generate(config.width, config.height, 1, config.mode, &mut rng)?;
        let sim = SimWorld::new(config.seed ^ 0x5eed_cafe, map.spawn);
        let mut game = Self {
            map,
            sim,
            level: 1,
            status: Status::Running,
            move_count: 0,
            messages: Vec::new(),
            config,
            rng,
        };
        let spawn_goal = game.level == game.config.final_level;
        game.sim
            .populate(&game.map, game.level, spawn_goal, &mut game.rng)?;
        game.push_message("Welcome to the warehouse. Clock in and keep your head down.");
        game.push_message("Find the Promotion Amulet and escape through the stairs.");
        Ok(game)
    }

    /// Last 5 messages, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn apply(&mut self, input: InputSymbol) -> Result<(), MapGenError> {
        if self.status != Status::Running {
            return Ok(());
        }

        let acted = match input {
            InputSymbol::Step(dir) => self.step(dir),
            InputSymbol::MaxStep(dir) => self.max_step(dir),
            InputSymbol::Grab => self.grab(),
            InputSymbol::UseStairs => self.use_stairs()?,
            // Help and quit are shell concerns; the turn is a no-op.
            InputSymbol::Help | InputSymbol::Quit => false,
        };

        if acted && self.status == Status::Running {
            self.move_count += 1;
            if self.move_count % 2 == 0 && self.sim.heal_player(1) > 0 {
                if let Some(stats) = self.sim.player_stats() {
                    self.push_message(format!(
                        "You regained 1 HP from rest. ({}/{})",
                        stats.hp, stats.max_hp
                    ));
                }
            }

            let events = self.sim.run_behaviors(&self.map);
            for event in events {
                self.push_message(event);
            }
            if self.sim.player_stats().is_none_or(|s| s.hp <= 0) {
                self.push_message("You have been defeated!");
                self.status = Status::Defeat;
                info!("player defeated on level {}", self.level);
            }
        }
        Ok(())
    }

    fn step(&mut self, dir: Direction) -> bool {
        let delta = dir.delta();
        let current = self.sim.player_point();
        let target = Point::new(current.x + delta.x, current.y + delta.y);

        if let Some(blocker) = self.sim.blocking_entity_at(target) {
            if let Some(report) = self.sim.player_attack(blocker) {
                self.push_message(report.hit);
                if let Some(kill) = report.kill {
                    self.push_message(kill);
                }
            }
            true
        } else if self.map.is_walkable(target) {
            self.sim.set_player_point(target);
            true
        } else {
            false
        }
    }

    /// Repeats single steps in one direction until something stops the
    /// player, reporting the reason and step count.
    fn max_step(&mut self, dir: Direction) -> bool {
        self.push_message(format!("Moving {} as far as possible...", dir.as_str()));
        let delta = dir.delta();
        let mut steps = 0;
        let mut moved = false;

        loop {
            let current = self.sim.player_point();
            let target = Point::new(current.x + delta.x, current.y + delta.y);

            if let Some(blocker) = self.sim.blocking_entity_at(target) {
                let name = self.sim.name_of(blocker);
                if let Some(report) = self.sim.player_attack(blocker) {
                    self.push_message(report.hit);
                    match report.kill {
                        Some(kill) => self.push_message(kill),
                        None => self.push_message(format!(
                            "Movement stopped at {name} after {steps} steps."
                        )),
                    }
                }
                moved = true;
                break;
            }

            match self.map.cell_at(target) {
                None => {
                    self.push_message(format!(
                        "Movement stopped at edge of warehouse after {steps} steps."
                    ));
                    break;
                }
                Some(cell) if !cell.is_walkable() => {
                    self.push_message(format!(
                        "Movement stopped by {} after {steps} steps.",
                        cell.obstacle_name()
                    ));
                    break;
                }
                Some(cell) => {
                    self.sim.set_player_point(target);
                    steps += 1;
                    moved = true;
                    if cell == Cell::StairsDown {
                        self.push_message(format!("Movement stopped at stairs after {steps} steps."));
                        break;
                    }
                    if let Some(item) = self.sim.item_at(target) {
                        let name = self.sim.name_of(item);
                        self.push_message(format!(
                            "Movement stopped at {name} after {steps} steps."
                        ));
                        break;
                    }
                }
            }
        }
        moved
    }

    fn grab(&mut self) -> bool {
        let point = self.sim.player_point();
        let Some(item) = self.sim.item_at(point) else {
            self.push_message("There's nothing here to pick up.");
            return false;
        };
        let name = self.sim.name_of(item);
        let Some(pickup) = self.sim.pickup_of(item) else {
            return false;
        };

        if pickup.goal {
            self.push_message(format!("You found the {name}! Now find the exit!"));
            self.sim.claim_goal();
            self.push_message("The amulet's power increases your maximum HP by 10!");
        } else {
            self.push_message(format!("You picked up {name}!"));
            if pickup.healing > 0 {
                let gained = self.sim.heal_player(pickup.healing);
                self.push_message(format!("You use {name} and gain {gained} health!"));
            }
            if pickup.weapon_bonus > 0 {
                self.sim
                    .modify_player_stats(|stats| stats.power += pickup.weapon_bonus);
                self.push_message(format!(
                    "The {name} raises your power by {}!",
                    pickup.weapon_bonus
                ));
            }
            if pickup.armor_bonus > 0 {
                self.sim
                    .modify_player_stats(|stats| stats.defense += pickup.armor_bonus);
                self.push_message(format!(
                    "The {name} raises your defense by {}!",
                    pickup.armor_bonus
                ));
            }
        }
        self.sim.remove_entity(item);
        true
    }

    /// Stairs resolve to victory or descent; neither counts as an action
    /// for healing or the enemy pass.
    fn use_stairs(&mut self) -> Result<bool, MapGenError> {
        let point = self.sim.player_point();
        if self.map.cell_at(point) != Some(Cell::StairsDown) {
            self.push_message("There are no stairs here.");
            return Ok(false);
        }

        if self.sim.player_carrying_goal() && self.level >= self.config.final_level {
            self.push_message("You escape with the Promotion Amulet! YOU WIN!");
            self.status = Status::Victory;
            info!("victory on level {}", self.level);
            return Ok(false);
        }

        self.level += 1;
        self.push_message(format!("You descend to warehouse level {}...", self.level));
        self.descend()?;
        Ok(false)
    }

    /// Full level regeneration: new map, entity set rebuilt, player stats
    /// and carrying flag preserved.
    fn descend(&mut self) -> Result<(), MapGenError> {
        self.map = WarehouseMap::generate(
            self.config.width,
            self.config.height,
            self.level,
            self.config.mode,
            &mut self.rng,
        )?;
        self.sim.clear_level_entities();
        self.sim.set_player_point(self.map.spawn);
        let spawn_goal = self.level == self.config.final_level;
        self.sim
            .populate(&self.map, self.level, spawn_goal, &mut self.rng)?;
        info!("descended to level {}", self.level);
        Ok(())
    }

    fn push_message<S: Into<String>>(&mut self, entry: S) {
        self.messages.push(entry.into());
        if self.messages.len() > MESSAGE_CAPACITY {
            self.messages.remove(0);
        }
    }
}
