use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::DistanceAlg;
use bracket_random::prelude::RandomNumberGenerator;
use specs::prelude::*;

use crate::{
    combat,
    data::WANDERER_LINES,
    ecs::{
        components::{Brain, CombatStats, Name, PlayerTag, Position},
        resources::{EventLog, TurnContext},
    },
};

pub const AXIS_DIRS: [Point; 4] = [
    Point { x: 1, y: 0 },
    Point { x: -1, y: 0 },
    Point { x: 0, y: 1 },
    Point { x: 0, y: -1 },
];

/// Runs every enemy brain exactly once, in entity-set order. Event strings
/// go to the EventLog; the turn engine appends them after the pass.
#[derive(Default)]
pub struct BehaviorSystem;

impl<'a> System<'a> for BehaviorSystem {
    type SystemData = (
        Entities<'a>,
        WriteStorage<'a, Position>,
        WriteStorage<'a, CombatStats>,
        WriteStorage<'a, Brain>,
        ReadStorage<'a, Name>,
        ReadStorage<'a, PlayerTag>,
        ReadExpect<'a, TurnContext>,
        WriteExpect<'a, RandomNumberGenerator>,
        WriteExpect<'a, EventLog>,
    );

    fn run(
        &mut self,
        (entities, mut positions, mut stats, mut brains, names, players, ctx, mut rng, mut events): Self::SystemData,
    ) {
        let Some(player) = (&entities, &players).join().next().map(|(entity, _)| entity)
        else {
            return;
        };

        let actors: Vec<Entity> = (&entities, &brains)
            .join()
            .map(|(entity, _)| entity)
            .collect();

        // Picker units steer around each other; snapshot their cells up
        // front and keep it current as they move.
        let mut picker_cells: Vec<(Entity, Point)> = (&entities, &brains, &positions)
            .join()
            .filter(|(_, brain, _)| {
                matches!(brain, Brain::Picker { .. } | Brain::SuperPicker { .. })
            })
            .map(|(entity, _, pos)| (entity, pos.point))
            .collect();

        for entity in actors {
            // Player down: the rest of the pass is skipped.
            if stats.get(player).is_none_or(|s| s.hp <= 0) {
                break;
            }
            let Some(pos) = positions.get(entity).map(|p| p.point) else {
                continue;
            };
            let Some(brain) = brains.get_mut(entity) else {
                continue;
            };

            match brain {
                Brain::Chaser { radius } => {
                    let radius = *radius;
                    chase_or_attack(
                        entity,
                        pos,
                        radius,
                        player,
                        &mut positions,
                        &mut stats,
                        &names,
                        &ctx,
                        &mut events,
                    );
                }
                Brain::Picker { dir, push, swap_in } => {
                    *swap_in -= 1;
                    if *swap_in <= 0 {
                        *dir = Point::new(-dir.x, -dir.y);
                        *swap_in = rng.range(10, 21);
                    }
                    let mut dir = *dir;
                    let push = *push;
                    picker_substep(
                        entity,
                        &mut dir,
                        push,
                        false,
                        player,
                        &mut positions,
                        &names,
                        &ctx,
                        &mut rng,
                        &mut picker_cells,
                        &mut events,
                    );
                    if let Some(Brain::Picker { dir: stored, .. }) = brains.get_mut(entity) {
                        *stored = dir;
                    }
                }
                Brain::SuperPicker {
                    dir,
                    push,
                    speed,
                    swap_in,
                    countdown,
                    last_player,
                } => {
                    let player_point = positions.get(player).map(|p| p.point);
                    let Some(player_point) = player_point else {
                        continue;
                    };

                    let mut dir = *dir;
                    let push = *push;
                    let mut steps = 0;
                    if player_point != *last_player {
                        steps = *speed;
                    } else {
                        *countdown -= 1;
                        if *countdown <= 0 {
                            steps = 1;
                            *countdown = rng.range(2, 5);
                        }
                    }
                    let mut swaps = *swap_in;
                    for _ in 0..steps {
                        swaps -= 1;
                        if swaps <= 0 {
                            dir = random_new_dir(&mut rng, dir);
                            swaps = rng.range(10, 21);
                        }
                        picker_substep(
                            entity,
                            &mut dir,
                            push,
                            true,
                            player,
                            &mut positions,
                            &names,
                            &ctx,
                            &mut rng,
                            &mut picker_cells,
                            &mut events,
                        );
                    }

                    let observed = positions.get(player).map(|p| p.point).unwrap_or(player_point);
                    if let Some(Brain::SuperPicker {
                        dir: stored_dir,
                        swap_in: stored_swaps,
                        last_player: stored_last,
                        ..
                    }) = brains.get_mut(entity)
                    {
                        *stored_dir = dir;
                        *stored_swaps = swaps;
                        *stored_last = observed;
                    }
                }
                Brain::Wanderer {
                    radius,
                    interval,
                    clock,
                } => {
                    *clock += 1;
                    if *clock >= *interval {
                        *clock = 0;
                        let line = WANDERER_LINES[rng.range(0, WANDERER_LINES.len() as i32) as usize];
                        let name = display_name(&names, entity);
                        events.push(format!("{name}: {line}"));
                        continue;
                    }
                    let radius = *radius;
                    chase_or_attack(
                        entity,
                        pos,
                        radius,
                        player,
                        &mut positions,
                        &mut stats,
                        &names,
                        &ctx,
                        &mut events,
                    );
                }
            }
        }
    }
}

fn display_name(names: &ReadStorage<'_, Name>, entity: Entity) -> String {
    names
        .get(entity)
        .map(|n| n.name.clone())
        .unwrap_or_else(|| "something".to_string())
}

/// Chase inside the visibility radius, attack when adjacent. Never both in
/// one tick.
#[allow(clippy::too_many_arguments)]
fn chase_or_attack(
    entity: Entity,
    pos: Point,
    radius: f32,
    player: Entity,
    positions: &mut WriteStorage<'_, Position>,
    stats: &mut WriteStorage<'_, CombatStats>,
    names: &ReadStorage<'_, Name>,
    ctx: &TurnContext,
    events: &mut EventLog,
) {
    let Some(player_point) = positions.get(player).map(|p| p.point) else {
        return;
    };
    let dist = DistanceAlg::Pythagoras.distance2d(pos, player_point);
    if dist >= radius {
        return;
    }
    // Diagonal neighbors (distance sqrt(2)) still count as adjacent.
    if dist >= 1.5 {
        if let Some(next) = chase_step(pos, player_point, ctx) {
            if let Some(position) = positions.get_mut(entity) {
                position.point = next;
            }
        }
    } else if stats.get(player).is_some_and(|s| s.hp > 0) {
        let Some(attacker) = stats.get(entity).cloned() else {
            return;
        };
        let Some(defender) = stats.get_mut(player) else {
            return;
        };
        let outcome = combat::attack(&attacker, defender);
        let name = display_name(names, entity);
        events.push(format!(
            "{name} attacks you for {} damage!",
            outcome.damage
        ));
    }
}

/// Greedy axis-priority step: horizontal first, then vertical, diagonal as
/// a last resort. First legal move wins; the player's cell is never entered.
pub fn chase_step(from: Point, target: Point, ctx: &TurnContext) -> Option<Point> {
    let dx = (target.x - from.x).signum();
    let dy = (target.y - from.y).signum();
    let mut candidates = Vec::with_capacity(3);
    if dx != 0 {
        candidates.push(Point::new(from.x + dx, from.y));
    }
    if dy != 0 {
        candidates.push(Point::new(from.x, from.y + dy));
    }
    if dx != 0 && dy != 0 {
        candidates.push(Point::new(from.x + dx, from.y + dy));
    }
    candidates
        .into_iter()
        .find(|&next| next != target && ctx.is_walkable(next))
}

/// One picker movement step: shove the player if they are in the way, walk
/// otherwise, and turn around (or pick a fresh heading) when blocked.
#[allow(clippy::too_many_arguments)]
fn picker_substep(
    entity: Entity,
    dir: &mut Point,
    push: i32,
    random_redirect: bool,
    player: Entity,
    positions: &mut WriteStorage<'_, Position>,
    names: &ReadStorage<'_, Name>,
    ctx: &TurnContext,
    rng: &mut RandomNumberGenerator,
    picker_cells: &mut Vec<(Entity, Point)>,
    events: &mut EventLog,
) {
    let Some(pos) = positions.get(entity).map(|p| p.point) else {
        return;
    };
    let Some(player_point) = positions.get(player).map(|p| p.point) else {
        return;
    };
    let next = Point::new(pos.x + dir.x, pos.y + dir.y);

    if next == player_point {
        let mut distance = 0;
        let mut dest = player_point;
        for _ in 0..push {
            let candidate = Point::new(dest.x + dir.x, dest.y + dir.y);
            if !ctx.is_walkable(candidate) {
                break;
            }
            dest = candidate;
            distance += 1;
        }
        let name = display_name(names, entity);
        if distance > 0 {
            if let Some(position) = positions.get_mut(player) {
                position.point = dest;
            }
            if let Some(position) = positions.get_mut(entity) {
                position.point = player_point;
            }
            update_picker_cell(picker_cells, entity, player_point);
            events.push(format!(
                "{name} shoves you {distance} cells down the aisle!"
            ));
        } else {
            events.push(format!("{name} rams you, but you have nowhere to go!"));
        }
        return;
    }

    let occupied_by_picker = picker_cells
        .iter()
        .any(|&(other, cell)| other != entity && cell == next);
    if !ctx.is_walkable(next) || occupied_by_picker {
        *dir = if random_redirect {
            random_new_dir(rng, *dir)
        } else {
            Point::new(-dir.x, -dir.y)
        };
        let name = display_name(names, entity);
        events.push(format!("{name} pivots and heads {}.", dir_name(*dir)));
        return;
    }

    if let Some(position) = positions.get_mut(entity) {
        position.point = next;
    }
    update_picker_cell(picker_cells, entity, next);
}

fn update_picker_cell(picker_cells: &mut [(Entity, Point)], entity: Entity, point: Point) {
    if let Some(slot) = picker_cells.iter_mut().find(|(other, _)| *other == entity) {
        slot.1 = point;
    }
}

/// Picks a fresh axis direction, avoiding the current heading and its
/// reverse when possible.
pub fn random_new_dir(rng: &mut RandomNumberGenerator, current: Point) -> Point {
    let reverse = Point::new(-current.x, -current.y);
    let fresh: Vec<Point> = AXIS_DIRS
        .iter()
        .copied()
        .filter(|&dir| dir != current && dir != reverse)
        .collect();
    if fresh.is_empty() {
        reverse
    } else {
        fresh[rng.range(0, fresh.len() as i32) as usize]
    }
}

pub fn dir_name(dir: Point) -> &'static str {
    match (dir.x, dir.y) {
        (1, 0) => "east",
        (-1, 0) => "west",
        (0, 1) => "south",
        (0, -1) => "north",
        _ => "nowhere",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Cell, GenMode, WarehouseMap};

    fn open_ctx() -> TurnContext {
        let map = WarehouseMap::filled(10, 10, Cell::Floor, GenMode::OpenIslands);
        TurnContext::from_map(&map)
    }

    #[test]
    fn chase_step_prefers_horizontal() {
        let ctx = open_ctx();
        let step = chase_step(Point::new(2, 2), Point::new(6, 5), &ctx);
        assert_eq!(step, Some(Point::new(3, 2)));
    }

    #[test]
    fn chase_step_never_lands_on_target() {
        let mut map = WarehouseMap::filled(10, 10, Cell::Floor, GenMode::OpenIslands);
        // Wall off the horizontal and vertical options so only the diagonal
        // remains, which is the target itself.
        map.set_cell(Point::new(3, 2), Cell::Wall);
        map.set_cell(Point::new(2, 3), Cell::Wall);
        let ctx = TurnContext::from_map(&map);
        let step = chase_step(Point::new(2, 2), Point::new(3, 3), &ctx);
        assert_eq!(step, None);
    }

    #[test]
    fn random_new_dir_avoids_current_axis() {
        let mut rng = RandomNumberGenerator::seeded(9);
        for _ in 0..32 {
            let dir = random_new_dir(&mut rng, Point::new(1, 0));
            assert!(dir == Point::new(0, 1) || dir == Point::new(0, -1));
        }
    }
}
