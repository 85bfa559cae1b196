use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use crate::game::WarehouseGame;
use crate::map::{Cell, WarehouseMap};

pub const MAP_ORIGIN_X: i32 = 0;
pub const MAP_ORIGIN_Y: i32 = 2;

/// Per-cell foreground color. Entities paint over this in their own pass.
pub fn cell_color(cell: Cell) -> RGB {
    match cell {
        Cell::Floor => RGB::named(DARK_GRAY),
        Cell::Wall => RGB::named(GRAY),
        Cell::Shelf | Cell::ShelfVertical => RGB::from_u8(139, 90, 43),
        Cell::PackingStation => RGB::named(LIGHT_BLUE),
        Cell::SortingMachine => RGB::named(MAGENTA),
        Cell::ConveyorBelt => RGB::named(ORANGE),
        Cell::LoadingDock => RGB::named(LIGHT_CYAN),
        Cell::StairsDown => RGB::named(YELLOW),
    }
}

pub fn draw_map(ctx: &mut BTerm, map: &WarehouseMap, origin: Point) {
    for y in 0..map.height {
        for x in 0..map.width {
            let point = Point::new(x, y);
            if let Some(cell) = map.cell_at(point) {
                ctx.set(
                    origin.x + x,
                    origin.y + y,
                    cell_color(cell),
                    RGB::named(BLACK),
                    cell.glyph() as u16,
                );
            }
        }
    }
}

pub fn draw_status(ctx: &mut BTerm, game: &WarehouseGame) {
    let Some(stats) = game.sim.player_stats() else {
        return;
    };
    let hp_color = if stats.hp * 10 <= stats.max_hp * 3 {
        RGB::named(RED)
    } else if stats.hp * 10 <= stats.max_hp * 6 {
        RGB::named(ORANGE)
    } else {
        RGB::named(LIGHT_GREEN)
    };
    ctx.print_color(
        1,
        0,
        hp_color,
        RGB::named(BLACK),
        format!("HP {}/{}", stats.hp, stats.max_hp),
    );
    ctx.print_color(
        14,
        0,
        RGB::named(WHITE),
        RGB::named(BLACK),
        format!(
            "POW {}  DEF {}  Level {}",
            stats.power, stats.defense, game.level
        ),
    );
    if game.sim.player_carrying_goal() {
        ctx.print_color(
            40,
            0,
            RGB::named(YELLOW),
            RGB::named(BLACK),
            "* Promotion Amulet *",
        );
    }
}

pub fn draw_log(ctx: &mut BTerm, log: &[String], start_y: i32) {
    for (row, entry) in log.iter().enumerate() {
        ctx.print_color(
            1,
            start_y + row as i32,
            RGB::named(WHITE),
            RGB::named(BLACK),
            entry,
        );
    }
}

pub fn draw_help(ctx: &mut BTerm, start_y: i32) {
    let lines = [
        "Move: arrows / wasd / hjkl   Shift+move: go as far as possible",
        "g: grab item   >: use stairs   ?: help   q: quit",
    ];
    for (row, line) in lines.iter().enumerate() {
        ctx.print_color(
            1,
            start_y + row as i32,
            RGB::named(LIGHT_CYAN),
            RGB::named(BLACK),
            line,
        );
    }
}
