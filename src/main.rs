use std::time::{SystemTime, UNIX_EPOCH};

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use warehouserogue::game::{GameConfig, Status, WarehouseGame};
use warehouserogue::input::{InputSymbol, ScriptedInput, symbol_for_key};
use warehouserogue::map::{DEFAULT_MAP_HEIGHT, GenMode};
use warehouserogue::render::{
    MAP_ORIGIN_X, MAP_ORIGIN_Y, draw_help, draw_log, draw_map, draw_status,
};

const SCREEN_WIDTH: i32 = 80;
const SCREEN_HEIGHT: i32 = 30;
const LOG_PANEL_START: i32 = MAP_ORIGIN_Y + DEFAULT_MAP_HEIGHT + 1;

struct WarehouseShell {
    game: WarehouseGame,
    script: Option<ScriptedInput>,
    show_help: bool,
}

impl GameState for WarehouseShell {
    fn tick(&mut self, ctx: &mut BTerm) {
        let symbol = if let Some(script) = self.script.as_mut() {
            script.next_symbol()
        } else {
            ctx.key.and_then(|key| symbol_for_key(key, ctx.shift))
        };

        if let Some(symbol) = symbol {
            self.handle_symbol(ctx, symbol);
        }

        ctx.cls();
        self.draw_scene(ctx);
    }
}

impl WarehouseShell {
    fn handle_symbol(&mut self, ctx: &mut BTerm, symbol: InputSymbol) {
        match symbol {
            InputSymbol::Quit => ctx.quitting = true,
            InputSymbol::Help => self.show_help = !self.show_help,
            other => {
                self.show_help = false;
                if self.game.apply(other).is_err() {
                    // Regeneration exhausted its placement attempts; the
                    // session cannot continue.
                    ctx.quitting = true;
                }
            }
        }
    }

    fn draw_scene(&self, ctx: &mut BTerm) {
        draw_status(ctx, &self.game);
        draw_map(ctx, &self.game.map, Point::new(MAP_ORIGIN_X, MAP_ORIGIN_Y));
        self.game.sim.each_renderable(|point, renderable| {
            ctx.set(
                MAP_ORIGIN_X + point.x,
                MAP_ORIGIN_Y + point.y,
                renderable.color,
                RGB::named(BLACK),
                renderable.glyph as u16,
            );
        });
        draw_log(ctx, self.game.messages(), LOG_PANEL_START);

        if self.show_help {
            draw_help(ctx, LOG_PANEL_START - 3);
        }
        match self.game.status {
            Status::Defeat => ctx.print_color_centered(
                SCREEN_HEIGHT - 1,
                RGB::named(RED),
                RGB::named(BLACK),
                "GAME OVER - press q to clock out",
            ),
            Status::Victory => ctx.print_color_centered(
                SCREEN_HEIGHT - 1,
                RGB::named(YELLOW),
                RGB::named(BLACK),
                "PROMOTED! - press q to clock out",
            ),
            Status::Running => {}
        }
    }
}

fn main() -> BError {
    let mut mode = GenMode::default();
    let mut script = None;
    for arg in std::env::args().skip(1) {
        if arg == "--open" {
            mode = GenMode::OpenIslands;
        } else {
            script = Some(ScriptedInput::from_file(&arg)?);
        }
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0x57a1_57a1);
    let game = WarehouseGame::new(GameConfig {
        mode,
        seed,
        ..GameConfig::default()
    })?;

    let context = BTermBuilder::simple(SCREEN_WIDTH, SCREEN_HEIGHT)?
        .with_title("Warehouse Rogue")
        .build()?;
    main_loop(
        context,
        WarehouseShell {
            game,
            script,
            show_help: false,
        },
    )
}
