use bracket_geometry::prelude::Point;

use crate::map::WarehouseMap;

/// Immutable walkability snapshot handed to the behavior pass for one turn.
#[derive(Clone)]
pub struct TurnContext {
    pub width: i32,
    pub height: i32,
    walkable: Vec<bool>,
}

impl TurnContext {
    pub fn from_map(map: &WarehouseMap) -> Self {
        let mut walkable = Vec::with_capacity((map.width * map.height) as usize);
        for y in 0..map.height {
            for x in 0..map.width {
                walkable.push(map.is_walkable(Point::new(x, y)));
            }
        }
        Self {
            width: map.width,
            height: map.height,
            walkable,
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn is_walkable(&self, point: Point) -> bool {
        if !self.in_bounds(point) {
            return false;
        }
        let idx = (point.y * self.width + point.x) as usize;
        self.walkable.get(idx).copied().unwrap_or(false)
    }
}

/// Event strings produced during the enemy pass. Drained by the turn engine
/// after the whole pass completes, never interleaved with it.
#[derive(Default)]
pub struct EventLog {
    pub entries: Vec<String>,
}

impl EventLog {
    pub fn push<S: Into<String>>(&mut self, entry: S) {
        self.entries.push(entry.into());
    }
}
