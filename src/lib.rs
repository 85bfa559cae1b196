pub mod combat;
pub mod data;
pub mod ecs;
pub mod game;
pub mod input;
pub mod map;
pub mod render;
