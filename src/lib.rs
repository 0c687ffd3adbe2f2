//! Sparse Conway's Game of Life on an unbounded grid.

pub mod engine;
pub mod patterns;
pub mod pos;
pub mod scheduler;

pub use engine::{GameEngineWindow, LifeEngine, LiveCells};
pub use patterns::Pattern;
pub use pos::Pos2;
pub use scheduler::Scheduler;
