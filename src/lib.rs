//! **perfect_mazes** generates perfect mazes with a randomized depth first backtracker and lays
//! them out for rendering.
//!
//! A maze is handed over as two wall opening grids: vertical walls between horizontally
//! adjacent cells and horizontal walls between vertically adjacent cells.

pub mod connectivity;
pub mod coordinates;
pub mod errors;
pub mod generators;
pub mod layout;
pub mod maze;
pub mod renderers;
pub mod units;
pub mod walls;
