pub mod geom;
pub mod grid;
pub mod mover;
