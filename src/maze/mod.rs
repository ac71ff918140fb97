pub mod ai;
pub mod event;
pub mod step;
pub mod world;

pub use event::MazeEvent;
pub use step::step;
pub use world::{MazeInput, MazeWorld, Phase};
