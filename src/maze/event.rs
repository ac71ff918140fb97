/// Events emitted during a maze simulation step.
/// The embedding layer consumes these for scoring display / animation.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MazeEvent {
    DotEaten { col: i32, row: i32 },
    /// The last dot was consumed this tick.
    MazeCleared,
    PlayerCaught { lives_left: u32 },
    GameOver,
    Restarted,
}
