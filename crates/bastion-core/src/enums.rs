//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Terrain tile type. One cell of the level grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    /// Destructible wall. Crumbles after repeated bullet hits.
    Brick,
    /// Indestructible to normal fire; power-2 bullets punch through.
    Steel,
    /// Blocks tanks, transparent to bullets.
    Water,
    /// Passable cover. Render-order overlay only.
    Grass,
    /// Passable. No movement penalty is modeled.
    Ice,
    /// The defended objective. Destruction loses the level.
    Base,
}

impl Tile {
    /// Whether a tank bounding box may overlap this tile.
    pub fn blocks_tank(&self) -> bool {
        matches!(self, Tile::Brick | Tile::Steel | Tile::Water | Tile::Base)
    }
}

/// Cardinal facing / travel direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit movement delta in world space (y grows downward).
    pub fn delta(&self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Right => (1.0, 0.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// The two directions perpendicular to this one.
    pub fn perpendicular(&self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    /// Facing for a movement vector: dominant axis wins, ties prefer
    /// horizontal. Returns None for a zero vector.
    pub fn from_delta(dx: f64, dy: f64) -> Option<Direction> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        if dx.abs() >= dy.abs() && dx != 0.0 {
            Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }
}

/// Tank ownership / variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankKind {
    Player,
    /// Baseline enemy.
    Basic,
    /// Faster movement, quicker reload.
    Fast,
    /// Slow, fires power-2 bullets that pierce steel.
    Power,
    /// Slow, takes four hits to destroy.
    Armor,
}

impl TankKind {
    pub fn is_enemy(&self) -> bool {
        !matches!(self, TankKind::Player)
    }
}

/// Power-up variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Freeze,
    ExtraLife,
    Grenade,
    Helmet,
    Clock,
    Shovel,
    Star,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 8] = [
        PowerUpKind::Shield,
        PowerUpKind::Freeze,
        PowerUpKind::ExtraLife,
        PowerUpKind::Grenade,
        PowerUpKind::Helmet,
        PowerUpKind::Clock,
        PowerUpKind::Shovel,
        PowerUpKind::Star,
    ];
}

/// Explosion size class (presentation only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionSize {
    Small,
    Large,
}

/// Enemy AI behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Rolling in the current facing until the dwell timer runs out
    /// or a move is rejected.
    #[default]
    Wandering,
    /// Choosing a new target point and direction.
    Retargeting,
    /// Suspended by a game-wide freeze. No movement, no firing.
    Frozen,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Active,
    Paused,
    LevelComplete,
    GameOver,
}
