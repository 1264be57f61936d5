// Core crate: shared ECS components, resources and system set labels.
// Simulation positions live in court space (pixels, origin top-left, y down);
// rendering converts to Bevy world space via `court_to_world`.

use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use vb_gesture::BlockType;

/// Kinematic state of every simulated body.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CourtBody {
    pub center: Vec2,
    /// Pixels per fixed tick.
    pub velocity: Vec2,
    pub size: Vec2,
}

impl CourtBody {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            velocity: Vec2::ZERO,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y * 0.5
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.size.y * 0.5
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x * 0.5
    }
}

/// Who last touched the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Lower,
    Upper,
    Spiker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerPose {
    #[default]
    Idle,
    Bump,
    KneesBent,
    LeftBlock,
    RightBlock,
    MiddleBlock,
    SplitBlock,
}

impl PlayerPose {
    pub const ALL: [PlayerPose; 7] = [
        PlayerPose::Idle,
        PlayerPose::Bump,
        PlayerPose::KneesBent,
        PlayerPose::LeftBlock,
        PlayerPose::RightBlock,
        PlayerPose::MiddleBlock,
        PlayerPose::SplitBlock,
    ];

    pub fn sprite_name(self) -> &'static str {
        match self {
            PlayerPose::Idle => "B_Idle",
            PlayerPose::Bump => "B_Bump",
            PlayerPose::KneesBent => "B_KneesBent",
            PlayerPose::LeftBlock => "B_LeftBlock",
            PlayerPose::RightBlock => "B_RightBlock",
            PlayerPose::MiddleBlock => "B_MiddleBlock",
            PlayerPose::SplitBlock => "B_SplitBlock",
        }
    }

    /// Pose shown for an active block; `None` for no block.
    pub fn for_block(block: BlockType) -> Option<Self> {
        match block {
            BlockType::None => None,
            BlockType::Left => Some(PlayerPose::LeftBlock),
            BlockType::Right => Some(PlayerPose::RightBlock),
            BlockType::Middle => Some(PlayerPose::MiddleBlock),
            BlockType::Split => Some(PlayerPose::SplitBlock),
        }
    }
}

/// The blocker controlled by gestures or keyboard.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    pub grounded: bool,
    pub block: BlockType,
    pub pose: PlayerPose,
    /// Upward speed applied by the next jump.
    pub jump_power: f32,
}

impl Player {
    pub fn new(jump_power: f32) -> Self {
        Self {
            grounded: true,
            block: BlockType::None,
            pose: PlayerPose::Idle,
            jump_power,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Ball {
    pub side: Side,
    /// Rising at constant speed after a pass, until the apex line.
    pub bouncing: bool,
}

/// An NPC that sends the ball back up. `side` is the value the ball takes on contact.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Passer {
    pub side: Side,
    pub home_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Aim {
    #[default]
    Left,
    Right,
}

impl Aim {
    /// Horizontal direction of a spike toward this aim.
    pub fn sign(self) -> f32 {
        match self {
            Aim::Left => -1.0,
            Aim::Right => 1.0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spiker {
    pub aim: Aim,
    pub jumping: bool,
    /// Primed while airborne before contact; cleared once the spike lands on the ball.
    pub primed: bool,
    pub origin_y: f32,
}

impl Spiker {
    pub fn new(origin_y: f32) -> Self {
        Self {
            aim: Aim::Left,
            jumping: false,
            primed: false,
            origin_y,
        }
    }

    pub fn sprite_name(&self) -> &'static str {
        match (self.jumping, self.primed, self.aim) {
            (false, _, _) => "S_Idle",
            (true, true, Aim::Left) => "S_LeftPrimed",
            (true, true, Aim::Right) => "S_RightPrimed",
            (true, false, Aim::Left) => "S_LeftSpike",
            (true, false, Aim::Right) => "S_RightSpike",
        }
    }
}

/// Deterministic RNG seed resource (set once at startup / tests for reproducible passes & aims).
#[derive(Resource, Debug, Copy, Clone, Default)]
pub struct RngSeed(pub u64);

/// Shared simulation RNG (pass speeds, spiker aims), seeded from [`RngSeed`].
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn from_seed(seed: RngSeed) -> Self {
        Self(StdRng::seed_from_u64(seed.0))
    }
}

impl FromWorld for GameRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<RngSeed>().copied().unwrap_or_default();
        Self::from_seed(seed)
    }
}

// Wrapper Bevy resource for the pure-data GameConfig (keeps vb_config free of bevy dependency).
#[derive(Resource, Debug, Clone, Default)]
pub struct GameConfigRes(pub vb_config::GameConfig);

/// Rally flow. Simulation systems only run while `Playing`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    #[default]
    Playing,
    Paused,
    KillBlock,
}

impl MatchPhase {
    pub fn is_playing(self) -> bool {
        self == MatchPhase::Playing
    }
}

/// Run condition for simulation systems.
pub fn match_playing(phase: Res<MatchPhase>) -> bool {
    phase.is_playing()
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RallyStats {
    pub spikes_faced: u32,
    pub passes: u32,
    pub kill_blocks: u32,
    pub resets: u32,
}

/// Map a court-space point to world space (origin at the court centre, y up).
pub fn court_to_world(p: Vec2, court_size: Vec2) -> Vec2 {
    Vec2::new(p.x - court_size.x * 0.5, court_size.y * 0.5 - p.y)
}

/// Inverse of [`court_to_world`].
pub fn world_to_court(p: Vec2, court_size: Vec2) -> Vec2 {
    Vec2::new(p.x + court_size.x * 0.5, court_size.y * 0.5 - p.y)
}

// System set labels, run in this order inside FixedUpdate.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub struct CaptureSet; // drain pose frames, run the classifier
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub struct ControlSet; // gesture / keyboard -> player intent
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub struct MotionSet; // player step, NPC AI, ball step
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub struct ContactSet; // ball vs NPC contacts, stun timers
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub struct RuleSet; // kill-block check, pose selection

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MatchPhase>()
            .init_resource::<RallyStats>()
            .init_resource::<GameRng>()
            .configure_sets(
                FixedUpdate,
                (CaptureSet, ControlSet, MotionSet, ContactSet, RuleSet).chain(),
            );
    }
}
