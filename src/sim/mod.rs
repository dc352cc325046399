//! Round engine
//!
//! All gameplay logic lives here. Rendering, audio and persistence are
//! driven from the events this module emits:
//! - Seeded RNG only
//! - Stable iteration order (by body ID)
//! - Physics behind the `PhysicsWorld` seam

pub mod controller;
pub mod level;
pub mod outcome;
pub mod physics;
pub mod state;
pub mod world;

pub use controller::{RoundController, TickInput};
pub use level::{CoinRequirement, LayoutTransform, ProgressionGate, peg_layout};
pub use outcome::{BallPlan, LaunchPlan, OutcomeTuning, resolve_launch};
pub use physics::SimpleWorld;
pub use state::{Coin, RoundEvent, RoundPhase, RoundState};
pub use world::{BodyId, Category, Competitor, Contact, PhysicsWorld};
