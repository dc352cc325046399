//! Physics sandbox seam
//!
//! The round engine never integrates motion itself. It talks to a world
//! through `PhysicsWorld`: bodies are tagged with a closed `Category`, held
//! by stable `BodyId` handles, and contact-begin notifications come back
//! from `step`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle to a body in the world arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Collision category of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    PlayerBall,
    BotBall,
    Coin,
    Pin,
}

impl Category {
    /// The competitor owning a ball, if this is a ball
    pub fn competitor(self) -> Option<Competitor> {
        match self {
            Category::PlayerBall => Some(Competitor::Player),
            Category::BotBall => Some(Competitor::Bot),
            Category::Coin | Category::Pin => None,
        }
    }

    /// Static bodies never move
    pub fn is_static(self) -> bool {
        matches!(self, Category::Coin | Category::Pin)
    }
}

/// The two sides racing for the coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competitor {
    Player,
    Bot,
}

impl Competitor {
    pub fn ball_category(self) -> Category {
        match self {
            Competitor::Player => Category::PlayerBall,
            Competitor::Bot => Category::BotBall,
        }
    }
}

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub id: BodyId,
    pub category: Category,
}

/// Two bodies started touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl Contact {
    pub fn new(a: (BodyId, Category), b: (BodyId, Category)) -> Self {
        Self {
            a: ContactBody { id: a.0, category: a.1 },
            b: ContactBody { id: b.0, category: b.1 },
        }
    }

    /// If this contact involves `category`, return (that body, the other body)
    pub fn involving(&self, category: Category) -> Option<(ContactBody, ContactBody)> {
        if self.a.category == category {
            Some((self.a, self.b))
        } else if self.b.category == category {
            Some((self.b, self.a))
        } else {
            None
        }
    }

    /// Ball side of the contact, if any
    pub fn ball(&self) -> Option<(Competitor, ContactBody, ContactBody)> {
        if let Some(c) = self.a.category.competitor() {
            Some((c, self.a, self.b))
        } else {
            self.b.category.competitor().map(|c| (c, self.b, self.a))
        }
    }

    /// Dispatch priority within one step: player contacts first
    pub fn priority(&self) -> u8 {
        match self.ball() {
            Some((Competitor::Player, _, _)) => 0,
            Some((Competitor::Bot, _, _)) => 1,
            None => 2,
        }
    }
}

/// A 2D rigid-body simulator as seen by the round engine
pub trait PhysicsWorld {
    /// Add a body of the given category; returns its handle
    fn spawn(&mut self, category: Category, pos: Vec2) -> BodyId;

    /// Remove a body. Unknown handles are ignored.
    fn remove(&mut self, body: BodyId);

    /// Apply an instantaneous impulse to a dynamic body
    fn apply_impulse(&mut self, body: BodyId, impulse: Vec2);

    /// Current position, `None` once the body is gone
    fn position(&self, body: BodyId) -> Option<Vec2>;

    /// Advance the simulation, returning contacts that began this step
    fn step(&mut self, dt: f32) -> Vec<Contact>;

    /// Remove every body
    fn clear(&mut self);
}
