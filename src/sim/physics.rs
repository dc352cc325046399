//! Minimal physics sandbox
//!
//! Just enough rigid-body behaviour to drive the round engine headless:
//! gravity, linear damping, bouncy circular pins and contact-begin
//! detection. Coins are sensors (reported, never collided with). Balls do
//! not collide with each other.

use std::collections::BTreeSet;

use glam::Vec2;

use super::world::{BodyId, Category, Contact, PhysicsWorld};
use crate::consts::*;

/// Downward acceleration (points/s²)
pub const GRAVITY: Vec2 = Vec2::new(0.0, -720.0);
/// Velocity decay per second
pub const LINEAR_DAMPING: f32 = 1.0;
/// Mass used to turn impulses into velocity changes
pub const BALL_MASS: f32 = 0.05;
/// Bounce energy kept off a pin
pub const PIN_RESTITUTION: f32 = 0.6;

/// Result of a circle overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Surface normal pointing from the obstacle toward the ball
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between a ball and a static circle
pub fn ball_circle_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    radius: f32,
) -> CollisionResult {
    let offset = ball_pos - center;
    let dist = offset.length();
    let reach = ball_radius + radius;
    if dist >= reach {
        return CollisionResult::miss();
    }

    // Centers coincide: push straight up
    let normal = if dist < 1e-4 { Vec2::Y } else { offset / dist };
    CollisionResult {
        hit: true,
        normal,
        penetration: reach - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Radius of a body by category
pub fn radius_for(category: Category) -> f32 {
    match category {
        Category::PlayerBall | Category::BotBall => BALL_RADIUS,
        Category::Coin => COIN_RADIUS,
        Category::Pin => PEG_RADIUS,
    }
}

#[derive(Debug, Clone)]
struct Body {
    id: BodyId,
    category: Category,
    pos: Vec2,
    vel: Vec2,
    radius: f32,
}

/// Arena of circular bodies with a fixed-step integrator
#[derive(Debug, Clone)]
pub struct SimpleWorld {
    /// Bodies sorted by id for deterministic iteration
    bodies: Vec<Body>,
    /// Pairs currently overlapping (smaller id first)
    touching: BTreeSet<(BodyId, BodyId)>,
    next_id: u32,
    pub gravity: Vec2,
}

impl Default for SimpleWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleWorld {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            touching: BTreeSet::new(),
            next_id: 1,
            gravity: GRAVITY,
        }
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of live bodies of a category
    pub fn count(&self, category: Category) -> usize {
        self.bodies.iter().filter(|b| b.category == category).count()
    }

    /// Current velocity of a body
    pub fn velocity(&self, body: BodyId) -> Option<Vec2> {
        self.get(body).map(|b| b.vel)
    }

    /// Teleport a body, keeping its velocity
    pub fn set_position(&mut self, body: BodyId, pos: Vec2) {
        if let Some(b) = self.get_mut(body) {
            b.pos = pos;
        }
    }

    fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }
}

fn pair(a: BodyId, b: BodyId) -> (BodyId, BodyId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl PhysicsWorld for SimpleWorld {
    fn spawn(&mut self, category: Category, pos: Vec2) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            category,
            pos,
            vel: Vec2::ZERO,
            radius: radius_for(category),
        });
        id
    }

    fn remove(&mut self, body: BodyId) {
        self.bodies.retain(|b| b.id != body);
        self.touching.retain(|&(a, b)| a != body && b != body);
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec2) {
        if let Some(b) = self.get_mut(body) {
            if !b.category.is_static() {
                b.vel += impulse / BALL_MASS;
            }
        }
    }

    fn position(&self, body: BodyId) -> Option<Vec2> {
        self.get(body).map(|b| b.pos)
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        let damping = 1.0 / (1.0 + LINEAR_DAMPING * dt);
        for body in self.bodies.iter_mut().filter(|b| !b.category.is_static()) {
            body.vel += self.gravity * dt;
            body.vel *= damping;
            body.pos += body.vel * dt;
        }

        let statics: Vec<(BodyId, Category, Vec2, f32)> = self
            .bodies
            .iter()
            .filter(|b| b.category.is_static())
            .map(|b| (b.id, b.category, b.pos, b.radius))
            .collect();

        let mut contacts = Vec::new();
        let mut still_touching = BTreeSet::new();

        for ball in self.bodies.iter_mut().filter(|b| !b.category.is_static()) {
            for &(id, category, center, radius) in &statics {
                let result = ball_circle_collision(ball.pos, ball.radius, center, radius);
                if !result.hit {
                    continue;
                }

                let key = pair(ball.id, id);
                if !self.touching.contains(&key) {
                    contacts.push(Contact::new((ball.id, ball.category), (id, category)));
                }
                still_touching.insert(key);

                if category == Category::Pin {
                    let mut normal = result.normal;
                    // A ball balanced on a pin's crown would never fall off
                    if normal.x.abs() < 0.05 {
                        let side = if ball.id.0 % 2 == 0 { 1.0 } else { -1.0 };
                        normal = Vec2::new(0.05 * side, normal.y).normalize();
                    }
                    ball.pos += normal * result.penetration;
                    if ball.vel.dot(normal) < 0.0 {
                        ball.vel = reflect_velocity(ball.vel, normal) * PIN_RESTITUTION;
                    }
                }
            }
        }

        self.touching = still_touching;
        contacts
    }

    fn clear(&mut self) {
        self.bodies.clear();
        self.touching.clear();
    }
}
