//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;

use glam::Vec2;

use bounce_bot_duel::persistence::MemoryStore;
use bounce_bot_duel::sim::{BodyId, Category, Competitor, Contact, PhysicsWorld, TickInput};
use bounce_bot_duel::{GameConfig, Session};

/// World where nothing moves on its own: tests decide which contacts
/// happen and when balls leave the board.
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    bodies: BTreeMap<BodyId, (Category, Vec2)>,
    next_id: u32,
    pending: Vec<Contact>,
    pub impulses: Vec<(BodyId, Vec2)>,
}

impl ScriptedWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a contact on the next step
    pub fn queue(&mut self, contact: Contact) {
        self.pending.push(contact);
    }

    pub fn count(&self, category: Category) -> usize {
        self.bodies.values().filter(|(c, _)| *c == category).count()
    }

    /// Move every ball below the board
    pub fn drop_balls_out(&mut self) {
        for (category, pos) in self.bodies.values_mut() {
            if !category.is_static() {
                pos.y = -100.0;
            }
        }
    }
}

impl PhysicsWorld for ScriptedWorld {
    fn spawn(&mut self, category: Category, pos: Vec2) -> BodyId {
        self.next_id += 1;
        let id = BodyId(self.next_id);
        self.bodies.insert(id, (category, pos));
        id
    }

    fn remove(&mut self, body: BodyId) {
        self.bodies.remove(&body);
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec2) {
        self.impulses.push((body, impulse));
    }

    fn position(&self, body: BodyId) -> Option<Vec2> {
        self.bodies.get(&body).map(|(_, pos)| *pos)
    }

    fn step(&mut self, _dt: f32) -> Vec<Contact> {
        std::mem::take(&mut self.pending)
    }

    fn clear(&mut self) {
        self.bodies.clear();
        self.pending.clear();
    }
}

pub type TestSession = Session<ScriptedWorld>;

pub fn session_with(config: GameConfig, store: MemoryStore, seed: u64) -> TestSession {
    Session::new(ScriptedWorld::new(), &config, Box::new(store), seed)
}

pub fn session() -> TestSession {
    session_with(GameConfig::default(), MemoryStore::new(), 42)
}

pub fn press(session: &mut TestSession, input: TickInput) {
    session.step(&input);
}

pub fn idle_tick(session: &mut TestSession) {
    session.step(&TickInput::default());
}

pub fn launch(session: &mut TestSession) {
    press(
        session,
        TickInput {
            launch: true,
            ..Default::default()
        },
    );
}

/// Queue a coin contact for `who`'s ball, if both are on the board
pub fn touch_coin(session: &mut TestSession, who: Competitor) -> bool {
    let state = session.state();
    let ball = match who {
        Competitor::Player => state.player_ball,
        Competitor::Bot => state.bot_ball,
    };
    let (Some(ball), Some(coin)) = (ball, state.coin) else {
        return false;
    };
    session.world_mut().queue(Contact::new(
        (ball, who.ball_category()),
        (coin.body, Category::Coin),
    ));
    true
}

/// Full launch where `winner` (if any) takes the coin
pub fn play_round(session: &mut TestSession, winner: Option<Competitor>) {
    launch(session);
    if let Some(who) = winner {
        touch_coin(session, who);
        idle_tick(session);
    }
    session.world_mut().drop_balls_out();
    idle_tick(session);
}
