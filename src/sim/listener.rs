//! Hit notifications and the deferred mutation queue
//!
//! Obstacles fan hit events out to their listeners synchronously, inside
//! `hit()`. Listeners never touch the environment directly; they queue
//! removals on [`Effects`], which the level flushes once the striking ball's
//! step is over.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::ball::BallId;
use super::obstacle::ObstacleId;
use super::point::Point;

/// What a listener learns about a hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub obstacle: ObstacleId,
    pub ball: BallId,
    pub point: Point,
    /// Durability left after the hit; `None` for indestructible surfaces
    pub durability: Option<u32>,
}

impl HitEvent {
    /// The hit took the obstacle's last point of durability
    pub fn destroyed(&self) -> bool {
        self.durability == Some(0)
    }
}

/// Observer of hits on an obstacle
pub trait HitListener {
    fn hit_event(&self, event: &HitEvent, effects: &mut Effects);
}

/// Shared listener handle, compared by identity
pub type ListenerHandle = Rc<dyn HitListener>;

/// Ordered listener set with snapshot fan-out
#[derive(Clone, Default)]
pub struct Listeners {
    handles: Vec<ListenerHandle>,
}

impl Listeners {
    pub fn add(&mut self, listener: ListenerHandle) {
        if !self.handles.iter().any(|h| Rc::ptr_eq(h, &listener)) {
            self.handles.push(listener);
        }
    }

    pub fn remove(&mut self, listener: &ListenerHandle) {
        self.handles.retain(|h| !Rc::ptr_eq(h, listener));
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Deliver `event` to every listener registered when the call started
    pub fn notify(&self, event: &HitEvent, effects: &mut Effects) {
        let snapshot = self.handles.clone();
        for listener in &snapshot {
            listener.hit_event(event, effects);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.handles.len())
            .finish()
    }
}

/// Removals requested during a ball's step, applied afterwards in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    removed_obstacles: Vec<ObstacleId>,
    removed_balls: Vec<BallId>,
}

impl Effects {
    pub fn remove_obstacle(&mut self, id: ObstacleId) {
        if !self.removed_obstacles.contains(&id) {
            self.removed_obstacles.push(id);
        }
    }

    pub fn remove_ball(&mut self, id: BallId) {
        if !self.removed_balls.contains(&id) {
            self.removed_balls.push(id);
        }
    }

    pub fn removed_obstacles(&self) -> &[ObstacleId] {
        &self.removed_obstacles
    }

    pub fn removed_balls(&self) -> &[BallId] {
        &self.removed_balls
    }

    pub fn is_empty(&self) -> bool {
        self.removed_obstacles.is_empty() && self.removed_balls.is_empty()
    }

    /// Hand the queued removals to the caller, leaving the queue empty
    pub fn take(&mut self) -> Effects {
        std::mem::take(self)
    }
}

/// Integer counter shared between the game-flow layer and listeners
#[derive(Debug, Clone, Default)]
pub struct Counter(Rc<Cell<i64>>);

impl Counter {
    pub fn new(value: i64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn increase(&self, n: i64) {
        self.0.set(self.0.get() + n);
    }

    pub fn decrease(&self, n: i64) {
        self.0.set(self.0.get() - n);
    }

    pub fn value(&self) -> i64 {
        self.0.get()
    }
}

/// Removes blocks whose durability has run out
pub struct BlockRemover {
    remaining_blocks: Counter,
}

impl BlockRemover {
    pub fn new(remaining_blocks: Counter) -> Self {
        Self { remaining_blocks }
    }
}

impl HitListener for BlockRemover {
    fn hit_event(&self, event: &HitEvent, effects: &mut Effects) {
        if event.destroyed() {
            log::debug!("Block {:?} destroyed by ball {:?}", event.obstacle, event.ball);
            effects.remove_obstacle(event.obstacle);
            self.remaining_blocks.decrease(1);
        }
    }
}

/// Drops balls that reach the death boundary and counts them down
pub struct BallRemover {
    remaining_balls: Counter,
}

impl BallRemover {
    pub fn new(remaining_balls: Counter) -> Self {
        Self { remaining_balls }
    }
}

impl HitListener for BallRemover {
    fn hit_event(&self, event: &HitEvent, effects: &mut Effects) {
        log::debug!("Ball {:?} fell out of the arena", event.ball);
        effects.remove_ball(event.ball);
        self.remaining_balls.decrease(1);
    }
}

/// Points for hitting blocks
pub struct ScoreTracker {
    score: Counter,
}

impl ScoreTracker {
    pub const HIT_POINTS: i64 = 5;
    pub const DESTROY_BONUS: i64 = 10;

    pub fn new(score: Counter) -> Self {
        Self { score }
    }
}

impl HitListener for ScoreTracker {
    fn hit_event(&self, event: &HitEvent, _effects: &mut Effects) {
        self.score.increase(Self::HIT_POINTS);
        if event.destroyed() {
            self.score.increase(Self::DESTROY_BONUS);
        }
    }
}
