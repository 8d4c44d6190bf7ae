//! Level state
//!
//! Owns the arena, the environment index and the balls. Entity ids are
//! handed out in creation order and balls are advanced in that order.

use super::arena::Arena;
use super::ball::{Ball, BallId};
use super::environment::Environment;
use super::listener::{Effects, ListenerHandle};
use super::obstacle::{Block, Boundary, BoundaryKind, Obstacle, ObstacleId, Paddle};
use super::point::Point;
use super::rect::Rect;
use super::velocity::Velocity;
use crate::level::{LevelConfig, LevelError};

/// One level in play
#[derive(Debug, Clone)]
pub struct LevelState {
    pub name: String,
    arena: Arena,
    environment: Environment,
    /// Active balls in the order they were spawned
    balls: Vec<Ball>,
    ball_radius: f64,
    paddle: ObstacleId,
    death_boundary: ObstacleId,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl LevelState {
    /// Empty level: paddle, walls and death boundary, no blocks or balls
    pub fn new(arena: Arena, paddle_rect: Rect, paddle_speed: f64, ball_radius: f64) -> Self {
        let mut state = Self::framed(arena, paddle_rect, paddle_speed, ball_radius);
        state.add_death_boundary();
        state
    }

    /// Build a level from a validated description
    ///
    /// Registration order is paddle, walls, blocks, death boundary.
    pub fn from_config(config: &LevelConfig) -> Result<Self, LevelError> {
        config.validate()?;

        let paddle_rect = Rect::new(
            config.paddle_start(),
            config.paddle.width,
            config.paddle.height,
        );
        let mut state = Self::framed(
            config.arena,
            paddle_rect,
            config.paddle.speed,
            config.ball_radius,
        );
        state.name = config.name.clone();

        for block in &config.blocks {
            state.add_block(
                Rect::new(Point::new(block.x, block.y), block.width, block.height),
                block.hits,
            );
        }
        state.add_death_boundary();

        for ball in &config.balls {
            let center = ball.position.unwrap_or_else(|| config.ball_start());
            state.spawn_ball(center, ball.velocity.to_velocity());
        }

        log::info!(
            "Level '{}' ready: {} blocks, {} balls",
            state.name,
            config.blocks.len(),
            state.balls.len()
        );
        Ok(state)
    }

    /// Paddle and the three walls
    fn framed(arena: Arena, paddle_rect: Rect, paddle_speed: f64, ball_radius: f64) -> Self {
        let mut state = Self {
            name: String::new(),
            arena,
            environment: Environment::new(),
            balls: Vec::new(),
            ball_radius,
            paddle: ObstacleId(0),
            death_boundary: ObstacleId(0),
            time_ticks: 0,
            next_id: 1,
        };

        state.paddle = state.next_obstacle_id();
        state
            .environment
            .add(Paddle::new(state.paddle, paddle_rect, paddle_speed));

        let side_top = arena.top_limit();
        let side_height = arena.height - side_top;
        let walls = [
            Rect::new(Point::new(0.0, arena.hud_height), arena.width, arena.border),
            Rect::new(Point::new(0.0, side_top), arena.border, side_height),
            Rect::new(Point::new(arena.right_limit(), side_top), arena.border, side_height),
        ];
        for rect in walls {
            let id = state.next_obstacle_id();
            state
                .environment
                .add(Boundary::new(id, rect, BoundaryKind::Wall));
        }
        state
    }

    /// Zero-height line along the open bottom edge
    fn add_death_boundary(&mut self) {
        let arena = self.arena;
        self.death_boundary = self.next_obstacle_id();
        self.environment.add(Boundary::new(
            self.death_boundary,
            Rect::new(
                Point::new(arena.left_limit(), arena.height),
                arena.inner_width(),
                0.0,
            ),
            BoundaryKind::Death,
        ));
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn next_obstacle_id(&mut self) -> ObstacleId {
        ObstacleId(self.next_entity_id())
    }

    pub fn add_block(&mut self, rect: Rect, durability: u32) -> ObstacleId {
        let id = self.next_obstacle_id();
        self.environment.add(Block::new(id, rect, durability));
        id
    }

    pub fn spawn_ball(&mut self, center: Point, velocity: Velocity) -> BallId {
        let id = BallId(self.next_entity_id());
        self.balls
            .push(Ball::new(id, center, self.ball_radius, velocity));
        id
    }

    /// Attach `listener` to every block currently in the level
    pub fn add_block_listener(&mut self, listener: ListenerHandle) {
        for obstacle in self.environment.iter_mut() {
            if let Obstacle::Block(block) = obstacle {
                block.add_hit_listener(listener.clone());
            }
        }
    }

    /// Attach `listener` to the death boundary
    pub fn add_death_listener(&mut self, listener: ListenerHandle) {
        if let Some(death) = self.environment.get_mut(self.death_boundary) {
            death.add_hit_listener(listener);
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn paddle(&self) -> Option<&Paddle> {
        self.environment
            .get(self.paddle)
            .and_then(Obstacle::as_paddle)
    }

    /// Blocks still registered, including ones at zero durability awaiting removal
    pub fn block_count(&self) -> usize {
        self.environment
            .iter()
            .filter(|o| o.as_block().is_some())
            .count()
    }

    /// Slide the paddle by `dx`, clamped between the side walls
    pub fn slide_paddle(&mut self, dx: f64) {
        let min_x = self.arena.left_limit();
        let right_limit = self.arena.right_limit();
        if let Some(paddle) = self
            .environment
            .get_mut(self.paddle)
            .and_then(Obstacle::as_paddle_mut)
        {
            let max_x = right_limit - paddle.rect().width();
            paddle.slide(dx, min_x, max_x);
        }
    }

    /// Move every ball one step, in spawn order
    ///
    /// Removals queued during a ball's step are applied before the next
    /// ball moves.
    pub fn advance_balls(&mut self) {
        let ids: Vec<BallId> = self.balls.iter().map(Ball::id).collect();
        for id in ids {
            let Some(ball) = self.balls.iter_mut().find(|b| b.id() == id) else {
                continue;
            };
            let mut effects = Effects::default();
            ball.move_one_step(&mut self.environment, &self.arena, &mut effects);
            self.apply_effects(effects);
        }
    }

    fn apply_effects(&mut self, effects: Effects) {
        for &id in effects.removed_obstacles() {
            self.environment.remove(id);
        }
        for &id in effects.removed_balls() {
            log::debug!("Removing ball {:?}", id);
            self.balls.retain(|b| b.id() != id);
        }
    }
}
