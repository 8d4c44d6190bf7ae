//! The set of active collision surfaces
//!
//! Obstacles are kept in registration order. That order decides ties in
//! [`Environment::closest_collision`] and is what a renderer sees.

use super::ball::BallId;
use super::listener::Effects;
use super::obstacle::{Obstacle, ObstacleId};
use super::point::Point;
use super::rect::Rect;
use super::segment::Segment;
use super::velocity::Velocity;

/// The first obstacle a trajectory reaches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub point: Point,
    pub obstacle: ObstacleId,
    /// The obstacle's rectangle at query time
    pub rect: Rect,
}

#[derive(Debug, Clone, Default)]
pub struct Environment {
    obstacles: Vec<Obstacle>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle; re-adding an id replaces the old entry in place
    pub fn add(&mut self, obstacle: impl Into<Obstacle>) {
        let obstacle = obstacle.into();
        match self.position(obstacle.id()) {
            Some(idx) => self.obstacles[idx] = obstacle,
            None => self.obstacles.push(obstacle),
        }
    }

    /// Deregister an obstacle; unknown ids are ignored
    pub fn remove(&mut self, id: ObstacleId) -> Option<Obstacle> {
        let idx = self.position(id)?;
        log::debug!("Removing obstacle {:?}", id);
        Some(self.obstacles.remove(idx))
    }

    pub fn contains(&self, id: ObstacleId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.iter_mut().find(|o| o.id() == id)
    }

    /// Obstacles in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Rectangle of the first registered paddle
    pub fn paddle_rect(&self) -> Option<&Rect> {
        self.obstacles
            .iter()
            .find_map(Obstacle::as_paddle)
            .map(|p| p.rect())
    }

    /// Closest obstacle hit along `trajectory`, by distance from its start
    ///
    /// Equal distances keep the earlier-registered obstacle.
    pub fn closest_collision(&self, trajectory: &Segment) -> Option<CollisionInfo> {
        let mut closest: Option<(CollisionInfo, f64)> = None;
        for obstacle in &self.obstacles {
            let Some(point) = trajectory.closest_intersection_to_start(obstacle.collision_rect())
            else {
                continue;
            };
            let dist = point.distance(trajectory.start);
            if closest.as_ref().is_none_or(|(_, best)| dist < *best) {
                closest = Some((
                    CollisionInfo {
                        point,
                        obstacle: obstacle.id(),
                        rect: *obstacle.collision_rect(),
                    },
                    dist,
                ));
            }
        }
        closest.map(|(info, _)| info)
    }

    /// Run the hit-response of a registered obstacle
    ///
    /// # Panics
    ///
    /// Panics if `id` is not registered; hitting a removed obstacle is a
    /// caller bug.
    pub fn hit(
        &mut self,
        id: ObstacleId,
        ball: BallId,
        point: Point,
        velocity: Velocity,
        effects: &mut Effects,
    ) -> Velocity {
        let Some(obstacle) = self.get_mut(id) else {
            panic!("hit on unregistered obstacle {id:?}");
        };
        obstacle.hit(ball, point, velocity, effects)
    }

    fn position(&self, id: ObstacleId) -> Option<usize> {
        self.obstacles.iter().position(|o| o.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::{Block, Paddle};

    fn block_at(id: u32, x: f64) -> Block {
        Block::new(ObstacleId(id), Rect::new(Point::new(x, 290.0), 5.0, 20.0), 1)
    }

    #[test]
    fn test_closest_wins_regardless_of_registration_order() {
        let trajectory = Segment::from_coords(100.0, 300.0, 130.0, 300.0);

        let mut near_first = Environment::new();
        near_first.add(block_at(1, 110.0));
        near_first.add(block_at(2, 120.0));

        let mut far_first = Environment::new();
        far_first.add(block_at(2, 120.0));
        far_first.add(block_at(1, 110.0));

        for env in [&near_first, &far_first] {
            let hit = env.closest_collision(&trajectory).expect("collision");
            assert_eq!(hit.obstacle, ObstacleId(1));
            assert_eq!(hit.point, Point::new(110.0, 300.0));
            assert_eq!(hit.point.distance(trajectory.start), 10.0);
        }
    }

    #[test]
    fn test_tie_keeps_first_registered() {
        let trajectory = Segment::from_coords(100.0, 300.0, 130.0, 300.0);
        let mut env = Environment::new();
        env.add(block_at(5, 110.0));
        env.add(block_at(6, 110.0));
        assert_eq!(env.closest_collision(&trajectory).map(|c| c.obstacle), Some(ObstacleId(5)));
    }

    #[test]
    fn test_no_collision() {
        let mut env = Environment::new();
        env.add(block_at(1, 110.0));
        assert_eq!(env.closest_collision(&Segment::from_coords(0.0, 0.0, 10.0, 0.0)), None);
        // Zero-length trajectory degenerates to no collision
        assert_eq!(env.closest_collision(&Segment::from_coords(50.0, 50.0, 50.0, 50.0)), None);
    }

    #[test]
    fn test_add_replaces_and_remove_is_idempotent() {
        let mut env = Environment::new();
        env.add(block_at(1, 110.0));
        env.add(block_at(2, 120.0));
        env.add(block_at(1, 200.0));
        assert_eq!(env.len(), 2);
        assert_eq!(env.get(ObstacleId(1)).map(|o| o.collision_rect().left_x()), Some(200.0));
        // Replacement keeps the original slot
        assert_eq!(env.iter().next().map(Obstacle::id), Some(ObstacleId(1)));

        assert!(env.remove(ObstacleId(1)).is_some());
        assert!(env.remove(ObstacleId(1)).is_none());
        assert!(!env.contains(ObstacleId(1)));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_paddle_rect_lookup() {
        let mut env = Environment::new();
        assert!(env.paddle_rect().is_none());
        env.add(block_at(1, 110.0));
        env.add(Paddle::new(ObstacleId(2), Rect::new(Point::new(0.0, 500.0), 80.0, 10.0), 5.0));
        assert_eq!(env.paddle_rect().map(|r| r.top_y()), Some(500.0));
    }

    #[test]
    #[should_panic(expected = "unregistered obstacle")]
    fn test_hit_on_removed_obstacle_panics() {
        let mut env = Environment::new();
        env.add(block_at(1, 110.0));
        env.remove(ObstacleId(1));
        let mut effects = Effects::default();
        env.hit(
            ObstacleId(1),
            BallId(1),
            Point::new(110.0, 300.0),
            Velocity::new(1.0, 0.0),
            &mut effects,
        );
    }
}
