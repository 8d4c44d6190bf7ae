//! Simulation tick

use super::state::LevelState;

/// Paddle command for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddleMove {
    #[default]
    Stay,
    Left,
    Right,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub paddle: PaddleMove,
    /// Demo mode: the paddle follows the lowest ball and `paddle` is ignored
    pub autopilot: bool,
}

/// Advance the level by one tick
///
/// The paddle moves first, then every ball takes one step in spawn order.
pub fn tick(state: &mut LevelState, input: &TickInput) {
    state.time_ticks += 1;

    let paddle_move = if input.autopilot {
        autopilot_move(state)
    } else {
        input.paddle
    };

    if let Some(speed) = state.paddle().map(|p| p.speed()) {
        match paddle_move {
            PaddleMove::Stay => {}
            PaddleMove::Left => state.slide_paddle(-speed),
            PaddleMove::Right => state.slide_paddle(speed),
        }
    }

    state.advance_balls();
}

/// Steer under the ball closest to the bottom
fn autopilot_move(state: &LevelState) -> PaddleMove {
    let Some(paddle) = state.paddle() else {
        return PaddleMove::Stay;
    };
    let Some(ball) = state
        .balls()
        .iter()
        .max_by(|a, b| a.center().y.total_cmp(&b.center().y))
    else {
        return PaddleMove::Stay;
    };

    // Drift the aim across the paddle over time so rebounds vary
    let time_factor = state.time_ticks as f64 * 0.01;
    let offset = (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15)
        * paddle.rect().width()
        / 2.0;

    let target = ball.center().x + ball.velocity().dx + offset;
    let diff = target - paddle.rect().center().x;
    if diff.abs() <= paddle.speed() / 2.0 {
        PaddleMove::Stay
    } else if diff < 0.0 {
        PaddleMove::Left
    } else {
        PaddleMove::Right
    }
}
