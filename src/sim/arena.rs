//! Arena bounds
//!
//! The arena is framed by walls of thickness `border` on the left, right and
//! top. The top wall sits below a HUD band of height `hud_height`. The
//! bottom is open and guarded by a zero-height death boundary at `height`.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_BORDER, ARENA_HEIGHT, ARENA_HUD_HEIGHT, ARENA_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    pub border: f64,
    pub hud_height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            border: ARENA_BORDER,
            hud_height: ARENA_HUD_HEIGHT,
        }
    }
}

impl Arena {
    /// Lowest y a ball center may have before it is pushed back down
    #[inline]
    pub fn top_limit(&self) -> f64 {
        self.hud_height + self.border
    }

    #[inline]
    pub fn left_limit(&self) -> f64 {
        self.border
    }

    #[inline]
    pub fn right_limit(&self) -> f64 {
        self.width - self.border
    }

    /// Horizontal room between the side walls
    #[inline]
    pub fn inner_width(&self) -> f64 {
        self.right_limit() - self.left_limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits() {
        let arena = Arena {
            width: 800.0,
            height: 600.0,
            border: 25.0,
            hud_height: 25.0,
        };
        assert_eq!(arena.top_limit(), 50.0);
        assert_eq!(arena.left_limit(), 25.0);
        assert_eq!(arena.right_limit(), 775.0);
        assert_eq!(arena.inner_width(), 750.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let arena: Arena = serde_json::from_str(r#"{"width": 1024}"#).unwrap();
        assert_eq!(arena.width, 1024.0);
        assert_eq!(arena.height, ARENA_HEIGHT);
    }
}
