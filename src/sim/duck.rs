//! Duck entity: motion and status machine
//!
//! Status only moves forward:
//! - Alive → Hit → Falling → landed (removed)
//! - Alive → FlyingAway → escaped (removed)
//! - Alive → escaped (removed)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Duck status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuckStatus {
    Alive,
    /// Shot, frozen in place until the fall starts
    Hit,
    Falling,
    /// Out of ammo before the hit; leaving through the top
    FlyingAway,
}

/// How a duck left the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckExit {
    /// Reached the grass after being shot
    Landed,
    /// Got away, either off the sides or through the top
    Escaped,
}

/// Plumage palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuckColor {
    Gold,
    OrangeRed,
    Turquoise,
    GreenYellow,
}

impl DuckColor {
    pub const ALL: [DuckColor; 4] = [
        DuckColor::Gold,
        DuckColor::OrangeRed,
        DuckColor::Turquoise,
        DuckColor::GreenYellow,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            DuckColor::Gold => "#FFD700",
            DuckColor::OrangeRed => "#FF4500",
            DuckColor::Turquoise => "#00CED1",
            DuckColor::GreenYellow => "#ADFF2F",
        }
    }
}

/// A duck entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duck {
    pub id: u32,
    /// Top-left corner (pixels)
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub status: DuckStatus,
    pub color: DuckColor,
    /// The reload-grace fly-away has been scheduled for this duck
    #[serde(default)]
    pub fly_away_pending: bool,
}

impl Duck {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, color: DuckColor) -> Self {
        Self {
            id,
            pos,
            vel,
            status: DuckStatus::Alive,
            color,
            fly_away_pending: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == DuckStatus::Alive
    }

    /// Facing direction for the sprite
    pub fn facing_right(&self) -> bool {
        self.vel.x > 0.0
    }

    /// Alive → Hit
    pub fn mark_hit(&mut self) -> bool {
        self.transition(DuckStatus::Alive, DuckStatus::Hit)
    }

    /// Hit → Falling
    pub fn start_falling(&mut self) -> bool {
        self.transition(DuckStatus::Hit, DuckStatus::Falling)
    }

    /// Alive → FlyingAway
    pub fn fly_away(&mut self) -> bool {
        self.transition(DuckStatus::Alive, DuckStatus::FlyingAway)
    }

    fn transition(&mut self, from: DuckStatus, to: DuckStatus) -> bool {
        if self.status != from {
            return false;
        }
        self.status = to;
        true
    }

    /// Advance one tick. Returns `Some` when the duck leaves play and must be removed.
    pub fn advance<R: Rng>(&mut self, flutter_chance: f32, rng: &mut R) -> Option<DuckExit> {
        match self.status {
            DuckStatus::Alive => {
                self.pos += self.vel;
                // Soft ceiling bounce
                if self.pos.y < 0.0 {
                    self.vel.y = self.vel.y.abs() * CEILING_BOUNCE;
                }
                if self.pos.x < -DUCK_SIZE - ESCAPE_MARGIN || self.pos.x > GAME_WIDTH + ESCAPE_MARGIN
                {
                    return Some(DuckExit::Escaped);
                }
                if rng.random::<f32>() < flutter_chance {
                    self.vel.y = -self.vel.y;
                }
                None
            }
            DuckStatus::Falling => {
                self.pos.y += FALL_SPEED;
                (self.pos.y > landing_line()).then_some(DuckExit::Landed)
            }
            DuckStatus::FlyingAway => {
                self.pos.y -= ASCENT_SPEED;
                (self.pos.y < -DUCK_SIZE).then_some(DuckExit::Escaped)
            }
            DuckStatus::Hit => None,
        }
    }
}

/// Y coordinate past which a falling duck has landed in the grass
#[inline]
pub fn landing_line() -> f32 {
    GAME_HEIGHT - GRASS_HEIGHT - LANDING_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn duck_at(x: f32, y: f32, vx: f32, vy: f32) -> Duck {
        Duck::new(1, Vec2::new(x, y), Vec2::new(vx, vy), DuckColor::Gold)
    }

    #[test]
    fn test_alive_moves_by_velocity() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut duck = duck_at(100.0, 200.0, 4.0, -2.0);
        assert_eq!(duck.advance(0.0, &mut rng), None);
        assert_eq!(duck.pos, Vec2::new(104.0, 198.0));
    }

    #[test]
    fn test_ceiling_bounce_softens() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut duck = duck_at(100.0, 1.0, 3.0, -5.0);
        duck.advance(0.0, &mut rng);
        assert!(duck.pos.y < 0.0);
        assert!((duck.vel.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_flutter_always_flips_at_certainty() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut duck = duck_at(100.0, 200.0, 3.0, -2.0);
        duck.advance(1.0, &mut rng);
        assert_eq!(duck.vel.y, 2.0);
    }

    #[test]
    fn test_escapes_past_side_margin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut duck = duck_at(GAME_WIDTH + ESCAPE_MARGIN - 1.0, 200.0, 3.0, 0.0);
        assert_eq!(duck.advance(0.0, &mut rng), Some(DuckExit::Escaped));

        let mut duck = duck_at(-DUCK_SIZE - ESCAPE_MARGIN + 1.0, 200.0, -3.0, 0.0);
        assert_eq!(duck.advance(0.0, &mut rng), Some(DuckExit::Escaped));
    }

    #[test]
    fn test_falling_lands_below_line() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut duck = duck_at(300.0, 100.0, 3.0, -2.0);
        assert!(duck.mark_hit());
        assert!(duck.start_falling());
        let mut ticks = 0;
        let exit = loop {
            ticks += 1;
            if let Some(exit) = duck.advance(0.0, &mut rng) {
                break exit;
            }
        };
        assert_eq!(exit, DuckExit::Landed);
        assert!(duck.pos.y > landing_line());
        // 100 → 460 at 12px per tick
        assert_eq!(ticks, 30);
        // Falling never drifts sideways
        assert_eq!(duck.pos.x, 300.0);
    }

    #[test]
    fn test_flying_away_exits_top() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut duck = duck_at(300.0, 5.0, 3.0, -2.0);
        assert!(duck.fly_away());
        let mut exit = None;
        for _ in 0..10 {
            exit = duck.advance(0.0, &mut rng);
            if exit.is_some() {
                break;
            }
        }
        assert_eq!(exit, Some(DuckExit::Escaped));
        assert!(duck.pos.y < -DUCK_SIZE);
    }

    #[test]
    fn test_hit_duck_holds_still() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut duck = duck_at(300.0, 200.0, 3.0, -2.0);
        duck.mark_hit();
        assert_eq!(duck.advance(1.0, &mut rng), None);
        assert_eq!(duck.pos, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_transitions_are_one_way() {
        let mut duck = duck_at(0.0, 0.0, 1.0, 1.0);
        assert!(!duck.start_falling());
        assert!(duck.mark_hit());
        assert!(!duck.mark_hit());
        assert!(!duck.fly_away());
        assert!(duck.start_falling());
        assert!(!duck.start_falling());
        assert_eq!(duck.status, DuckStatus::Falling);

        let mut duck = duck_at(0.0, 0.0, 1.0, 1.0);
        assert!(duck.fly_away());
        assert!(!duck.mark_hit());
        assert!(!duck.start_falling());
        assert_eq!(duck.status, DuckStatus::FlyingAway);
    }
}
