//! Enemy entity
//!
//! Enemies are plain values: a square hitbox drifting left at a constant speed.

use glam::Vec2;
use rand::Rng;

use super::state::EnemyColor;
use crate::consts::TICK_RATE;
use crate::tuning::Tuning;

/// A colored square moving toward the left boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length of the square hitbox
    pub size: f32,
    pub color: EnemyColor,
    /// Horizontal speed in units per tick
    pub speed: f32,
}

impl Enemy {
    /// Create an enemy just off the right edge of a `field`-sized play area,
    /// at a random height and with a random speed from the tuning range.
    pub fn spawn<R: Rng>(color: EnemyColor, field: Vec2, tuning: &Tuning, rng: &mut R) -> Self {
        let size = tuning.enemy_size;
        let y = rng.random::<f32>() * (field.y - size).max(0.0);
        let speed = tuning.speed_min + rng.random::<f32>() * (tuning.speed_max - tuning.speed_min);
        Self {
            pos: Vec2::new(field.x + size, y),
            size,
            color,
            speed,
        }
    }

    /// Move left by `speed` per tick elapsed in `dt` seconds
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos.x -= self.speed * (dt * TICK_RATE);
    }

    /// Strict point-in-box test (points on an edge are outside)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size
    }

    /// True once the enemy has reached or passed `boundary_x`
    #[inline]
    pub fn breached(&self, boundary_x: f32) -> bool {
        self.pos.x <= boundary_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            size: 40.0,
            color: EnemyColor::Red,
            speed: 0.5,
        }
    }

    #[test]
    fn test_spawn_off_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = Tuning::default();
        let field = Vec2::new(600.0, 400.0);

        for _ in 0..200 {
            let enemy = Enemy::spawn(EnemyColor::Blue, field, &tuning, &mut rng);
            assert_eq!(enemy.pos.x, 640.0);
            assert!(enemy.pos.y >= 0.0 && enemy.pos.y < 360.0);
            assert!(enemy.speed >= 0.3 && enemy.speed < 0.6);
            assert_eq!(enemy.color, EnemyColor::Blue);
        }
    }

    #[test]
    fn test_spawn_in_tiny_field() {
        let mut rng = Pcg32::seed_from_u64(1);
        let enemy = Enemy::spawn(EnemyColor::Red, Vec2::new(100.0, 10.0), &Tuning::default(), &mut rng);
        assert_eq!(enemy.pos.y, 0.0);
    }

    #[test]
    fn test_advance_one_tick() {
        let mut enemy = enemy_at(100.0, 50.0);
        enemy.advance(SIM_DT);
        assert_eq!(enemy.pos.x, 99.5);
        assert_eq!(enemy.pos.y, 50.0);
    }

    #[test]
    fn test_advance_step_is_exactly_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..3000 {
            let speed = rng.random_range(0.3..0.6f32);
            let mut enemy = Enemy { speed, ..enemy_at(500.0, 0.0) };
            enemy.advance(SIM_DT);
            assert_eq!(enemy.pos.x, 500.0 - speed, "speed {speed}");
        }
    }

    #[test]
    fn test_advance_scales_with_dt() {
        let mut enemy = enemy_at(100.0, 50.0);
        enemy.advance(2.0 * SIM_DT);
        assert_eq!(enemy.pos.x, 99.0);

        let mut idle = enemy_at(100.0, 50.0);
        idle.advance(0.0);
        assert_eq!(idle.pos.x, 100.0);
    }

    #[test]
    fn test_contains_is_strict() {
        let enemy = enemy_at(100.0, 50.0);
        assert!(enemy.contains(Vec2::new(120.0, 70.0)));
        assert!(!enemy.contains(Vec2::new(100.0, 70.0)));
        assert!(!enemy.contains(Vec2::new(140.0, 70.0)));
        assert!(!enemy.contains(Vec2::new(120.0, 50.0)));
        assert!(!enemy.contains(Vec2::new(120.0, 90.0)));
    }

    #[test]
    fn test_breached() {
        assert!(enemy_at(0.0, 0.0).breached(0.0));
        assert!(enemy_at(-0.1, 0.0).breached(0.0));
        assert!(!enemy_at(0.01, 0.0).breached(0.0));
    }
}
