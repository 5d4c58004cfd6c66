//! Scene building for 2D primitives
//!
//! Turns a `GameState` into backend-agnostic draw commands.

use glam::Vec2;

use crate::sim::GameState;

/// Color of the losing line at the left edge
pub const BOUNDARY_COLOR: &str = "red";
pub const BOUNDARY_WIDTH: f32 = 3.0;
/// Outline drawn around every enemy
pub const ENEMY_OUTLINE: &str = "white";

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { size: Vec2 },
    /// Stroked line segment
    Line {
        from: Vec2,
        to: Vec2,
        color: &'static str,
        width: f32,
    },
    /// Filled square with an outline
    Square {
        pos: Vec2,
        size: f32,
        fill: &'static str,
        stroke: &'static str,
    },
}

/// Draw commands for one frame, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn build(state: &GameState, boundary_x: f32) -> Self {
        let mut commands = Vec::with_capacity(state.enemies.len() + 2);

        commands.push(DrawCommand::Clear { size: state.field });
        commands.push(DrawCommand::Line {
            from: Vec2::new(boundary_x, 0.0),
            to: Vec2::new(boundary_x, state.field.y),
            color: BOUNDARY_COLOR,
            width: BOUNDARY_WIDTH,
        });

        for enemy in &state.enemies {
            commands.push(DrawCommand::Square {
                pos: enemy.pos,
                size: enemy.size,
                fill: enemy.color.hex(),
                stroke: ENEMY_OUTLINE,
            });
        }

        Self { commands }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, EnemyColor};

    #[test]
    fn test_scene_paint_order() {
        let mut state = GameState::new(Vec2::new(600.0, 400.0));
        state.enemies.push(Enemy {
            pos: Vec2::new(50.0, 60.0),
            size: 40.0,
            color: EnemyColor::Green,
            speed: 0.3,
        });

        let scene = Scene::build(&state, 0.0);

        assert_eq!(scene.commands.len(), 3);
        assert_eq!(
            scene.commands[0],
            DrawCommand::Clear {
                size: Vec2::new(600.0, 400.0)
            }
        );
        assert!(matches!(
            scene.commands[1],
            DrawCommand::Line { color: "red", width, .. } if width == 3.0
        ));
        assert_eq!(
            scene.commands[2],
            DrawCommand::Square {
                pos: Vec2::new(50.0, 60.0),
                size: 40.0,
                fill: "#3cb371",
                stroke: "white",
            }
        );
    }
}
