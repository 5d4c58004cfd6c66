//! Canvas 2D backend

use web_sys::CanvasRenderingContext2d;

use super::scene::{DrawCommand, Scene};

/// Replay a scene onto a 2D context
pub fn draw_scene(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    for command in &scene.commands {
        match command {
            DrawCommand::Clear { size } => {
                ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                ctx.stroke();
            }
            DrawCommand::Square {
                pos,
                size,
                fill,
                stroke,
            } => {
                let (x, y, s) = (pos.x as f64, pos.y as f64, *size as f64);
                ctx.set_fill_style_str(fill);
                ctx.fill_rect(x, y, s, s);
                ctx.set_stroke_style_str(stroke);
                ctx.stroke_rect(x, y, s, s);
            }
        }
    }
}
