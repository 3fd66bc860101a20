//! Animated rectangles drifting over a static point grid.
//!
//! Exercises the retained-canvas idiom end to end: static shapes drawn once
//! at setup, moving shapes re-drawn each frame with remove-old-id /
//! draw-new-id, which also keeps them on top of the grid.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use fresco_engine::core::{Game, GameObject};
use fresco_engine::logging::{init_logging, LoggingConfig};
use fresco_engine::render::Canvas;
use fresco_engine::window::WindowConfig;

const WIDTH: i32 = 800;
const HEIGHT: i32 = 600;

/// A solid square wrapping across the canvas.
struct DriftingRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    speed_x: i32,
    speed_y: i32,
    id: i32,
    rgb: (u8, u8, u8),
}

impl GameObject for DriftingRect {
    fn update(&mut self, _dt: f32, canvas: &mut Canvas) {
        self.x += self.speed_x;
        self.y += self.speed_y;

        if self.x > WIDTH - self.width {
            self.x = 0;
        }
        if self.x < 0 {
            self.x = WIDTH - self.width;
        }
        if self.y > HEIGHT - self.height {
            self.y = 0;
        }
        if self.y < 0 {
            self.y = HEIGHT - self.height;
        }

        let (r, g, b) = self.rgb;
        canvas.remove_shape_by_id(self.id);
        canvas.set_draw_color(r, g, b, 255);
        canvas.draw_rect(self.x, self.y, self.width, self.height, true, self.id);
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = WindowConfig {
        title: "fresco bounce".to_string(),
        width: WIDTH as u32,
        height: HEIGHT as u32,
        ..WindowConfig::default()
    };
    let mut game = Game::new(config)?;

    // Static backdrop: dark blue field with a grid of white points.
    let canvas = game.canvas_mut();
    canvas.set_draw_color(0, 0, 100, 255);
    canvas.draw_rect(0, 0, WIDTH, HEIGHT, true, 1);

    canvas.set_draw_color(255, 255, 255, 255);
    let mut point_id = 100;
    for x in (0..WIDTH).step_by(20) {
        for y in (0..HEIGHT).step_by(20) {
            canvas.draw_point(x, y, point_id);
            point_id += 1;
        }
    }

    game.add_object(Rc::new(RefCell::new(DriftingRect {
        x: 0,
        y: 0,
        width: 20,
        height: 20,
        speed_x: 2,
        speed_y: 2,
        id: 2,
        rgb: (255, 0, 0),
    })));
    game.add_object(Rc::new(RefCell::new(DriftingRect {
        x: 100,
        y: 100,
        width: 30,
        height: 30,
        speed_x: -3,
        speed_y: 1,
        id: 3,
        rgb: (0, 255, 0),
    })));

    game.run()
}
