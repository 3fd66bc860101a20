//! Flappy-bird clone on the retained canvas, hand-rolling the tick loop
//! (pump, full drain, frame gate, present, idle sleep) instead of going
//! through the `Game` driver.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;

use fresco_engine::input::{EventKind, EventPoller};
use fresco_engine::logging::{init_logging, LoggingConfig};
use fresco_engine::paint::{ColorResolver, TrueColorTable};
use fresco_engine::render::Canvas;
use fresco_engine::time::FrameGate;
use fresco_engine::window::{PlatformWindow, WindowConfig};

const WIDTH: i32 = 800;
const HEIGHT: i32 = 600;
const GROUND_H: i32 = 50;

const GRAVITY: f32 = 0.5;
const FLAP_VELOCITY: f32 = -10.0;
const BIRD_SIZE: i32 = 20;
const BIRD_ID: i32 = 3;

const PIPE_WIDTH: i32 = 50;
const GAP_SIZE: i32 = 150;
const PIPE_SPACING: i32 = 200;
const PIPE_SPEED: i32 = 2;
const GAP_MIN: i32 = 100;
const GAP_MAX: i32 = HEIGHT - 150;

struct Pipe {
    x: i32,
    gap_y: i32,
    id_top: i32,
    id_bottom: i32,
    scored: bool,
}

impl Pipe {
    fn top_height(&self) -> i32 {
        self.gap_y - GAP_SIZE / 2
    }

    fn bottom_y(&self) -> i32 {
        self.gap_y + GAP_SIZE / 2
    }

    fn bottom_height(&self) -> i32 {
        HEIGHT - GROUND_H - self.bottom_y()
    }
}

struct Bird {
    x: f32,
    y: f32,
    velocity: f32,
}

/// xorshift32; plenty for gap placement.
struct GapRng(u32);

impl GapRng {
    fn seeded() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(1);
        Self(nanos.max(1))
    }

    fn next_gap(&mut self) -> i32 {
        let mut v = self.0;
        v ^= v << 13;
        v ^= v >> 17;
        v ^= v << 5;
        self.0 = v;
        GAP_MIN + (v % (GAP_MAX - GAP_MIN + 1) as u32) as i32
    }
}

fn overlaps(ax: i32, ay: i32, aw: i32, ah: i32, bx: i32, by: i32, bw: i32, bh: i32) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

fn clear_pipes(canvas: &mut Canvas, pipes: &mut Vec<Pipe>) {
    for pipe in pipes.iter() {
        canvas.remove_shape_by_id(pipe.id_top);
        canvas.remove_shape_by_id(pipe.id_bottom);
    }
    pipes.clear();
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = WindowConfig {
        title: "fresco flappy".to_string(),
        width: WIDTH as u32,
        height: HEIGHT as u32,
        ..WindowConfig::default()
    };

    let mut window = PlatformWindow::open(config)?;
    let mut canvas = Canvas::new(
        WIDTH as u32,
        HEIGHT as u32,
        ColorResolver::new(Box::new(TrueColorTable::new())),
    );
    let mut events = EventPoller::new();
    window.show();

    // Static scene: sky, ground, and a grid of white points above the ground.
    canvas.set_draw_color(0, 0, 100, 255);
    canvas.draw_rect(0, 0, WIDTH, HEIGHT, true, 1);
    canvas.set_draw_color(0, 255, 0, 255);
    canvas.draw_rect(0, HEIGHT - GROUND_H, WIDTH, GROUND_H, true, 2);

    canvas.set_draw_color(255, 255, 255, 255);
    let mut point_id = 100;
    for x in (0..WIDTH).step_by(20) {
        for y in (0..HEIGHT - GROUND_H).step_by(20) {
            canvas.draw_point(x, y, point_id);
            point_id += 1;
        }
    }
    canvas.present(&mut window)?;

    let mut rng = GapRng::seeded();
    let mut bird = Bird {
        x: 200.0,
        y: 300.0,
        velocity: 0.0,
    };
    let mut pipes = vec![Pipe {
        x: WIDTH,
        gap_y: rng.next_gap(),
        id_top: 1000,
        id_bottom: 1001,
        scored: false,
    }];
    let mut game_over = false;
    let mut score = 0u32;

    let mut gate = FrameGate::new();
    let mut running = true;

    while running && window.should_run() {
        window.pump();
        for raw in window.drain_events() {
            events.push(raw);
        }

        while events.poll() {
            match events.kind() {
                EventKind::Exit | EventKind::KeyEsc => {
                    log::info!("exiting");
                    running = false;
                }
                EventKind::KeySpace => {
                    if game_over {
                        bird = Bird {
                            x: 200.0,
                            y: 300.0,
                            velocity: 0.0,
                        };
                        clear_pipes(&mut canvas, &mut pipes);
                        pipes.push(Pipe {
                            x: WIDTH,
                            gap_y: rng.next_gap(),
                            id_top: 1000,
                            id_bottom: 1001,
                            scored: false,
                        });
                        score = 0;
                        game_over = false;
                    } else {
                        bird.velocity = FLAP_VELOCITY;
                    }
                }
                _ => {}
            }
        }

        if gate.try_tick(Instant::now()).is_some() {
            if !game_over {
                bird.velocity += GRAVITY;
                bird.y += bird.velocity;
                canvas.remove_shape_by_id(BIRD_ID);
                canvas.set_draw_color(255, 255, 0, 255);
                canvas.draw_rect(
                    bird.x as i32,
                    bird.y as i32,
                    BIRD_SIZE,
                    BIRD_SIZE,
                    true,
                    BIRD_ID,
                );

                for pipe in pipes.iter_mut() {
                    pipe.x -= PIPE_SPEED;
                    canvas.remove_shape_by_id(pipe.id_top);
                    canvas.remove_shape_by_id(pipe.id_bottom);
                    canvas.set_draw_color(0, 255, 0, 255);
                    canvas.draw_rect(pipe.x, 0, PIPE_WIDTH, pipe.top_height(), true, pipe.id_top);
                    canvas.draw_rect(
                        pipe.x,
                        pipe.bottom_y(),
                        PIPE_WIDTH,
                        pipe.bottom_height(),
                        true,
                        pipe.id_bottom,
                    );

                    if !pipe.scored && pipe.x + PIPE_WIDTH < bird.x as i32 {
                        score += 1;
                        pipe.scored = true;
                        log::info!("score: {score}");
                    }
                }

                if let Some(last) = pipes.last() {
                    if last.x <= WIDTH - PIPE_SPACING {
                        let new_id = last.id_top + 2;
                        pipes.push(Pipe {
                            x: WIDTH,
                            gap_y: rng.next_gap(),
                            id_top: new_id,
                            id_bottom: new_id + 1,
                            scored: false,
                        });
                    }
                }

                // Retire pipes that scrolled off the left edge.
                pipes.retain(|pipe| {
                    if pipe.x + PIPE_WIDTH < 0 {
                        canvas.remove_shape_by_id(pipe.id_top);
                        canvas.remove_shape_by_id(pipe.id_bottom);
                        false
                    } else {
                        true
                    }
                });

                let (bx, by) = (bird.x as i32, bird.y as i32);
                let hit_pipe = pipes.iter().any(|pipe| {
                    overlaps(
                        bx,
                        by,
                        BIRD_SIZE,
                        BIRD_SIZE,
                        pipe.x,
                        0,
                        PIPE_WIDTH,
                        pipe.top_height(),
                    ) || overlaps(
                        bx,
                        by,
                        BIRD_SIZE,
                        BIRD_SIZE,
                        pipe.x,
                        pipe.bottom_y(),
                        PIPE_WIDTH,
                        pipe.bottom_height(),
                    )
                });
                let hit_bounds = by + BIRD_SIZE > HEIGHT - GROUND_H || by < 0;

                if hit_pipe || hit_bounds {
                    game_over = true;
                    log::info!("game over, score: {score} (space restarts)");
                    clear_pipes(&mut canvas, &mut pipes);
                }
            }

            canvas.present(&mut window)?;
        }

        thread::sleep(Duration::from_millis(2));
    }

    Ok(())
}
