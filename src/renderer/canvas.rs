//! Snapshot painter for a `<canvas>` 2D context

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::{GamePhase, Rect, Snapshot, Wall};

const BACKGROUND: &str = "#111";
const WALL_COLOR: &str = "#666";
const PLAYER_COLOR: &str = "green";
const ENEMY_COLOR: &str = "red";
const HEALTH_BACK: &str = "#400";
const HEALTH_FRONT: &str = "#0c0";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    /// Draw decorative wall rotation
    pub rotated_walls: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, rotated_walls: bool) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            rotated_walls,
        })
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        if snapshot.phase == GamePhase::GameOver {
            return self.render_game_over(snapshot);
        }

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        ctx.set_fill_style_str(WALL_COLOR);
        for wall in snapshot.walls() {
            self.draw_wall(wall)?;
        }

        ctx.set_fill_style_str(ENEMY_COLOR);
        for enemy in snapshot.enemies() {
            fill(ctx, enemy);
        }

        ctx.set_fill_style_str(PLAYER_COLOR);
        fill(ctx, snapshot.player());
        self.draw_health_bar(snapshot);

        if snapshot.phase == GamePhase::Paused {
            self.banner("Paused", "white")?;
        }
        Ok(())
    }

    fn draw_wall(&self, wall: &Wall) -> Result<(), JsValue> {
        if !self.rotated_walls || wall.rotation == 0.0 {
            fill(&self.ctx, &wall.rect);
            return Ok(());
        }
        // Spin around the box center; the collision box stays unrotated
        let c = wall.rect.center();
        self.ctx.save();
        self.ctx.translate(c.x as f64, c.y as f64)?;
        self.ctx.rotate(wall.rotation as f64)?;
        self.ctx.fill_rect(
            -(wall.rect.width as f64) / 2.0,
            -(wall.rect.height as f64) / 2.0,
            wall.rect.width as f64,
            wall.rect.height as f64,
        );
        self.ctx.restore();
        Ok(())
    }

    fn draw_health_bar(&self, snapshot: &Snapshot<'_>) {
        let player = snapshot.player();
        let ratio = snapshot.health() as f64 / snapshot.max_health().max(1) as f64;
        let (x, y, w) = (player.x as f64, player.y as f64 - 8.0, player.width as f64);
        self.ctx.set_fill_style_str(HEALTH_BACK);
        self.ctx.fill_rect(x, y, w, 4.0);
        self.ctx.set_fill_style_str(HEALTH_FRONT);
        self.ctx.fill_rect(x, y, w * ratio, 4.0);
    }

    fn render_game_over(&self, snapshot: &Snapshot<'_>) -> Result<(), JsValue> {
        self.banner("Game Over!", "red")?;
        self.ctx.set_font("20px Arial");
        self.ctx.fill_text(
            &format!("Score: {}", snapshot.score()),
            self.width / 2.0,
            self.height / 2.0 + 40.0,
        )
    }

    fn banner(&self, text: &str, color: &str) -> Result<(), JsValue> {
        self.ctx.set_font("40px Arial");
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align("center");
        self.ctx.fill_text(text, self.width / 2.0, self.height / 2.0)
    }
}

fn fill(ctx: &CanvasRenderingContext2d, rect: &Rect) {
    ctx.fill_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
}
