//! Browser front end.
//!
//! Binds the DOM to a [`GameEngine`]: a canvas of holes, overlays for score,
//! timer and controls, keyboard / pointer listeners and a fixed-cadence
//! interval driving `tick`. The engine lives in a thread local, so listeners
//! and the interval take turns borrowing it.

use std::cell::RefCell;
use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, window};

use crate::clock::TimeLeft;
use crate::config::GameConfig;
use crate::engine::{GameEngine, GameObserver, GamePhase, ScoreIndicator};
use crate::error::ConfigError;
use crate::input::{InputEvent, InputRouter};
use crate::layout::GridLayout;

const CANVAS_ID: &str = "md-board-canvas";
const START_LABEL: &str = "Start Playing (space)";
const STOP_LABEL: &str = "Stop Playing (space)";
const OVERLAY_STYLE: &str = "font-family:'Fira Code', monospace; font-size:16px; padding:4px 10px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; margin:4px;";

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Already installed if the module is instantiated twice.
    console_log::init_with_level(log::Level::Info).ok();
}

/// Mount the reference game (30s, six holes on `Q W E / A S D`).
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    mount(GameConfig::default())
}

/// Mount a game configured from JSON, e.g. `{"duration": 60, "slotCount": 9}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(to_js)?;
    mount(config)
}

struct WebGame {
    engine: GameEngine<DomRenderer>,
    router: InputRouter,
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = RefCell::new(None);
}

/// Projection of engine callbacks onto the page. Holds only what it needs to
/// draw; game rules stay in the engine.
struct DomRenderer {
    ctx: CanvasRenderingContext2d,
    layout: GridLayout,
    key_labels: Vec<Option<char>>,
    active: Option<usize>,
    indicators: Vec<ScoreIndicator>,
    score: i64,
    score_el: Element,
    timer_el: Element,
    primary_btn: Element,
    resume_btn: Element,
    end_btn: Element,
    end_msg: Element,
}

impl DomRenderer {
    fn redraw(&self) {
        let ctx = &self.ctx;
        ctx.set_fill_style(&JsValue::from_str("#3b7d3b"));
        ctx.fill_rect(0.0, 0.0, self.layout.width, self.layout.height);

        let r = self.layout.hole_radius();
        for slot in 1..=self.layout.slot_count {
            let Some((cx, cy)) = self.layout.center(slot) else {
                continue;
            };
            circle(ctx, cx, cy, r, "#2b1d0e");
            if self.active == Some(slot) {
                draw_mole(ctx, cx, cy, r);
            }
            if let Some(Some(key)) = self.key_labels.get(slot - 1) {
                ctx.set_font("18px 'Fira Code', monospace");
                ctx.set_fill_style(&JsValue::from_str("#d8e8d0"));
                ctx.fill_text(&key.to_string(), cx, cy + r + 20.0).ok();
            }
        }

        ctx.set_font("bold 32px 'Fira Code', monospace");
        for ind in &self.indicators {
            let Some((cx, cy)) = self.layout.center(ind.slot) else {
                continue;
            };
            let (text, color) = if ind.delta > 0 {
                (format!("+{}", ind.delta), "#7CFC00")
            } else {
                (ind.delta.to_string(), "#ff4d4d")
            };
            ctx.set_fill_style(&JsValue::from_str(color));
            ctx.fill_text(&text, cx, cy - r - 8.0).ok();
        }
    }
}

impl GameObserver for DomRenderer {
    fn on_phase_changed(&mut self, phase: GamePhase) {
        let paused = phase == GamePhase::Paused;
        set_visible(&self.primary_btn, !paused);
        set_visible(&self.resume_btn, paused);
        set_visible(&self.end_btn, paused);
        set_visible(&self.end_msg, phase == GamePhase::Ended);
        let label = if phase == GamePhase::Running {
            STOP_LABEL
        } else {
            START_LABEL
        };
        self.primary_btn.set_text_content(Some(label));
        if phase == GamePhase::Ended {
            self.end_msg
                .set_text_content(Some(&format!("Game over! Final score: {}", self.score)));
        }
    }

    fn on_score_changed(&mut self, score: i64) {
        self.score = score;
        self.score_el
            .set_text_content(Some(&format!("Score: {score}")));
    }

    fn on_time_changed(&mut self, remaining: TimeLeft) {
        self.timer_el
            .set_text_content(Some(&format!("Time Left: {remaining}s")));
    }

    fn on_slot_activated(&mut self, slot: usize) {
        self.active = Some(slot);
        self.redraw();
    }

    fn on_slot_deactivated(&mut self, slot: usize) {
        if self.active == Some(slot) {
            self.active = None;
        }
        self.redraw();
    }

    fn on_score_indicator(&mut self, indicator: ScoreIndicator) {
        self.indicators.push(indicator);
        self.redraw();
    }

    fn on_indicator_cleared(&mut self, indicator: ScoreIndicator) {
        self.indicators.retain(|i| i.id != indicator.id);
        self.redraw();
    }
}

fn mount(config: GameConfig) -> Result<(), JsValue> {
    if GAME.with(|g| g.borrow().is_some()) {
        log::warn!("game already mounted; ignoring second start");
        return Ok(());
    }
    config.validate().map_err(to_js)?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let panel = ensure_element(&doc, "md-control-panel", "div")?;
    panel.set_attribute("style", "display:flex; justify-content:center; align-items:center; flex-wrap:wrap;")?;
    body.append_child(&panel)?;
    let score_el = overlay(&doc, &panel, "md-score", "div", "Score: 0")?;
    let timer_el = overlay(&doc, &panel, "md-timer", "div", "")?;
    let primary_btn = overlay(&doc, &panel, "md-start-stop", "button", START_LABEL)?;
    let resume_btn = overlay(&doc, &panel, "md-resume", "button", "Resume (space)")?;
    let end_btn = overlay(&doc, &panel, "md-end", "button", "End (esc)")?;
    let end_msg = overlay(&doc, &panel, "md-end-message", "div", "")?;

    let canvas: HtmlCanvasElement = ensure_element(&doc, CANVAS_ID, "canvas")?.dyn_into()?;
    canvas.set_width(600);
    canvas.set_height(400);
    canvas.set_attribute("style", "display:block; margin:12px auto; border:2px solid #222; border-radius:18px; cursor:pointer;")?;
    body.append_child(&canvas)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    ctx.set_text_align("center");

    let layout = GridLayout::new(
        config.slot_count,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    );
    let mut key_labels = vec![None; config.slot_count];
    for (&key, &slot) in &config.key_map {
        key_labels[slot - 1] = Some(key.to_ascii_uppercase());
    }

    let renderer = DomRenderer {
        ctx,
        layout,
        key_labels,
        active: None,
        indicators: Vec::new(),
        score: 0,
        score_el,
        timer_el,
        primary_btn: primary_btn.clone(),
        resume_btn: resume_btn.clone(),
        end_btn: end_btn.clone(),
        end_msg,
    };
    let tick_ms = i32::try_from(config.tick_interval_ms).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let router = InputRouter::new(&config);
    let mut engine = GameEngine::new(config, renderer).map_err(to_js)?;

    // Paint the idle board before the first input.
    let remaining = engine.remaining();
    let renderer = engine.observer_mut();
    renderer.on_time_changed(remaining);
    renderer.on_phase_changed(GamePhase::Idle);
    renderer.redraw();

    GAME.with(|g| g.replace(Some(WebGame { engine, router })));

    // Keyboard: slot keys, space toggles, escape ends while paused.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            let key = evt.key();
            if key == " " {
                evt.prevent_default();
            }
            dispatch(InputEvent::Key(key));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pointer: canvas-local offset coordinates to the hole under the cursor.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = f64::from(evt.offset_x());
            let y = f64::from(evt.offset_y());
            let slot = GAME.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .and_then(|game| game.engine.observer().layout.slot_at(x, y))
            });
            if let Some(slot) = slot {
                dispatch(InputEvent::SelectSlot(slot));
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    for (button, event) in [
        (primary_btn, InputEvent::Toggle),
        (resume_btn, InputEvent::Toggle),
        (end_btn, InputEvent::Cancel),
    ] {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            dispatch(event.clone());
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Tick source: fires in every phase, the engine decides what a tick means.
    {
        let closure = Closure::wrap(Box::new(move || {
            GAME.with(|cell| {
                if let Some(game) = cell.borrow_mut().as_mut() {
                    game.engine.tick();
                }
            });
        }) as Box<dyn FnMut()>);
        win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            tick_ms,
        )?;
        closure.forget();
    }

    log::info!("mole dash mounted");
    Ok(())
}

fn to_js(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn dispatch(event: InputEvent) {
    GAME.with(|cell| {
        if let Some(game) = cell.borrow_mut().as_mut() {
            if let Some(command) = game.router.route(game.engine.phase(), &event) {
                game.engine.apply(command);
            }
        }
    });
}

/// Reuse an element by id or create it.
fn ensure_element(doc: &Document, id: &str, tag: &str) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    Ok(el)
}

fn overlay(
    doc: &Document,
    parent: &Element,
    id: &str,
    tag: &str,
    text: &str,
) -> Result<Element, JsValue> {
    let el = ensure_element(doc, id, tag)?;
    el.set_text_content(Some(text));
    el.set_attribute("style", OVERLAY_STYLE)?;
    parent.append_child(&el)?;
    Ok(el)
}

fn set_visible(el: &Element, visible: bool) {
    if visible {
        el.remove_attribute("hidden").ok();
    } else {
        el.set_attribute("hidden", "").ok();
    }
}

fn circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64, color: &str) {
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, TAU).ok();
    ctx.set_fill_style(&JsValue::from_str(color));
    ctx.fill();
}

fn draw_mole(ctx: &CanvasRenderingContext2d, cx: f64, cy: f64, r: f64) {
    circle(ctx, cx, cy, r * 0.8, "#8b5a2b");
    circle(ctx, cx - r * 0.28, cy - r * 0.2, r * 0.1, "#111");
    circle(ctx, cx + r * 0.28, cy - r * 0.2, r * 0.1, "#111");
    circle(ctx, cx, cy + r * 0.12, r * 0.16, "#f4a3b5");
}
