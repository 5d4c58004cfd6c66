//! Browser bindings: viewport queries and DOM presentation

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window};

use super::{Viewport, is_mobile_user_agent};
use crate::renderer::Scene;
use crate::renderer::canvas::draw_scene;
use crate::sim::EnemyColor;
use crate::ui::{PlayLayout, Presenter, ScreenLayout};

pub const CANVAS_ID: &str = "game-canvas";
pub const START_BUTTON_ID: &str = "start-button";
pub const RESTART_BUTTON_ID: &str = "restart-button";
pub const COLOR_BUTTON_SELECTOR: &str = ".color-button";

const START_SCREEN_ID: &str = "start-screen";
const GAME_CONTAINER_ID: &str = "game-container";
const SCORE_DISPLAY_ID: &str = "score-display";
const GAME_OVER_SCREEN_ID: &str = "game-over-screen";
const SCORE_ID: &str = "current-score";
const COMBO_ID: &str = "combo-count";
const FINAL_SCORE_ID: &str = "final-score";

const HIDDEN_CLASS: &str = "hidden";
const SELECTED_CLASS: &str = "selected";

/// Window size plus a user-agent based device class
pub struct BrowserViewport {
    window: Window,
    mobile: bool,
}

impl BrowserViewport {
    pub fn new(window: Window) -> Self {
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let mobile = is_mobile_user_agent(&user_agent);
        log::info!("Viewport: mobile={}", mobile);
        Self { window, mobile }
    }
}

impl Viewport for BrowserViewport {
    fn size(&self) -> Vec2 {
        let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Vec2::new(read(self.window.inner_width()), read(self.window.inner_height()))
    }

    fn is_mobile(&self) -> bool {
        self.mobile
    }
}

/// All `.color-button` elements
pub fn color_buttons(document: &Document) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(COLOR_BUTTON_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Presenter backed by the page's DOM and a 2D canvas
pub struct DomPresenter {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl DomPresenter {
    pub fn new(window: Window) -> Option<Self> {
        let document = window.document()?;
        let canvas: HtmlCanvasElement = document.get_element_by_id(CANVAS_ID)?.dyn_into().ok()?;
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        Some(Self {
            window,
            document,
            canvas,
            ctx,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1(HIDDEN_CLASS)
            } else {
                classes.remove_1(HIDDEN_CLASS)
            };
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl Presenter for DomPresenter {
    fn show_screens(&mut self, screens: ScreenLayout) {
        self.set_hidden(START_SCREEN_ID, !screens.start_screen);
        self.set_hidden(GAME_CONTAINER_ID, !screens.game_container);
        self.set_hidden(SCORE_DISPLAY_ID, !screens.score_display);
        self.set_hidden(GAME_OVER_SCREEN_ID, !screens.game_over_screen);
    }

    fn apply_layout(&mut self, layout: &PlayLayout) {
        if let Some(size) = layout.container {
            let container = self
                .document
                .get_element_by_id(GAME_CONTAINER_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(container) = container {
                let style = container.style();
                let _ = style.set_property("width", &format!("{}px", size.x));
                let _ = style.set_property("height", &format!("{}px", size.y));
            }
        }
        self.canvas.set_width(layout.canvas.x as u32);
        self.canvas.set_height(layout.canvas.y as u32);
    }

    fn set_hud(&mut self, score: u64, combo: u32) {
        self.set_text(SCORE_ID, &score.to_string());
        self.set_text(COMBO_ID, &combo.to_string());
    }

    fn highlight_color(&mut self, color: EnemyColor) {
        for button in color_buttons(&self.document) {
            let classes = button.class_list();
            let _ = classes.remove_1(SELECTED_CLASS);
            if button.get_attribute("data-color").as_deref() == Some(color.key()) {
                let _ = classes.add_1(SELECTED_CLASS);
            }
        }
    }

    fn set_final_score(&mut self, score: u64) {
        self.set_text(FINAL_SCORE_ID, &score.to_string());
    }

    fn draw(&mut self, scene: &Scene) {
        draw_scene(&self.ctx, scene);
    }

    fn notify(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}
