use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod rules;
pub mod types;

pub use board::Board;
pub use config::{ElephantRule, GameConfig};
pub use error::GameError;
pub use game::{Game, Selection, TapOutcome};
pub use types::{GameState, MoveRecord, Piece, PieceId, PieceKind, PieceView, Position, Side};

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// One game session exposed to JavaScript. Sessions share no state.
#[wasm_bindgen]
pub struct XiangqiGame {
    inner: Game,
}

#[wasm_bindgen]
impl XiangqiGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Game::default(),
        }
    }

    /// Creates a session from a partial `GameConfig` object,
    /// e.g. `{ elephantRule: "legacy" }`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<XiangqiGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: Game::new(config),
        })
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.inner.new_game();
    }

    /// Returns a `TapOutcome` object tagged by its `type` field.
    #[wasm_bindgen(js_name = cellTapped)]
    pub fn cell_tapped(&mut self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let outcome = self.inner.cell_tapped(x, y).map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }

    #[wasm_bindgen(js_name = legalDestinations)]
    pub fn legal_destinations(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.legal_destinations())?)
    }
}

impl Default for XiangqiGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
