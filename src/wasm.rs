//! Browser bindings
//!
//! Thin marshalling layer for a JS front end: take two integers, run the
//! engine, hand back `[{ point, radius }, ...]` as a plain JS value. All
//! actual behavior lives in `sim`; nothing here may fork native and web
//! semantics.

use wasm_bindgen::prelude::*;

use crate::sim::SimParams;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Run a simulation with a fresh seed (logged to the console for replay).
#[wasm_bindgen]
pub fn simulate(dimension: u32, num_points: u32) -> Result<JsValue, JsValue> {
    run(SimParams::new(dimension as usize, num_points as usize))
}

/// Run a simulation with an explicit seed for reproducible output.
#[wasm_bindgen]
pub fn simulate_seeded(dimension: u32, num_points: u32, seed: u64) -> Result<JsValue, JsValue> {
    run(SimParams::new(dimension as usize, num_points as usize).with_seed(seed))
}

fn run(params: SimParams) -> Result<JsValue, JsValue> {
    let balls =
        crate::sim::simulate(&params).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let json = serde_json::to_string(&balls).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
