//! WASM bindings for the browser front end.
//!
//! Objects cross the boundary through `serde-wasm-bindgen` using the
//! camelCase field names of the model types.

#![cfg(feature = "wasm")]

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::generator::{generate_additional_rounds, generate_schedule};
use crate::metrics::{FairnessMetrics, FrequencyMatrices};
use crate::models::{GeneratedRound, GenerationInfo, PlayerId, ScheduleConfig};
use crate::montecarlo::{generate_additional_rounds_monte_carlo, generate_schedule_monte_carlo};
use crate::validation::{validate_config, validate_roster, validate_rounds};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtensionOutput<'a> {
    rounds: &'a [GeneratedRound],
    info: &'a GenerationInfo,
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&format!("Invalid {what}: {e}")))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

fn checked_config(config: JsValue) -> Result<ScheduleConfig, JsError> {
    let config: ScheduleConfig = from_js(config, "schedule config")?;
    validate_config(&config).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(config)
}

fn checked_roster(player_ids: JsValue) -> Result<Vec<PlayerId>, JsError> {
    let player_ids: Vec<PlayerId> = from_js(player_ids, "player ids")?;
    validate_roster(&player_ids).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(player_ids)
}

fn checked_rounds(rounds: JsValue, player_ids: &[PlayerId]) -> Result<Vec<GeneratedRound>, JsError> {
    let rounds: Vec<GeneratedRound> = from_js(rounds, "rounds")?;
    validate_rounds(player_ids, &rounds).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(rounds)
}

/// Deterministic greedy schedule.
///
/// # Arguments
/// * `config` - `{ playerIds, courts, totalRounds }`
///
/// # Returns
/// `{ rounds, info }`
#[wasm_bindgen(js_name = generateSchedule)]
pub fn generate_schedule_js(config: JsValue) -> Result<JsValue, JsError> {
    let config = checked_config(config)?;
    to_js(&generate_schedule(&config))
}

/// Best of `iterations` randomized schedules.
#[wasm_bindgen(js_name = generateScheduleMonteCarlo)]
pub fn generate_schedule_monte_carlo_js(config: JsValue, iterations: u32) -> Result<JsValue, JsError> {
    let config = checked_config(config)?;
    to_js(&generate_schedule_monte_carlo(&config, iterations as usize))
}

/// Greedy continuation of `existing_rounds` by `count` rounds.
#[wasm_bindgen(js_name = generateAdditionalRounds)]
pub fn generate_additional_rounds_js(
    player_ids: JsValue,
    courts: u32,
    existing_rounds: JsValue,
    count: u32,
) -> Result<JsValue, JsError> {
    let player_ids = checked_roster(player_ids)?;
    let existing = checked_rounds(existing_rounds, &player_ids)?;
    to_js(&generate_additional_rounds(&player_ids, courts as usize, &existing, count))
}

/// Best of `iterations` continuations of `existing_rounds`.
///
/// # Returns
/// `{ rounds, info }` with only the new rounds.
#[wasm_bindgen(js_name = generateAdditionalRoundsMonteCarlo)]
pub fn generate_additional_rounds_monte_carlo_js(
    player_ids: JsValue,
    courts: u32,
    existing_rounds: JsValue,
    count: u32,
    iterations: u32,
) -> Result<JsValue, JsError> {
    let player_ids = checked_roster(player_ids)?;
    let existing = checked_rounds(existing_rounds, &player_ids)?;
    let extension = generate_additional_rounds_monte_carlo(
        &player_ids,
        courts as usize,
        &existing,
        count,
        iterations as usize,
    );
    to_js(&ExtensionOutput {
        rounds: &extension.rounds,
        info: &extension.info,
    })
}

/// Fairness metrics of `rounds` for the roster `player_ids`.
#[wasm_bindgen(js_name = computeFairnessMetrics)]
pub fn compute_fairness_metrics_js(rounds: JsValue, player_ids: JsValue) -> Result<JsValue, JsError> {
    let player_ids = checked_roster(player_ids)?;
    let rounds = checked_rounds(rounds, &player_ids)?;
    to_js(&FairnessMetrics::calculate(&rounds, &player_ids))
}

/// Partner and opponent frequency matrices, in roster order.
#[wasm_bindgen(js_name = buildMatrices)]
pub fn build_matrices_js(rounds: JsValue, player_ids: JsValue) -> Result<JsValue, JsError> {
    let player_ids = checked_roster(player_ids)?;
    let rounds = checked_rounds(rounds, &player_ids)?;
    to_js(&FrequencyMatrices::build(&rounds, &player_ids))
}
