use js_sys::Float64Array;
use num_complex::Complex;
use ode_core::polynomial::{characteristic_roots, CompanionRootFinder};
use ode_core::solution::classify_general_solution as core_classifier;
use ode_core::{ClassificationError, ClassifierSettings, GeneralSolution};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// `y(x) = ...` for the characteristic coefficients, highest degree first.
#[wasm_bindgen]
pub fn synthesize_general_solution(coefficients: Vec<f64>) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();
    solve(&coefficients, &ClassifierSettings::default())
        .map(|solution| solution.text)
        .map_err(|e| JsValue::from_str(&e))
}

/// Full classification (cleaned roots, classes, terms and text) as a JS object.
///
/// `settings` may be `undefined` or `null` to use the defaults.
#[wasm_bindgen]
pub fn classify_general_solution(
    coefficients: Vec<f64>,
    settings: JsValue,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let settings: ClassifierSettings = if settings.is_undefined() || settings.is_null() {
        ClassifierSettings::default()
    } else {
        from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid classifier settings: {}", e)))?
    };

    let solution = solve(&coefficients, &settings).map_err(|e| JsValue::from_str(&e))?;
    to_value(&solution).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Raw characteristic roots, interleaved as `[re0, im0, re1, im1, ...]`.
#[wasm_bindgen]
pub fn compute_characteristic_roots(coefficients: Vec<f64>) -> Result<Float64Array, JsValue> {
    console_error_panic_hook::set_once();
    let roots = characteristic_roots(&coefficients, &Default::default())
        .map_err(|e| JsValue::from_str(&format!("Root finding failed: {:#}", e)))?;
    Ok(Float64Array::from(interleave(&roots).as_slice()))
}

fn solve(coefficients: &[f64], settings: &ClassifierSettings) -> Result<GeneralSolution, String> {
    let finder = CompanionRootFinder::new(settings.root_finder);
    core_classifier(coefficients, &finder, settings)
        .map_err(|e| describe_failure(coefficients, &e))
}

/// Failure report naming the kind and the coefficients verbatim.
fn describe_failure(coefficients: &[f64], error: &ClassificationError) -> String {
    format!(
        "{} for coefficients {:?}: {}",
        error.kind(),
        coefficients,
        error
    )
}

fn interleave(roots: &[Complex<f64>]) -> Vec<f64> {
    roots.iter().flat_map(|root| [root.re, root.im]).collect()
}
