//!
//! # Number Utilities
//!
//! Authenticated endpoints over small numeric payloads: sorting, filtering,
//! aggregation, binary search, and the primality check. The primality
//! endpoint is the HTTP collaborator of the core in `crate::primality`: it
//! deserializes an arbitrary JSON value into the core's `NumberValue` union
//! and maps any `InvalidInput` rejection to a 400 response.

use crate::{
    error::AppError,
    primality::{self, NumberValue},
};
use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

/// Payload carrying a list of numbers.
#[derive(Debug, Deserialize)]
pub struct NumbersPayload {
    pub numbers: Vec<i64>,
}

/// Payload for the binary search endpoint: a list of numbers and a target.
#[derive(Debug, Deserialize)]
pub struct BinarySearchPayload {
    pub numbers: Vec<i64>,
    pub target: i64,
}

/// Payload for the primality endpoint. `value` is intentionally untyped;
/// the core decides whether it can be interpreted as an integer.
#[derive(Debug, Deserialize)]
pub struct PrimePayload {
    pub value: NumberValue,
}

fn bubble_sort(numbers: &mut [i64]) {
    let n = numbers.len();
    for i in 0..n {
        for j in 0..(n - i).saturating_sub(1) {
            if numbers[j] > numbers[j + 1] {
                numbers.swap(j, j + 1);
            }
        }
    }
}

/// Returns `Some(index)` of `target` in the sorted slice, `None` otherwise.
fn binary_search(numbers: &[i64], target: i64) -> Option<usize> {
    let mut left = 0usize;
    let mut right = numbers.len();
    while left < right {
        let mid = left + (right - left) / 2;
        match numbers[mid].cmp(&target) {
            std::cmp::Ordering::Equal => return Some(mid),
            std::cmp::Ordering::Less => left = mid + 1,
            std::cmp::Ordering::Greater => right = mid,
        }
    }
    None
}

/// Sorts the payload with bubble sort and returns the sorted list.
#[post("/bubble-sort")]
pub async fn bubble_sort_numbers(
    payload: web::Json<NumbersPayload>,
) -> Result<impl Responder, AppError> {
    let mut numbers = payload.into_inner().numbers;
    bubble_sort(&mut numbers);
    Ok(HttpResponse::Ok().json(json!({ "numbers": numbers })))
}

/// Returns the even members of the payload, in their original order.
#[post("/filter-even")]
pub async fn filter_even(payload: web::Json<NumbersPayload>) -> Result<impl Responder, AppError> {
    let even_numbers: Vec<i64> = payload
        .into_inner()
        .numbers
        .into_iter()
        .filter(|n| n % 2 == 0)
        .collect();
    Ok(HttpResponse::Ok().json(json!({ "even_numbers": even_numbers })))
}

/// Sums the payload's elements.
#[post("/sum-elements")]
pub async fn sum_elements(payload: web::Json<NumbersPayload>) -> Result<impl Responder, AppError> {
    let sum: i64 = payload.into_inner().numbers.iter().sum();
    Ok(HttpResponse::Ok().json(json!({ "sum": sum })))
}

/// Returns the maximum element of the payload.
///
/// ## Responses:
/// - `200 OK`: `{"max": n}`.
/// - `400 Bad Request`: If the list is empty.
#[post("/max-value")]
pub async fn max_value(payload: web::Json<NumbersPayload>) -> Result<impl Responder, AppError> {
    let numbers = payload.into_inner().numbers;
    match numbers.iter().max() {
        Some(max) => Ok(HttpResponse::Ok().json(json!({ "max": max }))),
        None => Err(AppError::BadRequest("The list is empty".into())),
    }
}

/// Binary search over the payload's (already sorted) numbers.
///
/// Returns `{"found": bool, "index": i}` with `index = -1` when the target
/// is absent, matching the convention the other endpoints' clients expect.
#[post("/binary-search")]
pub async fn binary_search_numbers(
    payload: web::Json<BinarySearchPayload>,
) -> Result<impl Responder, AppError> {
    let BinarySearchPayload { numbers, target } = payload.into_inner();
    match binary_search(&numbers, target) {
        Some(index) => Ok(HttpResponse::Ok().json(json!({ "found": true, "index": index }))),
        None => Ok(HttpResponse::Ok().json(json!({ "found": false, "index": -1 }))),
    }
}

/// Checks whether the submitted value is prime.
///
/// The body is `{"value": <any JSON>}`. The primality core validates the
/// value (booleans, non-numbers, NaN/infinities, and genuinely fractional
/// floats are all rejected) and near-integer floats are normalized before
/// the check.
///
/// ## Responses:
/// - `200 OK`: `{"number": n, "is_prime": bool}` with the normalized integer.
/// - `400 Bad Request`: If the value cannot be interpreted as an integer.
#[post("/prime")]
pub async fn check_prime(payload: web::Json<PrimePayload>) -> Result<impl Responder, AppError> {
    let value = payload.into_inner().value;
    let number = primality::normalize(&value)?;
    let is_prime = primality::is_prime(&value)?;
    Ok(HttpResponse::Ok().json(json!({ "number": number, "is_prime": is_prime })))
}
