use super::*;
use crate::protocol::{decode_simulation_response, extract_error_detail};

const AUSTIN_BODY: &str = r#"{
    "estimated_yield_liters_per_day": 146.1,
    "live_weather_data": {"relative_humidity": 0.45, "temperature_celsius": 28.5},
    "forecast_7_day": [146.1, 153.41, 143.18, 160.71, 138.8, 149.02, 157.79]
}"#;

#[test]
fn request_serializes_surface_area_before_location() {
    let request = SimulationRequest::new(50.0, "Austin");
    let json = serde_json::to_value(&request).expect("json");
    assert_eq!(
        json,
        serde_json::json!({ "surface_area": 50.0, "location": "Austin" })
    );
    assert!(serde_json::to_string(&request)
        .expect("json")
        .starts_with("{\"surface_area\":"));
}

#[test]
fn response_without_optional_fields_decodes() {
    let response = decode_simulation_response(AUSTIN_BODY.as_bytes()).expect("decode");
    assert!(response.input_parameters.is_none());
    assert!(!response.anomaly_flag);
    assert_eq!(response.forecast_7_day.values()[3], 160.71);
    let labels: Vec<String> = response
        .forecast_7_day
        .labeled()
        .map(|(label, _)| label)
        .collect();
    assert_eq!(labels.first().map(String::as_str), Some("Day 1"));
    assert_eq!(labels.last().map(String::as_str), Some("Day 7"));
}

#[test]
fn forecast_with_wrong_length_is_rejected() {
    let short = AUSTIN_BODY.replace(", 157.79", "");
    assert!(decode_simulation_response(short.as_bytes()).is_err());

    let long = AUSTIN_BODY.replace("157.79", "157.79, 1.0");
    assert!(decode_simulation_response(long.as_bytes()).is_err());
}

#[test]
fn missing_weather_block_is_rejected() {
    let body = r#"{"estimated_yield_liters_per_day": 1.0, "forecast_7_day": [1,1,1,1,1,1,1]}"#;
    assert!(decode_simulation_response(body.as_bytes()).is_err());
}

#[test]
fn validation_rejects_non_positive_and_non_finite_area() {
    for area in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let err = SimulationRequest::new(area, "Austin")
            .validate()
            .expect_err("should fail");
        assert!(matches!(err, ValidationError::SurfaceAreaNotPositive(_)));
    }
}

#[test]
fn validation_rejects_short_location() {
    for location in ["", "A", "é"] {
        let err = SimulationRequest::new(10.0, location)
            .validate()
            .expect_err("should fail");
        assert_eq!(err, ValidationError::LocationTooShort { min: 2 });
    }
    SimulationRequest::new(10.0, "Oslo")
        .validate()
        .expect("valid");
}

#[test]
fn location_length_counts_surrounding_whitespace() {
    SimulationRequest::new(10.0, " a")
        .validate()
        .expect("two characters, as the service counts them");
    SimulationRequest::new(10.0, "  ")
        .validate()
        .expect("whitespace counts toward the minimum");
}

#[test]
fn error_detail_is_only_taken_from_detail_strings() {
    assert_eq!(
        extract_error_detail(br#"{"detail":"city not found"}"#).as_deref(),
        Some("city not found")
    );
    assert_eq!(extract_error_detail(b"Internal Server Error"), None);
    assert_eq!(extract_error_detail(br#"{"detail":[{"msg":"x"}]}"#), None);
    assert_eq!(extract_error_detail(br#"{"message":"nope"}"#), None);
}
