use shared::domain::SimulationRequest;

use crate::error::InputError;

/// Turns the raw form fields into a request, applying the same bounds the service enforces.
pub fn parse_form(location: &str, surface_area: &str) -> Result<SimulationRequest, InputError> {
    let raw_area = surface_area.trim();
    let area: f64 = raw_area
        .parse()
        .map_err(|_| InputError::NotANumber(raw_area.to_string()))?;

    let request = SimulationRequest::new(area, location.trim());
    request.validate()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ValidationError;

    #[test]
    fn trims_both_fields() {
        let request = parse_form("  Austin ", " 50 ").expect("valid");
        assert_eq!(request, SimulationRequest::new(50.0, "Austin"));
    }

    #[test]
    fn accepts_fractional_area() {
        let request = parse_form("Lima", "12.75").expect("valid");
        assert_eq!(request.surface_area, 12.75);
    }

    #[test]
    fn rejects_non_numeric_area() {
        assert_eq!(
            parse_form("Austin", "fifty"),
            Err(InputError::NotANumber("fifty".into()))
        );
        assert_eq!(
            parse_form("Austin", ""),
            Err(InputError::NotANumber(String::new()))
        );
    }

    #[test]
    fn rejects_nan_and_negative_area() {
        for raw in ["NaN", "-4", "0", "inf"] {
            let err = parse_form("Austin", raw).expect_err("should fail");
            assert!(matches!(
                err,
                InputError::Invalid(ValidationError::SurfaceAreaNotPositive(_))
            ));
        }
    }

    #[test]
    fn rejects_blank_location() {
        let err = parse_form("   ", "10").expect_err("should fail");
        assert!(matches!(
            err,
            InputError::Invalid(ValidationError::LocationTooShort { .. })
        ));
    }
}
