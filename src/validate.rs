use crate::error::PredictError;
use crate::lookup::LookupStore;
use crate::types::PredictionRequest;

/// Structural bound on lap times, seconds. Anything outside is nonsense.
const TIME_MAX_S: f64 = 200.0;

/// Track-specific realistic lap-time window the model was fit on.
/// Deliberately narrower than the structural bound: predictions outside it
/// would be extrapolation, so such requests are rejected up front.
const REALISTIC_MIN_S: f64 = 70.0;
const REALISTIC_MAX_S: f64 = 95.0;

/// A request that passed every check, with the resolved team score.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    /// Canonical uppercase driver code.
    pub driver: String,
    pub team_score: f64,
}

/// Apply all checks in order, short-circuiting on the first failure:
/// structural bounds, identity resolution, realistic-range bounds, then
/// cross-field ordering. Every failure is client-attributable and carries a
/// distinct reason string.
pub fn validate(req: &PredictionRequest, lookup: &LookupStore) -> Result<Validated, PredictError> {
    // 1. Structural bounds.
    if req.driver_code.chars().count() != 3 {
        return Err(PredictError::Validation(format!(
            "driver_code must be exactly 3 characters, got '{}'",
            req.driver_code
        )));
    }
    if !(req.qualifying_time > 0.0 && req.qualifying_time <= TIME_MAX_S) {
        return Err(PredictError::Validation(format!(
            "qualifying_time must be in (0, {}] seconds, got {}",
            TIME_MAX_S, req.qualifying_time
        )));
    }
    if !(req.clean_air_race_pace > 0.0 && req.clean_air_race_pace <= TIME_MAX_S) {
        return Err(PredictError::Validation(format!(
            "clean_air_race_pace must be in (0, {}] seconds, got {}",
            TIME_MAX_S, req.clean_air_race_pace
        )));
    }
    if !(0.0..=100.0).contains(&req.rain_prob) {
        return Err(PredictError::Validation(format!(
            "rain_prob must be in [0, 100], got {}",
            req.rain_prob
        )));
    }
    if !(-10.0..=70.0).contains(&req.temperature) {
        return Err(PredictError::Validation(format!(
            "temperature must be in [-10, 70] degrees C, got {}",
            req.temperature
        )));
    }

    // 2. Identity resolution. Unknown codes are rejected, never defaulted.
    let driver = req.driver_code.to_uppercase();
    let team_score = lookup.resolve(&driver).ok_or_else(|| PredictError::UnknownDriver {
        code: driver.clone(),
        known: lookup.known_codes().join(", "),
    })?;

    // 3. Realistic-range bounds.
    if !(REALISTIC_MIN_S..=REALISTIC_MAX_S).contains(&req.qualifying_time) {
        return Err(PredictError::Validation(format!(
            "qualifying_time {} is outside the realistic range [{}, {}] for this track",
            req.qualifying_time, REALISTIC_MIN_S, REALISTIC_MAX_S
        )));
    }
    if !(REALISTIC_MIN_S..=REALISTIC_MAX_S).contains(&req.clean_air_race_pace) {
        return Err(PredictError::Validation(format!(
            "clean_air_race_pace {} is outside the realistic range [{}, {}] for this track",
            req.clean_air_race_pace, REALISTIC_MIN_S, REALISTIC_MAX_S
        )));
    }

    // 4. Race pace with traffic and tire wear never beats a clean qualifying lap.
    if req.clean_air_race_pace <= req.qualifying_time {
        return Err(PredictError::Validation(format!(
            "clean_air_race_pace ({}) must exceed qualifying_time ({})",
            req.clean_air_race_pace, req.qualifying_time
        )));
    }

    Ok(Validated { driver, team_score })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup() -> LookupStore {
        LookupStore::from_pairs([("VER", 0.53), ("NOR", 1.0), ("HAM", 0.48)])
    }

    fn request() -> PredictionRequest {
        PredictionRequest {
            driver_code: "VER".into(),
            qualifying_time: 82.207,
            clean_air_race_pace: 91.10,
            rain_prob: 0.0,
            temperature: 25.0,
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        let v = validate(&request(), &lookup()).unwrap();
        assert_eq!(v.driver, "VER");
        assert_eq!(v.team_score, 0.53);
    }

    #[test]
    fn lowercase_code_is_canonicalized() {
        let mut req = request();
        req.driver_code = "ver".into();
        assert_eq!(validate(&req, &lookup()).unwrap().driver, "VER");
    }

    #[test]
    fn rejects_wrong_length_code() {
        let mut req = request();
        req.driver_code = "VERS".into();
        let err = validate(&req, &lookup()).unwrap_err();
        assert!(err.to_string().contains("exactly 3 characters"));
    }

    #[test]
    fn rejects_zero_qualifying_time() {
        let mut req = request();
        req.qualifying_time = 0.0;
        let err = validate(&req, &lookup()).unwrap_err();
        assert!(err.to_string().contains("qualifying_time"));
        assert!(err.is_client_error());
    }

    #[test]
    fn rejects_rain_prob_above_100() {
        let mut req = request();
        req.rain_prob = 150.0;
        let err = validate(&req, &lookup()).unwrap_err();
        assert!(err.to_string().contains("rain_prob"));
    }

    #[test]
    fn rejects_temperature_outside_bounds() {
        let mut req = request();
        req.temperature = 80.0;
        assert!(validate(&req, &lookup()).is_err());
        req.temperature = -15.0;
        assert!(validate(&req, &lookup()).is_err());
    }

    #[test]
    fn unknown_driver_lists_known_codes_sorted() {
        let mut req = request();
        req.driver_code = "XXX".into();
        let err = validate(&req, &lookup()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown driver code 'XXX'"));
        assert!(msg.contains("HAM, NOR, VER"));
    }

    #[test]
    fn structurally_valid_times_outside_realistic_range_are_rejected() {
        // In (0, 200] but outside [70, 95]: the model never saw such laps.
        let mut req = request();
        req.qualifying_time = 150.0;
        req.clean_air_race_pace = 160.0;
        let err = validate(&req, &lookup()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("realistic range [70, 95]"));
        assert!(err.is_client_error());
    }

    #[test]
    fn race_pace_not_exceeding_qualifying_is_rejected() {
        let mut req = request();
        req.clean_air_race_pace = req.qualifying_time;
        assert!(validate(&req, &lookup()).is_err());
        req.clean_air_race_pace = req.qualifying_time - 1.0;
        let err = validate(&req, &lookup()).unwrap_err();
        assert!(err.to_string().contains("must exceed qualifying_time"));
    }

    #[test]
    fn checks_short_circuit_in_order() {
        // Bad code AND bad rain_prob: the structural code check fires first.
        let mut req = request();
        req.driver_code = "TOOLONG".into();
        req.rain_prob = 150.0;
        let err = validate(&req, &lookup()).unwrap_err();
        assert!(err.to_string().contains("exactly 3 characters"));

        // Unknown driver AND unrealistic time: identity fires before realism.
        let mut req = request();
        req.driver_code = "XXX".into();
        req.qualifying_time = 150.0;
        let err = validate(&req, &lookup()).unwrap_err();
        assert!(err.to_string().contains("Unknown driver code"));
    }

    #[test]
    fn empty_lookup_rejects_everything() {
        let err = validate(&request(), &LookupStore::empty()).unwrap_err();
        assert!(err.to_string().contains("Unknown driver code 'VER'"));
    }
}
