use crate::utils::constants::{HEAT_INDEX_MIN_HUMIDITY_PCT, HEAT_INDEX_MIN_TEMP_F};

/// Apparent temperature (heat index) in Celsius from air temperature and
/// relative humidity, using the NWS Rothfusz regression.
///
/// The regression is only defined above 80 degF and 40% relative humidity;
/// below either threshold the input temperature is returned unchanged.
/// That is the documented domain behavior, not an error case.
pub fn apparent_temperature(temp_c: f64, relative_humidity_pct: f64) -> f64 {
    let t = temp_c * 9.0 / 5.0 + 32.0;
    let rh = relative_humidity_pct;

    if t < HEAT_INDEX_MIN_TEMP_F || rh < HEAT_INDEX_MIN_HUMIDITY_PCT {
        return temp_c;
    }

    let hi_f = -42.379 + 2.04901523 * t + 10.14333127 * rh
        - 0.22475541 * t * rh
        - 6.83783e-3 * t * t
        - 5.481717e-2 * rh * rh
        + 1.22874e-3 * t * t * rh
        + 8.5282e-4 * t * rh * rh
        - 1.99e-6 * t * t * rh * rh;

    (hi_f - 32.0) * 5.0 / 9.0
}
