//! Dose unit conversions.

/// Molar volume of an ideal gas at 25 °C and 1 atm, in L/mol.
pub const MOLAR_VOLUME_25C: f64 = 24.45;

/// mg/L → mg/m3.
pub fn mg_per_l_to_mg_per_m3(value: f64) -> f64 {
    value * 1000.0
}

/// mg/m3 → ppm for a vapour of the given molecular mass (g/mol).
pub fn mg_per_m3_to_ppm(value: f64, molecular_mass: f64) -> f64 {
    value * MOLAR_VOLUME_25C / molecular_mass
}

/// mg/L → ppm.
pub fn mg_per_l_to_ppm(value: f64, molecular_mass: f64) -> f64 {
    mg_per_m3_to_ppm(mg_per_l_to_mg_per_m3(value), molecular_mass)
}
