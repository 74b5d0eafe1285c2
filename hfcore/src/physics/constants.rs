// Purpose: To store particle codes and masses that are used in the program

// PDG Monte Carlo numbering scheme, particle (not antiparticle) codes
pub const PDG_PROTON: i32 = 2212;
pub const PDG_K_PLUS: i32 = 321;
pub const PDG_PI_PLUS: i32 = 211;
pub const PDG_PI_MINUS: i32 = -211;
pub const PDG_LAMBDA_C_PLUS: i32 = 4122;
pub const PDG_SIGMA_C_0: i32 = 4112;
pub const PDG_SIGMA_C_PLUS_PLUS: i32 = 4222;

// Masses, GeV/c^2
pub const MASS_PROTON: f64 = 0.93827208816;
pub const MASS_K_PLUS: f64 = 0.493677;
pub const MASS_PI_PLUS: f64 = 0.13957039;
pub const MASS_LAMBDA_C_PLUS: f64 = 2.28646;
pub const MASS_SIGMA_C_0: f64 = 2.45375;
pub const MASS_SIGMA_C_PLUS_PLUS: f64 = 2.45397;

/// look up the mass of a particle species, blind to charge conjugation
///
/// Arguments:
///
/// * `pdg` - PDG code of the particle or antiparticle
///
/// Returns:
///
/// * `Some(mass)` in GeV/c^2 if the species is known, `None` otherwise
///
/// # Examples
///
/// ```
/// use hfcore::physics::constants::{mass_pdg, MASS_LAMBDA_C_PLUS};
///
/// assert_eq!(mass_pdg(-4122), Some(MASS_LAMBDA_C_PLUS));
/// assert_eq!(mass_pdg(12345), None);
/// ```
pub fn mass_pdg(pdg: i32) -> Option<f64> {
    match pdg.abs() {
        PDG_PROTON => Some(MASS_PROTON),
        PDG_K_PLUS => Some(MASS_K_PLUS),
        PDG_PI_PLUS => Some(MASS_PI_PLUS),
        PDG_LAMBDA_C_PLUS => Some(MASS_LAMBDA_C_PLUS),
        PDG_SIGMA_C_0 => Some(MASS_SIGMA_C_0),
        PDG_SIGMA_C_PLUS_PLUS => Some(MASS_SIGMA_C_PLUS_PLUS),
        _ => None,
    }
}

/// true if the code belongs to a beauty meson (5xx) or beauty baryon (5xxx)
pub fn is_beauty_hadron(pdg: i32) -> bool {
    let code = pdg.abs();
    code / 100 == 5 || code / 1000 == 5
}
