use std::f64::consts::PI;

use nalgebra::Vector3;

/// transverse momentum of a momentum vector
///
/// # Examples
///
/// ```
/// use nalgebra::Vector3;
/// use hfcore::physics::kinematics::pt;
///
/// assert_eq!(pt(&Vector3::new(3.0, 4.0, 12.0)), 5.0);
/// ```
#[inline]
pub fn pt(p: &Vector3<f64>) -> f64 {
    (p.x * p.x + p.y * p.y).sqrt()
}

/// momentum magnitude
///
/// # Examples
///
/// ```
/// use nalgebra::Vector3;
/// use hfcore::physics::kinematics::p;
///
/// assert_eq!(p(&Vector3::new(3.0, 4.0, 12.0)), 13.0);
/// ```
#[inline]
pub fn p(p: &Vector3<f64>) -> f64 {
    p.norm()
}

/// energy of a particle with momentum `p` and mass `mass`
#[inline]
pub fn energy(p: &Vector3<f64>, mass: f64) -> f64 {
    (p.norm_squared() + mass * mass).sqrt()
}

/// invariant mass of a system of particles
///
/// Arguments:
///
/// * `momenta` - momentum vectors of the particles
/// * `masses` - mass hypothesis of each particle, same order as `momenta`
///
/// Returns:
///
/// * `m` - invariant mass, 0 if the squared mass comes out negative
///
/// # Examples
///
/// ```
/// use nalgebra::Vector3;
/// use hfcore::physics::kinematics::inv_mass;
///
/// // two particles of mass 3 at rest
/// let at_rest = Vector3::new(0.0, 0.0, 0.0);
/// assert_eq!(inv_mass(&[at_rest, at_rest], &[3.0, 3.0]), 6.0);
/// ```
pub fn inv_mass(momenta: &[Vector3<f64>], masses: &[f64]) -> f64 {
    debug_assert_eq!(momenta.len(), masses.len());
    let mut e_sum = 0.0;
    let mut p_sum = Vector3::zeros();
    for (p, &m) in momenta.iter().zip(masses.iter()) {
        e_sum += energy(p, m);
        p_sum += p;
    }
    let m2 = e_sum * e_sum - p_sum.norm_squared();
    if m2 > 0.0 { m2.sqrt() } else { 0.0 }
}

/// rapidity y = 1/2 ln((E + pz) / (E - pz)) under a mass hypothesis
pub fn rapidity(p: &Vector3<f64>, mass: f64) -> f64 {
    let e = energy(p, mass);
    0.5 * ((e + p.z) / (e - p.z)).ln()
}

/// pseudorapidity eta = 1/2 ln((|p| + pz) / (|p| - pz))
///
/// Purely longitudinal momenta give +/- infinity.
pub fn pseudorapidity(p: &Vector3<f64>) -> f64 {
    let mag = p.norm();
    if mag == p.z.abs() {
        return if p.z >= 0.0 { f64::INFINITY } else { f64::NEG_INFINITY };
    }
    0.5 * ((mag + p.z) / (mag - p.z)).ln()
}

/// azimuthal angle in [0, 2pi)
pub fn phi(p: &Vector3<f64>) -> f64 {
    let phi = p.y.atan2(p.x);
    if phi < 0.0 { phi + 2.0 * PI } else { phi }
}
