use crate::error::InvalidChargeError;

/// Net charge of a Σc candidate from its Λc prong charges and the soft-pion charge.
///
/// Only 0 and ±2 are physical; anything else means the charges handed over by
/// upstream are inconsistent.
pub fn sigmac_charge(lc_prong_charges: [i8; 3], soft_pi_charge: i8) -> Result<i8, InvalidChargeError> {
    let lc_charge: i32 = lc_prong_charges.iter().map(|&c| i32::from(c)).sum();
    let soft_pi_charge = i32::from(soft_pi_charge);
    let charge = lc_charge + soft_pi_charge;
    match charge {
        -2 | 0 | 2 => Ok(charge as i8),
        _ => Err(InvalidChargeError { charge, lc_charge, soft_pi_charge }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_charges() {
        assert_eq!(sigmac_charge([1, -1, 1], -1), Ok(0));
        assert_eq!(sigmac_charge([1, -1, 1], 1), Ok(2));
        assert_eq!(sigmac_charge([-1, 1, -1], -1), Ok(-2));
        assert_eq!(sigmac_charge([-1, 1, -1], 1), Ok(0));
    }

    #[test]
    fn test_impossible_charges() {
        let err = sigmac_charge([1, 1, -1], 0).unwrap_err();
        assert_eq!(err, InvalidChargeError { charge: 1, lc_charge: 1, soft_pi_charge: 0 });
        assert!(err.to_string().contains("Charge Lc: 1"));
        // a triply charged Λc is just as broken
        assert!(sigmac_charge([1, 1, 1], 1).is_err());
        assert!(sigmac_charge([-1, -1, -1], 0).is_err());
    }
}
