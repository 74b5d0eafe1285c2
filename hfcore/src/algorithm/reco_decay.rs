//! Monte-Carlo matching of decays against the generated particle record.
//!
//! Reconstruction-level matching walks up from the generated particles
//! associated to the reconstructed daughter tracks, generation-level
//! matching walks down from a generated particle. Both accept an optional
//! charge-conjugated match and report it as a sign (+1 particle, -1 antiparticle).
//!
//! Broken links in the particle record (dangling indices, loops) are logged
//! and treated as no match.

use itertools::Itertools;

use crate::data::mc_particle::McParticles;

/// Hard cap on the number of generations walked when no depth limit is given.
pub const MAX_DECAY_DEPTH: u8 = 64;

/// A generated particle found by a matching routine, with the
/// charge-conjugation sign of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchedParticle {
    pub index: usize,
    pub sign: i8,
}

#[inline]
fn species_sign(pdg: i32, expected: i32, accept_anti: bool) -> Option<i8> {
    if pdg == expected {
        Some(1)
    } else if accept_anti && pdg == -expected {
        Some(-1)
    } else {
        None
    }
}

/// Find the first ancestor of species `pdg_mother` following first-mother links.
///
/// The search starts at the mother of `index` and climbs at most `depth_max`
/// generations (`None` = no limit other than `MAX_DECAY_DEPTH`).
pub fn get_mother(
    particles: &McParticles,
    index: usize,
    pdg_mother: i32,
    accept_anti: bool,
    depth_max: Option<u8>,
) -> Option<MatchedParticle> {
    let mut current = match particles.get(index) {
        Some(p) => p,
        None => {
            log::warn!("Mother search from missing generated particle {}", index);
            return None;
        }
    };
    let limit = depth_max.unwrap_or(MAX_DECAY_DEPTH);

    for _ in 0..limit {
        let mother_index = *current.mother_ids.first()?;
        let mother = match particles.get(mother_index) {
            Some(m) => m,
            None => {
                log::warn!("Generated particle references missing mother {}", mother_index);
                return None;
            }
        };
        if let Some(sign) = species_sign(mother.pdg_code, pdg_mother, accept_anti) {
            return Some(MatchedParticle { index: mother_index, sign });
        }
        current = mother;
    }

    if depth_max.is_none() && current.has_mothers() {
        log::warn!(
            "Ancestry of generated particle {} deeper than {} generations, giving up",
            index,
            MAX_DECAY_DEPTH
        );
    }
    None
}

/// Collect the final-state descendants of `index` into `out`.
///
/// A descendant is final when it has no daughters, when `depth_max`
/// generations have been descended, or when its species (charge-blind)
/// is listed in `pdg_final`. A particle without any daughters yields nothing.
/// `out` is not cleared, so callers can reuse one buffer.
pub fn get_daughters(
    particles: &McParticles,
    index: usize,
    pdg_final: &[i32],
    depth_max: Option<u8>,
    out: &mut Vec<usize>,
) {
    collect_daughters(particles, index, pdg_final, depth_max, 0, out);
}

fn collect_daughters(
    particles: &McParticles,
    index: usize,
    pdg_final: &[i32],
    depth_max: Option<u8>,
    stage: u8,
    out: &mut Vec<usize>,
) {
    let particle = match particles.get(index) {
        Some(p) => p,
        None => {
            log::warn!("Generated particle references missing daughter {}", index);
            return;
        }
    };

    if !particle.has_daughters() {
        if stage > 0 {
            out.push(index);
        }
        return;
    }

    let at_limit = match depth_max {
        Some(d) => stage >= d,
        None => {
            if stage >= MAX_DECAY_DEPTH {
                log::warn!(
                    "Decay chain below generated particle {} deeper than {} generations",
                    index,
                    MAX_DECAY_DEPTH
                );
                true
            } else {
                false
            }
        }
    };
    // charge-blind on both sides, so conjugated entries of `pdg_final` also stop the descent
    let listed = stage > 0 && pdg_final.iter().any(|p| p.abs() == particle.pdg_code.abs());

    if at_limit || listed {
        out.push(index);
        return;
    }

    for &daughter in &particle.daughter_ids {
        collect_daughters(particles, daughter, pdg_final, depth_max, stage + 1, out);
    }
}

/// Every particle in `indices` matches a distinct entry of `sign * pdg_expected`.
fn matches_pdg_pattern(
    particles: &McParticles,
    indices: &[usize],
    pdg_expected: &[i32],
    sign: i8,
) -> bool {
    if indices.len() != pdg_expected.len() || pdg_expected.len() > u32::BITS as usize {
        return false;
    }
    let mut consumed: u32 = 0;
    for &i in indices {
        let pdg = match particles.get(i) {
            Some(p) => p.pdg_code,
            None => return false,
        };
        let slot = (0..pdg_expected.len())
            .find(|&k| consumed & (1 << k) == 0 && pdg == i32::from(sign) * pdg_expected[k]);
        match slot {
            Some(k) => consumed |= 1 << k,
            None => return false,
        }
    }
    true
}

/// Reconstruction-level matching.
///
/// `daughter_indices` are the generated particles associated to the
/// reconstructed daughter tracks. They match if they are distinct, if the
/// first one descends from a `pdg_mother` within `depth_max` generations,
/// if they are exactly the final-state daughters of that mother, and if
/// their species match `pdg_daughters` up to the conjugation sign.
///
/// Returns the matched mother.
pub fn matched_mc_rec(
    particles: &McParticles,
    daughter_indices: &[usize],
    pdg_mother: i32,
    pdg_daughters: &[i32],
    accept_anti: bool,
    depth_max: Option<u8>,
) -> Option<MatchedParticle> {
    let &first = daughter_indices.first()?;
    if !daughter_indices.iter().all_unique() {
        return None;
    }

    let mother = get_mother(particles, first, pdg_mother, accept_anti, depth_max)?;

    let mut final_state = Vec::with_capacity(daughter_indices.len());
    get_daughters(particles, mother.index, pdg_daughters, depth_max, &mut final_state);
    if final_state.len() != daughter_indices.len()
        || !daughter_indices.iter().all(|d| final_state.contains(d))
    {
        return None;
    }

    if !matches_pdg_pattern(particles, daughter_indices, pdg_daughters, mother.sign) {
        return None;
    }
    Some(mother)
}

/// Generation-level matching: `index` is a `pdg_particle` whose final-state
/// daughters, within `depth_max` generations, match `pdg_daughters`.
///
/// Returns the conjugation sign of the match.
pub fn is_matched_mc_gen(
    particles: &McParticles,
    index: usize,
    pdg_particle: i32,
    pdg_daughters: &[i32],
    accept_anti: bool,
    depth_max: Option<u8>,
) -> Option<i8> {
    let particle = particles.get(index)?;
    let sign = species_sign(particle.pdg_code, pdg_particle, accept_anti)?;

    if !pdg_daughters.is_empty() {
        let mut final_state = Vec::with_capacity(pdg_daughters.len());
        get_daughters(particles, index, pdg_daughters, depth_max, &mut final_state);
        if !matches_pdg_pattern(particles, &final_state, pdg_daughters, sign) {
            return None;
        }
    }
    Some(sign)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SC_PATTERN: [i32; 4] = [2212, -321, 211, 211];

    /// 0: Σc++ → 1: Λc+ (→ 3: p, 4: K-, 5: π+), 2: π+
    fn sigmac_plusplus_tree(conj: i32) -> McParticles {
        McParticles::from_mothers(vec![
            (conj * 4222, vec![]),
            (conj * 4122, vec![0]),
            (conj * 211, vec![0]),
            (conj * 2212, vec![1]),
            (conj * -321, vec![1]),
            (conj * 211, vec![1]),
        ])
    }

    #[test]
    fn test_get_mother_depth_limit() {
        let particles = sigmac_plusplus_tree(1);
        assert_eq!(
            get_mother(&particles, 3, 4222, false, Some(2)),
            Some(MatchedParticle { index: 0, sign: 1 })
        );
        assert_eq!(get_mother(&particles, 3, 4222, false, Some(1)), None);
        assert_eq!(get_mother(&particles, 3, 4222, false, None).map(|m| m.index), Some(0));
        // the particle itself is never its own mother
        assert_eq!(get_mother(&particles, 0, 4222, false, None), None);
    }

    #[test]
    fn test_get_daughters_stops_at_listed_species() {
        let particles = sigmac_plusplus_tree(1);
        let mut out = Vec::new();
        get_daughters(&particles, 0, &[4122, 211], None, &mut out);
        assert_eq!(out, vec![1, 2]);

        out.clear();
        get_daughters(&particles, 0, &SC_PATTERN, Some(3), &mut out);
        assert_eq!(out, vec![3, 4, 5, 2]);

        out.clear();
        get_daughters(&particles, 3, &SC_PATTERN, None, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_matched_mc_rec_particle_and_antiparticle() {
        let particles = sigmac_plusplus_tree(1);
        let matched = matched_mc_rec(&particles, &[3, 4, 5, 2], 4222, &SC_PATTERN, true, Some(3));
        assert_eq!(matched, Some(MatchedParticle { index: 0, sign: 1 }));

        let anti = sigmac_plusplus_tree(-1);
        let matched = matched_mc_rec(&anti, &[3, 4, 5, 2], 4222, &SC_PATTERN, true, Some(3));
        assert_eq!(matched, Some(MatchedParticle { index: 0, sign: -1 }));

        // antiparticles rejected when not accepted
        assert_eq!(matched_mc_rec(&anti, &[3, 4, 5, 2], 4222, &SC_PATTERN, false, Some(3)), None);
    }

    #[test]
    fn test_matched_mc_rec_rejects_wrong_combinations() {
        let particles = sigmac_plusplus_tree(1);
        // duplicated daughter
        assert_eq!(matched_mc_rec(&particles, &[3, 4, 5, 5], 4222, &SC_PATTERN, true, Some(3)), None);
        // incomplete daughter set
        assert_eq!(matched_mc_rec(&particles, &[3, 4, 5], 4222, &SC_PATTERN[..3], true, Some(3)), None);
        // wrong parent species
        assert_eq!(matched_mc_rec(&particles, &[3, 4, 5, 2], 4112, &SC_PATTERN, true, Some(3)), None);
        // Σc0 pattern on a Σc++ decay
        assert_eq!(
            matched_mc_rec(&particles, &[3, 4, 5, 2], 4222, &[2212, -321, 211, -211], true, Some(3)),
            None
        );
    }

    #[test]
    fn test_matched_mc_rec_resonant_lambda_c() {
        // Λc+ → p K*0(→ K- π+), three generations below Σc++
        let particles = McParticles::from_mothers(vec![
            (4222, vec![]),
            (4122, vec![0]),
            (211, vec![0]),
            (2212, vec![1]),
            (313, vec![1]),
            (-321, vec![4]),
            (211, vec![4]),
        ]);
        let matched = matched_mc_rec(&particles, &[3, 5, 6, 2], 4222, &SC_PATTERN, true, Some(3));
        assert_eq!(matched.map(|m| m.index), Some(0));
        // two generations are not enough to climb from K- to Σc++
        assert_eq!(matched_mc_rec(&particles, &[5, 3, 6, 2], 4222, &SC_PATTERN, true, Some(2)), None);
    }

    #[test]
    fn test_is_matched_mc_gen() {
        let particles = sigmac_plusplus_tree(-1);
        assert_eq!(is_matched_mc_gen(&particles, 0, 4222, &[4122, 211], true, Some(1)), Some(-1));
        assert_eq!(is_matched_mc_gen(&particles, 1, 4122, &[2212, -321, 211], true, Some(2)), Some(-1));
        assert_eq!(is_matched_mc_gen(&particles, 0, 4112, &[4122, -211], true, Some(1)), None);
        assert_eq!(is_matched_mc_gen(&particles, 2, 4222, &[4122, 211], true, Some(1)), None);
        assert_eq!(is_matched_mc_gen(&particles, 42, 4222, &[], true, None), None);
    }

    #[test]
    fn test_dangling_links_do_not_match() {
        let particles = McParticles::new(vec![
            crate::data::mc_particle::McParticle::new(4222, vec![], vec![1, 9]),
            crate::data::mc_particle::McParticle::new(4122, vec![0], vec![]),
        ]);
        assert_eq!(is_matched_mc_gen(&particles, 0, 4222, &[4122, 211], true, Some(1)), None);
        let orphan = McParticles::new(vec![crate::data::mc_particle::McParticle::new(211, vec![3], vec![])]);
        assert_eq!(get_mother(&orphan, 0, 4222, true, None), None);
    }

    #[test]
    fn test_one_sided_links_match_after_completion() {
        use crate::data::mc_particle::McParticle;
        // the proton is listed by the Λc but carries no mother link,
        // the soft pion names the Σc++ which does not list it
        let particles = McParticles::new(vec![
            McParticle::new(4222, vec![], vec![1]),
            McParticle::new(4122, vec![0], vec![3, 4, 5]),
            McParticle::new(211, vec![0], vec![]),
            McParticle::new(2212, vec![], vec![]),
            McParticle::new(-321, vec![1], vec![]),
            McParticle::new(211, vec![1], vec![]),
        ]);
        assert_eq!(get_mother(&particles, 3, 4222, false, Some(2)).map(|m| m.index), Some(0));
        let matched = matched_mc_rec(&particles, &[3, 4, 5, 2], 4222, &SC_PATTERN, true, Some(3));
        assert_eq!(matched, Some(MatchedParticle { index: 0, sign: 1 }));
        assert_eq!(is_matched_mc_gen(&particles, 0, 4222, &[4122, 211], true, Some(1)), Some(1));
    }
}
