use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::data::mc_particle::McParticles;
use crate::physics::constants::is_beauty_hadron;

/// Production origin of a charm hadron.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Origin {
    #[default]
    None,
    Prompt,
    NonPrompt,
}

impl Origin {
    pub fn code(self) -> i8 {
        match self {
            Origin::None => 0,
            Origin::Prompt => 1,
            Origin::NonPrompt => 2,
        }
    }
}

/// Classify a generated charm hadron as prompt or non-prompt.
///
/// All ancestors are visited generation by generation, following every
/// mother link; a beauty hadron anywhere in the ancestry makes the particle
/// non-prompt.
pub fn charm_hadron_origin(particles: &McParticles, index: usize) -> Origin {
    let mut visited: HashSet<usize> = HashSet::new();
    let mut generation: Vec<usize> = vec![index];
    visited.insert(index);

    while !generation.is_empty() {
        let mut next: Vec<usize> = Vec::new();
        for &i in &generation {
            let particle = match particles.get(i) {
                Some(p) => p,
                None => {
                    log::warn!("Origin search reached missing generated particle {}", i);
                    continue;
                }
            };
            for &m in &particle.mother_ids {
                if !visited.insert(m) {
                    continue;
                }
                match particles.get(m) {
                    Some(mother) if is_beauty_hadron(mother.pdg_code) => return Origin::NonPrompt,
                    Some(_) => next.push(m),
                    None => log::warn!("Generated particle {} references missing mother {}", i, m),
                }
            }
        }
        generation = next;
    }
    Origin::Prompt
}
