use serde::{Deserialize, Serialize};

/// A generated particle from the simulation truth record.
///
/// Mother and daughter links are indices into the owning `McParticles` arena.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct McParticle {
    pub pdg_code: i32,
    #[serde(default)]
    pub mother_ids: Vec<usize>,
    #[serde(default)]
    pub daughter_ids: Vec<usize>,
}

impl McParticle {
    pub fn new(pdg_code: i32, mother_ids: Vec<usize>, daughter_ids: Vec<usize>) -> Self {
        McParticle { pdg_code, mother_ids, daughter_ids }
    }

    #[inline]
    pub fn has_mothers(&self) -> bool {
        !self.mother_ids.is_empty()
    }

    #[inline]
    pub fn has_daughters(&self) -> bool {
        !self.daughter_ids.is_empty()
    }
}

/// Arena of generated particles; the position of a particle is its global index.
///
/// Mother and daughter links are kept symmetric. A side missing from the whole
/// record is derived from the other one. When the record carries both sides,
/// every link present on only one of them is logged and completed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<McParticle>", into = "Vec<McParticle>")]
pub struct McParticles {
    particles: Vec<McParticle>,
}

impl From<Vec<McParticle>> for McParticles {
    fn from(particles: Vec<McParticle>) -> Self {
        McParticles::new(particles)
    }
}

impl From<McParticles> for Vec<McParticle> {
    fn from(particles: McParticles) -> Self {
        particles.particles
    }
}

impl McParticles {
    pub fn new(mut particles: Vec<McParticle>) -> Self {
        let both_sides = particles.iter().any(McParticle::has_mothers)
            && particles.iter().any(McParticle::has_daughters);
        let completed = complete_links(&mut particles, both_sides);
        if both_sides && completed > 0 {
            log::warn!("Completed {} one-sided mother/daughter links in the generated record", completed);
        }
        McParticles { particles }
    }

    /// Builds the arena from (pdg, mothers) pairs; daughter links follow
    /// from the mother links, in index order.
    pub fn from_mothers(entries: Vec<(i32, Vec<usize>)>) -> Self {
        McParticles::new(
            entries
                .into_iter()
                .map(|(pdg, mothers)| McParticle::new(pdg, mothers, Vec::new()))
                .collect(),
        )
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&McParticle> {
        self.particles.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Add the reverse of every one-sided link and return how many were added.
/// Each addition is logged when `report` is set.
fn complete_links(particles: &mut [McParticle], report: bool) -> usize {
    // (mother, daughter) pairs missing on the mother side, then on the daughter side
    let mut missing_daughter: Vec<(usize, usize)> = Vec::new();
    let mut missing_mother: Vec<(usize, usize)> = Vec::new();

    for (i, particle) in particles.iter().enumerate() {
        for &m in &particle.mother_ids {
            match particles.get(m) {
                Some(mother) if !mother.daughter_ids.contains(&i) => missing_daughter.push((m, i)),
                Some(_) => {}
                None => log::warn!("Generated particle {} references missing mother {}", i, m),
            }
        }
        for &d in &particle.daughter_ids {
            match particles.get(d) {
                Some(daughter) if !daughter.mother_ids.contains(&i) => missing_mother.push((i, d)),
                Some(_) => {}
                None => log::warn!("Generated particle {} references missing daughter {}", i, d),
            }
        }
    }

    if report {
        for &(m, d) in &missing_daughter {
            log::warn!("Generated particle {} has mother {} which does not list it as daughter", d, m);
        }
        for &(m, d) in &missing_mother {
            log::warn!("Generated particle {} lists daughter {} which does not list it as mother", m, d);
        }
    }

    let added = missing_daughter.len() + missing_mother.len();
    for (m, d) in missing_daughter {
        particles[m].daughter_ids.push(d);
    }
    for (m, d) in missing_mother {
        particles[d].mother_ids.push(m);
    }
    added
}
