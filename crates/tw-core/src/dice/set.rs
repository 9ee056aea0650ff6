//! Dice sets and the randomness behind them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Die;
use super::roll::Roll;

/// Produces one face for a die with the given number of sides.
pub trait FaceSource: Send {
    /// Return a face in `1..=sides`.
    fn face(&mut self, sides: u32) -> u32;
}

impl FaceSource for StdRng {
    fn face(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides)
    }
}

/// A fixed sequence of faces, repeated once exhausted.
///
/// Faces are clamped into the die's range. An empty script always yields 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFaces {
    faces: Vec<u32>,
    cursor: usize,
}

impl ScriptedFaces {
    /// Script the given faces.
    pub fn new(faces: impl Into<Vec<u32>>) -> Self {
        Self {
            faces: faces.into(),
            cursor: 0,
        }
    }
}

impl FaceSource for ScriptedFaces {
    fn face(&mut self, sides: u32) -> u32 {
        let Some(face) = self.faces.get(self.cursor % self.faces.len().max(1)).copied() else {
            return 1;
        };
        self.cursor += 1;
        face.clamp(1, sides)
    }
}

/// `n` identical dice rolled together.
///
/// A roll replaces all recorded faces at once; the previous faces are
/// visible until the next roll completes.
pub struct DiceSet {
    die: Die,
    faces: Vec<u32>,
    source: Box<dyn FaceSource>,
}

impl std::fmt::Debug for DiceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceSet")
            .field("die", &self.die)
            .field("faces", &self.faces)
            .finish()
    }
}

impl DiceSet {
    /// `n` six-sided dice seeded from OS entropy. At least one die is used.
    pub fn new(n: usize) -> Self {
        Self::with_source(n, Die::D6, StdRng::from_os_rng())
    }

    /// `n` six-sided dice with a reproducible seed.
    pub fn seeded(n: usize, seed: u64) -> Self {
        Self::seeded_with_die(n, Die::D6, seed)
    }

    /// `n` dice of the given kind seeded from OS entropy.
    pub fn with_die(n: usize, die: Die) -> Self {
        Self::with_source(n, die, StdRng::from_os_rng())
    }

    /// `n` dice of the given kind with a reproducible seed.
    pub fn seeded_with_die(n: usize, die: Die, seed: u64) -> Self {
        Self::with_source(n, die, StdRng::seed_from_u64(seed))
    }

    /// `n` dice of the given kind drawing faces from `source`.
    pub fn with_source(n: usize, die: Die, source: impl FaceSource + 'static) -> Self {
        Self {
            die,
            faces: vec![0; n.max(1)],
            source: Box::new(source),
        }
    }

    /// Roll every die and return the sum, saturating at `u32::MAX`.
    pub fn roll(&mut self) -> u32 {
        let sides = self.die.sides();
        let faces: Vec<u32> = (0..self.faces.len())
            .map(|_| self.source.face(sides))
            .collect();
        self.faces = faces;
        self.faces.iter().fold(0, |sum, face| sum.saturating_add(*face))
    }

    /// The face of the `n`th die from the last roll, counting from 1.
    ///
    /// Zero before the first roll or for an out-of-range index.
    pub fn face(&self, n: usize) -> u32 {
        n.checked_sub(1)
            .and_then(|i| self.faces.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Faces from the last roll (all zero before the first roll).
    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    /// The last roll as a value.
    pub fn last_roll(&self) -> Roll {
        Roll {
            faces: self.faces.clone(),
        }
    }

    /// The kind of die in the set.
    pub fn die(&self) -> Die {
        self.die
    }

    /// Number of dice.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false; a set holds at least one die.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
