//! RNG module - uniform random shape selection and the preview queue
//!
//! Every draw is independent and uniform over the seven shapes: there is no
//! bag and no repeat suppression. A seed makes the sequence reproducible.

use arrayvec::ArrayVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::{ShapeKind, NEXT_QUEUE_LEN};

/// Seedable source of shape kinds
#[derive(Debug, Clone)]
pub struct ShapeRng {
    rng: SmallRng,
}

impl ShapeRng {
    /// Create a deterministic source from a seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is present, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Draw one shape kind uniformly
    pub fn next_kind(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())]
    }
}

/// FIFO of upcoming shapes, always exactly [`NEXT_QUEUE_LEN`] long
#[derive(Debug, Clone)]
pub struct NextQueue {
    items: ArrayVec<ShapeKind, NEXT_QUEUE_LEN>,
    rng: ShapeRng,
}

impl NextQueue {
    /// Create a full queue drawing from `rng`
    pub fn new(mut rng: ShapeRng) -> Self {
        let mut items = ArrayVec::new();
        while !items.is_full() {
            items.push(rng.next_kind());
        }
        Self { items, rng }
    }

    /// Take the front shape and append a fresh random one
    pub fn pop(&mut self) -> ShapeKind {
        let next = self.rng.next_kind();
        let front = self.items.remove(0);
        self.items.push(next);
        front
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> ShapeKind {
        self.items[0]
    }

    /// Upcoming shapes, front first
    pub fn as_slice(&self) -> &[ShapeKind] {
        &self.items
    }
}
