use alloc::vec::Vec;

/// How often each letter of a frequency-ordered pool is repeated before
/// shuffling: `(letters in tier, copies per letter)`. Letters past the last
/// tier appear once.
pub const FREQUENCY_TIERS: [(usize, usize); 3] = [(12, 7), (8, 3), (3, 2)];

/// Rolling polynomial hash over UTF-16 code units, wrapped to 32 bits.
pub fn hash_key(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Deterministic 32-bit generator (mulberry32).
///
/// Output depends only on the seed, so boards and hint orders are identical
/// on every platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub const fn from_state(state: u32) -> Self {
        Self { state }
    }

    pub fn seed(key: &str) -> Self {
        Self::from_state(hash_key(key) as u32)
    }

    pub const fn state(&self) -> u32 {
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform index in `0..bound`, `bound` must be non-zero.
    pub fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "cannot draw from an empty range");
        ((u64::from(self.next_u32()) * bound as u64) >> 32) as usize
    }

    /// In-place Fisher-Yates shuffle, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }

    /// Picks `n` letters, favouring the front of the frequency-ordered `pool`.
    ///
    /// The pool is expanded by [`FREQUENCY_TIERS`], shuffled and the first `n`
    /// letters taken. Should `n` exceed the expanded pool, further freshly
    /// shuffled copies are drawn until enough letters are picked.
    pub fn weighted_pick(&mut self, pool: &[char], n: usize) -> Vec<char> {
        let expanded = expand_pool(pool);
        if expanded.is_empty() {
            return Vec::new();
        }

        let mut picked = Vec::with_capacity(n);
        let mut rounds = 0;
        while picked.len() < n {
            let mut round = expanded.clone();
            self.shuffle(&mut round);
            let take = (n - picked.len()).min(round.len());
            picked.extend_from_slice(&round[..take]);
            rounds += 1;
        }

        if rounds > 1 {
            log::warn!(
                "Letter pool of {} exhausted, drew {} shuffled rounds for {} letters",
                expanded.len(),
                rounds,
                n
            );
        }
        picked
    }
}

fn expand_pool(pool: &[char]) -> Vec<char> {
    let mut expanded = Vec::new();
    let mut rest = pool;
    for (tier_len, copies) in FREQUENCY_TIERS {
        let (tier, tail) = rest.split_at(tier_len.min(rest.len()));
        for &letter in tier {
            expanded.extend(core::iter::repeat_n(letter, copies));
        }
        rest = tail;
    }
    expanded.extend_from_slice(rest);
    expanded
}
