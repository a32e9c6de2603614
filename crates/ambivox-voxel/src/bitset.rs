use crate::constants::{BITS_PER_WORD, WORD_INDEX_MASK, WORD_INDEX_SHIFT};

/// Fixed-size bitset backed by `u64` words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitset {
    data: Vec<u64>,
    len: usize,
}

impl Bitset {
    /// Creates a cleared bitset holding `n` bits.
    pub fn new(n: usize) -> Self {
        Self {
            data: vec![0; (n + WORD_INDEX_MASK) / BITS_PER_WORD],
            len: n,
        }
    }

    /// Creates a bitset of `n` bits, all set.
    pub fn full(n: usize) -> Self {
        let mut b = Self {
            data: vec![u64::MAX; (n + WORD_INDEX_MASK) / BITS_PER_WORD],
            len: n,
        };
        b.clear_tail();
        b
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn set(&mut self, i: usize, v: bool) {
        let w = i >> WORD_INDEX_SHIFT;
        let b = i & WORD_INDEX_MASK;
        if v {
            self.data[w] |= 1u64 << b;
        } else {
            self.data[w] &= !(1u64 << b);
        }
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        let w = i >> WORD_INDEX_SHIFT;
        let b = i & WORD_INDEX_MASK;
        ((self.data[w] >> b) & 1) != 0
    }

    #[inline]
    pub fn fill(&mut self, v: bool) {
        self.data.fill(if v { u64::MAX } else { 0 });
        self.clear_tail();
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.data.iter().any(|&w| w != 0)
    }

    /// In-place intersection. Both sets must have the same length.
    pub fn and_assign(&mut self, rhs: &Bitset) {
        debug_assert_eq!(self.len, rhs.len);
        for (a, b) in self.data.iter_mut().zip(&rhs.data) {
            *a &= *b;
        }
    }

    /// In-place union. Both sets must have the same length.
    pub fn or_assign(&mut self, rhs: &Bitset) {
        debug_assert_eq!(self.len, rhs.len);
        for (a, b) in self.data.iter_mut().zip(&rhs.data) {
            *a |= *b;
        }
    }

    /// `true` when every bit set here is also set in `rhs`.
    pub fn is_subset_of(&self, rhs: &Bitset) -> bool {
        self.len == rhs.len && self.data.iter().zip(&rhs.data).all(|(a, b)| a & !b == 0)
    }

    /// Indices of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.data.iter().enumerate().flat_map(|(wi, &word)| {
            let mut w = word;
            core::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let b = w.trailing_zeros() as usize;
                w &= w - 1;
                Some((wi << WORD_INDEX_SHIFT) | b)
            })
        })
    }

    // Bits past `len` in the last word stay zero so counts and comparisons hold.
    fn clear_tail(&mut self) {
        let rem = self.len & WORD_INDEX_MASK;
        if rem != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_respects_length() {
        let b = Bitset::full(70);
        assert_eq!(b.count_ones(), 70);
        assert_eq!(b.iter_ones().last(), Some(69));
    }

    #[test]
    fn set_get_and_iter() {
        let mut b = Bitset::new(130);
        for i in [0, 63, 64, 129] {
            b.set(i, true);
        }
        assert!(b.get(63) && b.get(64) && !b.get(65));
        assert_eq!(b.iter_ones().collect::<Vec<_>>(), vec![0, 63, 64, 129]);
        b.set(63, false);
        assert_eq!(b.count_ones(), 3);
    }

    #[test]
    fn and_or_subset() {
        let mut a = Bitset::new(10);
        let mut b = Bitset::new(10);
        a.set(1, true);
        a.set(2, true);
        b.set(2, true);
        b.set(3, true);
        let mut i = a.clone();
        i.and_assign(&b);
        assert_eq!(i.iter_ones().collect::<Vec<_>>(), vec![2]);
        assert!(i.is_subset_of(&a) && i.is_subset_of(&b));
        let mut u = a.clone();
        u.or_assign(&b);
        assert_eq!(u.count_ones(), 3);
        assert!(!u.is_subset_of(&a));
    }
}
