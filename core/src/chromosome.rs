use rand::Rng;
use std::fmt::Display;
use std::fmt;

/// Storage word of a packed chromosome.
pub type Word = u32;

pub const WORD_BITS: usize = Word::BITS as usize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Gene {
    Zero = 0,
    One = 1,
}

impl From<bool> for Gene {
    fn from(v: bool) -> Self {
        match v {
            false => Gene::Zero,
            true => Gene::One,
        }
    }
}

/// Number of words needed to hold `len` genes.
#[inline]
pub const fn words_for(len: usize) -> usize {
    (len + WORD_BITS - 1) / WORD_BITS
}

/// Bit-packed partition vector, one gene per graph node.
///
/// Bits past `len` in the last word are always zero.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BinaryChromosome {
    words: Vec<Word>,
    len: usize,
}

impl BinaryChromosome {
    pub fn with_length(len: usize) -> Self {
        Self {
            words: vec![0; words_for(len)],
            len,
        }
    }

    pub fn random(len: usize, rng: &mut impl Rng) -> Self {
        let mut ch = Self::with_length(len);
        for n in 0..len {
            ch.set(n, rng.gen::<bool>().into());
        }
        ch
    }

    pub fn from_genes(genes: &[Gene]) -> Self {
        let mut ch = Self::with_length(genes.len());
        for (n, gene) in genes.iter().enumerate() {
            ch.set(n, *gene);
        }
        ch
    }

    #[inline]
    pub fn count_genes_by_value(&self) -> (usize, usize) {
        let ones = self.words
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum::<usize>();
        (self.len - ones, ones)
    }

    #[inline]
    pub fn set(&mut self, n: usize, gene: Gene) {
        debug_assert!(n < self.len, "gene {} out of range {}", n, self.len);
        let mask: Word = 1 << (n % WORD_BITS);
        let word = &mut self.words[n / WORD_BITS];
        match gene {
            Gene::Zero => *word &= !mask,
            Gene::One => *word |= mask,
        }
    }

    #[inline]
    pub fn get(&self, n: usize) -> Gene {
        debug_assert!(n < self.len, "gene {} out of range {}", n, self.len);
        let word = self.words[n / WORD_BITS];
        Gene::from((word >> (n % WORD_BITS)) & 1 == 1)
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
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    pub fn toggle(&mut self, n: usize) {
        debug_assert!(n < self.len, "gene {} out of range {}", n, self.len);
        self.words[n / WORD_BITS] ^= (1 as Word) << (n % WORD_BITS);
    }

    /// Every gene flipped; the partition relabelled.
    pub fn complement(&self) -> Self {
        let mut words: Vec<Word> = self.words.iter().map(|w| !w).collect();
        if let Some(last) = words.last_mut() {
            *last &= last_word_mask(self.len);
        }
        Self { words, len: self.len }
    }

    /// Number of loci at which the two chromosomes differ, padding excluded.
    pub fn hamming_distance(&self, other: &Self) -> usize {
        assert_eq!(self.len, other.len);
        let full = self.len / WORD_BITS;
        let mut distance = self.words[..full]
            .iter()
            .zip(&other.words[..full])
            .map(|(a, b)| (a ^ b).count_ones() as usize)
            .sum::<usize>();

        if full < self.words.len() {
            let tail = (self.words[full] ^ other.words[full]) & last_word_mask(self.len);
            distance += tail.count_ones() as usize;
        }
        distance
    }

    pub fn iter(&self) -> impl Iterator<Item=Gene> + '_ {
        (0..self.len).map(move |n| self.get(n))
    }
}

#[inline]
fn last_word_mask(len: usize) -> Word {
    match len % WORD_BITS {
        0 => Word::MAX,
        used => ((1 as Word) << used) - 1,
    }
}

impl Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for gene in self.iter() {
            write!(f, "{}", if gene == Gene::Zero { '0' } else { '1' })?;
        }
        Ok(())
    }
}

pub type Chromosome = BinaryChromosome;
