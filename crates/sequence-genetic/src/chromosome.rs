//! Bit-string genomes and the operators that act on them.
//!
//! A [`Chromosome`] is a fixed-length string of bits. Read as a pair, the first
//! half of the bits is one unsigned big-endian field and the second half
//! another; the AI decodes them as a board coordinate `(x, y)`.
//!
//! # Operations
//!
//! - **Initialization**: [`Chromosome::random`] draws every bit uniformly
//! - **Crossover**: [`segment_crossover`] swaps one contiguous run of bits
//! - **Mutation**: [`mutate`] flips each bit independently
//!
//! Decoding never fails: a field may exceed the range the caller expects, and
//! it is up to the caller to clamp or reject it.

use std::fmt;

use rand::Rng;

/// A fixed-length bit genome.
///
/// # Examples
///
/// ```
/// use sequence_genetic::Chromosome;
///
/// let chromosome: Chromosome = "00111001".parse().unwrap();
/// assert_eq!(chromosome.decode_pair(), (3, 9));
/// assert_eq!(chromosome.to_string(), "00111001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// Creates a chromosome from explicit bits, most significant first.
    #[must_use]
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Creates a chromosome of `len` uniformly random bits.
    pub fn random<R>(rng: &mut R, len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            bits: (0..len).map(|_| rng.random()).collect(),
        }
    }

    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Decodes the two halves of the genome as unsigned big-endian integers.
    ///
    /// With an odd length the second field gets the extra bit.
    #[must_use]
    pub fn decode_pair(&self) -> (u32, u32) {
        let (first, second) = self.bits.split_at(self.bits.len() / 2);
        (decode_field(first), decode_field(second))
    }
}

/// Decodes bits as an unsigned big-endian integer.
///
/// ```
/// use sequence_genetic::chromosome::decode_field;
///
/// assert_eq!(decode_field(&[true, false, true, true]), 11);
/// assert_eq!(decode_field(&[]), 0);
/// ```
#[must_use]
pub fn decode_field(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u32::from(bit))
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid bit '{symbol}' in chromosome, expected '0' or '1'")]
pub struct ChromosomeParseError {
    symbol: char,
}

impl std::str::FromStr for Chromosome {
    type Err = ChromosomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .map(|symbol| match symbol {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ChromosomeParseError { symbol }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { bits })
    }
}

/// Swaps one random contiguous segment between two parents.
///
/// The segment is at least one bit long and may span the whole genome, in
/// which case the children are the parents swapped.
///
/// # Panics
///
/// Panics if the parents have different lengths or are empty.
pub fn segment_crossover<R>(
    p1: &Chromosome,
    p2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome)
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    assert!(!p1.is_empty());
    let start = rng.random_range(0..p1.len());
    let end = rng.random_range(start + 1..=p1.len());

    let mut c1 = p1.clone();
    let mut c2 = p2.clone();
    c1.bits[start..end].copy_from_slice(&p2.bits[start..end]);
    c2.bits[start..end].copy_from_slice(&p1.bits[start..end]);
    (c1, c2)
}

/// Flips each bit with probability `rate`.
///
/// # Panics
///
/// Panics if `rate` is outside `[0.0, 1.0]`.
pub fn mutate<R>(chromosome: &mut Chromosome, rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for bit in &mut chromosome.bits {
        if rng.random_bool(rate) {
            *bit = !*bit;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn chromosome(s: &str) -> Chromosome {
        s.parse().unwrap()
    }

    #[test]
    fn test_decode_pair_big_endian() {
        assert_eq!(chromosome("00000000").decode_pair(), (0, 0));
        assert_eq!(chromosome("10010110").decode_pair(), (9, 6));
        assert_eq!(chromosome("11111111").decode_pair(), (15, 15));
        // odd length: the second field is the longer one
        assert_eq!(chromosome("10111").decode_pair(), (2, 7));
    }

    #[test]
    fn test_parse_rejects_other_symbols() {
        assert_eq!(
            "0120".parse::<Chromosome>(),
            Err(ChromosomeParseError { symbol: '2' })
        );
    }

    #[test]
    fn test_random_has_requested_length() {
        let mut rng = Pcg32::seed_from_u64(1);
        let c = Chromosome::random(&mut rng, 8);
        assert_eq!(c.len(), 8);
        assert_eq!(Chromosome::random(&mut rng, 0).len(), 0);
    }

    #[test]
    fn test_segment_crossover_keeps_bits_per_locus() {
        let mut rng = Pcg32::seed_from_u64(2);
        let p1 = chromosome("00000000");
        let p2 = chromosome("11111111");
        for _ in 0..100 {
            let (c1, c2) = segment_crossover(&p1, &p2, &mut rng);
            // each locus holds one bit from each parent
            for i in 0..8 {
                assert_ne!(c1.bits()[i], c2.bits()[i]);
            }
            // the swapped bits are contiguous and non-empty
            let swapped = c1.to_string();
            let ones = swapped.trim_matches('0');
            assert!(!ones.is_empty());
            assert!(ones.chars().all(|c| c == '1'), "{swapped}");
        }
    }

    #[test]
    fn test_mutation_rate_extremes() {
        let mut rng = Pcg32::seed_from_u64(3);
        let original = chromosome("01101001");

        let mut c = original.clone();
        mutate(&mut c, 0.0, &mut rng);
        assert_eq!(c, original);

        mutate(&mut c, 1.0, &mut rng);
        assert_eq!(c, chromosome("10010110"));
    }
}
