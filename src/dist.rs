//! Discrete distributions over trial counts, and their information content.
//!
//! These are the reference models a prefix code is judged against: the
//! Shannon information `-log2 p(n)` of an outcome is the ideal codeword length
//! for it, and the entropy is the ideal average.
//!
//! All probabilities are computed in log space. Binomial coefficients come from
//! an [`LnFactorials`] table that the caller owns and passes in, so repeated
//! queries reuse it without any process-wide cache.

use crate::error::{Error, Result};

/// Largest `n` whose `ln n!` is kept in an [`LnFactorials`] table. Beyond it,
/// values come from `lgamma`, so memory stays bounded whatever the outcome.
pub const TABLE_LIMIT: u64 = 4096;

/// Largest outcome (and trial count) the distributions accept: every integer up
/// to it is exact as an `f64`.
pub const MAX_OUTCOME: u64 = 1 << 53;

/// Growable table of `ln k!` for `k <= TABLE_LIMIT`.
///
/// Entries are appended on demand and never invalidated, so one table can be
/// shared by every distribution for as long as its owner keeps it.
#[derive(Debug, Clone)]
pub struct LnFactorials {
    table: Vec<f64>,
}

impl LnFactorials {
    /// Table holding only `ln 0! = 0`.
    pub fn new() -> Self {
        Self { table: vec![0.0] }
    }

    /// Table pre-filled up to `ln n!`, clamped to [`TABLE_LIMIT`].
    pub fn with_capacity(n: u64) -> Self {
        let mut t = Self::new();
        t.ensure(n.min(TABLE_LIMIT));
        t
    }

    /// Highest `n` currently tabulated.
    pub fn max_n(&self) -> u64 {
        (self.table.len() - 1) as u64
    }

    // Callers keep `n <= TABLE_LIMIT`, so the cast cannot truncate.
    fn ensure(&mut self, n: u64) {
        let n = n as usize;
        while self.table.len() <= n {
            let k = self.table.len();
            let prev = self.table[k - 1];
            self.table.push(prev + (k as f64).ln());
        }
    }

    /// `ln n!`.
    pub fn ln_factorial(&mut self, n: u64) -> f64 {
        if n > TABLE_LIMIT {
            return libm::lgamma(n as f64 + 1.0);
        }
        self.ensure(n);
        self.table[n as usize]
    }

    /// `ln C(n, k)`; negative infinity when `k > n`.
    pub fn ln_choose(&mut self, n: u64, k: u64) -> f64 {
        if k > n {
            return f64::NEG_INFINITY;
        }
        let k = k.min(n - k);
        if n <= TABLE_LIMIT {
            self.ensure(n);
            let t = &self.table;
            return t[n as usize] - t[k as usize] - t[(n - k) as usize];
        }
        if k <= TABLE_LIMIT {
            // ln(n (n-1) ... (n-k+1) / k!), summed over k terms.
            let falling: f64 = (0..k).map(|i| ((n - i) as f64).ln()).sum();
            return falling - self.ln_factorial(k);
        }
        libm::lgamma(n as f64 + 1.0)
            - libm::lgamma(k as f64 + 1.0)
            - libm::lgamma((n - k) as f64 + 1.0)
    }
}

impl Default for LnFactorials {
    fn default() -> Self {
        Self::new()
    }
}

/// `exp * ln_base`, with `0 * ln 0 = 0`.
fn scaled_ln(ln_base: f64, exp: u64) -> f64 {
    if exp == 0 {
        0.0
    } else {
        exp as f64 * ln_base
    }
}

/// `ln(1 - p)` without cancellation for small `p`.
fn ln_failure(p: f64) -> f64 {
    (-p).ln_1p()
}

fn check_probability(p: f64) -> Result<f64> {
    if p.is_finite() && p > 0.0 && p <= 1.0 {
        Ok(p)
    } else {
        Err(Error::InvalidProbability(p))
    }
}

/// A distribution over non-negative integer outcomes.
pub trait Distribution {
    /// Inclusive `(min, max)` support. Unbounded supports stop at
    /// [`MAX_OUTCOME`].
    fn support(&self) -> (u64, u64);

    /// `P(X = n)`.
    ///
    /// # Errors
    /// `Error::OutOfSupport` if `n` is outside [`Distribution::support`].
    fn prob(&self, n: u64, cache: &mut LnFactorials) -> Result<f64>;

    /// Shannon information of outcome `n`, in bits.
    fn info_measure(&self, n: u64, cache: &mut LnFactorials) -> Result<f64> {
        Ok(-self.prob(n, cache)?.log2())
    }

    /// `Σ P(X = n)` for `n` from the start of the support through `upto`.
    fn sum_prob(&self, upto: u64, cache: &mut LnFactorials) -> Result<f64> {
        let (min, max) = self.support();
        if upto < min {
            return Err(Error::OutOfSupport { n: upto, min, max });
        }
        let mut sum = 0.0;
        for n in min..=upto.min(max) {
            sum += self.prob(n, cache)?;
        }
        Ok(sum)
    }

    /// Entropy truncated at `upto`: `Σ P(n) · I(n)` over the same range as
    /// [`Distribution::sum_prob`]. Zero-probability outcomes contribute 0.
    fn approx_entropy(&self, upto: u64, cache: &mut LnFactorials) -> Result<f64> {
        let (min, max) = self.support();
        if upto < min {
            return Err(Error::OutOfSupport { n: upto, min, max });
        }
        let mut sum = 0.0;
        for n in min..=upto.min(max) {
            let p = self.prob(n, cache)?;
            if p > 0.0 {
                sum -= p * p.log2();
            }
        }
        Ok(sum)
    }
}

fn check_support(d: &impl Distribution, n: u64) -> Result<()> {
    let (min, max) = d.support();
    if n < min || n > max {
        return Err(Error::OutOfSupport { n, min, max });
    }
    Ok(())
}

/// Number of successes in `trials` independent trials with success rate `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    trials: u64,
    p: f64,
}

impl Binomial {
    /// # Errors
    /// `Error::InvalidParameter` if `trials == 0`, `Error::InvalidProbability`
    /// unless `0 < p <= 1`.
    pub fn new(trials: u64, p: f64) -> Result<Self> {
        if trials == 0 {
            return Err(Error::InvalidParameter("trials must be positive"));
        }
        if trials > MAX_OUTCOME {
            return Err(Error::InvalidParameter("trials must not exceed 2^53"));
        }
        Ok(Self {
            trials,
            p: check_probability(p)?,
        })
    }
}

impl Distribution for Binomial {
    fn support(&self) -> (u64, u64) {
        (0, self.trials)
    }

    fn prob(&self, n: u64, cache: &mut LnFactorials) -> Result<f64> {
        check_support(self, n)?;
        let ln = cache.ln_choose(self.trials, n)
            + scaled_ln(self.p.ln(), n)
            + scaled_ln(ln_failure(self.p), self.trials - n);
        Ok(ln.exp().min(1.0))
    }
}

/// Number of trials up to and including the first success.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometric {
    p: f64,
}

impl Geometric {
    /// # Errors
    /// `Error::InvalidProbability` unless `0 < p <= 1`.
    pub fn new(p: f64) -> Result<Self> {
        Ok(Self {
            p: check_probability(p)?,
        })
    }
}

impl Distribution for Geometric {
    fn support(&self) -> (u64, u64) {
        (1, MAX_OUTCOME)
    }

    fn prob(&self, n: u64, _cache: &mut LnFactorials) -> Result<f64> {
        check_support(self, n)?;
        Ok((scaled_ln(ln_failure(self.p), n - 1) + self.p.ln())
            .exp()
            .min(1.0))
    }
}

/// Number of trials needed to reach `successes` successes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegativeBinomial {
    successes: u64,
    p: f64,
}

impl NegativeBinomial {
    /// # Errors
    /// `Error::InvalidParameter` if `successes == 0`,
    /// `Error::InvalidProbability` unless `0 < p <= 1`.
    pub fn new(successes: u64, p: f64) -> Result<Self> {
        if successes == 0 {
            return Err(Error::InvalidParameter("successes must be positive"));
        }
        if successes > MAX_OUTCOME {
            return Err(Error::InvalidParameter("successes must not exceed 2^53"));
        }
        Ok(Self {
            successes,
            p: check_probability(p)?,
        })
    }
}

impl Distribution for NegativeBinomial {
    fn support(&self) -> (u64, u64) {
        (self.successes, MAX_OUTCOME)
    }

    fn prob(&self, n: u64, cache: &mut LnFactorials) -> Result<f64> {
        check_support(self, n)?;
        let r = self.successes;
        let ln = cache.ln_choose(n - 1, r - 1)
            + scaled_ln(self.p.ln(), r)
            + scaled_ln(ln_failure(self.p), n - r);
        Ok(ln.exp().min(1.0))
    }
}
