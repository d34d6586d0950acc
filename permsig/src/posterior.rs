//! Bayesian update from an empirical null distribution.

use std::fmt::{self, Display};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::config::validate_priors;
use crate::errors::{PermTestError, PermTestResult};

/// Significant digits kept by every estimate quantity.
pub const SIGNIFICANT_DIGITS: u64 = 64;

/// Added to both probabilities when no permutation reaches the observation.
pub fn smoothing_epsilon() -> BigDecimal {
    BigDecimal::new(1.into(), 10)
}

///
/// Result of one permutation test.
///
/// `null_probability` is the share of permutations whose overlap ratio
/// reached the observed one; it is the evidence for the null. All decimal
/// quantities carry [SIGNIFICANT_DIGITS] digits, so a Bayes factor near
/// 1e10 and a posterior a hair below 1 are both represented exactly enough
/// to tell apart from their neighbours.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorEstimate {
    observed_ratio: f64,
    null_probability: BigDecimal,
    alt_probability: BigDecimal,
    bayes_factor: BigDecimal,
    prior_odds: BigDecimal,
    posterior_odds: BigDecimal,
    posterior_probability: BigDecimal,
}

impl PosteriorEstimate {
    pub fn observed_ratio(&self) -> f64 {
        self.observed_ratio
    }

    pub fn null_probability(&self) -> &BigDecimal {
        &self.null_probability
    }

    pub fn alt_probability(&self) -> &BigDecimal {
        &self.alt_probability
    }

    pub fn bayes_factor(&self) -> &BigDecimal {
        &self.bayes_factor
    }

    pub fn prior_odds(&self) -> &BigDecimal {
        &self.prior_odds
    }

    pub fn posterior_odds(&self) -> &BigDecimal {
        &self.posterior_odds
    }

    pub fn posterior_probability(&self) -> &BigDecimal {
        &self.posterior_probability
    }

    /// Lossy view of [PosteriorEstimate::bayes_factor].
    pub fn bayes_factor_f64(&self) -> f64 {
        self.bayes_factor.to_f64().unwrap_or(f64::NAN)
    }

    /// Lossy view of [PosteriorEstimate::posterior_probability].
    pub fn posterior_probability_f64(&self) -> f64 {
        self.posterior_probability.to_f64().unwrap_or(f64::NAN)
    }
}

impl Display for PosteriorEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "observed ratio {:.6}, P(null) {:.6e}, Bayes factor {:.6e}, posterior {:.6}",
            self.observed_ratio,
            self.null_probability.to_f64().unwrap_or(f64::NAN),
            self.bayes_factor_f64(),
            self.posterior_probability_f64(),
        )
    }
}

///
/// Combine the observed ratio, the permuted ratios and the priors into a
/// posterior estimate.
///
/// # Arguments
/// - observed_ratio: overlap ratio of the unshuffled feature set
/// - permuted_ratios: null distribution from the permutation engine
/// - prior_null: prior weight of the null hypothesis
/// - prior_alt: prior weight of the alternative
pub fn estimate(
    observed_ratio: f64,
    permuted_ratios: &[f64],
    prior_null: f64,
    prior_alt: f64,
) -> PermTestResult<PosteriorEstimate> {
    validate_priors(prior_null, prior_alt)?;
    if !(0.0..=1.0).contains(&observed_ratio) {
        return Err(PermTestError::InvalidObservedRatio(observed_ratio));
    }
    if permuted_ratios.is_empty() {
        return Err(PermTestError::InvalidPermutationCount(0));
    }

    let at_least_observed = permuted_ratios
        .iter()
        .filter(|&&ratio| ratio >= observed_ratio)
        .count() as u64;

    let p_null = (BigDecimal::from(at_least_observed)
        / BigDecimal::from(permuted_ratios.len() as u64))
    .with_prec(SIGNIFICANT_DIGITS);
    let mut p_alt = BigDecimal::one() - &p_null;

    let p_null = if p_null.is_zero() {
        let epsilon = smoothing_epsilon();
        p_alt += &epsilon;
        epsilon
    } else {
        p_null
    };

    let bayes_factor = (&p_alt / &p_null).with_prec(SIGNIFICANT_DIGITS);
    let prior_odds = (exact_decimal(prior_alt, prior_null, prior_alt)?
        / exact_decimal(prior_null, prior_null, prior_alt)?)
    .with_prec(SIGNIFICANT_DIGITS);
    let posterior_odds = (&bayes_factor * &prior_odds).with_prec(SIGNIFICANT_DIGITS);
    let posterior_probability =
        (&posterior_odds / &(&posterior_odds + BigDecimal::one())).with_prec(SIGNIFICANT_DIGITS);

    // smoothing pushes p_alt past 1; only the Bayes factor sees that
    let alt_probability = p_alt.min(BigDecimal::one());

    Ok(PosteriorEstimate {
        observed_ratio,
        null_probability: p_null,
        alt_probability,
        bayes_factor,
        prior_odds,
        posterior_odds,
        posterior_probability,
    })
}

/// The decimal a float prints as, so `0.1` becomes exactly one tenth.
fn exact_decimal(value: f64, prior_null: f64, prior_alt: f64) -> PermTestResult<BigDecimal> {
    BigDecimal::from_str(&value.to_string()).map_err(|_| PermTestError::InvalidPriors {
        prior_null,
        prior_alt,
    })
}
