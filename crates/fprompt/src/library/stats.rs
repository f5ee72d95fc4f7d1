//! Sample statistics and discrete/normal distributions.

use fprompt_core::error::FormulaError;
use fprompt_core::input::Input;
use fprompt_core::value::{Args, Output};
use fprompt_nav::{FormulaSpec, Prompt, RegistryError};

pub fn register(prompt: &mut Prompt) -> Result<(), RegistryError> {
    let sample = || FormulaSpec::new([Input::list("x")]);
    prompt.register(sample().named("sample.mean"), |args: &Args| {
        Ok(mean(args.list(0)?)?.into())
    })?;
    prompt.register(sample().named("sample.median"), |args: &Args| {
        Ok(median(args.list(0)?)?.into())
    })?;
    prompt.register(sample().named("sample.variance"), |args: &Args| {
        Ok(sample_variance(args.list(0)?)?.into())
    })?;
    prompt.register(sample().named("sample.std"), |args: &Args| {
        Ok(sample_variance(args.list(0)?)?.sqrt().into())
    })?;
    prompt.register(Input::list("x"), sort)?;

    let binomial = || {
        FormulaSpec::new([
            Input::integer("x"),
            Input::integer("n"),
            Input::number("p"),
        ])
    };
    prompt.register(
        binomial().named("distributions.binomial.binomial"),
        |args: &Args| Ok(binomial_pmf(args.int(0)?, args.int(1)?, args.float(2)?)?.into()),
    )?;
    prompt.register(
        binomial().named("distributions.binomial.cumulative"),
        |args: &Args| Ok(binomial_cdf(args.int(0)?, args.int(1)?, args.float(2)?)?.into()),
    )?;
    prompt.register(
        FormulaSpec::new([
            Input::integer("x"),
            Input::integer("k"),
            Input::number("p"),
        ])
        .named("distributions.binomial.inverse"),
        |args: &Args| {
            let (x, k, p) = (args.int(0)?, args.int(1)?, args.float(2)?);
            if k < 1 || x < k {
                return Err(FormulaError::domain("need 1 <= k <= x"));
            }
            check_probability(p)?;
            Ok(bernoulli_mass(ln_choose(x - 1, k - 1), p, k, x - k).into())
        },
    )?;
    prompt.register(
        FormulaSpec::new([
            Input::integer("x"),
            Input::integer("N"),
            Input::integer("n"),
            Input::integer("k"),
        ])
        .named("distributions.hyper geometric"),
        |args: &Args| {
            let (x, big_n, n, k) = (args.int(0)?, args.int(1)?, args.int(2)?, args.int(3)?);
            if big_n < 0 || n < 0 || k < 0 || x < 0 {
                return Err(FormulaError::domain("arguments must be non-negative"));
            }
            if n > big_n {
                return Err(FormulaError::domain("sample size n cannot exceed N"));
            }
            let ways = ln_choose(k, x) + ln_choose(big_n - k, n - x) - ln_choose(big_n, n);
            Ok(ways.exp().into())
        },
    )?;

    let poisson = || FormulaSpec::new([Input::integer("x"), Input::number("mu")]);
    prompt.register(
        poisson().named("distributions.poisson.poisson"),
        |args: &Args| Ok(poisson_pmf(args.int(0)?, args.float(1)?)?.into()),
    )?;
    prompt.register(
        poisson().named("distributions.poisson.cumulative"),
        |args: &Args| Ok(poisson_cdf(args.int(0)?, args.float(1)?)?.into()),
    )?;

    prompt.register(
        FormulaSpec::new([
            Input::number("z_lower").optional(),
            Input::number("z_upper").optional(),
        ])
        .named("distributions.normal.cumulative"),
        |args: &Args| {
            let area = match (args.opt_float(0)?, args.opt_float(1)?) {
                (None, None) => return Ok("Lower and upper bounds can't both be empty".into()),
                (None, Some(upper)) => normal_cdf(upper),
                (Some(lower), None) => 1.0 - normal_cdf(lower),
                (Some(lower), Some(upper)) => normal_cdf(upper) - normal_cdf(lower),
            };
            Ok(area.into())
        },
    )?;
    Ok(())
}

fn mean(x: &[f64]) -> Result<f64, FormulaError> {
    if x.is_empty() {
        return Err(FormulaError::domain("sample is empty"));
    }
    Ok(x.iter().sum::<f64>() / x.len() as f64)
}

fn median(x: &[f64]) -> Result<f64, FormulaError> {
    let sorted = sorted(x);
    let n = sorted.len();
    match n {
        0 => Err(FormulaError::domain("sample is empty")),
        _ if n % 2 == 0 => Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
        _ => Ok(sorted[n / 2]),
    }
}

fn sample_variance(x: &[f64]) -> Result<f64, FormulaError> {
    if x.len() < 2 {
        return Err(FormulaError::domain("sample variance needs at least two values"));
    }
    let m = mean(x)?;
    Ok(x.iter().map(|e| (e - m).powi(2)).sum::<f64>() / (x.len() - 1) as f64)
}

fn sort(args: &Args) -> Result<Output, FormulaError> {
    Ok(sorted(args.list(0)?).into())
}

fn sorted(x: &[f64]) -> Vec<f64> {
    let mut out = x.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Longest sum the cumulative distributions will evaluate term by term.
const MAX_TERMS: i64 = 10_000_000;

/// `ln(n!)`, exact up to 32 and by Stirling's series above.
fn ln_factorial(n: i64) -> f64 {
    if n <= 32 {
        return (2..=n).map(|i| (i as f64).ln()).sum();
    }
    let n = n as f64;
    n * n.ln() - n + 0.5 * (std::f64::consts::TAU * n).ln() + 1.0 / (12.0 * n)
        - 1.0 / (360.0 * n.powi(3))
        + 1.0 / (1260.0 * n.powi(5))
}

/// `ln(n choose k)`; negative infinity outside `0 <= k <= n`.
fn ln_choose(n: i64, k: i64) -> f64 {
    if k < 0 || n < 0 || k > n {
        return f64::NEG_INFINITY;
    }
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}

/// `times * ln(p)`, taking `0 * ln(0)` as zero.
fn scaled_ln(times: i64, p: f64) -> f64 {
    if times == 0 { 0.0 } else { times as f64 * p.ln() }
}

/// `e^ln_ways * p^successes * (1 - p)^failures`, evaluated in log space.
fn bernoulli_mass(ln_ways: f64, p: f64, successes: i64, failures: i64) -> f64 {
    (ln_ways + scaled_ln(successes, p) + scaled_ln(failures, 1.0 - p)).exp()
}

fn check_probability(p: f64) -> Result<(), FormulaError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(FormulaError::domain("p must be between 0 and 1"))
    }
}

fn check_terms(count: i64) -> Result<(), FormulaError> {
    if count > MAX_TERMS {
        return Err(FormulaError::domain(format!(
            "cannot sum {count} terms, at most {MAX_TERMS} are supported"
        )));
    }
    Ok(())
}

fn binomial_pmf(x: i64, n: i64, p: f64) -> Result<f64, FormulaError> {
    if n < 0 || x < 0 {
        return Err(FormulaError::domain("x and n must be non-negative"));
    }
    check_probability(p)?;
    if x > n {
        return Ok(0.0);
    }
    Ok(bernoulli_mass(ln_choose(n, x), p, x, n - x))
}

/// `P(X <= x)` for `X ~ Binomial(n, p)`, summed with each term derived from
/// the previous one.
fn binomial_cdf(x: i64, n: i64, p: f64) -> Result<f64, FormulaError> {
    if n < 0 || x < 0 {
        return Err(FormulaError::domain("x and n must be non-negative"));
    }
    check_probability(p)?;
    if x >= n || p == 0.0 {
        return Ok(1.0);
    }
    if p == 1.0 {
        return Ok(0.0);
    }
    check_terms(x)?;

    let ln_odds = p.ln() - (1.0 - p).ln();
    let mut ln_term = n as f64 * (1.0 - p).ln();
    let mut total = 0.0;
    for i in 0..=x {
        if i > 0 {
            ln_term += ((n - i + 1) as f64 / i as f64).ln() + ln_odds;
        }
        let term = ln_term.exp();
        total += term;
        if term == 0.0 && i as f64 > n as f64 * p {
            break;
        }
    }
    Ok(total.min(1.0))
}

fn poisson_pmf(x: i64, mu: f64) -> Result<f64, FormulaError> {
    if x < 0 || mu < 0.0 {
        return Err(FormulaError::domain("x and mu must be non-negative"));
    }
    if mu == 0.0 {
        return Ok(if x == 0 { 1.0 } else { 0.0 });
    }
    // Log space so large x does not overflow the factorial.
    Ok((x as f64 * mu.ln() - mu - ln_factorial(x)).exp())
}

/// `P(X <= x)` for `X ~ Poisson(mu)`.
///
/// Terms past `mu + 40 sqrt(mu) + 800` underflow to zero, so the sum stops
/// there even when `x` is larger.
fn poisson_cdf(x: i64, mu: f64) -> Result<f64, FormulaError> {
    if x < 0 || mu < 0.0 {
        return Err(FormulaError::domain("x and mu must be non-negative"));
    }
    if mu == 0.0 {
        return Ok(1.0);
    }
    let tail = (mu + 40.0 * mu.sqrt() + 800.0) as i64;
    let upper = x.min(tail);
    check_terms(upper)?;

    let ln_mu = mu.ln();
    let mut ln_term = -mu;
    let mut total = 0.0;
    for i in 0..=upper {
        if i > 0 {
            ln_term += ln_mu - (i as f64).ln();
        }
        let term = ln_term.exp();
        total += term;
        if term == 0.0 && i as f64 > mu {
            break;
        }
    }
    Ok(total.min(1.0))
}

/// Standard normal CDF.
fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}

/// Complementary error function (Numerical Recipes `erfcc`, |error| < 1.2e-7).
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let r = t * poly.exp();
    if x >= 0.0 { r } else { 2.0 - r }
}
