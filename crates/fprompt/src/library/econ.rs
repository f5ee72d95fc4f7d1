//! Engineering-economics factors.

use fprompt_core::error::FormulaError;
use fprompt_core::input::Input;
use fprompt_core::value::{Args, Output};
use fprompt_nav::{FormulaSpec, Prompt, RegistryError};

const YIELD_TOLERANCE: f64 = 0.000_005;
const YIELD_MAX_STEPS: usize = 100_000;

pub fn register(prompt: &mut Prompt) -> Result<(), RegistryError> {
    prompt.register(
        [
            Input::number("Present value"),
            Input::number("Coupon value"),
            Input::number("Number of periods"),
            Input::number("Face value"),
        ],
        find_yield,
    )?;
    prompt.register(
        [Input::number("number of periods"), Input::number("rate (percent)")],
        annuity_factor,
    )?;
    prompt.register(
        FormulaSpec::new([
            Input::number("number of periods"),
            Input::number("rate (percent)"),
            Input::number("gradient rate (percent)"),
        ])
        .named("factors.geometric gradient"),
        geometric_factor,
    )?;
    prompt.register(
        FormulaSpec::new([
            Input::percent("tax rate (t)"),
            Input::percent("CCA (depreciation) rate (d)"),
            Input::percent("interest rate (normally after-tax MARR/IRR) (i)"),
        ])
        .named("factors.CRF/CTF"),
        tax_factors,
    )?;
    Ok(())
}

/// Yield rate of a bond priced at `P` with coupon `A`, `N` periods and face `F`.
///
/// Walks the rate up or down, halving the step after every change of
/// direction, until the priced value is within tolerance of `P`.
fn find_yield(args: &Args) -> Result<Output, FormulaError> {
    let (p, a, n, f) = (args.float(0)?, args.float(1)?, args.float(2)?, args.float(3)?);
    let present = |y: f64| a * (1.0 - (1.0 + y).powf(-n)) / y + f * (1.0 + y).powf(-n);

    let mut y = 0.001;
    let mut step = 0.01;
    let mut increasing = true;
    for _ in 0..YIELD_MAX_STEPS {
        let guess = present(y);
        if !guess.is_finite() {
            break;
        }
        if (guess - p).abs() < YIELD_TOLERANCE {
            return Ok(Output::Text(format!(
                "yield rate: {:.3} +/- {:.4} %",
                y * 100.0,
                YIELD_TOLERANCE * 100.0
            )));
        }
        if guess > p {
            y += step;
            if !increasing {
                step /= 2.0;
            }
            increasing = true;
        } else {
            y -= step;
            if increasing {
                step /= 2.0;
            }
            increasing = false;
        }
    }
    Err(FormulaError::domain("yield search did not converge"))
}

fn annuity_factor(args: &Args) -> Result<Output, FormulaError> {
    let n = args.float(0)?;
    let r = args.float(1)? / 100.0;
    if r == 0.0 {
        return Err(FormulaError::domain("rate must not be zero"));
    }
    let factor = (1.0 - (1.0 + r).powf(-n)) / r;
    Ok(Output::map([("P/A", factor), ("A/P", 1.0 / factor)]))
}

fn geometric_factor(args: &Args) -> Result<Output, FormulaError> {
    let n = args.float(0)?;
    let i = args.float(1)? / 100.0;
    let g = args.float(2)? / 100.0;
    if g == i {
        return Err(FormulaError::domain("gradient rate must differ from rate"));
    }
    let factor = (((1.0 + g) / (1.0 + i)).powf(n) - 1.0) / (g - i);
    Ok(Output::map([("P/geom", factor), ("geom/P", 1.0 / factor)]))
}

fn tax_factors(args: &Args) -> Result<Output, FormulaError> {
    let (t, d, i) = (args.float(0)?, args.float(1)?, args.float(2)?);
    if i + d == 0.0 {
        return Err(FormulaError::domain("interest and CCA rates cannot both be zero"));
    }
    let crf = 1.0 - t * d / (i + d);
    let ctf = 1.0 - t * d / (i + d) * (1.0 + i / 2.0) / (1.0 + i);
    Ok(Output::map([("CRF", crf), ("CTF", ctf)]))
}
