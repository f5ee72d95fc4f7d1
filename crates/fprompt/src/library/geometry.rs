//! Solid volumes. Registered under their function names.

use fprompt_core::error::FormulaError;
use fprompt_core::input::Input;
use fprompt_core::value::{Args, Output};
use fprompt_nav::{Prompt, RegistryError};

pub fn register(prompt: &mut Prompt) -> Result<(), RegistryError> {
    prompt.register(Input::number("side length"), volume_of_cube)?;
    prompt.register(
        [
            Input::number("length"),
            Input::number("width"),
            Input::number("height"),
        ],
        volume_of_rectangular_prism,
    )?;
    Ok(())
}

fn volume_of_cube(args: &Args) -> Result<Output, FormulaError> {
    Ok(args.float(0)?.powi(3).into())
}

fn volume_of_rectangular_prism(args: &Args) -> Result<Output, FormulaError> {
    Ok((args.float(0)? * args.float(1)? * args.float(2)?).into())
}
