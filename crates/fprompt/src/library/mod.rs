//! The formulas bundled with `fprompt`.

mod econ;
mod geometry;
mod stats;

use fprompt_nav::{Prompt, RegistryError};

/// Registers every bundled formula on `prompt`.
pub fn register_all(prompt: &mut Prompt) -> Result<(), RegistryError> {
    econ::register(prompt)?;
    stats::register(prompt)?;
    geometry::register(prompt)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_names_do_not_collide() {
        let mut prompt = Prompt::new();
        register_all(&mut prompt).unwrap();

        let tree = prompt.registrar().tree();
        let root: Vec<&str> = tree
            .group(tree.root())
            .unwrap()
            .children()
            .iter()
            .map(|&id| tree.node(id).label())
            .collect();
        assert_eq!(
            root,
            vec![
                "annuity_factor",
                "distributions",
                "factors",
                "find_yield",
                "sample",
                "sort",
                "volume_of_cube",
                "volume_of_rectangular_prism",
            ]
        );
        assert_eq!(tree.formula_count(), 18);
    }
}
