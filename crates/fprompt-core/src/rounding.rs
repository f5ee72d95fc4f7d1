//! Result post-processing: rounding formula outputs for display.
//!
//! Rounding goes through the correctly rounded decimal rendering of the
//! value, so ties follow the exact binary value (half to even) and rounding
//! twice gives the same float as rounding once. Only plain numbers and the
//! top-level numeric entries of a map are touched; NaN and every other shape
//! pass through unchanged.

use crate::value::Output;

/// Rounds `output` to `places` decimals, or returns it untouched for `None`.
pub fn round_output(output: Output, places: Option<u32>) -> Output {
    let Some(places) = places else {
        return output;
    };
    match output {
        Output::Number(x) => Output::Number(round_to(x, places)),
        Output::Map(entries) => Output::Map(
            entries
                .into_iter()
                .map(|(key, value)| match value {
                    Output::Number(x) => (key, Output::Number(round_to(x, places))),
                    other => (key, other),
                })
                .collect(),
        ),
        other => other,
    }
}

/// Beyond this many places every finite `f64` is already exact.
const MAX_PLACES: u32 = 340;

/// Rounds a single float to `places` decimals.
///
/// NaN and infinities are returned unchanged.
pub fn round_to(x: f64, places: u32) -> f64 {
    if !x.is_finite() || places >= MAX_PLACES {
        return x;
    }
    let places = places as usize;
    format!("{x:.places$}").parse().unwrap_or(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rounds_numbers() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-3.5, 0), -4.0);
        // 2.675 is stored just below the tie.
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(0.00004, 4), 0.0);
    }

    #[test]
    fn rounding_is_idempotent() {
        let samples = [
            1.23456789,
            -9.87654321,
            1234.5678,
            0.1 + 0.2,
            4340.120868288233,
            4345.5073722203815,
            8099.999999999999,
            1e-7 / 3.0,
        ];
        for x in samples {
            for places in 0..=20 {
                let once = round_to(x, places);
                assert_eq!(round_to(once, places), once, "x={x} places={places}");
            }
        }
    }

    #[test]
    fn rounding_is_idempotent_across_a_sweep() {
        let mut x = 0.0;
        while x < 8100.0 {
            for places in 0..=17 {
                let once = round_to(x, places);
                assert_eq!(round_to(once, places), once, "x={x} places={places}");
            }
            x += 0.987_654_321_012_3;
        }
    }

    #[test]
    fn high_precision_keeps_the_value() {
        assert_eq!(round_to(4340.120868288233, 12), 4340.120868288233);
        assert_eq!(round_to(0.1, 30), 0.1);
        assert_eq!(round_to(5e-324, 400), 5e-324);
    }

    #[test]
    fn nan_and_huge_values_pass_through() {
        assert!(round_to(f64::NAN, 3).is_nan());
        assert_eq!(round_to(f64::INFINITY, 3), f64::INFINITY);
        assert_eq!(round_to(f64::NEG_INFINITY, 0), f64::NEG_INFINITY);
        assert_eq!(round_to(1e300, 10), 1e300);
    }

    #[test]
    fn no_precision_is_identity() {
        let out = Output::Number(1.23456789);
        assert_eq!(round_output(out.clone(), None), out);
    }

    #[test]
    fn maps_are_rounded_per_key() {
        let out = Output::map([
            ("a", Output::Number(1.23456)),
            ("b", Output::Number(f64::NAN)),
            ("c", Output::Text("keep".into())),
            ("d", Output::Int(7)),
        ]);
        let Output::Map(rounded) = round_output(out, Some(2)) else {
            panic!("expected a map");
        };
        assert_eq!(rounded["a"], Output::Number(1.23));
        assert!(matches!(rounded["b"], Output::Number(x) if x.is_nan()));
        assert_eq!(rounded["c"], Output::Text("keep".into()));
        assert_eq!(rounded["d"], Output::Int(7));
    }

    #[test]
    fn other_shapes_are_untouched() {
        let list = Output::List(vec![1.23456]);
        assert_eq!(round_output(list.clone(), Some(1)), list);
        assert_eq!(round_output(Output::Int(5), Some(0)), Output::Int(5));
    }
}
