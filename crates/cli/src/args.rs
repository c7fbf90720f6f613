//! Positional argument handling: `<inventoryId> <quantity>`.

use std::ffi::OsString;

use thiserror::Error;

use stockcast_ai::PredictionRequest;
use stockcast_core::{InventoryId, Quantity};

/// Malformed invocation. The `Display` text is the `error` payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    #[error("Invalid number of arguments. Expected inventory_id and quantity.")]
    ArgumentCount { given: usize },

    #[error("Invalid argument types.")]
    ArgumentType { reason: String },
}

impl CliError {
    fn argument_type(reason: impl Into<String>) -> Self {
        Self::ArgumentType {
            reason: reason.into(),
        }
    }
}

/// Parse the arguments that follow the program name.
pub fn parse_args<I, A>(args: I) -> Result<PredictionRequest, CliError>
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let [id, quantity] = args.as_slice() else {
        return Err(CliError::ArgumentCount { given: args.len() });
    };

    let id = id
        .to_str()
        .ok_or_else(|| CliError::argument_type("inventory_id is not valid UTF-8"))?
        .parse::<InventoryId>()
        .map_err(|e| CliError::argument_type(e.to_string()))?;

    let quantity = quantity
        .to_str()
        .ok_or_else(|| CliError::argument_type("quantity is not valid UTF-8"))?
        .parse::<Quantity>()
        .map_err(|e| CliError::argument_type(e.to_string()))?;

    Ok(PredictionRequest::new(id, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_integer_id_and_numeric_quantity() {
        let req = parse_args(["42", "10.0"]).unwrap();
        assert_eq!(req.inventory_id, InventoryId::new(42));
        assert_eq!(req.quantity.value(), 10.0);

        let req = parse_args(["999", "5"]).unwrap();
        assert_eq!(req.quantity.value(), 5.0);
    }

    #[test]
    fn zero_and_negative_quantities_are_accepted() {
        assert_eq!(parse_args(["1", "0"]).unwrap().quantity.value(), 0.0);
        assert_eq!(parse_args(["1", "-12.5"]).unwrap().quantity.value(), -12.5);
    }

    #[test]
    fn wrong_argument_count() {
        for args in [vec![], vec!["42"], vec!["42", "1", "extra"]] {
            let given = args.len();
            assert_eq!(parse_args(args).unwrap_err(), CliError::ArgumentCount { given });
        }
    }

    #[test]
    fn wrong_argument_types() {
        for args in [["abc", "5"], ["4.2", "5"], ["42", "many"], ["42", "NaN"], ["", "1"]] {
            match parse_args(args) {
                Err(e @ CliError::ArgumentType { .. }) => {
                    assert_eq!(e.to_string(), "Invalid argument types.");
                }
                other => panic!("expected ArgumentType for {args:?}, got {other:?}"),
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_are_type_errors() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![0x34, 0xff]);
        match parse_args([bad, OsString::from("1")]) {
            Err(CliError::ArgumentType { reason }) => assert!(reason.contains("UTF-8")),
            other => panic!("expected ArgumentType, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn any_two_numeric_arguments_parse(id in any::<i64>(), qty in -1.0e9f64..1.0e9) {
            let req = parse_args([id.to_string(), qty.to_string()]).unwrap();
            prop_assert_eq!(req.inventory_id, InventoryId::new(id));
            prop_assert_eq!(req.quantity.value(), qty);
        }

        #[test]
        fn three_or_more_arguments_are_rejected(
            extra in prop::collection::vec("[0-9]{1,4}", 1..5),
        ) {
            let mut args = vec!["1".to_string(), "2".to_string()];
            args.extend(extra);
            let given = args.len();
            prop_assert_eq!(parse_args(args).unwrap_err(), CliError::ArgumentCount { given });
        }
    }
}
