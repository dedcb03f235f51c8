use crate::model::{Record, Value};
use crate::parser::{AnonymousLeaf, AnonymousOption, ParseError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type Outcome = Result<Box<dyn Value>, ParseError>;

/// Resolve the options against the tokens, irrespective of the token order.
///
/// Each token is claimed by the first option (in declaration order) which matches it.
/// An option already claimed ignores any later token.
/// A token which no option matches fails the whole parse.
pub(crate) fn resolve_options(
    options: &[&dyn AnonymousOption],
    tokens: &[&str],
) -> Result<Record, ParseError> {
    let mut slots: Vec<Option<Outcome>> = options.iter().map(|_| None).collect();

    for token in tokens {
        let claim = options
            .iter()
            .enumerate()
            .find_map(|(index, option)| option.matches(token).map(|text| (index, text)));

        match claim {
            Some((index, text)) => {
                if slots[index].is_some() {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Ignoring '{token}', '{}' is already resolved.", options[index].field());
                    }
                } else {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Token '{token}' claimed by '{}'.", options[index].field());
                    }

                    slots[index].replace(options[index].resolve(text));
                }
            }
            None => {
                return Err(ParseError::UnrecognizedArgument {
                    token: token.to_string(),
                });
            }
        }
    }

    let mut outcomes: Vec<(&str, Outcome)> = Vec::with_capacity(options.len());

    for (option, slot) in options.iter().zip(slots) {
        match slot {
            Some(outcome) => outcomes.push((option.field(), outcome)),
            None => {
                // Options without a default fail here, before any resolved error propagates.
                let value = option.resolve_absent()?;

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Option '{}' backfilled by its default.", option.field());
                }

                outcomes.push((option.field(), Ok(value)));
            }
        }
    }

    let mut record = Record::default();

    for (field, outcome) in outcomes {
        record.insert(field, outcome?);
    }

    Ok(record)
}

/// Resolve the arguments against the tokens by position.
pub(crate) fn resolve_arguments(
    arguments: &[&dyn AnonymousLeaf],
    tokens: &[&str],
) -> Result<Record, ParseError> {
    if tokens.len() > arguments.len() {
        return Err(ParseError::TooManyArguments {
            provided: tokens.len(),
            expected: arguments.len(),
        });
    }

    let mut record = Record::default();

    for (index, argument) in arguments.iter().enumerate() {
        let value = match tokens.get(index) {
            Some(token) => argument.resolve(token)?,
            None => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Argument '{}' backfilled by its default.", argument.field());
                }

                argument.resolve_absent()?
            }
        };

        record.insert(argument.field(), value);
    }

    Ok(record)
}
