//! Command-line argument flattener
//!
//! Tokens are either flags (`-name`, with `.` separators embedded in
//! the name) or values. The values following a flag, up to the next
//! flag, belong to it; a flag with no value is a presence flag and
//! records the literal `"true"`.
//!
//! Every occurrence is numbered: the Nth value recorded for a flag's
//! path is written at `path.N` (counting across the whole argument
//! vector), even when the flag appears once. Whether that reads back
//! as a scalar or as an array is decided at bind time from the target
//! type, not here.

use std::collections::HashMap;

use crate::mapping::FlatMapping;
use crate::path::Path;

/// Flatten an argument vector (argv without the program name).
///
/// Positional tokens before the first flag carry no path and are
/// ignored.
pub fn flatten_args<I, S>(argv: I) -> FlatMapping
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = FlatMapping::new();
    let mut occurrences: HashMap<Path, usize> = HashMap::new();
    let mut current: Option<Path> = None;
    let mut values_for_current = 0usize;

    for token in argv {
        let token = token.as_ref();
        if is_flag(token) {
            if let Some(path) = current.take() {
                if values_for_current == 0 {
                    write_next(&mut out, &mut occurrences, path, "true");
                }
            }
            current = Some(Path::from_dotted(token.trim_start_matches('-')));
            values_for_current = 0;
        } else if let Some(path) = &current {
            write_next(&mut out, &mut occurrences, path.clone(), token);
            values_for_current += 1;
        }
    }

    if let Some(path) = current {
        if values_for_current == 0 {
            write_next(&mut out, &mut occurrences, path, "true");
        }
    }

    out
}

/// A flag starts with `-`; a leading `-` followed by a digit is a
/// negative number, which is a value.
fn is_flag(token: &str) -> bool {
    let name = token.trim_start_matches('-');
    token.starts_with('-')
        && !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

fn write_next(
    out: &mut FlatMapping,
    occurrences: &mut HashMap<Path, usize>,
    path: Path,
    value: &str,
) {
    let slot = occurrences.entry(path.clone()).or_insert(0);
    out.set(path.index(*slot), value);
    *slot += 1;
}
