//! Outcome externalization

use kvmarshal_core::Outcome;
use kvmarshal_host::Object;

/// `(code, message, file, line, in_doubt)`; file and line are `None` when no
/// location was recorded
pub fn outcome_to_object(outcome: &Outcome) -> Object {
    let (file, line) = match outcome.location() {
        Some(loc) => (Object::from(loc.file), Object::Int(loc.line as i128)),
        None => (Object::None, Object::None),
    };
    Object::Tuple(vec![
        Object::Int(outcome.status() as i128),
        Object::from(outcome.message()),
        file,
        line,
        Object::Bool(outcome.in_doubt()),
    ])
}
