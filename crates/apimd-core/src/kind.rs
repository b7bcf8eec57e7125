//! Member classification by identifier prefix.

/// Kind of a documented member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Type,
    Constructor,
    Method,
    Property,
    Constant,
    Unsupported,
}

/// Member segment that marks a constructor (`M:Acme.Widget.#ctor`).
const CONSTRUCTOR_SEGMENT: &str = "#ctor";

/// Classify an entry identifier by its two-character scheme prefix.
///
/// `T:` types, `M:` methods (constructors when the member segment is
/// `#ctor`), `P:` properties and `F:` fields. Everything else, including
/// events, namespaces and compiler error entries, is unsupported.
#[must_use]
pub fn classify(identifier: &str) -> Kind {
    let Some((prefix, rest)) = identifier.split_at_checked(2) else {
        return Kind::Unsupported;
    };
    match prefix {
        "T:" => Kind::Type,
        "M:" if is_constructor(rest) => Kind::Constructor,
        "M:" => Kind::Method,
        "P:" => Kind::Property,
        "F:" => Kind::Constant,
        _ => Kind::Unsupported,
    }
}

fn is_constructor(path: &str) -> bool {
    let path = path.split_once('(').map_or(path, |(head, _)| head);
    path.rsplit('.').next() == Some(CONSTRUCTOR_SEGMENT)
}
