// Declared field types, parsed once at the descriptor boundary.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    String,
    Integer,
    Decimal,
    Number,
    Map,
    Array,
    Boolean,
    /// Any other non-empty name. Filtered like a scalar, never validated.
    Other(String),
}

impl TypeKind {
    /// Case-insensitive parse; unknown names are kept verbatim as `Other`.
    pub fn parse(name: &str) -> Self {
        const KNOWN: [(&str, TypeKind); 7] = [
            ("string", TypeKind::String),
            ("integer", TypeKind::Integer),
            ("decimal", TypeKind::Decimal),
            ("number", TypeKind::Number),
            ("map", TypeKind::Map),
            ("array", TypeKind::Array),
            ("boolean", TypeKind::Boolean),
        ];
        KNOWN
            .into_iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, kind)| kind)
            .unwrap_or_else(|| TypeKind::Other(name.to_string()))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeKind::Integer | TypeKind::Decimal | TypeKind::Number)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, TypeKind::Map | TypeKind::Array)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeKind::String => "string",
            TypeKind::Integer => "integer",
            TypeKind::Decimal => "decimal",
            TypeKind::Number => "number",
            TypeKind::Map => "map",
            TypeKind::Array => "array",
            TypeKind::Boolean => "boolean",
            TypeKind::Other(name) => name,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(TypeKind::parse("MAP"), TypeKind::Map);
        assert_eq!(TypeKind::parse("Integer"), TypeKind::Integer);
        assert_eq!(TypeKind::parse("boolean"), TypeKind::Boolean);
    }

    #[test]
    fn unknown_names_are_kept() {
        let kind = TypeKind::parse("Date");
        assert_eq!(kind, TypeKind::Other("Date".into()));
        assert_eq!(kind.to_string(), "Date");
        assert!(!kind.is_numeric());
        assert!(!kind.is_container());
    }
}
