//! Type descriptor definitions and their canonical rendering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::DescriptorError;

/// Column type family, independent of parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Int,
    Varchar,
    Char,
    Text,
    Date,
    Time,
    DateTime,
    Boolean,
    TinyInt,
    Float,
    Double,
    Decimal,
}

impl TypeFamily {
    /// Every family in catalogue order
    pub const ALL: [TypeFamily; 12] = [
        TypeFamily::Int,
        TypeFamily::Varchar,
        TypeFamily::Char,
        TypeFamily::Text,
        TypeFamily::Date,
        TypeFamily::Time,
        TypeFamily::DateTime,
        TypeFamily::Boolean,
        TypeFamily::TinyInt,
        TypeFamily::Float,
        TypeFamily::Double,
        TypeFamily::Decimal,
    ];

    /// Returns the upper-case family keyword
    pub fn name(&self) -> &'static str {
        match self {
            TypeFamily::Int => "INT",
            TypeFamily::Varchar => "VARCHAR",
            TypeFamily::Char => "CHAR",
            TypeFamily::Text => "TEXT",
            TypeFamily::Date => "DATE",
            TypeFamily::Time => "TIME",
            TypeFamily::DateTime => "DATETIME",
            TypeFamily::Boolean => "BOOLEAN",
            TypeFamily::TinyInt => "TINYINT",
            TypeFamily::Float => "FLOAT",
            TypeFamily::Double => "DOUBLE",
            TypeFamily::Decimal => "DECIMAL",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|f| f.name() == upper)
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column type with its parameters resolved.
///
/// Serialized as its canonical string, e.g. `"VARCHAR(255)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeDescriptor {
    Int { size: Option<u32> },
    Varchar { size: Option<u32> },
    Char { size: Option<u32> },
    Text,
    Date,
    Time,
    DateTime,
    Boolean,
    TinyInt,
    Float,
    Double,
    /// Precision and scale, both or neither
    Decimal { digits: Option<(u32, u32)> },
}

impl TypeDescriptor {
    pub fn int(size: Option<u32>) -> Self {
        TypeDescriptor::Int { size }
    }

    pub fn varchar(size: Option<u32>) -> Self {
        TypeDescriptor::Varchar { size }
    }

    pub fn char(size: Option<u32>) -> Self {
        TypeDescriptor::Char { size }
    }

    pub fn text() -> Self {
        TypeDescriptor::Text
    }

    pub fn date() -> Self {
        TypeDescriptor::Date
    }

    pub fn time() -> Self {
        TypeDescriptor::Time
    }

    pub fn datetime() -> Self {
        TypeDescriptor::DateTime
    }

    pub fn boolean() -> Self {
        TypeDescriptor::Boolean
    }

    pub fn tinyint() -> Self {
        TypeDescriptor::TinyInt
    }

    pub fn float() -> Self {
        TypeDescriptor::Float
    }

    pub fn double() -> Self {
        TypeDescriptor::Double
    }

    pub fn decimal(precision: u32, scale: u32) -> Self {
        TypeDescriptor::Decimal {
            digits: Some((precision, scale)),
        }
    }

    /// Returns the family this descriptor belongs to
    pub fn family(&self) -> TypeFamily {
        match self {
            TypeDescriptor::Int { .. } => TypeFamily::Int,
            TypeDescriptor::Varchar { .. } => TypeFamily::Varchar,
            TypeDescriptor::Char { .. } => TypeFamily::Char,
            TypeDescriptor::Text => TypeFamily::Text,
            TypeDescriptor::Date => TypeFamily::Date,
            TypeDescriptor::Time => TypeFamily::Time,
            TypeDescriptor::DateTime => TypeFamily::DateTime,
            TypeDescriptor::Boolean => TypeFamily::Boolean,
            TypeDescriptor::TinyInt => TypeFamily::TinyInt,
            TypeDescriptor::Float => TypeFamily::Float,
            TypeDescriptor::Double => TypeFamily::Double,
            TypeDescriptor::Decimal { .. } => TypeFamily::Decimal,
        }
    }

    /// Renders the canonical string form
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn from_parts(family: TypeFamily, params: &[u32]) -> Result<Self, DescriptorError> {
        let unexpected = || DescriptorError::UnexpectedParameters {
            family: family.name().to_string(),
            count: params.len(),
        };

        let descriptor = match (family, params) {
            (TypeFamily::Int, [] | [_]) => TypeDescriptor::Int {
                size: params.first().copied(),
            },
            (TypeFamily::Varchar, [] | [_]) => TypeDescriptor::Varchar {
                size: params.first().copied(),
            },
            (TypeFamily::Char, [] | [_]) => TypeDescriptor::Char {
                size: params.first().copied(),
            },
            (TypeFamily::Decimal, []) => TypeDescriptor::Decimal { digits: None },
            (TypeFamily::Decimal, [precision, scale]) => {
                if scale > precision {
                    return Err(unexpected());
                }
                TypeDescriptor::decimal(*precision, *scale)
            }
            (TypeFamily::Text, []) => TypeDescriptor::Text,
            (TypeFamily::Date, []) => TypeDescriptor::Date,
            (TypeFamily::Time, []) => TypeDescriptor::Time,
            (TypeFamily::DateTime, []) => TypeDescriptor::DateTime,
            (TypeFamily::Boolean, []) => TypeDescriptor::Boolean,
            (TypeFamily::TinyInt, []) => TypeDescriptor::TinyInt,
            (TypeFamily::Float, []) => TypeDescriptor::Float,
            (TypeFamily::Double, []) => TypeDescriptor::Double,
            _ => return Err(unexpected()),
        };

        Ok(descriptor)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family().name())?;
        match self {
            TypeDescriptor::Int { size: Some(n) }
            | TypeDescriptor::Varchar { size: Some(n) }
            | TypeDescriptor::Char { size: Some(n) } => write!(f, "({})", n),
            TypeDescriptor::Decimal {
                digits: Some((precision, scale)),
            } => write!(f, "({},{})", precision, scale),
            _ => Ok(()),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let (name, params) = match trimmed.find('(') {
            Some(open) => {
                let inner = trimmed[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| DescriptorError::MalformedParameters(trimmed.to_string()))?;
                (&trimmed[..open], parse_params(inner, trimmed)?)
            }
            None => (trimmed, Vec::new()),
        };

        let family = TypeFamily::from_name(name.trim())
            .ok_or_else(|| DescriptorError::UnknownType(trimmed.to_string()))?;

        Self::from_parts(family, &params)
    }
}

/// Parses a comma separated parameter list. `INT()` is the same as `INT`.
fn parse_params(inner: &str, whole: &str) -> Result<Vec<u32>, DescriptorError> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<u32>()
                .map_err(|_| DescriptorError::MalformedParameters(whole.to_string()))
        })
        .collect()
}

impl TryFrom<String> for TypeDescriptor {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeDescriptor> for String {
    fn from(descriptor: TypeDescriptor) -> Self {
        descriptor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(TypeDescriptor::int(None).render(), "INT");
        assert_eq!(TypeDescriptor::int(Some(10)).render(), "INT(10)");
        assert_eq!(TypeDescriptor::varchar(Some(255)).render(), "VARCHAR(255)");
        assert_eq!(TypeDescriptor::char(Some(3)).render(), "CHAR(3)");
        assert_eq!(TypeDescriptor::decimal(10, 2).render(), "DECIMAL(10,2)");
        assert_eq!(TypeDescriptor::text().render(), "TEXT");
        assert_eq!(TypeDescriptor::datetime().render(), "DATETIME");
    }

    #[test]
    fn test_parse_is_case_and_space_insensitive() {
        let parsed: TypeDescriptor = " varchar ( 255 ) ".parse().unwrap();
        assert_eq!(parsed, TypeDescriptor::varchar(Some(255)));

        let parsed: TypeDescriptor = "Decimal(10, 2)".parse().unwrap();
        assert_eq!(parsed, TypeDescriptor::decimal(10, 2));
    }

    #[test]
    fn test_empty_parens_mean_unsized() {
        let parsed: TypeDescriptor = "INT()".parse().unwrap();
        assert_eq!(parsed, TypeDescriptor::int(None));
        assert_eq!(parsed.render(), "INT");
    }

    #[test]
    fn test_every_family_parses_its_own_rendering() {
        for family in TypeFamily::ALL {
            let descriptor: TypeDescriptor = family.name().parse().unwrap();
            assert_eq!(descriptor.family(), family);
            assert_eq!(descriptor.render(), family.name());
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = "BLOB".parse::<TypeDescriptor>().unwrap_err();
        assert_eq!(err, DescriptorError::UnknownType("BLOB".into()));
    }

    #[test]
    fn test_bad_parameters_rejected() {
        assert!(matches!(
            "TEXT(10)".parse::<TypeDescriptor>(),
            Err(DescriptorError::UnexpectedParameters { .. })
        ));
        assert!(matches!(
            "DECIMAL(10)".parse::<TypeDescriptor>(),
            Err(DescriptorError::UnexpectedParameters { .. })
        ));
        assert!(matches!(
            "DECIMAL(2,10)".parse::<TypeDescriptor>(),
            Err(DescriptorError::UnexpectedParameters { .. })
        ));
        assert!(matches!(
            "VARCHAR(abc)".parse::<TypeDescriptor>(),
            Err(DescriptorError::MalformedParameters(_))
        ));
        assert!(matches!(
            "VARCHAR(255".parse::<TypeDescriptor>(),
            Err(DescriptorError::MalformedParameters(_))
        ));
    }

    #[test]
    fn test_serde_uses_rendered_string() {
        let json = serde_json::to_string(&TypeDescriptor::decimal(10, 2)).unwrap();
        assert_eq!(json, "\"DECIMAL(10,2)\"");

        let back: TypeDescriptor = serde_json::from_str("\"INT(10)\"").unwrap();
        assert_eq!(back, TypeDescriptor::int(Some(10)));

        assert!(serde_json::from_str::<TypeDescriptor>("\"GEOMETRY\"").is_err());
    }
}
