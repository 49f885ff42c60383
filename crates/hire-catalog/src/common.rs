//! Building blocks shared by several domains

use hire_schema::rules::{literal, object, string};
use hire_schema::{EnumCatalog, Error, FieldRule, ObjectRule, Pattern, Result, StringRule, Transform};

/// `HH:MM`, 24-hour clock
pub(crate) const CLOCK_TIME: &str = r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$";

/// IANA zone name such as `Europe/Paris`
pub(crate) const TIME_ZONE: &str = r"^[A-Za-z]+/[A-Za-z_]+$";

/// Titles of meetings and job offers: letters, digits, spaces, `_` and `-`
pub(crate) const TITLE: &str = r"^[A-Za-z0-9_\s-]+$";

const DIGITS: &str = r"^\d+$";

/// Non-empty identifier, reporting `message` for an empty string
pub(crate) fn identifier(message: &str) -> StringRule {
    string().min_length(1).message(message)
}

pub(crate) fn pattern(source: &str) -> Result<StringRule> {
    Ok(string().pattern(Pattern::new(source)?))
}

/// Decimal query parameter, converted to a number once it matched
pub(crate) fn numeric_query() -> Result<StringRule> {
    Ok(pattern(DIGITS)?.transform(Transform::ToNumber))
}

/// Query flag: `"true"` becomes `true`, anything else `false`
pub(crate) fn query_flag() -> StringRule {
    string().transform(Transform::ToBool)
}

/// Optional `page` and `limit` of list endpoints
pub(crate) fn pagination() -> Result<ObjectRule> {
    Ok(object()
        .optional("page", numeric_query()?)
        .optional("limit", numeric_query()?))
}

/// Literal that must also be a token of the catalog enumeration `set`
pub(crate) fn member(catalog: &EnumCatalog, set: &str, token: &str) -> Result<FieldRule> {
    if catalog.require(set)?.contains(token) {
        Ok(literal(token))
    } else {
        Err(Error::InvalidEnum {
            location: format!("{set}.{token}"),
            reason: format!("'{token}' is not a token of {set}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_checks_catalog() {
        let catalog = EnumCatalog::builtin();
        assert_eq!(
            member(&catalog, "IntegrationType", "ATS").unwrap(),
            literal("ATS")
        );
        assert!(matches!(
            member(&catalog, "IntegrationType", "CRM"),
            Err(Error::InvalidEnum { .. })
        ));
        assert!(matches!(
            member(&EnumCatalog::new(), "IntegrationType", "ATS"),
            Err(Error::UnknownEnum(_))
        ));
    }

    #[test]
    fn test_shared_patterns_compile() {
        for source in [CLOCK_TIME, TIME_ZONE, TITLE, DIGITS] {
            assert!(Pattern::new(source).is_ok(), "{source}");
        }
        let title = Pattern::new(TITLE).unwrap();
        assert!(title.is_match("Backend Engineer - Payments"));
        assert!(!title.is_match("Backend <Engineer>"));
    }
}
