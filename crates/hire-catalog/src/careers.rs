//! Public careers page settings

use crate::common::identifier;
use hire_schema::rules::{array, boolean, object, string};
use hire_schema::{EnumCatalog, Pattern, Result, Schema};

pub const UPDATE_CAREERS_PAGE_SETTINGS: &str = "updateCareersPageSettings";

/// `#rgb` or `#rrggbb`
const HEX_COLOR: &str = r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$";

pub fn schemas(_catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    let branding = object()
        .optional("primaryColor", string().pattern(Pattern::new(HEX_COLOR)?))
        .optional("secondaryColor", string().pattern(Pattern::new(HEX_COLOR)?))
        .optional("logo", string().url())
        .optional("bannerImage", string().url())
        .optional("companyDescription", string())
        // field name as stored by the careers page frontend
        .optional("cultura", array(string()));

    let custom_field = object()
        .required("name", string())
        .required("value", string());

    let display = object()
        .optional("showSalaryRange", boolean())
        .optional("showBenefits", boolean())
        .optional("showLocation", boolean())
        .optional("customFields", array(custom_field));

    let settings = Schema::builder(UPDATE_CAREERS_PAGE_SETTINGS)
        .body(
            object()
                .required("companyId", identifier("Company ID is required"))
                .optional("brandingSettings", branding)
                .optional("displaySettings", display),
        )
        .build()?;
    Ok(vec![settings])
}
