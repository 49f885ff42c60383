//! Companies and their members

use crate::common::identifier;
use hire_schema::rules::{array, enumeration, object, one_of, string};
use hire_schema::{EnumCatalog, Pattern, Result, Schema};

pub const CREATE_COMPANY: &str = "createCompany";
pub const UPDATE_COMPANY: &str = "updateCompany";
pub const ADD_COMPANY_MEMBER: &str = "addCompanyMember";
pub const GET_COMPANY: &str = "getCompany";

const COMPANY_NAME: &str = r"^[a-zA-Z0-9\s&_.-]+$";
const E164_PHONE: &str = r"^\+?[1-9]\d{1,14}$";
const POSTAL_CODE: &str = r"^[A-Z0-9\s-]{3,10}$";

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    let create = create_company()?;
    let update = create.partial(UPDATE_COMPANY);
    Ok(vec![create, update, add_company_member(catalog)?, get_company()?])
}

fn create_company() -> Result<Schema> {
    let location = object()
        .optional(
            "address",
            string().min_length(5).message("Address must be at least 5 characters"),
        )
        .optional(
            "city",
            string().min_length(2).message("City must be at least 2 characters"),
        )
        .required(
            "country",
            string().length(2).message("Country must be a 2-letter ISO code"),
        )
        .optional(
            "postalCode",
            string()
                .pattern(Pattern::new(POSTAL_CODE)?)
                .message("Invalid postal code format"),
        );

    let department = string()
        .min_length(2)
        .message("Department name must be at least 2 characters")
        .max_length(50)
        .message("Department name must not exceed 50 characters");

    Schema::builder(CREATE_COMPANY)
        .body(
            object()
                .required(
                    "name",
                    string()
                        .min_length(2)
                        .message("Company name must be at least 2 characters")
                        .max_length(100)
                        .message("Company name must not exceed 100 characters")
                        .pattern(Pattern::new(COMPANY_NAME)?)
                        .message("Company name contains invalid characters"),
                )
                .optional(
                    "website",
                    string()
                        .url()
                        .message("Invalid website URL format")
                        .pattern(Pattern::new("^https?://")?)
                        .message("Website must start with http:// or https://"),
                )
                .optional(
                    "phoneNumber",
                    string()
                        .pattern(Pattern::new(E164_PHONE)?)
                        .message("Invalid phone number format. Must follow E.164 format"),
                )
                .optional(
                    "description",
                    string()
                        .min_length(10)
                        .message("Description must be at least 10 characters")
                        .max_length(1000)
                        .message("Description must not exceed 1000 characters"),
                )
                .optional(
                    "departments",
                    array(department)
                        .min_items(1)
                        .message("At least one department is required")
                        .max_items(20)
                        .message("Maximum 20 departments allowed"),
                )
                .optional(
                    "industry",
                    string()
                        .min_length(2)
                        .message("Industry must be at least 2 characters")
                        .max_length(50)
                        .message("Industry must not exceed 50 characters"),
                )
                .optional(
                    "size",
                    one_of(["1-10", "11-50", "51-200", "201-500", "501-1000", "1001-5000", "5000+"]),
                )
                .optional("location", location),
        )
        .build()
}

fn add_company_member(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(ADD_COMPANY_MEMBER)
        .params(object().required("companyId", identifier("Company ID is required")))
        .body(
            object()
                .required("userId", identifier("User ID is required"))
                .required("role", enumeration(catalog.require("CompanyMemberRole")?)),
        )
        .build()
}

fn get_company() -> Result<Schema> {
    Schema::builder(GET_COMPANY)
        .params(object().required("id", identifier("Company ID is required")))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_patterns() {
        let name = Pattern::new(COMPANY_NAME).unwrap();
        assert!(name.is_match("Smith & Sons Co."));
        assert!(!name.is_match("Acme <Corp>"));

        let phone = Pattern::new(E164_PHONE).unwrap();
        assert!(phone.is_match("+33612345678"));
        assert!(!phone.is_match("0612345678"));

        let postal = Pattern::new(POSTAL_CODE).unwrap();
        assert!(postal.is_match("SW1A 1AA"));
        assert!(postal.is_match("75001"));
        assert!(!postal.is_match("ab"));
    }
}
