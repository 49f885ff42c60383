//! Registration, login and user profiles

use crate::common::{self, identifier};
use hire_schema::rules::{enumeration, object, string};
use hire_schema::{EnumCatalog, Result, Schema, StringRule};

pub const REGISTER: &str = "register";
pub const LOGIN: &str = "login";
pub const UPDATE_PROFILE: &str = "updateProfile";
pub const CHANGE_PASSWORD: &str = "changePassword";
pub const GET_USER: &str = "getUser";
pub const LIST_USERS: &str = "listUsers";

pub const MIN_PASSWORD_LENGTH: usize = 8;

fn email() -> StringRule {
    string().email().message("Invalid email address")
}

pub fn schemas(catalog: &EnumCatalog) -> Result<Vec<Schema>> {
    Ok(vec![
        register(catalog)?,
        login()?,
        update_profile()?,
        change_password()?,
        get_user()?,
        list_users()?,
    ])
}

fn register(catalog: &EnumCatalog) -> Result<Schema> {
    Schema::builder(REGISTER)
        .body(
            object()
                .required("email", email())
                .required(
                    "password",
                    string()
                        .min_length(MIN_PASSWORD_LENGTH)
                        .message("Password must be at least 8 characters long"),
                )
                .required("firstName", identifier("First name is required"))
                .required("lastName", identifier("Last name is required"))
                .optional("role", enumeration(catalog.require("UserRole")?)),
        )
        .build()
}

fn login() -> Result<Schema> {
    Schema::builder(LOGIN)
        .body(
            object()
                .required("email", email())
                .required("password", identifier("Password is required")),
        )
        .build()
}

fn update_profile() -> Result<Schema> {
    Schema::builder(UPDATE_PROFILE)
        .body(
            object()
                .optional("firstName", identifier("First name is required"))
                .optional("lastName", identifier("Last name is required"))
                .optional("jobTitle", string())
                .optional("departmentName", string()),
        )
        .build()
}

fn change_password() -> Result<Schema> {
    Schema::builder(CHANGE_PASSWORD)
        .body(
            object()
                .required("oldPassword", identifier("Old password is required"))
                .required(
                    "newPassword",
                    string()
                        .min_length(MIN_PASSWORD_LENGTH)
                        .message("New password must be at least 8 characters long"),
                ),
        )
        .build()
}

fn get_user() -> Result<Schema> {
    Schema::builder(GET_USER)
        .params(object().required("id", identifier("User ID is required")))
        .build()
}

fn list_users() -> Result<Schema> {
    Schema::builder(LIST_USERS)
        .query(common::pagination()?)
        .build()
}
