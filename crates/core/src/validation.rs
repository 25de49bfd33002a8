//! Field validators plugged into `#[derive(Validate)]` input structs, and
//! conversion of `validator` errors into a field -> messages map.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::content::{BlogCategory, BudgetRange, ProjectCategory, ProjectType};
use crate::slug::is_valid_slug;

/// Field name -> human-readable messages, ordered for stable output.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

fn member_of<T>(value: &str, code: &'static str) -> Result<(), ValidationError>
where
    T: FromStr<Err = crate::content::UnknownVariant>,
{
    value.parse::<T>().map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::Owned(e.to_string()));
        err
    })
}

pub fn project_category(value: &str) -> Result<(), ValidationError> {
    member_of::<ProjectCategory>(value, "project_category")
}

pub fn project_type(value: &str) -> Result<(), ValidationError> {
    member_of::<ProjectType>(value, "project_type")
}

pub fn budget_range(value: &str) -> Result<(), ValidationError> {
    member_of::<BudgetRange>(value, "budget_range")
}

/// At least one category, each a member of [`BlogCategory`].
pub fn blog_categories(values: &[String]) -> Result<(), ValidationError> {
    if values.is_empty() {
        let mut err = ValidationError::new("blog_categories");
        err.message = Some(Cow::Borrowed("At least one category is required"));
        return Err(err);
    }
    values
        .iter()
        .try_for_each(|v| member_of::<BlogCategory>(v, "blog_category"))
}

pub fn slug(value: &str) -> Result<(), ValidationError> {
    if is_valid_slug(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("slug");
    err.message = Some(Cow::Borrowed(
        "Slug must contain only lowercase letters, digits, and inner hyphens",
    ));
    Err(err)
}

/// `seo_meta` must be a JSON object (open key/value map).
pub fn json_object(value: &serde_json::Value) -> Result<(), ValidationError> {
    if value.is_object() {
        return Ok(());
    }
    let mut err = ValidationError::new("json_object");
    err.message = Some(Cow::Borrowed("Must be a JSON object"));
    Err(err)
}

/// Flatten `validator` errors into a field -> messages map.
///
/// Nested struct and list errors are keyed with dotted / indexed paths.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, None, &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let messages = out.entry(path).or_default();
                messages.extend(errs.iter().map(describe));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match &*err.code {
        "email" => "Must be a valid email address".to_string(),
        "url" => "Must be a valid URL".to_string(),
        "length" => {
            let min = err.params.get("min").and_then(|v| v.as_u64());
            let max = err.params.get("max").and_then(|v| v.as_u64());
            match (min, max) {
                (Some(min), Some(max)) => format!("Must be between {min} and {max} characters"),
                (Some(min), None) => format!("Must be at least {min} characters"),
                (None, Some(max)) => format!("Must be at most {max} characters"),
                (None, None) => "Invalid length".to_string(),
            }
        }
        other => format!("Invalid value ({other})"),
    }
}
