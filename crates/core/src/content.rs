//! Closed enumerations used by projects, blog posts, and contact submissions.
//!
//! Values are stored as kebab-case `TEXT` and travel over the wire in the
//! same form. Each enum exposes `ALL`, `as_str`, and a `FromStr` impl so the
//! action layer can reject unknown values with a field-level message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} '{value}'. Valid values: {valid}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub valid: String,
}

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Comma-separated list of valid wire values, for error messages.
            pub fn valid_values() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                        valid: Self::valid_values(),
                    }),
                }
            }
        }
    };
}

closed_set! {
    /// Portfolio project category.
    ProjectCategory ("project category") {
        WebDevelopment => "web-development",
        MobileApp => "mobile-app",
        ECommerce => "e-commerce",
        Branding => "branding",
        DigitalMarketing => "digital-marketing",
    }
}

closed_set! {
    /// Blog post category. A post carries one or more.
    BlogCategory ("blog category") {
        WebDevelopment => "web-development",
        Design => "design",
        Marketing => "marketing",
        Seo => "seo",
        Business => "business",
        Technology => "technology",
    }
}

closed_set! {
    /// Kind of engagement a contact-form visitor is asking about.
    ProjectType ("project type") {
        Website => "website",
        WebApplication => "web-application",
        MobileApp => "mobile-app",
        ECommerce => "e-commerce",
        Branding => "branding",
        Seo => "seo",
        Other => "other",
    }
}

closed_set! {
    /// Budget bracket selected on the contact form.
    BudgetRange ("budget range") {
        Under5k => "under-5k",
        From5kTo10k => "5k-10k",
        From10kTo25k => "10k-25k",
        From25kTo50k => "25k-50k",
        Over50k => "50k-plus",
        NotSure => "not-sure",
    }
}

closed_set! {
    /// Review status of a contact submission. See [`crate::contact`].
    SubmissionStatus ("submission status") {
        Pending => "pending",
        Contacted => "contacted",
        Converted => "converted",
        Archived => "archived",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for category in ProjectCategory::ALL {
            assert_eq!(category.as_str().parse::<ProjectCategory>(), Ok(*category));
        }
        for range in BudgetRange::ALL {
            assert_eq!(range.as_str().parse::<BudgetRange>(), Ok(*range));
        }
    }

    #[test]
    fn unknown_value_lists_valid_set() {
        let err = "luxury".parse::<BudgetRange>().unwrap_err();
        assert_eq!(err.kind, "budget range");
        assert!(err.to_string().contains("under-5k"));
        assert!(err.to_string().contains("not-sure"));
    }

    #[test]
    fn serde_uses_wire_values() {
        let json = serde_json::to_string(&BudgetRange::From5kTo10k).unwrap();
        assert_eq!(json, "\"5k-10k\"");

        let parsed: ProjectType = serde_json::from_str("\"web-application\"").unwrap();
        assert_eq!(parsed, ProjectType::WebApplication);
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Website".parse::<ProjectType>().is_err());
    }
}
