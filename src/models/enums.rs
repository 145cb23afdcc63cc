use serde::{Deserialize, Serialize};

use super::DomainError;

/// Macro to generate a closed label enum with serde renames,
/// `as_str` + `labels` + `Display` + `std::str::FromStr`.
///
/// The wire label, the prompt label, and the parse label are the same
/// string, so an unrecognized value is always a typed error and never a
/// silently-accepted default.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            /// All labels of the closed set, in declaration order.
            pub const fn labels() -> &'static [&'static str] {
                &[$($s),+]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DomainError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Sex {
    Male => "Male",
    Female => "Female",
});

str_enum!(ChestPainType {
    TypicalAngina => "Typical Angina",
    AtypicalAngina => "Atypical Angina",
    NonAnginalPain => "Non-Anginal Pain",
    Asymptomatic => "Asymptomatic",
});

str_enum!(RestingEcg {
    Normal => "Normal",
    StAbnormality => "ST-T Wave Abnormality",
    LeftVentricularHypertrophy => "Left Ventricular Hypertrophy",
});

str_enum!(ExerciseAngina {
    Yes => "Yes",
    No => "No",
});

str_enum!(StSlope {
    Upsloping => "Upsloping",
    Flat => "Flat",
    Downsloping => "Downsloping",
});

str_enum!(RiskLevel {
    Low => "Low Risk",
    Moderate => "Moderate Risk",
    High => "High Risk",
});
