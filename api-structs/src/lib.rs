use std::collections::BTreeMap;

pub use alert::{Alert, AlertState};
pub use datasource::{Datasource, DatasourceType};
pub use rule::{HealthStatus, MonitorType, Rule, RuleStatus};

pub type DatasourceId = String;
/// Label and annotation maps, ordered by key so rendering is stable
pub type Labels = BTreeMap<String, String>;

/// Declares a closed enum that travels over the wire as a lowercase string.
/// The wire string doubles as the facet value used by the filter engine.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod alert;
pub mod datasource;
pub mod rule;
pub mod time_conversion;
pub mod ui;

wire_enum! {
    /// Shared by alerts and the rules that raise them
    Severity {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
        Info => "info",
    }
}

#[cfg(test)]
mod tests {
    use super::Severity;
    use std::str::FromStr;

    #[test]
    fn severity_wire_strings_round_trip_through_from_str() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_str(severity.as_str()), Ok(*severity));
        }
        assert_eq!(Severity::from_str("warning"), Err(()));
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
