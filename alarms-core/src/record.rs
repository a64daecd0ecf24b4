use api_structs::{Alert, Labels, Rule};
use serde::{Deserialize, Serialize};

/// A record the page can facet, filter and search over.
pub trait FacetedRecord {
    /// The fixed (non label) facets of this record kind
    type Facet: Copy + Ord + std::fmt::Debug + 'static;

    const FACETS: &'static [Self::Facet];

    fn id(&self) -> &str;

    /// Values the record exhibits for `facet`. Most facets are single valued,
    /// empty strings are allowed and never become facet options.
    fn facet_values(&self, facet: Self::Facet) -> Vec<&str>;

    fn labels(&self) -> &Labels;

    /// Fields the free text query is matched against
    fn search_fields(&self) -> Vec<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertFacet {
    State,
    Severity,
    Backend,
    Datasource,
}

impl AlertFacet {
    pub fn title(&self) -> &'static str {
        match self {
            AlertFacet::State => "State",
            AlertFacet::Severity => "Severity",
            AlertFacet::Backend => "Backend",
            AlertFacet::Datasource => "Datasource",
        }
    }
}

impl FacetedRecord for Alert {
    type Facet = AlertFacet;

    const FACETS: &'static [AlertFacet] = &[
        AlertFacet::State,
        AlertFacet::Severity,
        AlertFacet::Backend,
        AlertFacet::Datasource,
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn facet_values(&self, facet: AlertFacet) -> Vec<&str> {
        match facet {
            AlertFacet::State => vec![self.state.as_str()],
            AlertFacet::Severity => vec![self.severity.as_str()],
            AlertFacet::Backend => vec![self.datasource_type.as_str()],
            AlertFacet::Datasource => vec![self.datasource_id.as_str()],
        }
    }

    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.message.as_str(),
            self.state.as_str(),
            self.severity.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleFacet {
    Status,
    Severity,
    MonitorType,
    Health,
    Backend,
    Datasource,
    /// Derived from `Rule::enabled`
    Enabled,
}

pub const ENABLED: &str = "enabled";
pub const DISABLED: &str = "disabled";

impl RuleFacet {
    pub fn title(&self) -> &'static str {
        match self {
            RuleFacet::Status => "Status",
            RuleFacet::Severity => "Severity",
            RuleFacet::MonitorType => "Type",
            RuleFacet::Health => "Health",
            RuleFacet::Backend => "Backend",
            RuleFacet::Datasource => "Datasource",
            RuleFacet::Enabled => "Enabled",
        }
    }
}

impl FacetedRecord for Rule {
    type Facet = RuleFacet;

    const FACETS: &'static [RuleFacet] = &[
        RuleFacet::Status,
        RuleFacet::Severity,
        RuleFacet::MonitorType,
        RuleFacet::Health,
        RuleFacet::Backend,
        RuleFacet::Datasource,
        RuleFacet::Enabled,
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn facet_values(&self, facet: RuleFacet) -> Vec<&str> {
        match facet {
            RuleFacet::Status => vec![self.status.as_str()],
            RuleFacet::Severity => vec![self.severity.as_str()],
            RuleFacet::MonitorType => vec![self.monitor_type.as_str()],
            RuleFacet::Health => vec![self.health_status.as_str()],
            RuleFacet::Backend => vec![self.datasource_type.as_str()],
            RuleFacet::Datasource => vec![self.datasource_id.as_str()],
            RuleFacet::Enabled => vec![if self.enabled { ENABLED } else { DISABLED }],
        }
    }

    fn labels(&self) -> &Labels {
        &self.labels
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.query.as_str()];
        if let Some(group) = &self.group {
            fields.push(group.as_str());
        }
        fields
    }
}
