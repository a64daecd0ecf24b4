use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tab {
    #[default]
    Alerts,
    Monitors,
    Datasources,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Alerts, Tab::Monitors, Tab::Datasources];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Alerts => "Alerts",
            Tab::Monitors => "Monitors",
            Tab::Datasources => "Datasources",
        }
    }
}

/// Ephemeral page state: what is collapsed, open or selected.
/// Not serializable and not part of saved searches. Collapsed facets and
/// groups are remembered per tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    collapsed_facets: BTreeSet<(Tab, String)>,
    collapsed_groups: BTreeSet<(Tab, String)>,
    open_popover: Option<String>,
    flyout: Option<String>,
    selected_rows: BTreeSet<String>,
}

impl ViewState {
    pub fn toggle_facet(&mut self, facet: &str) {
        toggle_keyed(&mut self.collapsed_facets, self.tab, facet);
    }

    pub fn is_facet_collapsed(&self, facet: &str) -> bool {
        self.collapsed_facets.contains(&(self.tab, facet.to_string()))
    }

    /// Group buckets start expanded
    pub fn toggle_group(&mut self, key: &str) {
        toggle_keyed(&mut self.collapsed_groups, self.tab, key);
    }

    pub fn is_group_expanded(&self, key: &str) -> bool {
        !self.collapsed_groups.contains(&(self.tab, key.to_string()))
    }

    /// Opening a popover closes whichever one was open
    pub fn toggle_popover(&mut self, name: &str) {
        if self.open_popover.as_deref() == Some(name) {
            self.open_popover = None;
        } else {
            self.open_popover = Some(name.to_string());
        }
    }

    pub fn close_popover(&mut self) {
        self.open_popover = None;
    }

    pub fn is_popover_open(&self, name: &str) -> bool {
        self.open_popover.as_deref() == Some(name)
    }

    pub fn open_flyout(&mut self, record_id: &str) {
        self.flyout = Some(record_id.to_string());
    }

    pub fn close_flyout(&mut self) {
        self.flyout = None;
    }

    pub fn flyout(&self) -> Option<&str> {
        self.flyout.as_deref()
    }

    pub fn toggle_row(&mut self, record_id: &str) {
        toggle(&mut self.selected_rows, record_id);
    }

    pub fn is_row_selected(&self, record_id: &str) -> bool {
        self.selected_rows.contains(record_id)
    }

    pub fn selected_rows(&self) -> impl Iterator<Item = &str> {
        self.selected_rows.iter().map(String::as_str)
    }

    pub fn clear_selection(&mut self) {
        self.selected_rows.clear();
    }

    /// Switching tabs drops selection, flyout and popovers of the old tab
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected_rows.clear();
            self.flyout = None;
            self.open_popover = None;
        }
    }
}

fn toggle_keyed(set: &mut BTreeSet<(Tab, String)>, tab: Tab, value: &str) {
    let key = (tab, value.to_string());
    if !set.remove(&key) {
        set.insert(key);
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
