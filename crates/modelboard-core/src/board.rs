//! Board - the single owned state container for catalog, view and status

use crate::{render, CardDescriptor, Catalog, Filter, ModelRecord, SourceStatus, ViewState};

#[derive(Debug, Clone, Default)]
pub struct Board {
    catalog: Catalog,
    view: ViewState,
    status: SourceStatus,
}

impl Board {
    pub fn new(catalog: Catalog, view: ViewState) -> Self {
        Self {
            catalog,
            view,
            status: SourceStatus::builtin(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(Catalog::builtin(), ViewState::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> &SourceStatus {
        &self.status
    }

    /// Accepts any value; see [`Filter::parse`]
    pub fn set_filter(&mut self, raw: &str) -> Vec<CardDescriptor> {
        let filter = Filter::parse(raw);
        if let Filter::Unrecognized(ref value) = filter {
            tracing::warn!("Unrecognized filter category '{}', no benchmarks selected", value);
        }
        self.view.set_filter(filter);
        self.render()
    }

    /// Fails on unknown keys and leaves the view untouched
    pub fn set_sort(&mut self, key: &str) -> crate::Result<Vec<CardDescriptor>> {
        self.view.set_sort(key)?;
        Ok(self.render())
    }

    pub fn render(&self) -> Vec<CardDescriptor> {
        render::render(&self.catalog, &self.view)
    }

    /// Swap in a whole new catalog. Nothing of the old one is kept.
    pub fn replace_catalog(&mut self, records: Vec<ModelRecord>) {
        tracing::info!(
            "Replacing catalog: {} -> {} models",
            self.catalog.len(),
            records.len()
        );
        self.catalog = Catalog::new(records);
    }

    pub fn set_status(&mut self, status: SourceStatus) {
        self.status = status;
    }
}
