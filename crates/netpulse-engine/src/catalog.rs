//! Fixed enumeration of monitored services and regions.

use netpulse_common::models::{CellKey, Region, Service};

pub const DEFAULT_SERVICES: &[&str] = &[
    "Facebook",
    "Instagram",
    "WhatsApp",
    "Messenger",
    "Workplace",
    "Quest Store",
];

pub const DEFAULT_REGIONS: &[&str] = &["NA-East", "NA-West", "EU-Central", "EU-West", "APAC", "LATAM"];

/// Services and regions monitored by one engine. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    services: Vec<Service>,
    regions: Vec<Region>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            services: DEFAULT_SERVICES.iter().map(|s| Service::new(*s)).collect(),
            regions: DEFAULT_REGIONS.iter().map(|r| Region::new(*r)).collect(),
        }
    }
}

impl Catalog {
    /// Build a catalog from already-validated lists. Callers go through
    /// config resolution, which drops blanks and duplicates.
    pub(crate) fn new(services: Vec<Service>, regions: Vec<Region>) -> Self {
        Self { services, regions }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of cells in the cross-product.
    pub fn len(&self) -> usize {
        self.services.len() * self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &CellKey) -> bool {
        self.services.contains(&key.service) && self.regions.contains(&key.region)
    }

    /// Every cell, services outer and regions inner.
    pub fn cells(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.services.iter().flat_map(move |service| {
            self.regions.iter().map(move |region| CellKey {
                service: service.clone(),
                region: region.clone(),
            })
        })
    }

    /// Look up a service by name, ignoring ASCII case and treating `_` as a space.
    pub fn find_service(&self, name: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| loose_eq(s.as_str(), name))
    }

    /// Look up a region by name, ignoring ASCII case and treating `_` as a space.
    pub fn find_region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| loose_eq(r.as_str(), name))
    }
}

fn loose_eq(canonical: &str, input: &str) -> bool {
    canonical.len() == input.len()
        && canonical
            .bytes()
            .zip(input.bytes())
            .all(|(a, b)| a.eq_ignore_ascii_case(&if b == b'_' { b' ' } else { b }))
}
