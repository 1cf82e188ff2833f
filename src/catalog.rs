//! Plain vector-backed service catalog with linear search.

use crate::types::{Service, cmp_names, same_name};

/// The catalog operations undo needs. Names match case-insensitively.
pub trait ServiceStore {
    /// Remove the first entry with this name, returning its index.
    fn remove_by_name(&mut self, name: &str) -> Option<(usize, Service)>;
    /// Insert at `index`, clamped to the current length.
    fn insert_at(&mut self, service: Service, index: usize) -> usize;
    /// Swap the entry keyed by `name` for `replacement`, returning the old one.
    fn replace_by_name(&mut self, name: &str, replacement: Service) -> Option<Service>;
}

#[derive(Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append and return the index the service landed at.
    pub fn add(&mut self, service: Service) -> usize {
        self.services.push(service);
        self.services.len() - 1
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|service| same_name(&service.name, name))
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.services
            .iter()
            .position(|service| same_name(&service.name, name))
    }

    /// Case-insensitive substring match on name, description or category.
    pub fn search(&self, keyword: &str) -> Vec<&Service> {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.services
            .iter()
            .filter(|service| {
                [&service.name, &service.description, &service.category]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn sort_by_name(&mut self) {
        self.services.sort_by(|a, b| cmp_names(&a.name, &b.name));
    }

    pub fn to_vec(&self) -> Vec<Service> {
        self.services.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> + '_ {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceStore for ServiceCatalog {
    fn remove_by_name(&mut self, name: &str) -> Option<(usize, Service)> {
        let index = self.index_of(name)?;
        Some((index, self.services.remove(index)))
    }

    fn insert_at(&mut self, service: Service, index: usize) -> usize {
        let index = index.min(self.services.len());
        self.services.insert(index, service);
        index
    }

    fn replace_by_name(&mut self, name: &str, replacement: Service) -> Option<Service> {
        let index = self.index_of(name)?;
        Some(std::mem::replace(&mut self.services[index], replacement))
    }
}
