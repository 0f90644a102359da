use std::collections::HashSet;

use crate::errors::BookingError;
use crate::models::{Service, ServiceCategory};

/// Fixed table of bookable services, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self {
            services: vec![
                Service::new("doctor", 30, 100, ServiceCategory::Medical),
                Service::new("dentist", 45, 150, ServiceCategory::Medical),
                Service::new("therapy", 60, 120, ServiceCategory::Wellness),
                Service::new("consultation", 30, 80, ServiceCategory::Professional),
                Service::new("massage", 60, 90, ServiceCategory::Wellness),
                Service::new("checkup", 20, 60, ServiceCategory::Medical),
            ],
        }
    }
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(services.len());

        for mut service in services {
            service.name = service.name.trim().to_lowercase();
            if service.name.is_empty() {
                anyhow::bail!("service name must not be empty");
            }
            if service.duration_minutes == 0 {
                anyhow::bail!("service {} must have a positive duration", service.name);
            }
            if !seen.insert(service.name.clone()) {
                anyhow::bail!("duplicate service: {}", service.name);
            }
            normalized.push(service);
        }

        let catalog = Self {
            services: normalized,
        };
        if catalog.is_empty() {
            anyhow::bail!("service catalog must not be empty");
        }
        Ok(catalog)
    }

    /// Loads a catalog from a JSON array of services.
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let services: Vec<Service> = serde_json::from_str(s)?;
        Self::new(services)
    }

    pub fn lookup(&self, name: &str) -> Result<&Service, BookingError> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| BookingError::UnknownService(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = ServiceCatalog::default();
        assert_eq!(
            catalog.names(),
            vec!["doctor", "dentist", "therapy", "consultation", "massage", "checkup"]
        );
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_lookup_known_service() {
        let catalog = ServiceCatalog::default();
        let dentist = catalog.lookup("dentist").unwrap();
        assert_eq!(dentist.duration_minutes, 45);
        assert_eq!(dentist.price, 150);
        assert_eq!(dentist.category, ServiceCategory::Medical);
    }

    #[test]
    fn test_lookup_unknown_service() {
        let catalog = ServiceCatalog::default();
        assert_eq!(
            catalog.lookup("haircut"),
            Err(BookingError::UnknownService("haircut".to_string()))
        );
    }

    #[test]
    fn test_from_json_normalizes_names() {
        let json = r#"[{"name":"  Physical Therapy ","duration_minutes":50,"price":110,"category":"wellness"}]"#;
        let catalog = ServiceCatalog::from_json(json).unwrap();
        assert_eq!(catalog.names(), vec!["physical therapy"]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"[
            {"name":"doctor","duration_minutes":30,"price":100,"category":"medical"},
            {"name":"Doctor","duration_minutes":20,"price":90,"category":"medical"}
        ]"#;
        assert!(ServiceCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_zero_duration() {
        let json = r#"[{"name":"doctor","duration_minutes":0,"price":100,"category":"medical"}]"#;
        assert!(ServiceCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let json = r#"[{"name":"yoga","duration_minutes":60,"price":40,"category":"sport"}]"#;
        assert!(ServiceCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_empty() {
        assert!(ServiceCatalog::new(Vec::new()).is_err());
        assert!(ServiceCatalog::from_json("[]").is_err());
        assert!(ServiceCatalog::from_json("not json").is_err());
    }
}
