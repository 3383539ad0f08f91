//! # Supplier Verification
//!
//! Seeded supplier directory and the risk scoring rules behind the
//! verification report. Lookup is case-insensitive and tolerates partial
//! company names in both directions.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Contact details for a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub website: String,
}

/// A verified (or pending) supplier record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub company_name: String,
    pub registration_status: String,
    pub business_license: String,
    pub years_in_business: u32,
    pub location: String,
    pub main_products: String,
    pub certifications: Vec<String>,
    pub risk_level: String,
    pub verification_score: u32,
    pub contact: ContactInfo,
}

impl SupplierRecord {
    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.verification_score)
    }
}

/// Recommendation tier derived from the verification score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    /// Score 85 and above
    Recommended,
    /// Score 70 to 84
    Caution,
    /// Score below 70
    HighRisk,
}

impl RiskBand {
    /// Step function over the score; boundaries at 85 and 70 fall in the
    /// upper band.
    pub fn from_score(score: u32) -> Self {
        if score >= 85 {
            RiskBand::Recommended
        } else if score >= 70 {
            RiskBand::Caution
        } else {
            RiskBand::HighRisk
        }
    }
}

/// Shared supplier directory keyed by lowercased short name
pub struct SupplierDirectory {
    suppliers: RwLock<HashMap<String, SupplierRecord>>,
}

impl SupplierDirectory {
    pub fn new() -> Self {
        Self {
            suppliers: RwLock::new(HashMap::new()),
        }
    }

    /// Directory preloaded with the three demonstration suppliers
    pub fn with_seed_data() -> Self {
        let directory = Self::new();

        directory.insert(
            "shenzhen audio tech co",
            SupplierRecord {
                company_name: "Shenzhen Audio Tech Co., Ltd".to_string(),
                registration_status: "✅ Verified".to_string(),
                business_license: "91440300MA5DC9XU8K".to_string(),
                years_in_business: 8,
                location: "Shenzhen, Guangdong Province".to_string(),
                main_products: "Audio equipment, headphones, speakers".to_string(),
                certifications: vec![
                    "ISO 9001".to_string(),
                    "CE".to_string(),
                    "FCC".to_string(),
                    "RoHS".to_string(),
                ],
                risk_level: "🟢 Low Risk".to_string(),
                verification_score: 92,
                contact: ContactInfo {
                    email: "sales@szaudiotech.com".to_string(),
                    phone: "+86-755-8888-9999".to_string(),
                    website: "www.szaudiotech.com".to_string(),
                },
            },
        );

        directory.insert(
            "guangzhou cable manufacturing",
            SupplierRecord {
                company_name: "Guangzhou Cable Manufacturing Ltd".to_string(),
                registration_status: "✅ Verified".to_string(),
                business_license: "91440101MA5EF2RT7P".to_string(),
                years_in_business: 12,
                location: "Guangzhou, Guangdong Province".to_string(),
                main_products: "USB cables, charging cables, data cables".to_string(),
                certifications: vec![
                    "ISO 9001".to_string(),
                    "CE".to_string(),
                    "UL".to_string(),
                    "MFi".to_string(),
                ],
                risk_level: "🟢 Low Risk".to_string(),
                verification_score: 88,
                contact: ContactInfo {
                    email: "info@gzcable.com".to_string(),
                    phone: "+86-20-1234-5678".to_string(),
                    website: "www.gzcable.com".to_string(),
                },
            },
        );

        directory.insert(
            "dongguan plastic industries",
            SupplierRecord {
                company_name: "Dongguan Plastic Industries Co.".to_string(),
                registration_status: "⚠️ Pending Verification".to_string(),
                business_license: "91441900MA4WK8XL2N".to_string(),
                years_in_business: 5,
                location: "Dongguan, Guangdong Province".to_string(),
                main_products: "Phone cases, plastic accessories".to_string(),
                certifications: vec!["ISO 9001".to_string(), "CE".to_string()],
                risk_level: "🟡 Medium Risk".to_string(),
                verification_score: 75,
                contact: ContactInfo {
                    email: "sales@dgplastic.cn".to_string(),
                    phone: "+86-769-8765-4321".to_string(),
                    website: "www.dgplastic.cn".to_string(),
                },
            },
        );

        directory
    }

    fn insert(&self, key: &str, record: SupplierRecord) {
        self.suppliers.write().insert(key.to_string(), record);
    }

    /// Find a supplier by company name. Exact match on the lowercased name
    /// wins; otherwise a substring match in either direction resolves, so
    /// both "Shenzhen Audio" and "shenzhen audio tech co ltd office" find
    /// the same record.
    pub fn verify(&self, company_name: &str) -> Option<SupplierRecord> {
        let query = company_name.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let suppliers = self.suppliers.read();

        if let Some(record) = suppliers.get(&query) {
            return Some(record.clone());
        }

        suppliers
            .iter()
            .find(|(key, _)| query.contains(key.as_str()) || key.contains(&query))
            .map(|(_, record)| record.clone())
    }

    pub fn len(&self) -> usize {
        self.suppliers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.read().is_empty()
    }
}

impl Default for SupplierDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_substring_tolerant() {
        let directory = SupplierDirectory::with_seed_data();

        let partial = directory.verify("Shenzhen Audio").expect("partial match");
        let longer = directory
            .verify("shenzhen audio tech co ltd")
            .expect("superstring match");
        assert_eq!(partial.company_name, longer.company_name);
    }

    #[test]
    fn unknown_supplier_not_found() {
        let directory = SupplierDirectory::with_seed_data();
        assert!(directory.verify("unknown co").is_none());
        assert!(directory.verify("").is_none());
    }

    #[test]
    fn risk_band_boundaries_are_inclusive_upward() {
        assert_eq!(RiskBand::from_score(92), RiskBand::Recommended);
        assert_eq!(RiskBand::from_score(85), RiskBand::Recommended);
        assert_eq!(RiskBand::from_score(84), RiskBand::Caution);
        assert_eq!(RiskBand::from_score(75), RiskBand::Caution);
        assert_eq!(RiskBand::from_score(70), RiskBand::Caution);
        assert_eq!(RiskBand::from_score(69), RiskBand::HighRisk);
        assert_eq!(RiskBand::from_score(50), RiskBand::HighRisk);
    }

    #[test]
    fn seeded_scores_map_to_expected_bands() {
        let directory = SupplierDirectory::with_seed_data();
        let audio = directory.verify("shenzhen audio tech co").expect("seeded");
        let plastic = directory
            .verify("dongguan plastic industries")
            .expect("seeded");

        assert_eq!(audio.risk_band(), RiskBand::Recommended);
        assert_eq!(plastic.risk_band(), RiskBand::Caution);
    }
}
