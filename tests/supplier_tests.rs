//! Integration tests for supplier verification lookup and risk banding

use buyerchina_bot::suppliers::{RiskBand, SupplierDirectory};

#[test]
fn test_exact_match_resolves() {
    let directory = SupplierDirectory::with_seed_data();
    let supplier = directory
        .verify("shenzhen audio tech co")
        .expect("exact match");
    assert_eq!(supplier.company_name, "Shenzhen Audio Tech Co., Ltd");
}

#[test]
fn test_partial_and_superstring_queries_resolve_to_same_record() {
    let directory = SupplierDirectory::with_seed_data();

    let partial = directory.verify("Shenzhen Audio").expect("partial match");
    let superstring = directory
        .verify("shenzhen audio tech co ltd, floor 3")
        .expect("superstring match");

    assert_eq!(partial.company_name, superstring.company_name);
}

#[test]
fn test_case_insensitive_lookup() {
    let directory = SupplierDirectory::with_seed_data();
    assert!(directory.verify("GUANGZHOU CABLE MANUFACTURING").is_some());
    assert!(directory.verify("  Dongguan Plastic  ").is_some());
}

#[test]
fn test_unknown_supplier_not_found() {
    let directory = SupplierDirectory::with_seed_data();
    assert!(directory.verify("unknown co").is_none());
}

#[test]
fn test_risk_band_step_function() {
    assert_eq!(RiskBand::from_score(92), RiskBand::Recommended);
    assert_eq!(RiskBand::from_score(75), RiskBand::Caution);
    assert_eq!(RiskBand::from_score(50), RiskBand::HighRisk);

    // Both thresholds are inclusive on the upper branch.
    assert_eq!(RiskBand::from_score(85), RiskBand::Recommended);
    assert_eq!(RiskBand::from_score(84), RiskBand::Caution);
    assert_eq!(RiskBand::from_score(70), RiskBand::Caution);
    assert_eq!(RiskBand::from_score(69), RiskBand::HighRisk);
}

#[test]
fn test_seeded_directory_has_three_suppliers() {
    let directory = SupplierDirectory::with_seed_data();
    assert_eq!(directory.len(), 3);
}
