//! Phase 1: vendor master records.

use chrono::Duration;
use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::{fixed_ratio_pool, GenContext};
use crate::models::{RiskBand, Vendor, VendorStatus};

const DOMESTIC_PROBABILITY: f64 = 0.7;
const ONBOARDING_WINDOW_DAYS: i64 = 180;

/// Exact global status ratio at any N (15:3:2 means 75%/15%/10%).
const STATUS_RATIO: [(VendorStatus, u32); 3] = [
    (VendorStatus::Approved, 15),
    (VendorStatus::Pending, 3),
    (VendorStatus::Rejected, 2),
];

const RISK_RATIO: [(RiskBand, u32); 3] = [
    (RiskBand::Low, 12),
    (RiskBand::Medium, 6),
    (RiskBand::High, 2),
];

const COMPANY_SUFFIXES: [&str; 10] = [
    "Pvt Ltd",
    "Private Limited",
    "LLP",
    "Limited",
    "Solutions",
    "Technologies",
    "Enterprises",
    "Corporation",
    "Industries",
    "Services",
];

const INDUSTRIES: [&str; 12] = [
    "IT Services",
    "Manufacturing",
    "Logistics",
    "Consulting",
    "Telecommunications",
    "Healthcare",
    "Construction",
    "Retail",
    "Financial Services",
    "Education",
    "Automotive",
    "Pharmaceuticals",
];

const INDIAN_STATES: [&str; 10] = [
    "Maharashtra",
    "Karnataka",
    "Tamil Nadu",
    "Delhi",
    "Gujarat",
    "West Bengal",
    "Telangana",
    "Rajasthan",
    "Uttar Pradesh",
    "Kerala",
];

/// (country, ISO code used in SWIFT synthesis)
const FOREIGN_COUNTRIES: [(&str, &str); 5] = [
    ("USA", "US"),
    ("UK", "GB"),
    ("Singapore", "SG"),
    ("UAE", "AE"),
    ("Germany", "DE"),
];

const BANK_CODES: [&str; 8] = [
    "SBIN", "HDFC", "ICIC", "AXIS", "PUNB", "UTIB", "KKBK", "INDB",
];

const CONTACT_TITLES: [&str; 5] = [
    "Manager",
    "Director",
    "VP Operations",
    "CFO",
    "Head of Procurement",
];

/// Generate `count` vendor master records.
///
/// Status and risk band come from two independently shuffled fixed-ratio
/// pools, so the output contains exactly the pool counts for every seed.
pub fn generate_vendors(ctx: &mut GenContext, count: usize) -> Vec<Vendor> {
    let statuses = fixed_ratio_pool(count, &STATUS_RATIO, &mut ctx.rng);
    let risk_bands = fixed_ratio_pool(count, &RISK_RATIO, &mut ctx.rng);
    let window_start = ctx.anchor.date() - Duration::days(ONBOARDING_WINDOW_DAYS);

    let mut vendors = Vec::with_capacity(count);
    for i in 0..count {
        let rng = &mut ctx.rng;
        let domestic = rng.gen_bool(DOMESTIC_PROBABILITY);
        let (country, country_code) = if domestic {
            ("India", "IN")
        } else {
            *FOREIGN_COUNTRIES
                .choose(rng)
                .unwrap_or(&FOREIGN_COUNTRIES[0])
        };

        let onboarding_date = window_start + Duration::days(rng.gen_range(0..=150));
        let last_updated = onboarding_date + Duration::days(rng.gen_range(1..=30));

        let vendor = Vendor {
            vendor_id: format!("VENDOR-{:04}", i + 1),
            vendor_name: company_name(rng),
            country: country.to_string(),
            state: if domestic {
                INDIAN_STATES.choose(rng).copied().unwrap_or_default().to_string()
            } else {
                String::new()
            },
            city: CityName().fake_with_rng(rng),
            industry: INDUSTRIES.choose(rng).copied().unwrap_or_default().to_string(),
            contact_email: SafeEmail().fake_with_rng(rng),
            phone: PhoneNumber().fake_with_rng(rng),
            status: statuses[i],
            risk_band: risk_bands[i],
            onboarding_date,
            last_updated,
            pan: if domestic { pan(rng) } else { String::new() },
            gst: if domestic { gst(rng) } else { String::new() },
            tax_id: if domestic { String::new() } else { digits(rng, 13) },
            registration_number: if domestic {
                format!(
                    "CIN-U{}MH{}PTC{}",
                    digits(rng, 5),
                    digits(rng, 4),
                    digits(rng, 6)
                )
            } else {
                format!("REG-{}", digits(rng, 8))
            },
            website: website(rng),
            primary_contact_name: Name().fake_with_rng(rng),
            primary_contact_title: CONTACT_TITLES
                .choose(rng)
                .copied()
                .unwrap_or_default()
                .to_string(),
            bank_account: digits(rng, 14),
            ifsc_code: if domestic { ifsc(rng) } else { String::new() },
            swift_code: if domestic {
                String::new()
            } else {
                format!("{}{}{}", upper_letters(rng, 4), country_code, digits(rng, 2))
            },
        };
        debug!(vendor_id = %vendor.vendor_id, status = %vendor.status, "generated vendor");
        vendors.push(vendor);
    }
    vendors
}

/// Realistic Indian-flavored company name from a handful of patterns.
fn company_name(rng: &mut StdRng) -> String {
    let suffix = COMPANY_SUFFIXES.choose(rng).copied().unwrap_or("Pvt Ltd");
    match rng.gen_range(0..4u8) {
        0 => {
            let base: String = CompanyName().fake_with_rng(rng);
            format!("{base} {suffix}")
        }
        1 => {
            let first: String = FirstName().fake_with_rng(rng);
            let line = ["Technologies", "Solutions", "Enterprises"]
                .choose(rng)
                .copied()
                .unwrap_or("Solutions");
            format!("{first} {line} {suffix}")
        }
        2 => {
            let last: String = LastName().fake_with_rng(rng);
            let line = ["Industries", "Corporation", "Services"]
                .choose(rng)
                .copied()
                .unwrap_or("Industries");
            format!("{last} {line}")
        }
        _ => {
            let line = ["Tech", "Systems", "Global"]
                .choose(rng)
                .copied()
                .unwrap_or("Tech");
            format!("{} {line} {suffix}", upper_letters(rng, 3))
        }
    }
}

/// Valid-format PAN: five letters, four digits, one letter.
fn pan(rng: &mut StdRng) -> String {
    format!(
        "{}{}{}",
        upper_letters(rng, 5),
        rng.gen_range(1000..=9999),
        upper_letters(rng, 1)
    )
}

/// Valid-format GSTIN: state code, PAN, entity digit, 'Z', check letter.
fn gst(rng: &mut StdRng) -> String {
    let state_code = rng.gen_range(10..=36);
    format!(
        "{}{}{}Z{}",
        state_code,
        pan(rng),
        rng.gen_range(1..=9),
        upper_letters(rng, 1)
    )
}

fn ifsc(rng: &mut StdRng) -> String {
    let bank = BANK_CODES.choose(rng).copied().unwrap_or("SBIN");
    format!("{bank}0{}", rng.gen_range(100_000..=999_999))
}

fn website(rng: &mut StdRng) -> String {
    let word: String = LastName().fake_with_rng(rng);
    format!("https://www.{}.example.com", word.to_lowercase())
}

fn upper_letters(rng: &mut StdRng, n: usize) -> String {
    (0..n)
        .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
        .collect()
}

fn digits(rng: &mut StdRng, n: usize) -> String {
    (0..n)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_anchor;

    #[test]
    fn status_counts_match_pool_exactly() {
        // The pool contract: exact counts for any seed, not approximate ratios.
        for seed in [0u64, 1, 42, 99] {
            let mut ctx = GenContext::new(seed, test_anchor());
            let vendors = generate_vendors(&mut ctx, 20);
            let count = |s: VendorStatus| vendors.iter().filter(|v| v.status == s).count();
            assert_eq!(count(VendorStatus::Approved), 15, "seed {seed}");
            assert_eq!(count(VendorStatus::Pending), 3, "seed {seed}");
            assert_eq!(count(VendorStatus::Rejected), 2, "seed {seed}");
        }
    }

    #[test]
    fn risk_band_counts_match_pool_exactly() {
        let mut ctx = GenContext::new(42, test_anchor());
        let vendors = generate_vendors(&mut ctx, 20);
        let count = |b: RiskBand| vendors.iter().filter(|v| v.risk_band == b).count();
        assert_eq!(count(RiskBand::Low), 12);
        assert_eq!(count(RiskBand::Medium), 6);
        assert_eq!(count(RiskBand::High), 2);
    }

    #[test]
    fn identifiers_are_sequential() {
        let mut ctx = GenContext::new(42, test_anchor());
        let vendors = generate_vendors(&mut ctx, 5);
        let ids: Vec<&str> = vendors.iter().map(|v| v.vendor_id.as_str()).collect();
        assert_eq!(
            ids,
            ["VENDOR-0001", "VENDOR-0002", "VENDOR-0003", "VENDOR-0004", "VENDOR-0005"]
        );
    }

    #[test]
    fn regional_identifiers_are_exclusive() {
        let mut ctx = GenContext::new(42, test_anchor());
        for vendor in generate_vendors(&mut ctx, 50) {
            if vendor.is_domestic() {
                assert!(!vendor.pan.is_empty());
                assert!(!vendor.gst.is_empty());
                assert!(!vendor.ifsc_code.is_empty());
                assert!(vendor.tax_id.is_empty());
                assert!(vendor.swift_code.is_empty());
                assert!(!vendor.state.is_empty());
            } else {
                assert!(vendor.pan.is_empty());
                assert!(vendor.gst.is_empty());
                assert!(vendor.ifsc_code.is_empty());
                assert!(!vendor.tax_id.is_empty());
                assert!(!vendor.swift_code.is_empty());
                assert!(vendor.state.is_empty());
            }
        }
    }

    #[test]
    fn last_updated_postdates_onboarding() {
        let mut ctx = GenContext::new(42, test_anchor());
        for vendor in generate_vendors(&mut ctx, 20) {
            assert!(vendor.last_updated > vendor.onboarding_date);
        }
    }
}
