//! Business rules that pick the prefix of a human-readable id.
//!
//! Kept free of I/O so they can be checked independently of the allocator.

use crate::domain::models::user::Role;

pub const STAFF_PREFIX: &str = "APM";
pub const CUSTOMER_PREFIX: &str = "APMS";
pub const PROPERTY_BASE_PREFIX: &str = "APMS";
pub const MATERIAL_PREFIX: &str = "APMM";
pub const UNKNOWN_CITY_CODE: &str = "XX";

// Checked in order, first match wins.
const CITY_CODES: [(&str, &str); 3] = [
    ("lagos", "LG"),
    ("ibadan", "IB"),
    ("abuja", "ABJ"),
];

pub fn role_prefix(role: Role) -> &'static str {
    match role {
        Role::Tenant | Role::Landlord => CUSTOMER_PREFIX,
        Role::Admin | Role::Staff => STAFF_PREFIX,
    }
}

/// Case-insensitive substring match of `location` against the known cities.
pub fn city_code(location: &str) -> &'static str {
    let haystack = location.to_lowercase();
    CITY_CODES
        .iter()
        .find(|(city, _)| haystack.contains(city))
        .map(|(_, code)| *code)
        .unwrap_or(UNKNOWN_CITY_CODE)
}

pub fn property_prefix(location: &str) -> String {
    format!("{}{}", PROPERTY_BASE_PREFIX, city_code(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_roles_use_apms() {
        assert_eq!(role_prefix(Role::Tenant), "APMS");
        assert_eq!(role_prefix(Role::Landlord), "APMS");
    }

    #[test]
    fn test_staff_roles_use_apm_only() {
        for role in [Role::Admin, Role::Staff] {
            let prefix = role_prefix(role);
            assert!(prefix.starts_with("APM"));
            assert!(!prefix.starts_with("APMS"), "{} must not get the customer prefix", role);
        }
    }

    #[test]
    fn test_city_code_matching() {
        assert_eq!(city_code("Lekki, Lagos"), "LG");
        assert_eq!(city_code("LAGOS ISLAND"), "LG");
        assert_eq!(city_code("bodija ibadan"), "IB");
        assert_eq!(city_code("Wuse 2, AbUjA FCT"), "ABJ");
        assert_eq!(city_code("Port Harcourt"), "XX");
        assert_eq!(city_code(""), "XX");
    }

    #[test]
    fn test_property_prefix() {
        assert_eq!(property_prefix("Lekki, Lagos"), "APMSLG");
        assert_eq!(property_prefix("Kano"), "APMSXX");
    }
}
