//! Static reference table of commonly used zones and cities.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneInfo {
    /// IANA timezone name.
    pub name: &'static str,
    /// Human-readable offset label; informational only, never used for math.
    pub offset: &'static str,
    pub cities: &'static [&'static str],
    pub flag: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopularCity {
    pub name: &'static str,
    pub time_zone: &'static str,
    pub flag: &'static str,
}

pub static TIME_ZONES: &[ZoneInfo] = &[
    ZoneInfo {
        name: "America/New_York",
        offset: "UTC-5/-4",
        cities: &["New York", "Washington DC", "Miami", "Toronto"],
        flag: "🇺🇸",
    },
    ZoneInfo {
        name: "America/Los_Angeles",
        offset: "UTC-8/-7",
        cities: &["Los Angeles", "San Francisco", "Seattle", "Vancouver"],
        flag: "🇺🇸",
    },
    ZoneInfo {
        name: "Europe/London",
        offset: "UTC+0/+1",
        cities: &["London", "Dublin", "Edinburgh", "Cardiff"],
        flag: "🇬🇧",
    },
    ZoneInfo {
        name: "Europe/Paris",
        offset: "UTC+1/+2",
        cities: &["Paris", "Berlin", "Rome", "Madrid"],
        flag: "🇫🇷",
    },
    ZoneInfo {
        name: "Asia/Tokyo",
        offset: "UTC+9",
        cities: &["Tokyo", "Osaka", "Kyoto", "Yokohama"],
        flag: "🇯🇵",
    },
    ZoneInfo {
        name: "Asia/Shanghai",
        offset: "UTC+8",
        cities: &["Shanghai", "Beijing", "Shenzhen", "Hong Kong"],
        flag: "🇨🇳",
    },
    ZoneInfo {
        name: "Asia/Kolkata",
        offset: "UTC+5:30",
        cities: &["Mumbai", "Delhi", "Bangalore", "Chennai"],
        flag: "🇮🇳",
    },
    ZoneInfo {
        name: "Australia/Sydney",
        offset: "UTC+10/+11",
        cities: &["Sydney", "Melbourne", "Brisbane", "Canberra"],
        flag: "🇦🇺",
    },
    ZoneInfo {
        name: "Europe/Berlin",
        offset: "UTC+1/+2",
        cities: &["Berlin", "Munich", "Hamburg", "Frankfurt"],
        flag: "🇩🇪",
    },
    ZoneInfo {
        name: "America/Chicago",
        offset: "UTC-6/-5",
        cities: &["Chicago", "Dallas", "Houston", "Denver"],
        flag: "🇺🇸",
    },
];

pub static POPULAR_CITIES: &[PopularCity] = &[
    PopularCity { name: "New York", time_zone: "America/New_York", flag: "🇺🇸" },
    PopularCity { name: "Los Angeles", time_zone: "America/Los_Angeles", flag: "🇺🇸" },
    PopularCity { name: "London", time_zone: "Europe/London", flag: "🇬🇧" },
    PopularCity { name: "Paris", time_zone: "Europe/Paris", flag: "🇫🇷" },
    PopularCity { name: "Tokyo", time_zone: "Asia/Tokyo", flag: "🇯🇵" },
    PopularCity { name: "Sydney", time_zone: "Australia/Sydney", flag: "🇦🇺" },
    PopularCity { name: "Berlin", time_zone: "Europe/Berlin", flag: "🇩🇪" },
    PopularCity { name: "Mumbai", time_zone: "Asia/Kolkata", flag: "🇮🇳" },
    PopularCity { name: "Shanghai", time_zone: "Asia/Shanghai", flag: "🇨🇳" },
    PopularCity { name: "Singapore", time_zone: "Asia/Singapore", flag: "🇸🇬" },
];

/// Look up a city (case-insensitive). Popular cities win over the per-zone
/// lists, so "Berlin" resolves to `Europe/Berlin` rather than `Europe/Paris`.
pub fn city(name: &str) -> Option<PopularCity> {
    let needle = name.trim();
    if let Some(c) = POPULAR_CITIES.iter().find(|c| c.name.eq_ignore_ascii_case(needle)) {
        return Some(*c);
    }
    TIME_ZONES.iter().find_map(|z| {
        z.cities
            .iter()
            .find(|c| c.eq_ignore_ascii_case(needle))
            .map(|c| PopularCity {
                name: *c,
                time_zone: z.name,
                flag: z.flag,
            })
    })
}

pub fn zone(name: &str) -> Option<&'static ZoneInfo> {
    TIME_ZONES.iter().find(|z| z.name == name)
}

/// Whether `name` appears anywhere in the catalog.
pub fn is_known_zone(name: &str) -> bool {
    zone(name).is_some() || POPULAR_CITIES.iter().any(|c| c.time_zone == name)
}

/// The flag shown next to participants in `zone_name`, if cataloged.
pub fn flag_for_zone(zone_name: &str) -> Option<&'static str> {
    zone(zone_name).map(|z| z.flag).or_else(|| {
        POPULAR_CITIES
            .iter()
            .find(|c| c.time_zone == zone_name)
            .map(|c| c.flag)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::parse_time_zone;

    #[test]
    fn test_every_catalog_zone_parses() {
        for z in TIME_ZONES {
            assert!(parse_time_zone(z.name).is_ok(), "{}", z.name);
        }
        for c in POPULAR_CITIES {
            assert!(parse_time_zone(c.time_zone).is_ok(), "{}", c.time_zone);
        }
    }

    #[test]
    fn test_city_lookup() {
        assert_eq!(city("tokyo").unwrap().time_zone, "Asia/Tokyo");
        assert_eq!(city("  Singapore ").unwrap().time_zone, "Asia/Singapore");
        assert_eq!(city("Houston").unwrap().time_zone, "America/Chicago");
        assert_eq!(city("Berlin").unwrap().time_zone, "Europe/Berlin");
        assert!(city("Atlantis").is_none());
    }

    #[test]
    fn test_known_zone_and_flag() {
        assert!(is_known_zone("Asia/Kolkata"));
        assert!(is_known_zone("Asia/Singapore"));
        assert!(!is_known_zone("Africa/Nairobi"));
        assert_eq!(flag_for_zone("Europe/London"), Some("🇬🇧"));
        assert_eq!(flag_for_zone("Asia/Singapore"), Some("🇸🇬"));
        assert_eq!(flag_for_zone("Africa/Nairobi"), None);
    }
}
