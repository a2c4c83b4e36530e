//! Deterministic pseudo-position generator
//!
//! The feed has no meaningful surface coordinates for a near-Earth object,
//! so markers get a reproducible position derived from the object's id and
//! name: the same object lands on the same point across queries, with no
//! lookup table.

/// Fold a string into a signed 32-bit hash: `hash = hash * 31 + unit` over
/// the UTF-16 code units, wrapping at 32 bits.
pub fn hash_code(s: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    hash
}

/// Map an id/name pair to a (latitude, longitude) pseudo-position.
///
/// Latitude comes from the id hash, longitude from the name hash — or from
/// the id suffixed with "lon" when the name is empty, so the two axes never
/// collapse onto the same hash. The non-negative modulus guarantees
/// latitude ∈ [-90, 90) and longitude ∈ [-180, 180) for every input.
pub fn pseudo_position(id: &str, name: &str) -> (f64, f64) {
    let lat_hash = hash_code(id);
    let lon_hash = if name.is_empty() {
        hash_code(&format!("{id}lon"))
    } else {
        hash_code(name)
    };

    let lat = (lat_hash.rem_euclid(180) - 90) as f64;
    let lon = (lon_hash.rem_euclid(360) - 180) as f64;
    (lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_code_known_values() {
        assert_eq!(hash_code(""), 0);
        assert_eq!(hash_code("A"), 65);
        assert_eq!(hash_code("ab"), 3105);
        assert_eq!(hash_code("3542519"), -415042371);
    }

    #[test]
    fn test_hash_code_wraps_to_i32_min() {
        // Classic overflow probe: folds exactly onto the minimum value.
        assert_eq!(hash_code("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn test_position_known_values() {
        assert_eq!(pseudo_position("A", "Alpha"), (-25.0, -54.0));
        assert_eq!(pseudo_position("3542519", "(2010 PK9)"), (-81.0, 130.0));
    }

    #[test]
    fn test_position_empty_name_uses_suffixed_id() {
        assert_eq!(pseudo_position("A", ""), (-25.0, -146.0));
    }

    #[test]
    fn test_position_empty_strings_stay_in_range() {
        assert_eq!(pseudo_position("", ""), (-90.0, -121.0));
    }

    #[test]
    fn test_position_is_deterministic_and_bounded() {
        let inputs = [
            ("2021277", "277 Elvira (A888 EB)"),
            ("54016476", "(2020 BV9)"),
            ("polygenelubricants", ""),
            ("", "name-only"),
            ("漢字", "テスト"),
        ];
        for (id, name) in inputs {
            let first = pseudo_position(id, name);
            let second = pseudo_position(id, name);
            assert_eq!(first, second);

            let (lat, lon) = first;
            assert!((-90.0..90.0).contains(&lat), "lat out of range for {id}: {lat}");
            assert!((-180.0..180.0).contains(&lon), "lon out of range for {id}: {lon}");
        }
    }
}
