use std::cmp::Ordering;

use crate::error::{VersionError, VersionResult};

fn parse_components(version: &str) -> VersionResult<Vec<u64>> {
    version
        .split('.')
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| VersionError::InvalidComponent {
                    version: version.to_string(),
                    component: part.to_string(),
                })
        })
        .collect()
}

/// Compares two dot-separated integer version strings component-wise.
///
/// Missing trailing components count as zero, so `1.2` equals `1.2.0`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use riots_utils::version::compare_versions;
///
/// assert_eq!(compare_versions("0.7.3", "0.7.10").unwrap(), Ordering::Less);
/// assert_eq!(compare_versions("1.2", "1.2.0").unwrap(), Ordering::Equal);
/// ```
pub fn compare_versions(a: &str, b: &str) -> VersionResult<Ordering> {
    let a = parse_components(a)?;
    let b = parse_components(b)?;

    for i in 0..a.len().max(b.len()) {
        let a_part = a.get(i).copied().unwrap_or(0);
        let b_part = b.get(i).copied().unwrap_or(0);
        match a_part.cmp(&b_part) {
            Ordering::Equal => continue,
            ordering => return Ok(ordering),
        }
    }

    Ok(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_equal() {
        assert_eq!(compare_versions("1.0.0", "1.0.0").unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_compare_missing_components_are_zero() {
        assert_eq!(compare_versions("1.2", "1.2.0").unwrap(), Ordering::Equal);
        assert_eq!(compare_versions("1.2.0.1", "1.2").unwrap(), Ordering::Greater);
        assert_eq!(compare_versions("1", "1.0.1").unwrap(), Ordering::Less);
    }

    #[test]
    fn test_compare_is_numeric_not_lexical() {
        assert_eq!(compare_versions("0.7.10", "0.7.3").unwrap(), Ordering::Greater);
        assert_eq!(compare_versions("0.10.0", "0.9.0").unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_rejects_non_numeric() {
        let err = compare_versions("1.0.0-rc.1", "1.0.0").unwrap_err();
        assert_eq!(
            err,
            VersionError::InvalidComponent {
                version: "1.0.0-rc.1".to_string(),
                component: "0-rc".to_string(),
            }
        );
    }
}
