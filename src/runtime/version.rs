//! Interpreter version comparison.

use std::cmp::Ordering;

/// Compare two dotted version strings numerically.
///
/// Only the leading numeric components are compared, so distribution
/// suffixes such as `5.2.4-2ubuntu5` or `8.1.2-1+deb11` are ignored. Missing
/// components count as zero (`5.2` equals `5.2.0`).
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = numeric_parts(left);
    let right = numeric_parts(right);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

fn numeric_parts(version: &str) -> Vec<u32> {
    version
        .trim()
        .split('.')
        .map_while(|part| {
            let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
            let value = digits.parse().ok()?;
            // A component like "4-2ubuntu5" ends the numeric prefix.
            if digits.len() == part.len() {
                Some((value, true))
            } else {
                Some((value, false))
            }
        })
        .scan(true, |keep_going, (value, complete)| {
            if !*keep_going {
                return None;
            }
            *keep_going = complete;
            Some(value)
        })
        .collect()
}
