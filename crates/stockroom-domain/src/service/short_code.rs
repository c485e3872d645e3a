//! Short-code assignment
//!
//! Every catalog item gets a 4-character code that floor staff can key in
//! faster than a SKU. Codes prefer a stem derived from the SKU itself so
//! they stay recognizable, and fall back to numbered candidates when the
//! stem is taken.

use std::collections::HashSet;

/// Pick an unused short code for `sku`.
///
/// The caller owns the `in_use` set and should insert the returned code
/// before assigning the next one.
pub fn short_code_for_sku(sku: &str, in_use: &HashSet<String>) -> String {
    let mut base: String = sku
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if base.is_empty() {
        base = "ITEM".to_string();
    }
    base.push_str("XXXX");
    let candidate: String = base.chars().take(4).collect();
    if !in_use.contains(&candidate) {
        return candidate;
    }

    let prefix: String = {
        let head: String = base.chars().take(2).collect();
        format!("{:X<2}", head)
    };
    let mut suffix: u32 = 1;
    loop {
        let numbered = format!("{}{:02}", prefix, suffix);
        let candidate: String = numbered
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if !in_use.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
