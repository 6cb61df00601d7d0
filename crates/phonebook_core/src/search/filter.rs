//! Case-insensitive substring filter over cached contacts.
//!
//! # Invariants
//! - Only `name` and `phone` are matched.
//! - Result order is cache order.
//! - An empty query returns every contact.

use crate::model::contact::Contact;

/// Returns contacts whose name or phone contains `query`, ignoring case.
///
/// The query is not trimmed; a lone space only matches fields containing a
/// space.
pub fn filter_contacts<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return contacts.iter().collect();
    }

    contacts
        .iter()
        .filter(|contact| {
            contact.name.to_lowercase().contains(&needle)
                || contact.phone.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::filter_contacts;
    use crate::model::contact::Contact;

    #[test]
    fn email_is_not_searched() {
        let contacts = vec![Contact::new(1_u64, "Ann", "1234567890", "zed@x.com")];
        assert!(filter_contacts(&contacts, "zed").is_empty());
    }
}
