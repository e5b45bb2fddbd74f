//! Choices offered by the picker dialogs

use super::filter::SearchMode;
use super::member::{Member, MemberStatus, VerificationStatus};

/// How many members a live option fetch asks for
pub const OPTIONS_SAMPLE_SIZE: usize = 200;

/// Unique field values seen in a sample of members
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub names: Vec<String>,
    pub emails: Vec<String>,
    pub mobiles: Vec<String>,
    pub domains: Vec<String>,
    pub statuses: Vec<MemberStatus>,
    pub verification_statuses: Vec<VerificationStatus>,
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

impl FilterOptions {
    /// Collect values in first-seen order
    pub fn from_members<'a>(members: impl IntoIterator<Item = &'a Member>) -> Self {
        let mut options = Self::default();
        for member in members {
            let name = member.full_name();
            if !name.is_empty() {
                push_unique(&mut options.names, name);
            }
            push_unique(&mut options.emails, member.email_address.clone());
            push_unique(&mut options.mobiles, member.mobile_number.clone());
            push_unique(&mut options.domains, member.domain.clone());
            push_unique(&mut options.statuses, member.status);
            push_unique(&mut options.verification_statuses, member.verification_status);
        }
        options
    }

    /// Statuses to offer; every status when the sample had none
    pub fn status_choices(&self) -> Vec<MemberStatus> {
        if self.statuses.is_empty() {
            MemberStatus::all().to_vec()
        } else {
            self.statuses.clone()
        }
    }

    pub fn verification_choices(&self) -> Vec<VerificationStatus> {
        if self.verification_statuses.is_empty() {
            VerificationStatus::all().to_vec()
        } else {
            self.verification_statuses.clone()
        }
    }

    pub fn domain_choices(&self) -> &[String] {
        &self.domains
    }

    /// Known values for a search target
    pub fn search_values(&self, mode: SearchMode) -> &[String] {
        match mode {
            SearchMode::Name => &self.names,
            SearchMode::Email => &self.emails,
            SearchMode::Mobile => &self.mobiles,
            SearchMode::None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::mock_members;

    #[test]
    fn test_options_are_unique_in_first_seen_order() {
        let options = FilterOptions::from_members(&mock_members());

        assert_eq!(
            options.domains,
            vec![
                "tastingnotes.app",
                "moonlodge.app",
                "kayakshop.net",
                "alphacorp.io",
                "example.com"
            ]
        );
        assert_eq!(
            options.statuses,
            vec![MemberStatus::Active, MemberStatus::Inactive, MemberStatus::Suspended]
        );
        assert_eq!(options.emails.len(), 12);
        // "Browni ex23" and "browni ex23" differ by case and are both kept
        assert_eq!(options.names.len(), 12);
    }

    #[test]
    fn test_search_values_follow_target() {
        let options = FilterOptions::from_members(&mock_members());

        assert_eq!(options.search_values(SearchMode::Name)[0], "Browni ex23");
        assert_eq!(options.search_values(SearchMode::Email)[1], "uvie@example.com");
        assert_eq!(options.search_values(SearchMode::Mobile)[11], "+44 7300 000012");
        assert!(options.search_values(SearchMode::None).is_empty());
    }

    #[test]
    fn test_empty_sample_falls_back_to_all_statuses() {
        let options = FilterOptions::from_members(&Vec::<Member>::new());

        assert_eq!(options.status_choices(), MemberStatus::all().to_vec());
        assert_eq!(
            options.verification_choices(),
            VerificationStatus::all().to_vec()
        );
        assert!(options.domain_choices().is_empty());
    }
}
