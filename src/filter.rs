use crate::models::{DateRange, Prescription};

/// Keeps prescriptions whose patient name or diagnosis contains `search`,
/// ignoring case.
///
/// A blank search returns every entry in its original order. Only the
/// blankness check trims: a non-blank term is matched as typed. A missing
/// diagnosis never matches.
///
/// Takes anything yielding borrowed prescriptions, so a slice and the
/// output of [`within_range`] both work without copying records.
pub fn filter_prescriptions<'a, I>(prescriptions: I, search: &str) -> Vec<&'a Prescription>
where
    I: IntoIterator<Item = &'a Prescription>,
{
    if search.trim().is_empty() {
        return prescriptions.into_iter().collect();
    }

    let needle = search.to_lowercase();
    prescriptions
        .into_iter()
        .filter(|prescription| {
            prescription.patient_name.to_lowercase().contains(&needle)
                || prescription
                    .diagnosis
                    .as_deref()
                    .is_some_and(|diagnosis| diagnosis.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Prescriptions dated within `range` (inclusive), newest first.
pub fn within_range<'a>(
    prescriptions: &'a [Prescription],
    range: &DateRange,
) -> Vec<&'a Prescription> {
    let mut selected: Vec<&Prescription> = prescriptions
        .iter()
        .filter(|prescription| range.contains(prescription.prescription_date))
        .collect();
    selected.sort_by(|a, b| b.prescription_date.cmp(&a.prescription_date));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::NaiveDate;

    fn prescription(id: i64, name: &str, diagnosis: Option<&str>, day: u32) -> Prescription {
        Prescription {
            id,
            prescription_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            patient_name: name.to_string(),
            patient_age: 30,
            patient_gender: Gender::Female,
            diagnosis: diagnosis.map(str::to_string),
            medicines: None,
            next_visit_date: None,
            created_by_username: None,
            created_by_full_name: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(selected: &[&Prescription]) -> Vec<i64> {
        selected.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_filter_matches_name_case_insensitively() {
        let prescriptions = vec![
            prescription(1, "Alice", Some("flu"), 1),
            prescription(2, "Bob", None, 2),
        ];
        assert_eq!(ids(&filter_prescriptions(&prescriptions, "al")), vec![1]);
        assert_eq!(ids(&filter_prescriptions(&prescriptions, "BOB")), vec![2]);
    }

    #[test]
    fn test_filter_matches_diagnosis() {
        let prescriptions = vec![
            prescription(1, "Alice", Some("Seasonal Flu"), 1),
            prescription(2, "Bob", Some("fracture"), 2),
            prescription(3, "Carol", None, 3),
        ];
        assert_eq!(ids(&filter_prescriptions(&prescriptions, "flu")), vec![1]);
    }

    #[test]
    fn test_blank_search_returns_everything_in_order() {
        let prescriptions = vec![
            prescription(3, "Carol", None, 3),
            prescription(1, "Alice", None, 1),
        ];
        assert_eq!(ids(&filter_prescriptions(&prescriptions, "")), vec![3, 1]);
        assert_eq!(ids(&filter_prescriptions(&prescriptions, "   ")), vec![3, 1]);
    }

    #[test]
    fn test_untrimmed_term_is_matched_as_typed() {
        let prescriptions = vec![prescription(1, "Mary Ann", None, 1)];
        assert_eq!(ids(&filter_prescriptions(&prescriptions, "y a")), vec![1]);
        assert!(filter_prescriptions(&prescriptions, " mary ").is_empty());
    }

    #[test]
    fn test_within_range_sorts_newest_first() {
        let prescriptions = vec![
            prescription(1, "A", None, 2),
            prescription(2, "B", None, 20),
            prescription(3, "C", None, 10),
        ];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        assert_eq!(ids(&within_range(&prescriptions, &range)), vec![3, 1]);
    }

    #[test]
    fn test_filter_chains_after_within_range() {
        let prescriptions = vec![
            prescription(1, "Alice", Some("flu"), 2),
            prescription(2, "Alan", None, 20),
            prescription(3, "Bob", Some("flu"), 10),
            prescription(4, "Albert", None, 12),
        ];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        let found = filter_prescriptions(within_range(&prescriptions, &range), "al");
        assert_eq!(ids(&found), vec![4, 1]);
    }
}
