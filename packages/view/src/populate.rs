// ABOUTME: Copies customer attributes into matching page inputs
// ABOUTME: Missing values and missing elements are skipped silently

use serde::Serialize;
use tracing::debug;

use accessgate_core::{CustomerData, FormField};

use crate::page::Page;

/// What happened to each field during population
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulateReport {
    pub populated: Vec<FormField>,
    pub missing_value: Vec<FormField>,
    pub missing_element: Vec<FormField>,
}

/// Fill every known field that has a value and a matching input.
///
/// Inputs are found by id, then by `name`. Each write is followed by a change
/// notification so masking and computed fields on the page can react.
pub fn populate_fields<P: Page + ?Sized>(page: &mut P, customer: &CustomerData) -> PopulateReport {
    let mut report = PopulateReport::default();

    for field in FormField::ALL {
        let Some(value) = customer.get(field) else {
            report.missing_value.push(field);
            continue;
        };

        let key = field.element_id();
        let Some(element) = page.element_by_id(key).or_else(|| page.element_by_name(key)) else {
            report.missing_element.push(field);
            continue;
        };

        page.set_value(element, value);
        page.dispatch_change(element);
        report.populated.push(field);
    }

    debug!(
        populated = report.populated.len(),
        missing_value = report.missing_value.len(),
        missing_element = report.missing_element.len(),
        "Pre-populated form fields"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementRef, MemoryPage, MockPage};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_present_fields_are_touched() {
        let mut page = MemoryPage::default().with_known_fields();
        let customer = CustomerData {
            name: Some("Dana Reyes".to_string()),
            vin: Some("1HGCM82633A004352".to_string()),
            state_code: Some("GA".to_string()),
            ..Default::default()
        };

        let report = populate_fields(&mut page, &customer);

        assert_eq!(
            report.populated,
            vec![FormField::CustomerName, FormField::Vin, FormField::StateCode]
        );
        assert_eq!(report.missing_value.len(), 11);
        assert!(report.missing_element.is_empty());

        for input in page.inputs() {
            let id = input.id.as_deref().unwrap();
            match id {
                "customerName" => assert_eq!(input.value, "Dana Reyes"),
                "vin" => assert_eq!(input.value, "1HGCM82633A004352"),
                "stateCode" => assert_eq!(input.value, "GA"),
                _ => {
                    assert_eq!(input.value, "", "{} should be untouched", id);
                    assert_eq!(input.change_events, 0, "{} should not fire change", id);
                    continue;
                }
            }
            assert_eq!(input.change_events, 1, "{} should fire one change", id);
        }
    }

    #[test]
    fn test_falls_back_to_name_attribute() {
        let mut page = MemoryPage::default().with_named_input("estimatedDV");
        let customer = CustomerData {
            estimated_dv: Some("3150".to_string()),
            ..Default::default()
        };

        let report = populate_fields(&mut page, &customer);

        assert_eq!(report.populated, vec![FormField::EstimatedDv]);
        let input = page.input("estimatedDV").unwrap();
        assert_eq!(input.value, "3150");
        assert_eq!(input.change_events, 1);
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let mut page = MemoryPage::default().with_input("customerEmail");
        let customer = CustomerData {
            email: Some("dana@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            ..Default::default()
        };

        let report = populate_fields(&mut page, &customer);

        assert_eq!(report.populated, vec![FormField::CustomerEmail]);
        assert_eq!(report.missing_element, vec![FormField::CustomerPhone]);
    }

    #[test]
    fn test_value_is_set_before_change_fires() {
        let mut page = MockPage::new();
        let mut seq = mockall::Sequence::new();
        page.expect_element_by_id()
            .returning(|id| (id == "mileage").then_some(ElementRef(7)));
        page.expect_element_by_name().returning(|_| None);
        page.expect_set_value()
            .with(eq(ElementRef(7)), eq("48210"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        page.expect_dispatch_change()
            .with(eq(ElementRef(7)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let customer = CustomerData {
            mileage: Some("48210".to_string()),
            ..Default::default()
        };
        let report = populate_fields(&mut page, &customer);
        assert_eq!(report.populated, vec![FormField::Mileage]);
    }
}
