// ABOUTME: Customer attributes returned by a successful validation
// ABOUTME: Maps the fixed set of logical form fields to their page element ids

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Customer attributes attached to a valid token.
///
/// Every attribute is optional. The endpoint is loose about types, so strings,
/// numbers and `true` are all accepted and kept as text; `null`, `false` and
/// empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub vehicle_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub vehicle_make: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub accident_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub insurance_company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub claim_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub repair_cost: Option<String>,
    #[serde(
        rename = "estimatedDV",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_dv: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        _ => None,
    })
}

impl CustomerData {
    /// Value for a logical field, if present.
    pub fn get(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::CustomerName => &self.name,
            FormField::CustomerEmail => &self.email,
            FormField::CustomerPhone => &self.phone,
            FormField::Vin => &self.vin,
            FormField::VehicleYear => &self.vehicle_year,
            FormField::VehicleMake => &self.vehicle_make,
            FormField::VehicleModel => &self.vehicle_model,
            FormField::Mileage => &self.mileage,
            FormField::AccidentDate => &self.accident_date,
            FormField::InsuranceCompany => &self.insurance_company,
            FormField::ClaimNumber => &self.claim_number,
            FormField::RepairCost => &self.repair_cost,
            FormField::EstimatedDv => &self.estimated_dv,
            FormField::StateCode => &self.state_code,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Present values in field order.
    pub fn entries(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        FormField::ALL
            .iter()
            .filter_map(move |field| self.get(*field).map(|value| (*field, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// The fixed set of form fields the tool knows how to pre-populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormField {
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    Vin,
    VehicleYear,
    VehicleMake,
    VehicleModel,
    Mileage,
    AccidentDate,
    InsuranceCompany,
    ClaimNumber,
    RepairCost,
    EstimatedDv,
    StateCode,
}

impl FormField {
    pub const ALL: [FormField; 14] = [
        FormField::CustomerName,
        FormField::CustomerEmail,
        FormField::CustomerPhone,
        FormField::Vin,
        FormField::VehicleYear,
        FormField::VehicleMake,
        FormField::VehicleModel,
        FormField::Mileage,
        FormField::AccidentDate,
        FormField::InsuranceCompany,
        FormField::ClaimNumber,
        FormField::RepairCost,
        FormField::EstimatedDv,
        FormField::StateCode,
    ];

    /// Identifier (and `name` attribute) of the matching page input.
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::CustomerName => "customerName",
            Self::CustomerEmail => "customerEmail",
            Self::CustomerPhone => "customerPhone",
            Self::Vin => "vin",
            Self::VehicleYear => "vehicleYear",
            Self::VehicleMake => "vehicleMake",
            Self::VehicleModel => "vehicleModel",
            Self::Mileage => "mileage",
            Self::AccidentDate => "accidentDate",
            Self::InsuranceCompany => "insuranceCompany",
            Self::ClaimNumber => "claimNumber",
            Self::RepairCost => "repairCost",
            Self::EstimatedDv => "estimatedDV",
            Self::StateCode => "stateCode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_mixed_types() {
        let data: CustomerData = serde_json::from_value(json!({
            "name": "Dana Reyes",
            "vehicleYear": 2021,
            "repairCost": 4812.5,
            "estimatedDV": "3,150",
            "email": null,
            "phone": "",
            "vin": false,
            "unknownField": "ignored"
        }))
        .unwrap();

        assert_eq!(data.name.as_deref(), Some("Dana Reyes"));
        assert_eq!(data.vehicle_year.as_deref(), Some("2021"));
        assert_eq!(data.repair_cost.as_deref(), Some("4812.5"));
        assert_eq!(data.estimated_dv.as_deref(), Some("3,150"));
        assert_eq!(data.email, None);
        assert_eq!(data.phone, None);
        assert_eq!(data.vin, None);
    }

    #[test]
    fn test_entries_follow_field_order() {
        let data = CustomerData {
            state_code: Some("GA".to_string()),
            name: Some("Dana Reyes".to_string()),
            vin: Some("1HGCM82633A004352".to_string()),
            ..Default::default()
        };

        let entries: Vec<_> = data.entries().collect();
        assert_eq!(
            entries,
            vec![
                (FormField::CustomerName, "Dana Reyes"),
                (FormField::Vin, "1HGCM82633A004352"),
                (FormField::StateCode, "GA"),
            ]
        );
    }

    #[test]
    fn test_empty_customer_data() {
        assert!(CustomerData::default().is_empty());
        let data = CustomerData {
            mileage: Some("0".to_string()),
            ..Default::default()
        };
        assert!(!data.is_empty());
    }

    #[test]
    fn test_element_ids_are_unique() {
        let mut ids: Vec<_> = FormField::ALL.iter().map(|f| f.element_id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), FormField::ALL.len());
    }
}
