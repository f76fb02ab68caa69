//! Cleaning of fetched data into the persisted shapes.

use dosescope_common::{ActivityRecord, ActivityTable, DrugInfo};

use crate::sources::MolecularProperties;

/// Maps fetched properties into the fixed `DrugInfo` record and materialises
/// the activity list as a table.
///
/// A failed property lookup yields a record with every field unavailable;
/// an empty activity list yields an empty table.
pub fn clean(
    properties: Option<MolecularProperties>,
    activities: Vec<ActivityRecord>,
) -> (DrugInfo, ActivityTable) {
    let info = match properties {
        Some(p) => DrugInfo {
            drug: Some(p.drug),
            molecular_formula: p.molecular_formula,
            molecular_weight: p.molecular_weight,
            xlogp: p.xlogp,
            h_bond_donor_count: p.h_bond_donor_count,
            h_bond_acceptor_count: p.h_bond_acceptor_count,
            exact_mass: p.exact_mass,
            tpsa: p.tpsa,
        },
        None => DrugInfo::unavailable(),
    };

    (info, ActivityTable::new(activities))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_without_properties() {
        let (info, table) = clean(None, vec![]);
        assert_eq!(info, DrugInfo::unavailable());
        assert!(table.is_empty());
    }

    #[test]
    fn test_clean_maps_every_field() {
        let props = MolecularProperties {
            drug: "carbamazepine".to_string(),
            molecular_formula: Some("C15H12N2O".to_string()),
            molecular_weight: Some(236.27),
            xlogp: Some(2.5),
            h_bond_donor_count: Some(1),
            h_bond_acceptor_count: Some(1),
            exact_mass: None,
            tpsa: Some(46.3),
        };
        let activity = ActivityRecord {
            activity_id: "1".to_string(),
            assay_description: None,
            standard_type: Some("ED50".to_string()),
            standard_value: Some(8.8),
            standard_units: None,
            target_organism: None,
            target_pref_name: None,
        };

        let (info, table) = clean(Some(props), vec![activity.clone()]);
        assert_eq!(info.drug.as_deref(), Some("carbamazepine"));
        assert_eq!(info.molecular_weight, Some(236.27));
        assert_eq!(info.exact_mass, None);
        assert_eq!(info.tpsa, Some(46.3));
        assert_eq!(table.rows(), &[activity]);
    }
}
