//! Gather pass end to end with in-memory sources, then reload.
//!
//! Run with: cargo test --package dosescope-ingestion --test gather_pipeline

use std::collections::HashMap;
use std::fs;

use async_trait::async_trait;
use dosescope_common::{ActivityRecord, Compound, DrugInfo};
use dosescope_ingestion::sources::{BioactivitySource, MolecularProperties, PropertySource};
use dosescope_ingestion::{gather_and_clean, load_manifest, load_persisted_data, StorePaths};

#[derive(Default)]
struct StubProperties(HashMap<String, MolecularProperties>);

#[async_trait]
impl PropertySource for StubProperties {
    async fn fetch_properties(&self, name: &str) -> Option<MolecularProperties> {
        self.0.get(name).cloned()
    }
}

#[derive(Default)]
struct StubActivities(HashMap<String, Vec<ActivityRecord>>);

#[async_trait]
impl BioactivitySource for StubActivities {
    async fn fetch_activities(&self, chembl_id: &str) -> Vec<ActivityRecord> {
        self.0.get(chembl_id).cloned().unwrap_or_default()
    }
}

fn activity(id: &str, kind: &str, value: f64, organism: Option<&str>) -> ActivityRecord {
    ActivityRecord {
        activity_id: id.to_string(),
        assay_description: Some(format!("Assay, \"quoted\" {}", id)),
        standard_type: Some(kind.to_string()),
        standard_value: Some(value),
        standard_units: Some("mg.kg-1".to_string()),
        target_organism: organism.map(String::from),
        target_pref_name: None,
    }
}

fn phenytoin_props() -> MolecularProperties {
    MolecularProperties {
        drug: "phenytoin".to_string(),
        molecular_formula: Some("C15H12N2O2".to_string()),
        molecular_weight: Some(252.27),
        xlogp: Some(2.5),
        h_bond_donor_count: Some(2),
        h_bond_acceptor_count: Some(2),
        exact_mass: Some(252.08987763),
        tpsa: Some(58.2),
    }
}

#[tokio::test]
async fn test_gather_then_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = StorePaths::new(dir.path().join("data"), dir.path().join("drug_info"));

    let phenytoin_rows = vec![
        activity("1", "ED50", 9.5, Some("Mus musculus")),
        activity("2", "IC50", 0.3, Some("Homo sapiens")),
        activity("3", "TD50", 65.46, None),
    ];

    let props = StubProperties(HashMap::from([("phenytoin".to_string(), phenytoin_props())]));
    let bio = StubActivities(HashMap::from([
        ("CHEMBL16".to_string(), phenytoin_rows.clone()),
        ("CHEMBL2".to_string(), vec![activity("9", "Ki", 1.0, None)]),
    ]));

    let compounds = vec![
        Compound::new("phenytoin", "CHEMBL16"),
        Compound::new("ghost", "CHEMBL0"),
        Compound::new("offtarget", "CHEMBL2"),
    ];

    let summary = gather_and_clean(&compounds, &props, &bio, &paths).await.unwrap();
    assert_eq!(summary.compounds, 3);
    assert_eq!(summary.with_properties, 1);
    assert_eq!(summary.info_files_written, 3);
    assert_eq!(summary.activity_files_written, 2);
    assert_eq!(summary.without_activities, 1);
    assert!(summary.errors.is_empty());
    assert!(!paths.activity_path("ghost").exists());

    let names: Vec<String> = compounds.iter().map(|c| c.name.clone()).collect();
    let data = load_persisted_data(&paths, &names);

    // Only phenytoin has rows of interest; the IC50 row is filtered away.
    assert_eq!(data.activities.len(), 1);
    let expected: Vec<ActivityRecord> = phenytoin_rows
        .into_iter()
        .filter(|r| r.activity_id != "2")
        .collect();
    assert_eq!(data.activities["phenytoin"].rows(), expected.as_slice());

    // Info is persisted for every compound, unavailable ones included.
    assert_eq!(data.drug_info.len(), 3);
    assert_eq!(data.drug_info["phenytoin"].tpsa, Some(58.2));
    assert_eq!(data.drug_info["ghost"], DrugInfo::unavailable());
}

#[tokio::test]
async fn test_empty_manifest_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("compounds.csv");
    fs::write(&manifest, "compound_name,chembl_id\n").unwrap();
    let paths = StorePaths::new(dir.path().join("data"), dir.path().join("drug_info"));

    let (compounds, names) = load_manifest(&manifest).unwrap();
    assert!(names.is_empty());

    let summary = gather_and_clean(
        &compounds,
        &StubProperties::default(),
        &StubActivities::default(),
        &paths,
    )
    .await
    .unwrap();
    assert_eq!(summary.compounds, 0);
    assert_eq!(fs::read_dir(&paths.data_dir).unwrap().count(), 0);

    let data = load_persisted_data(&paths, &names);
    assert!(data.is_empty());
    assert!(data.drug_info.is_empty());
}

#[tokio::test]
async fn test_unwritable_data_dir_does_not_abort_gather() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    fs::write(&data_dir, "not a directory").unwrap();
    fs::create_dir_all(dir.path().join("drug_info")).unwrap();
    let paths = StorePaths::new(&data_dir, dir.path().join("drug_info"));

    let props = StubProperties(HashMap::from([("phenytoin".to_string(), phenytoin_props())]));
    let bio = StubActivities(HashMap::from([(
        "CHEMBL16".to_string(),
        vec![activity("1", "ED50", 9.5, Some("Mus musculus"))],
    )]));

    let summary = gather_and_clean(&[Compound::new("phenytoin", "CHEMBL16")], &props, &bio, &paths)
        .await
        .unwrap();
    assert_eq!(summary.info_files_written, 1);
    assert_eq!(summary.activity_files_written, 0);
    assert_eq!(summary.errors.len(), 2);
    assert!(paths.info_path("phenytoin").exists());
}
