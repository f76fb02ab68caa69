//! PubChem and ChEMBL clients against a local mock server.
//!
//! Run with: cargo test --package dosescope-ingestion --test remote_sources

use dosescope_common::sandbox::SandboxClient;
use dosescope_ingestion::sources::{
    BioactivitySource, ChemblClient, PropertySource, PubChemClient,
};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VALPROATE_PROPS: &str = r#"{"PropertyTable":{"Properties":[{"CID":3121,
  "MolecularFormula":"C8H16O2","MolecularWeight":"144.21","XLogP":2.8,
  "HBondDonorCount":1,"HBondAcceptorCount":2,"ExactMass":"144.115029749","TPSA":37.3}]}}"#;

const VALPROATE_ACTIVITIES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<response><activities>
  <activity>
    <activity_id>100</activity_id>
    <assay_description>Anticonvulsant activity (scPTZ)</assay_description>
    <standard_type>ED50</standard_type>
    <standard_value>149.0</standard_value>
    <standard_units>mg.kg-1</standard_units>
    <target_organism>Mus musculus</target_organism>
  </activity>
  <activity>
    <activity_id>101</activity_id>
    <assay_description>Neurotoxicity</assay_description>
    <standard_type>TD50</standard_type>
    <standard_value>426.0</standard_value>
  </activity>
</activities></response>"#;

fn pubchem(server: &MockServer) -> PubChemClient {
    PubChemClient::with_base_url(SandboxClient::new().unwrap(), &format!("{}/rest/pug", server.uri()))
}

fn chembl(server: &MockServer) -> ChemblClient {
    ChemblClient::with_base_url(SandboxClient::new().unwrap(), &format!("{}/chembl/api/data", server.uri()))
}

#[tokio::test]
async fn test_pubchem_properties_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/rest/pug/compound/name/valproate/property/.+/JSON$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VALPROATE_PROPS))
        .mount(&server)
        .await;

    let props = pubchem(&server).fetch_properties("valproate").await.expect("properties");
    assert_eq!(props.drug, "valproate");
    assert_eq!(props.molecular_weight, Some(144.21));
    assert_eq!(props.h_bond_acceptor_count, Some(2));
}

#[tokio::test]
async fn test_pubchem_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"Fault":{}}"#))
        .mount(&server)
        .await;

    assert!(pubchem(&server).fetch_properties("unobtainium").await.is_none());
}

#[tokio::test]
async fn test_pubchem_garbage_body_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    assert!(pubchem(&server).fetch_properties("valproate").await.is_none());
}

#[tokio::test]
async fn test_chembl_activities_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chembl/api/data/activity"))
        .and(query_param("molecule_chembl_id", "CHEMBL109"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VALPROATE_ACTIVITIES))
        .mount(&server)
        .await;

    let activities = chembl(&server).fetch_activities("CHEMBL109").await;
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].standard_value, Some(149.0));
    assert_eq!(activities[1].target_organism, None);
}

#[tokio::test]
async fn test_chembl_server_error_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(chembl(&server).fetch_activities("CHEMBL109").await.is_empty());
}

#[tokio::test]
async fn test_chembl_empty_body_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    assert!(chembl(&server).fetch_activities("CHEMBL109").await.is_empty());
}

#[tokio::test]
async fn test_unreachable_host_degrades_to_empty() {
    let client = SandboxClient::new().unwrap();
    let pubchem = PubChemClient::with_base_url(client.clone(), "http://127.0.0.1:1/rest/pug");
    let chembl = ChemblClient::with_base_url(client, "http://127.0.0.1:1/chembl/api/data");

    assert!(pubchem.fetch_properties("valproate").await.is_none());
    assert!(chembl.fetch_activities("CHEMBL109").await.is_empty());
}

#[tokio::test]
async fn test_unlisted_host_is_refused() {
    let chembl = ChemblClient::with_base_url(SandboxClient::new().unwrap(), "https://chembl.example.com/api");
    assert!(chembl.fetch_activities("CHEMBL109").await.is_empty());
}
