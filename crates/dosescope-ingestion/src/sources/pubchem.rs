//! PubChem PUG REST client.
//!
//! One request per compound name:
//!   GET {base}/compound/name/{name}/property/{PROPERTY_LIST}/JSON
//!
//! Response shape: `{"PropertyTable": {"Properties": [{...}, ...]}}`. Only the
//! first row is used. Weights and masses come back as strings, XLogP and
//! TPSA as numbers, so numeric fields accept either.

use async_trait::async_trait;
use dosescope_common::error::DoseError;
use dosescope_common::sandbox::SandboxClient as Client;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument, warn};

use super::{join_segments, PropertySource};

pub const PUBCHEM_API_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

const PROPERTY_LIST: &str =
    "MolecularFormula,MolecularWeight,XLogP,HBondDonorCount,HBondAcceptorCount,ExactMass,TPSA";

/// First property row for a compound, tagged with the name it was looked up by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolecularProperties {
    pub drug: String,
    pub molecular_formula: Option<String>,
    pub molecular_weight: Option<f64>,
    pub xlogp: Option<f64>,
    pub h_bond_donor_count: Option<u32>,
    pub h_bond_acceptor_count: Option<u32>,
    pub exact_mass: Option<f64>,
    pub tpsa: Option<f64>,
}

#[derive(Deserialize)]
struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties", default)]
    properties: Vec<PropertyRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PropertyRow {
    #[serde(default)]
    molecular_formula: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    molecular_weight: Option<f64>,
    #[serde(rename = "XLogP", default, deserialize_with = "number_or_string")]
    xlogp: Option<f64>,
    #[serde(default)]
    h_bond_donor_count: Option<u32>,
    #[serde(default)]
    h_bond_acceptor_count: Option<u32>,
    #[serde(default, deserialize_with = "number_or_string")]
    exact_mass: Option<f64>,
    #[serde(rename = "TPSA", default, deserialize_with = "number_or_string")]
    tpsa: Option<f64>,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Parses a PUG REST property-table body into the first row's properties.
pub fn parse_property_table(drug: &str, body: &str) -> Result<MolecularProperties, DoseError> {
    let response: PropertyResponse = serde_json::from_str(body)?;
    let row = response
        .property_table
        .properties
        .into_iter()
        .next()
        .ok_or_else(|| DoseError::Parse(format!("empty property table for {}", drug)))?;

    Ok(MolecularProperties {
        drug: drug.to_string(),
        molecular_formula: row.molecular_formula,
        molecular_weight: row.molecular_weight,
        xlogp: row.xlogp,
        h_bond_donor_count: row.h_bond_donor_count,
        h_bond_acceptor_count: row.h_bond_acceptor_count,
        exact_mass: row.exact_mass,
        tpsa: row.tpsa,
    })
}

/// PubChem client for molecular property lookups.
pub struct PubChemClient {
    client: Client,
    base_url: String,
}

impl PubChemClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, PUBCHEM_API_URL)
    }

    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self { client, base_url: base_url.to_string() }
    }

    fn property_url(&self, name: &str) -> Result<String, DoseError> {
        join_segments(
            &self.base_url,
            &["compound", "name", name, "property", PROPERTY_LIST, "JSON"],
        )
    }

    /// Single best-effort request; every failure mode is an `Err`.
    #[instrument(skip(self))]
    pub async fn try_fetch_properties(&self, name: &str) -> Result<MolecularProperties, DoseError> {
        let url = self.property_url(name)?;

        debug!(compound = name, "Fetching PubChem properties");

        let resp = self.client.get(&url)?.send().await?;

        if !resp.status().is_success() {
            return Err(DoseError::HttpStatus { status: resp.status().as_u16(), url });
        }

        let body = resp.text().await?;
        parse_property_table(name, &body)
    }
}

#[async_trait]
impl PropertySource for PubChemClient {
    async fn fetch_properties(&self, name: &str) -> Option<MolecularProperties> {
        match self.try_fetch_properties(name).await {
            Ok(props) => Some(props),
            Err(e) => {
                warn!(compound = name, error = %e, "PubChem lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHENYTOIN: &str = r#"{
      "PropertyTable": {
        "Properties": [
          {
            "CID": 1775,
            "MolecularFormula": "C15H12N2O2",
            "MolecularWeight": "252.27",
            "XLogP": 2.5,
            "HBondDonorCount": 2,
            "HBondAcceptorCount": 2,
            "ExactMass": "252.089877630",
            "TPSA": 58.2
          }
        ]
      }
    }"#;

    #[test]
    fn test_parse_first_row_with_string_numbers() {
        let props = parse_property_table("phenytoin", PHENYTOIN).unwrap();
        assert_eq!(props.drug, "phenytoin");
        assert_eq!(props.molecular_formula.as_deref(), Some("C15H12N2O2"));
        assert_eq!(props.molecular_weight, Some(252.27));
        assert_eq!(props.xlogp, Some(2.5));
        assert_eq!(props.h_bond_donor_count, Some(2));
        assert_eq!(props.exact_mass, Some(252.08987763));
        assert_eq!(props.tpsa, Some(58.2));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let body = r#"{"PropertyTable":{"Properties":[{"CID":1,"MolecularFormula":"H2O"}]}}"#;
        let props = parse_property_table("water", body).unwrap();
        assert_eq!(props.xlogp, None);
        assert_eq!(props.tpsa, None);
        assert_eq!(props.h_bond_acceptor_count, None);
    }

    #[test]
    fn test_empty_table_is_parse_error() {
        let body = r#"{"PropertyTable":{"Properties":[]}}"#;
        assert!(matches!(parse_property_table("x", body), Err(DoseError::Parse(_))));
    }

    #[test]
    fn test_fault_body_is_parse_error() {
        let body = r#"{"Fault":{"Code":"PUGREST.NotFound","Message":"No CID found"}}"#;
        assert!(matches!(parse_property_table("x", body), Err(DoseError::Parse(_))));
    }

    #[test]
    fn test_property_url() {
        let client = PubChemClient::new(Client::new().unwrap());
        let url = client.property_url("phenytoin").unwrap();
        assert_eq!(
            url,
            format!("{}/compound/name/phenytoin/property/{}/JSON", PUBCHEM_API_URL, PROPERTY_LIST)
        );
    }
}
