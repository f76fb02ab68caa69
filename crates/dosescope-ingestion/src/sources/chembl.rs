//! ChEMBL bioactivity client.
//!
//! API docs: https://chembl.gitbook.io/chembl-interface-documentation/web-resources/chembl-api
//! Endpoint: https://www.ebi.ac.uk/chembl/api/data/activity?molecule_chembl_id=<ID>
//!
//! Without a format suffix the activity endpoint answers with XML:
//!   <response><activities><activity>...</activity>...</activities>...</response>
//! Each `activity` element is flattened into an `ActivityRecord` from its
//! direct child elements. Only the first page is read.

use async_trait::async_trait;
use dosescope_common::error::DoseError;
use dosescope_common::sandbox::SandboxClient as Client;
use dosescope_common::ActivityRecord;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, instrument, warn};

use super::{join_segments, BioactivitySource};

pub const CHEMBL_API_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";

/// ChEMBL client for per-molecule activity lists.
pub struct ChemblClient {
    client: Client,
    base_url: String,
}

impl ChemblClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, CHEMBL_API_URL)
    }

    pub fn with_base_url(client: Client, base_url: &str) -> Self {
        Self { client, base_url: base_url.to_string() }
    }

    /// Single best-effort request; every failure mode is an `Err`.
    #[instrument(skip(self))]
    pub async fn try_fetch_activities(&self, chembl_id: &str) -> Result<Vec<ActivityRecord>, DoseError> {
        let url = join_segments(&self.base_url, &["activity"])?;

        debug!(chembl_id = chembl_id, "Fetching ChEMBL activities");

        let resp = self.client
            .get(&url)?
            .query(&[("molecule_chembl_id", chembl_id)])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DoseError::HttpStatus { status: resp.status().as_u16(), url });
        }

        let xml = resp.text().await?;
        let activities = parse_activity_xml(&xml)?;
        debug!(chembl_id = chembl_id, count = activities.len(), "Parsed ChEMBL activities");
        Ok(activities)
    }
}

#[async_trait]
impl BioactivitySource for ChemblClient {
    async fn fetch_activities(&self, chembl_id: &str) -> Vec<ActivityRecord> {
        match self.try_fetch_activities(chembl_id).await {
            Ok(activities) => activities,
            Err(e) => {
                warn!(chembl_id = chembl_id, error = %e, "ChEMBL lookup failed");
                Vec::new()
            }
        }
    }
}

// ── XML parsing ───────────────────────────────────────────────────────────────

/// Child elements collected for one open `<activity>`.
#[derive(Default)]
struct PartialActivity {
    depth: usize,
    activity_id: Option<String>,
    assay_description: Option<String>,
    standard_type: Option<String>,
    standard_value: Option<String>,
    standard_units: Option<String>,
    target_organism: Option<String>,
    target_pref_name: Option<String>,
}

impl PartialActivity {
    fn set(&mut self, field: &[u8], text: String) {
        let text = if text.is_empty() { None } else { Some(text) };
        match field {
            b"activity_id"       => self.activity_id = text,
            b"assay_description" => self.assay_description = text,
            b"standard_type"     => self.standard_type = text,
            b"standard_value"    => self.standard_value = text,
            b"standard_units"    => self.standard_units = text,
            b"target_organism"   => self.target_organism = text,
            b"target_pref_name"  => self.target_pref_name = text,
            _ => {}
        }
    }

    fn finish(self) -> Option<ActivityRecord> {
        let activity_id = self.activity_id?;
        Some(ActivityRecord {
            activity_id,
            assay_description: self.assay_description,
            standard_type: self.standard_type,
            standard_value: self.standard_value.and_then(|v| v.trim().parse().ok()),
            standard_units: self.standard_units,
            target_organism: self.target_organism,
            target_pref_name: self.target_pref_name,
        })
    }
}

/// Parse a ChEMBL activity XML document into records.
///
/// `activity` elements are matched at any depth; only their direct children
/// are read, so nested blocks such as `activity_properties` cannot shadow a
/// top-level field. Activities without an `activity_id` are skipped.
pub fn parse_activity_xml(xml: &str) -> Result<Vec<ActivityRecord>, DoseError> {
    let mut records = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut open: Vec<PartialActivity> = Vec::new();
    // (depth, element name, accumulated text) of the field being read
    let mut field: Option<(usize, Vec<u8>, String)> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let name = e.name().as_ref().to_vec();
                if name == b"activity" {
                    open.push(PartialActivity { depth, ..Default::default() });
                } else if open.last().map(|a| a.depth + 1) == Some(depth) {
                    field = Some((depth, name, String::new()));
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"activity" {
                    warn!("Skipping empty activity element");
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some((d, _, ref mut text)) = field {
                    if d == depth {
                        let unescaped = e
                            .unescape()
                            .map_err(|err| DoseError::Parse(format!("ChEMBL XML: {}", err)))?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some((d, _, ref mut text)) = field {
                    if d == depth {
                        text.push_str(&String::from_utf8_lossy(e));
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if matches!(field, Some((d, _, _)) if d == depth) {
                    if let (Some((_, name, text)), Some(activity)) = (field.take(), open.last_mut()) {
                        activity.set(&name, text);
                    }
                } else if e.name().as_ref() == b"activity"
                    && open.last().map(|a| a.depth) == Some(depth)
                {
                    if let Some(partial) = open.pop() {
                        match partial.finish() {
                            Some(record) => records.push(record),
                            None => warn!("Skipping activity without activity_id"),
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DoseError::Parse(format!(
                    "ChEMBL XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if !open.is_empty() {
        return Err(DoseError::Parse("ChEMBL XML ended inside an activity element".to_string()));
    }

    Ok(records)
}
