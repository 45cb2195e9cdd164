use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One flat, fixed-schema finding record.
///
/// Every key is always present in the serialized output; source data that is
/// missing maps to an explicit `null` (and `resources` to `[]`), never to an
/// omitted key. Downstream report consumers rely on this and must not branch
/// on key existence. The four sections are flattened into a single JSON
/// object; their key sets are disjoint by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFinding {
    #[serde(flatten)]
    pub basic: BasicInfo,
    #[serde(flatten)]
    pub details: KindDetails,
    #[serde(flatten)]
    pub vulnerability: VulnerabilityDetails,
    #[serde(flatten)]
    pub vendor: VendorInfo,

    #[serde(rename = "networkReachabilityDetails")]
    pub network_reachability_details: Value,
    /// Text of `remediation.recommendation.text`.
    pub remediation: Value,
    /// The source field is spelled `remediation.recommendation.Url` upstream;
    /// consumed verbatim.
    #[serde(rename = "remediationUrl")]
    pub remediation_url: Value,
    /// Raw `resources` list, passed through untouched. Defaults to `[]`.
    pub resources: Value,
    #[serde(rename = "createdAt")]
    pub created_at: Value,
    #[serde(rename = "updatedAt")]
    pub updated_at: Value,
}

/// Identity fields, pulled directly by key. No kind-dependent logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(rename = "AWS Service")]
    pub service: String,
    #[serde(rename = "findingArn")]
    pub finding_arn: Value,
    #[serde(rename = "firstObservedAt")]
    pub first_observed_at: Value,
    #[serde(rename = "lastObservedAt")]
    pub last_observed_at: Value,
    pub status: Value,
    #[serde(rename = "type")]
    pub finding_type: Value,
    pub severity: Value,
    pub title: Value,
    pub description: Value,
}

/// Kind-specific payload. At most one field is populated per record; the
/// others stay at the absent-marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KindDetails {
    #[serde(rename = "codeVulnerabilityDetails")]
    pub code_vulnerability_details: Value,
    #[serde(rename = "awsLambdaFunction")]
    pub aws_lambda_function: Value,
    #[serde(rename = "awsEc2Instance")]
    pub aws_ec2_instance: Value,
    #[serde(rename = "awsEcrContainerImage")]
    pub aws_ecr_container_image: Value,
}

/// Vulnerability scoring, kind-independent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VulnerabilityDetails {
    /// The `epss.score` value.
    pub epss: Value,
    #[serde(rename = "fixAvailable")]
    pub fix_available: Value,
    #[serde(rename = "inspectorScoreDetails")]
    pub inspector_score_details: Value,
    /// `packageVulnerabilityDetails.cvss[0].cvss2`; later list entries are
    /// ignored.
    pub cvss2: Value,
    pub cvss3: Value,
    #[serde(rename = "atigData")]
    pub atig_data: Value,
}

/// Vendor and remediation metadata from `packageVulnerabilityDetails`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VendorInfo {
    #[serde(rename = "referenceUrls")]
    pub reference_urls: Value,
    pub source: Value,
    #[serde(rename = "sourceUrl")]
    pub source_url: Value,
    #[serde(rename = "vendorSeverity")]
    pub vendor_severity: Value,
    #[serde(rename = "vendorCreatedAt")]
    pub vendor_created_at: Value,
    #[serde(rename = "vendorUpdatedAt")]
    pub vendor_updated_at: Value,
    #[serde(rename = "relatedVulnerabilities")]
    pub related_vulnerabilities: Value,
    #[serde(rename = "vulnerablePackages")]
    pub vulnerable_packages: Value,
}

/// Number of keys in the serialized record. The schema is fixed; every record
/// serializes to exactly this many keys.
pub const RECORD_KEY_COUNT: usize = 33;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_record_is_flat_with_fixed_keys() {
        let record = NormalizedFinding {
            basic: BasicInfo {
                service: "EC2".to_string(),
                finding_arn: Value::Null,
                first_observed_at: Value::Null,
                last_observed_at: Value::Null,
                status: Value::Null,
                finding_type: Value::Null,
                severity: Value::Null,
                title: Value::Null,
                description: Value::Null,
            },
            details: KindDetails::default(),
            vulnerability: VulnerabilityDetails::default(),
            vendor: VendorInfo::default(),
            network_reachability_details: Value::Null,
            remediation: Value::Null,
            remediation_url: Value::Null,
            resources: Value::Array(Vec::new()),
            created_at: Value::Null,
            updated_at: Value::Null,
        };

        let json = serde_json::to_value(&record).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), RECORD_KEY_COUNT);
        // Sections flatten into a single level
        assert!(map.contains_key("AWS Service"));
        assert!(map.contains_key("awsEc2Instance"));
        assert!(map.contains_key("cvss3"));
        assert!(map.contains_key("vulnerablePackages"));
        assert!(map.contains_key("remediationUrl"));
        // Absent-markers serialize, not vanish
        assert_eq!(map["findingArn"], Value::Null);
        assert_eq!(map["resources"], serde_json::json!([]));
    }

    #[test]
    fn test_record_round_trips() {
        let record = NormalizedFinding {
            basic: BasicInfo {
                service: "Lambda".to_string(),
                finding_arn: serde_json::json!("arn:aws:inspector2:::finding/1"),
                first_observed_at: Value::Null,
                last_observed_at: Value::Null,
                status: serde_json::json!("ACTIVE"),
                finding_type: Value::Null,
                severity: serde_json::json!("HIGH"),
                title: Value::Null,
                description: Value::Null,
            },
            details: KindDetails {
                aws_lambda_function: serde_json::json!({"functionName": "fn"}),
                ..Default::default()
            },
            vulnerability: VulnerabilityDetails::default(),
            vendor: VendorInfo::default(),
            network_reachability_details: Value::Null,
            remediation: Value::Null,
            remediation_url: Value::Null,
            resources: Value::Array(Vec::new()),
            created_at: Value::Null,
            updated_at: Value::Null,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: NormalizedFinding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
