use serde_json::Value;

use super::kind::{DetailField, ResourceKind};
use super::path::{field_or_null, first, get_path, path_or_null};
use super::record::{BasicInfo, KindDetails, VendorInfo, VulnerabilityDetails};

/// Identity fields, copied verbatim by key.
pub fn basic_info(raw: &Value, kind: ResourceKind) -> BasicInfo {
    BasicInfo {
        service: kind.as_str().to_string(),
        finding_arn: field_or_null(raw, "findingArn"),
        first_observed_at: field_or_null(raw, "firstObservedAt"),
        last_observed_at: field_or_null(raw, "lastObservedAt"),
        status: field_or_null(raw, "status"),
        finding_type: field_or_null(raw, "type"),
        severity: field_or_null(raw, "severity"),
        title: field_or_null(raw, "title"),
        description: field_or_null(raw, "description"),
    }
}

/// Kind-gated payload from `resources[0].details`.
///
/// A missing or empty `resources` list yields absent-markers, never a failed
/// record. Lambda additionally carries the top-level
/// `codeVulnerabilityDetails` field.
pub fn kind_specific_info(raw: &Value, kind: ResourceKind) -> KindDetails {
    let detail = |name: &str| -> Value {
        raw.get("resources")
            .and_then(first)
            .and_then(|resource| get_path(resource, &["details", name]))
            .cloned()
            .unwrap_or(Value::Null)
    };

    let mut details = KindDetails::default();
    match kind.detail_field() {
        Some(DetailField::LambdaFunction) => {
            details.code_vulnerability_details = field_or_null(raw, "codeVulnerabilityDetails");
            details.aws_lambda_function = detail("awsLambdaFunction");
        }
        Some(DetailField::Ec2Instance) => {
            details.aws_ec2_instance = detail("awsEc2Instance");
        }
        Some(DetailField::EcrContainerImage) => {
            details.aws_ecr_container_image = detail("awsEcrContainerImage");
        }
        None => {}
    }
    details
}

/// Scoring fields, kind-independent. CVSS v2/v3 come from the first entry of
/// `packageVulnerabilityDetails.cvss` only.
pub fn vulnerability_details(raw: &Value) -> VulnerabilityDetails {
    let cvss_first = get_path(raw, &["packageVulnerabilityDetails", "cvss"]).and_then(first);
    let cvss = |key: &str| -> Value {
        cvss_first
            .and_then(|entry| entry.get(key))
            .cloned()
            .unwrap_or(Value::Null)
    };

    VulnerabilityDetails {
        epss: path_or_null(raw, &["epss", "score"]),
        fix_available: field_or_null(raw, "fixAvailable"),
        inspector_score_details: field_or_null(raw, "inspectorScoreDetails"),
        cvss2: cvss("cvss2"),
        cvss3: cvss("cvss3"),
        atig_data: field_or_null(raw, "atigData"),
    }
}

/// Vendor metadata from `packageVulnerabilityDetails`, each field
/// independently absent-markable.
pub fn vendor_info(raw: &Value) -> VendorInfo {
    let vendor = |key: &str| path_or_null(raw, &["packageVulnerabilityDetails", key]);

    VendorInfo {
        reference_urls: vendor("referenceUrls"),
        source: vendor("source"),
        source_url: vendor("sourceUrl"),
        vendor_severity: vendor("vendorSeverity"),
        vendor_created_at: vendor("vendorCreatedAt"),
        vendor_updated_at: vendor("vendorUpdatedAt"),
        related_vulnerabilities: vendor("relatedVulnerabilities"),
        vulnerable_packages: vendor("vulnerablePackages"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_info_copies_identity_fields() {
        let raw = json!({
            "findingArn": "arn:aws:inspector2:::finding/1",
            "firstObservedAt": "2025-05-01T10:00:00Z",
            "status": "ACTIVE",
            "type": "PACKAGE_VULNERABILITY",
            "severity": "HIGH",
            "title": "CVE-2024-0001",
            "description": "A vulnerable package"
        });
        let basic = basic_info(&raw, ResourceKind::Ec2);
        assert_eq!(basic.service, "EC2");
        assert_eq!(basic.finding_arn, json!("arn:aws:inspector2:::finding/1"));
        assert_eq!(basic.severity, json!("HIGH"));
        // Missing field maps to the absent-marker
        assert_eq!(basic.last_observed_at, Value::Null);
    }

    #[test]
    fn test_kind_specific_lambda_populates_both_lambda_fields() {
        let raw = json!({
            "codeVulnerabilityDetails": {"detectorName": "injection"},
            "resources": [{"details": {"awsLambdaFunction": {"functionName": "orders"}}}]
        });
        let details = kind_specific_info(&raw, ResourceKind::Lambda);
        assert_eq!(details.code_vulnerability_details, json!({"detectorName": "injection"}));
        assert_eq!(details.aws_lambda_function, json!({"functionName": "orders"}));
        assert_eq!(details.aws_ec2_instance, Value::Null);
        assert_eq!(details.aws_ecr_container_image, Value::Null);
    }

    #[test]
    fn test_kind_gating_not_just_key_presence() {
        // The same raw record, read under the wrong kind, yields markers:
        // population is gated on the kind, not on what the payload offers.
        let raw = json!({
            "resources": [{"details": {"awsLambdaFunction": {"functionName": "orders"}}}]
        });
        let details = kind_specific_info(&raw, ResourceKind::Ec2);
        assert_eq!(details.aws_lambda_function, Value::Null);
        assert_eq!(details.aws_ec2_instance, Value::Null);
    }

    #[test]
    fn test_kind_specific_eks_reads_container_image() {
        let raw = json!({
            "resources": [{"details": {"awsEcrContainerImage": {"imageHash": "sha256:abc"}}}]
        });
        for kind in [ResourceKind::Eks, ResourceKind::EcrRepository] {
            let details = kind_specific_info(&raw, kind);
            assert_eq!(details.aws_ecr_container_image, json!({"imageHash": "sha256:abc"}));
            assert_eq!(details.aws_lambda_function, Value::Null);
        }
    }

    #[test]
    fn test_kind_specific_rds_and_cis_all_absent() {
        let raw = json!({
            "resources": [{"details": {"awsEc2Instance": {"instanceId": "i-1"}}}]
        });
        for kind in [ResourceKind::Rds, ResourceKind::Cis] {
            let details = kind_specific_info(&raw, kind);
            assert_eq!(details, KindDetails::default());
        }
    }

    #[test]
    fn test_kind_specific_tolerates_missing_resources() {
        for raw in [json!({}), json!({"resources": []}), json!({"resources": "bogus"})] {
            let details = kind_specific_info(&raw, ResourceKind::Ec2);
            assert_eq!(details.aws_ec2_instance, Value::Null);
        }
    }

    #[test]
    fn test_vulnerability_details_takes_first_cvss_entry() {
        let raw = json!({
            "packageVulnerabilityDetails": {
                "cvss": [
                    {"cvss2": {"baseScore": 5.0}, "cvss3": {"baseScore": 7.5}},
                    {"cvss2": {"baseScore": 9.9}, "cvss3": {"baseScore": 9.9}}
                ]
            }
        });
        let vuln = vulnerability_details(&raw);
        assert_eq!(vuln.cvss2, json!({"baseScore": 5.0}));
        assert_eq!(vuln.cvss3, json!({"baseScore": 7.5}));
    }

    #[test]
    fn test_vulnerability_details_empty_cvss_list() {
        let raw = json!({"packageVulnerabilityDetails": {"cvss": []}});
        let vuln = vulnerability_details(&raw);
        assert_eq!(vuln.cvss2, Value::Null);
        assert_eq!(vuln.cvss3, Value::Null);
    }

    #[test]
    fn test_vulnerability_details_epss_and_passthrough() {
        let raw = json!({
            "epss": {"score": 0.00042},
            "fixAvailable": "YES",
            "inspectorScoreDetails": {"adjustedCvss": {"score": 7.8}},
            "atigData": {"firstSeen": "2025-01-01"}
        });
        let vuln = vulnerability_details(&raw);
        assert_eq!(vuln.epss, json!(0.00042));
        assert_eq!(vuln.fix_available, json!("YES"));
        assert_eq!(vuln.inspector_score_details, json!({"adjustedCvss": {"score": 7.8}}));
        assert_eq!(vuln.atig_data, json!({"firstSeen": "2025-01-01"}));
    }

    #[test]
    fn test_vendor_info_reads_package_vulnerability_details() {
        let raw = json!({
            "packageVulnerabilityDetails": {
                "referenceUrls": ["https://nvd.nist.gov/vuln/detail/CVE-2024-0001"],
                "source": "NVD",
                "sourceUrl": "https://nvd.nist.gov",
                "vendorSeverity": "Important",
                "vendorCreatedAt": "2024-01-02T00:00:00Z",
                "relatedVulnerabilities": ["CVE-2023-9999"],
                "vulnerablePackages": [{"name": "openssl", "version": "1.1.1"}]
            }
        });
        let vendor = vendor_info(&raw);
        assert_eq!(vendor.source, json!("NVD"));
        assert_eq!(vendor.vendor_severity, json!("Important"));
        assert_eq!(vendor.vulnerable_packages, json!([{"name": "openssl", "version": "1.1.1"}]));
        // vendorUpdatedAt was not supplied
        assert_eq!(vendor.vendor_updated_at, Value::Null);
    }

    #[test]
    fn test_vendor_info_missing_block_entirely() {
        let vendor = vendor_info(&json!({}));
        assert_eq!(vendor, VendorInfo::default());
    }
}
