use serde_json::Value;
use tracing::{error, warn};

use super::extract::{basic_info, kind_specific_info, vendor_info, vulnerability_details};
use super::kind::ResourceKind;
use super::path::{field_or_null, path_or_null};
use super::record::NormalizedFinding;

/// Reduce a raw findings container to flat records.
///
/// Total over its inputs: an absent container, a malformed container, or a
/// malformed entry can only shrink the output, never raise. One bad record
/// must never abort the batch; a dropped entry is logged and the rest of the
/// batch keeps flowing into the report. Output preserves input order.
pub fn normalize(container: Option<&Value>, kind: ResourceKind) -> Vec<NormalizedFinding> {
    let Some(container) = container else {
        warn!(kind = %kind, "No findings returned");
        return Vec::new();
    };

    let Some(findings) = findings_list(container) else {
        error!(kind = %kind, "Findings payload is not a list");
        return Vec::new();
    };

    let mut extracted = Vec::with_capacity(findings.len());
    for (index, raw) in findings.iter().enumerate() {
        if !raw.is_object() {
            warn!(kind = %kind, index, "Skipping finding with invalid structure");
            continue;
        }
        extracted.push(build_record(raw, kind));
    }
    extracted
}

/// Boundary adapter for the two container shapes the command-execution
/// collaborator has produced over time: a bare array, or an object wrapping
/// the array under a `findings` key.
fn findings_list(container: &Value) -> Option<&Vec<Value>> {
    match container {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get("findings").and_then(Value::as_array),
        _ => None,
    }
}

fn build_record(raw: &Value, kind: ResourceKind) -> NormalizedFinding {
    NormalizedFinding {
        basic: basic_info(raw, kind),
        details: kind_specific_info(raw, kind),
        vulnerability: vulnerability_details(raw),
        vendor: vendor_info(raw),
        network_reachability_details: field_or_null(raw, "networkReachabilityDetails"),
        remediation: path_or_null(raw, &["remediation", "recommendation", "text"]),
        remediation_url: path_or_null(raw, &["remediation", "recommendation", "Url"]),
        resources: raw
            .get("resources")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
        created_at: field_or_null(raw, "createdAt"),
        updated_at: field_or_null(raw, "updatedAt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::record::RECORD_KEY_COUNT;
    use serde_json::json;

    #[test]
    fn test_absent_container_yields_empty() {
        for kind in ResourceKind::ALL {
            assert!(normalize(None, kind).is_empty());
        }
    }

    #[test]
    fn test_non_list_container_yields_empty() {
        for kind in ResourceKind::ALL {
            assert!(normalize(Some(&json!("not a list")), kind).is_empty());
            assert!(normalize(Some(&json!(42)), kind).is_empty());
            // Object without a findings array is malformed too
            assert!(normalize(Some(&json!({"other": []})), kind).is_empty());
            assert!(normalize(Some(&json!({"findings": "nope"})), kind).is_empty());
        }
    }

    #[test]
    fn test_empty_list_yields_empty() {
        for kind in ResourceKind::ALL {
            assert!(normalize(Some(&json!([])), kind).is_empty());
            assert!(normalize(Some(&json!({"findings": []})), kind).is_empty());
        }
    }

    #[test]
    fn test_wrapped_container_shape_accepted() {
        let wrapped = json!({"findings": [{"findingArn": "arn:1"}]});
        let records = normalize(Some(&wrapped), ResourceKind::Rds);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].basic.finding_arn, json!("arn:1"));
    }

    #[test]
    fn test_single_malformed_entry_dropped_without_panic() {
        let records = normalize(Some(&json!(["not-a-dict"])), ResourceKind::Lambda);
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_entries_skipped_order_preserved() {
        let input = json!([
            {"findingArn": "arn:2"},
            "not-a-dict",
            {"findingArn": "arn:3"}
        ]);
        let records = normalize(Some(&input), ResourceKind::Eks);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].basic.finding_arn, json!("arn:2"));
        assert_eq!(records[1].basic.finding_arn, json!("arn:3"));
    }

    #[test]
    fn test_output_length_is_input_minus_malformed() {
        let input = json!([{}, 1, {}, [], {}, "x"]);
        let records = normalize(Some(&input), ResourceKind::Cis);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_sparse_record_still_has_full_schema() {
        let records = normalize(Some(&json!([{}])), ResourceKind::Rds);
        assert_eq!(records.len(), 1);
        let map = serde_json::to_value(&records[0]).unwrap();
        let map = map.as_object().unwrap().clone();
        assert_eq!(map.len(), RECORD_KEY_COUNT);
        assert_eq!(map["AWS Service"], json!("RDS"));
        assert_eq!(map["severity"], Value::Null);
        assert_eq!(map["resources"], json!([]));
    }

    #[test]
    fn test_ec2_example_scenario() {
        let input = json!([{
            "findingArn": "arn:1",
            "severity": "HIGH",
            "resources": [{"details": {"awsEc2Instance": {"instanceId": "i-1"}}}]
        }]);
        let records = normalize(Some(&input), ResourceKind::Ec2);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.basic.finding_arn, json!("arn:1"));
        assert_eq!(record.basic.severity, json!("HIGH"));
        assert_eq!(record.details.aws_ec2_instance, json!({"instanceId": "i-1"}));
        assert_eq!(record.details.aws_lambda_function, Value::Null);
        assert_eq!(record.vendor.source, Value::Null);
        assert_eq!(record.vulnerability.cvss3, Value::Null);
        // The raw resources list passes through untouched
        assert_eq!(
            record.resources,
            json!([{"details": {"awsEc2Instance": {"instanceId": "i-1"}}}])
        );
    }

    #[test]
    fn test_remediation_fields_including_irregular_url_key() {
        let input = json!([{
            "remediation": {"recommendation": {"text": "Upgrade openssl", "Url": "https://example.com/fix"}}
        }]);
        let records = normalize(Some(&input), ResourceKind::Ec2);
        assert_eq!(records[0].remediation, json!("Upgrade openssl"));
        assert_eq!(records[0].remediation_url, json!("https://example.com/fix"));
    }
}
