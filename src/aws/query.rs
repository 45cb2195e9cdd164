use serde_json::json;

/// Build the Inspector2 `--filter-criteria` JSON for a resource type, with an
/// optional exact-match resource ARN.
pub fn filter_criteria(resource_type: &str, resource_arn: Option<&str>) -> String {
    let mut criteria = json!({
        "resourceType": [{
            "comparison": "EQUALS",
            "value": resource_type
        }]
    });
    if let Some(arn) = resource_arn {
        criteria["resourceArn"] = json!([{
            "comparison": "EQUALS",
            "value": arn
        }]);
    }
    criteria.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_filter_criteria_type_only() {
        let criteria: Value = serde_json::from_str(&filter_criteria("CisBenchmark", None)).unwrap();
        assert_eq!(criteria["resourceType"][0]["comparison"], "EQUALS");
        assert_eq!(criteria["resourceType"][0]["value"], "CisBenchmark");
        assert!(criteria.get("resourceArn").is_none());
    }

    #[test]
    fn test_filter_criteria_with_arn() {
        let arn = "arn:aws:lambda:us-east-1:123456789012:function:orders";
        let criteria: Value =
            serde_json::from_str(&filter_criteria("LambdaFunction", Some(arn))).unwrap();
        assert_eq!(criteria["resourceType"][0]["value"], "LambdaFunction");
        assert_eq!(criteria["resourceArn"][0]["value"], arn);
    }
}
