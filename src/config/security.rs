use crate::errors::InspectaError;

/// Config string values (region, repository ARNs, output directory) end up as
/// AWS CLI arguments and report paths. Reject anything that smells like shell
/// metacharacters or path traversal before it gets near a subprocess.
const DANGEROUS_PATTERNS: &[&str] = &[
    "../",
    "..\\",
    "$(",
    "`",
    ";",
    "|",
    "&",
    ">",
    "<",
];

pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), InspectaError> {
    check_value(value, &[])?;
    Ok(())
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), InspectaError> {
    match value {
        serde_yaml::Value::String(s) => {
            for pattern in DANGEROUS_PATTERNS {
                if s.contains(pattern) {
                    let path_str = if path.is_empty() { "root".to_string() } else { path.join(".") };
                    return Err(InspectaError::Config(
                        format!("Dangerous pattern '{}' found at config path: {}", pattern, path_str)
                    ));
                }
            }
            Ok(())
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or("unknown").to_string();
                let mut new_path = path.to_vec();
                new_path.push(key);
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let mut new_path = path.to_vec();
                new_path.push(format!("[{}]", i));
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
