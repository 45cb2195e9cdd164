use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "services": {
                "type": "object",
                "properties": {
                    "lambda": { "type": "boolean" },
                    "eks": { "type": "boolean" },
                    "ec2": { "type": "boolean" },
                    "rds": { "type": "boolean" },
                    "ecr": { "type": "boolean" },
                    "cis": { "type": "boolean" }
                }
            },
            "ecr": {
                "type": "object",
                "properties": {
                    "repositories": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                }
            },
            "aws": {
                "type": "object",
                "properties": {
                    "region": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "max_attempts": { "type": "integer", "minimum": 1 }
                }
            },
            "output": {
                "type": "object",
                "properties": {
                    "directory": { "type": "string" }
                }
            }
        }
    })
});
