#![allow(dead_code)]

use braid_core::sources::Document;

/// Parent ACL template shared across merge tests.
pub const ACL_PARENT: &str = r#"{
	"groups": {
		"group:engineering": [
			"dave@example.com",
			"laura@example.com",
		],
		"group:sales": [
			"brad@example.com",
			"alice@example.com",
		],
	},
	"acls": [
		{
			"action": "accept",
			"src": ["group:security-team@example.com"],
			"dst": ["tag:logging:*"]
		}
	],
	"tagOwners": {
		"tag:logging": ["group:security-team@example.com"]
	},
	"autoApprovers": {
		"routes": {
			"192.0.2.0/24": ["group:engineering", "alice@example.com", "tag:foo"],
		},
		"exitNode": ["tag:bar"],
	},
}"#;

pub fn doc(path: &str, text: &str) -> Document {
    Document::parse(path, text).unwrap_or_else(|err| panic!("parse {path}: {err}"))
}

pub fn acl_parent() -> Document {
    doc("parent", ACL_PARENT)
}
