mod support;

use braid_core::error::Error;
use braid_core::merge::{merge_docs, ArrayHandler, ObjectHandler, SectionRegistry};

use support::{acl_parent, doc};

fn object_registry(name: &str) -> SectionRegistry {
    let mut registry = SectionRegistry::new();
    registry.register(name, ObjectHandler);
    registry
}

#[test]
fn merge_into_empty_parent_adopts_child_sections() {
    let mut parent = doc("parent", "{\n\t// empty parent\n}");
    let child = doc("child", r#"{"goodpath": {"foo": "bar"}}"#);

    merge_docs(&object_registry("goodpath"), &mut parent, &[child]).unwrap();

    assert_eq!(parent.root.len(), 1);
    assert_eq!(parent.root.index_of("goodpath"), Some(0));
}

#[test]
fn merge_appends_section_missing_from_parent() {
    let mut parent = acl_parent();
    let child = doc("child", r#"{"goodpath": {"foo": "bar"}}"#);

    merge_docs(&object_registry("goodpath"), &mut parent, &[child]).unwrap();

    assert_eq!(parent.root.len(), 5);
    assert!(parent.root.find("goodpath").is_some());
}

#[test]
fn merge_folds_shared_section_key_by_key() {
    let mut parent = doc("parent", r#"{"goodpath": {"bar": "foo"}}"#);
    let child = doc("child", r#"{"goodpath": {"foo": "bar"}}"#);

    merge_docs(&object_registry("goodpath"), &mut parent, &[child]).unwrap();

    assert_eq!(parent.root.len(), 1);
    assert_eq!(parent.root.index_of("goodpath"), Some(0));
    let section = parent.root.get("goodpath").unwrap().as_object().unwrap();
    assert_eq!(section.len(), 2);
}

#[test]
fn path_comments_for_object_members() {
    let mut parent = doc("parent", r#"{"goodpath": {"bar": "foo"}}"#);
    let child = doc("child", r#"{"goodpath": {"foo": "bar"}}"#);

    merge_docs(&object_registry("goodpath"), &mut parent, &[child]).unwrap();

    let section = parent.root.get("goodpath").unwrap().as_object().unwrap();
    assert_eq!(section.len(), 2);

    let bar = section.find("bar").unwrap();
    assert_eq!(bar.value.as_scalar().unwrap().text(), "foo");
    assert_eq!(bar.comments.before[0], "from `parent`");

    let foo = section.find("foo").unwrap();
    assert_eq!(foo.value.as_scalar().unwrap().text(), "bar");
    assert_eq!(foo.comments.before[0], "from `child`");
}

#[test]
fn path_comments_for_array_elements() {
    let mut parent = doc("parent", r#"{"things": [{"thing1": "foo"}]}"#);
    let child = doc("child", r#"{"things": [{"thing2": "bar"}]}"#);

    let mut registry = SectionRegistry::new();
    registry.register("things", ArrayHandler);
    merge_docs(&registry, &mut parent, &[child]).unwrap();

    assert_eq!(parent.root.len(), 1);
    let things = parent.root.get("things").unwrap().as_array().unwrap();
    assert_eq!(things.len(), 2);

    let first = things.values[0].as_object().unwrap();
    assert_eq!(first.members[0].key.text(), "thing1");
    assert_eq!(first.members[0].value.as_scalar().unwrap().text(), "foo");
    assert_eq!(things.values[0].comments().before[0], "from `parent`");

    let second = things.values[1].as_object().unwrap();
    assert_eq!(second.members[0].key.text(), "thing2");
    assert_eq!(second.members[0].value.as_scalar().unwrap().text(), "bar");
    assert_eq!(things.values[1].comments().before[0], "from `child`");
}

#[test]
fn unknown_child_section_fails_without_mutating_parent() {
    let mut parent = acl_parent();
    let snapshot = parent.root.clone();
    let child = doc(
        "tenants/acme.hujson",
        r#"{"groups": {"group:acme": ["a@acme.test"]}, "bogus": {}}"#,
    );

    let err = merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap_err();

    match err {
        Error::UnknownSection { section, path } => {
            assert_eq!(section, "bogus");
            assert_eq!(path, "tenants/acme.hujson");
        }
        other => panic!("expected unknown section, got {other:?}"),
    }
    assert_eq!(parent.root, snapshot);
}

#[test]
fn scalar_clash_keeps_parent_value() {
    let mut parent = doc("parent", r#"{"hosts": {"host1": "100.99.98.97"}}"#);
    let child = doc("child", r#"{"hosts": {"host1": "203.0.113.1"}}"#);

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap();

    let hosts = parent.root.get("hosts").unwrap().as_object().unwrap();
    assert_eq!(hosts.len(), 1);
    assert_eq!(
        hosts.get("host1").unwrap().as_scalar().unwrap().text(),
        "100.99.98.97"
    );
}

#[test]
fn child_fills_empty_parent_object_section() {
    let mut parent = doc("parent", r#"{"hosts":{}}"#);
    let child = doc("child", "{\n\t\"hosts\": {\n\t\t\"host1\": \"100.99.98.97\",\n\t}\n}");

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap();

    let hosts = parent.root.get("hosts").unwrap().as_object().unwrap();
    assert_eq!(hosts.len(), 1);
}

#[test]
fn child_fills_empty_parent_array_section() {
    let mut parent = doc("parent", r#"{"acls":[]}"#);
    let child = doc(
        "child",
        r#"{"acls": [{"action": "accept", "src": ["finance1"], "dst": ["tag:demo-infra:22"]}]}"#,
    );

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap();

    let acls = parent.root.get("acls").unwrap().as_array().unwrap();
    assert_eq!(acls.len(), 1);
}

#[test]
fn empty_child_object_section_leaves_parent_intact() {
    let mut parent = doc("parent", r#"{"hosts": {"host1": "100.99.98.97"}}"#);
    let child = doc("child", r#"{"hosts":{}}"#);

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap();

    let hosts = parent.root.get("hosts").unwrap().as_object().unwrap();
    assert_eq!(hosts.len(), 1);
}

#[test]
fn empty_child_array_section_leaves_parent_intact() {
    let mut parent = doc(
        "parent",
        r#"{"acls": [{"action": "accept", "src": ["finance1"], "dst": ["tag:demo-infra:22"]}]}"#,
    );
    let child = doc("child", r#"{"acls":[]}"#);

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap();

    let acls = parent.root.get("acls").unwrap().as_array().unwrap();
    assert_eq!(acls.len(), 1);
}

#[test]
fn empty_child_document_is_identity() {
    let mut parent = acl_parent();
    let child = doc("child", "{}");

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap();

    assert_eq!(parent.root.len(), 4);
    let groups = parent.root.get("groups").unwrap().as_object().unwrap();
    assert_eq!(groups.len(), 2);
}

#[test]
fn finalization_orders_sections_lexically() {
    let mut parent = acl_parent();
    let child = doc(
        "child",
        r#"{
		"autoApprovers": {
			"routes": {
				"10.0.1.0/24": ["group:engineering", "alice@example.com", "tag:foo"],
			},
			"exitNode": ["tag:foo"],
		},
	}"#,
    );

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap();

    let expected = ["acls", "autoApprovers", "groups", "tagOwners"];
    for (i, name) in expected.iter().enumerate() {
        assert_eq!(
            parent.root.members[i].key.text(),
            *name,
            "section `{name}` should be at position {i}"
        );
    }
}

#[test]
fn merge_is_idempotent_for_repeated_children() {
    let mut parent = doc("parent", r#"{"groups": {"group:shared": ["user-a@example.com"]}}"#);
    let child = doc("child", r#"{"groups": {"group:shared": ["user-b@example.com"]}}"#);

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child.clone()]).unwrap();
    let snapshot = parent.root.clone();

    merge_docs(&SectionRegistry::predefined(), &mut parent, &[child]).unwrap();

    assert_eq!(parent.root, snapshot);
}
