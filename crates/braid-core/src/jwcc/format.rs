//! Renders a JWCC tree back to text.
//!
//! House style matches hand-maintained policy files: tab indentation, one
//! member or element per line, trailing comma after the last entry of a
//! multiline container.

use super::{Array, Object, Value};

/// Render a document root, newline-terminated.
pub fn to_string(root: &Object) -> String {
    let mut out = String::new();
    write_comment_lines(&mut out, &root.comments.before, 0);
    write_object(&mut out, root, 0);
    out.push('\n');
    out
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Scalar(s) => out.push_str(s.raw()),
        Value::Array(a) => write_array(out, a, indent),
        Value::Object(o) => write_object(out, o, indent),
    }
}

fn write_object(out: &mut String, obj: &Object, indent: usize) {
    if obj.members.is_empty() && obj.comments.after.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    for member in &obj.members {
        write_comment_lines(out, &member.comments.before, indent + 1);
        push_indent(out, indent + 1);
        out.push_str(member.key.raw());
        out.push_str(": ");
        write_value(out, &member.value, indent + 1);
        out.push(',');
        if let Some(line) = &member.comments.line {
            out.push_str(" // ");
            out.push_str(line);
        }
        out.push('\n');
        write_comment_lines(out, &member.comments.after, indent + 1);
    }
    write_comment_lines(out, &obj.comments.after, indent + 1);
    push_indent(out, indent);
    out.push('}');
}

fn write_array(out: &mut String, arr: &Array, indent: usize) {
    if arr.values.is_empty() && arr.comments.after.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push_str("[\n");
    for value in &arr.values {
        write_comment_lines(out, &value.comments().before, indent + 1);
        push_indent(out, indent + 1);
        write_value(out, value, indent + 1);
        out.push(',');
        if let Some(line) = &value.comments().line {
            out.push_str(" // ");
            out.push_str(line);
        }
        out.push('\n');
        write_comment_lines(out, &value.comments().after, indent + 1);
    }
    write_comment_lines(out, &arr.comments.after, indent + 1);
    push_indent(out, indent);
    out.push(']');
}

fn write_comment_lines(out: &mut String, lines: &[String], indent: usize) {
    for line in lines {
        push_indent(out, indent);
        if line.is_empty() {
            out.push_str("//");
        } else {
            out.push_str("// ");
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push('\t');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwcc::parser::parse_document;

    #[test]
    fn formats_nested_document() {
        let root = parse_document(
            r#"{"groups": {"group:eng": ["dave@example.com", "laura@example.com"]}, "hosts": {}}"#,
        )
        .unwrap();

        let rendered = to_string(&root);
        assert_eq!(
            rendered,
            "{\n\t\"groups\": {\n\t\t\"group:eng\": [\n\t\t\t\"dave@example.com\",\n\t\t\t\"laura@example.com\",\n\t\t],\n\t},\n\t\"hosts\": {},\n}\n"
        );
    }

    #[test]
    fn emits_before_and_line_comments() {
        let root = parse_document(
            "{\n\t// owners\n\t\"tagOwners\": {}, // locked down\n}",
        )
        .unwrap();

        let rendered = to_string(&root);
        assert!(rendered.contains("\t// owners\n\t\"tagOwners\": {}, // locked down\n"));
    }

    #[test]
    fn round_trips_comment_trivia() {
        let source = "{\n\t// from `companies/acme/groups.hujson`\n\t\"groups\": {},\n}\n";
        let root = parse_document(source).unwrap();
        assert_eq!(to_string(&root), source);
    }

    #[test]
    fn keeps_dangling_comments_inside_container() {
        let root = parse_document("{\n\t// empty parent\n}").unwrap();
        assert_eq!(to_string(&root), "{\n\t// empty parent\n}\n");
    }

    #[test]
    fn preserves_scalar_lexemes() {
        let root = parse_document(r#"{"port": 443, "cidr": "192.0.2.0/24", "on": true}"#).unwrap();
        let rendered = to_string(&root);
        assert!(rendered.contains("\"port\": 443,"));
        assert!(rendered.contains("\"cidr\": \"192.0.2.0/24\","));
        assert!(rendered.contains("\"on\": true,"));
    }
}
