//! Tests for CSV template export

use std::sync::Arc;

use tempfile::TempDir;

use treeselect::application::services::{TemplateOptions, TemplateService};
use treeselect::domain::{FieldDetail, FieldPayload};
use treeselect::infrastructure::traits::RealFileSystem;

fn field(id: &str, label: &str, key: &str) -> FieldDetail {
    FieldDetail {
        id: id.into(),
        label: label.into(),
        payload: FieldPayload {
            key: key.into(),
            group: None,
        },
    }
}

fn service() -> TemplateService {
    TemplateService::new(Arc::new(RealFileSystem))
}

#[test]
fn given_fields_when_rendering_then_header_row_of_labels() {
    let fields = vec![field("n", "Name", "name"), field("e", "Email", "email")];
    let text = service().render(&fields, &TemplateOptions::default());
    assert_eq!(text, "Name,Email\n");
}

#[test]
fn given_include_keys_when_rendering_then_second_row_of_keys() {
    let fields = vec![field("n", "Name", "name"), field("c", "City, State", "city")];
    let options = TemplateOptions {
        delimiter: ',',
        include_keys: true,
    };
    let text = service().render(&fields, &options);
    assert_eq!(text, "Name,\"City, State\"\nname,city\n");
}

#[test]
fn given_semicolon_delimiter_when_rendering_then_commas_are_not_quoted() {
    let fields = vec![field("c", "City, State", "city"), field("n", "Notes", "notes")];
    let options = TemplateOptions::from_delimiter(";", false).unwrap();
    assert_eq!(service().render(&fields, &options), "City, State;Notes\n");
}

#[test]
fn given_no_fields_when_rendering_then_empty() {
    assert_eq!(service().render(&[], &TemplateOptions::default()), "");
}

#[test]
fn given_output_path_in_new_directory_when_writing_then_creates_it() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out").join("template.csv");
    let fields = vec![field("n", "Name", "name")];

    service()
        .write(&fields, &TemplateOptions::default(), &path)
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Name\n");
}
