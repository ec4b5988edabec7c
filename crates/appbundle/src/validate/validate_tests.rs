#![allow(non_snake_case)]

use super::*;
use serde_json::json;

fn valid_manifest() -> Value {
    json!({
        "guid": "6c7b3f2a-8d1e-4b5f-9a0c-2e4d6f8a1b3c",
        "name": "Task Board Helper",
        "version": 1.2,
        "author": "Example Ltd",
        "menus": [{
            "pageId": 9,
            "caption": "Helper",
            "isActive": true,
            "entries": [{
                "name": "refresh",
                "caption": "Refresh",
                "actionTypeId": 2,
                "action": "refresh"
            }]
        }],
        "pageContents": [{ "pageId": 9, "name": "main", "code": "file://main.js" }],
        "pageColumns": [{ "pageId": 3, "name": "col", "caption": "Column", "template": "file://col.html" }],
        "dashboards": [{ "dashboardTypeId": 1, "name": "widget", "code": "file://widget.js" }],
        "settingGroups": [{ "name": "general", "caption": "General" }],
        "settings": [{ "settingTypeId": 1, "name": "apiKey", "caption": "API key", "isSecure": true, "position": 1 }],
        "productSettings": [{ "settingTypeId": 2, "name": "limit", "caption": "Limit", "artifactTypeId": -3 }]
    })
}

fn kinds(report: &ValidationReport) -> Vec<(&str, &ViolationKind)> {
    report
        .violations()
        .iter()
        .map(|v| (v.path.as_str(), &v.kind))
        .collect()
}

#[test]
fn validate___valid_manifest___has_no_violations() {
    let report = validate(&valid_manifest(), &Schema::default());

    assert!(report.is_valid(), "{:?}", report.violations());
    assert_eq!(report.error_count(), 0);
}

#[test]
fn validate___semver_string_version___is_valid() {
    let mut manifest = valid_manifest();
    manifest["version"] = json!("1.0.3");

    let report = validate(&manifest, &Schema::default());

    assert!(report.is_valid(), "{:?}", report.violations());
}

#[test]
fn validate___missing_guid___reports_required_key() {
    let mut manifest = valid_manifest();
    manifest.as_object_mut().unwrap().remove("guid");

    let report = validate(&manifest, &Schema::default());

    assert_eq!(report.error_count(), 1);
    assert_eq!(
        kinds(&report),
        vec![("guid", &ViolationKind::RequiredKeyMissing)]
    );
}

#[test]
fn validate___unknown_root_key___reports_key_not_allowed() {
    let mut manifest = valid_manifest();
    manifest["unexpected"] = json!("value");

    let report = validate(&manifest, &Schema::default());

    assert_eq!(
        kinds(&report),
        vec![("unexpected", &ViolationKind::KeyNotAllowed)]
    );
}

#[test]
fn validate___null_required_value___counts_as_present() {
    let mut manifest = valid_manifest();
    manifest["name"] = Value::Null;

    let report = validate(&manifest, &Schema::default());

    assert!(report.is_valid(), "{:?}", report.violations());
}

#[test]
fn validate___nested_menu_entry_errors___are_reported_with_path() {
    let mut manifest = valid_manifest();
    manifest["menus"][0]["entries"][0]
        .as_object_mut()
        .unwrap()
        .remove("action");
    manifest["menus"][0]["entries"][0]["actionTypeId"] = json!(3);

    let report = validate(&manifest, &Schema::default());

    let paths: Vec<&str> = report.violations().iter().map(|v| v.path.as_str()).collect();
    assert_eq!(report.error_count(), 2);
    assert!(paths.contains(&"menus[0].entries[0].actionTypeId"));
    assert!(paths.contains(&"menus[0].entries[0].action"));
}

#[test]
fn validate___collects_every_violation() {
    let manifest = json!({
        "name": "x",
        "bogus": 1,
        "settings": [{ "settingTypeId": 0, "name": "n", "caption": "c", "isSecure": "yes" }],
        "dashboards": [{ "dashboardTypeId": 9 }]
    });

    let report = validate(&manifest, &Schema::default());

    // guid, version, bogus, settingTypeId, isSecure, dashboardTypeId, dashboard name
    assert_eq!(report.error_count(), 7);
}

#[test]
fn validate___non_mapping_element___reports_not_a_mapping() {
    let mut manifest = valid_manifest();
    manifest["settingGroups"] = json!(["general"]);

    let report = validate(&manifest, &Schema::default());

    assert_eq!(
        kinds(&report),
        vec![("settingGroups[0]", &ViolationKind::NotAMapping)]
    );
}

#[test]
fn validate___non_mapping_root___reports_not_a_mapping() {
    let report = validate(&json!(["not", "a", "manifest"]), &Schema::default());

    assert_eq!(kinds(&report), vec![("", &ViolationKind::NotAMapping)]);
}

#[test]
fn validate___array_field_with_scalar___is_not_value_checked() {
    let mut manifest = valid_manifest();
    manifest["menus"] = json!("none");

    let report = validate(&manifest, &Schema::default());

    assert!(report.is_valid());
}

#[test]
fn validate___zero_version___is_accepted() {
    let mut manifest = valid_manifest();
    manifest["version"] = json!(0);

    let report = validate(&manifest, &Schema::default());

    assert!(report.is_valid(), "{:?}", report.violations());
}

#[test]
fn validate___negative_version___is_out_of_range() {
    let mut manifest = valid_manifest();
    manifest["version"] = json!(-1.5);

    let report = validate(&manifest, &Schema::default());

    assert_eq!(report.error_count(), 1);
    assert!(matches!(
        report.violations()[0].kind,
        ViolationKind::OutOfRange { value, .. } if value == -1.5
    ));
}

#[test]
fn Violation___display___includes_path_and_reason() {
    let violation = Violation {
        path: "menus[0].caption".to_string(),
        kind: ViolationKind::TooLong {
            length: 300,
            max: 255,
        },
    };

    let text = violation.to_string();

    assert!(text.starts_with("menus[0].caption:"));
    assert!(text.contains("at most 255"));
}

#[test]
fn Violation___display___names_root_for_empty_path() {
    let violation = Violation {
        path: String::new(),
        kind: ViolationKind::NotAMapping,
    };

    assert_eq!(violation.to_string(), "root: expected a mapping");
}

#[test]
fn Violation___display___shows_range() {
    let violation = Violation {
        path: "menus[0].pageId".to_string(),
        kind: ViolationKind::OutOfRange {
            value: 22.0,
            min: Some(1.0),
            max: Some(21.0),
        },
    };

    assert_eq!(
        violation.to_string(),
        "menus[0].pageId: 22 was not in the allowed range of 1 to 21"
    );
}
