mod common;

use gradecalc::catalog::{lookup, LookupPolicy};
use gradecalc::screen::no_data_options;
use gradecalc::{CalcError, CatalogLoader, FsCatalogSource, GpaScreen, LoadOutcome};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn failed_reload_after_success_leaves_catalog_empty() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    common::write_catalog(dir.path(), "R2021", common::WORKED_EXAMPLE);
    let source = FsCatalogSource::new(dir.path());
    let mut loader = CatalogLoader::new();

    loader.load(&source, "R2021").await.unwrap();
    let scan = LookupPolicy::ScanSemesters;
    assert!(lookup(&loader.catalog(), "CSE", "CS101", &scan).is_some());

    std::fs::remove_file(dir.path().join("R2021.json")).unwrap();
    let err = loader.load(&source, "R2021").await.unwrap_err();
    assert!(matches!(err, CalcError::CatalogFetch { .. }));
    assert!(lookup(&loader.catalog(), "CSE", "CS101", &scan).is_none());
}

#[tokio::test]
async fn reload_replaces_instead_of_merging() {
    let dir = tempfile::tempdir().unwrap();
    common::write_catalog(dir.path(), "A", r#"{"CSE": {"1": {"CS101": 4}}, "ECE": {"1": {"EC101": 3}}}"#);
    common::write_catalog(dir.path(), "B", r#"{"MECH": {"1": {"ME101": 3}}}"#);
    let source = FsCatalogSource::new(dir.path());
    let mut loader = CatalogLoader::new();

    loader.load(&source, "A").await.unwrap();
    loader.load(&source, "B").await.unwrap();
    assert_eq!(loader.catalog().departments(), vec!["MECH".to_string()]);
    assert_eq!(loader.catalog().regulation(), "B");
}

#[tokio::test]
async fn untrusted_shapes_do_not_crash() {
    let dir = tempfile::tempdir().unwrap();
    let source = FsCatalogSource::new(dir.path());
    let bodies = ["", "null", "42", "\"text\"", r#"{"CSE": {"1": {"CS101": {"credit": null}}}}"#];
    let mut screen = GpaScreen::new();
    for (i, body) in bodies.iter().enumerate() {
        let reg = format!("BAD{}", i);
        common::write_catalog(dir.path(), &reg, body);
        let err = screen.select_regulation(&source, &reg).await.unwrap_err();
        assert!(matches!(err, CalcError::CatalogParse { .. }), "{}: {:?}", body, err);
        assert_eq!(screen.department_options(), no_data_options());
    }
}

#[tokio::test]
async fn path_escape_is_a_fetch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = CatalogLoader::new();
    let err = loader.load(&FsCatalogSource::new(dir.path()), "../R2021").await.unwrap_err();
    assert!(matches!(err, CalcError::CatalogFetch { .. }));
    assert_eq!(loader.load(&FsCatalogSource::new(dir.path()), "").await.unwrap(), LoadOutcome::Skipped);
}
