//! Background parsing and stale-result handling.

use std::time::Duration;

use giswater_forms::prelude::*;

const FORM_A: &str = r#"<ui><widget class="QLabel" name="form_a"/></ui>"#;
const FORM_B: &str = r#"<ui><widget class="QLabel" name="form_b"/></ui>"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("giswater_forms=debug")
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_late_stale_result_is_discarded() {
    init_tracing();
    let mut form = FormInstance::new();
    let request_a = form.set_ui_xml(FORM_A).unwrap();
    let request_b = form.set_ui_xml(FORM_B).unwrap();

    let slow_a = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        request_a.run_async().await
    });
    let outcome_b = request_b.run_async().await;
    assert!(form.apply_parse(outcome_b));

    let outcome_a = slow_a.await.unwrap();
    assert!(outcome_a.result.is_ok());
    assert!(!form.apply_parse(outcome_a));

    assert_eq!(form.phase(), FormPhase::Ready);
    assert_eq!(form.document().unwrap().root().name(), "form_b");
}

#[tokio::test]
async fn test_stale_result_arriving_first_is_discarded() {
    let mut form = FormInstance::new();
    let request_a = form.set_ui_xml(FORM_A).unwrap();
    let request_b = form.set_ui_xml(FORM_B).unwrap();

    let outcome_a = request_a.run_async().await;
    assert!(!form.apply_parse(outcome_a));
    assert!(form.is_loading());

    assert!(form.apply_parse(request_b.run_async().await));
    assert_eq!(form.document().unwrap().root().name(), "form_b");
}

#[tokio::test]
async fn test_parse_after_unmount_is_ignored() {
    let mut form = FormInstance::new();
    let request = form.set_ui_xml(FORM_A).unwrap();
    let pending = tokio::spawn(request.run_async());
    form.unmount();

    let outcome = pending.await.unwrap();
    assert!(!form.apply_parse(outcome));
    assert_eq!(form.phase(), FormPhase::Destroyed);
    assert_eq!(form.view(&RenderContext::new()), FormView::Empty);
}

#[tokio::test]
async fn test_missing_root_leaves_form_empty() {
    init_tracing();
    let mut form = FormInstance::new();
    let request = form.set_ui_xml("<ui><class>Form</class></ui>").unwrap();
    let outcome = request.run_async().await;
    assert!(matches!(outcome.result, Err(FormError::MissingRoot)));
    assert!(form.apply_parse(outcome));
    assert_eq!(form.phase(), FormPhase::Empty);
    assert!(form.document().is_none());
}

#[tokio::test]
async fn test_instances_are_independent() {
    let mut first = FormInstance::new();
    let mut second = FormInstance::new();
    let request_first = first.set_ui_xml(FORM_A).unwrap();
    let request_second = second.set_ui_xml(FORM_B).unwrap();

    let (outcome_first, outcome_second) =
        tokio::join!(request_first.run_async(), request_second.run_async());
    assert!(second.apply_parse(outcome_second));
    assert!(first.apply_parse(outcome_first));
    assert_eq!(first.document().unwrap().root().name(), "form_a");
    assert_eq!(second.document().unwrap().root().name(), "form_b");
}
