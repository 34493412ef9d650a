/*
 * integration_tests.rs
 * Copyright (c) 2025 Letterpress Contributors
 *
 * End-to-end tests for the template service: storage, schema inference,
 * cache behavior under invalidation and concurrency, parameter resolution
 * and rendering.
 */

use std::sync::{Arc, Barrier};
use std::thread;

use letterpress_service::{
    CreateTemplateRequest, MemoryStore, ServiceError, TemplateRepository, TemplateService,
    UpdateTemplateRequest,
};
use letterpress_template::{ParamSchema, ParamSpec};
use pretty_assertions::assert_eq;
use serde_json::json;

fn service() -> TemplateService {
    TemplateService::with_defaults(Arc::new(MemoryStore::new()))
}

fn create(service: &TemplateService, template_id: &str, content: &str) {
    service
        .create_template(CreateTemplateRequest {
            template_id: template_id.to_string(),
            name: template_id.to_string(),
            content: content.to_string(),
            ..CreateTemplateRequest::default()
        })
        .expect("create should succeed");
}

fn params(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().expect("params must be an object")
}

#[test]
fn test_render_with_sections_and_escaping() {
    let service = service();
    create(
        &service,
        "digest",
        "<h1>{{title}}</h1>{{#items}}<li>{{this}}</li>{{/items}}{{^items}}<p>empty</p>{{/items}}",
    );

    let html = service
        .render(
            "digest",
            None,
            params(json!({"title": "A & B", "items": ["x", "<y>"]})),
        )
        .unwrap();
    assert_eq!(html, "<h1>A &amp; B</h1><li>x</li><li>&lt;y&gt;</li>");

    let empty = service
        .render("digest", None, params(json!({"title": "t", "items": []})))
        .unwrap();
    assert_eq!(empty, "<h1>t</h1><p>empty</p>");
}

#[test]
fn test_path_leniency_renders_empty() {
    let service = service();
    create(&service, "lenient", "[{{a.b.c}}]");

    let html = service
        .render("lenient", None, params(json!({"a": {}})))
        .unwrap();
    assert_eq!(html, "[]");
}

#[test]
fn test_required_parameter_enforcement() {
    let service = service();
    let mut schema = ParamSchema::new();
    schema.insert(
        "user".to_string(),
        ParamSpec {
            required: true,
            ..ParamSpec::default()
        },
    );
    service
        .create_template(CreateTemplateRequest {
            template_id: "welcome".to_string(),
            name: "welcome".to_string(),
            content: "Hi {{user.firstName}}".to_string(),
            param_schema: Some(schema),
            ..CreateTemplateRequest::default()
        })
        .unwrap();

    let err = service.render("welcome", None, params(json!({}))).unwrap_err();
    match &err {
        ServiceError::MissingRequiredParams { params } => {
            assert_eq!(params.as_slice(), ["user"]);
        }
        other => panic!("expected missing-params, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Missing required parameters: user");

    let html = service
        .render(
            "welcome",
            None,
            params(json!({"user": {"firstName": "John"}})),
        )
        .unwrap();
    assert_eq!(html, "Hi John");
}

#[test]
fn test_template_reference_expansion() {
    let service = service();
    create(&service, "footer", "(c) ACME <legal>");
    create(&service, "mail", "{{body}}\n{{template_footer}}");
    create(&service, "mail_raw", "{{body}}\n{{{template_footer}}}");

    // Escaped embedding
    let escaped = service
        .render(
            "mail",
            None,
            params(json!({"body": "hi", "template_footer": true})),
        )
        .unwrap();
    assert_eq!(escaped, "hi\n(c) ACME &lt;legal&gt;");

    // Unescaped embedding keeps the raw stored content verbatim
    let raw = service
        .render(
            "mail_raw",
            None,
            params(json!({"body": "hi", "template_footer": true})),
        )
        .unwrap();
    assert_eq!(raw, "hi\n(c) ACME <legal>");
}

#[test]
fn test_unknown_template_reference_fails_without_partial_substitution() {
    let service = service();
    create(&service, "mail", "{{template_missing}}");

    let err = service
        .render("mail", None, params(json!({"template_missing": 1})))
        .unwrap_err();
    match err {
        ServiceError::TemplateNotFound { template_id, .. } => {
            assert_eq!(template_id, "missing");
        }
        other => panic!("expected not-found, got {other:?}"),
    }
}

#[test]
fn test_reference_content_is_not_recursively_resolved() {
    let service = service();
    create(&service, "inner", "INNER");
    create(&service, "outer", "{{template_inner}} text");
    create(&service, "page", "{{{template_outer}}}");

    // The outer template's content embeds verbatim; its own template_ marker
    // is not expanded a second level.
    let html = service
        .render("page", None, params(json!({"template_outer": 1})))
        .unwrap();
    assert_eq!(html, "{{template_inner}} text");
}

#[test]
fn test_update_invalidates_cache() {
    let service = service();
    create(&service, "page", "old {{v}}");

    assert_eq!(
        service.render("page", None, params(json!({"v": 1}))).unwrap(),
        "old 1"
    );

    service
        .update_template(
            "page",
            None,
            UpdateTemplateRequest {
                content: Some("new {{v}}".to_string()),
                ..UpdateTemplateRequest::default()
            },
        )
        .unwrap();

    // Never the old cached AST
    assert_eq!(
        service.render("page", None, params(json!({"v": 1}))).unwrap(),
        "new 1"
    );
}

#[test]
fn test_delete_invalidates_cache_and_render_fails() {
    let service = service();
    create(&service, "page", "x");
    service.render("page", None, params(json!({}))).unwrap();

    service.delete_template("page", None).unwrap();
    let err = service.render("page", None, params(json!({}))).unwrap_err();
    assert_eq!(err.reason_code(), "template.not_found");
}

#[test]
fn test_rename_invalidates_both_keys() {
    let service = service();
    create(&service, "old", "v={{v}}");
    assert_eq!(
        service.render("old", None, params(json!({"v": 1}))).unwrap(),
        "v=1"
    );

    service.rename_template("old", "new", None).unwrap();

    assert!(service.render("old", None, params(json!({"v": 1}))).is_err());
    assert_eq!(
        service.render("new", None, params(json!({"v": 2}))).unwrap(),
        "v=2"
    );
}

#[test]
fn test_clear_cache_then_render_reflects_store() {
    let service = service();
    create(&service, "page", "a");
    service.render("page", None, params(json!({}))).unwrap();

    service.clear_cache();
    assert_eq!(service.render("page", None, params(json!({}))).unwrap(), "a");
}

#[test]
fn test_concurrent_renders_share_one_compilation() {
    const THREADS: usize = 12;

    let service = Arc::new(service());
    create(
        &service,
        "hot",
        "{{#items}}{{this}}{{^@last}},{{/@last}}{{/items}}",
    );

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service
                    .render("hot", None, params(json!({"items": [1, 2, 3]})))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "1,2,3");
    }
}

#[test]
fn test_compilation_failure_surfaces_and_is_not_cached() {
    // Bypass create-time validation by writing directly to the store
    let store = Arc::new(MemoryStore::new());
    let service =
        TemplateService::with_defaults(Arc::clone(&store) as Arc<dyn TemplateRepository>);
    create(&service, "page", "ok {{v}}");

    // Corrupt the stored content behind the service's back
    {
        use letterpress_service::TemplateRepository;
        let mut definition = service.get_template("page", None).unwrap();
        definition.content = "{{#broken}}".to_string();
        store.save(definition);
        service.clear_cache();
    }

    let err = service.render("page", None, params(json!({}))).unwrap_err();
    assert_eq!(err.reason_code(), "template.compilation_failed");
    assert_eq!(err.http_status(), 400);

    // Fixing the content works immediately: the failure was not cached
    {
        use letterpress_service::TemplateRepository;
        let mut definition = service.get_template("page", None).unwrap();
        definition.content = "fixed".to_string();
        store.save(definition);
    }
    assert_eq!(
        service.render("page", None, params(json!({}))).unwrap(),
        "fixed"
    );
}

#[test]
fn test_multi_language_render() {
    let service = service();
    service
        .create_template(CreateTemplateRequest {
            template_id: "welcome".to_string(),
            name: "welcome".to_string(),
            content: "Hello, {{name}}!".to_string(),
            ..CreateTemplateRequest::default()
        })
        .unwrap();
    service
        .create_template(CreateTemplateRequest {
            template_id: "welcome".to_string(),
            language: Some("de".to_string()),
            name: "welcome".to_string(),
            content: "Hallo, {{name}}!".to_string(),
            ..CreateTemplateRequest::default()
        })
        .unwrap();

    let name = params(json!({"name": "Ada"}));
    assert_eq!(
        service.render("welcome", None, name.clone()).unwrap(),
        "Hello, Ada!"
    );
    assert_eq!(
        service.render("welcome", Some("de"), name).unwrap(),
        "Hallo, Ada!"
    );
}

#[test]
fn test_schema_extraction_property() {
    let service = service();
    let schema = service.extract_default_schema("{{a}}{{b.c}}");
    let names: Vec<&str> = schema.keys().map(String::as_str).collect();
    assert_eq!(names, ["a", "b"]);
    for spec in schema.values() {
        assert!(!spec.required);
    }
}
